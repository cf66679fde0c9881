// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Standalone parties a contract refers to: suppliers, investors and staff.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::lenient;
use crate::lookup::Named;
use crate::validation::{FieldErrors, Validate};

/// A supplier (`nha_cung_cap`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    /// ISO 3166 alpha-2 code used for the flag.
    pub country_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Base64 logo, stored without a data-URI prefix.
    pub image: Option<String>,
    pub note: Option<String>,
}

/// Create/update payload for a supplier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub country_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub note: Option<String>,
}

impl Validate for SupplierInput {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors: FieldErrors = FieldErrors::new();
        errors.require_text("name", &self.name);
        if let Some(code) = &self.country_code
            && (code.chars().count() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()))
        {
            errors.push("countryCode", format!("must be a two-letter code, got '{code}'"));
        }
        check_email(&mut errors, self.email.as_deref());
        errors.into_inner()
    }
}

/// An investor (`chu_dau_tu`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investor {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub note: Option<String>,
}

/// Create/update payload for an investor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub note: Option<String>,
}

impl Validate for InvestorInput {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors: FieldErrors = FieldErrors::new();
        errors.require_text("name", &self.name);
        check_email(&mut errors, self.email.as_deref());
        errors.into_inner()
    }
}

/// A staff member (`can_bo`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: i64,
    pub name: String,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Base64 portrait, stored without a data-URI prefix.
    pub image: Option<String>,
}

/// Create/update payload for a staff member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub image: Option<String>,
}

impl Validate for StaffInput {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors: FieldErrors = FieldErrors::new();
        errors.require_text("name", &self.name);
        check_email(&mut errors, self.email.as_deref());
        errors.into_inner()
    }
}

fn check_email(errors: &mut FieldErrors, email: Option<&str>) {
    if let Some(email) = email
        && !email.contains('@')
    {
        errors.push("email", format!("'{email}' is not an email address"));
    }
}

impl Named for Supplier {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Investor {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Staff {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
