// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::lenient;
use crate::status::ContractStatus;
use crate::validation::{FieldErrors, Validate};

/// An import/export/customs contract (`hop_dong`).
///
/// Every `*_id` field except `id` is an unenforced reference; it may point at
/// a row that no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: i64,
    pub name: String,
    pub internal_number: Option<String>,
    pub external_number: Option<String>,
    pub sign_date: Option<String>,
    pub value: Option<f64>,
    pub currency_id: Option<i64>,
    pub exchange_rate: Option<f64>,
    pub contract_type_id: Option<i64>,
    pub investor_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub budget_type_id: Option<i64>,
    pub staff_id: Option<i64>,
    pub contract_status_id: Option<i64>,
    pub delivery_terms_id: Option<i64>,
    pub customs_location_id: Option<i64>,
    pub note: Option<String>,
}

impl Contract {
    /// The status this contract is in, if its status id is recognised.
    #[must_use]
    pub fn status(&self) -> Option<ContractStatus> {
        self.contract_status_id.and_then(ContractStatus::from_id)
    }

    /// The contract value, with a missing value counted as zero.
    #[must_use]
    pub fn value_or_zero(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }
}

/// Create/update payload for a contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub internal_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub external_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub sign_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub currency_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub exchange_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub contract_type_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub investor_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub supplier_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub budget_type_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub staff_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub contract_status_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub delivery_terms_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub customs_location_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub note: Option<String>,
}

impl Validate for ContractInput {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors: FieldErrors = FieldErrors::new();
        errors.require_text("name", &self.name);
        errors.check_date("signDate", self.sign_date.as_deref());
        errors.check_amount("value", self.value);
        errors.check_positive("exchangeRate", self.exchange_rate);
        errors.check_id("currencyId", self.currency_id);
        errors.check_id("contractTypeId", self.contract_type_id);
        errors.check_id("investorId", self.investor_id);
        errors.check_id("supplierId", self.supplier_id);
        errors.check_id("budgetTypeId", self.budget_type_id);
        errors.check_id("staffId", self.staff_id);
        errors.check_id("deliveryTermsId", self.delivery_terms_id);
        errors.check_id("customsLocationId", self.customs_location_id);
        if let Some(status_id) = self.contract_status_id
            && ContractStatus::from_id(status_id).is_none()
        {
            errors.push(
                "contractStatusId",
                format!("unknown contract status id {status_id}"),
            );
        }
        errors.into_inner()
    }
}
