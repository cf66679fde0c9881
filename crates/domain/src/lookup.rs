// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{DomainError, FieldError};
use crate::lenient;
use crate::validation::{FieldErrors, Validate};

/// The small reference tables that contracts and their children point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookupKind {
    /// Loại hợp đồng.
    ContractType,
    /// Loại ngân sách.
    BudgetType,
    /// Loại tiền.
    Currency,
    /// Phương thức thanh toán.
    PaymentMethod,
    /// Loại thanh toán.
    PaymentType,
    /// Loại thiết bị.
    EquipmentType,
    /// Địa điểm thông quan; the secondary field is the customs office branch.
    CustomsLocation,
    /// Điều kiện giao hàng.
    DeliveryTerms,
    /// Trạng thái hợp đồng; seeded and bound to `ContractStatus`.
    ContractStatus,
}

impl LookupKind {
    /// Every lookup kind.
    pub const ALL: [Self; 9] = [
        Self::ContractType,
        Self::BudgetType,
        Self::Currency,
        Self::PaymentMethod,
        Self::PaymentType,
        Self::EquipmentType,
        Self::CustomsLocation,
        Self::DeliveryTerms,
        Self::ContractStatus,
    ];

    /// The URL slug the table is exposed under.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::ContractType => "loai-hop-dong",
            Self::BudgetType => "loai-ngan-sach",
            Self::Currency => "loai-tien",
            Self::PaymentMethod => "phuong-thuc-thanh-toan",
            Self::PaymentType => "loai-thanh-toan",
            Self::EquipmentType => "loai-thiet-bi",
            Self::CustomsLocation => "dia-diem-thong-quan",
            Self::DeliveryTerms => "dieu-kien-giao-hang",
            Self::ContractStatus => "trang-thai-hop-dong",
        }
    }

    /// Whether rows may be created, edited or deleted through the API.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        !matches!(self, Self::ContractStatus)
    }

    /// Fails if the table is read-only.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ReadOnlyLookup` for enum-bound tables.
    pub const fn ensure_editable(self) -> Result<(), DomainError> {
        if self.is_editable() {
            Ok(())
        } else {
            Err(DomainError::ReadOnlyLookup(self.slug()))
        }
    }
}

impl FromStr for LookupKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| DomainError::UnknownLookupKind(s.to_string()))
    }
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// A row of any lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRow {
    pub id: i64,
    pub name: String,
    /// `mo_ta` for most tables, `chi_cuc` for customs locations.
    pub secondary: Option<String>,
}

/// Create/update payload for a lookup row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub secondary: Option<String>,
}

impl Validate for LookupInput {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors: FieldErrors = FieldErrors::new();
        errors.require_text("name", &self.name);
        errors.into_inner()
    }
}

/// A record that can be referred to by id and shown by name.
///
/// Implemented by lookup rows and by the party tables (suppliers,
/// investors, staff) so one resolver serves every foreign key.
pub trait Named {
    /// The surrogate primary key.
    fn id(&self) -> i64;
    /// The display name.
    fn name(&self) -> &str;
}

impl Named for LookupRow {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_slugs_parse_back_to_kinds() {
        for kind in LookupKind::ALL {
            assert_eq!(kind.slug().parse::<LookupKind>(), Ok(kind));
        }
        assert_eq!(
            "hop-dong".parse::<LookupKind>(),
            Err(DomainError::UnknownLookupKind(String::from("hop-dong")))
        );
    }

    #[test]
    fn test_contract_status_table_is_read_only() {
        assert!(LookupKind::ContractStatus.ensure_editable().is_err());
        assert!(LookupKind::Currency.ensure_editable().is_ok());
    }

    #[test]
    fn test_lookup_input_requires_name() {
        let input: LookupInput = LookupInput {
            name: String::from("   "),
            secondary: None,
        };
        let err: DomainError = input.validate().unwrap_err();
        assert_eq!(err.field_errors()[0].field, "name");
    }
}
