// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status enums and their mapping tables.
//!
//! Contracts carry a numeric status id; payments and progress steps carry
//! free text. These tables are the only place the stored representations are
//! interpreted. Values outside the tables map to `None` and are never
//! bucketed.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a contract, keyed by the `trang_thai_hop_dong` row id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    /// Id 1.
    Active,
    /// Id 2.
    Completed,
    /// Id 3.
    Paused,
}

impl ContractStatus {
    /// All statuses in id order.
    pub const ALL: [Self; 3] = [Self::Active, Self::Completed, Self::Paused];

    /// Maps a stored status id to a status. Exact equality only.
    #[must_use]
    pub const fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Self::Active),
            2 => Some(Self::Completed),
            3 => Some(Self::Paused),
            _ => None,
        }
    }

    /// The id this status is stored under.
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Active => 1,
            Self::Completed => 2,
            Self::Paused => 3,
        }
    }

    /// The seeded display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Đang thực hiện",
            Self::Completed => "Đã hoàn thành",
            Self::Paused => "Tạm dừng",
        }
    }
}

/// Settlement status of a payment, stored as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// "Chưa thanh toán".
    Unpaid,
    /// "Đã thanh toán".
    Paid,
}

impl PaymentStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 2] = [Self::Unpaid, Self::Paid];

    /// The stored text for this status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unpaid => "Chưa thanh toán",
            Self::Paid => "Đã thanh toán",
        }
    }

    /// Maps stored text to a status. Surrounding whitespace is ignored.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label: &str = label.trim();
        Self::ALL.into_iter().find(|status| status.label() == label)
    }
}

/// Execution status of a progress step, stored as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgressStatus {
    /// "Chờ thực hiện".
    Pending,
    /// "Đang thực hiện".
    InProgress,
    /// "Hoàn thành".
    Completed,
    /// "Tạm dừng".
    Paused,
}

impl ProgressStatus {
    /// All statuses in workflow order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Paused,
    ];

    /// The stored text for this status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Chờ thực hiện",
            Self::InProgress => "Đang thực hiện",
            Self::Completed => "Hoàn thành",
            Self::Paused => "Tạm dừng",
        }
    }

    /// Maps stored text to a status. Surrounding whitespace is ignored.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label: &str = label.trim();
        Self::ALL.into_iter().find(|status| status.label() == label)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_contract_status_ids_round_trip() {
        for status in ContractStatus::ALL {
            assert_eq!(ContractStatus::from_id(status.id()), Some(status));
        }
        assert_eq!(ContractStatus::from_id(0), None);
        assert_eq!(ContractStatus::from_id(4), None);
    }

    #[test]
    fn test_payment_status_matches_exact_labels_only() {
        assert_eq!(
            PaymentStatus::from_label("Đã thanh toán"),
            Some(PaymentStatus::Paid)
        );
        assert_eq!(
            PaymentStatus::from_label(" Chưa thanh toán "),
            Some(PaymentStatus::Unpaid)
        );
        assert_eq!(PaymentStatus::from_label("Paid"), None);
        assert_eq!(PaymentStatus::from_label(""), None);
    }

    #[test]
    fn test_progress_status_labels() {
        assert_eq!(
            ProgressStatus::from_label("Đang thực hiện"),
            Some(ProgressStatus::InProgress)
        );
        assert_eq!(
            ProgressStatus::from_label("Tạm dừng"),
            Some(ProgressStatus::Paused)
        );
        assert_eq!(ProgressStatus::from_label("Đã huỷ"), None);
    }
}
