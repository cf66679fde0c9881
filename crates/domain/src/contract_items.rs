// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Records owned by a single contract.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::lenient;
use crate::status::{PaymentStatus, ProgressStatus};
use crate::validation::{FieldErrors, Validate};

/// Implemented by input payloads to report which contract they attach to.
///
/// Standalone records report `None`.
pub trait ContractScoped {
    fn owning_contract(&self) -> Option<i64>;
}

/// An equipment line item (`thiet_bi`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: i64,
    pub contract_id: i64,
    pub name: String,
    pub equipment_type_id: Option<i64>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub origin: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentInput {
    #[serde(default, deserialize_with = "lenient::required_i64")]
    pub contract_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub equipment_type_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub unit_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub origin: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub note: Option<String>,
}

impl Validate for EquipmentInput {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors: FieldErrors = FieldErrors::new();
        errors.require_id("contractId", self.contract_id);
        errors.require_text("name", &self.name);
        errors.check_id("equipmentTypeId", self.equipment_type_id);
        errors.check_amount("quantity", self.quantity);
        errors.check_amount("unitPrice", self.unit_price);
        errors.into_inner()
    }
}

/// A scheduled or settled payment (`thanh_toan`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub contract_id: i64,
    pub amount: Option<f64>,
    pub currency_id: Option<i64>,
    pub payment_method_id: Option<i64>,
    pub payment_type_id: Option<i64>,
    pub due_date: Option<String>,
    pub paid: bool,
    pub paid_date: Option<String>,
    /// Free-text settlement status; may be absent on older rows.
    pub status: Option<String>,
    pub note: Option<String>,
}

impl Payment {
    /// The settlement status, if the stored text is one of the known labels.
    ///
    /// The `paid` flag is deliberately not consulted.
    #[must_use]
    pub fn parsed_status(&self) -> Option<PaymentStatus> {
        self.status.as_deref().and_then(PaymentStatus::from_label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    #[serde(default, deserialize_with = "lenient::required_i64")]
    pub contract_id: i64,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub currency_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub payment_method_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub payment_type_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub paid: bool,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub paid_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub note: Option<String>,
}

impl Validate for PaymentInput {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors: FieldErrors = FieldErrors::new();
        errors.require_id("contractId", self.contract_id);
        errors.check_amount("amount", self.amount);
        errors.check_id("currencyId", self.currency_id);
        errors.check_id("paymentMethodId", self.payment_method_id);
        errors.check_id("paymentTypeId", self.payment_type_id);
        errors.check_date("dueDate", self.due_date.as_deref());
        errors.check_date("paidDate", self.paid_date.as_deref());
        errors.into_inner()
    }
}

/// A step of contract execution (`buoc_thuc_hien`), ordered by `sequence`
/// within its contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStep {
    pub id: i64,
    pub contract_id: i64,
    pub sequence: i64,
    pub name: String,
    pub planned_start: Option<String>,
    pub planned_end: Option<String>,
    pub actual_start: Option<String>,
    pub actual_end: Option<String>,
    /// Free-text status; see `ProgressStatus` for the recognised values.
    pub status: Option<String>,
    pub staff_id: Option<i64>,
    pub note: Option<String>,
}

impl ProgressStep {
    #[must_use]
    pub fn parsed_status(&self) -> Option<ProgressStatus> {
        self.status.as_deref().and_then(ProgressStatus::from_label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStepInput {
    #[serde(default, deserialize_with = "lenient::required_i64")]
    pub contract_id: i64,
    /// Assigned as the next free sequence number when absent.
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub sequence: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub planned_start: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub planned_end: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub actual_start: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub actual_end: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub staff_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub note: Option<String>,
}

impl Validate for ProgressStepInput {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors: FieldErrors = FieldErrors::new();
        errors.require_id("contractId", self.contract_id);
        errors.require_text("name", &self.name);
        if let Some(sequence) = self.sequence
            && sequence < 1
        {
            errors.push("sequence", format!("must be at least 1, got {sequence}"));
        }
        let planned_start = errors.check_date("plannedStart", self.planned_start.as_deref());
        let planned_end = errors.check_date("plannedEnd", self.planned_end.as_deref());
        errors.check_range("plannedEnd", planned_start, planned_end);
        let actual_start = errors.check_date("actualStart", self.actual_start.as_deref());
        let actual_end = errors.check_date("actualEnd", self.actual_end.as_deref());
        errors.check_range("actualEnd", actual_start, actual_end);
        errors.check_id("staffId", self.staff_id);
        errors.into_inner()
    }
}

/// Metadata of a file attached to a contract (`file_hop_dong`).
///
/// The base64 content is only read by the download path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub contract_id: i64,
    pub file_name: String,
    pub mime_type: String,
    pub size: i64,
    pub uploaded_at: String,
    pub note: Option<String>,
}

/// A new attachment, already base64-encoded for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub contract_id: i64,
    pub file_name: String,
    pub mime_type: String,
    pub size: i64,
    pub content_base64: String,
    pub note: Option<String>,
}

impl Validate for NewDocument {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors: FieldErrors = FieldErrors::new();
        errors.require_id("contractId", self.contract_id);
        errors.require_text("fileName", &self.file_name);
        if self.size == 0 {
            errors.push("file", "must not be empty");
        }
        errors.into_inner()
    }
}

/// Editable metadata of an attachment. The content itself is immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpdate {
    #[serde(default, deserialize_with = "lenient::required_i64")]
    pub contract_id: i64,
    #[serde(default)]
    pub file_name: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub note: Option<String>,
}

impl Validate for DocumentUpdate {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors: FieldErrors = FieldErrors::new();
        errors.require_id("contractId", self.contract_id);
        errors.require_text("fileName", &self.file_name);
        errors.into_inner()
    }
}

/// A goods reception at a customs location (`tiep_nhan`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reception {
    pub id: i64,
    pub contract_id: i64,
    pub received_date: String,
    pub customs_location_id: Option<i64>,
    pub declaration_number: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceptionInput {
    #[serde(default, deserialize_with = "lenient::required_i64")]
    pub contract_id: i64,
    #[serde(default)]
    pub received_date: String,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub customs_location_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub declaration_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub note: Option<String>,
}

impl Validate for ReceptionInput {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors: FieldErrors = FieldErrors::new();
        errors.require_id("contractId", self.contract_id);
        if self.received_date.trim().is_empty() {
            errors.push("receivedDate", "is required");
        } else {
            errors.check_date("receivedDate", Some(&self.received_date));
        }
        errors.check_id("customsLocationId", self.customs_location_id);
        errors.into_inner()
    }
}

/// A capital disbursement towards a contract (`cap_von`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundDisbursement {
    pub id: i64,
    pub contract_id: i64,
    pub amount: Option<f64>,
    pub currency_id: Option<i64>,
    pub budget_type_id: Option<i64>,
    pub disbursed_date: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundDisbursementInput {
    #[serde(default, deserialize_with = "lenient::required_i64")]
    pub contract_id: i64,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub currency_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub budget_type_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub disbursed_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub note: Option<String>,
}

impl Validate for FundDisbursementInput {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors: FieldErrors = FieldErrors::new();
        errors.require_id("contractId", self.contract_id);
        errors.check_amount("amount", self.amount);
        errors.check_id("currencyId", self.currency_id);
        errors.check_id("budgetTypeId", self.budget_type_id);
        errors.check_date("disbursedDate", self.disbursed_date.as_deref());
        errors.into_inner()
    }
}

macro_rules! contract_scoped {
    (owned: $($owned:ty),+; standalone: $($standalone:ty),+ $(;)?) => {
        $(
            impl ContractScoped for $owned {
                fn owning_contract(&self) -> Option<i64> {
                    Some(self.contract_id)
                }
            }
        )+
        $(
            impl ContractScoped for $standalone {
                fn owning_contract(&self) -> Option<i64> {
                    None
                }
            }
        )+
    };
}

contract_scoped! {
    owned: EquipmentInput, PaymentInput, ProgressStepInput, DocumentUpdate, ReceptionInput,
        FundDisbursementInput, NewDocument;
    standalone: crate::ContractInput, crate::SupplierInput, crate::InvestorInput,
        crate::StaffInput, crate::LookupInput;
}
