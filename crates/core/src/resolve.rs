// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side resolution of foreign keys into display values.

use hopdong_domain::{
    Contract, ContractStatus, Equipment, FundDisbursement, Investor, LookupKind, LookupRow, Named,
    Payment, ProgressStep, Reception, Staff, Supplier,
};
use serde::Serialize;

/// Shown in place of a reference that is absent or dangling.
pub const UNDETERMINED: &str = "Chưa xác định";

/// Shown for a supplier whose country code is missing or unknown.
pub const DEFAULT_FLAG: &str = "🌐";

const FLAGS: &[(&str, &str)] = &[
    ("VN", "🇻🇳"),
    ("CN", "🇨🇳"),
    ("US", "🇺🇸"),
    ("SG", "🇸🇬"),
    ("ES", "🇪🇸"),
    ("IT", "🇮🇹"),
    ("TH", "🇹🇭"),
    ("MY", "🇲🇾"),
    ("JP", "🇯🇵"),
    ("KR", "🇰🇷"),
    ("DE", "🇩🇪"),
    ("FR", "🇫🇷"),
    ("GB", "🇬🇧"),
];

/// Resolves a reference id to the display name of the matching row.
///
/// # Arguments
///
/// * `id` - The reference, possibly absent
/// * `rows` - The already-loaded table to search
/// * `fallback` - Returned when `id` is `None` or matches no row
#[must_use]
pub fn resolve_name<'a, T: Named>(id: Option<i64>, rows: &'a [T], fallback: &'a str) -> &'a str {
    id.and_then(|id| rows.iter().find(|row| row.id() == id))
        .map_or(fallback, T::name)
}

/// Maps an ISO country code to its flag emoji, case-insensitively.
#[must_use]
pub fn country_flag(code: Option<&str>) -> &'static str {
    let Some(code) = code.map(str::trim) else {
        return DEFAULT_FLAG;
    };
    FLAGS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map_or(DEFAULT_FLAG, |&(_, flag)| flag)
}

/// Turns a stored base64 image into a data URI a browser can render.
///
/// The MIME type is sniffed from the leading bytes of the payload. Values
/// that are already data URIs are returned unchanged; blank values give
/// `None`.
#[must_use]
pub fn image_data_uri(image: &str) -> Option<String> {
    let image: &str = image.trim();
    if image.is_empty() {
        return None;
    }
    if image.starts_with("data:") {
        return Some(image.to_string());
    }
    let mime: &str = if image.starts_with("/9j/") {
        "image/jpeg"
    } else if image.starts_with("R0lGOD") {
        "image/gif"
    } else if image.starts_with("UklGR") {
        "image/webp"
    } else {
        "image/png"
    };
    Some(format!("data:{mime};base64,{image}"))
}

/// Every lookup and party table a view may need, loaded once per request.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub contract_types: Vec<LookupRow>,
    pub budget_types: Vec<LookupRow>,
    pub currencies: Vec<LookupRow>,
    pub payment_methods: Vec<LookupRow>,
    pub payment_types: Vec<LookupRow>,
    pub equipment_types: Vec<LookupRow>,
    pub customs_locations: Vec<LookupRow>,
    pub delivery_terms: Vec<LookupRow>,
    pub contract_statuses: Vec<LookupRow>,
    pub suppliers: Vec<Supplier>,
    pub investors: Vec<Investor>,
    pub staff: Vec<Staff>,
}

impl ReferenceTables {
    /// The rows of one lookup table.
    #[must_use]
    pub fn lookup(&self, kind: LookupKind) -> &[LookupRow] {
        match kind {
            LookupKind::ContractType => &self.contract_types,
            LookupKind::BudgetType => &self.budget_types,
            LookupKind::Currency => &self.currencies,
            LookupKind::PaymentMethod => &self.payment_methods,
            LookupKind::PaymentType => &self.payment_types,
            LookupKind::EquipmentType => &self.equipment_types,
            LookupKind::CustomsLocation => &self.customs_locations,
            LookupKind::DeliveryTerms => &self.delivery_terms,
            LookupKind::ContractStatus => &self.contract_statuses,
        }
    }

    /// Replaces the rows of one lookup table.
    pub fn set_lookup(&mut self, kind: LookupKind, rows: Vec<LookupRow>) {
        let slot: &mut Vec<LookupRow> = match kind {
            LookupKind::ContractType => &mut self.contract_types,
            LookupKind::BudgetType => &mut self.budget_types,
            LookupKind::Currency => &mut self.currencies,
            LookupKind::PaymentMethod => &mut self.payment_methods,
            LookupKind::PaymentType => &mut self.payment_types,
            LookupKind::EquipmentType => &mut self.equipment_types,
            LookupKind::CustomsLocation => &mut self.customs_locations,
            LookupKind::DeliveryTerms => &mut self.delivery_terms,
            LookupKind::ContractStatus => &mut self.contract_statuses,
        };
        *slot = rows;
    }

    fn name(&self, kind: LookupKind, id: Option<i64>) -> String {
        resolve_name(id, self.lookup(kind), UNDETERMINED).to_string()
    }

    /// Resolves every reference on a contract.
    ///
    /// The status name comes from the status table when it has a matching
    /// row, then from the built-in label for a known status id.
    #[must_use]
    pub fn contract_view(&self, contract: &Contract) -> ContractView {
        let status_fallback: &str = contract
            .status()
            .map_or(UNDETERMINED, ContractStatus::label);
        let customs_location_name: String =
            self.name(LookupKind::CustomsLocation, contract.customs_location_id);
        ContractView {
            contract: contract.clone(),
            contract_type_name: self.name(LookupKind::ContractType, contract.contract_type_id),
            currency_name: self.name(LookupKind::Currency, contract.currency_id),
            budget_type_name: self.name(LookupKind::BudgetType, contract.budget_type_id),
            delivery_terms_name: self.name(LookupKind::DeliveryTerms, contract.delivery_terms_id),
            customs_location_name,
            status_name: resolve_name(
                contract.contract_status_id,
                &self.contract_statuses,
                status_fallback,
            )
            .to_string(),
            supplier_name: resolve_name(contract.supplier_id, &self.suppliers, UNDETERMINED)
                .to_string(),
            investor_name: resolve_name(contract.investor_id, &self.investors, UNDETERMINED)
                .to_string(),
            staff_name: resolve_name(contract.staff_id, &self.staff, UNDETERMINED).to_string(),
        }
    }

    #[must_use]
    pub fn payment_view(&self, payment: &Payment) -> PaymentView {
        PaymentView {
            payment: payment.clone(),
            currency_name: self.name(LookupKind::Currency, payment.currency_id),
            payment_method_name: self.name(LookupKind::PaymentMethod, payment.payment_method_id),
            payment_type_name: self.name(LookupKind::PaymentType, payment.payment_type_id),
        }
    }

    #[must_use]
    pub fn equipment_view(&self, equipment: &Equipment) -> EquipmentView {
        EquipmentView {
            equipment: equipment.clone(),
            equipment_type_name: self.name(LookupKind::EquipmentType, equipment.equipment_type_id),
        }
    }

    #[must_use]
    pub fn progress_step_view(&self, step: &ProgressStep) -> ProgressStepView {
        ProgressStepView {
            step: step.clone(),
            staff_name: resolve_name(step.staff_id, &self.staff, UNDETERMINED).to_string(),
        }
    }

    #[must_use]
    pub fn reception_view(&self, reception: &Reception) -> ReceptionView {
        let customs_location_name: String =
            self.name(LookupKind::CustomsLocation, reception.customs_location_id);
        ReceptionView {
            reception: reception.clone(),
            customs_location_name,
        }
    }

    #[must_use]
    pub fn disbursement_view(&self, disbursement: &FundDisbursement) -> DisbursementView {
        DisbursementView {
            disbursement: disbursement.clone(),
            currency_name: self.name(LookupKind::Currency, disbursement.currency_id),
            budget_type_name: self.name(LookupKind::BudgetType, disbursement.budget_type_id),
        }
    }
}

/// A contract with its references resolved for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractView {
    #[serde(flatten)]
    pub contract: Contract,
    pub contract_type_name: String,
    pub currency_name: String,
    pub budget_type_name: String,
    pub delivery_terms_name: String,
    pub customs_location_name: String,
    pub status_name: String,
    pub supplier_name: String,
    pub investor_name: String,
    pub staff_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    #[serde(flatten)]
    pub payment: Payment,
    pub currency_name: String,
    pub payment_method_name: String,
    pub payment_type_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentView {
    #[serde(flatten)]
    pub equipment: Equipment,
    pub equipment_type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStepView {
    #[serde(flatten)]
    pub step: ProgressStep,
    pub staff_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceptionView {
    #[serde(flatten)]
    pub reception: Reception,
    pub customs_location_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisbursementView {
    #[serde(flatten)]
    pub disbursement: FundDisbursement,
    pub currency_name: String,
    pub budget_type_name: String,
}

/// A supplier as shown in the supplier list: flag and inlined logo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierView {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub country_code: Option<String>,
    pub flag: &'static str,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub image_uri: Option<String>,
    pub note: Option<String>,
}

impl From<&Supplier> for SupplierView {
    fn from(supplier: &Supplier) -> Self {
        Self {
            id: supplier.id,
            name: supplier.name.clone(),
            address: supplier.address.clone(),
            country_code: supplier.country_code.clone(),
            flag: country_flag(supplier.country_code.as_deref()),
            phone: supplier.phone.clone(),
            email: supplier.email.clone(),
            image_uri: supplier.image.as_deref().and_then(image_data_uri),
            note: supplier.note.clone(),
        }
    }
}

/// A staff member as shown in the staff list, with an inlined portrait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffView {
    pub id: i64,
    pub name: String,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub image_uri: Option<String>,
}

impl From<&Staff> for StaffView {
    fn from(staff: &Staff) -> Self {
        Self {
            id: staff.id,
            name: staff.name.clone(),
            position: staff.position.clone(),
            phone: staff.phone.clone(),
            email: staff.email.clone(),
            image_uri: staff.image.as_deref().and_then(image_data_uri),
        }
    }
}
