// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod contract;
mod contract_items;
mod error;
pub mod lenient;
mod lookup;
mod party;
mod status;
mod validation;

#[cfg(test)]
mod tests;

pub use contract::{Contract, ContractInput};
pub use contract_items::{
    ContractScoped, Document, DocumentUpdate, Equipment, EquipmentInput, FundDisbursement,
    FundDisbursementInput, NewDocument, Payment, PaymentInput, ProgressStep, ProgressStepInput,
    Reception, ReceptionInput,
};
pub use error::{DomainError, FieldError};
pub use lookup::{LookupInput, LookupKind, LookupRow, Named};
pub use party::{Investor, InvestorInput, Staff, StaffInput, Supplier, SupplierInput};
pub use status::{ContractStatus, PaymentStatus, ProgressStatus};
pub use validation::{FieldErrors, Validate, parse_date};

/// Step name recorded when goods are received against a contract.
pub const RECEPTION_STEP_NAME: &str = "Tiếp nhận hàng hóa";
