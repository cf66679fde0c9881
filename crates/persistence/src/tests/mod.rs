// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod account_tests;
mod entity_tests;
mod initialization_tests;
mod lookup_tests;
mod snapshot_tests;

use crate::Persistence;
use hopdong_domain::{
    Contract, ContractInput, EquipmentInput, NewDocument, PaymentInput, ProgressStepInput,
    ReceptionInput, SupplierInput,
};

pub fn create_test_contract_input(name: &str) -> ContractInput {
    ContractInput {
        name: String::from(name),
        internal_number: Some(String::from("HD-01/2026")),
        sign_date: Some(String::from("2026-01-15")),
        value: Some(1_500_000.0),
        contract_status_id: Some(1),
        ..ContractInput::default()
    }
}

pub fn seed_contract(persistence: &mut Persistence, name: &str) -> Contract {
    persistence
        .insert::<Contract>(&create_test_contract_input(name))
        .unwrap()
}

pub fn create_test_payment_input(contract_id: i64, amount: f64) -> PaymentInput {
    PaymentInput {
        contract_id,
        amount: Some(amount),
        due_date: Some(String::from("2026-03-01")),
        status: Some(String::from("Chưa thanh toán")),
        ..PaymentInput::default()
    }
}

pub fn create_test_equipment_input(contract_id: i64, name: &str) -> EquipmentInput {
    EquipmentInput {
        contract_id,
        name: String::from(name),
        quantity: Some(2.0),
        unit_price: Some(250.0),
        ..EquipmentInput::default()
    }
}

pub fn create_test_step_input(contract_id: i64, name: &str) -> ProgressStepInput {
    ProgressStepInput {
        contract_id,
        name: String::from(name),
        status: Some(String::from("Chờ thực hiện")),
        ..ProgressStepInput::default()
    }
}

pub fn create_test_reception_input(contract_id: i64, received_date: &str) -> ReceptionInput {
    ReceptionInput {
        contract_id,
        received_date: String::from(received_date),
        declaration_number: Some(String::from("TK-1029")),
        ..ReceptionInput::default()
    }
}

pub fn create_test_document(contract_id: i64, file_name: &str) -> NewDocument {
    NewDocument {
        contract_id,
        file_name: String::from(file_name),
        mime_type: String::from("application/pdf"),
        size: 4,
        content_base64: String::from("JVBERg=="),
        note: None,
    }
}

pub fn create_test_supplier_input(name: &str, address: &str) -> SupplierInput {
    SupplierInput {
        name: String::from(name),
        address: Some(String::from(address)),
        country_code: Some(String::from("de")),
        ..SupplierInput::default()
    }
}
