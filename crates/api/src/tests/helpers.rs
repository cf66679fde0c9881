// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use hopdong_domain::{
    Contract, ContractInput, PaymentInput, ProgressStepInput, Supplier, SupplierInput,
};
use hopdong_persistence::Persistence;

use crate::create_entity;

pub const MAX_UPLOAD_BYTES: usize = 1024;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_contract_input(name: &str) -> ContractInput {
    ContractInput {
        name: String::from(name),
        sign_date: Some(String::from("2026-02-01")),
        value: Some(1000.0),
        currency_id: Some(2),
        contract_type_id: Some(1),
        contract_status_id: Some(1),
        ..ContractInput::default()
    }
}

pub fn create_test_contract(persistence: &mut Persistence, name: &str) -> Contract {
    create_entity::<Contract>(persistence, &create_test_contract_input(name)).unwrap()
}

pub fn create_test_supplier(persistence: &mut Persistence, name: &str, address: &str) -> Supplier {
    create_entity::<Supplier>(
        persistence,
        &SupplierInput {
            name: String::from(name),
            address: Some(String::from(address)),
            country_code: Some(String::from("JP")),
            ..SupplierInput::default()
        },
    )
    .unwrap()
}

pub fn create_test_payment_input(contract_id: i64, status: &str) -> PaymentInput {
    PaymentInput {
        contract_id,
        amount: Some(250.0),
        currency_id: Some(2),
        status: Some(String::from(status)),
        ..PaymentInput::default()
    }
}

pub fn create_test_step_input(contract_id: i64, name: &str, status: &str) -> ProgressStepInput {
    ProgressStepInput {
        contract_id,
        name: String::from(name),
        status: Some(String::from(status)),
        ..ProgressStepInput::default()
    }
}
