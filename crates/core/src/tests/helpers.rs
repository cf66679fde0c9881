// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hopdong_domain::{Contract, LookupRow, Payment, ProgressStep, Supplier};

pub fn create_test_contract(id: i64, status_id: Option<i64>, value: Option<f64>) -> Contract {
    Contract {
        id,
        name: format!("Hợp đồng {id}"),
        internal_number: None,
        external_number: None,
        sign_date: None,
        value,
        currency_id: None,
        exchange_rate: None,
        contract_type_id: None,
        investor_id: None,
        supplier_id: None,
        budget_type_id: None,
        staff_id: None,
        contract_status_id: status_id,
        delivery_terms_id: None,
        customs_location_id: None,
        note: None,
    }
}

pub fn create_test_payment(id: i64, status: Option<&str>) -> Payment {
    Payment {
        id,
        contract_id: 1,
        amount: Some(100.0),
        currency_id: None,
        payment_method_id: None,
        payment_type_id: None,
        due_date: None,
        paid: false,
        paid_date: None,
        status: status.map(String::from),
        note: None,
    }
}

pub fn create_test_step(id: i64, status: Option<&str>) -> ProgressStep {
    ProgressStep {
        id,
        contract_id: 1,
        sequence: id,
        name: format!("Bước {id}"),
        planned_start: None,
        planned_end: None,
        actual_start: None,
        actual_end: None,
        status: status.map(String::from),
        staff_id: None,
        note: None,
    }
}

pub fn create_test_supplier(id: i64, address: Option<&str>) -> Supplier {
    Supplier {
        id,
        name: format!("Nhà cung cấp {id}"),
        address: address.map(String::from),
        country_code: None,
        phone: None,
        email: None,
        image: None,
        note: None,
    }
}

pub fn create_lookup_row(id: i64, name: &str) -> LookupRow {
    LookupRow {
        id,
        name: String::from(name),
        secondary: None,
    }
}
