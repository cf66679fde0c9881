// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ContractInput, ContractScoped, DomainError, EquipmentInput, FieldError, NewDocument,
    PaymentInput, ProgressStepInput, ReceptionInput, SupplierInput, Validate,
};

fn fields(errors: &[FieldError]) -> Vec<&str> {
    errors.iter().map(|e| e.field.as_str()).collect()
}

#[test]
fn test_contract_form_payload_with_string_numbers_is_accepted() {
    let input: ContractInput = serde_json::from_str(
        r#"{
            "name": "HĐ nhập khẩu máy CT",
            "signDate": "2024-03-01",
            "value": "1250000.50",
            "currencyId": "2",
            "exchangeRate": "24500",
            "supplierId": 3,
            "contractStatusId": "1",
            "investorId": "",
            "note": "  "
        }"#,
    )
    .unwrap();

    assert_eq!(input.value, Some(1_250_000.5));
    assert_eq!(input.currency_id, Some(2));
    assert_eq!(input.investor_id, None);
    assert_eq!(input.note, None);
    assert!(input.validate().is_ok());
    assert_eq!(input.owning_contract(), None);
}

#[test]
fn test_contract_reports_every_bad_field() {
    let input: ContractInput = ContractInput {
        name: String::from(" "),
        sign_date: Some(String::from("2024-13-01")),
        value: Some(-1.0),
        exchange_rate: Some(0.0),
        contract_status_id: Some(7),
        ..ContractInput::default()
    };

    let err: DomainError = input.validate().unwrap_err();
    let DomainError::Validation(errors) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(
        fields(errors),
        vec![
            "name",
            "signDate",
            "value",
            "exchangeRate",
            "contractStatusId"
        ]
    );
}

#[test]
fn test_child_without_contract_id_is_a_field_error() {
    let input: EquipmentInput = serde_json::from_str(r#"{"name": "Máy phát"}"#).unwrap();
    let err: DomainError = input.validate().unwrap_err();
    assert_eq!(fields(&err.field_errors()), vec!["contractId"]);
}

#[test]
fn test_equipment_rejects_negative_quantity() {
    let input: EquipmentInput = EquipmentInput {
        contract_id: 1,
        name: String::from("Máy phát"),
        quantity: Some(-2.0),
        ..EquipmentInput::default()
    };
    let err: DomainError = input.validate().unwrap_err();
    assert_eq!(fields(&err.field_errors()), vec!["quantity"]);
    assert_eq!(input.owning_contract(), Some(1));
}

#[test]
fn test_payment_paid_flag_accepts_form_values() {
    let input: PaymentInput = serde_json::from_str(
        r#"{"contractId": "4", "amount": "100", "paid": "1", "status": "Đã thanh toán"}"#,
    )
    .unwrap();
    assert!(input.paid);
    assert_eq!(input.contract_id, 4);
    assert!(input.validate().is_ok());
}

#[test]
fn test_progress_step_end_before_start_is_rejected() {
    let input: ProgressStepInput = ProgressStepInput {
        contract_id: 1,
        name: String::from("Thông quan"),
        planned_start: Some(String::from("2024-05-10")),
        planned_end: Some(String::from("2024-05-01")),
        actual_start: Some(String::from("2024-05-02")),
        actual_end: Some(String::from("2024-05-02")),
        ..ProgressStepInput::default()
    };
    let err: DomainError = input.validate().unwrap_err();
    assert_eq!(fields(&err.field_errors()), vec!["plannedEnd"]);
}

#[test]
fn test_progress_step_sequence_must_be_positive() {
    let input: ProgressStepInput = ProgressStepInput {
        contract_id: 1,
        sequence: Some(0),
        name: String::from("Ký hợp đồng"),
        ..ProgressStepInput::default()
    };
    let err: DomainError = input.validate().unwrap_err();
    assert_eq!(fields(&err.field_errors()), vec!["sequence"]);
}

#[test]
fn test_reception_requires_received_date() {
    let input: ReceptionInput = ReceptionInput {
        contract_id: 2,
        ..ReceptionInput::default()
    };
    let err: DomainError = input.validate().unwrap_err();
    assert_eq!(fields(&err.field_errors()), vec!["receivedDate"]);
}

#[test]
fn test_empty_upload_is_rejected() {
    let document: NewDocument = NewDocument {
        contract_id: 1,
        file_name: String::from("invoice.pdf"),
        mime_type: String::from("application/pdf"),
        size: 0,
        content_base64: String::new(),
        note: None,
    };
    let err: DomainError = document.validate().unwrap_err();
    assert_eq!(fields(&err.field_errors()), vec!["file"]);
}

#[test]
fn test_supplier_country_code_and_email() {
    let input: SupplierInput = SupplierInput {
        name: String::from("Siemens AG"),
        country_code: Some(String::from("DEU")),
        email: Some(String::from("sales.siemens.de")),
        ..SupplierInput::default()
    };
    let err: DomainError = input.validate().unwrap_err();
    assert_eq!(fields(&err.field_errors()), vec!["countryCode", "email"]);

    let ok: SupplierInput = SupplierInput {
        name: String::from("Siemens AG"),
        country_code: Some(String::from("de")),
        email: Some(String::from("sales@siemens.de")),
        ..SupplierInput::default()
    };
    assert!(ok.validate().is_ok());
}

#[test]
fn test_validation_error_message_lists_fields() {
    let err: DomainError = DomainError::Validation(vec![
        FieldError::new("name", "is required"),
        FieldError::new("value", "must be a non-negative number, got -1"),
    ]);
    assert_eq!(
        err.to_string(),
        "Validation failed: name: is required; value: must be a non-negative number, got -1"
    );
}
