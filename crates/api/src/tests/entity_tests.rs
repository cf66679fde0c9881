// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hopdong_domain::{
    Contract, ContractInput, Equipment, EquipmentInput, FieldError, Payment, PaymentInput,
};
use hopdong_persistence::Persistence;

use super::helpers::{
    create_test_contract, create_test_contract_input, create_test_payment_input,
    create_test_persistence,
};
use crate::{
    ApiError, create_entity, delete_entity, get_entity, list_contract_entities, list_entities,
    update_entity,
};

fn field_names(err: &ApiError) -> Vec<&str> {
    match err {
        ApiError::Validation { fields } => fields.iter().map(|f| f.field.as_str()).collect(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_create_returns_stored_record() {
    let mut persistence: Persistence = create_test_persistence();

    let contract: Contract = create_test_contract(&mut persistence, "Máy chụp MRI");

    assert!(contract.id > 0);
    assert_eq!(get_entity::<Contract>(&mut persistence, contract.id).unwrap(), contract);
    assert_eq!(list_entities::<Contract>(&mut persistence).unwrap().len(), 1);
}

#[test]
fn test_validation_reports_every_rejected_field() {
    let mut persistence: Persistence = create_test_persistence();
    let input: ContractInput = ContractInput {
        name: String::from("   "),
        sign_date: Some(String::from("2026-13-40")),
        value: Some(-1.0),
        contract_status_id: Some(9),
        ..ContractInput::default()
    };

    let err: ApiError = create_entity::<Contract>(&mut persistence, &input).unwrap_err();

    let fields: Vec<&str> = field_names(&err);
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"signDate"));
    assert!(fields.contains(&"value"));
    assert!(fields.contains(&"contractStatusId"));
    assert!(list_entities::<Contract>(&mut persistence).unwrap().is_empty());
}

#[test]
fn test_child_without_contract_id_is_a_field_error() {
    let mut persistence: Persistence = create_test_persistence();

    let err: ApiError =
        create_entity::<Payment>(&mut persistence, &PaymentInput::default()).unwrap_err();

    assert_eq!(
        err,
        ApiError::Validation {
            fields: vec![FieldError::new("contractId", "is required")],
        }
    );
}

#[test]
fn test_child_of_missing_contract_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    let err: ApiError = create_entity::<Payment>(
        &mut persistence,
        &create_test_payment_input(404, "Chưa thanh toán"),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_update_is_full_replacement() {
    let mut persistence: Persistence = create_test_persistence();
    let contract: Contract = create_test_contract(&mut persistence, "Ban đầu");

    let updated: Contract = update_entity::<Contract>(
        &mut persistence,
        contract.id,
        &ContractInput {
            name: String::from("Đã sửa"),
            ..ContractInput::default()
        },
    )
    .unwrap();

    assert_eq!(updated.name, "Đã sửa");
    assert_eq!(updated.value, None);
    assert_eq!(updated.currency_id, None);
}

#[test]
fn test_update_and_delete_missing_record_are_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    assert!(matches!(
        update_entity::<Contract>(&mut persistence, 5, &create_test_contract_input("X")),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        delete_entity::<Equipment>(&mut persistence, 5),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        get_entity::<Equipment>(&mut persistence, 5),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_moving_child_to_missing_contract_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let contract: Contract = create_test_contract(&mut persistence, "Gốc");
    let equipment: Equipment = create_entity::<Equipment>(
        &mut persistence,
        &EquipmentInput {
            contract_id: contract.id,
            name: String::from("Máy thở"),
            ..EquipmentInput::default()
        },
    )
    .unwrap();

    let err: ApiError = update_entity::<Equipment>(
        &mut persistence,
        equipment.id,
        &EquipmentInput {
            contract_id: 999,
            name: String::from("Máy thở"),
            ..EquipmentInput::default()
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
    assert_eq!(
        get_entity::<Equipment>(&mut persistence, equipment.id)
            .unwrap()
            .contract_id,
        contract.id
    );
}

#[test]
fn test_contract_scoped_listing_requires_existing_contract() {
    let mut persistence: Persistence = create_test_persistence();
    let contract: Contract = create_test_contract(&mut persistence, "Có thanh toán");
    create_entity::<Payment>(
        &mut persistence,
        &create_test_payment_input(contract.id, "Đã thanh toán"),
    )
    .unwrap();

    let payments: Vec<Payment> =
        list_contract_entities::<Payment>(&mut persistence, contract.id).unwrap();
    assert_eq!(payments.len(), 1);

    assert!(matches!(
        list_contract_entities::<Payment>(&mut persistence, contract.id + 1),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_json_payload_with_numeric_strings_is_accepted() {
    let mut persistence: Persistence = create_test_persistence();
    let contract: Contract = create_test_contract(&mut persistence, "JSON");

    let input: PaymentInput = serde_json::from_value(serde_json::json!({
        "contractId": contract.id.to_string(),
        "amount": "1500.5",
        "currencyId": "",
        "status": "Chưa thanh toán"
    }))
    .unwrap();
    let payment: Payment = create_entity::<Payment>(&mut persistence, &input).unwrap();

    assert_eq!(payment.contract_id, contract.id);
    assert_eq!(payment.amount, Some(1500.5));
    assert_eq!(payment.currency_id, None);
}
