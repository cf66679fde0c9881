// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Persistence, PersistenceError};
use hopdong_domain::{
    Contract, ContractInput, Equipment, FundDisbursement, FundDisbursementInput, Investor,
    InvestorInput, Payment, Staff, StaffInput, Supplier,
};

use super::{
    create_test_contract_input, create_test_equipment_input, create_test_payment_input,
    create_test_supplier_input, seed_contract,
};

#[test]
fn test_insert_returns_stored_contract() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let contract: Contract = seed_contract(&mut persistence, "  Máy siêu âm  ");

    assert!(contract.id > 0);
    assert_eq!(contract.name, "Máy siêu âm");
    assert_eq!(contract.contract_status_id, Some(1));
    assert_eq!(contract.sign_date.as_deref(), Some("2026-01-15"));
    assert_eq!(persistence.get::<Contract>(contract.id).unwrap(), contract);
}

#[test]
fn test_update_replaces_every_column() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let contract: Contract = seed_contract(&mut persistence, "Original");

    let replacement: ContractInput = ContractInput {
        name: String::from("Renamed"),
        ..ContractInput::default()
    };
    let updated: Contract = persistence
        .update::<Contract>(contract.id, &replacement)
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.internal_number, None);
    assert_eq!(updated.value, None);
    assert_eq!(updated.contract_status_id, None);
}

#[test]
fn test_update_missing_record_is_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result: Result<Contract, PersistenceError> =
        persistence.update::<Contract>(999, &create_test_contract_input("Ghost"));

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_get_and_delete_missing_record_are_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    assert!(matches!(
        persistence.get::<Supplier>(42),
        Err(PersistenceError::NotFound(_))
    ));
    assert!(persistence.find::<Supplier>(42).unwrap().is_none());
    assert!(matches!(
        persistence.delete::<Supplier>(42),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_supplier_country_code_is_uppercased() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let supplier: Supplier = persistence
        .insert::<Supplier>(&create_test_supplier_input("Siemens", "Munich, Germany"))
        .unwrap();

    assert_eq!(supplier.country_code.as_deref(), Some("DE"));
}

#[test]
fn test_parties_round_trip_through_store() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let investor: Investor = persistence
        .insert::<Investor>(&InvestorInput {
            name: String::from("Bệnh viện Bạch Mai"),
            phone: Some(String::from("024 3869 3731")),
            ..InvestorInput::default()
        })
        .unwrap();
    let staff: Staff = persistence
        .insert::<Staff>(&StaffInput {
            name: String::from("Nguyễn Văn A"),
            position: Some(String::from("Chuyên viên")),
            ..StaffInput::default()
        })
        .unwrap();

    assert_eq!(persistence.list::<Investor>().unwrap(), vec![investor]);
    assert_eq!(persistence.list::<Staff>().unwrap(), vec![staff]);
}

#[test]
fn test_deleting_party_leaves_contract_reference_dangling() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let supplier: Supplier = persistence
        .insert::<Supplier>(&create_test_supplier_input("Acme", "Berlin, Germany"))
        .unwrap();
    let contract: Contract = persistence
        .insert::<Contract>(&ContractInput {
            supplier_id: Some(supplier.id),
            ..create_test_contract_input("Supplied")
        })
        .unwrap();

    persistence.delete::<Supplier>(supplier.id).unwrap();

    let reloaded: Contract = persistence.get::<Contract>(contract.id).unwrap();
    assert_eq!(reloaded.supplier_id, Some(supplier.id));
}

#[test]
fn test_child_record_for_missing_contract_is_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result: Result<Payment, PersistenceError> =
        persistence.insert::<Payment>(&create_test_payment_input(777, 10.0));

    assert!(matches!(result, Err(PersistenceError::ForeignKeyViolation(_))));
    assert!(persistence.list::<Payment>().unwrap().is_empty());
}

#[test]
fn test_payment_paid_flag_round_trips() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let contract: Contract = seed_contract(&mut persistence, "Paid contract");

    let mut input = create_test_payment_input(contract.id, 500.0);
    input.paid = true;
    input.paid_date = Some(String::from("2026-03-02"));
    let payment: Payment = persistence.insert::<Payment>(&input).unwrap();

    assert!(payment.paid);
    assert_eq!(payment.paid_date.as_deref(), Some("2026-03-02"));
    assert_eq!(payment.status.as_deref(), Some("Chưa thanh toán"));
}

#[test]
fn test_list_for_contract_filters_by_owner() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let first: Contract = seed_contract(&mut persistence, "First");
    let second: Contract = seed_contract(&mut persistence, "Second");

    persistence
        .insert::<Equipment>(&create_test_equipment_input(first.id, "Máy X-quang"))
        .unwrap();
    persistence
        .insert::<Equipment>(&create_test_equipment_input(second.id, "Máy CT"))
        .unwrap();
    persistence
        .insert::<FundDisbursement>(&FundDisbursementInput {
            contract_id: second.id,
            amount: Some(1000.0),
            ..FundDisbursementInput::default()
        })
        .unwrap();

    let equipment: Vec<Equipment> = persistence.list_for_contract::<Equipment>(first.id).unwrap();
    assert_eq!(equipment.len(), 1);
    assert_eq!(equipment[0].name, "Máy X-quang");
    assert!(
        persistence
            .list_for_contract::<FundDisbursement>(first.id)
            .unwrap()
            .is_empty()
    );
    assert_eq!(persistence.list::<Equipment>().unwrap().len(), 2);
}
