// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Persistence, PersistenceError};
use hopdong_domain::{ContractStatus, LookupInput, LookupKind, LookupRow};

#[test]
fn test_contract_statuses_are_seeded_with_enum_ids() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let rows: Vec<LookupRow> = persistence.list_lookup(LookupKind::ContractStatus).unwrap();

    for status in [
        ContractStatus::Active,
        ContractStatus::Completed,
        ContractStatus::Paused,
    ] {
        let row: &LookupRow = rows.iter().find(|row| row.id == status.id()).unwrap();
        assert_eq!(row.name, status.label());
    }
}

#[test]
fn test_every_lookup_table_is_readable() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    for kind in LookupKind::ALL {
        let rows: Vec<LookupRow> = persistence.list_lookup(kind).unwrap();
        assert!(!rows.is_empty(), "{kind} should be seeded");
    }
}

#[test]
fn test_customs_location_secondary_is_branch() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let row: LookupRow = persistence
        .insert_lookup(
            LookupKind::CustomsLocation,
            &LookupInput {
                name: String::from("Cảng Đà Nẵng"),
                secondary: Some(String::from("Chi cục Hải quan cửa khẩu cảng Đà Nẵng")),
            },
        )
        .unwrap();

    assert_eq!(
        row.secondary.as_deref(),
        Some("Chi cục Hải quan cửa khẩu cảng Đà Nẵng")
    );
    assert_eq!(
        persistence
            .get_lookup(LookupKind::CustomsLocation, row.id)
            .unwrap(),
        row
    );
}

#[test]
fn test_lookup_update_and_delete() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let row: LookupRow = persistence
        .insert_lookup(
            LookupKind::Currency,
            &LookupInput {
                name: String::from("GBP"),
                secondary: None,
            },
        )
        .unwrap();

    let updated: LookupRow = persistence
        .update_lookup(
            LookupKind::Currency,
            row.id,
            &LookupInput {
                name: String::from(" GBP "),
                secondary: Some(String::from("Bảng Anh")),
            },
        )
        .unwrap();
    assert_eq!(updated.name, "GBP");
    assert_eq!(updated.secondary.as_deref(), Some("Bảng Anh"));

    persistence.delete_lookup(LookupKind::Currency, row.id).unwrap();
    assert!(matches!(
        persistence.get_lookup(LookupKind::Currency, row.id),
        Err(PersistenceError::NotFound(_))
    ));
    assert!(matches!(
        persistence.delete_lookup(LookupKind::Currency, row.id),
        Err(PersistenceError::NotFound(_))
    ));
}
