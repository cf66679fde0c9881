// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::backend::sqlite::{revert_all_migrations, run_migrations};
use crate::{Persistence, PersistenceError};
use hopdong_domain::{Contract, LookupKind, LookupRow};

use super::seed_contract;

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = Persistence::new_in_memory().unwrap();
    let mut db2: Persistence = Persistence::new_in_memory().unwrap();

    seed_contract(&mut db1, "Only in db1");

    assert_eq!(db1.list::<Contract>().unwrap().len(), 1);
    assert!(db2.list::<Contract>().unwrap().is_empty());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_file_database_is_created_and_reopened() {
    let path: std::path::PathBuf = std::env::temp_dir().join(format!(
        "hopdong_init_test_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        seed_contract(&mut persistence, "Persisted");
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    let contracts: Vec<Contract> = reopened.list::<Contract>().unwrap();
    assert_eq!(contracts.len(), 1);
    assert_eq!(contracts[0].name, "Persisted");

    drop(reopened);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}

#[test]
fn test_migration_round_trip_restores_seed_data() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    revert_all_migrations(&mut persistence.conn).unwrap();
    assert!(persistence.list_lookup(LookupKind::ContractStatus).is_err());

    run_migrations(&mut persistence.conn).unwrap();
    let statuses: Vec<LookupRow> = persistence.list_lookup(LookupKind::ContractStatus).unwrap();
    assert_eq!(statuses.len(), 3);
}
