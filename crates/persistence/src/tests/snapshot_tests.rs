// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DashboardSnapshot, Persistence};
use hopdong::{OverviewStats, ReferenceTables, compute_overview_stats};
use hopdong_domain::{Contract, ContractInput, LookupKind, Payment, Supplier};

use super::{
    create_test_contract_input, create_test_payment_input, create_test_supplier_input,
    seed_contract,
};

#[test]
fn test_snapshot_feeds_overview_stats() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let active: Contract = seed_contract(&mut persistence, "Active");
    persistence
        .insert::<Contract>(&ContractInput {
            contract_status_id: Some(2),
            value: Some(500_000.0),
            ..create_test_contract_input("Done")
        })
        .unwrap();
    persistence
        .insert::<Payment>(&create_test_payment_input(active.id, 10.0))
        .unwrap();

    let snapshot: DashboardSnapshot = persistence.dashboard_snapshot().unwrap();
    assert_eq!(snapshot.contracts.len(), 2);
    assert_eq!(snapshot.payments.len(), 1);
    assert!(!snapshot.contract_types.is_empty());

    let stats: OverviewStats = compute_overview_stats(
        &snapshot.contracts,
        &snapshot.payments,
        &snapshot.equipment,
        &snapshot.documents,
        &snapshot.progress_steps,
    );
    assert_eq!(stats.total_contracts, 2);
    assert_eq!(stats.active_contracts, 1);
    assert_eq!(stats.completed_contracts, 1);
    assert_eq!(stats.pending_payments, 1);
    assert!((stats.total_value - 2_000_000.0).abs() < f64::EPSILON);
}

#[test]
fn test_reference_tables_hold_every_lookup_and_party() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let supplier: Supplier = persistence
        .insert::<Supplier>(&create_test_supplier_input("Philips", "Amsterdam"))
        .unwrap();

    let tables: ReferenceTables = persistence.reference_tables().unwrap();

    assert_eq!(tables.suppliers, vec![supplier]);
    for kind in LookupKind::ALL {
        assert_eq!(
            tables.lookup(kind),
            persistence.list_lookup(kind).unwrap().as_slice()
        );
    }
}
