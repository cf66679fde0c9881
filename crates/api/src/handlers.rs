// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for entity CRUD, lookups, contracts and the dashboard.

use hopdong::{
    ChartData, ContractView, OverviewStats, ReferenceTables, StaffView, SupplierView,
    compute_chart_series, compute_overview_stats,
};
use hopdong_domain::{
    Contract, ContractScoped, Document, Equipment, FundDisbursement, LookupInput, LookupKind,
    LookupRow, Payment, ProgressStep, Reception, Staff, Supplier, Validate,
};
use hopdong_persistence::{
    ContractChildCounts, ContractOwned, DashboardSnapshot, Entity, Persistence, PersistenceError,
};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::request_response::{ContractDetail, DeleteContractResponse};

// ============================================================================
// Generic entities
// ============================================================================

/// Lists every record of one entity.
///
/// # Errors
///
/// Returns an error if the records cannot be read.
pub fn list_entities<E: Entity>(persistence: &mut Persistence) -> Result<Vec<E>, ApiError> {
    debug!(entity = E::LABEL, "Listing records");
    Ok(persistence.list::<E>()?)
}

/// Lists the records of one contract.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the contract does not exist.
pub fn list_contract_entities<E: ContractOwned>(
    persistence: &mut Persistence,
    contract_id: i64,
) -> Result<Vec<E>, ApiError> {
    ensure_contract_exists(persistence, contract_id)?;
    Ok(persistence.list_for_contract::<E>(contract_id)?)
}

/// Fetches one record.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the record does not exist.
pub fn get_entity<E: Entity>(persistence: &mut Persistence, id: i64) -> Result<E, ApiError> {
    persistence
        .find::<E>(id)?
        .ok_or_else(|| ApiError::not_found(E::LABEL, id))
}

/// Validates and stores a new record, returning it as stored.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `input` - The create payload
///
/// # Errors
///
/// Returns `ApiError::Validation` listing every rejected field, or
/// `ApiError::ResourceNotFound` if the payload names a missing contract.
pub fn create_entity<E>(persistence: &mut Persistence, input: &E::Input) -> Result<E, ApiError>
where
    E: Entity,
    E::Input: Validate + ContractScoped,
{
    input.validate()?;
    if let Some(contract_id) = input.owning_contract() {
        ensure_contract_exists(persistence, contract_id)?;
    }
    let stored: E = persistence.insert::<E>(input)?;
    info!(entity = E::LABEL, "Created record");
    Ok(stored)
}

/// Validates and replaces a record, returning it as stored.
///
/// Updates are full replacement; the last write wins.
///
/// # Errors
///
/// Returns `ApiError::Validation` listing every rejected field, or
/// `ApiError::ResourceNotFound` if the record or its contract is missing.
pub fn update_entity<E>(
    persistence: &mut Persistence,
    id: i64,
    input: &E::Input,
) -> Result<E, ApiError>
where
    E: Entity,
    E::Input: Validate + ContractScoped,
{
    input.validate()?;
    if let Some(contract_id) = input.owning_contract() {
        ensure_contract_exists(persistence, contract_id)?;
    }
    if persistence.find::<E>(id)?.is_none() {
        return Err(ApiError::not_found(E::LABEL, id));
    }
    Ok(persistence.update::<E>(id, input)?)
}

/// Deletes a record.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the record does not exist, or
/// `ApiError::ContractHasRecords` for a contract that still owns records.
pub fn delete_entity<E: Entity>(persistence: &mut Persistence, id: i64) -> Result<(), ApiError> {
    if persistence.find::<E>(id)?.is_none() {
        return Err(ApiError::not_found(E::LABEL, id));
    }
    persistence.delete::<E>(id)?;
    Ok(())
}

fn ensure_contract_exists(persistence: &mut Persistence, contract_id: i64) -> Result<(), ApiError> {
    if persistence.contract_exists(contract_id)? {
        Ok(())
    } else {
        Err(ApiError::not_found(Contract::LABEL, contract_id))
    }
}

// ============================================================================
// Lookups
// ============================================================================

/// Parses a lookup table slug such as `loai-tien`.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for an unknown slug.
pub fn parse_lookup_kind(slug: &str) -> Result<LookupKind, ApiError> {
    Ok(slug.parse::<LookupKind>()?)
}

/// Lists one lookup table.
///
/// # Errors
///
/// Returns an error if the table cannot be read.
pub fn list_lookup(
    persistence: &mut Persistence,
    kind: LookupKind,
) -> Result<Vec<LookupRow>, ApiError> {
    Ok(persistence.list_lookup(kind)?)
}

/// Fetches one lookup row.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the row does not exist.
pub fn get_lookup(
    persistence: &mut Persistence,
    kind: LookupKind,
    id: i64,
) -> Result<LookupRow, ApiError> {
    persistence.get_lookup(kind, id).map_err(|e| match e {
        PersistenceError::NotFound(_) => ApiError::not_found(kind.slug(), id),
        other => ApiError::from(other),
    })
}

/// Adds a lookup row.
///
/// # Errors
///
/// Returns `ApiError::DomainRuleViolation` for the read-only status table and
/// `ApiError::Validation` for an empty name.
pub fn create_lookup(
    persistence: &mut Persistence,
    kind: LookupKind,
    input: &LookupInput,
) -> Result<LookupRow, ApiError> {
    kind.ensure_editable()?;
    input.validate()?;
    Ok(persistence.insert_lookup(kind, input)?)
}

/// Replaces a lookup row.
///
/// # Errors
///
/// Returns `ApiError::DomainRuleViolation` for the read-only status table,
/// `ApiError::Validation` for an empty name and `ApiError::ResourceNotFound`
/// for a missing row.
pub fn update_lookup(
    persistence: &mut Persistence,
    kind: LookupKind,
    id: i64,
    input: &LookupInput,
) -> Result<LookupRow, ApiError> {
    kind.ensure_editable()?;
    input.validate()?;
    get_lookup(persistence, kind, id)?;
    Ok(persistence.update_lookup(kind, id, input)?)
}

/// Deletes a lookup row. Records that referred to it resolve as undetermined.
///
/// # Errors
///
/// Returns `ApiError::DomainRuleViolation` for the read-only status table and
/// `ApiError::ResourceNotFound` for a missing row.
pub fn delete_lookup(
    persistence: &mut Persistence,
    kind: LookupKind,
    id: i64,
) -> Result<(), ApiError> {
    kind.ensure_editable()?;
    get_lookup(persistence, kind, id)?;
    Ok(persistence.delete_lookup(kind, id)?)
}

// ============================================================================
// Contracts
// ============================================================================

/// Lists every contract with its references resolved to names.
///
/// # Errors
///
/// Returns an error if the contracts or reference tables cannot be read.
pub fn list_contracts(persistence: &mut Persistence) -> Result<Vec<ContractView>, ApiError> {
    let tables: ReferenceTables = persistence.reference_tables()?;
    let contracts: Vec<Contract> = persistence.list::<Contract>()?;
    Ok(contracts
        .iter()
        .map(|contract| tables.contract_view(contract))
        .collect())
}

/// Loads a contract and every record it owns, names resolved.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the contract does not exist.
pub fn get_contract_detail(
    persistence: &mut Persistence,
    contract_id: i64,
) -> Result<ContractDetail, ApiError> {
    let contract: Contract = get_entity::<Contract>(persistence, contract_id)?;
    let tables: ReferenceTables = persistence.reference_tables()?;

    let payments: Vec<Payment> = persistence.list_for_contract::<Payment>(contract_id)?;
    let equipment: Vec<Equipment> = persistence.list_for_contract::<Equipment>(contract_id)?;
    let steps: Vec<ProgressStep> = persistence.list_for_contract::<ProgressStep>(contract_id)?;
    let documents: Vec<Document> = persistence.list_for_contract::<Document>(contract_id)?;
    let receptions: Vec<Reception> = persistence.list_for_contract::<Reception>(contract_id)?;
    let disbursements: Vec<FundDisbursement> =
        persistence.list_for_contract::<FundDisbursement>(contract_id)?;

    Ok(ContractDetail {
        contract: tables.contract_view(&contract),
        payments: payments.iter().map(|p| tables.payment_view(p)).collect(),
        equipment: equipment.iter().map(|e| tables.equipment_view(e)).collect(),
        progress_steps: steps.iter().map(|s| tables.progress_step_view(s)).collect(),
        documents,
        receptions: receptions.iter().map(|r| tables.reception_view(r)).collect(),
        disbursements: disbursements
            .iter()
            .map(|d| tables.disbursement_view(d))
            .collect(),
    })
}

/// Deletes a contract.
///
/// Without `cascade` the delete is refused while any record is attached.
/// With `cascade` the contract and its records go in one transaction.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the contract does not exist, or
/// `ApiError::ContractHasRecords` when a plain delete is refused.
pub fn delete_contract(
    persistence: &mut Persistence,
    contract_id: i64,
    cascade: bool,
) -> Result<DeleteContractResponse, ApiError> {
    ensure_contract_exists(persistence, contract_id)?;

    let removed: ContractChildCounts = if cascade {
        persistence.delete_contract_cascade(contract_id)?
    } else {
        persistence.delete::<Contract>(contract_id).inspect_err(|e| {
            warn!(contract_id, error = %e, "Contract delete refused");
        })?;
        ContractChildCounts::default()
    };

    Ok(DeleteContractResponse {
        contract_id,
        removed,
    })
}

// ============================================================================
// Dashboard and directory views
// ============================================================================

/// Computes the headline dashboard figures.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read.
pub fn system_overview(persistence: &mut Persistence) -> Result<OverviewStats, ApiError> {
    let snapshot: DashboardSnapshot = persistence.dashboard_snapshot()?;
    Ok(compute_overview_stats(
        &snapshot.contracts,
        &snapshot.payments,
        &snapshot.equipment,
        &snapshot.documents,
        &snapshot.progress_steps,
    ))
}

/// Computes every dashboard chart series.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read.
pub fn dashboard_charts(persistence: &mut Persistence) -> Result<ChartData, ApiError> {
    let snapshot: DashboardSnapshot = persistence.dashboard_snapshot()?;
    Ok(compute_chart_series(
        &snapshot.contract_types,
        &snapshot.contracts,
        &snapshot.payments,
        &snapshot.progress_steps,
        &snapshot.suppliers,
    ))
}

/// Lists suppliers with their flag and inlined logo.
///
/// # Errors
///
/// Returns an error if the suppliers cannot be read.
pub fn list_supplier_views(persistence: &mut Persistence) -> Result<Vec<SupplierView>, ApiError> {
    let suppliers: Vec<Supplier> = persistence.list::<Supplier>()?;
    Ok(suppliers.iter().map(SupplierView::from).collect())
}

/// Lists staff with their inlined photo.
///
/// # Errors
///
/// Returns an error if the staff cannot be read.
pub fn list_staff_views(persistence: &mut Persistence) -> Result<Vec<StaffView>, ApiError> {
    let staff: Vec<Staff> = persistence.list::<Staff>()?;
    Ok(staff.iter().map(StaffView::from).collect())
}
