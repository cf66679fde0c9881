// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contracts and the delete policy for their records.

use diesel::prelude::*;
use diesel::SqliteConnection;
use hopdong_domain::{
    Contract, ContractInput, Document, Equipment, FundDisbursement, Payment, ProgressStep,
    Reception,
};
use tracing::{info, warn};

use crate::diesel_schema::hop_dong;
use crate::entity::{ContractOwned, Entity, table_ops};
use crate::error::{ContractChildCounts, PersistenceError};

#[derive(Queryable, Selectable)]
#[diesel(table_name = hop_dong)]
struct ContractRow {
    id: i64,
    ten: String,
    so_noi_bo: Option<String>,
    so_ngoai: Option<String>,
    ngay_ky: Option<String>,
    gia_tri: Option<f64>,
    loai_tien_id: Option<i64>,
    ty_gia: Option<f64>,
    loai_hop_dong_id: Option<i64>,
    chu_dau_tu_id: Option<i64>,
    nha_cung_cap_id: Option<i64>,
    loai_ngan_sach_id: Option<i64>,
    can_bo_id: Option<i64>,
    trang_thai_hop_dong_id: Option<i64>,
    dieu_kien_giao_hang_id: Option<i64>,
    dia_diem_thong_quan_id: Option<i64>,
    ghi_chu: Option<String>,
}

impl From<ContractRow> for Contract {
    fn from(row: ContractRow) -> Self {
        Self {
            id: row.id,
            name: row.ten,
            internal_number: row.so_noi_bo,
            external_number: row.so_ngoai,
            sign_date: row.ngay_ky,
            value: row.gia_tri,
            currency_id: row.loai_tien_id,
            exchange_rate: row.ty_gia,
            contract_type_id: row.loai_hop_dong_id,
            investor_id: row.chu_dau_tu_id,
            supplier_id: row.nha_cung_cap_id,
            budget_type_id: row.loai_ngan_sach_id,
            staff_id: row.can_bo_id,
            contract_status_id: row.trang_thai_hop_dong_id,
            delivery_terms_id: row.dieu_kien_giao_hang_id,
            customs_location_id: row.dia_diem_thong_quan_id,
            note: row.ghi_chu,
        }
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = hop_dong, treat_none_as_null = true)]
struct ContractChanges<'a> {
    ten: &'a str,
    so_noi_bo: Option<&'a str>,
    so_ngoai: Option<&'a str>,
    ngay_ky: Option<&'a str>,
    gia_tri: Option<f64>,
    loai_tien_id: Option<i64>,
    ty_gia: Option<f64>,
    loai_hop_dong_id: Option<i64>,
    chu_dau_tu_id: Option<i64>,
    nha_cung_cap_id: Option<i64>,
    loai_ngan_sach_id: Option<i64>,
    can_bo_id: Option<i64>,
    trang_thai_hop_dong_id: Option<i64>,
    dieu_kien_giao_hang_id: Option<i64>,
    dia_diem_thong_quan_id: Option<i64>,
    ghi_chu: Option<&'a str>,
}

fn contract_changes(input: &ContractInput) -> ContractChanges<'_> {
    ContractChanges {
        ten: input.name.trim(),
        so_noi_bo: input.internal_number.as_deref(),
        so_ngoai: input.external_number.as_deref(),
        ngay_ky: input.sign_date.as_deref(),
        gia_tri: input.value,
        loai_tien_id: input.currency_id,
        ty_gia: input.exchange_rate,
        loai_hop_dong_id: input.contract_type_id,
        chu_dau_tu_id: input.investor_id,
        nha_cung_cap_id: input.supplier_id,
        loai_ngan_sach_id: input.budget_type_id,
        can_bo_id: input.staff_id,
        trang_thai_hop_dong_id: input.contract_status_id,
        dieu_kien_giao_hang_id: input.delivery_terms_id,
        dia_diem_thong_quan_id: input.customs_location_id,
        ghi_chu: input.note.as_deref(),
    }
}

impl Entity for Contract {
    type Input = ContractInput;
    const LABEL: &'static str = "Contract";

    table_ops!(read: hop_dong, ContractRow);
    table_ops!(write: hop_dong, contract_changes);

    /// Refuses to delete a contract that still has records attached.
    fn delete_row(conn: &mut SqliteConnection, id: i64) -> Result<usize, PersistenceError> {
        let counts: ContractChildCounts = child_counts(conn, id)?;
        if !counts.is_empty() {
            warn!(contract_id = id, %counts, "Refusing to delete contract with records");
            return Err(PersistenceError::ContractHasChildren {
                contract_id: id,
                counts,
            });
        }
        Ok(diesel::delete(hop_dong::table.find(id)).execute(conn)?)
    }
}

/// Whether a contract with this id exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn contract_exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, PersistenceError> {
    let found: Option<i64> = hop_dong::table
        .find(id)
        .select(hop_dong::id)
        .first(conn)
        .optional()?;
    Ok(found.is_some())
}

/// Counts the records attached to a contract, per table.
///
/// # Errors
///
/// Returns an error if any count query fails.
pub fn child_counts(
    conn: &mut SqliteConnection,
    contract_id: i64,
) -> Result<ContractChildCounts, PersistenceError> {
    Ok(ContractChildCounts {
        payments: Payment::count_for_contract(conn, contract_id)?,
        equipment: Equipment::count_for_contract(conn, contract_id)?,
        progress_steps: ProgressStep::count_for_contract(conn, contract_id)?,
        documents: Document::count_for_contract(conn, contract_id)?,
        receptions: Reception::count_for_contract(conn, contract_id)?,
        disbursements: FundDisbursement::count_for_contract(conn, contract_id)?,
    })
}

/// Deletes a contract together with every record attached to it.
///
/// Must run inside a transaction so a failure leaves nothing half-deleted.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the contract does not exist.
pub fn delete_cascade(
    conn: &mut SqliteConnection,
    contract_id: i64,
) -> Result<ContractChildCounts, PersistenceError> {
    if !contract_exists(conn, contract_id)? {
        return Err(PersistenceError::NotFound(format!(
            "{} {contract_id}",
            Contract::LABEL
        )));
    }

    let counts: ContractChildCounts = child_counts(conn, contract_id)?;
    Payment::delete_for_contract(conn, contract_id)?;
    Equipment::delete_for_contract(conn, contract_id)?;
    ProgressStep::delete_for_contract(conn, contract_id)?;
    Document::delete_for_contract(conn, contract_id)?;
    Reception::delete_for_contract(conn, contract_id)?;
    FundDisbursement::delete_for_contract(conn, contract_id)?;
    diesel::delete(hop_dong::table.find(contract_id)).execute(conn)?;

    info!(contract_id, %counts, "Deleted contract and its records");
    Ok(counts)
}
