// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Progress steps and goods receptions.
//!
//! Recording a reception also appends a completed progress step to the
//! same contract. Both rows are written on the caller's connection, so the
//! pair commits or rolls back together when the caller holds a transaction.

use diesel::SqliteConnection;
use diesel::dsl::max;
use diesel::prelude::*;
use hopdong_domain::{
    ProgressStatus, ProgressStep, ProgressStepInput, RECEPTION_STEP_NAME, Reception,
    ReceptionInput,
};
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{buoc_thuc_hien, tiep_nhan};
use crate::entity::{Entity, contract_owned, table_ops};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = buoc_thuc_hien)]
struct StepRow {
    id: i64,
    hop_dong_id: i64,
    thu_tu: i64,
    ten: String,
    ngay_bat_dau_ke_hoach: Option<String>,
    ngay_ket_thuc_ke_hoach: Option<String>,
    ngay_bat_dau_thuc_te: Option<String>,
    ngay_ket_thuc_thuc_te: Option<String>,
    trang_thai: Option<String>,
    can_bo_id: Option<i64>,
    ghi_chu: Option<String>,
}

impl From<StepRow> for ProgressStep {
    fn from(row: StepRow) -> Self {
        Self {
            id: row.id,
            contract_id: row.hop_dong_id,
            sequence: row.thu_tu,
            name: row.ten,
            planned_start: row.ngay_bat_dau_ke_hoach,
            planned_end: row.ngay_ket_thuc_ke_hoach,
            actual_start: row.ngay_bat_dau_thuc_te,
            actual_end: row.ngay_ket_thuc_thuc_te,
            status: row.trang_thai,
            staff_id: row.can_bo_id,
            note: row.ghi_chu,
        }
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = buoc_thuc_hien, treat_none_as_null = true)]
struct StepChanges<'a> {
    hop_dong_id: i64,
    thu_tu: i64,
    ten: &'a str,
    ngay_bat_dau_ke_hoach: Option<&'a str>,
    ngay_ket_thuc_ke_hoach: Option<&'a str>,
    ngay_bat_dau_thuc_te: Option<&'a str>,
    ngay_ket_thuc_thuc_te: Option<&'a str>,
    trang_thai: Option<&'a str>,
    can_bo_id: Option<i64>,
    ghi_chu: Option<&'a str>,
}

fn step_changes(input: &ProgressStepInput, sequence: i64) -> StepChanges<'_> {
    StepChanges {
        hop_dong_id: input.contract_id,
        thu_tu: sequence,
        ten: input.name.trim(),
        ngay_bat_dau_ke_hoach: input.planned_start.as_deref(),
        ngay_ket_thuc_ke_hoach: input.planned_end.as_deref(),
        ngay_bat_dau_thuc_te: input.actual_start.as_deref(),
        ngay_ket_thuc_thuc_te: input.actual_end.as_deref(),
        trang_thai: input.status.as_deref(),
        can_bo_id: input.staff_id,
        ghi_chu: input.note.as_deref(),
    }
}

/// The sequence number a new step of this contract would get.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn next_sequence(
    conn: &mut SqliteConnection,
    contract_id: i64,
) -> Result<i64, PersistenceError> {
    let current: Option<i64> = buoc_thuc_hien::table
        .filter(buoc_thuc_hien::hop_dong_id.eq(contract_id))
        .select(max(buoc_thuc_hien::thu_tu))
        .first(conn)?;
    Ok(current.unwrap_or(0) + 1)
}

impl Entity for ProgressStep {
    type Input = ProgressStepInput;
    const LABEL: &'static str = "Progress step";

    table_ops!(
        read: buoc_thuc_hien,
        StepRow,
        order: (
            buoc_thuc_hien::hop_dong_id,
            buoc_thuc_hien::thu_tu,
            buoc_thuc_hien::id
        )
    );
    table_ops!(delete: buoc_thuc_hien);

    /// Appends the step after the contract's last one unless a sequence is given.
    fn insert_row(
        conn: &mut SqliteConnection,
        input: &ProgressStepInput,
    ) -> Result<i64, PersistenceError> {
        let sequence: i64 = match input.sequence {
            Some(sequence) => sequence,
            None => next_sequence(conn, input.contract_id)?,
        };
        diesel::insert_into(buoc_thuc_hien::table)
            .values(step_changes(input, sequence))
            .execute(conn)?;
        get_last_insert_rowid(conn)
    }

    /// Keeps the stored sequence when the input leaves it out.
    fn update_row(
        conn: &mut SqliteConnection,
        id: i64,
        input: &ProgressStepInput,
    ) -> Result<usize, PersistenceError> {
        let sequence: i64 = match input.sequence {
            Some(sequence) => sequence,
            None => {
                let stored: Option<i64> = buoc_thuc_hien::table
                    .find(id)
                    .select(buoc_thuc_hien::thu_tu)
                    .first(conn)
                    .optional()?;
                let Some(stored) = stored else {
                    return Ok(0);
                };
                stored
            }
        };
        Ok(diesel::update(buoc_thuc_hien::table.find(id))
            .set(step_changes(input, sequence))
            .execute(conn)?)
    }
}

contract_owned!(
    ProgressStep,
    buoc_thuc_hien,
    StepRow,
    order: (buoc_thuc_hien::thu_tu, buoc_thuc_hien::id)
);

#[derive(Queryable, Selectable)]
#[diesel(table_name = tiep_nhan)]
struct ReceptionRow {
    id: i64,
    hop_dong_id: i64,
    ngay_tiep_nhan: String,
    dia_diem_thong_quan_id: Option<i64>,
    so_to_khai: Option<String>,
    ghi_chu: Option<String>,
}

impl From<ReceptionRow> for Reception {
    fn from(row: ReceptionRow) -> Self {
        Self {
            id: row.id,
            contract_id: row.hop_dong_id,
            received_date: row.ngay_tiep_nhan,
            customs_location_id: row.dia_diem_thong_quan_id,
            declaration_number: row.so_to_khai,
            note: row.ghi_chu,
        }
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = tiep_nhan, treat_none_as_null = true)]
struct ReceptionChanges<'a> {
    hop_dong_id: i64,
    ngay_tiep_nhan: &'a str,
    dia_diem_thong_quan_id: Option<i64>,
    so_to_khai: Option<&'a str>,
    ghi_chu: Option<&'a str>,
}

fn reception_changes(input: &ReceptionInput) -> ReceptionChanges<'_> {
    ReceptionChanges {
        hop_dong_id: input.contract_id,
        ngay_tiep_nhan: input.received_date.trim(),
        dia_diem_thong_quan_id: input.customs_location_id,
        so_to_khai: input.declaration_number.as_deref(),
        ghi_chu: input.note.as_deref(),
    }
}

impl Entity for Reception {
    type Input = ReceptionInput;
    const LABEL: &'static str = "Reception";

    table_ops!(
        read: tiep_nhan,
        ReceptionRow,
        order: (tiep_nhan::ngay_tiep_nhan, tiep_nhan::id)
    );
    table_ops!(delete: tiep_nhan);

    /// Inserts the reception and its completed "goods received" step.
    fn insert_row(
        conn: &mut SqliteConnection,
        input: &ReceptionInput,
    ) -> Result<i64, PersistenceError> {
        diesel::insert_into(tiep_nhan::table)
            .values(reception_changes(input))
            .execute(conn)?;
        let reception_id: i64 = get_last_insert_rowid(conn)?;

        let received: &str = input.received_date.trim();
        let step: ProgressStepInput = ProgressStepInput {
            contract_id: input.contract_id,
            sequence: None,
            name: String::from(RECEPTION_STEP_NAME),
            planned_start: None,
            planned_end: None,
            actual_start: Some(String::from(received)),
            actual_end: Some(String::from(received)),
            status: Some(String::from(ProgressStatus::Completed.label())),
            staff_id: None,
            note: input.declaration_number.clone(),
        };
        let step_id: i64 = ProgressStep::insert_row(conn, &step)?;
        debug!(
            reception_id,
            step_id,
            contract_id = input.contract_id,
            "Recorded reception step"
        );
        Ok(reception_id)
    }

    /// Updates the reception only; the step written at insert time is left alone.
    fn update_row(
        conn: &mut SqliteConnection,
        id: i64,
        input: &ReceptionInput,
    ) -> Result<usize, PersistenceError> {
        Ok(diesel::update(tiep_nhan::table.find(id))
            .set(reception_changes(input))
            .execute(conn)?)
    }
}

contract_owned!(
    Reception,
    tiep_nhan,
    ReceptionRow,
    order: (tiep_nhan::ngay_tiep_nhan, tiep_nhan::id)
);
