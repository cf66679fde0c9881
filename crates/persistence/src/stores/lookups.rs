// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The nine reference tables.
//!
//! Every table has `(id, ten, <secondary>)`; only the secondary column name
//! differs, so each operation is written once and expanded per table.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hopdong_domain::{LookupInput, LookupKind, LookupRow};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::error::PersistenceError;

/// Expands `$body` once per lookup table with `$table` bound to the table
/// module and `$secondary` to its secondary column.
macro_rules! for_lookup_table {
    ($kind:expr, $table:ident, $secondary:ident => $body:block) => {
        match $kind {
            LookupKind::ContractType => {
                for_lookup_table!(@arm loai_hop_dong, mo_ta, $table, $secondary, $body)
            }
            LookupKind::BudgetType => {
                for_lookup_table!(@arm loai_ngan_sach, mo_ta, $table, $secondary, $body)
            }
            LookupKind::Currency => {
                for_lookup_table!(@arm loai_tien, mo_ta, $table, $secondary, $body)
            }
            LookupKind::PaymentMethod => {
                for_lookup_table!(@arm phuong_thuc_thanh_toan, mo_ta, $table, $secondary, $body)
            }
            LookupKind::PaymentType => {
                for_lookup_table!(@arm loai_thanh_toan, mo_ta, $table, $secondary, $body)
            }
            LookupKind::EquipmentType => {
                for_lookup_table!(@arm loai_thiet_bi, mo_ta, $table, $secondary, $body)
            }
            LookupKind::CustomsLocation => {
                for_lookup_table!(@arm dia_diem_thong_quan, chi_cuc, $table, $secondary, $body)
            }
            LookupKind::DeliveryTerms => {
                for_lookup_table!(@arm dieu_kien_giao_hang, mo_ta, $table, $secondary, $body)
            }
            LookupKind::ContractStatus => {
                for_lookup_table!(@arm trang_thai_hop_dong, mo_ta, $table, $secondary, $body)
            }
        }
    };
    (@arm $name:ident, $column:ident, $table:ident, $secondary:ident, $body:block) => {{
        use crate::diesel_schema::$name as $table;
        use crate::diesel_schema::$name::$column as $secondary;
        $body
    }};
}

type RawLookup = (i64, String, Option<String>);

fn into_row((id, name, secondary): RawLookup) -> LookupRow {
    LookupRow {
        id,
        name,
        secondary,
    }
}

/// Loads every row of a lookup table ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list(
    conn: &mut SqliteConnection,
    kind: LookupKind,
) -> Result<Vec<LookupRow>, PersistenceError> {
    let rows: Vec<RawLookup> = for_lookup_table!(kind, t, secondary => {
        t::table
            .select((t::id, t::ten, secondary))
            .order_by(t::id)
            .load(conn)?
    });
    Ok(rows.into_iter().map(into_row).collect())
}

/// Loads one row of a lookup table.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find(
    conn: &mut SqliteConnection,
    kind: LookupKind,
    id: i64,
) -> Result<Option<LookupRow>, PersistenceError> {
    let row: Option<RawLookup> = for_lookup_table!(kind, t, secondary => {
        t::table
            .find(id)
            .select((t::id, t::ten, secondary))
            .first(conn)
            .optional()?
    });
    Ok(row.map(into_row))
}

/// Inserts a row and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert(
    conn: &mut SqliteConnection,
    kind: LookupKind,
    input: &LookupInput,
) -> Result<i64, PersistenceError> {
    let name: &str = input.name.trim();
    let extra: Option<&str> = input.secondary.as_deref();
    for_lookup_table!(kind, t, secondary => {
        diesel::insert_into(t::table)
            .values((t::ten.eq(name), secondary.eq(extra)))
            .execute(conn)?;
    });
    get_last_insert_rowid(conn)
}

/// Replaces a row's name and secondary field.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update(
    conn: &mut SqliteConnection,
    kind: LookupKind,
    id: i64,
    input: &LookupInput,
) -> Result<usize, PersistenceError> {
    let name: &str = input.name.trim();
    let extra: Option<&str> = input.secondary.as_deref();
    let touched: usize = for_lookup_table!(kind, t, secondary => {
        diesel::update(t::table.find(id))
            .set((t::ten.eq(name), secondary.eq(extra)))
            .execute(conn)?
    });
    Ok(touched)
}

/// Deletes a row. References to it elsewhere are left dangling.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete(
    conn: &mut SqliteConnection,
    kind: LookupKind,
    id: i64,
) -> Result<usize, PersistenceError> {
    let removed: usize = for_lookup_table!(kind, t, secondary => {
        let _ = secondary;
        diesel::delete(t::table.find(id)).execute(conn)?
    });
    Ok(removed)
}
