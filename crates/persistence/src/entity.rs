// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage traits shared by every table-backed record.

use diesel::SqliteConnection;

use crate::error::PersistenceError;

/// A domain record stored in one table with a surrogate `id` key.
///
/// The methods run on a borrowed connection so callers can compose them
/// inside a transaction; `Persistence` provides the public entry points.
pub trait Entity: Sized {
    /// The create/update payload.
    type Input;

    /// Human-readable name used in logs and not-found messages.
    const LABEL: &'static str;

    /// Loads every row in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn load_all(conn: &mut SqliteConnection) -> Result<Vec<Self>, PersistenceError>;

    /// Loads one row by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn load_one(conn: &mut SqliteConnection, id: i64) -> Result<Option<Self>, PersistenceError>;

    /// Inserts a row and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn insert_row(conn: &mut SqliteConnection, input: &Self::Input)
    -> Result<i64, PersistenceError>;

    /// Replaces every column of a row. Returns the number of rows touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    fn update_row(
        conn: &mut SqliteConnection,
        id: i64,
        input: &Self::Input,
    ) -> Result<usize, PersistenceError>;

    /// Deletes a row. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails or is refused.
    fn delete_row(conn: &mut SqliteConnection, id: i64) -> Result<usize, PersistenceError>;
}

/// A record that belongs to exactly one contract.
pub trait ContractOwned: Entity {
    /// Loads the rows of one contract in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn load_for_contract(
        conn: &mut SqliteConnection,
        contract_id: i64,
    ) -> Result<Vec<Self>, PersistenceError>;

    /// Counts the rows of one contract.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn count_for_contract(
        conn: &mut SqliteConnection,
        contract_id: i64,
    ) -> Result<i64, PersistenceError>;

    /// Deletes every row of one contract.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete_for_contract(
        conn: &mut SqliteConnection,
        contract_id: i64,
    ) -> Result<usize, PersistenceError>;
}

/// Generates the mechanical parts of an `Entity` impl for one table.
///
/// * `read:` emits `load_all` and `load_one` using a `Selectable` row type
///   that converts into the domain record with `From`.
/// * `write:` emits `insert_row` and `update_row` from a function mapping
///   the input to an `Insertable + AsChangeset` value.
/// * `delete:` emits a plain `delete_row`.
macro_rules! table_ops {
    (read: $table:ident, $row:ty) => {
        table_ops!(read: $table, $row, order: $table::id);
    };
    (read: $table:ident, $row:ty, order: $order:expr) => {
        fn load_all(
            conn: &mut diesel::SqliteConnection,
        ) -> Result<Vec<Self>, $crate::error::PersistenceError> {
            let rows: Vec<$row> = $table::table
                .select(<$row>::as_select())
                .order_by($order)
                .load(conn)?;
            Ok(rows.into_iter().map(Self::from).collect())
        }

        fn load_one(
            conn: &mut diesel::SqliteConnection,
            id: i64,
        ) -> Result<Option<Self>, $crate::error::PersistenceError> {
            let row: Option<$row> = $table::table
                .find(id)
                .select(<$row>::as_select())
                .first(conn)
                .optional()?;
            Ok(row.map(Self::from))
        }
    };
    (write: $table:ident, $changes:expr) => {
        fn insert_row(
            conn: &mut diesel::SqliteConnection,
            input: &Self::Input,
        ) -> Result<i64, $crate::error::PersistenceError> {
            diesel::insert_into($table::table)
                .values($changes(input))
                .execute(conn)?;
            $crate::backend::sqlite::get_last_insert_rowid(conn)
        }

        fn update_row(
            conn: &mut diesel::SqliteConnection,
            id: i64,
            input: &Self::Input,
        ) -> Result<usize, $crate::error::PersistenceError> {
            Ok(diesel::update($table::table.find(id))
                .set($changes(input))
                .execute(conn)?)
        }
    };
    (delete: $table:ident) => {
        fn delete_row(
            conn: &mut diesel::SqliteConnection,
            id: i64,
        ) -> Result<usize, $crate::error::PersistenceError> {
            Ok(diesel::delete($table::table.find(id)).execute(conn)?)
        }
    };
}

/// Generates a `ContractOwned` impl for a table with a `hop_dong_id` column.
macro_rules! contract_owned {
    ($entity:ty, $table:ident, $row:ty) => {
        contract_owned!($entity, $table, $row, order: $table::id);
    };
    ($entity:ty, $table:ident, $row:ty, order: $order:expr) => {
        impl $crate::entity::ContractOwned for $entity {
            fn load_for_contract(
                conn: &mut diesel::SqliteConnection,
                contract_id: i64,
            ) -> Result<Vec<Self>, $crate::error::PersistenceError> {
                let rows: Vec<$row> = $table::table
                    .filter($table::hop_dong_id.eq(contract_id))
                    .select(<$row>::as_select())
                    .order_by($order)
                    .load(conn)?;
                Ok(rows.into_iter().map(Self::from).collect())
            }

            fn count_for_contract(
                conn: &mut diesel::SqliteConnection,
                contract_id: i64,
            ) -> Result<i64, $crate::error::PersistenceError> {
                Ok($table::table
                    .filter($table::hop_dong_id.eq(contract_id))
                    .count()
                    .get_result(conn)?)
            }

            fn delete_for_contract(
                conn: &mut diesel::SqliteConnection,
                contract_id: i64,
            ) -> Result<usize, $crate::error::PersistenceError> {
                Ok(
                    diesel::delete($table::table.filter($table::hop_dong_id.eq(contract_id)))
                        .execute(conn)?,
                )
            }
        }
    };
}

pub(crate) use {contract_owned, table_ops};
