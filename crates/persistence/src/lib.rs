// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for the contract back office.
//!
//! The schema lives in embedded Diesel migrations under `migrations/` and is
//! applied when a `Persistence` is opened. Table and column names are the
//! Vietnamese ones the existing database files use; the Rust side maps them
//! onto the English domain types.
//!
//! ## Referential integrity
//!
//! Only the contract-owned tables (`thanh_toan`, `thiet_bi`, `buoc_thuc_hien`,
//! `file_hop_dong`, `tiep_nhan`, `cap_von`) carry a real foreign key to
//! `hop_dong`. Lookup and party references are plain integers and may dangle;
//! readers resolve them fail-soft.
//!
//! Deleting a contract that still owns records is refused with
//! `PersistenceError::ContractHasChildren`. `delete_contract_cascade` removes
//! the records and the contract in one transaction.
//!
//! ## Transactions
//!
//! Every public write runs in its own transaction, so multi-row writes such as
//! a reception and its progress step commit together.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use diesel::SqliteConnection;
use hopdong::ReferenceTables;
use hopdong_domain::{
    Contract, Document, DocumentUpdate, Equipment, Investor, LookupInput, LookupKind, LookupRow,
    Payment, ProgressStep, Staff, Supplier,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use tracing::{debug, info};

mod accounts;
mod backend;
mod data_models;
mod diesel_schema;
mod entity;
mod error;
mod stores;

#[cfg(test)]
mod tests;

pub use accounts::sqlite_timestamp;
pub use backend::sqlite::{revert_all_migrations, run_migrations};
pub use data_models::{DashboardSnapshot, SessionData, UserData};
pub use entity::{ContractOwned, Entity};
pub use error::{ContractChildCounts, PersistenceError};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Handle on the back-office database.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter over a fresh in-memory database.
    ///
    /// Each call gets its own shared-cache database so tests stay isolated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Opens (creating if needed) a file-backed database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        info!(path = path_str, "Opened database");
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Entities
    // ========================================================================

    /// Lists every record of one entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list<E: Entity>(&mut self) -> Result<Vec<E>, PersistenceError> {
        E::load_all(&mut self.conn)
    }

    /// Lists the records one contract owns.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_for_contract<E: ContractOwned>(
        &mut self,
        contract_id: i64,
    ) -> Result<Vec<E>, PersistenceError> {
        E::load_for_contract(&mut self.conn, contract_id)
    }

    /// Fetches one record, or `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find<E: Entity>(&mut self, id: i64) -> Result<Option<E>, PersistenceError> {
        E::load_one(&mut self.conn, id)
    }

    /// Fetches one record.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if it does not exist.
    pub fn get<E: Entity>(&mut self, id: i64) -> Result<E, PersistenceError> {
        E::load_one(&mut self.conn, id)?.ok_or_else(|| not_found::<E>(id))
    }

    /// Inserts a record and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including foreign key violations
    /// for records that name a missing contract.
    pub fn insert<E: Entity>(&mut self, input: &E::Input) -> Result<E, PersistenceError> {
        self.conn.transaction(|conn| {
            let id: i64 = E::insert_row(conn, input)?;
            info!(entity = E::LABEL, id, "Inserted record");
            E::load_one(conn, id)?.ok_or_else(|| not_found::<E>(id))
        })
    }

    /// Replaces a record and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the record does not exist.
    pub fn update<E: Entity>(&mut self, id: i64, input: &E::Input) -> Result<E, PersistenceError> {
        self.conn.transaction(|conn| {
            if E::update_row(conn, id, input)? == 0 {
                return Err(not_found::<E>(id));
            }
            info!(entity = E::LABEL, id, "Updated record");
            E::load_one(conn, id)?.ok_or_else(|| not_found::<E>(id))
        })
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the record does not exist, or
    /// `PersistenceError::ContractHasChildren` for a contract that still owns
    /// records.
    pub fn delete<E: Entity>(&mut self, id: i64) -> Result<(), PersistenceError> {
        self.conn.transaction(|conn| {
            if E::delete_row(conn, id)? == 0 {
                return Err(not_found::<E>(id));
            }
            info!(entity = E::LABEL, id, "Deleted record");
            Ok(())
        })
    }

    // ========================================================================
    // Contracts
    // ========================================================================

    /// Whether a contract with this id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn contract_exists(&mut self, contract_id: i64) -> Result<bool, PersistenceError> {
        stores::contracts::contract_exists(&mut self.conn, contract_id)
    }

    /// Counts the records attached to a contract.
    ///
    /// # Errors
    ///
    /// Returns an error if a count query fails.
    pub fn contract_child_counts(
        &mut self,
        contract_id: i64,
    ) -> Result<ContractChildCounts, PersistenceError> {
        stores::contracts::child_counts(&mut self.conn, contract_id)
    }

    /// Deletes a contract and everything it owns. Returns what was removed.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the contract does not exist.
    pub fn delete_contract_cascade(
        &mut self,
        contract_id: i64,
    ) -> Result<ContractChildCounts, PersistenceError> {
        self.conn
            .transaction(|conn| stores::contracts::delete_cascade(conn, contract_id))
    }

    /// The sequence number the next progress step of a contract would get.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn next_progress_sequence(&mut self, contract_id: i64) -> Result<i64, PersistenceError> {
        stores::progress::next_sequence(&mut self.conn, contract_id)
    }

    // ========================================================================
    // Documents
    // ========================================================================

    /// Updates an attachment's name, note and owning contract.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the document does not exist.
    pub fn update_document_meta(
        &mut self,
        id: i64,
        update: &DocumentUpdate,
    ) -> Result<Document, PersistenceError> {
        self.conn.transaction(|conn| {
            if stores::documents::update_meta(conn, id, update)? == 0 {
                return Err(not_found::<Document>(id));
            }
            info!(id, "Updated document metadata");
            Document::load_one(conn, id)?.ok_or_else(|| not_found::<Document>(id))
        })
    }

    /// Loads an attachment with its base64 body.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the document does not exist.
    pub fn document_content(&mut self, id: i64) -> Result<(Document, String), PersistenceError> {
        stores::documents::document_content(&mut self.conn, id)?
            .ok_or_else(|| not_found::<Document>(id))
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Lists one lookup table.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_lookup(&mut self, kind: LookupKind) -> Result<Vec<LookupRow>, PersistenceError> {
        debug!(table = kind.slug(), "Listing lookup table");
        stores::lookups::list(&mut self.conn, kind)
    }

    /// Fetches one lookup row.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the row does not exist.
    pub fn get_lookup(&mut self, kind: LookupKind, id: i64) -> Result<LookupRow, PersistenceError> {
        stores::lookups::find(&mut self.conn, kind, id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("{kind} {id}")))
    }

    /// Inserts a lookup row and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_lookup(
        &mut self,
        kind: LookupKind,
        input: &LookupInput,
    ) -> Result<LookupRow, PersistenceError> {
        self.conn.transaction(|conn| {
            let id: i64 = stores::lookups::insert(conn, kind, input)?;
            info!(table = kind.slug(), id, "Inserted lookup row");
            stores::lookups::find(conn, kind, id)?
                .ok_or_else(|| PersistenceError::NotFound(format!("{kind} {id}")))
        })
    }

    /// Replaces a lookup row and returns it.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the row does not exist.
    pub fn update_lookup(
        &mut self,
        kind: LookupKind,
        id: i64,
        input: &LookupInput,
    ) -> Result<LookupRow, PersistenceError> {
        self.conn.transaction(|conn| {
            if stores::lookups::update(conn, kind, id, input)? == 0 {
                return Err(PersistenceError::NotFound(format!("{kind} {id}")));
            }
            info!(table = kind.slug(), id, "Updated lookup row");
            stores::lookups::find(conn, kind, id)?
                .ok_or_else(|| PersistenceError::NotFound(format!("{kind} {id}")))
        })
    }

    /// Deletes a lookup row.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the row does not exist.
    pub fn delete_lookup(&mut self, kind: LookupKind, id: i64) -> Result<(), PersistenceError> {
        if stores::lookups::delete(&mut self.conn, kind, id)? == 0 {
            return Err(PersistenceError::NotFound(format!("{kind} {id}")));
        }
        info!(table = kind.slug(), id, "Deleted lookup row");
        Ok(())
    }

    // ========================================================================
    // Read models
    // ========================================================================

    /// Reads every table the dashboard needs in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    pub fn dashboard_snapshot(&mut self) -> Result<DashboardSnapshot, PersistenceError> {
        self.conn.transaction(|conn| {
            Ok(DashboardSnapshot {
                contracts: Contract::load_all(conn)?,
                payments: Payment::load_all(conn)?,
                equipment: Equipment::load_all(conn)?,
                documents: Document::load_all(conn)?,
                progress_steps: ProgressStep::load_all(conn)?,
                suppliers: Supplier::load_all(conn)?,
                contract_types: stores::lookups::list(conn, LookupKind::ContractType)?,
            })
        })
    }

    /// Reads every lookup and party table for name resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    pub fn reference_tables(&mut self) -> Result<ReferenceTables, PersistenceError> {
        self.conn.transaction(|conn| {
            let mut tables: ReferenceTables = ReferenceTables {
                suppliers: Supplier::load_all(conn)?,
                investors: Investor::load_all(conn)?,
                staff: Staff::load_all(conn)?,
                ..ReferenceTables::default()
            };
            for kind in LookupKind::ALL {
                tables.set_lookup(kind, stores::lookups::list(conn, kind)?);
            }
            Ok(tables)
        })
    }

    // ========================================================================
    // Users & sessions
    // ========================================================================

    /// Creates a user with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` if the login is taken.
    pub fn create_user(
        &mut self,
        login: &str,
        display_name: &str,
        password: &str,
    ) -> Result<i64, PersistenceError> {
        accounts::create_user(&mut self.conn, login, display_name, password)
    }

    /// Looks a user up by login name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_user_by_login(
        &mut self,
        login: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        accounts::find_user_by_login(&mut self.conn, login)
    }

    /// Looks a user up by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_user(&mut self, id: i64) -> Result<Option<UserData>, PersistenceError> {
        accounts::find_user(&mut self.conn, id)
    }

    /// Number of users.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        accounts::count_users(&mut self.conn)
    }

    /// Stamps a user's last login time.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_last_login(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        accounts::update_last_login(&mut self.conn, user_id)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash cannot be parsed.
    pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
        accounts::verify_password(password, password_hash)
    }

    /// Stores a session and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        token: &str,
        user_id: i64,
        expires_at: OffsetDateTime,
    ) -> Result<SessionData, PersistenceError> {
        accounts::create_session(&mut self.conn, token, user_id, expires_at)
    }

    /// Looks up a session that has not expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_live_session(
        &mut self,
        token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        accounts::find_live_session(&mut self.conn, token)
    }

    /// Deletes a session. Returns whether one was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, token: &str) -> Result<bool, PersistenceError> {
        accounts::delete_session(&mut self.conn, token)
    }

    /// Deletes every expired session.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self) -> Result<usize, PersistenceError> {
        accounts::delete_expired_sessions(&mut self.conn)
    }
}

fn not_found<E: Entity>(id: i64) -> PersistenceError {
    PersistenceError::NotFound(format!("{} {id}", E::LABEL))
}
