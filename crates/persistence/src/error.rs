// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::Serialize;

/// Number of records still attached to a contract, per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractChildCounts {
    pub payments: i64,
    pub equipment: i64,
    pub progress_steps: i64,
    pub documents: i64,
    pub receptions: i64,
    pub disbursements: i64,
}

impl ContractChildCounts {
    /// Total number of attached records.
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.payments
            + self.equipment
            + self.progress_steps
            + self.documents
            + self.receptions
            + self.disbursements
    }

    /// Whether nothing is attached.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl std::fmt::Display for ContractChildCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} payments, {} equipment, {} progress steps, {} documents, {} receptions, {} disbursements",
            self.payments,
            self.equipment,
            self.progress_steps,
            self.documents,
            self.receptions,
            self.disbursements
        )
    }
}

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    DatabaseError(String),
    /// Database connection failed.
    #[error("Database connection failed: {0}")]
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),
    /// Initialization error.
    #[error("Initialization error: {0}")]
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    #[error("Foreign key enforcement is not enabled")]
    ForeignKeyEnforcementNotEnabled,
    /// The requested record was not found.
    #[error("Not found: {0}")]
    NotFound(String),
    /// A contract cannot be deleted while records are attached to it.
    #[error("Contract {contract_id} still has {counts}")]
    ContractHasChildren {
        contract_id: i64,
        counts: ContractChildCounts,
    },
    /// A write referenced a row that does not exist.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),
    /// A write collided with a unique constraint.
    #[error("Duplicate value: {0}")]
    UniqueViolation(String),
    /// A general error occurred.
    #[error("{0}")]
    Other(String),
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            Error::NotFound => Self::NotFound(String::from("Record not found")),
            Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ForeignKeyViolation(info.message().to_string())
            }
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.message().to_string())
            }
            other => Self::DatabaseError(other.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}
