// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use hopdong_domain::{DomainError, FieldError};
use hopdong_persistence::{ContractChildCounts, PersistenceError};

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract. Transports map each variant onto their own status codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// One or more request fields were rejected.
    #[error("Validation failed for {} field(s)", fields.len())]
    Validation {
        /// Every rejected field.
        fields: Vec<FieldError>,
    },
    /// A request was well-formed but breaks a rule of the data model.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A contract cannot be deleted while records are attached.
    #[error("Contract {contract_id} still has {counts}")]
    ContractHasRecords {
        /// The contract that was not deleted.
        contract_id: i64,
        /// What is still attached.
        counts: ContractChildCounts,
    },
    /// A write collided with existing data.
    #[error("Conflict: {message}")]
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// Authentication failed or the session is no longer valid.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// An upload exceeded the configured size limit.
    #[error("Payload of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge {
        /// The size of the rejected payload.
        size: usize,
        /// The configured limit.
        limit: usize,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// A single-field validation failure.
    #[must_use]
    pub fn invalid_field(field: &str, message: &str) -> Self {
        Self::Validation {
            fields: vec![FieldError::new(field, message)],
        }
    }

    /// A missing resource identified by numeric id.
    #[must_use]
    pub fn not_found(resource_type: &str, id: i64) -> Self {
        Self::ResourceNotFound {
            resource_type: String::from(resource_type),
            message: format!("{resource_type} with ID {id} does not exist"),
        }
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::Validation(fields) => ApiError::Validation { fields },
        DomainError::UnknownLookupKind(slug) => ApiError::ResourceNotFound {
            resource_type: String::from("Lookup table"),
            message: format!("No lookup table is named '{slug}'"),
        },
        DomainError::ReadOnlyLookup(slug) => ApiError::DomainRuleViolation {
            rule: String::from("read_only_lookup"),
            message: format!("Lookup table '{slug}' is managed by the system"),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::ContractHasChildren {
            contract_id,
            counts,
        } => ApiError::ContractHasRecords {
            contract_id,
            counts,
        },
        PersistenceError::ForeignKeyViolation(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Contract"),
            message,
        },
        PersistenceError::UniqueViolation(message) => ApiError::Conflict { message },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}
