// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The camelCase name of the field as it appears in request payloads.
    pub field: String,
    /// A human-readable description of the problem.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// One or more input fields failed validation.
    ///
    /// The list is never empty.
    #[error("Validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),
    /// A lookup slug did not name any known lookup table.
    #[error("Unknown lookup table: {0}")]
    UnknownLookupKind(String),
    /// A lookup table is bound to an enum and cannot be edited.
    #[error("Lookup table '{0}' is read-only")]
    ReadOnlyLookup(&'static str),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join("; ")
}

impl DomainError {
    /// Returns the field errors carried by a validation failure.
    ///
    /// Other variants are reported as a single error against the `body` field.
    #[must_use]
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::Validation(errors) => errors.clone(),
            other => vec![FieldError::new("body", other.to_string())],
        }
    }
}
