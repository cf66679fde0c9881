// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;
use time::macros::format_description;

use crate::error::{DomainError, FieldError};

/// Schema-style validation of an input payload.
///
/// Implementors list every problem they find; `validate` folds them into a
/// single `DomainError::Validation` so callers can report all fields at once.
pub trait Validate {
    /// Returns every field-level problem with the payload.
    fn field_errors(&self) -> Vec<FieldError>;

    /// Validates the payload.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` listing every rejected field.
    fn validate(&self) -> Result<(), DomainError> {
        let errors: Vec<FieldError> = self.field_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }
}

/// Parses an ISO `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns the parser's message if the text is not a calendar date.
pub fn parse_date(text: &str) -> Result<Date, String> {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("'{text}' is not a valid YYYY-MM-DD date: {e}"))
}

/// Accumulates field errors for one payload.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Records an arbitrary error.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Rule: the text must not be blank.
    pub fn require_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "is required");
        }
    }

    /// Rule: a referenced id must be a positive surrogate key.
    pub fn require_id(&mut self, field: &str, value: i64) {
        if value <= 0 {
            self.push(field, "is required");
        }
    }

    /// Rule: an optional id, when present, must be positive.
    pub fn check_id(&mut self, field: &str, value: Option<i64>) {
        if let Some(id) = value
            && id <= 0
        {
            self.push(field, format!("must be a positive id, got {id}"));
        }
    }

    /// Rule: an optional date, when present, must be `YYYY-MM-DD`.
    ///
    /// Returns the parsed date so callers can compare ranges.
    pub fn check_date(&mut self, field: &str, value: Option<&str>) -> Option<Date> {
        let text: &str = value?;
        match parse_date(text) {
            Ok(date) => Some(date),
            Err(message) => {
                self.push(field, message);
                None
            }
        }
    }

    /// Rule: an end date must not precede its start date.
    pub fn check_range(&mut self, field: &str, start: Option<Date>, end: Option<Date>) {
        if let (Some(start), Some(end)) = (start, end)
            && end < start
        {
            self.push(field, format!("must not be before {start}"));
        }
    }

    /// Rule: an optional amount must be finite and non-negative.
    pub fn check_amount(&mut self, field: &str, value: Option<f64>) {
        if let Some(amount) = value
            && (!amount.is_finite() || amount < 0.0)
        {
            self.push(field, format!("must be a non-negative number, got {amount}"));
        }
    }

    /// Rule: an optional amount must be finite and strictly positive.
    pub fn check_positive(&mut self, field: &str, value: Option<f64>) {
        if let Some(amount) = value
            && (!amount.is_finite() || amount <= 0.0)
        {
            self.push(field, format!("must be greater than zero, got {amount}"));
        }
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<FieldError> {
        self.errors
    }
}
