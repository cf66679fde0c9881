// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON request bodies.
//!
//! Wraps `axum::Json` so a body that cannot be read into the payload type is
//! answered like any other validation failure: 400 with the offending field.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use hopdong_api::ApiError;
use hopdong_domain::FieldError;
use tracing::warn;

use crate::error::HttpError;

/// Field name reported when the failure cannot be pinned to one field.
const BODY_FIELD: &str = "body";

/// A JSON request body whose rejection renders as an `HttpError`.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                let detail: String = std::error::Error::source(&err)
                    .map_or_else(|| err.body_text(), ToString::to_string);
                let field: FieldError = field_error_from_detail(&detail);
                warn!(field = %field.field, reason = %field.message, "Rejected request body");
                Self::from(ApiError::Validation {
                    fields: vec![field],
                })
            }
            JsonRejection::JsonSyntaxError(err) => {
                warn!(error = %err.body_text(), "Rejected malformed JSON body");
                Self::from(ApiError::invalid_field(BODY_FIELD, "is not valid JSON"))
            }
            other => {
                warn!(
                    status = %other.status(),
                    error = %other.body_text(),
                    "Rejected request body"
                );
                Self::bad_request(other.body_text())
            }
        }
    }
}

/// Turns a deserializer message into a field error.
///
/// Messages look like `value: expected a number, got 'abc'` when the failing
/// value has a path, or ``missing field `name` at line 1 column 2`` when a
/// field is absent.
#[must_use]
pub fn field_error_from_detail(detail: &str) -> FieldError {
    let detail: &str = strip_position(detail.trim());

    if let Some(rest) = detail.strip_prefix("missing field `")
        && let Some((name, _)) = rest.split_once('`')
    {
        return FieldError::new(name, "is required");
    }

    match detail.split_once(": ") {
        Some((path, message)) if !path.is_empty() && !path.contains(char::is_whitespace) => {
            FieldError::new(path, message)
        }
        _ => FieldError::new(BODY_FIELD, detail),
    }
}

/// Drops serde_json's trailing ` at line N column M`.
fn strip_position(detail: &str) -> &str {
    match detail.rfind(" at line ") {
        Some(index) if detail[index..].contains(" column ") => &detail[..index],
        _ => detail,
    }
}
