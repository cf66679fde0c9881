// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mapping of API errors onto HTTP responses.

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hopdong_api::ApiError;
use hopdong_domain::FieldError;
use hopdong_persistence::ContractChildCounts;
use serde::Serialize;
use tracing::{error, warn};

/// Error response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Machine-readable error kind.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Rejected fields, for validation failures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
    /// Records still attached, for a refused contract delete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<ContractChildCounts>,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response body.
    pub body: ErrorResponse,
}

impl HttpError {
    fn new(status: StatusCode, kind: &str, message: String) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: String::from(kind),
                message,
                fields: Vec::new(),
                counts: None,
            },
        }
    }

    /// A 400 response for a request the server could not read.
    #[must_use]
    pub fn bad_request(message: String) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    /// A 401 response.
    #[must_use]
    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "authentication_failed", message)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Validation { ref fields } => {
                let fields: Vec<FieldError> = fields.clone();
                let mut http: Self =
                    Self::new(StatusCode::BAD_REQUEST, "validation_failed", err.to_string());
                http.body.fields = fields;
                http
            }
            ApiError::DomainRuleViolation { ref rule, .. } => {
                let rule: String = rule.clone();
                Self::new(StatusCode::BAD_REQUEST, &rule, err.to_string())
            }
            ApiError::ResourceNotFound { ref message, .. } => {
                Self::new(StatusCode::NOT_FOUND, "not_found", message.clone())
            }
            ApiError::ContractHasRecords { counts, .. } => {
                let mut http: Self =
                    Self::new(StatusCode::CONFLICT, "contract_has_records", err.to_string());
                http.body.counts = Some(counts);
                http
            }
            ApiError::Conflict { message } => Self::new(StatusCode::CONFLICT, "conflict", message),
            ApiError::AuthenticationFailed { reason } => Self::unauthorized(reason),
            ApiError::PayloadTooLarge { .. } => {
                Self::new(StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", err.to_string())
            }
            ApiError::Internal { message } => {
                error!(error = %message, "Internal error while handling request");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    String::from("Internal server error"),
                )
            }
        }
    }
}

impl From<MultipartError> for HttpError {
    fn from(err: MultipartError) -> Self {
        let status: StatusCode = err.status();
        warn!(%status, error = %err.body_text(), "Rejected multipart upload");
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            Self::new(status, "payload_too_large", err.body_text())
        } else {
            Self::bad_request(err.body_text())
        }
    }
}
