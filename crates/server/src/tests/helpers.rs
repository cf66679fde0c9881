// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Helpers for driving the router in tests.

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
};
use hopdong_persistence::Persistence;
use serde_json::Value;
use tower::ServiceExt;

use crate::{AppState, build_router};

pub const TEST_UPLOAD_LIMIT: usize = 1024;
pub const BOUNDARY: &str = "hopdong-test-boundary";

/// Creates a router over a fresh in-memory database.
pub fn create_test_app() -> Router {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    build_router(AppState::new(persistence, TEST_UPLOAD_LIMIT, 8))
}

/// Sends a request and returns the status, headers and raw body.
pub async fn send_raw(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let headers: HeaderMap = response.headers().clone();
    let body: Bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body)
}

/// Sends a JSON request and parses the JSON reply. An empty reply reads as `Null`.
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request: Request<Body> = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let (status, _, bytes) = send_raw(app, request).await;
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Sends a request with a bearer token.
pub async fn send_with_token(
    app: &Router,
    method: &str,
    uri: &str,
    token: &str,
) -> (StatusCode, Value) {
    let request: Request<Body> = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, _, bytes) = send_raw(app, request).await;
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Creates a contract through the API and returns its id.
pub async fn create_contract(app: &Router, name: &str) -> i64 {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/hop-dong",
        Some(serde_json::json!({
            "name": name,
            "value": "2500",
            "currencyId": 1,
            "contractTypeId": 2,
            "contractStatusId": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

/// Builds a multipart upload body with the given fields.
pub fn multipart_body(contract_id: Option<&str>, file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body: Vec<u8> = Vec::new();
    if let Some(contract_id) = contract_id {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"contractId\"\r\n\r\n{contract_id}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, mime_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {mime_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nBản gốc\r\n--{BOUNDARY}--\r\n"
        )
        .as_bytes(),
    );
    body
}

/// Builds a multipart upload request.
pub fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/file-hop-dong")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
