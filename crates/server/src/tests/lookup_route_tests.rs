// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::StatusCode;
use serde_json::json;

use super::helpers::{create_test_app, send_json};

#[tokio::test]
async fn test_every_lookup_table_is_routed() {
    let app = create_test_app();

    for kind in hopdong_domain::LookupKind::ALL {
        let (status, rows) = send_json(&app, "GET", &format!("/api/{}", kind.slug()), None).await;
        assert_eq!(status, StatusCode::OK, "{}", kind.slug());
        assert!(!rows.as_array().unwrap().is_empty(), "{}", kind.slug());
    }
}

#[tokio::test]
async fn test_lookup_row_lifecycle() {
    let app = create_test_app();

    let (status, created) = send_json(
        &app,
        "POST",
        "/api/loai-tien",
        Some(json!({ "name": "GBP", "secondary": "Bảng Anh" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id: i64 = created["id"].as_i64().unwrap();

    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/api/loai-tien/{id}"),
        Some(json!({ "name": "GBP", "secondary": "Bảng Anh (Pound)" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["secondary"], "Bảng Anh (Pound)");

    let (status, _) = send_json(&app, "DELETE", &format!("/api/loai-tien/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send_json(&app, "GET", &format!("/api/loai-tien/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_contract_status_table_rejects_writes() {
    let app = create_test_app();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/trang-thai-hop-dong",
        Some(json!({ "name": "Hủy bỏ" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "read_only_lookup");
}
