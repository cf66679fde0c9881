// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hopdong_domain::{Contract, Document, DocumentUpdate};
use hopdong_persistence::Persistence;

use super::helpers::{MAX_UPLOAD_BYTES, create_test_contract, create_test_persistence};
use crate::{
    ApiError, DEFAULT_MIME_TYPE, DownloadedFile, delete_entity, download_document,
    list_contract_entities, update_document, upload_document,
};

#[test]
fn test_upload_then_download_returns_same_bytes() {
    let mut persistence: Persistence = create_test_persistence();
    let contract: Contract = create_test_contract(&mut persistence, "Tài liệu");
    let body: Vec<u8> = (0..=255u8).collect();

    let stored: Document = upload_document(
        &mut persistence,
        contract.id,
        " bien-ban.bin ",
        None,
        &body,
        Some(String::from("Biên bản nghiệm thu")),
        MAX_UPLOAD_BYTES,
    )
    .unwrap();

    assert_eq!(stored.file_name, "bien-ban.bin");
    assert_eq!(stored.mime_type, DEFAULT_MIME_TYPE);
    assert_eq!(stored.size, 256);

    let file: DownloadedFile = download_document(&mut persistence, stored.id).unwrap();
    assert_eq!(file.bytes, body);
    assert_eq!(file.file_name, "bien-ban.bin");
}

#[test]
fn test_upload_over_limit_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let contract: Contract = create_test_contract(&mut persistence, "Quá lớn");
    let body: Vec<u8> = vec![0; MAX_UPLOAD_BYTES + 1];

    let err: ApiError = upload_document(
        &mut persistence,
        contract.id,
        "lon.bin",
        None,
        &body,
        None,
        MAX_UPLOAD_BYTES,
    )
    .unwrap_err();

    assert_eq!(
        err,
        ApiError::PayloadTooLarge {
            size: MAX_UPLOAD_BYTES + 1,
            limit: MAX_UPLOAD_BYTES,
        }
    );
    assert!(
        list_contract_entities::<Document>(&mut persistence, contract.id)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_upload_to_missing_contract_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    let err: ApiError = upload_document(
        &mut persistence,
        41,
        "a.pdf",
        Some("application/pdf"),
        b"%PDF",
        None,
        MAX_UPLOAD_BYTES,
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_metadata_update_keeps_body() {
    let mut persistence: Persistence = create_test_persistence();
    let first: Contract = create_test_contract(&mut persistence, "Cũ");
    let second: Contract = create_test_contract(&mut persistence, "Mới");
    let stored: Document = upload_document(
        &mut persistence,
        first.id,
        "a.txt",
        Some("text/plain"),
        b"xin chao",
        None,
        MAX_UPLOAD_BYTES,
    )
    .unwrap();

    let updated: Document = update_document(
        &mut persistence,
        stored.id,
        &DocumentUpdate {
            contract_id: second.id,
            file_name: String::from("b.txt"),
            note: Some(String::from("đã đổi tên")),
        },
    )
    .unwrap();

    assert_eq!(updated.contract_id, second.id);
    assert_eq!(updated.file_name, "b.txt");
    assert_eq!(updated.size, stored.size);
    let file: DownloadedFile = download_document(&mut persistence, stored.id).unwrap();
    assert_eq!(file.bytes, b"xin chao");
    assert_eq!(file.mime_type, "text/plain");
}

#[test]
fn test_deleted_document_cannot_be_downloaded() {
    let mut persistence: Persistence = create_test_persistence();
    let contract: Contract = create_test_contract(&mut persistence, "Xóa tệp");
    let stored: Document = upload_document(
        &mut persistence,
        contract.id,
        "a.txt",
        None,
        b"x",
        None,
        MAX_UPLOAD_BYTES,
    )
    .unwrap();

    delete_entity::<Document>(&mut persistence, stored.id).unwrap();

    assert!(matches!(
        download_document(&mut persistence, stored.id),
        Err(ApiError::ResourceNotFound { .. })
    ));
}
