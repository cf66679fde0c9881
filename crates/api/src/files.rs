// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contract attachments.
//!
//! Uploads are buffered in memory and stored base64-encoded, so the size
//! limit bounds memory use per request.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hopdong_domain::{Document, DocumentUpdate, NewDocument, Validate};
use hopdong_persistence::Persistence;
use num_traits::ToPrimitive;
use tracing::{error, info};

use crate::error::ApiError;
use crate::handlers::create_entity;
use crate::request_response::DownloadedFile;

/// MIME type recorded when the client sends none.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Stores an uploaded file against a contract.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `contract_id` - The owning contract
/// * `file_name` - The original file name
/// * `mime_type` - The declared content type, if any
/// * `bytes` - The file body
/// * `note` - An optional note
/// * `max_bytes` - The upload size limit
///
/// # Errors
///
/// Returns `ApiError::PayloadTooLarge` above the limit, `ApiError::Validation`
/// for an empty file or name, and `ApiError::ResourceNotFound` for a missing
/// contract.
pub fn upload_document(
    persistence: &mut Persistence,
    contract_id: i64,
    file_name: &str,
    mime_type: Option<&str>,
    bytes: &[u8],
    note: Option<String>,
    max_bytes: usize,
) -> Result<Document, ApiError> {
    if bytes.len() > max_bytes {
        return Err(ApiError::PayloadTooLarge {
            size: bytes.len(),
            limit: max_bytes,
        });
    }
    let size: i64 = bytes.len().to_i64().ok_or_else(|| ApiError::Internal {
        message: String::from("File size does not fit in 64 bits"),
    })?;

    let mime_type: &str = mime_type
        .map(str::trim)
        .filter(|mime| !mime.is_empty())
        .unwrap_or(DEFAULT_MIME_TYPE);
    let document: NewDocument = NewDocument {
        contract_id,
        file_name: String::from(file_name.trim()),
        mime_type: String::from(mime_type),
        size,
        content_base64: STANDARD.encode(bytes),
        note: note.filter(|note| !note.trim().is_empty()),
    };

    let stored: Document = create_entity::<Document>(persistence, &document)?;
    info!(
        document_id = stored.id,
        contract_id,
        size,
        "Stored uploaded document"
    );
    Ok(stored)
}

/// Updates an attachment's name, note or owning contract.
///
/// # Errors
///
/// Returns `ApiError::Validation` for bad input and `ApiError::ResourceNotFound`
/// for a missing document or contract.
pub fn update_document(
    persistence: &mut Persistence,
    id: i64,
    update: &DocumentUpdate,
) -> Result<Document, ApiError> {
    update.validate()?;
    if !persistence.contract_exists(update.contract_id)? {
        return Err(ApiError::not_found("Contract", update.contract_id));
    }
    if persistence.find::<Document>(id)?.is_none() {
        return Err(ApiError::not_found("Document", id));
    }
    Ok(persistence.update_document_meta(id, update)?)
}

/// Loads an attachment and decodes its body.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for a missing document and
/// `ApiError::Internal` if the stored body is not valid base64.
pub fn download_document(
    persistence: &mut Persistence,
    id: i64,
) -> Result<DownloadedFile, ApiError> {
    if persistence.find::<Document>(id)?.is_none() {
        return Err(ApiError::not_found("Document", id));
    }
    let (document, content): (Document, String) = persistence.document_content(id)?;

    let bytes: Vec<u8> = STANDARD.decode(content.trim()).map_err(|e| {
        error!(document_id = id, error = %e, "Stored document body is not base64");
        ApiError::Internal {
            message: format!("Document {id} has a corrupt body"),
        }
    })?;

    Ok(DownloadedFile {
        file_name: document.file_name,
        mime_type: document.mime_type,
        bytes,
    })
}
