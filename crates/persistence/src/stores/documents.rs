// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contract attachments.
//!
//! The file body is stored base64-encoded in `noi_dung`. Listing selects the
//! metadata columns only; the body is read back by `document_content`.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hopdong_domain::{Document, DocumentUpdate, NewDocument};

use crate::diesel_schema::file_hop_dong;
use crate::entity::{Entity, contract_owned, table_ops};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = file_hop_dong)]
struct DocumentRow {
    id: i64,
    hop_dong_id: i64,
    ten_file: String,
    loai_file: String,
    kich_thuoc: i64,
    ngay_tai_len: String,
    ghi_chu: Option<String>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            contract_id: row.hop_dong_id,
            file_name: row.ten_file,
            mime_type: row.loai_file,
            size: row.kich_thuoc,
            uploaded_at: row.ngay_tai_len,
            note: row.ghi_chu,
        }
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = file_hop_dong, treat_none_as_null = true)]
struct DocumentChanges<'a> {
    hop_dong_id: i64,
    ten_file: &'a str,
    loai_file: &'a str,
    kich_thuoc: i64,
    noi_dung: &'a str,
    ghi_chu: Option<&'a str>,
}

fn document_changes(input: &NewDocument) -> DocumentChanges<'_> {
    DocumentChanges {
        hop_dong_id: input.contract_id,
        ten_file: input.file_name.trim(),
        loai_file: input.mime_type.as_str(),
        kich_thuoc: input.size,
        noi_dung: input.content_base64.as_str(),
        ghi_chu: input.note.as_deref(),
    }
}

#[derive(AsChangeset)]
#[diesel(table_name = file_hop_dong, treat_none_as_null = true)]
struct DocumentMetaChanges<'a> {
    hop_dong_id: i64,
    ten_file: &'a str,
    ghi_chu: Option<&'a str>,
}

impl Entity for Document {
    type Input = NewDocument;
    const LABEL: &'static str = "Document";

    table_ops!(
        read: file_hop_dong,
        DocumentRow,
        order: (file_hop_dong::ngay_tai_len.desc(), file_hop_dong::id.desc())
    );
    table_ops!(write: file_hop_dong, document_changes);
    table_ops!(delete: file_hop_dong);
}

contract_owned!(
    Document,
    file_hop_dong,
    DocumentRow,
    order: (file_hop_dong::ngay_tai_len.desc(), file_hop_dong::id.desc())
);

/// Renames or re-files an attachment without touching its body.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_meta(
    conn: &mut SqliteConnection,
    id: i64,
    update: &DocumentUpdate,
) -> Result<usize, PersistenceError> {
    let changes: DocumentMetaChanges<'_> = DocumentMetaChanges {
        hop_dong_id: update.contract_id,
        ten_file: update.file_name.trim(),
        ghi_chu: update.note.as_deref(),
    };
    Ok(diesel::update(file_hop_dong::table.find(id))
        .set(changes)
        .execute(conn)?)
}

/// Loads an attachment's metadata together with its base64 body.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn document_content(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<(Document, String)>, PersistenceError> {
    let row: Option<(DocumentRow, String)> = file_hop_dong::table
        .find(id)
        .select((DocumentRow::as_select(), file_hop_dong::noi_dung))
        .first(conn)
        .optional()?;
    Ok(row.map(|(meta, content)| (Document::from(meta), content)))
}
