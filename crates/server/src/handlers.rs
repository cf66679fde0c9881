// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Axum handlers. Each one locks the persistence layer, calls into the API
//! crate and shapes the result for HTTP.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use hopdong::{ChartData, ContractView, OverviewStats, StaffView, SupplierView};
use hopdong_api::{
    ApiError, AuthenticationService, ContractDetail, DeleteContractResponse, DownloadedFile,
    LoginRequest, LoginResponse, WhoAmIResponse, create_entity, create_lookup, dashboard_charts,
    delete_contract, delete_entity, delete_lookup, download_document, export_contracts_csv,
    get_contract_detail, get_entity, get_lookup, list_contract_entities, list_contracts,
    list_entities, list_lookup, list_staff_views, list_supplier_views, system_overview,
    update_document, update_entity, update_lookup, upload_document,
};
use hopdong_domain::{
    ContractScoped, Document, DocumentUpdate, LookupInput, LookupKind, LookupRow, Validate,
};
use hopdong_persistence::{ContractOwned, Entity};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::AppState;
use crate::error::HttpError;
use crate::payload::JsonBody;
use crate::session::SessionUser;

/// Query parameters accepted by child record listings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractFilter {
    /// Restricts the listing to one contract.
    pub contract_id: Option<i64>,
}

/// Query parameters for contract deletion.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteContractQuery {
    /// Removes attached records too when set.
    #[serde(default)]
    pub cascade: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

// ============================================================================
// Generic entities
// ============================================================================

pub async fn handle_list<E>(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<E>>, HttpError>
where
    E: Entity + Serialize + Send + 'static,
{
    let mut persistence = app_state.persistence.lock().await;
    let records: Vec<E> = list_entities::<E>(&mut persistence)?;
    drop(persistence);
    Ok(Json(records))
}

/// Lists a child table, optionally restricted to one contract.
pub async fn handle_list_children<E>(
    AxumState(app_state): AxumState<AppState>,
    Query(filter): Query<ContractFilter>,
) -> Result<Json<Vec<E>>, HttpError>
where
    E: ContractOwned + Serialize + Send + 'static,
{
    let mut persistence = app_state.persistence.lock().await;
    let records: Vec<E> = match filter.contract_id {
        Some(contract_id) => list_contract_entities::<E>(&mut persistence, contract_id)?,
        None => list_entities::<E>(&mut persistence)?,
    };
    drop(persistence);
    Ok(Json(records))
}

pub async fn handle_get<E>(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<E>, HttpError>
where
    E: Entity + Serialize + Send + 'static,
{
    let mut persistence = app_state.persistence.lock().await;
    let record: E = get_entity::<E>(&mut persistence, id)?;
    drop(persistence);
    Ok(Json(record))
}

pub async fn handle_create<E>(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(input): JsonBody<E::Input>,
) -> Result<(StatusCode, Json<E>), HttpError>
where
    E: Entity + Serialize + Send + 'static,
    E::Input: Validate + ContractScoped + DeserializeOwned + Send,
{
    info!(entity = E::LABEL, "Handling create request");
    let mut persistence = app_state.persistence.lock().await;
    let stored: E = create_entity::<E>(&mut persistence, &input)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn handle_update<E>(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
    JsonBody(input): JsonBody<E::Input>,
) -> Result<Json<E>, HttpError>
where
    E: Entity + Serialize + Send + 'static,
    E::Input: Validate + ContractScoped + DeserializeOwned + Send,
{
    info!(entity = E::LABEL, id, "Handling update request");
    let mut persistence = app_state.persistence.lock().await;
    let stored: E = update_entity::<E>(&mut persistence, id, &input)?;
    drop(persistence);
    Ok(Json(stored))
}

pub async fn handle_delete<E: Entity + Send + 'static>(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(entity = E::LABEL, id, "Handling delete request");
    let mut persistence = app_state.persistence.lock().await;
    delete_entity::<E>(&mut persistence, id)?;
    drop(persistence);
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Lookups
// ============================================================================

pub async fn handle_list_lookup(
    app_state: AppState,
    kind: LookupKind,
) -> Result<Json<Vec<LookupRow>>, HttpError> {
    debug!(table = kind.slug(), "Listing lookup table");
    let mut persistence = app_state.persistence.lock().await;
    let rows: Vec<LookupRow> = list_lookup(&mut persistence, kind)?;
    drop(persistence);
    Ok(Json(rows))
}

pub async fn handle_get_lookup(
    app_state: AppState,
    kind: LookupKind,
    id: i64,
) -> Result<Json<LookupRow>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let row: LookupRow = get_lookup(&mut persistence, kind, id)?;
    drop(persistence);
    Ok(Json(row))
}

pub async fn handle_create_lookup(
    app_state: AppState,
    kind: LookupKind,
    input: LookupInput,
) -> Result<(StatusCode, Json<LookupRow>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let row: LookupRow = create_lookup(&mut persistence, kind, &input)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn handle_update_lookup(
    app_state: AppState,
    kind: LookupKind,
    id: i64,
    input: LookupInput,
) -> Result<Json<LookupRow>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let row: LookupRow = update_lookup(&mut persistence, kind, id, &input)?;
    drop(persistence);
    Ok(Json(row))
}

pub async fn handle_delete_lookup(
    app_state: AppState,
    kind: LookupKind,
    id: i64,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    delete_lookup(&mut persistence, kind, id)?;
    drop(persistence);
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Contracts
// ============================================================================

/// Lists contracts with references resolved to names.
pub async fn handle_list_contracts(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<ContractView>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let views: Vec<ContractView> = list_contracts(&mut persistence)?;
    drop(persistence);
    Ok(Json(views))
}

pub async fn handle_get_contract(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ContractDetail>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detail: ContractDetail = get_contract_detail(&mut persistence, id)?;
    drop(persistence);
    Ok(Json(detail))
}

/// Deletes a contract; `?cascade=true` removes its records as well.
pub async fn handle_delete_contract(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DeleteContractQuery>,
) -> Result<Json<DeleteContractResponse>, HttpError> {
    info!(contract_id = id, cascade = query.cascade, "Handling contract delete");
    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteContractResponse = delete_contract(&mut persistence, id, query.cascade)?;
    drop(persistence);
    Ok(Json(response))
}

pub async fn handle_export_contracts(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let csv_text: String = export_contracts_csv(&mut persistence)?;
    drop(persistence);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"hop-dong.csv\"",
            ),
        ],
        csv_text,
    )
        .into_response())
}

// ============================================================================
// Dashboard and directory views
// ============================================================================

pub async fn handle_overview(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<OverviewStats>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let stats: OverviewStats = system_overview(&mut persistence)?;
    drop(persistence);
    Ok(Json(stats))
}

pub async fn handle_charts(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ChartData>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let charts: ChartData = dashboard_charts(&mut persistence)?;
    drop(persistence);
    Ok(Json(charts))
}

pub async fn handle_supplier_views(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<SupplierView>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let views: Vec<SupplierView> = list_supplier_views(&mut persistence)?;
    drop(persistence);
    Ok(Json(views))
}

pub async fn handle_staff_views(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<StaffView>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let views: Vec<StaffView> = list_staff_views(&mut persistence)?;
    drop(persistence);
    Ok(Json(views))
}

// ============================================================================
// Documents
// ============================================================================

struct UploadForm {
    contract_id: Option<i64>,
    file_name: Option<String>,
    mime_type: Option<String>,
    bytes: Vec<u8>,
    note: Option<String>,
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, HttpError> {
    let mut form: UploadForm = UploadForm {
        contract_id: None,
        file_name: None,
        mime_type: None,
        bytes: Vec::new(),
        note: None,
    };

    while let Some(field) = multipart.next_field().await? {
        let name: Option<String> = field.name().map(String::from);
        match name.as_deref() {
            Some("contractId") => {
                let text: String = field.text().await?;
                let contract_id: i64 = text.trim().parse().map_err(|_| {
                    HttpError::from(ApiError::invalid_field(
                        "contractId",
                        "must be a whole number",
                    ))
                })?;
                form.contract_id = Some(contract_id);
            }
            Some("file") => {
                form.file_name = field.file_name().map(String::from);
                form.mime_type = field.content_type().map(String::from);
                form.bytes = field.bytes().await?.to_vec();
            }
            Some("note") => form.note = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(form)
}

/// Accepts a multipart upload with `contractId`, `file` and `note` fields.
pub async fn handle_upload_document(
    AxumState(app_state): AxumState<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Document>), HttpError> {
    let form: UploadForm = read_upload_form(multipart).await?;
    let Some(contract_id) = form.contract_id else {
        return Err(HttpError::from(ApiError::invalid_field(
            "contractId",
            "is required",
        )));
    };
    let file_name: String = form.file_name.unwrap_or_default();

    let mut persistence = app_state.persistence.lock().await;
    let stored: Document = upload_document(
        &mut persistence,
        contract_id,
        &file_name,
        form.mime_type.as_deref(),
        &form.bytes,
        form.note,
        app_state.max_upload_bytes,
    )?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn handle_update_document(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
    JsonBody(update): JsonBody<DocumentUpdate>,
) -> Result<Json<Document>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let stored: Document = update_document(&mut persistence, id, &update)?;
    drop(persistence);
    Ok(Json(stored))
}

pub async fn handle_download_document(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let file: DownloadedFile = download_document(&mut persistence, id)?;
    drop(persistence);

    let disposition: String = format!(
        "attachment; filename*=UTF-8''{}",
        encode_header_value(&file.file_name)
    );
    Ok((
        [
            (header::CONTENT_TYPE, file.mime_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}

/// Percent-encodes a file name for an RFC 5987 `filename*` parameter.
pub fn encode_header_value(value: &str) -> String {
    let mut encoded: String = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'-' | b'_' | b'~') {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

// ============================================================================
// Sessions
// ============================================================================

pub async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse =
        AuthenticationService::login(&mut persistence, &request, app_state.session_hours)?;
    drop(persistence);
    Ok(Json(response))
}

pub async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    AuthenticationService::logout(&mut persistence, &session.token)?;
    drop(persistence);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn handle_whoami(session: SessionUser) -> Json<WhoAmIResponse> {
    Json(WhoAmIResponse {
        id: session.user.id,
        login: session.user.login,
        display_name: session.user.display_name,
        last_login_at: session.user.last_login_at,
    })
}

pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
