// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the contract back office.
//!
//! Every operation takes `&mut Persistence` and returns domain values or
//! `ApiError`. Nothing here knows about HTTP; the server crate maps errors
//! onto status codes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod export;
mod files;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, DEFAULT_SESSION_HOURS, whoami};
pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use export::{CONTRACT_CSV_HEADERS, export_contracts_csv, render_contracts_csv};
pub use files::{DEFAULT_MIME_TYPE, download_document, update_document, upload_document};
pub use handlers::{
    create_entity, create_lookup, dashboard_charts, delete_contract, delete_entity, delete_lookup,
    get_contract_detail, get_entity, get_lookup, list_contract_entities, list_contracts,
    list_entities, list_lookup, list_staff_views, list_supplier_views, parse_lookup_kind,
    system_overview, update_entity, update_lookup,
};
pub use request_response::{
    ContractDetail, DeleteContractResponse, DownloadedFile, LoginRequest, LoginResponse,
    WhoAmIResponse,
};
