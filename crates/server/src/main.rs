// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod payload;
mod session;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Path, State as AxumState},
    routing::{MethodRouter, get, post},
};
use clap::Parser;
use hopdong_api::{AuthenticationService, DEFAULT_SESSION_HOURS};
use hopdong_domain::{
    Contract, ContractScoped, Document, Equipment, FundDisbursement, Investor, LookupInput,
    LookupKind, Payment, ProgressStep, Reception, Staff, Supplier, Validate,
};
use hopdong_persistence::{ContractOwned, Entity, Persistence};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::handlers::{
    handle_charts, handle_create, handle_create_lookup, handle_delete, handle_delete_contract,
    handle_delete_lookup, handle_download_document, handle_export_contracts, handle_get,
    handle_get_contract, handle_get_lookup, handle_health, handle_list, handle_list_children,
    handle_list_contracts, handle_list_lookup, handle_login, handle_logout, handle_overview,
    handle_staff_views, handle_supplier_views, handle_update, handle_update_document,
    handle_update_lookup, handle_upload_document, handle_whoami,
};
use crate::payload::JsonBody;

/// Default upload limit: 10 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Room left in the request body limit for multipart framing and the text fields.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Hop Dong Server - HTTP server for the contract and customs back office
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Largest accepted document upload, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,

    /// How long a login session stays valid, in hours
    #[arg(long, default_value_t = DEFAULT_SESSION_HOURS)]
    session_hours: i64,

    /// Login of the user created when the user table is empty
    #[arg(long, requires = "admin_password")]
    admin_login: Option<String>,

    /// Password of the user created when the user table is empty
    #[arg(long, requires = "admin_login")]
    admin_password: Option<String>,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a single mutex; every request runs its
/// reads and writes on one connection in turn.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer.
    pub persistence: Arc<Mutex<Persistence>>,
    /// Largest accepted document upload, in bytes.
    pub max_upload_bytes: usize,
    /// Session lifetime handed out at login.
    pub session_hours: i64,
}

impl AppState {
    fn new(persistence: Persistence, max_upload_bytes: usize, session_hours: i64) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            max_upload_bytes,
            session_hours,
        }
    }
}

/// Registers `GET/POST /api/<slug>` and `GET/PUT/DELETE /api/<slug>/{id}`.
fn entity_routes<E>(router: Router<AppState>, slug: &str) -> Router<AppState>
where
    E: Entity + Serialize + Send + 'static,
    E::Input: Validate + ContractScoped + DeserializeOwned + Send,
{
    router
        .route(
            &format!("/api/{slug}"),
            get(handle_list::<E>).post(handle_create::<E>),
        )
        .route(&format!("/api/{slug}/{{id}}"), member_routes::<E>())
}

/// Like `entity_routes`, but the listing accepts `?contractId=`.
fn child_routes<E>(router: Router<AppState>, slug: &str) -> Router<AppState>
where
    E: ContractOwned + Serialize + Send + 'static,
    E::Input: Validate + ContractScoped + DeserializeOwned + Send,
{
    router
        .route(
            &format!("/api/{slug}"),
            get(handle_list_children::<E>).post(handle_create::<E>),
        )
        .route(&format!("/api/{slug}/{{id}}"), member_routes::<E>())
}

fn member_routes<E>() -> MethodRouter<AppState>
where
    E: Entity + Serialize + Send + 'static,
    E::Input: Validate + ContractScoped + DeserializeOwned + Send,
{
    get(handle_get::<E>)
        .put(handle_update::<E>)
        .delete(handle_delete::<E>)
}

fn lookup_routes(router: Router<AppState>, kind: LookupKind) -> Router<AppState> {
    let collection: MethodRouter<AppState> =
        get(move |AxumState(state): AxumState<AppState>| handle_list_lookup(state, kind)).post(
            move |AxumState(state): AxumState<AppState>,
                  JsonBody(input): JsonBody<LookupInput>| {
                handle_create_lookup(state, kind, input)
            },
        );
    let member: MethodRouter<AppState> =
        get(
            move |AxumState(state): AxumState<AppState>, Path(id): Path<i64>| {
                handle_get_lookup(state, kind, id)
            },
        )
        .put(
            move |AxumState(state): AxumState<AppState>,
                  Path(id): Path<i64>,
                  JsonBody(input): JsonBody<LookupInput>| {
                handle_update_lookup(state, kind, id, input)
            },
        )
        .delete(
            move |AxumState(state): AxumState<AppState>, Path(id): Path<i64>| {
                handle_delete_lookup(state, kind, id)
            },
        );

    router
        .route(&format!("/api/{}", kind.slug()), collection)
        .route(&format!("/api/{}/{{id}}", kind.slug()), member)
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    let upload_limit: usize = app_state
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let mut router: Router<AppState> = Router::new()
        .route("/api/health", get(handle_health))
        .route("/api/auth/login", post(handle_login))
        .route("/api/auth/logout", post(handle_logout))
        .route("/api/auth/me", get(handle_whoami))
        .route("/api/system/overview", get(handle_overview))
        .route("/api/dashboard/charts", get(handle_charts))
        .route(
            "/api/hop-dong",
            get(handle_list_contracts).post(handle_create::<Contract>),
        )
        .route("/api/hop-dong/export.csv", get(handle_export_contracts))
        .route(
            "/api/hop-dong/{id}",
            get(handle_get_contract)
                .put(handle_update::<Contract>)
                .delete(handle_delete_contract),
        )
        .route("/api/nha-cung-cap/views", get(handle_supplier_views))
        .route("/api/can-bo/views", get(handle_staff_views))
        .route(
            "/api/file-hop-dong",
            get(handle_list_children::<Document>).post(handle_upload_document),
        )
        .route(
            "/api/file-hop-dong/{id}",
            get(handle_get::<Document>)
                .put(handle_update_document)
                .delete(handle_delete::<Document>),
        )
        .route(
            "/api/file-hop-dong/{id}/download",
            get(handle_download_document),
        );

    router = entity_routes::<Supplier>(router, "nha-cung-cap");
    router = entity_routes::<Investor>(router, "chu-dau-tu");
    router = entity_routes::<Staff>(router, "can-bo");
    router = child_routes::<Equipment>(router, "thiet-bi");
    router = child_routes::<Payment>(router, "thanh-toan");
    router = child_routes::<ProgressStep>(router, "buoc-thuc-hien");
    router = child_routes::<Reception>(router, "tiep-nhan");
    router = child_routes::<FundDisbursement>(router, "cap-von");
    for kind in LookupKind::ALL {
        router = lookup_routes(router, kind);
    }

    router
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Hop Dong Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!(path = %db_path, "Using file-based database");
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let (Some(login), Some(password)) = (&args.admin_login, &args.admin_password) {
        let created: bool =
            AuthenticationService::ensure_initial_user(&mut persistence, login, password)?;
        debug!(created, "Checked for initial user");
    }
    let expired: usize = persistence.delete_expired_sessions()?;
    info!(expired, "Removed expired sessions");

    let app_state: AppState =
        AppState::new(persistence, args.max_upload_bytes, args.session_hours);
    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
