//! # Invoicing Backend
//!
//! Contains all non-UI logic for the invoicing application.
//!
//! The crate follows a layered architecture:
//! ```text
//! UI Layer (mobile/desktop shell)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (Business logic, services)
//!     ↓
//! Storage Layer (SQLite, repositories)
//! ```
//!
//! The backend is UI-agnostic: the router can be served to any local
//! frontend or embedded into a shell application.

pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::domain::{
    ClientService, ExportService, InvoiceService, JournalService, ProductService, SettingsService,
};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub invoice_service: InvoiceService<DbConnection>,
    pub journal_service: JournalService<DbConnection>,
    pub client_service: ClientService<DbConnection>,
    pub product_service: ProductService<DbConnection>,
    pub settings_service: SettingsService<DbConnection>,
    pub export_service: ExportService,
}

impl AppState {
    /// Build the full service set over one connection
    pub fn new(db: Arc<DbConnection>) -> Self {
        Self {
            invoice_service: InvoiceService::new(db.clone()),
            journal_service: JournalService::new(db.clone()),
            client_service: ClientService::new(db.clone()),
            product_service: ProductService::new(db.clone()),
            settings_service: SettingsService::new(db),
            export_service: ExportService::new(),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend() -> Result<AppState> {
    info!("Setting up database");
    let db = Arc::new(DbConnection::init().await?);

    info!("Setting up domain services");
    Ok(AppState::new(db))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the local frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/invoices", get(io::list_invoices).post(io::create_invoice))
        .route(
            "/invoices/:id",
            get(io::get_invoice)
                .put(io::update_invoice)
                .delete(io::delete_invoice),
        )
        .route("/invoices/:id/document", get(io::get_invoice_document))
        .route(
            "/journal",
            get(io::list_journal_entries).post(io::create_journal_entry),
        )
        .route("/journal/balance", get(io::get_journal_balance))
        .route(
            "/journal/:id",
            get(io::get_journal_entry)
                .put(io::update_journal_entry)
                .delete(io::delete_journal_entry),
        )
        .route("/clients", get(io::list_clients).post(io::create_client))
        .route(
            "/clients/:id",
            put(io::update_client).delete(io::delete_client),
        )
        .route("/products", get(io::list_products).post(io::create_product))
        .route(
            "/products/:id",
            put(io::update_product).delete(io::delete_product),
        )
        .route("/settings", get(io::get_settings).put(io::update_settings))
        .route("/export/journal.csv", get(io::export_journal_csv))
        .route("/export/invoices.csv", get(io::export_invoices_csv));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
