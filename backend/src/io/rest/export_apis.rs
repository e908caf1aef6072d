//! # REST API for Exports
//!
//! CSV reports served with a download-friendly content type. The heavy
//! lifting is string templating in the export service; these handlers only
//! fetch the rows and hand them over.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use tracing::{error, info};

use super::error_response;
use crate::AppState;

pub async fn export_journal_csv(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/export/journal.csv");

    let listing = match state.journal_service.list_entries().await {
        Ok(listing) => listing,
        Err(e) => return error_response("Error listing journal entries", e),
    };

    match state.export_service.journal_csv(&listing.entries) {
        Ok(csv) => ([(header::CONTENT_TYPE, "text/csv")], csv).into_response(),
        Err(e) => {
            error!("Error rendering journal CSV: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error rendering journal CSV").into_response()
        }
    }
}

pub async fn export_invoices_csv(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/export/invoices.csv");

    let listing = match state.invoice_service.list_invoices().await {
        Ok(listing) => listing,
        Err(e) => return error_response("Error listing documents", e),
    };

    match state.export_service.invoices_csv(&listing.invoices) {
        Ok(csv) => ([(header::CONTENT_TYPE, "text/csv")], csv).into_response(),
        Err(e) => {
            error!("Error rendering document CSV: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error rendering document CSV").into_response()
        }
    }
}
