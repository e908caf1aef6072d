//! # REST API for Invoices
//!
//! Endpoints for creating, reading, updating and deleting commercial
//! documents together with their line items.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
};
use tracing::info;

use shared::{CreateInvoiceRequest, UpdateInvoiceRequest};

use super::error_response;
use crate::AppState;

/// List all documents, most recent first
pub async fn list_invoices(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/invoices");

    match state.invoice_service.list_invoices().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response("Error listing documents", e),
    }
}

/// Fetch one document with its line items
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/invoices/{id}");

    match state.invoice_service.get_invoice(id).await {
        Ok(Some(response)) => (StatusCode::OK, Json(response)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "document not found").into_response(),
        Err(e) => error_response("Error loading document", e),
    }
}

/// Create a new document with its line items
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(request): Json<CreateInvoiceRequest>,
) -> impl IntoResponse {
    info!("POST /api/invoices - kind: {}", request.kind);

    match state.invoice_service.create_invoice(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => error_response("Error creating document", e),
    }
}

/// Update a document, replacing its line item set
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateInvoiceRequest>,
) -> impl IntoResponse {
    info!("PUT /api/invoices/{id}");

    match state.invoice_service.update_invoice(id, request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response("Error updating document", e),
    }
}

/// Delete a document; journal entries referencing it are unlinked, not removed
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/invoices/{id}");

    match state.invoice_service.delete_invoice(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Error deleting document", e),
    }
}

/// Render the printable HTML document for sharing/printing
pub async fn get_invoice_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/invoices/{id}/document");

    let detail = match state.invoice_service.get_invoice(id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => return (StatusCode::NOT_FOUND, "document not found").into_response(),
        Err(e) => return error_response("Error loading document", e),
    };

    let settings = match state.settings_service.get_settings().await {
        Ok(settings) => settings,
        Err(e) => return error_response("Error loading settings", e),
    };

    let client = match detail.invoice.client_id {
        Some(client_id) => match state.client_service.get_client(client_id).await {
            Ok(client) => client,
            Err(e) => return error_response("Error loading client", e),
        },
        None => None,
    };

    let html = state.export_service.render_invoice_html(
        &detail.invoice,
        &detail.items,
        &settings,
        client.as_ref(),
    );
    Html(html).into_response()
}
