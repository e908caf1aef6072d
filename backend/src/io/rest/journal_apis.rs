//! # REST API for the Cash Journal

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use shared::{CreateJournalEntryRequest, JournalBalanceResponse, UpdateJournalEntryRequest};

use super::error_response;
use crate::AppState;

/// List all entries (newest first) with the recomputed balance
pub async fn list_journal_entries(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/journal");

    match state.journal_service.list_entries().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response("Error listing journal entries", e),
    }
}

/// Current net cash position
pub async fn get_journal_balance(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/journal/balance");

    match state.journal_service.balance().await {
        Ok(balance) => (StatusCode::OK, Json(JournalBalanceResponse { balance })).into_response(),
        Err(e) => error_response("Error computing balance", e),
    }
}

pub async fn get_journal_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/journal/{id}");

    match state.journal_service.get_entry(id).await {
        Ok(Some(entry)) => (StatusCode::OK, Json(entry)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "journal entry not found").into_response(),
        Err(e) => error_response("Error loading journal entry", e),
    }
}

pub async fn create_journal_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateJournalEntryRequest>,
) -> impl IntoResponse {
    info!("POST /api/journal - kind: {}", request.kind.as_str());

    match state.journal_service.create_entry(request).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => error_response("Error recording journal entry", e),
    }
}

pub async fn update_journal_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateJournalEntryRequest>,
) -> impl IntoResponse {
    info!("PUT /api/journal/{id}");

    match state.journal_service.update_entry(id, request).await {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(e) => error_response("Error updating journal entry", e),
    }
}

pub async fn delete_journal_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/journal/{id}");

    match state.journal_service.delete_entry(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Error deleting journal entry", e),
    }
}
