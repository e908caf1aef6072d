//! # REST API for Clients

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use shared::{CreateClientRequest, UpdateClientRequest};

use super::error_response;
use crate::AppState;

pub async fn list_clients(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/clients");

    match state.client_service.list_clients().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response("Error listing clients", e),
    }
}

pub async fn create_client(
    State(state): State<AppState>,
    Json(request): Json<CreateClientRequest>,
) -> impl IntoResponse {
    info!("POST /api/clients - name: {}", request.name);

    match state.client_service.create_client(request).await {
        Ok(client) => (StatusCode::CREATED, Json(client)).into_response(),
        Err(e) => error_response("Error adding client", e),
    }
}

pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateClientRequest>,
) -> impl IntoResponse {
    info!("PUT /api/clients/{id}");

    match state.client_service.update_client(id, request).await {
        Ok(client) => (StatusCode::OK, Json(client)).into_response(),
        Err(e) => error_response("Error updating client", e),
    }
}

pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/clients/{id}");

    match state.client_service.delete_client(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Error deleting client", e),
    }
}
