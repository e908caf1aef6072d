//! # REST API for Products

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use shared::{CreateProductRequest, UpdateProductRequest};

use super::error_response;
use crate::AppState;

pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/products");

    match state.product_service.list_products().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response("Error listing products", e),
    }
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> impl IntoResponse {
    info!("POST /api/products - name: {}", request.name);

    match state.product_service.create_product(request).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => error_response("Error adding product", e),
    }
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateProductRequest>,
) -> impl IntoResponse {
    info!("PUT /api/products/{id}");

    match state.product_service.update_product(id, request).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => error_response("Error updating product", e),
    }
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/products/{id}");

    match state.product_service.delete_product(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Error deleting product", e),
    }
}
