//! REST handlers exposed to the local UI

pub mod client_apis;
pub mod export_apis;
pub mod invoice_apis;
pub mod journal_apis;
pub mod product_apis;
pub mod settings_apis;

pub use client_apis::*;
pub use export_apis::*;
pub use invoice_apis::*;
pub use journal_apis::*;
pub use product_apis::*;
pub use settings_apis::*;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::domain::ServiceError;

/// Map a service error onto the HTTP boundary: validation problems are the
/// caller's fault, missing rows are 404, storage failures are logged and
/// reported as a generic 500.
pub(crate) fn error_response(context: &str, err: ServiceError) -> Response {
    match err {
        ServiceError::Validation(message) => (StatusCode::BAD_REQUEST, message).into_response(),
        ServiceError::NotFound(what) => {
            (StatusCode::NOT_FOUND, format!("{what} not found")).into_response()
        }
        ServiceError::Persistence(e) => {
            error!("{context}: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, context.to_string()).into_response()
        }
    }
}
