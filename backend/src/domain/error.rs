use thiserror::Error;

/// Errors surfaced by the domain services.
///
/// Validation failures are raised before any storage call, so a validation
/// error guarantees nothing was written. Persistence failures come out of
/// the storage layer; they are logged and surfaced, never retried.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("storage failure: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }
}
