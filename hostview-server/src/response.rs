use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::metrics::CollectError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("remote address unavailable")]
    MissingRemoteAddr,
    #[error(transparent)]
    Collect(#[from] CollectError),
    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

// Failures never leak details to the client: log, then answer with the bare status text.
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        error!("Returning error response {} {}", status, self);

        let reason = status.canonical_reason().unwrap_or("Internal Server Error");
        (status, reason).into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
