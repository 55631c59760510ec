use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::envelope::{Envelope, GENERIC_FAILURE};

/// Unified service error type used across module and binary code.
///
/// Variants map to the response envelope at the HTTP edge: `Validation`
/// becomes an invalid envelope, `NotFound`/`Failed` become failure
/// envelopes carrying their message, `Unauthorized` is the only non-200
/// response, and `Storage`/`Internal` are logged and reported as the
/// generic failure message so internals never leak to clients.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Request input is malformed or missing. HTTP 200, `ok: false`.
    #[error("{0}")]
    Validation(String),

    /// No record matched the id. HTTP 200, `ok: false`.
    #[error("{0}")]
    NotFound(String),

    /// A write matched nothing or the store reported an incomplete
    /// result. HTTP 200, `ok: false`.
    #[error("{0}")]
    Failed(String),

    /// Authentication failed. HTTP 401, the only non-200 response.
    #[error("Authentication Failed")]
    Unauthorized,

    /// Storage backend failure. Logged; reported as the generic failure.
    #[error("{0}")]
    Storage(String),

    /// Unexpected internal error. Logged; reported as the generic failure.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Convert to the wire envelope, logging the unexpected classes.
    pub fn to_envelope(&self) -> Envelope {
        match self {
            ServiceError::Validation(msg) => Envelope::invalid(msg.clone()),
            ServiceError::NotFound(msg) | ServiceError::Failed(msg) => {
                Envelope::failure(msg.clone())
            }
            ServiceError::Unauthorized => Envelope::unauthorized(),
            ServiceError::Storage(msg) => {
                error!("storage error: {msg}");
                Envelope::failure(GENERIC_FAILURE)
            }
            ServiceError::Internal(msg) => {
                error!("internal error: {msg}");
                Envelope::failure(GENERIC_FAILURE)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        self.to_envelope().into_response()
    }
}
