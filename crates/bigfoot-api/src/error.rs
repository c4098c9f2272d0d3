//! Error types for the query API server.
//!
//! [`ApiError`] unifies the request-level failure modes into a single
//! enum that converts into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. The
//! per-endpoint choice between "404" and "valid empty result" lives in
//! the handlers; this type only maps a chosen failure to the wire.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use bigfoot_geocode::GeocodeError;

/// Errors that can occur while answering a query request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required request parameter is missing or malformed.
    #[error("{0}")]
    BadRequest(String),

    /// The query was well-formed but matched nothing, on an endpoint
    /// that treats an empty match as an error.
    #[error("{0}")]
    NotFound(String),

    /// The external geocoding provider failed.
    #[error("geocoding provider error: {0}")]
    Upstream(#[from] GeocodeError),

    /// A serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Upstream(GeocodeError::Timeout) => {
                (StatusCode::GATEWAY_TIMEOUT, self.to_string())
            }
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            Self::Serialization(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("JSON error: {e}"))
            }
        };

        let body = serde_json::json!({ "error": message });

        (status, axum::Json(body)).into_response()
    }
}
