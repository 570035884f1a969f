//! Unified error handling for the alert service.
//!
//! Internally errors keep their cause (which query failed, whether a row
//! was malformed, what was missing). Externally every failure collapses to
//! one opaque `500` with a fixed body, so callers cannot probe failure
//! modes and the response contract stays a single shape.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the alert service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Repository operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Fixed body returned for every failed request.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Full detail goes to the log and Sentry; none of it leaves the
        // process.
        let event_id = sentry::capture_error(&self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Request failed"
        );

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: "Internal server error",
            }),
        )
            .into_response()
    }
}
