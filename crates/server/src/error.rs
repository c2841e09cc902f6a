//! Unified error handling with Sentry integration.
//!
//! Provides the `ApiError` type returned by every REST handler. Client
//! rejections map to 400 with a structured payload and failure headers,
//! missing entities to an empty 404, and store failures to a 500 that is
//! captured to Sentry before responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::headers;
use crate::store::StoreError;

/// Application-level error type for the REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client request violated an id precondition.
    #[error("{message}")]
    BadRequestAlert {
        entity_name: &'static str,
        error_key: &'static str,
        message: &'static str,
    },

    /// The requested entity does not exist.
    #[error("entity not found")]
    NotFound,

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// A structured client rejection carrying an entity tag and error key.
    #[must_use]
    pub const fn bad_request(
        entity_name: &'static str,
        error_key: &'static str,
        message: &'static str,
    ) -> Self {
        Self::BadRequestAlert {
            entity_name,
            error_key,
            message,
        }
    }
}

/// Problem-style body attached to 400 rejections.
#[derive(Debug, Serialize)]
struct ProblemBody {
    title: &'static str,
    status: u16,
    message: String,
    params: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Store(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        match self {
            Self::BadRequestAlert {
                entity_name,
                error_key,
                message,
            } => {
                let body = ProblemBody {
                    title: message,
                    status: StatusCode::BAD_REQUEST.as_u16(),
                    message: format!("error.{error_key}"),
                    params: entity_name,
                };
                (
                    StatusCode::BAD_REQUEST,
                    headers::failure_alert(entity_name, error_key),
                    Json(body),
                )
                    .into_response()
            }
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Store(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;
