//! HTTP error responses.
//!
//! Bodies are the bare status text so nothing about the failure leaks to
//! the client. Details go to the log.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use gatehouse_service::ServiceError;

/// Errors the auth middleware can answer with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing, unknown or wrong credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Credentials could not be loaded or the check could not run.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

fn status_text(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => {
                let status = StatusCode::UNAUTHORIZED;
                let mut response = (status, status_text(status)).into_response();
                response.headers_mut().insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static("Basic"),
                );
                response
            }
            ApiError::Internal(msg) => {
                tracing::error!(%msg, "unable to authenticate request");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                (status, status_text(status)).into_response()
            }
        }
    }
}
