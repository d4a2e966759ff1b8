//! HTTP error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// Error returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown animal '{0}'")]
    UnknownAnimal(String),

    #[error("lookup by external id is not enabled for '{0}'")]
    LookupDisabled(String),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Source(#[from] floppa_core::Error),
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UnknownAnimal(_) | ApiError::LookupDisabled(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Source(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            debug!(error = %self, %status, "Request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floppa_core::error::{RemoteApiError, TransportError};

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::UnknownAnimal("dog".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::LookupDisabled("capybara".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("bad id".into()).status_code(),
            StatusCode::BAD_REQUEST
        );

        let source: ApiError =
            floppa_core::Error::from(TransportError::Timeout { duration_ms: 10 }).into();
        assert_eq!(source.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn source_message_passes_through() {
        let err: ApiError = floppa_core::Error::from(RemoteApiError::new(403, "forbidden")).into();
        assert_eq!(err.to_string(), "remote API error: HTTP 403: forbidden");
    }

    #[test]
    fn response_has_status() {
        let response = ApiError::UnknownAnimal("dog".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
