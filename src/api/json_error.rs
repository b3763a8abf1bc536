use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::upstream::UpstreamError;

/// Error envelope returned to callers as `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("Failed to read request body: {0}")]
    UnreadableBody(#[from] BytesRejection),
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{0}")]
    Upstream(#[from] UpstreamError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl JsonError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnreadableBody(rejection) => rejection.status(),
            Self::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, "Rejected request body");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_json_is_a_client_error() {
        let error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

        assert_eq!(
            JsonError::from(error).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_upstream_failure_is_a_server_error() {
        let error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = JsonError::from(UpstreamError::Decode(error));

        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.to_string().starts_with("failed to decode upstream response"));
    }
}
