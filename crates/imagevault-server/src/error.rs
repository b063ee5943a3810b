//! Error handling for the imagevault server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use imagevault_gateway::GatewayError;
use serde_json::json;
use thiserror::Error;

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Server error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Gateway(err) => match err {
                GatewayError::NotFound { .. } => StatusCode::NOT_FOUND,
                // The remote service's own status, surfaced unmodified; 502
                // when the remote never answered with a usable status.
                GatewayError::Remote { status, .. } => status
                    .and_then(|code| StatusCode::from_u16(code).ok())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                GatewayError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Config(_) => "CONFIG_ERROR",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Gateway(GatewayError::NotFound { .. }) => "NOT_FOUND",
            ApiError::Gateway(GatewayError::Remote { .. }) => "STORAGE_ERROR",
            ApiError::Gateway(GatewayError::Internal { .. }) => "INTERNAL_ERROR",
            ApiError::Io(_) => "IO_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        tracing::error!(
            error = %self,
            status = %status,
            error_code = error_code,
            "Request failed"
        );

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
                "status": status.as_u16()
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::from(GatewayError::not_found("Bucket was not found!"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "Bucket was not found!");
    }

    #[test]
    fn remote_errors_surface_the_remote_status() {
        let err = ApiError::from(GatewayError::remote(Some(403), "Access Denied"));
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }

    #[test]
    fn remote_errors_without_a_status_map_to_502() {
        let err = ApiError::from(GatewayError::remote(None, "connection reset"));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn internal_gateway_errors_map_to_500() {
        let err = ApiError::from(GatewayError::internal("stream failure"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn bad_request_maps_to_400() {
        let err = ApiError::BadRequest("Image name must not be empty".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
