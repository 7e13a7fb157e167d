//! Gateway error types.
//!
//! Local failures produce `{detail, code}` bodies so clients can tell them
//! apart from upstream error bodies, which pass through verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("upstream API token is not configured")]
    MissingCredential,

    #[error("failed to reach upstream: {0}")]
    UpstreamUnreachable(#[from] reqwest::Error),

    #[error("bad relay request: {0}")]
    BadRequest(String),
}

impl GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingCredential | GatewayError::UpstreamUnreachable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Machine-readable discriminator for the error body.
    fn code(&self) -> &'static str {
        match self {
            GatewayError::MissingCredential => "configuration_error",
            GatewayError::UpstreamUnreachable(_) => "upstream_unreachable",
            GatewayError::BadRequest(_) => "bad_request",
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
    code: &'static str,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            detail: self.to_string(),
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_maps_to_500_config_error() {
        let err = GatewayError::MissingCredential;
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "configuration_error");
    }
}
