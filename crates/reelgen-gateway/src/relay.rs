//! The upstream relay handler.
//!
//! Accepts any method on any sub-path beneath the relay prefix, strips the
//! prefix, and forwards the request to the upstream API with the
//! server-side token attached. The upstream status code and body are
//! mirrored verbatim, so a rejected submission reaches the caller exactly
//! as the upstream phrased it.

use axum::body::{to_bytes, Body};
use axum::extract::{Path, Request, State};
use axum::http::{header, Method};
use axum::response::Response;
use tracing::debug;

use crate::error::{GatewayError, GatewayResult};
use crate::state::AppState;

/// Request headers forwarded to the upstream API.
fn forwarded_headers() -> [header::HeaderName; 2] {
    [header::CONTENT_TYPE, header::HeaderName::from_static("prefer")]
}

/// Relay one request to the upstream API.
pub async fn relay(
    State(state): State<AppState>,
    Path(path): Path<String>,
    request: Request,
) -> GatewayResult<Response> {
    let token = state
        .config
        .api_token
        .as_deref()
        .ok_or(GatewayError::MissingCredential)?;

    let method = request.method().clone();
    let url = match request.uri().query() {
        Some(query) => format!("{}/{}?{}", state.config.upstream_base, path, query),
        None => format!("{}/{}", state.config.upstream_base, path),
    };

    debug!(method = %method, url = %url, "Relaying request upstream");

    let mut upstream_request = state
        .http
        .request(method.clone(), &url)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    for name in &forwarded_headers() {
        if let Some(value) = request.headers().get(name) {
            upstream_request = upstream_request.header(name.clone(), value.clone());
        }
    }

    if carries_body(&method) {
        let body = to_bytes(request.into_body(), state.config.max_body_size)
            .await
            .map_err(|e| GatewayError::BadRequest(e.to_string()))?;
        upstream_request = upstream_request.body(body);
    }

    let upstream_response = upstream_request.send().await?;

    // Mirror status and body verbatim; upstream errors are not ours to
    // rewrite.
    let status = upstream_response.status();
    let content_type = upstream_response.headers().get(header::CONTENT_TYPE).cloned();
    let body = upstream_response.bytes().await?;

    let mut builder = Response::builder().status(status);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    builder
        .body(Body::from(body))
        .map_err(|e| GatewayError::BadRequest(e.to_string()))
}

/// Methods the relay forwards a body for.
fn carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carries_body() {
        assert!(carries_body(&Method::POST));
        assert!(carries_body(&Method::PUT));
        assert!(carries_body(&Method::PATCH));
        assert!(!carries_body(&Method::GET));
        assert!(!carries_body(&Method::DELETE));
    }
}
