//! Gateway routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::Json;
use axum::routing::{any, get};
use axum::Router;
use chrono::Utc;
use serde::Serialize;
use tower_http::limit::RequestBodyLimitLayer;

use crate::middleware::{cors_layer, request_id, request_logging};
use crate::relay::relay;
use crate::state::AppState;

/// Create the gateway router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/upstream/*path", any(relay))
        .route("/health", get(health))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer())
        .with_state(state)
}

/// Health response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: String,
    credential_configured: bool,
}

/// Health check endpoint (liveness probe).
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
            timestamp: Utc::now().to_rfc3339(),
            credential_configured: state.config.api_token.is_some(),
        }),
    )
}
