//! Gateway configuration.

use std::time::Duration;

/// Gateway server configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Upstream API base URL (no trailing slash)
    pub upstream_base: String,
    /// Upstream API token. `None` makes every relayed request fail with a
    /// configuration error.
    pub api_token: Option<String>,
    /// Timeout for upstream round-trips
    pub upstream_timeout: Duration,
    /// Max request body size
    pub max_body_size: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8787,
            upstream_base: "https://api.replicate.com/v1".to_string(),
            api_token: None,
            upstream_timeout: Duration::from_secs(60),
            max_body_size: 1024 * 1024, // 1MB, prompts are small
        }
    }
}

impl GatewayConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("GATEWAY_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8787),
            upstream_base: std::env::var("UPSTREAM_API_BASE")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://api.replicate.com/v1".to_string()),
            api_token: std::env::var("REPLICATE_API_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            upstream_timeout: Duration::from_secs(
                std::env::var("UPSTREAM_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024),
        }
    }
}
