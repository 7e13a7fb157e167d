//! Application state.

use crate::config::GatewayConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub http: reqwest::Client,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self { config, http })
    }
}
