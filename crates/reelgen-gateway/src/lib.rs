//! Credential-injecting proxy in front of the video-generation API.
//!
//! This crate provides:
//! - A wildcard relay that forwards any method/sub-path to the upstream API
//! - Server-side credential injection (the token never reaches clients)
//! - Permissive CORS for browser clients
//!
//! The relay is deliberately dumb: upstream responses, including errors,
//! are mirrored verbatim. Retry policy belongs to the caller, which can
//! tell a rejected submission apart from a failed generation.

pub mod config;
pub mod error;
pub mod middleware;
pub mod relay;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use routes::create_router;
pub use state::AppState;
