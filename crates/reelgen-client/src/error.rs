//! Orchestrator error types.
//!
//! Every variant renders as a single human-readable message. None of these
//! are retried and none are sticky: a new generation attempt is always
//! permitted after a failure.

use thiserror::Error;

use reelgen_models::UnknownModelError;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected before any network call is made.
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error(transparent)]
    UnknownModel(#[from] UnknownModelError),

    /// Non-success HTTP status from the upstream API, at submission or
    /// poll time. Carries the upstream detail message when one is present.
    #[error("{0}")]
    UpstreamRejection(String),

    /// The prediction itself finished as failed or canceled.
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    /// Succeeded status with no usable output.
    #[error("prediction succeeded but returned no output")]
    MalformedResult,

    /// Poll cap exceeded (only with a configured maximum).
    #[error("prediction did not finish within {0} polls")]
    PollTimeout(u32),

    /// A newer generation request took over; this loop's outcome was
    /// discarded without touching shared state.
    #[error("superseded by a newer generation request")]
    Superseded,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn rejection(msg: impl Into<String>) -> Self {
        Self::UpstreamRejection(msg.into())
    }

    pub fn generation_failed(msg: impl Into<String>) -> Self {
        Self::GenerationFailed(msg.into())
    }
}
