//! Prediction lifecycle types.
//!
//! Mirrors the upstream prediction API: a submission returns an `id` and a
//! `status`, and polling the prediction returns the same shape with `output`
//! populated once the run has succeeded.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream prediction status.
///
/// The terminal statuses are `succeeded`, `failed` and `canceled`; anything
/// else (including vocabulary added upstream later) keeps the poll loop
/// running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStatus {
    /// Prediction accepted, waiting for hardware
    #[default]
    Starting,
    /// Model is running
    Processing,
    /// Finished with output
    Succeeded,
    /// Finished with an error
    Failed,
    /// Canceled before completion
    Canceled,
    /// Unrecognized status string; treated as non-terminal
    #[serde(other)]
    Unknown,
}

impl PredictionStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionStatus::Starting => "starting",
            PredictionStatus::Processing => "processing",
            PredictionStatus::Succeeded => "succeeded",
            PredictionStatus::Failed => "failed",
            PredictionStatus::Canceled => "canceled",
            PredictionStatus::Unknown => "unknown",
        }
    }

    /// Check if this is a terminal state (no more polling).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PredictionStatus::Succeeded | PredictionStatus::Failed | PredictionStatus::Canceled
        )
    }
}

impl fmt::Display for PredictionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of a succeeded prediction.
///
/// Video models return either a single media URL or a list of URLs; the
/// first element of a list is the one presented to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum PredictionOutput {
    /// A single media URL
    Single(String),
    /// A sequence of media URLs
    Many(Vec<String>),
}

impl PredictionOutput {
    /// Resolve the media URL to present: the single value, or the first
    /// element of a sequence. `None` for an empty sequence.
    pub fn media_url(&self) -> Option<&str> {
        match self {
            PredictionOutput::Single(url) => Some(url.as_str()),
            PredictionOutput::Many(urls) => urls.first().map(String::as_str),
        }
    }
}

/// A prediction as reported by the upstream API.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Prediction {
    /// Upstream-assigned identifier
    pub id: String,
    /// Current status
    pub status: PredictionStatus,
    /// Media output, present only once succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PredictionOutput>,
    /// Error message for failed predictions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Prediction {
    /// Check if the prediction has reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Resolved media URL, if any output is present.
    pub fn media_url(&self) -> Option<&str> {
        self.output.as_ref().and_then(PredictionOutput::media_url)
    }
}

/// Error body returned by the upstream API on rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ErrorDetail {
    /// Human-readable rejection reason
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_terminality() {
        assert!(!PredictionStatus::Starting.is_terminal());
        assert!(!PredictionStatus::Processing.is_terminal());
        assert!(!PredictionStatus::Unknown.is_terminal());
        assert!(PredictionStatus::Succeeded.is_terminal());
        assert!(PredictionStatus::Failed.is_terminal());
        assert!(PredictionStatus::Canceled.is_terminal());
    }

    #[test]
    fn test_unknown_status_is_non_terminal() {
        let prediction: Prediction =
            serde_json::from_str(r#"{"id":"p1","status":"preparing"}"#).unwrap();
        assert_eq!(prediction.status, PredictionStatus::Unknown);
        assert!(!prediction.is_terminal());
    }

    #[test]
    fn test_media_url_prefers_first_of_sequence() {
        let output = PredictionOutput::Many(vec![
            "https://cdn/a.mp4".to_string(),
            "https://cdn/b.mp4".to_string(),
        ]);
        assert_eq!(output.media_url(), Some("https://cdn/a.mp4"));

        let single = PredictionOutput::Single("https://cdn/x.mp4".to_string());
        assert_eq!(single.media_url(), Some("https://cdn/x.mp4"));

        let empty = PredictionOutput::Many(vec![]);
        assert_eq!(empty.media_url(), None);
    }

    #[test]
    fn test_prediction_output_shapes_deserialize() {
        let single: Prediction = serde_json::from_str(
            r#"{"id":"p1","status":"succeeded","output":"https://cdn/x.mp4"}"#,
        )
        .unwrap();
        assert_eq!(single.media_url(), Some("https://cdn/x.mp4"));

        let many: Prediction = serde_json::from_str(
            r#"{"id":"p2","status":"succeeded","output":["https://cdn/y.mp4"]}"#,
        )
        .unwrap();
        assert_eq!(many.media_url(), Some("https://cdn/y.mp4"));

        let none: Prediction =
            serde_json::from_str(r#"{"id":"p3","status":"succeeded"}"#).unwrap();
        assert_eq!(none.media_url(), None);
    }
}
