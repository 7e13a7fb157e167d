//! Local job lifecycle state.
//!
//! The orchestrator owns exactly one live job. Its phase moves
//! `Idle -> Submitting -> Polling -> {Succeeded, Failed}`; an upstream
//! `canceled` surfaces as `Failed` with the status as the reason.

use serde::{Deserialize, Serialize};
use std::fmt;

use reelgen_models::PredictionStatus;

/// Orchestrator-side phase of the active job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobPhase {
    /// No job submitted yet
    #[default]
    Idle,
    /// Submission request in flight
    Submitting,
    /// Waiting on the upstream prediction
    Polling,
    /// Terminal: media resolved
    Succeeded,
    /// Terminal: submission rejected, generation failed or output missing
    Failed,
}

impl JobPhase {
    /// Get string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobPhase::Idle => "idle",
            JobPhase::Submitting => "submitting",
            JobPhase::Polling => "polling",
            JobPhase::Succeeded => "succeeded",
            JobPhase::Failed => "failed",
        }
    }

    /// Check if a job is in flight.
    pub fn is_active(&self) -> bool {
        matches!(self, JobPhase::Submitting | JobPhase::Polling)
    }

    /// Check if this is a terminal phase (only a new submission leaves it).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobPhase::Succeeded | JobPhase::Failed)
    }
}

impl fmt::Display for JobPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of the active job, suitable for driving a status display.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JobState {
    /// Current phase
    pub phase: JobPhase,
    /// Upstream-assigned prediction id, once submitted
    pub prediction_id: Option<String>,
    /// Last status observed from the upstream
    pub status: Option<PredictionStatus>,
    /// Resolved media URL, once succeeded
    pub media_url: Option<String>,
    /// Failure reason, once failed
    pub error: Option<String>,
}

impl JobState {
    /// Reset to a fresh submission, discarding any prior job's outcome.
    pub fn begin(&mut self) {
        *self = JobState {
            phase: JobPhase::Submitting,
            ..JobState::default()
        };
    }

    /// Record the submission response.
    pub fn submitted(&mut self, prediction_id: impl Into<String>, status: PredictionStatus) {
        self.phase = JobPhase::Polling;
        self.prediction_id = Some(prediction_id.into());
        self.status = Some(status);
    }

    /// Record a poll observation.
    pub fn observed(&mut self, status: PredictionStatus) {
        self.status = Some(status);
    }

    /// Mark the job succeeded with its resolved media URL.
    pub fn succeed(&mut self, media_url: impl Into<String>) {
        self.phase = JobPhase::Succeeded;
        self.media_url = Some(media_url.into());
        self.error = None;
    }

    /// Mark the job failed with a reason.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.phase = JobPhase::Failed;
        self.error = Some(error.into());
    }
}
