//! Job orchestrator for asynchronous video generation.
//!
//! This crate drives one generation job at a time: it submits a prompt to a
//! model's predictions endpoint (through the gateway), polls the prediction
//! at a fixed interval until it reaches a terminal status, and resolves the
//! output media URL. A generation counter guards shared job state against
//! stale poll loops once a newer submission has taken over.

pub mod download;
pub mod error;
pub mod generator;
pub mod job;

pub use download::download_to;
pub use error::{ClientError, ClientResult};
pub use generator::{ClientConfig, GenerationOutcome, Generator};
pub use job::{JobPhase, JobState};
