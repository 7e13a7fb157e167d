//! Shared data models for the Reelgen backend.
//!
//! This crate provides Serde-serializable types for:
//! - The closed set of supported video-generation models
//! - Per-model request payload construction
//! - Generation tuning options
//! - Prediction lifecycle types and status vocabulary

pub mod model;
pub mod prediction;
pub mod tuning;

// Re-export common types
pub use model::{UnknownModelError, VideoModel};
pub use prediction::{ErrorDetail, Prediction, PredictionOutput, PredictionStatus};
pub use tuning::TuningOptions;
