//! User-adjustable generation tuning options.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lowest accepted guidance scale.
pub const GUIDANCE_MIN: f64 = 1.0;
/// Highest accepted guidance scale.
pub const GUIDANCE_MAX: f64 = 10.0;

/// Tuning options applied to a generation request.
///
/// Each model honors a subset of these; fields a model does not support
/// are omitted from its payload rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct TuningOptions {
    /// Guidance scale override. Falls back to the model default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance_scale: Option<f64>,
    /// Ask the provider to rewrite the prompt before generation.
    #[serde(default)]
    pub prompt_enhancement: bool,
}

impl TuningOptions {
    /// Options with all fields at their defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the guidance scale, clamped to the accepted range.
    pub fn with_guidance(mut self, scale: f64) -> Self {
        self.guidance_scale = Some(scale.clamp(GUIDANCE_MIN, GUIDANCE_MAX));
        self
    }

    /// Enable or disable prompt enhancement.
    pub fn with_prompt_enhancement(mut self, enabled: bool) -> Self {
        self.prompt_enhancement = enabled;
        self
    }
}
