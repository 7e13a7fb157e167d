//! The closed set of supported video-generation models.
//!
//! All model-specific behavior lives here: wire identifiers, submission
//! endpoints, pinned versions and payload construction. Callers select a
//! model by tag and never branch on identifier strings themselves.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::tuning::{TuningOptions, GUIDANCE_MAX, GUIDANCE_MIN};

/// Pinned version hash for the LTX-Video community model.
const LTX_VIDEO_VERSION: &str =
    "8c47da666861d081eeb4d1261853087de23923a268a69b63febdf5dc1dee08e4";

/// Negative prompt applied to LTX-Video runs.
const LTX_NEGATIVE_PROMPT: &str =
    "low quality, worst quality, deformed, distorted, watermark";

/// Available video-generation models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum VideoModel {
    /// Lightricks LTX-Video, pinned to a community version
    #[serde(rename = "ltx-video")]
    LtxVideo,
    /// MiniMax video-01 (Hailuo)
    #[serde(rename = "minimax-video-01")]
    MinimaxVideo01,
    /// Tencent HunyuanVideo
    #[serde(rename = "hunyuan-video")]
    HunyuanVideo,
}

impl VideoModel {
    /// All supported models.
    pub const ALL: &'static [VideoModel] = &[
        VideoModel::LtxVideo,
        VideoModel::MinimaxVideo01,
        VideoModel::HunyuanVideo,
    ];

    /// Resolve a wire identifier to a model.
    pub fn resolve(id: &str) -> Result<Self, UnknownModelError> {
        id.parse()
    }

    /// Wire identifier.
    pub fn id(&self) -> &'static str {
        match self {
            VideoModel::LtxVideo => "ltx-video",
            VideoModel::MinimaxVideo01 => "minimax-video-01",
            VideoModel::HunyuanVideo => "hunyuan-video",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            VideoModel::LtxVideo => "LTX-Video",
            VideoModel::MinimaxVideo01 => "MiniMax Video-01",
            VideoModel::HunyuanVideo => "HunyuanVideo",
        }
    }

    /// Pinned version hash, for models submitted through the generic
    /// predictions endpoint.
    pub fn version(&self) -> Option<&'static str> {
        match self {
            VideoModel::LtxVideo => Some(LTX_VIDEO_VERSION),
            VideoModel::MinimaxVideo01 | VideoModel::HunyuanVideo => None,
        }
    }

    /// Submission endpoint path relative to the upstream API base.
    ///
    /// Version-pinned models go through `/predictions`; official models
    /// through their model-scoped predictions endpoint.
    pub fn submit_path(&self) -> &'static str {
        match self {
            VideoModel::LtxVideo => "/predictions",
            VideoModel::MinimaxVideo01 => "/models/minimax/video-01/predictions",
            VideoModel::HunyuanVideo => "/models/tencent/hunyuan-video/predictions",
        }
    }

    /// Default guidance scale, for models that honor one.
    pub fn default_guidance(&self) -> Option<f64> {
        match self {
            VideoModel::LtxVideo => Some(3.0),
            VideoModel::MinimaxVideo01 => None,
            VideoModel::HunyuanVideo => Some(6.0),
        }
    }

    /// Whether the model honors a guidance-scale override.
    pub fn supports_guidance_scale(&self) -> bool {
        self.default_guidance().is_some()
    }

    /// Whether the model honors the prompt-enhancement flag.
    pub fn supports_prompt_enhancement(&self) -> bool {
        matches!(self, VideoModel::MinimaxVideo01)
    }

    /// Build the submission request body for this model.
    ///
    /// Pure: the prompt passes through verbatim, tuning fields the model
    /// does not honor are omitted, and guidance falls back to the model
    /// default when unset.
    pub fn build_payload(&self, prompt: &str, options: &TuningOptions) -> Value {
        let guidance = || {
            options
                .guidance_scale
                .or_else(|| self.default_guidance())
                .map(|g| g.clamp(GUIDANCE_MIN, GUIDANCE_MAX))
        };

        match self {
            VideoModel::LtxVideo => {
                let input = LtxVideoInput {
                    prompt: prompt.to_string(),
                    negative_prompt: LTX_NEGATIVE_PROMPT.to_string(),
                    aspect_ratio: "16:9".to_string(),
                    guidance_scale: guidance(),
                };
                json!({ "version": LTX_VIDEO_VERSION, "input": input })
            }
            VideoModel::MinimaxVideo01 => {
                let input = MinimaxVideoInput {
                    prompt: prompt.to_string(),
                    prompt_optimizer: options.prompt_enhancement,
                };
                json!({ "input": input })
            }
            VideoModel::HunyuanVideo => {
                let input = HunyuanVideoInput {
                    prompt: prompt.to_string(),
                    embedded_guidance_scale: guidance(),
                };
                json!({ "input": input })
            }
        }
    }
}

impl fmt::Display for VideoModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for VideoModel {
    type Err = UnknownModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ltx-video" => Ok(VideoModel::LtxVideo),
            "minimax-video-01" => Ok(VideoModel::MinimaxVideo01),
            "hunyuan-video" => Ok(VideoModel::HunyuanVideo),
            _ => Err(UnknownModelError(s.to_string())),
        }
    }
}

/// Unknown model identifier.
#[derive(Debug, Clone, Error)]
#[error("unknown model: {0}")]
pub struct UnknownModelError(pub String);

/// LTX-Video input fields.
#[derive(Debug, Clone, Serialize)]
struct LtxVideoInput {
    prompt: String,
    negative_prompt: String,
    aspect_ratio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    guidance_scale: Option<f64>,
}

/// MiniMax video-01 input fields.
#[derive(Debug, Clone, Serialize)]
struct MinimaxVideoInput {
    prompt: String,
    prompt_optimizer: bool,
}

/// HunyuanVideo input fields.
#[derive(Debug, Clone, Serialize)]
struct HunyuanVideoInput {
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    embedded_guidance_scale: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_ids() {
        assert_eq!(VideoModel::resolve("ltx-video").unwrap(), VideoModel::LtxVideo);
        assert_eq!(
            VideoModel::resolve("minimax-video-01").unwrap(),
            VideoModel::MinimaxVideo01
        );
        assert_eq!(
            VideoModel::resolve("hunyuan-video").unwrap(),
            VideoModel::HunyuanVideo
        );
    }

    #[test]
    fn test_wire_identifiers_match_serde() {
        for model in VideoModel::ALL {
            assert_eq!(serde_json::to_value(model).unwrap(), model.id());
        }
    }

    #[test]
    fn test_resolve_unknown_id() {
        let err = VideoModel::resolve("sora").unwrap_err();
        assert_eq!(err.to_string(), "unknown model: sora");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        for model in VideoModel::ALL {
            let a = VideoModel::resolve(model.id()).unwrap();
            let b = VideoModel::resolve(model.id()).unwrap();
            assert_eq!(a, b);
            assert_eq!(a.submit_path(), b.submit_path());
            assert_eq!(a.version(), b.version());
            assert_eq!(a.default_guidance(), b.default_guidance());
        }
    }

    #[test]
    fn test_payload_carries_prompt_verbatim() {
        let prompt = "a cat riding a bicycle, 35mm film";
        for model in VideoModel::ALL {
            let payload = model.build_payload(prompt, &TuningOptions::new());
            assert_eq!(payload["input"]["prompt"], prompt, "model {}", model);
        }
    }

    #[test]
    fn test_payload_omits_unsupported_fields() {
        let opts = TuningOptions::new()
            .with_guidance(4.0)
            .with_prompt_enhancement(true);

        for model in VideoModel::ALL {
            let input = &model.build_payload("a prompt", &opts)["input"];
            if !model.supports_prompt_enhancement() {
                assert!(input.get("prompt_optimizer").is_none(), "model {}", model);
            }
            if !model.supports_guidance_scale() {
                assert!(input.get("guidance_scale").is_none(), "model {}", model);
                assert!(input.get("embedded_guidance_scale").is_none(), "model {}", model);
            }
        }
    }

    #[test]
    fn test_payload_guidance_defaults_and_overrides() {
        let ltx = VideoModel::LtxVideo;
        let defaulted = ltx.build_payload("p", &TuningOptions::new());
        assert_eq!(defaulted["input"]["guidance_scale"], 3.0);

        let overridden = ltx.build_payload("p", &TuningOptions::new().with_guidance(5.5));
        assert_eq!(overridden["input"]["guidance_scale"], 5.5);

        let hunyuan = VideoModel::HunyuanVideo.build_payload("p", &TuningOptions::new());
        assert_eq!(hunyuan["input"]["embedded_guidance_scale"], 6.0);
    }

    #[test]
    fn test_version_pinned_payload_shape() {
        let payload = VideoModel::LtxVideo.build_payload("p", &TuningOptions::new());
        assert_eq!(payload["version"], LTX_VIDEO_VERSION);

        let payload = VideoModel::MinimaxVideo01.build_payload("p", &TuningOptions::new());
        assert!(payload.get("version").is_none());
    }

    #[test]
    fn test_prompt_optimizer_follows_option() {
        let on = VideoModel::MinimaxVideo01
            .build_payload("p", &TuningOptions::new().with_prompt_enhancement(true));
        assert_eq!(on["input"]["prompt_optimizer"], true);

        let off = VideoModel::MinimaxVideo01.build_payload("p", &TuningOptions::new());
        assert_eq!(off["input"]["prompt_optimizer"], false);
    }
}
