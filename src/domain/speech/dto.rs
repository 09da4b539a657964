use serde::{Deserialize, Serialize};

pub const MIN_SPEED: f64 = 0.25;
pub const MAX_SPEED: f64 = 4.0;

fn default_speed() -> f64 {
    1.0
}

fn default_noise_scale() -> f64 {
    0.667
}

fn default_noise_scale_w() -> f64 {
    0.8
}

/// Text to synthesize: a single string or a list of segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpeechInput {
    Text(String),
    Segments(Vec<String>),
}

impl SpeechInput {
    /// Segments are joined with newlines into a single blob
    pub fn joined(&self) -> String {
        match self {
            SpeechInput::Text(text) => text.clone(),
            SpeechInput::Segments(segments) => segments.join("\n"),
        }
    }
}

/// Request for POST /v1/audio/speech
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub model: String,
    pub input: SpeechInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(
        default,
        alias = "responseFormat",
        skip_serializing_if = "Option::is_none"
    )]
    pub response_format: Option<String>,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_noise_scale", alias = "noiseScale")]
    pub noise_scale: f64,
    #[serde(default = "default_noise_scale_w", alias = "noiseScaleW")]
    pub noise_scale_w: f64,
    #[serde(
        default,
        alias = "lengthScale",
        skip_serializing_if = "Option::is_none"
    )]
    pub length_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<u32>,
}

impl SpeechRequest {
    /// `voice` when non-empty, otherwise `model`
    pub fn effective_voice(&self) -> &str {
        match self.voice.as_deref() {
            Some(voice) if !voice.trim().is_empty() => voice.trim(),
            _ => self.model.trim(),
        }
    }

    /// `format` wins over the legacy `response_format`
    pub fn effective_format(&self) -> Option<&str> {
        self.format
            .as_deref()
            .or(self.response_format.as_deref())
    }
}
