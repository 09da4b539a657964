use std::path::Path;

use super::dto::SpeechRequest;

/// Lower bound applied to speed when deriving the length scale
const MIN_SPEED_FOR_LENGTH_SCALE: f64 = 0.1;

/// Engine prosody parameters for one request
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisParams {
    pub length_scale: f64,
    pub noise_scale: f64,
    pub noise_scale_w: f64,
    pub speaker: Option<u32>,
}

impl SynthesisParams {
    pub fn from_request(request: &SpeechRequest) -> Self {
        Self {
            length_scale: length_scale(request.speed, request.length_scale),
            noise_scale: request.noise_scale,
            noise_scale_w: request.noise_scale_w,
            speaker: request.speaker,
        }
    }

    /// Piper command line; the text itself goes through stdin
    pub fn engine_args(&self, model_path: &Path, output_path: &Path) -> Vec<String> {
        let mut args = vec![
            "--model".to_string(),
            model_path.display().to_string(),
            "--output_file".to_string(),
            output_path.display().to_string(),
            "--length-scale".to_string(),
            self.length_scale.to_string(),
            "--noise-scale".to_string(),
            self.noise_scale.to_string(),
            "--noise-w".to_string(),
            self.noise_scale_w.to_string(),
        ];

        if let Some(speaker) = self.speaker {
            args.push("--speaker".to_string());
            args.push(speaker.to_string());
        }

        args
    }
}

/// Explicit length scale wins; otherwise `1 / max(0.1, speed)`
pub fn length_scale(speed: f64, explicit: Option<f64>) -> f64 {
    match explicit {
        Some(length_scale) => length_scale,
        None => 1.0 / speed.max(MIN_SPEED_FOR_LENGTH_SCALE),
    }
}
