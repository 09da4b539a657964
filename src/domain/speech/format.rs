use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::FormatError;
use crate::infrastructure::repositories::TranscoderRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
}

impl AudioFormat {
    /// Case-insensitive; absent means WAV
    pub fn parse(requested: Option<&str>) -> Result<Self, FormatError> {
        let Some(raw) = requested else {
            return Ok(AudioFormat::Wav);
        };

        match raw.trim().to_lowercase().as_str() {
            "" | "wav" => Ok(AudioFormat::Wav),
            "mp3" => Ok(AudioFormat::Mp3),
            _ => Err(FormatError::Unsupported(raw.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Result of [`FormatConverter::plan_conversion`]
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionPlan {
    pub path: PathBuf,
    pub media_type: &'static str,
    /// Files created by the conversion that the caller must remove
    pub cleanup: Vec<PathBuf>,
}

pub struct FormatConverter {
    transcoder: Arc<dyn TranscoderRepository>,
}

impl FormatConverter {
    pub fn new(transcoder: Arc<dyn TranscoderRepository>) -> Self {
        Self { transcoder }
    }

    /// Turn the synthesized WAV into the requested format.
    ///
    /// Unknown formats are rejected before anything touches the filesystem. WAV is a
    /// no-op; MP3 produces a sibling file with the extension swapped.
    pub async fn plan_conversion(
        &self,
        wav_path: &Path,
        requested: Option<&str>,
    ) -> Result<ConversionPlan, FormatError> {
        let format = AudioFormat::parse(requested)?;

        if format == AudioFormat::Wav {
            return Ok(ConversionPlan {
                path: wav_path.to_path_buf(),
                media_type: format.media_type(),
                cleanup: Vec::new(),
            });
        }

        let output = wav_path.with_extension(format.extension());
        tracing::debug!(
            input = %wav_path.display(),
            output = %output.display(),
            format = %format,
            "Transcoding synthesized audio"
        );

        if let Err(e) = self.transcoder.transcode(wav_path, format, &output).await {
            // The transcoder may have left a partial file behind
            if let Err(remove_err) = tokio::fs::remove_file(&output).await {
                if remove_err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        path = %output.display(),
                        error = %remove_err,
                        "Failed to remove partial transcoder output"
                    );
                }
            }
            return Err(FormatError::Transcoder(e));
        }

        Ok(ConversionPlan {
            path: output.clone(),
            media_type: format.media_type(),
            cleanup: vec![output],
        })
    }
}
