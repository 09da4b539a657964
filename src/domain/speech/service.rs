use super::dto::{SpeechRequest, MAX_SPEED, MIN_SPEED};
use super::error::SpeechServiceError;
use super::format::{AudioFormat, ConversionPlan, FormatConverter};
use super::synthesis::SynthesisParams;
use super::temp_files::TempAudioFiles;
use super::voice::VoiceId;
use crate::infrastructure::repositories::{SynthesisRepository, VoiceRepository};
use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Audio ready to be streamed back to the caller.
///
/// Owns the request's temporary files; dropping it deletes them.
#[derive(Debug)]
pub struct SynthesizedSpeech {
    pub path: PathBuf,
    pub media_type: &'static str,
    pub voice: VoiceId,
    pub temp_files: TempAudioFiles,
}

/// A request that passed validation
#[derive(Debug, Clone)]
pub struct SpeechJob {
    pub voice: VoiceId,
    pub text: String,
    pub format: Option<String>,
    pub params: SynthesisParams,
}

impl SpeechJob {
    pub fn from_request(request: &SpeechRequest) -> Result<Self, SpeechServiceError> {
        let raw_voice = request.effective_voice();
        if raw_voice.is_empty() {
            return Err(SpeechServiceError::Invalid(
                "`voice` or `model` must be provided.".to_string(),
            ));
        }
        let voice = VoiceId::parse(raw_voice).map_err(SpeechServiceError::Invalid)?;

        let text = request.input.joined();
        if text.is_empty() {
            return Err(SpeechServiceError::Invalid(
                "`input` text must not be empty.".to_string(),
            ));
        }

        if !(MIN_SPEED..=MAX_SPEED).contains(&request.speed) {
            return Err(SpeechServiceError::Invalid(format!(
                "`speed` must be between {} and {}.",
                MIN_SPEED, MAX_SPEED
            )));
        }

        // Checked up front; the actual conversion happens after synthesis
        let format = request.effective_format().map(str::to_string);
        AudioFormat::parse(format.as_deref())?;

        Ok(Self {
            voice,
            text,
            format,
            params: SynthesisParams::from_request(request),
        })
    }
}

pub struct SpeechService {
    voice_repo: Arc<dyn VoiceRepository>,
    synthesis_repo: Arc<dyn SynthesisRepository>,
    converter: FormatConverter,
    temp_dir: PathBuf,
}

impl SpeechService {
    pub fn new(
        voice_repo: Arc<dyn VoiceRepository>,
        synthesis_repo: Arc<dyn SynthesisRepository>,
        converter: FormatConverter,
        temp_dir: PathBuf,
    ) -> Self {
        Self {
            voice_repo,
            synthesis_repo,
            converter,
            temp_dir,
        }
    }

    /// Engine run plus format conversion; every file produced is registered in `temp_files`
    async fn render(
        &self,
        job: &SpeechJob,
        model_path: &Path,
        temp_files: &mut TempAudioFiles,
    ) -> Result<ConversionPlan, SpeechServiceError> {
        let wav_path = TempAudioFiles::wav_path(&self.temp_dir);
        temp_files.register(wav_path.clone());

        self.synthesis_repo
            .synthesize(model_path, &job.params, &job.text, &wav_path)
            .await
            .map_err(|e| {
                tracing::error!(
                    voice = %job.voice,
                    exit_code = ?e.exit_code(),
                    error = %e,
                    "Piper synthesis failed"
                );
                SpeechServiceError::Synthesis(e)
            })?;

        let plan = self
            .converter
            .plan_conversion(&wav_path, job.format.as_deref())
            .await?;
        for path in &plan.cleanup {
            temp_files.register(path.clone());
        }

        Ok(plan)
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Run the speech pipeline for one request
    ///
    /// This operation:
    /// - Validates voice, input, speed and format
    /// - Makes sure the voice model is on disk (downloading it if needed)
    /// - Runs the engine into a temporary WAV file
    /// - Converts to the requested format
    ///
    /// Temporary files created on the way are removed on every error path; on
    /// success they travel with the returned value.
    async fn synthesize(
        &self,
        request: SpeechRequest,
    ) -> Result<SynthesizedSpeech, SpeechServiceError>;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn synthesize(
        &self,
        request: SpeechRequest,
    ) -> Result<SynthesizedSpeech, SpeechServiceError> {
        let start_time = std::time::Instant::now();

        let job = SpeechJob::from_request(&request)?;

        tracing::info!(
            voice = %job.voice,
            format = job.format.as_deref().unwrap_or("wav"),
            text_length = job.text.len(),
            length_scale = job.params.length_scale,
            speaker = ?job.params.speaker,
            "Speech synthesis request"
        );

        if !self.voice_repo.ensure_available(&job.voice).await {
            return Err(SpeechServiceError::VoiceNotFound(job.voice.to_string()));
        }
        let voice_paths = self.voice_repo.paths(&job.voice);

        tokio::fs::create_dir_all(&self.temp_dir)
            .await
            .with_context(|| format!("creating temp dir {}", self.temp_dir.display()))?;

        let mut temp_files = TempAudioFiles::new();
        let plan = match self.render(&job, &voice_paths.model, &mut temp_files).await {
            Ok(plan) => plan,
            Err(e) => {
                temp_files.remove_all().await;
                return Err(e);
            }
        };

        tracing::info!(
            voice = %job.voice,
            media_type = plan.media_type,
            latency_ms = start_time.elapsed().as_millis(),
            "Speech synthesized"
        );

        Ok(SynthesizedSpeech {
            path: plan.path,
            media_type: plan.media_type,
            voice: job.voice,
            temp_files,
        })
    }
}
