use super::synthesis_repository::SynthesisRepository;
use crate::domain::speech::{ProcessError, SynthesisParams};
use crate::infrastructure::process;
use async_trait::async_trait;
use std::path::Path;

/// Piper CLI implementation of the synthesis repository
pub struct PiperSynthesisRepository {
    piper_bin: String,
}

impl PiperSynthesisRepository {
    pub fn new(piper_bin: String) -> Self {
        Self { piper_bin }
    }
}

#[async_trait]
impl SynthesisRepository for PiperSynthesisRepository {
    async fn synthesize(
        &self,
        model_path: &Path,
        params: &SynthesisParams,
        text: &str,
        output_path: &Path,
    ) -> Result<(), ProcessError> {
        let start_time = std::time::Instant::now();
        let args = params.engine_args(model_path, output_path);

        tracing::info!(
            piper = %self.piper_bin,
            model = %model_path.display(),
            output = %output_path.display(),
            text_length = text.len(),
            "Running Piper"
        );

        process::run(&self.piper_bin, &args, Some(text)).await?;

        tracing::info!(
            provider = "piper",
            model = %model_path.display(),
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            "TTS synthesis completed"
        );

        Ok(())
    }
}
