use crate::domain::speech::{ProcessError, SynthesisParams};
use async_trait::async_trait;
use std::path::Path;

/// Repository for the text-to-speech engine.
#[async_trait]
pub trait SynthesisRepository: Send + Sync {
    /// Synthesize `text` with the given model into a WAV file at `output_path`
    ///
    /// # Errors
    /// Returns the engine's exit status and stderr when it fails
    async fn synthesize(
        &self,
        model_path: &Path,
        params: &SynthesisParams,
        text: &str,
        output_path: &Path,
    ) -> Result<(), ProcessError>;
}
