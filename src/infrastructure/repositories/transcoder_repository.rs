use crate::domain::speech::{AudioFormat, ProcessError};
use async_trait::async_trait;
use std::path::Path;

/// Repository for WAV to compressed-audio conversion.
#[async_trait]
pub trait TranscoderRepository: Send + Sync {
    async fn transcode(
        &self,
        input: &Path,
        format: AudioFormat,
        output: &Path,
    ) -> Result<(), ProcessError>;
}
