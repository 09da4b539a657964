use super::transcoder_repository::TranscoderRepository;
use crate::domain::speech::{AudioFormat, ProcessError};
use crate::infrastructure::process;
use async_trait::async_trait;
use std::path::Path;

/// LAME VBR quality scale (0 = best, 9 = worst)
const MP3_QUALITY: &str = "2";

/// ffmpeg implementation of the transcoder repository
pub struct FfmpegTranscoderRepository {
    ffmpeg_bin: String,
}

impl FfmpegTranscoderRepository {
    pub fn new(ffmpeg_bin: String) -> Self {
        Self { ffmpeg_bin }
    }

    fn args(input: &Path, format: AudioFormat, output: &Path) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(),
            "-i".to_string(),
            input.display().to_string(),
        ];

        if format == AudioFormat::Mp3 {
            args.extend([
                "-codec:a".to_string(),
                "libmp3lame".to_string(),
                "-qscale:a".to_string(),
                MP3_QUALITY.to_string(),
            ]);
        }

        args.push(output.display().to_string());
        args
    }
}

#[async_trait]
impl TranscoderRepository for FfmpegTranscoderRepository {
    async fn transcode(
        &self,
        input: &Path,
        format: AudioFormat,
        output: &Path,
    ) -> Result<(), ProcessError> {
        let args = Self::args(input, format, output);

        tracing::debug!(
            ffmpeg = %self.ffmpeg_bin,
            input = %input.display(),
            output = %output.display(),
            format = %format,
            "Running ffmpeg"
        );

        process::run(&self.ffmpeg_bin, &args, None).await
    }
}
