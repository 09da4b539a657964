use async_trait::async_trait;
use parking_lot::Mutex;
use piper_openai_tts::domain::speech::{AudioFormat, ProcessError, SynthesisParams};
use piper_openai_tts::infrastructure::repositories::{SynthesisRepository, TranscoderRepository};
use std::path::Path;

pub const FAKE_WAV: &[u8] = b"FAKEAUDIO";
pub const FAKE_MP3: &[u8] = b"FAKEMP3";

/// One engine invocation as the real Piper would have seen it
#[derive(Debug, Clone)]
pub struct EngineCall {
    pub args: Vec<String>,
    pub text: String,
}

impl EngineCall {
    pub fn arg(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

/// Writes fixed bytes instead of running Piper
#[derive(Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<EngineCall>>,
    fail_with: Mutex<Option<i32>>,
}

#[allow(dead_code)]
impl RecordingEngine {
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    pub fn fail_with(&self, exit_code: i32) {
        *self.fail_with.lock() = Some(exit_code);
    }
}

#[async_trait]
impl SynthesisRepository for RecordingEngine {
    async fn synthesize(
        &self,
        model_path: &Path,
        params: &SynthesisParams,
        text: &str,
        output_path: &Path,
    ) -> Result<(), ProcessError> {
        self.calls.lock().push(EngineCall {
            args: params.engine_args(model_path, output_path),
            text: text.to_string(),
        });

        tokio::fs::write(output_path, FAKE_WAV)
            .await
            .map_err(|source| ProcessError::Io {
                program: "piper".into(),
                source,
            })?;

        let fail_with = *self.fail_with.lock();
        match fail_with {
            Some(code) => Err(ProcessError::Exited {
                program: "piper".into(),
                code: Some(code),
                stderr: "Unable to load voice model".into(),
            }),
            None => Ok(()),
        }
    }
}

/// Writes fixed bytes instead of running ffmpeg
#[derive(Default)]
pub struct RecordingTranscoder {
    formats: Mutex<Vec<AudioFormat>>,
    fail: Mutex<bool>,
}

#[allow(dead_code)]
impl RecordingTranscoder {
    pub fn formats(&self) -> Vec<AudioFormat> {
        self.formats.lock().clone()
    }

    pub fn fail(&self) {
        *self.fail.lock() = true;
    }
}

#[async_trait]
impl TranscoderRepository for RecordingTranscoder {
    async fn transcode(
        &self,
        _input: &Path,
        format: AudioFormat,
        output: &Path,
    ) -> Result<(), ProcessError> {
        self.formats.lock().push(format);

        tokio::fs::write(output, FAKE_MP3)
            .await
            .map_err(|source| ProcessError::Io {
                program: "ffmpeg".into(),
                source,
            })?;

        if *self.fail.lock() {
            return Err(ProcessError::Exited {
                program: "ffmpeg".into(),
                code: Some(1),
                stderr: "Unknown encoder 'libmp3lame'".into(),
            });
        }
        Ok(())
    }
}
