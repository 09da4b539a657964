use crate::error::AppError;

fn describe_exit(code: &Option<i32>, stderr: &str) -> String {
    let status = match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    };
    match stderr.trim() {
        "" => status,
        stderr => format!("{}: {}", status, stderr),
    }
}

/// Failure of an external process (engine or transcoder)
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error while talking to {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// Message omits `program`; the wrapping error names the tool
    #[error("{}", describe_exit(.code, .stderr))]
    Exited {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl ProcessError {
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ProcessError::Exited { code, .. } => *code,
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Unsupported format '{0}'. Supported formats: wav, mp3.")]
    Unsupported(String),
    #[error(transparent)]
    Transcoder(#[from] ProcessError),
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("{0}")]
    Invalid(String),
    #[error("Voice '{0}' not found.")]
    VoiceNotFound(String),
    #[error("Piper failed: {0}")]
    Synthesis(ProcessError),
    #[error("Audio conversion failed: {0}")]
    Conversion(ProcessError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<FormatError> for SpeechServiceError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::Unsupported(_) => SpeechServiceError::Invalid(err.to_string()),
            FormatError::Transcoder(e) => SpeechServiceError::Conversion(e),
        }
    }
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::Invalid(msg) => AppError::BadRequest(msg),
            SpeechServiceError::VoiceNotFound(_) => AppError::NotFound(err.to_string()),
            SpeechServiceError::Synthesis(_) | SpeechServiceError::Conversion(_) => {
                AppError::ExternalService(err.to_string())
            }
            SpeechServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
