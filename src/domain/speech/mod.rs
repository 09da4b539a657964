pub mod dto;
pub mod error;
pub mod format;
pub mod service;
pub mod synthesis;
pub mod temp_files;
pub mod voice;

pub use dto::{SpeechInput, SpeechRequest};
pub use error::{FormatError, ProcessError, SpeechServiceError};
pub use format::{AudioFormat, ConversionPlan, FormatConverter};
pub use service::{SpeechService, SpeechServiceApi, SynthesizedSpeech};
pub use synthesis::SynthesisParams;
pub use temp_files::TempAudioFiles;
pub use voice::{VoiceId, VoicePaths};
