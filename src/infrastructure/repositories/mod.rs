pub mod ffmpeg_transcoder_repository;
pub mod huggingface_voice_repository;
pub mod piper_synthesis_repository;
pub mod synthesis_repository;
pub mod transcoder_repository;
pub mod voice_repository;

pub use ffmpeg_transcoder_repository::FfmpegTranscoderRepository;
pub use huggingface_voice_repository::HuggingFaceVoiceRepository;
pub use piper_synthesis_repository::PiperSynthesisRepository;
pub use synthesis_repository::SynthesisRepository;
pub use transcoder_repository::TranscoderRepository;
pub use voice_repository::VoiceRepository;
