use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use piper_openai_tts::controllers::speech::SpeechController;
use piper_openai_tts::domain::speech::{FormatConverter, SpeechService};
use piper_openai_tts::infrastructure::config::{Config, LogFormat};
use piper_openai_tts::infrastructure::http::start_http_server;
use piper_openai_tts::infrastructure::repositories::{
    FfmpegTranscoderRepository, HuggingFaceVoiceRepository, PiperSynthesisRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Piper OpenAI TTS on {}:{}",
        config.host,
        config.port
    );
    tracing::info!(
        data_dir = %config.data_dir.display(),
        temp_dir = %config.temp_dir.display(),
        voices_base_url = %config.voices_base_url,
        piper = %config.piper_bin,
        ffmpeg = %config.ffmpeg_bin,
        voice_download_lock = config.voice_download_lock,
        "Configuration loaded"
    );

    tokio::fs::create_dir_all(&config.data_dir).await?;
    tokio::fs::create_dir_all(&config.temp_dir).await?;

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    tracing::info!("Instantiating repositories...");
    let voice_repo = Arc::new(HuggingFaceVoiceRepository::new(
        config.data_dir.clone(),
        config.voices_base_url.clone(),
        config.voice_download_lock,
    ));
    let synthesis_repo = Arc::new(PiperSynthesisRepository::new(config.piper_bin.clone()));
    let transcoder_repo = Arc::new(FfmpegTranscoderRepository::new(config.ffmpeg_bin.clone()));

    // 2. Instantiate services
    tracing::info!("Instantiating services...");
    let speech_service = Arc::new(SpeechService::new(
        voice_repo,
        synthesis_repo,
        FormatConverter::new(transcoder_repo),
        config.temp_dir.clone(),
    ));

    // 3. Instantiate controllers
    tracing::info!("Instantiating controllers...");
    let speech_controller = Arc::new(SpeechController::new(speech_service));

    start_http_server(config, speech_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "piper_openai_tts=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "piper_openai_tts=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
