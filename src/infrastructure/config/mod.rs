use serde::Deserialize;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_VOICES_BASE_URL: &str =
    "https://huggingface.co/rhasspy/piper-voices/resolve/v1.0.0";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    /// Root directory holding `<voice>.onnx` and `<voice>.onnx.json`
    pub data_dir: PathBuf,
    /// Where per-request WAV/MP3 files are written
    pub temp_dir: PathBuf,
    pub voices_base_url: String,
    pub piper_bin: String,
    pub ffmpeg_bin: String,
    pub voice_download_lock: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/data")),
            temp_dir: env::var("TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
            voices_base_url: env::var("VOICES_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_VOICES_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            piper_bin: env::var("PIPER_BIN").unwrap_or_else(|_| "piper".to_string()),
            ffmpeg_bin: env::var("FFMPEG_BIN").unwrap_or_else(|_| "ffmpeg".to_string()),
            voice_download_lock: env::var("VOICE_DOWNLOAD_LOCK")
                .unwrap_or_else(|_| "true".to_string())
                .parse::<String>()
                .map(|s| s.to_lowercase() != "false")
                .unwrap_or(true),
        };

        Ok(config)
    }
}
