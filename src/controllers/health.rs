use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::config::Config;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Ready once the voice storage root exists as a directory. Read-only.
pub async fn health_ready(State(config): State<Arc<Config>>) -> impl IntoResponse {
    let storage = match tokio::fs::try_exists(&config.data_dir).await {
        Ok(true) => tokio::fs::metadata(&config.data_dir)
            .await
            .and_then(|meta| {
                if meta.is_dir() {
                    Ok(())
                } else {
                    Err(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        "not a directory",
                    ))
                }
            }),
        Ok(false) => Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "does not exist",
        )),
        Err(e) => Err(e),
    };

    match storage {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "storage": "available",
                "tts": &config.piper_bin,
            })),
        ),
        Err(e) => {
            tracing::warn!(
                data_dir = %config.data_dir.display(),
                error = %e,
                "Voice storage unavailable"
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "storage": "unavailable",
                    "tts": &config.piper_bin,
                })),
            )
        }
    }
}
