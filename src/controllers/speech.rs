use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use futures::Stream;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

use crate::{
    domain::speech::{SpeechRequest, SpeechServiceApi, SynthesizedSpeech},
    error::{AppError, AppResult},
};

/// Bytes read from disk per response chunk
pub const STREAM_CHUNK_SIZE: usize = 8192;

pub struct SpeechController {
    speech_service: Arc<dyn SpeechServiceApi>,
}

impl SpeechController {
    pub fn new(speech_service: Arc<dyn SpeechServiceApi>) -> Self {
        Self { speech_service }
    }

    /// POST /v1/audio/speech - OpenAI-compatible speech synthesis
    pub async fn create_speech(
        State(controller): State<Arc<SpeechController>>,
        Json(request): Json<SpeechRequest>,
    ) -> AppResult<Response> {
        let speech = controller.speech_service.synthesize(request).await?;

        let file = tokio::fs::File::open(&speech.path).await.map_err(|e| {
            AppError::Internal(format!("Failed to open synthesized audio: {}", e))
        })?;

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, speech.media_type)
            .body(Body::from_stream(audio_stream(file, speech)))
            .map_err(|e| AppError::Internal(e.to_string()))
    }
}

/// Stream `file` in fixed-size chunks.
///
/// The stream owns `speech`: its temporary files are removed after the last chunk
/// or a failed read, and by the drop guard if the client hangs up midway.
fn audio_stream(
    file: tokio::fs::File,
    speech: SynthesizedSpeech,
) -> impl Stream<Item = std::io::Result<Bytes>> + Send + 'static {
    futures::stream::unfold(Some((file, speech, 0usize)), |state| async move {
        let (mut file, mut speech, sent) = state?;

        let mut buf = vec![0u8; STREAM_CHUNK_SIZE];
        match file.read(&mut buf).await {
            Ok(0) => {
                tracing::debug!(
                    voice = %speech.voice,
                    bytes = sent,
                    "Finished streaming audio"
                );
                speech.temp_files.remove_all().await;
                None
            }
            Ok(n) => {
                buf.truncate(n);
                Some((Ok(Bytes::from(buf)), Some((file, speech, sent + n))))
            }
            Err(e) => {
                tracing::error!(
                    voice = %speech.voice,
                    path = %speech.path.display(),
                    error = %e,
                    "Failed to read synthesized audio"
                );
                speech.temp_files.remove_all().await;
                Some((Err(e), None))
            }
        }
    })
}
