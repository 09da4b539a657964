use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

pub const DOWNLOADABLE_VOICE: &str = "en_US-test-low";
/// Model is served, metadata is not
pub const BROKEN_VOICE: &str = "en_US-broken-low";

pub const MODEL_BYTES: &[u8] = b"ONNX-MODEL-BYTES";
pub const METADATA_BYTES: &[u8] = br#"{"audio": {"sample_rate": 22050}}"#;

struct HostState {
    files: HashMap<String, &'static [u8]>,
    hits: AtomicUsize,
}

/// Local stand-in for the remote piper-voices repository
pub struct VoiceHost {
    pub base_url: String,
    state: Arc<HostState>,
}

impl VoiceHost {
    pub async fn start() -> Self {
        let mut files: HashMap<String, &'static [u8]> = HashMap::new();
        files.insert(
            format!("en/en_US/test/low/{}.onnx", DOWNLOADABLE_VOICE),
            MODEL_BYTES,
        );
        files.insert(
            format!("en/en_US/test/low/{}.onnx.json", DOWNLOADABLE_VOICE),
            METADATA_BYTES,
        );
        files.insert(
            format!("en/en_US/broken/low/{}.onnx", BROKEN_VOICE),
            MODEL_BYTES,
        );

        let state = Arc::new(HostState {
            files,
            hits: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/*path", get(serve_file))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind voice host");
        let addr = listener.local_addr().expect("Failed to get voice host addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// Number of GET requests served so far, successful or not
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

async fn serve_file(
    State(state): State<Arc<HostState>>,
    Path(path): Path<String>,
) -> Result<&'static [u8], StatusCode> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.files.get(&path).copied().ok_or(StatusCode::NOT_FOUND)
}
