use super::voice_repository::VoiceRepository;
use crate::domain::speech::{VoiceId, VoicePaths};
use anyhow::Context;
use async_trait::async_trait;
use futures::StreamExt;
use moka::future::Cache;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Voice assets kept under a local directory and fetched from the
/// rhasspy/piper-voices repository layout on first use.
pub struct HuggingFaceVoiceRepository {
    client: reqwest::Client,
    data_dir: PathBuf,
    base_url: String,
    /// One mutex per voice identifier so concurrent misses download once.
    /// Unbounded with no expiry: evicting a held mutex would let a second
    /// downloader in.
    download_locks: Option<Cache<String, Arc<Mutex<()>>>>,
}

impl HuggingFaceVoiceRepository {
    pub fn new(data_dir: PathBuf, base_url: String, lock_downloads: bool) -> Self {
        let download_locks = if lock_downloads {
            Some(Cache::builder().build())
        } else {
            None
        };

        Self {
            client: reqwest::Client::new(),
            data_dir,
            base_url: base_url.trim_end_matches('/').to_string(),
            download_locks,
        }
    }

    async fn download_lock(&self, voice: &VoiceId) -> Option<Arc<Mutex<()>>> {
        let locks = self.download_locks.as_ref()?;
        Some(
            locks
                .get_with(voice.to_string(), async { Arc::new(Mutex::new(())) })
                .await,
        )
    }

    async fn download(&self, remote_path: &str, paths: &VoicePaths) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .with_context(|| format!("creating data dir {}", self.data_dir.display()))?;

        for (destination, extension) in paths.downloads() {
            let url = format!("{}/{}{}", self.base_url, remote_path, extension);
            tracing::info!(url = %url, "Downloading voice asset");

            let response = self
                .client
                .get(&url)
                .send()
                .await
                .with_context(|| format!("requesting {}", url))?
                .error_for_status()
                .with_context(|| format!("downloading {}", url))?;

            let partial = partial_path(destination);
            let mut file = tokio::fs::File::create(&partial)
                .await
                .with_context(|| format!("creating {}", partial.display()))?;

            let mut body = response.bytes_stream();
            let mut written = 0usize;
            while let Some(chunk) = body.next().await {
                let chunk = chunk.with_context(|| format!("reading body of {}", url))?;
                file.write_all(&chunk)
                    .await
                    .with_context(|| format!("writing {}", partial.display()))?;
                written += chunk.len();
            }
            file.flush().await?;
            drop(file);

            // Only complete files ever appear under their final name
            tokio::fs::rename(&partial, destination)
                .await
                .with_context(|| format!("moving {} into place", partial.display()))?;

            tracing::debug!(
                path = %destination.display(),
                bytes = written,
                "Voice asset written"
            );
        }

        Ok(())
    }

    async fn remove_partial(paths: &VoicePaths) {
        let leftovers = paths
            .downloads()
            .into_iter()
            .flat_map(|(path, _)| [path.to_path_buf(), partial_path(path)]);

        for path in leftovers {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => tracing::debug!(path = %path.display(), "Removed partial voice asset"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to remove partial voice asset"
                ),
            }
        }
    }
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

#[async_trait]
impl VoiceRepository for HuggingFaceVoiceRepository {
    fn paths(&self, voice: &VoiceId) -> VoicePaths {
        VoicePaths::resolve(&self.data_dir, voice)
    }

    async fn ensure_available(&self, voice: &VoiceId) -> bool {
        let paths = self.paths(voice);
        if paths.exist().await {
            return true;
        }

        let Some(remote_path) = voice.remote_path() else {
            tracing::error!(voice = %voice, "Invalid voice name format, expected <lang>-<name>-<quality>");
            return false;
        };

        let _guard = match self.download_lock(voice).await {
            Some(lock) => {
                let guard = lock.lock_owned().await;
                // Someone else may have finished the download while we waited
                if paths.exist().await {
                    tracing::debug!(voice = %voice, "Voice downloaded by a concurrent request");
                    return true;
                }
                Some(guard)
            }
            None => None,
        };

        tracing::info!(voice = %voice, "Voice not found locally, downloading");
        let start_time = std::time::Instant::now();

        match self.download(&remote_path, &paths).await {
            Ok(()) => {
                tracing::info!(
                    voice = %voice,
                    latency_ms = start_time.elapsed().as_millis(),
                    "Voice downloaded"
                );
                true
            }
            Err(e) => {
                tracing::error!(voice = %voice, error = ?e, "Failed to download voice");
                Self::remove_partial(&paths).await;
                false
            }
        }
    }
}
