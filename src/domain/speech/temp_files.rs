use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const TEMP_FILE_PREFIX: &str = "piper_";

/// Per-request temporary audio files.
///
/// Every registered path is deleted when the value is dropped, whichever way the
/// request ends: streamed to completion, failed mid-pipeline, or abandoned by a
/// disconnecting client.
#[derive(Debug, Default)]
pub struct TempAudioFiles {
    paths: Vec<PathBuf>,
}

impl TempAudioFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// `piper_<pid>_<random>.wav` inside `dir`
    pub fn wav_path(dir: &Path) -> PathBuf {
        let suffix = Uuid::new_v4().simple().to_string();
        dir.join(format!(
            "{}{}_{}.wav",
            TEMP_FILE_PREFIX,
            std::process::id(),
            &suffix[..8]
        ))
    }

    pub fn register(&mut self, path: PathBuf) {
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Delete every registered file now, leaving nothing for `Drop`
    pub async fn remove_all(&mut self) {
        for path in self.paths.drain(..) {
            log_removal(&path, tokio::fs::remove_file(&path).await);
        }
    }
}

impl Drop for TempAudioFiles {
    fn drop(&mut self) {
        if self.paths.is_empty() {
            return;
        }

        let paths = std::mem::take(&mut self.paths);
        // Keep blocking unlinks off the async workers when a runtime is around
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || remove_paths(paths));
            }
            Err(_) => remove_paths(paths),
        }
    }
}

fn remove_paths(paths: Vec<PathBuf>) {
    for path in paths {
        let result = std::fs::remove_file(&path);
        log_removal(&path, result);
    }
}

fn log_removal(path: &Path, result: std::io::Result<()>) {
    match result {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed temporary audio file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "Failed to remove temporary audio file"
        ),
    }
}

/// Poll until none of `paths` exist, for cleanup that runs on the blocking pool
#[cfg(test)]
pub(crate) async fn wait_until_removed(paths: &[PathBuf]) -> bool {
    for _ in 0..100 {
        if paths.iter().all(|p| !p.exists()) {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    false
}
