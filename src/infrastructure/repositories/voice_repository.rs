use crate::domain::speech::{VoiceId, VoicePaths};
use async_trait::async_trait;

/// Local store of voice assets (model + metadata sidecar).
///
/// Implementations are responsible for:
/// - Mapping a voice identifier to its files under the storage root
/// - Fetching missing assets on first use
/// - Never leaving a half-downloaded asset behind
#[async_trait]
pub trait VoiceRepository: Send + Sync {
    /// Where the voice's files live (or will live) on disk
    fn paths(&self, voice: &VoiceId) -> VoicePaths;

    /// `true` if both files are present, downloading them first if needed.
    ///
    /// "Not found" and download failures both report `false`.
    async fn ensure_available(&self, voice: &VoiceId) -> bool;
}
