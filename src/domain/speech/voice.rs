use std::fmt;
use std::path::{Path, PathBuf};

pub const MODEL_EXTENSION: &str = ".onnx";
pub const METADATA_EXTENSION: &str = ".onnx.json";

/// A voice identifier that is safe to splice into a filesystem path.
///
/// Conventionally `<langCode>-<speaker>-<quality>`, e.g. `en_US-lessac-medium`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VoiceId(String);

impl VoiceId {
    /// Rejects anything containing a path separator or starting with a dot
    pub fn parse(raw: &str) -> Result<Self, String> {
        if raw.is_empty() || raw.contains('/') || raw.contains('\\') || raw.starts_with('.') {
            return Err(format!("Invalid voice name: '{}'.", raw));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<shortLang>/<langCode>/<name>/<quality>/<voice>` on the remote repository,
    /// or `None` when the identifier has fewer than three dash-separated parts.
    pub fn remote_path(&self) -> Option<String> {
        let parts: Vec<&str> = self.0.split('-').collect();
        if parts.len() < 3 || parts[..3].iter().any(|p| p.is_empty()) {
            return None;
        }
        let (lang_code, name, quality) = (parts[0], parts[1], parts[2]);
        let lang_short = lang_code.split('_').next().unwrap_or(lang_code);

        Some(format!(
            "{}/{}/{}/{}/{}",
            lang_short, lang_code, name, quality, self.0
        ))
    }
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Local model + metadata files for one voice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoicePaths {
    pub model: PathBuf,
    pub metadata: PathBuf,
}

impl VoicePaths {
    pub fn resolve(root: &Path, voice: &VoiceId) -> Self {
        Self {
            model: root.join(format!("{}{}", voice, MODEL_EXTENSION)),
            metadata: root.join(format!("{}{}", voice, METADATA_EXTENSION)),
        }
    }

    /// Both files present; a lone model or metadata file does not count
    pub async fn exist(&self) -> bool {
        let model = tokio::fs::try_exists(&self.model).await.unwrap_or(false);
        let metadata = tokio::fs::try_exists(&self.metadata).await.unwrap_or(false);
        model && metadata
    }

    /// (destination, extension) pairs in download order
    pub fn downloads(&self) -> [(&Path, &'static str); 2] {
        [
            (self.model.as_path(), MODEL_EXTENSION),
            (self.metadata.as_path(), METADATA_EXTENSION),
        ]
    }
}
