/// Audio clip handles
///
/// A clip is an opaque, cheaply clonable reference to encoded audio bytes.
/// Decoding happens in the channel backend, never here.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::AudioError;

/// Shared handle to playable audio content
#[derive(Clone)]
pub struct AudioClip {
    name: Arc<str>,
    data: Arc<Vec<u8>>,
}

impl AudioClip {
    /// Load a clip from a file, reading it fully into memory
    pub fn from_file(path: &Path) -> Result<Self, AudioError> {
        let data = std::fs::read(path).map_err(|e| AudioError::LoadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        tracing::info!(
            "Loaded clip {}: {} ({} bytes)",
            name,
            path.display(),
            data.len()
        );

        Ok(Self::from_memory(name, Arc::new(data)))
    }

    /// Wrap already-loaded audio bytes
    pub fn from_memory(name: impl Into<String>, data: Arc<Vec<u8>>) -> Self {
        Self {
            name: Arc::from(name.into()),
            data,
        }
    }

    /// Clip with no audio content. Useful as a placeholder in headless setups.
    pub fn silent(name: impl Into<String>) -> Self {
        Self::from_memory(name, Arc::new(Vec::new()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw encoded bytes
    pub fn data(&self) -> &Arc<Vec<u8>> {
        &self.data
    }

    pub fn len_bytes(&self) -> usize {
        self.data.len()
    }
}

impl PartialEq for AudioClip {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.data, &other.data)
    }
}

impl Eq for AudioClip {}

impl fmt::Debug for AudioClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioClip")
            .field("name", &self.name)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl fmt::Display for AudioClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_identity() {
        let data = Arc::new(vec![1u8, 2, 3]);
        let a = AudioClip::from_memory("theme", Arc::clone(&data));
        let b = a.clone();
        let c = AudioClip::from_memory("theme", Arc::new(vec![1u8, 2, 3]));

        assert_eq!(a, b);
        assert_ne!(a, c); // same bytes, different allocation
        assert_eq!(a.len_bytes(), 3);
    }

    #[test]
    fn test_missing_file() {
        let result = AudioClip::from_file(Path::new("/definitely/not/here.ogg"));
        match result {
            Err(AudioError::LoadFailed { path, .. }) => assert!(path.ends_with("here.ogg")),
            other => panic!("expected LoadFailed, got {:?}", other.map(|c| c.to_string())),
        }
    }

    #[test]
    fn test_from_file_uses_stem_as_name() {
        let path = std::env::temp_dir()
            .join(format!("game_audio_clip_{}.wav", std::process::id()));
        std::fs::write(&path, [0u8; 16]).unwrap();

        let clip = AudioClip::from_file(&path).unwrap();
        assert_eq!(clip.name(), format!("game_audio_clip_{}", std::process::id()));
        assert_eq!(clip.len_bytes(), 16);

        let _ = std::fs::remove_file(&path);
    }
}
