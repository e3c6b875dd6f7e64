//! Audio asset lookup

use std::path::{Path, PathBuf};

use crate::DataError;

/// Resolves and reads audio files stored as `<root>/<genre>/<filename>`.
///
/// Reads are not memoized; a missing file is a per-widget playback error,
/// never a crash.
pub struct AudioLibrary {
    root: PathBuf,
}

impl AudioLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the audio file for a song within a genre subdirectory.
    pub fn wav_path(&self, genre: &str, filename: &str) -> PathBuf {
        self.root.join(genre).join(filename)
    }

    /// Read the raw bytes of one audio file.
    pub fn load_bytes(&self, genre: &str, filename: &str) -> Result<Vec<u8>, DataError> {
        let path = self.wav_path(genre, filename);
        if !path.is_file() {
            tracing::warn!("Audio file not found: {:?}", path);
            return Err(DataError::AudioNotFound { path });
        }
        Ok(std::fs::read(&path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_bytes_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("blues")).unwrap();
        let mut file = std::fs::File::create(dir.path().join("blues/blues.00000.wav")).unwrap();
        file.write_all(b"RIFFdata").unwrap();

        let library = AudioLibrary::new(dir.path());
        let bytes = library.load_bytes("blues", "blues.00000.wav").unwrap();
        assert_eq!(bytes, b"RIFFdata");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let library = AudioLibrary::new(dir.path());
        let result = library.load_bytes("blues", "missing.wav");
        assert!(matches!(result, Err(DataError::AudioNotFound { .. })));
    }

    #[test]
    fn test_wav_path_layout() {
        let library = AudioLibrary::new("genres_original");
        assert_eq!(
            library.wav_path("jazz", "jazz.00042.wav"),
            PathBuf::from("genres_original/jazz/jazz.00042.wav")
        );
    }
}
