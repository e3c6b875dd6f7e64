//! Application configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Fixed input locations for the dashboard.
///
/// The dataset and audio assets live at well-known relative paths next to
/// the binary; there are no CLI flags or environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Delimited song-features table, one row per song
    pub dataset_path: PathBuf,

    /// Root of the per-genre audio directories
    pub audio_root: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("features_30_sec.csv"),
            audio_root: PathBuf::from("genres_original"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = AppConfig::default();
        assert_eq!(config.dataset_path, PathBuf::from("features_30_sec.csv"));
        assert_eq!(config.audio_root, PathBuf::from("genres_original"));
    }
}
