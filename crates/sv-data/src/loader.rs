//! Memoized dataset loading

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::sources::FeaturesCsvSource;
use crate::{DataError, TrackDataset};
use sv_core::DataSource;

/// Loads datasets once per path and hands out shared references.
///
/// Owned by the application's startup routine; UI re-renders reuse the
/// cached `Arc` and never touch the file again.
pub struct DatasetLoader {
    cache: RwLock<AHashMap<PathBuf, Arc<TrackDataset>>>,
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(AHashMap::new()),
        }
    }

    /// Load the dataset at `path`, or return the cached copy.
    pub async fn load(&self, path: &Path) -> Result<Arc<TrackDataset>, DataError> {
        if let Some(dataset) = self.cache.read().get(path) {
            tracing::debug!("Dataset cache hit for {:?}", path);
            return Ok(dataset.clone());
        }

        let source = FeaturesCsvSource::new(path.to_path_buf()).await?;
        let dataset = Arc::new(TrackDataset::from_batch(
            source.batch().clone(),
            source.source_name(),
        )?);

        self.cache
            .write()
            .insert(path.to_path_buf(), dataset.clone());
        Ok(dataset)
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_repeated_loads_share_one_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"filename,label,tempo\nblues.00000.wav,blues,103.4\n")
            .unwrap();

        let loader = DatasetLoader::new();
        let first = loader.load(&path).await.unwrap();
        let second = loader.load(&path).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.row_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_dataset_is_fatal() {
        let loader = DatasetLoader::new();
        let result = loader.load(Path::new("missing/features.csv")).await;
        assert!(matches!(result, Err(DataError::Io(_))));
    }
}
