//! Typed wrapper around the loaded song-features table

use std::sync::Arc;

use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Schema};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use indexmap::IndexMap;

use crate::DataError;
use sv_core::DataSource;

/// The five features that drive the linked charts, in strip-plot order.
pub const CORE_FEATURES: [&str; 5] = [
    "chroma_stft_mean",
    "rms_mean",
    "rolloff_mean",
    "harmony_mean",
    "tempo",
];

/// One fully loaded song-features dataset.
///
/// Wraps the materialized `RecordBatch` and the state derived once at load:
/// the genre list in dataset row order, per-genre counts, and the numeric
/// feature column names. Immutable after construction.
pub struct TrackDataset {
    batch: RecordBatch,
    name: String,
    filenames: Vec<String>,
    labels: Vec<String>,
    genres: Vec<String>,
    genre_counts: IndexMap<String, usize>,
    feature_columns: Vec<String>,
}

impl TrackDataset {
    /// Build the dataset from a materialized batch, validating the key
    /// columns and deriving genre/feature lists.
    pub fn from_batch(batch: RecordBatch, name: impl Into<String>) -> Result<Self, DataError> {
        let filenames = Self::string_column(&batch, "filename")?;
        let labels = Self::string_column(&batch, "label")?;

        // Unique genres in dataset row order, with counts
        let mut genre_counts: IndexMap<String, usize> = IndexMap::new();
        for label in &labels {
            *genre_counts.entry(label.clone()).or_insert(0) += 1;
        }
        let genres: Vec<String> = genre_counts.keys().cloned().collect();

        let feature_columns = batch
            .schema()
            .fields()
            .iter()
            .filter(|f| matches!(f.data_type(), DataType::Float64 | DataType::Int64))
            .map(|f| f.name().clone())
            .collect();

        let name = name.into();
        tracing::info!(
            "Dataset '{}': {} tracks, {} genres",
            name,
            batch.num_rows(),
            genres.len()
        );

        Ok(Self {
            batch,
            name,
            filenames,
            labels,
            genres,
            genre_counts,
            feature_columns,
        })
    }

    fn string_column(batch: &RecordBatch, name: &str) -> Result<Vec<String>, DataError> {
        let column = batch
            .column_by_name(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))?;
        let array = column
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| DataError::MissingColumn(format!("{} (expected string)", name)))?;
        Ok((0..array.len())
            .map(|i| {
                if array.is_null(i) {
                    String::new()
                } else {
                    array.value(i).to_string()
                }
            })
            .collect())
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn row_count(&self) -> usize {
        self.batch.num_rows()
    }

    /// Unique genre labels, in dataset row order.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Per-genre row counts, keyed in dataset row order.
    pub fn genre_counts(&self) -> &IndexMap<String, usize> {
        &self.genre_counts
    }

    /// Names of the numeric feature columns.
    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    /// Per-row genre labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Per-row song filenames.
    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    /// Ordered list of song filenames whose label equals `genre`.
    ///
    /// Empty for a genre absent from the dataset.
    pub fn playlist(&self, genre: &str) -> Vec<String> {
        self.labels
            .iter()
            .zip(self.filenames.iter())
            .filter(|(label, _)| label.as_str() == genre)
            .map(|(_, filename)| filename.clone())
            .collect()
    }

    /// Extract a numeric column as `f64` values, aligned to rows.
    ///
    /// Null entries become NaN so row alignment is preserved.
    pub fn feature_values(&self, name: &str) -> Option<Vec<f64>> {
        let column = self.batch.column_by_name(name)?;
        if let Some(floats) = column.as_any().downcast_ref::<Float64Array>() {
            Some(
                (0..floats.len())
                    .map(|i| if floats.is_null(i) { f64::NAN } else { floats.value(i) })
                    .collect(),
            )
        } else if let Some(ints) = column.as_any().downcast_ref::<Int64Array>() {
            Some(
                (0..ints.len())
                    .map(|i| if ints.is_null(i) { f64::NAN } else { ints.value(i) as f64 })
                    .collect(),
            )
        } else {
            None
        }
    }
}

#[async_trait]
impl DataSource for TrackDataset {
    async fn schema(&self) -> Arc<Schema> {
        self.batch.schema()
    }

    async fn query_all(&self) -> anyhow::Result<RecordBatch> {
        Ok(self.batch.clone())
    }

    async fn row_count(&self) -> anyhow::Result<usize> {
        Ok(self.batch.num_rows())
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use arrow::array::{Float64Builder, StringBuilder};
    use arrow::datatypes::Field;

    /// Small two-genre fixture in a fixed row order.
    pub(crate) fn sample_dataset() -> TrackDataset {
        let schema = Arc::new(Schema::new(vec![
            Field::new("filename", DataType::Utf8, true),
            Field::new("label", DataType::Utf8, true),
            Field::new("tempo", DataType::Float64, true),
            Field::new("rms_mean", DataType::Float64, true),
        ]));

        let rows = [
            ("jazz.00000.wav", "jazz", 120.0, 0.10),
            ("blues.00000.wav", "blues", 90.0, 0.20),
            ("jazz.00001.wav", "jazz", 140.0, 0.15),
            ("blues.00001.wav", "blues", 95.0, 0.25),
            ("jazz.00002.wav", "jazz", 100.0, 0.12),
        ];

        let mut filenames = StringBuilder::new();
        let mut labels = StringBuilder::new();
        let mut tempo = Float64Builder::new();
        let mut rms = Float64Builder::new();
        for (f, l, t, r) in rows {
            filenames.append_value(f);
            labels.append_value(l);
            tempo.append_value(t);
            rms.append_value(r);
        }

        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(filenames.finish()),
                Arc::new(labels.finish()),
                Arc::new(tempo.finish()),
                Arc::new(rms.finish()),
            ],
        )
        .unwrap();

        TrackDataset::from_batch(batch, "fixture.csv").unwrap()
    }

    #[test]
    fn test_genres_in_row_order() {
        let dataset = sample_dataset();
        assert_eq!(dataset.genres(), &["jazz".to_string(), "blues".to_string()]);
    }

    #[test]
    fn test_genre_counts_sum_to_rows() {
        let dataset = sample_dataset();
        assert_eq!(dataset.genre_counts()["jazz"], 3);
        assert_eq!(dataset.genre_counts()["blues"], 2);
        let total: usize = dataset.genre_counts().values().sum();
        assert_eq!(total, dataset.row_count());
    }

    #[test]
    fn test_playlist_preserves_row_order() {
        let dataset = sample_dataset();
        assert_eq!(
            dataset.playlist("jazz"),
            vec!["jazz.00000.wav", "jazz.00001.wav", "jazz.00002.wav"]
        );
        assert!(dataset.playlist("polka").is_empty());
    }

    #[test]
    fn test_feature_values() {
        let dataset = sample_dataset();
        let tempo = dataset.feature_values("tempo").unwrap();
        assert_eq!(tempo, vec![120.0, 90.0, 140.0, 95.0, 100.0]);
        assert!(dataset.feature_values("filename").is_none());
        assert!(dataset.feature_values("nope").is_none());
    }

    #[test]
    fn test_missing_label_column_rejected() {
        let schema = Arc::new(Schema::new(vec![Field::new("filename", DataType::Utf8, true)]));
        let mut filenames = StringBuilder::new();
        filenames.append_value("jazz.00000.wav");
        let batch =
            RecordBatch::try_new(schema, vec![Arc::new(filenames.finish())]).unwrap();
        let result = TrackDataset::from_batch(batch, "broken.csv");
        assert!(matches!(result, Err(DataError::MissingColumn(_))));
    }
}
