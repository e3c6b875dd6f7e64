use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use csv::ReaderBuilder;

use crate::DataError;
use sv_core::DataSource;

/// CSV source for the song-features dataset.
///
/// The dataset is small (one row per song), so the whole file is read and
/// materialized as a single `RecordBatch` at construction. Column types are
/// inferred from the parsed values: integer, float, or string.
pub struct FeaturesCsvSource {
    /// Path to the CSV file
    path: PathBuf,
    /// Inferred schema
    pub schema: Arc<Schema>,
    /// The fully materialized dataset
    batch: RecordBatch,
    /// File name used as the source id
    name: String,
}

impl FeaturesCsvSource {
    /// Create a new source from a file path, reading the file eagerly.
    pub async fn new(path: PathBuf) -> Result<Self, DataError> {
        let (schema, batch) = tokio::task::spawn_blocking({
            let path = path.clone();
            move || Self::read_file(&path)
        })
        .await??;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("dataset.csv")
            .to_string();

        tracing::info!(
            "Loaded {} rows x {} columns from {:?}",
            batch.num_rows(),
            batch.num_columns(),
            path
        );

        Ok(Self {
            path,
            schema: Arc::new(schema),
            batch,
            name,
        })
    }

    /// The path this source was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Borrow the materialized batch.
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Read and parse the whole file.
    fn read_file(path: &Path) -> Result<(Schema, RecordBatch), DataError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

        // Get headers
        let headers = csv_reader.headers()?.clone();

        // Read every record up front; the dataset is one row per song
        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if rows.is_empty() {
            return Err(DataError::SchemaDetection(format!(
                "{:?} contains no data rows",
                path
            )));
        }

        // Detect column types
        let fields = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let data_type = Self::detect_column_type(&rows, idx);
                Field::new(name, data_type, true)
            })
            .collect::<Vec<_>>();

        let schema = Schema::new(fields);
        let batch = Self::build_batch(Arc::new(schema.clone()), &rows)?;

        Ok((schema, batch))
    }

    /// Detect column type from the parsed values
    fn detect_column_type(rows: &[Vec<String>], col_idx: usize) -> DataType {
        let mut is_int = true;
        let mut is_float = true;

        for row in rows {
            if let Some(value) = row.get(col_idx) {
                if value.is_empty() {
                    continue;
                }

                if is_int && value.parse::<i64>().is_err() {
                    is_int = false;
                }

                if is_float && value.parse::<f64>().is_err() {
                    is_float = false;
                }

                if !is_int && !is_float {
                    break;
                }
            }
        }

        if is_int {
            DataType::Int64
        } else if is_float {
            DataType::Float64
        } else {
            DataType::Utf8
        }
    }

    /// Build arrow arrays for each column
    fn build_batch(schema: Arc<Schema>, rows: &[Vec<String>]) -> Result<RecordBatch, DataError> {
        let mut columns: Vec<ArrayRef> = Vec::new();

        for (col_idx, field) in schema.fields().iter().enumerate() {
            let array: ArrayRef = match field.data_type() {
                DataType::Int64 => {
                    let mut builder = Int64Builder::new();
                    for row in rows {
                        match row.get(col_idx).filter(|v| !v.is_empty()) {
                            Some(value) => match value.parse::<i64>() {
                                Ok(v) => builder.append_value(v),
                                Err(_) => builder.append_null(),
                            },
                            None => builder.append_null(),
                        }
                    }
                    Arc::new(builder.finish())
                }
                DataType::Float64 => {
                    let mut builder = Float64Builder::new();
                    for row in rows {
                        match row.get(col_idx).filter(|v| !v.is_empty()) {
                            Some(value) => match value.parse::<f64>() {
                                Ok(v) => builder.append_value(v),
                                Err(_) => builder.append_null(),
                            },
                            None => builder.append_null(),
                        }
                    }
                    Arc::new(builder.finish())
                }
                _ => {
                    let mut builder = StringBuilder::new();
                    for row in rows {
                        match row.get(col_idx).filter(|v| !v.is_empty()) {
                            Some(value) => builder.append_value(value),
                            None => builder.append_null(),
                        }
                    }
                    Arc::new(builder.finish())
                }
            };

            columns.push(array);
        }

        RecordBatch::try_new(schema, columns).map_err(|e| e.into())
    }
}

#[async_trait]
impl DataSource for FeaturesCsvSource {
    async fn schema(&self) -> Arc<Schema> {
        self.schema.clone()
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
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("features.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_type_inference() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "filename,label,length,tempo\n\
             blues.00000.wav,blues,661794,103.359\n\
             jazz.00000.wav,jazz,661794,80.0\n",
        );

        let source = FeaturesCsvSource::new(path).await.unwrap();
        let schema = source.schema.clone();
        assert_eq!(schema.field_with_name("filename").unwrap().data_type(), &DataType::Utf8);
        assert_eq!(schema.field_with_name("label").unwrap().data_type(), &DataType::Utf8);
        assert_eq!(schema.field_with_name("length").unwrap().data_type(), &DataType::Int64);
        assert_eq!(schema.field_with_name("tempo").unwrap().data_type(), &DataType::Float64);
        assert_eq!(source.batch().num_rows(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = FeaturesCsvSource::new(PathBuf::from("no/such/features.csv")).await;
        assert!(matches!(result, Err(DataError::Io(_))));
    }

    #[tokio::test]
    async fn test_empty_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "filename,label\n");
        let result = FeaturesCsvSource::new(path).await;
        assert!(matches!(result, Err(DataError::SchemaDetection(_))));
    }
}
