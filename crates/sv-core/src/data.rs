//! Data source abstraction

use std::sync::Arc;

/// Trait for tabular data sources backing the chart views.
///
/// The dataset is loaded once and is immutable for the session, so the
/// interface is deliberately small: views ask for the schema, the full
/// batch, or the row count.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Get the schema of this data source
    async fn schema(&self) -> Arc<arrow::datatypes::Schema>;

    /// Query the entire dataset
    async fn query_all(&self) -> anyhow::Result<arrow::record_batch::RecordBatch>;

    /// Get total row count
    async fn row_count(&self) -> anyhow::Result<usize>;

    /// Get the source name/path
    fn source_name(&self) -> &str;
}
