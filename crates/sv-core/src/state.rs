//! Shared application state

use std::sync::Arc;

use parking_lot::RwLock;

use crate::selection::SelectionEngine;

/// Hovered row information, written by whichever view the pointer is over
#[derive(Default, Clone, Debug)]
pub struct HoveredData {
    pub x: f64,
    pub y: f64,
    pub filename: String,
    pub label: String,
    pub row_index: Option<usize>,
}

/// Context passed to views during rendering
#[derive(Clone)]
pub struct ViewerContext {
    /// The loaded dataset (read-only after startup)
    pub data_source: Arc<RwLock<Option<Arc<dyn crate::DataSource>>>>,

    /// Shared brush + legend selection
    pub selection: Arc<SelectionEngine>,

    /// Currently hovered row
    pub hovered_data: Arc<RwLock<HoveredData>>,

    /// Tokio runtime handle for blocking on data source queries
    pub runtime_handle: tokio::runtime::Handle,
}
