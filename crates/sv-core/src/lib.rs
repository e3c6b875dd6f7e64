//! Core functionality for the song exploration dashboard
//!
//! This crate provides the fundamental abstractions shared by every view:
//! the cross-view selection engine (brush + legend) and the data source
//! trait the chart views query at render time.

pub mod data;
pub mod selection;
pub mod state;

// Re-export commonly used types
pub use selection::{
    BrushRange, SelectionContext, SelectionEngine, SelectionSubscriber,
};
pub use state::{HoveredData, ViewerContext};
pub use data::DataSource;
