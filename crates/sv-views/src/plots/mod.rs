//! Plot view implementations

pub mod correlation;
pub mod facet;
pub mod pie;
pub mod scatter;
pub mod strip;

// Utilities
pub mod utils;

// Re-exports
pub use correlation::{CorrelationHeatmapConfig, CorrelationHeatmapView};
pub use facet::{FacetGridConfig, FacetGridView};
pub use pie::{GenrePieConfig, GenrePieView};
pub use scatter::{FeatureScatterConfig, FeatureScatterView};
pub use strip::{StripPlotConfig, StripPlotView};
