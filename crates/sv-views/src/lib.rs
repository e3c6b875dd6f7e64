//! Chart views for the song exploration dashboard

mod linked;
mod space_view;
pub mod plots;
mod tables;

pub use linked::LinkedCharts;
pub use space_view::{SpaceView, SpaceViewId};
pub use tables::{RawTableView, TableConfig};
pub use plots::{
    CorrelationHeatmapView, FacetGridView, FeatureScatterView, GenrePieView, StripPlotView,
};

// The shared context the views render against lives in sv-core.
pub use sv_core::{HoveredData, ViewerContext};
