//! The linked chart stack: overview plus strip plots
//!
//! Six views share one brush and one legend selection. They are rendered
//! top to bottom in a single frame, so every view reads the same selection
//! snapshot; there is no cross-view ordering to get wrong.

use egui::Ui;

use crate::plots::{FacetGridView, FeatureScatterView, StripPlotView};
use crate::{SpaceView, SpaceViewId, ViewerContext};

/// Owns the overview pair (scatter or facet grid) and the strip plots.
pub struct LinkedCharts {
    overview: FeatureScatterView,
    facet: FacetGridView,
    strips: Vec<StripPlotView>,
    use_facet_grid: bool,
}

impl LinkedCharts {
    /// Build the linked stack for an axis pair and a set of strip features.
    pub fn new(x_column: &str, y_column: &str, strip_features: &[&str]) -> Self {
        let mut overview = FeatureScatterView::new(
            SpaceViewId::new_v4(),
            "Feature correlation".to_string(),
        );
        overview.set_axes(x_column, y_column);

        let mut facet =
            FacetGridView::new(SpaceViewId::new_v4(), "Genre breakdown".to_string());
        facet.set_axes(x_column, y_column);

        let strips = strip_features
            .iter()
            .map(|feature| StripPlotView::new(SpaceViewId::new_v4(), feature))
            .collect();

        Self {
            overview,
            facet,
            strips,
            use_facet_grid: false,
        }
    }

    /// Re-point the overview and facet grid at a new feature pair.
    pub fn set_axes(&mut self, x_column: &str, y_column: &str) {
        self.overview.set_axes(x_column, y_column);
        self.facet.set_axes(x_column, y_column);
    }

    /// Switch the top panel between the scatter and the facet grid.
    pub fn set_facet_grid(&mut self, use_facet_grid: bool) {
        self.use_facet_grid = use_facet_grid;
    }

    pub fn use_facet_grid(&self) -> bool {
        self.use_facet_grid
    }

    pub fn strip_count(&self) -> usize {
        self.strips.len()
    }

    /// Render the overview and the strips, stacked.
    pub fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        if self.use_facet_grid {
            self.facet.ui(ctx, ui);
        } else {
            self.overview.ui(ctx, ui);
        }

        ui.add_space(6.0);
        for strip in &mut self.strips {
            strip.ui(ctx, ui);
        }
    }
}
