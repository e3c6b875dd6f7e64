//! Faceted scatter grid: one mini chart per genre

use std::collections::BTreeMap;

use egui::Ui;
use egui_plot::{MarkerShape, Plot, PlotPoints, Points};
use serde_json::{json, Value};

use crate::{SpaceView, SpaceViewId};
use sv_core::{SelectionContext, ViewerContext};

use super::utils::{self, colors};

/// Configuration for the facet grid view
#[derive(Debug, Clone)]
pub struct FacetGridConfig {
    /// X-axis feature column
    pub x_column: String,

    /// Y-axis feature column
    pub y_column: String,

    /// Genre label column
    pub label_column: String,

    /// Number of grid columns
    pub columns: usize,

    /// Height of each facet cell
    pub cell_height: f32,
}

impl Default for FacetGridConfig {
    fn default() -> Self {
        Self {
            x_column: String::new(),
            y_column: String::new(),
            label_column: "label".to_string(),
            columns: 5,
            cell_height: 130.0,
        }
    }
}

/// Cached facet data, row aligned with the dataset
struct FacetData {
    xs: Vec<f64>,
    ys: Vec<f64>,
    labels: Vec<String>,
    genres: Vec<String>,
    brush_columns: BTreeMap<String, Vec<f64>>,
}

/// Small-multiples grid of per-genre scatters, linked to the shared brush.
pub struct FacetGridView {
    id: SpaceViewId,
    title: String,
    pub config: FacetGridConfig,

    // State
    cached_data: Option<FacetData>,
}

impl FacetGridView {
    pub fn new(id: SpaceViewId, title: String) -> Self {
        Self {
            id,
            title,
            config: FacetGridConfig::default(),
            cached_data: None,
        }
    }

    /// Point the axes at a new feature pair, invalidating cached data.
    pub fn set_axes(&mut self, x_column: &str, y_column: &str) {
        if self.config.x_column != x_column || self.config.y_column != y_column {
            self.config.x_column = x_column.to_string();
            self.config.y_column = y_column.to_string();
            self.cached_data = None;
        }
    }

    fn fetch_data(&mut self, ctx: &ViewerContext) -> Option<FacetData> {
        if self.config.x_column.is_empty() || self.config.y_column.is_empty() {
            return None;
        }

        let data_source = ctx.data_source.read();
        let data_source = data_source.as_ref()?;

        let batch = match ctx.runtime_handle.block_on(data_source.query_all()) {
            Ok(b) => b,
            Err(e) => {
                tracing::error!("Failed to fetch facet data: {}", e);
                return None;
            }
        };

        let xs = utils::numeric_values(batch.column_by_name(&self.config.x_column)?.as_ref())?;
        let ys = utils::numeric_values(batch.column_by_name(&self.config.y_column)?.as_ref())?;
        let labels =
            utils::string_values(batch.column_by_name(&self.config.label_column)?.as_ref());

        let mut genres: Vec<String> = Vec::new();
        for label in &labels {
            if !genres.contains(label) {
                genres.push(label.clone());
            }
        }

        Some(FacetData {
            xs,
            ys,
            labels,
            genres,
            brush_columns: utils::brush_columns(&batch),
        })
    }
}

impl SpaceView for FacetGridView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "FacetGridView"
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        if self.cached_data.is_none() {
            self.cached_data = self.fetch_data(ctx);
        }

        let Some(data) = self.cached_data.take() else {
            ui.centered_and_justified(|ui| {
                ui.label("No data to display");
            });
            return;
        };

        let snapshot = ctx.selection.snapshot();
        let columns = self.config.columns.max(1);
        let spacing = ui.spacing().item_spacing.x;
        let cell_width =
            ((ui.available_width() - spacing * (columns as f32 - 1.0)) / columns as f32).max(80.0);

        egui::Grid::new((self.id, "facets"))
            .num_columns(columns)
            .spacing([spacing, spacing])
            .show(ui, |ui| {
                for (genre_index, genre) in data.genres.iter().enumerate() {
                    ui.vertical(|ui| {
                        ui.set_width(cell_width);
                        ui.label(
                            egui::RichText::new(genre.as_str())
                                .small()
                                .color(colors::genre_color(genre_index)),
                        );

                        let mut series: Vec<[f64; 2]> = Vec::new();
                        for row in 0..data.xs.len() {
                            if data.labels[row] != *genre {
                                continue;
                            }
                            if !utils::row_passes_brush(&snapshot, &data.brush_columns, row) {
                                continue;
                            }
                            let (x, y) = (data.xs[row], data.ys[row]);
                            if x.is_finite() && y.is_finite() {
                                series.push([x, y]);
                            }
                        }

                        let base = colors::genre_color(genre_index);
                        let color = if snapshot.is_emphasized(genre) {
                            base
                        } else {
                            base.linear_multiply(0.15)
                        };

                        Plot::new((self.id, genre.clone()))
                            .width(cell_width)
                            .height(self.config.cell_height)
                            .show_grid(false)
                            .allow_scroll(false)
                            .show(ui, |plot_ui| {
                                plot_ui.points(
                                    Points::new(PlotPoints::new(series))
                                        .color(color)
                                        .radius(1.8)
                                        .shape(MarkerShape::Circle),
                                );
                            });
                    });

                    if (genre_index + 1) % columns == 0 {
                        ui.end_row();
                    }
                }
            });

        self.cached_data = Some(data);
    }

    fn save_config(&self) -> Value {
        json!({
            "x_column": self.config.x_column,
            "y_column": self.config.y_column,
            "label_column": self.config.label_column,
            "columns": self.config.columns,
            "cell_height": self.config.cell_height,
        })
    }

    fn load_config(&mut self, config: Value) {
        if let Some(x_col) = config.get("x_column").and_then(|v| v.as_str()) {
            self.config.x_column = x_col.to_string();
        }
        if let Some(y_col) = config.get("y_column").and_then(|v| v.as_str()) {
            self.config.y_column = y_col.to_string();
        }
        if let Some(columns) = config.get("columns").and_then(|v| v.as_u64()) {
            self.config.columns = columns as usize;
        }
        if let Some(cell_height) = config.get("cell_height").and_then(|v| v.as_f64()) {
            self.config.cell_height = cell_height as f32;
        }
        self.cached_data = None;
    }

    fn on_selection_change(&mut self, _ctx: &ViewerContext, _selection: &SelectionContext) {}
}
