//! Feature correlation scatter plot

use std::collections::BTreeMap;

use egui::{RichText, Ui};
use egui_plot::{MarkerShape, Plot, PlotPoints, Points};
use serde_json::{json, Value};

use crate::{SpaceView, SpaceViewId};
use sv_core::{SelectionContext, ViewerContext};

use super::utils::{self, colors};

/// Configuration for the feature scatter view
#[derive(Debug, Clone)]
pub struct FeatureScatterConfig {
    /// X-axis feature column
    pub x_column: String,

    /// Y-axis feature column
    pub y_column: String,

    /// Genre label column
    pub label_column: String,

    /// Base point radius
    pub point_radius: f32,

    /// Whether to show grid
    pub show_grid: bool,

    /// Opacity multiplier for genres outside the legend selection
    pub dim_factor: f32,
}

impl Default for FeatureScatterConfig {
    fn default() -> Self {
        Self {
            x_column: String::new(),
            y_column: String::new(),
            label_column: "label".to_string(),
            point_radius: 3.0,
            show_grid: true,
            dim_factor: 0.12,
        }
    }
}

/// Cached scatter plot data, row aligned with the dataset
struct ScatterData {
    xs: Vec<f64>,
    ys: Vec<f64>,
    labels: Vec<String>,
    filenames: Vec<String>,
    /// Unique genres in dataset row order, fixing each genre's palette slot
    genres: Vec<String>,
    /// Core feature columns for brush evaluation
    brush_columns: BTreeMap<String, Vec<f64>>,
}

/// Scatter plot of two features across all genres, linked to the shared
/// brush and legend selection.
pub struct FeatureScatterView {
    id: SpaceViewId,
    title: String,
    pub config: FeatureScatterConfig,

    // State
    cached_data: Option<ScatterData>,
}

impl FeatureScatterView {
    pub fn new(id: SpaceViewId, title: String) -> Self {
        Self {
            id,
            title,
            config: FeatureScatterConfig::default(),
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

    fn fetch_data(&mut self, ctx: &ViewerContext) -> Option<ScatterData> {
        if self.config.x_column.is_empty() || self.config.y_column.is_empty() {
            tracing::warn!("Scatter axes not configured");
            return None;
        }

        let data_source = ctx.data_source.read();
        let data_source = data_source.as_ref()?;

        let batch = match ctx.runtime_handle.block_on(data_source.query_all()) {
            Ok(b) => b,
            Err(e) => {
                tracing::error!("Failed to fetch scatter data: {}", e);
                return None;
            }
        };

        let xs = utils::numeric_values(batch.column_by_name(&self.config.x_column)?.as_ref())?;
        let ys = utils::numeric_values(batch.column_by_name(&self.config.y_column)?.as_ref())?;
        let labels =
            utils::string_values(batch.column_by_name(&self.config.label_column)?.as_ref());
        let filenames = batch
            .column_by_name("filename")
            .map(|c| utils::string_values(c.as_ref()))
            .unwrap_or_else(|| vec![String::new(); labels.len()]);

        let mut genres: Vec<String> = Vec::new();
        for label in &labels {
            if !genres.contains(label) {
                genres.push(label.clone());
            }
        }

        tracing::debug!(
            "Scatter data: {} rows, {} genres, axes {} x {}",
            xs.len(),
            genres.len(),
            self.config.x_column,
            self.config.y_column
        );

        Some(ScatterData {
            xs,
            ys,
            labels,
            filenames,
            genres,
            brush_columns: utils::brush_columns(&batch),
        })
    }

    /// Clickable legend row; clicking a genre toggles the shared legend
    /// selection across every linked view.
    fn legend_row(&self, ctx: &ViewerContext, ui: &mut Ui, data: &ScatterData) {
        let snapshot = ctx.selection.snapshot();
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("Genres:").weak());
            for (index, genre) in data.genres.iter().enumerate() {
                let emphasized = snapshot.is_emphasized(genre);
                let color = if emphasized {
                    colors::genre_color(index)
                } else {
                    colors::genre_color(index).linear_multiply(self.config.dim_factor)
                };
                let selected = snapshot.emphasized.contains(genre);
                if ui
                    .selectable_label(selected, RichText::new(genre.as_str()).color(color))
                    .clicked()
                {
                    ctx.selection.toggle_label(genre);
                }
            }
            if !snapshot.emphasized.is_empty() && ui.small_button("all").clicked() {
                ctx.selection.clear_labels();
            }
        });
    }
}

impl SpaceView for FeatureScatterView {
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
        "FeatureScatterView"
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

        self.legend_row(ctx, ui, &data);

        let snapshot = ctx.selection.snapshot();
        let plot = Plot::new(format!("{:?}", self.id))
            .show_grid(self.config.show_grid)
            .height(340.0)
            .auto_bounds(egui::Vec2b::new(true, true))
            .x_axis_label(&self.config.x_column)
            .y_axis_label(&self.config.y_column);

        let plot_response = plot
            .show(ui, |plot_ui| {
                // One series per genre so colors stay stable
                for (genre_index, genre) in data.genres.iter().enumerate() {
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

                    if series.is_empty() {
                        continue;
                    }

                    let base = colors::genre_color(genre_index);
                    let color = if snapshot.is_emphasized(genre) {
                        base
                    } else {
                        base.linear_multiply(self.config.dim_factor)
                    };

                    plot_ui.points(
                        Points::new(PlotPoints::new(series))
                            .color(color)
                            .radius(self.config.point_radius)
                            .shape(MarkerShape::Circle)
                            .name(genre),
                    );
                }

                // Hover: pick the nearest visible row in normalized plot space
                let pointer = plot_ui.pointer_coordinate()?;
                let bounds = plot_ui.plot_bounds();
                let x_span = bounds.width().max(f64::EPSILON);
                let y_span = bounds.height().max(f64::EPSILON);

                let mut best: Option<(usize, f64)> = None;
                for row in 0..data.xs.len() {
                    if !utils::row_passes_brush(&snapshot, &data.brush_columns, row) {
                        continue;
                    }
                    let (x, y) = (data.xs[row], data.ys[row]);
                    if !x.is_finite() || !y.is_finite() {
                        continue;
                    }
                    let dx = (x - pointer.x) / x_span;
                    let dy = (y - pointer.y) / y_span;
                    let dist = (dx * dx + dy * dy).sqrt();
                    if dist < 0.02 && best.map_or(true, |(_, d)| dist < d) {
                        best = Some((row, dist));
                    }
                }

                let (row, _) = best?;
                let genre_index = data
                    .genres
                    .iter()
                    .position(|g| g == &data.labels[row])
                    .unwrap_or(0);
                plot_ui.points(
                    Points::new(vec![[data.xs[row], data.ys[row]]])
                        .color(colors::genre_color(genre_index))
                        .radius(self.config.point_radius * 2.0)
                        .shape(MarkerShape::Circle),
                );
                Some(row)
            });

        if let Some(row) = plot_response.inner {
            {
                let mut hover = ctx.hovered_data.write();
                hover.x = data.xs[row];
                hover.y = data.ys[row];
                hover.filename = data.filenames[row].clone();
                hover.label = data.labels[row].clone();
                hover.row_index = Some(row);
            }
            plot_response.response.on_hover_ui_at_pointer(|ui| {
                ui.strong(&data.filenames[row]);
                ui.label(&data.labels[row]);
                ui.label(format!("{}: {:.3}", self.config.x_column, data.xs[row]));
                ui.label(format!("{}: {:.3}", self.config.y_column, data.ys[row]));
            });
        }

        self.cached_data = Some(data);
    }

    fn save_config(&self) -> Value {
        json!({
            "x_column": self.config.x_column,
            "y_column": self.config.y_column,
            "label_column": self.config.label_column,
            "point_radius": self.config.point_radius,
            "show_grid": self.config.show_grid,
        })
    }

    fn load_config(&mut self, config: Value) {
        if let Some(x_col) = config.get("x_column").and_then(|v| v.as_str()) {
            self.config.x_column = x_col.to_string();
        }
        if let Some(y_col) = config.get("y_column").and_then(|v| v.as_str()) {
            self.config.y_column = y_col.to_string();
        }
        if let Some(label_col) = config.get("label_column").and_then(|v| v.as_str()) {
            self.config.label_column = label_col.to_string();
        }
        if let Some(radius) = config.get("point_radius").and_then(|v| v.as_f64()) {
            self.config.point_radius = radius as f32;
        }
        if let Some(show_grid) = config.get("show_grid").and_then(|v| v.as_bool()) {
            self.config.show_grid = show_grid;
        }
        self.cached_data = None;
    }

    fn on_selection_change(&mut self, _ctx: &ViewerContext, _selection: &SelectionContext) {
        // Brush and legend are applied at draw time; nothing cached depends
        // on the selection.
    }
}
