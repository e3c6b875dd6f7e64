//! Strip plot: one tick per song along a single feature axis
//!
//! The strip plots own the shared brush: dragging across any strip sets an
//! interval on that strip's feature, and every linked view filters by it.

use std::collections::BTreeMap;

use egui::Ui;
use egui_plot::{Line, Plot, PlotPoints, Polygon};
use serde_json::{json, Value};

use crate::{SpaceView, SpaceViewId};
use sv_core::{BrushRange, SelectionContext, ViewerContext};

use super::utils::{self, colors};

/// Configuration for a strip plot view
#[derive(Debug, Clone)]
pub struct StripPlotConfig {
    /// The feature column shown on the X axis
    pub feature: String,

    /// Genre label column
    pub label_column: String,

    /// Plot height in points
    pub height: f32,
}

impl Default for StripPlotConfig {
    fn default() -> Self {
        Self {
            feature: String::new(),
            label_column: "label".to_string(),
            height: 56.0,
        }
    }
}

/// Cached strip data, row aligned with the dataset
struct StripData {
    values: Vec<f64>,
    labels: Vec<String>,
    genres: Vec<String>,
    brush_columns: BTreeMap<String, Vec<f64>>,
}

/// Strip plot view
pub struct StripPlotView {
    id: SpaceViewId,
    title: String,
    pub config: StripPlotConfig,

    // State
    cached_data: Option<StripData>,
    drag_origin: Option<f64>,
}

impl StripPlotView {
    pub fn new(id: SpaceViewId, feature: &str) -> Self {
        Self {
            id,
            title: feature.to_string(),
            config: StripPlotConfig {
                feature: feature.to_string(),
                ..StripPlotConfig::default()
            },
            cached_data: None,
            drag_origin: None,
        }
    }

    fn fetch_data(&mut self, ctx: &ViewerContext) -> Option<StripData> {
        if self.config.feature.is_empty() {
            return None;
        }

        let data_source = ctx.data_source.read();
        let data_source = data_source.as_ref()?;

        let batch = match ctx.runtime_handle.block_on(data_source.query_all()) {
            Ok(b) => b,
            Err(e) => {
                tracing::error!("Failed to fetch strip data: {}", e);
                return None;
            }
        };

        let values = utils::numeric_values(batch.column_by_name(&self.config.feature)?.as_ref())?;
        let labels =
            utils::string_values(batch.column_by_name(&self.config.label_column)?.as_ref());

        let mut genres: Vec<String> = Vec::new();
        for label in &labels {
            if !genres.contains(label) {
                genres.push(label.clone());
            }
        }

        Some(StripData {
            values,
            labels,
            genres,
            brush_columns: utils::brush_columns(&batch),
        })
    }
}

impl SpaceView for StripPlotView {
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
        "StripPlotView"
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        if self.cached_data.is_none() {
            self.cached_data = self.fetch_data(ctx);
        }

        let Some(data) = self.cached_data.take() else {
            ui.label(format!("No data for {}", self.config.feature));
            return;
        };

        let snapshot = ctx.selection.snapshot();
        let feature = self.config.feature.clone();

        // Pan/zoom is disabled so a drag always means "brush"
        let plot = Plot::new(format!("{:?}", self.id))
            .height(self.config.height)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show_axes(egui::Vec2b::new(true, false))
            .show_grid(false)
            .include_y(0.0)
            .include_y(1.0)
            .x_axis_label(&self.config.feature);

        let interaction = plot.show(ui, |plot_ui| {
            // Brush overlay, only on the strip the interval was dragged on
            if let Some(brush) = snapshot.brush.as_ref().filter(|b| b.feature == feature) {
                let corners = vec![
                    [brush.min, 0.0],
                    [brush.max, 0.0],
                    [brush.max, 1.0],
                    [brush.min, 1.0],
                ];
                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(corners))
                        .fill_color(egui::Color32::from_rgb(100, 150, 250).linear_multiply(0.15))
                        .stroke(egui::Stroke::new(
                            1.0,
                            egui::Color32::from_rgb(100, 150, 250),
                        )),
                );
            }

            // One tick per song; ticks outside the shared brush fall to gray
            for row in 0..data.values.len() {
                let value = data.values[row];
                if !value.is_finite() {
                    continue;
                }

                let color = if utils::row_passes_brush(&snapshot, &data.brush_columns, row) {
                    let genre_index = data
                        .genres
                        .iter()
                        .position(|g| g == &data.labels[row])
                        .unwrap_or(0);
                    let base = colors::genre_color(genre_index);
                    if snapshot.is_emphasized(&data.labels[row]) {
                        base
                    } else {
                        base.linear_multiply(0.15)
                    }
                } else {
                    colors::muted_tick()
                };

                plot_ui.line(
                    Line::new(vec![[value, 0.15], [value, 0.85]])
                        .color(color)
                        .width(1.5),
                );
            }

            let response = plot_ui.response();
            (
                plot_ui.pointer_coordinate(),
                response.drag_started(),
                response.dragged(),
                response.drag_released(),
                response.double_clicked(),
            )
        });

        let (pointer, drag_started, dragged, drag_released, double_clicked) = interaction.inner;

        if double_clicked {
            ctx.selection.clear_brush();
            self.drag_origin = None;
        } else {
            if drag_started {
                self.drag_origin = pointer.map(|p| p.x);
            }
            if dragged {
                if let (Some(origin), Some(p)) = (self.drag_origin, pointer) {
                    ctx.selection
                        .set_brush(BrushRange::from_endpoints(feature.as_str(), origin, p.x));
                }
            }
            if drag_released {
                self.drag_origin = None;
            }
        }

        self.cached_data = Some(data);
    }

    fn save_config(&self) -> Value {
        json!({
            "feature": self.config.feature,
            "label_column": self.config.label_column,
            "height": self.config.height,
        })
    }

    fn load_config(&mut self, config: Value) {
        if let Some(feature) = config.get("feature").and_then(|v| v.as_str()) {
            self.config.feature = feature.to_string();
            self.title = feature.to_string();
        }
        if let Some(label_col) = config.get("label_column").and_then(|v| v.as_str()) {
            self.config.label_column = label_col.to_string();
        }
        if let Some(height) = config.get("height").and_then(|v| v.as_f64()) {
            self.config.height = height as f32;
        }
        self.cached_data = None;
    }

    fn on_selection_change(&mut self, _ctx: &ViewerContext, _selection: &SelectionContext) {}
}
