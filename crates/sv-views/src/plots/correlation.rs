//! Intercorrelation heatmap view

use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, Ui, Vec2};
use serde_json::{json, Value};

use crate::{SpaceView, SpaceViewId};
use sv_core::{SelectionContext, ViewerContext};

use super::utils::{self, colors, stats};

/// Configuration for the correlation heatmap view
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationHeatmapConfig {
    /// Feature columns included in the matrix
    pub features: Vec<String>,

    /// Genres whose rows feed the correlation
    pub genres: Vec<String>,

    /// Genre label column
    pub label_column: String,

    /// Scale colors to the observed matrix extrema instead of [-1, 1]
    pub scale_to_observed: bool,

    /// Annotate cells with the correlation value
    pub show_values: bool,
}

impl Default for CorrelationHeatmapConfig {
    fn default() -> Self {
        Self {
            features: Vec::new(),
            genres: Vec::new(),
            label_column: "label".to_string(),
            scale_to_observed: false,
            show_values: true,
        }
    }
}

/// Cached correlation data
struct HeatmapData {
    matrix: Vec<Vec<f64>>,
    names: Vec<String>,
    row_count: usize,
}

/// Pearson correlation heatmap over a feature and genre subset.
///
/// Only the lower triangle (row >= column) is drawn; the mirrored upper
/// half is masked.
pub struct CorrelationHeatmapView {
    id: SpaceViewId,
    title: String,
    pub config: CorrelationHeatmapConfig,

    // State
    cached_data: Option<HeatmapData>,
    last_key: Option<(Vec<String>, Vec<String>)>,
}

impl CorrelationHeatmapView {
    pub fn new(id: SpaceViewId, title: String) -> Self {
        Self {
            id,
            title,
            config: CorrelationHeatmapConfig::default(),
            cached_data: None,
            last_key: None,
        }
    }

    fn fetch_data(&mut self, ctx: &ViewerContext) -> Option<HeatmapData> {
        if self.config.features.is_empty() || self.config.genres.is_empty() {
            return None;
        }

        let data_source = ctx.data_source.read();
        let data_source = data_source.as_ref()?;

        let batch = match ctx.runtime_handle.block_on(data_source.query_all()) {
            Ok(b) => b,
            Err(e) => {
                tracing::error!("Failed to fetch correlation data: {}", e);
                return None;
            }
        };

        let labels =
            utils::string_values(batch.column_by_name(&self.config.label_column)?.as_ref());
        let mask: Vec<bool> = labels
            .iter()
            .map(|label| self.config.genres.iter().any(|g| g == label))
            .collect();
        let row_count = mask.iter().filter(|&&keep| keep).count();

        // Filter columns to the feature subset and rows to the genre subset
        let mut names = Vec::new();
        let mut columns = Vec::new();
        for feature in &self.config.features {
            let Some(column) = batch.column_by_name(feature) else {
                tracing::warn!("Heatmap feature '{}' not in dataset", feature);
                continue;
            };
            let Some(values) = utils::numeric_values(column.as_ref()) else {
                continue;
            };
            let filtered: Vec<f64> = values
                .into_iter()
                .zip(mask.iter())
                .filter(|(_, &keep)| keep)
                .map(|(v, _)| v)
                .collect();
            names.push(feature.clone());
            columns.push(filtered);
        }

        if names.is_empty() {
            return None;
        }

        let matrix = stats::correlation_matrix(&columns);
        tracing::debug!(
            "Correlation matrix: {} features over {} rows",
            names.len(),
            row_count
        );

        Some(HeatmapData {
            matrix,
            names,
            row_count,
        })
    }
}

impl SpaceView for CorrelationHeatmapView {
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
        "CorrelationHeatmapView"
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        // Recompute when the feature or genre subset changes
        let key = (self.config.features.clone(), self.config.genres.clone());
        if self.cached_data.is_none() || self.last_key.as_ref() != Some(&key) {
            self.cached_data = self.fetch_data(ctx);
            self.last_key = Some(key);
        }

        let Some(data) = &self.cached_data else {
            ui.centered_and_justified(|ui| {
                ui.label("No data to display");
                ui.label("Pick at least one feature and one genre");
            });
            return;
        };

        let n = data.names.len();
        let (vmin, vmax) = stats::color_bounds(&data.matrix, self.config.scale_to_observed);
        let span = (vmax - vmin).max(f64::EPSILON);

        let available_rect = ui.available_rect_before_wrap();
        let size = available_rect.size();

        // Cell size leaves a margin for the feature labels
        let margin = 110.0;
        let cell_size = ((size.x.min(size.y) - margin) / n as f32).clamp(18.0, 56.0);

        let painter = ui.painter();
        let rect = Rect::from_min_size(
            available_rect.min + Vec2::new(margin, 24.0),
            Vec2::splat(cell_size * n as f32),
        );

        // Lower triangle only; the mirrored upper half stays masked
        for i in 0..n {
            for j in 0..=i {
                let value = data.matrix[i][j];
                let cell_rect = Rect::from_min_size(
                    rect.min + Vec2::new(j as f32 * cell_size, i as f32 * cell_size),
                    Vec2::splat(cell_size),
                );

                let t = ((value - vmin) / span) as f32;
                let color = colors::rocket_color(t);
                painter.rect_filled(cell_rect, 0.0, color);

                if self.config.show_values && cell_size > 20.0 {
                    let text_color = if t > 0.55 { Color32::WHITE } else { Color32::BLACK };
                    painter.text(
                        cell_rect.center(),
                        Align2::CENTER_CENTER,
                        format!("{:.2}", value),
                        FontId::proportional(10.0),
                        text_color,
                    );
                }
            }
        }

        // Feature labels
        for i in 0..n {
            painter.text(
                Pos2::new(rect.min.x + (i as f32 + 0.5) * cell_size, rect.max.y + 5.0),
                Align2::CENTER_TOP,
                &data.names[i],
                FontId::proportional(10.0),
                Color32::GRAY,
            );
            painter.text(
                Pos2::new(rect.min.x - 5.0, rect.min.y + (i as f32 + 0.5) * cell_size),
                Align2::RIGHT_CENTER,
                &data.names[i],
                FontId::proportional(10.0),
                Color32::GRAY,
            );
        }

        // Color scale legend, vmax on top
        let legend_rect = Rect::from_min_size(
            Pos2::new(rect.max.x + 20.0, rect.min.y),
            Vec2::new(18.0, rect.height()),
        );
        for i in 0..100 {
            let t = i as f32 / 99.0;
            let color = colors::rocket_color(1.0 - t);
            let y = legend_rect.min.y + t * legend_rect.height();
            painter.line_segment(
                [
                    Pos2::new(legend_rect.min.x, y),
                    Pos2::new(legend_rect.max.x, y),
                ],
                Stroke::new(2.0, color),
            );
        }
        painter.text(
            Pos2::new(legend_rect.max.x + 5.0, legend_rect.min.y),
            Align2::LEFT_TOP,
            format!("{:.2}", vmax),
            FontId::proportional(10.0),
            Color32::GRAY,
        );
        painter.text(
            Pos2::new(legend_rect.max.x + 5.0, legend_rect.max.y),
            Align2::LEFT_BOTTOM,
            format!("{:.2}", vmin),
            FontId::proportional(10.0),
            Color32::GRAY,
        );

        ui.allocate_space(Vec2::new(0.0, rect.max.y - available_rect.min.y + 28.0));
        ui.separator();
        ui.horizontal(|ui| {
            ui.label(format!("{} features", n));
            ui.label(format!("{} rows", data.row_count));
            ui.label(if self.config.scale_to_observed {
                "scale: observed"
            } else {
                "scale: [-1, 1]"
            });
        });
    }

    fn save_config(&self) -> Value {
        json!({
            "features": self.config.features,
            "genres": self.config.genres,
            "label_column": self.config.label_column,
            "scale_to_observed": self.config.scale_to_observed,
            "show_values": self.config.show_values,
        })
    }

    fn load_config(&mut self, config: Value) {
        if let Some(features) = config.get("features").and_then(|v| v.as_array()) {
            self.config.features = features
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
        }
        if let Some(genres) = config.get("genres").and_then(|v| v.as_array()) {
            self.config.genres = genres
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
        }
        if let Some(scale) = config.get("scale_to_observed").and_then(|v| v.as_bool()) {
            self.config.scale_to_observed = scale;
        }
        if let Some(show_values) = config.get("show_values").and_then(|v| v.as_bool()) {
            self.config.show_values = show_values;
        }
        self.cached_data = None;
        self.last_key = None;
    }

    fn on_selection_change(&mut self, _ctx: &ViewerContext, _selection: &SelectionContext) {}
}
