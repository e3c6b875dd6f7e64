//! Genre breakdown pie chart

use egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use serde_json::{json, Value};

use crate::{SpaceView, SpaceViewId};
use sv_core::{SelectionContext, ViewerContext};

use super::utils::{self, colors};

/// Configuration for the genre pie view
#[derive(Debug, Clone)]
pub struct GenrePieConfig {
    /// Genre label column
    pub label_column: String,

    /// Whether to append the row count to each slice label
    pub show_counts: bool,
}

impl Default for GenrePieConfig {
    fn default() -> Self {
        Self {
            label_column: "label".to_string(),
            show_counts: true,
        }
    }
}

/// Cached pie data
struct PieData {
    /// Genre and row count, in dataset row order
    slices: Vec<(String, usize)>,
    total: usize,
}

/// Pie chart of per-genre row counts; slice values always sum to the
/// dataset row count.
pub struct GenrePieView {
    id: SpaceViewId,
    title: String,
    pub config: GenrePieConfig,

    // State
    cached_data: Option<PieData>,
}

impl GenrePieView {
    pub fn new(id: SpaceViewId, title: String) -> Self {
        Self {
            id,
            title,
            config: GenrePieConfig::default(),
            cached_data: None,
        }
    }

    fn fetch_data(&mut self, ctx: &ViewerContext) -> Option<PieData> {
        let data_source = ctx.data_source.read();
        let data_source = data_source.as_ref()?;

        let batch = match ctx.runtime_handle.block_on(data_source.query_all()) {
            Ok(b) => b,
            Err(e) => {
                tracing::error!("Failed to fetch pie data: {}", e);
                return None;
            }
        };

        let labels =
            utils::string_values(batch.column_by_name(&self.config.label_column)?.as_ref());

        // Count per genre, preserving first-appearance order
        let mut slices: Vec<(String, usize)> = Vec::new();
        for label in &labels {
            match slices.iter_mut().find(|(genre, _)| genre == label) {
                Some((_, count)) => *count += 1,
                None => slices.push((label.clone(), 1)),
            }
        }

        let total = labels.len();
        if total == 0 {
            return None;
        }

        Some(PieData { slices, total })
    }
}

impl SpaceView for GenrePieView {
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
        "GenrePieView"
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        if self.cached_data.is_none() {
            self.cached_data = self.fetch_data(ctx);
        }

        let Some(data) = &self.cached_data else {
            ui.centered_and_justified(|ui| {
                ui.label("No data to display");
            });
            return;
        };

        let side = ui.available_width().clamp(160.0, 280.0);
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
        let rect = response.rect;
        let center = rect.center();
        let radius = rect.width().min(rect.height()) * 0.33;

        let mut angle = -std::f64::consts::FRAC_PI_2;
        for (slice_index, (genre, count)) in data.slices.iter().enumerate() {
            let sweep = (*count as f64 / data.total as f64) * std::f64::consts::TAU;
            let color = colors::genre_color(slice_index);

            // Arc polygon: center plus sampled rim points
            let steps = ((sweep / 0.05).ceil() as usize).max(2);
            let mut points = Vec::with_capacity(steps + 2);
            points.push(center);
            for step in 0..=steps {
                let a = angle + sweep * (step as f64 / steps as f64);
                points.push(Pos2::new(
                    center.x + radius * a.cos() as f32,
                    center.y + radius * a.sin() as f32,
                ));
            }
            painter.add(Shape::convex_polygon(
                points,
                color,
                Stroke::new(1.0, ui.style().visuals.panel_fill),
            ));

            // Label at the slice midpoint, outside the rim
            let mid = angle + sweep / 2.0;
            let label_pos = Pos2::new(
                center.x + radius * 1.35 * mid.cos() as f32,
                center.y + radius * 1.35 * mid.sin() as f32,
            );
            let text = if self.config.show_counts {
                format!("{} ({})", genre, count)
            } else {
                genre.clone()
            };
            painter.text(
                label_pos,
                Align2::CENTER_CENTER,
                text,
                FontId::proportional(10.0),
                Color32::GRAY,
            );

            angle += sweep;
        }

        ui.label(
            egui::RichText::new(format!("{} tracks across {} genres", data.total, data.slices.len()))
                .small()
                .weak(),
        );
    }

    fn save_config(&self) -> Value {
        json!({
            "label_column": self.config.label_column,
            "show_counts": self.config.show_counts,
        })
    }

    fn load_config(&mut self, config: Value) {
        if let Some(label_col) = config.get("label_column").and_then(|v| v.as_str()) {
            self.config.label_column = label_col.to_string();
        }
        if let Some(show_counts) = config.get("show_counts").and_then(|v| v.as_bool()) {
            self.config.show_counts = show_counts;
        }
        self.cached_data = None;
    }

    fn on_selection_change(&mut self, _ctx: &ViewerContext, _selection: &SelectionContext) {}
}
