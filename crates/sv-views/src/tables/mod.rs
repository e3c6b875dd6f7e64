//! Raw dataset table view

use arrow::record_batch::RecordBatch;
use egui::Ui;
use serde_json::{json, Value};

use crate::{SpaceView, SpaceViewId};
use sv_core::{SelectionContext, ViewerContext};

/// Configuration for the raw table view
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub show_row_numbers: bool,
    pub striped_rows: bool,
    pub max_rows_displayed: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            show_row_numbers: true,
            striped_rows: true,
            max_rows_displayed: 1000,
        }
    }
}

/// Scrollable table of the raw dataset
pub struct RawTableView {
    id: SpaceViewId,
    title: String,
    pub config: TableConfig,

    // State
    cached_data: Option<RecordBatch>,
}

impl RawTableView {
    pub fn new(id: SpaceViewId, title: String) -> Self {
        Self {
            id,
            title,
            config: TableConfig::default(),
            cached_data: None,
        }
    }

    fn fetch_data(&mut self, ctx: &ViewerContext) -> Option<RecordBatch> {
        let data_source = ctx.data_source.read();
        let data_source = data_source.as_ref()?;
        ctx.runtime_handle.block_on(data_source.query_all()).ok()
    }

    fn render_table(&self, ui: &mut Ui, data: &RecordBatch) {
        use egui_extras::{Column, TableBuilder};

        let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;
        let num_rows = data.num_rows().min(self.config.max_rows_displayed);
        let schema_fields = data.schema().fields().clone();

        let mut builder = TableBuilder::new(ui)
            .striped(self.config.striped_rows)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .min_scrolled_height(0.0)
            .max_scroll_height(320.0)
            .vscroll(true);

        if self.config.show_row_numbers {
            builder = builder.column(Column::initial(50.0).at_least(40.0));
        }
        for _ in 0..schema_fields.len() {
            builder = builder.column(
                Column::initial(120.0)
                    .at_least(70.0)
                    .at_most(320.0)
                    .clip(true)
                    .resizable(true),
            );
        }

        builder
            .header(20.0, |mut header| {
                if self.config.show_row_numbers {
                    header.col(|ui| {
                        ui.strong("#");
                    });
                }
                for field in schema_fields.iter() {
                    header.col(|ui| {
                        ui.strong(field.name());
                    });
                }
            })
            .body(|body| {
                body.rows(text_height, num_rows, |row_index, mut row| {
                    if self.config.show_row_numbers {
                        row.col(|ui| {
                            ui.weak(row_index.to_string());
                        });
                    }
                    for col_index in 0..data.num_columns() {
                        row.col(|ui| {
                            let value = arrow::util::display::array_value_to_string(
                                data.column(col_index),
                                row_index,
                            )
                            .unwrap_or_default();
                            ui.label(value);
                        });
                    }
                });
            });
    }
}

impl SpaceView for RawTableView {
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
        "RawTableView"
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        if self.cached_data.is_none() {
            self.cached_data = self.fetch_data(ctx);
        }

        match &self.cached_data {
            Some(data) => {
                let data = data.clone();
                self.render_table(ui, &data);
                let shown = data.num_rows().min(self.config.max_rows_displayed);
                if shown < data.num_rows() {
                    ui.weak(format!("Showing {} of {} rows", shown, data.num_rows()));
                }
            }
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label("No data to display");
                });
            }
        }
    }

    fn save_config(&self) -> Value {
        json!({
            "show_row_numbers": self.config.show_row_numbers,
            "striped_rows": self.config.striped_rows,
            "max_rows_displayed": self.config.max_rows_displayed,
        })
    }

    fn load_config(&mut self, config: Value) {
        if let Some(show) = config.get("show_row_numbers").and_then(|v| v.as_bool()) {
            self.config.show_row_numbers = show;
        }
        if let Some(striped) = config.get("striped_rows").and_then(|v| v.as_bool()) {
            self.config.striped_rows = striped;
        }
        if let Some(max_rows) = config.get("max_rows_displayed").and_then(|v| v.as_u64()) {
            self.config.max_rows_displayed = max_rows as usize;
        }
    }

    fn on_selection_change(&mut self, _ctx: &ViewerContext, _selection: &SelectionContext) {}
}
