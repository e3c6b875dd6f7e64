//! Main application entry point

use std::sync::Arc;

use anyhow::Result;
use eframe::egui::{self, Context, RichText, Ui};
use parking_lot::RwLock;
use tracing::{error, info};

use sv_core::{
    DataSource, HoveredData, SelectionContext, SelectionEngine, SelectionSubscriber,
    ViewerContext,
};
use sv_data::{AudioLibrary, DatasetLoader, TrackDataset, CORE_FEATURES};
use sv_ui::explore_panel::PlayRequest;
use sv_ui::{apply_theme, ordered_multiselect, ExplorePanel, Theme};
use sv_views::{
    CorrelationHeatmapView, GenrePieView, LinkedCharts, RawTableView, SpaceView, SpaceViewId,
};

mod config;
mod playback;
mod view_builder;

use config::AppConfig;
use playback::AudioPlayer;
use view_builder::{build_linked_views, resolve_axis_features, AXIS_CANDIDATES, DEFAULT_AXIS_PAIR};

const INTRO: &str = "Explore how songs cluster by their audio features. Pick a pair of \
features to see how they correlate across genres, drag across any strip plot to focus the \
linked charts on a value range, and click a genre in the legend to emphasize it everywhere.";

/// Requests a repaint whenever the shared brush/legend selection changes.
struct RepaintOnSelection {
    egui_ctx: egui::Context,
}

impl SelectionSubscriber for RepaintOnSelection {
    fn on_selection_change(&self, _context: &SelectionContext) {
        self.egui_ctx.request_repaint();
    }
}

/// Main application state
struct SongscopeApp {
    /// Viewer context shared between all views
    viewer_context: Arc<ViewerContext>,

    /// The loaded dataset; None when startup loading failed
    dataset: Option<Arc<TrackDataset>>,

    /// Fatal startup error, rendered instead of the dashboard
    load_error: Option<String>,

    /// The six linked chart views
    linked: LinkedCharts,

    /// Ordered axis multiselect state
    axis_selection: Vec<String>,
    current_axes: (String, String),
    show_facet_grid: bool,

    heatmap: CorrelationHeatmapView,
    pie: GenrePieView,
    table: RawTableView,
    explore: ExplorePanel,

    audio_library: AudioLibrary,
    player: Option<AudioPlayer>,

    /// Tokio runtime backing the data source queries
    _runtime: tokio::runtime::Runtime,

    /// Keeps the repaint subscriber alive for the engine's weak reference
    _repaint_hook: Arc<RepaintOnSelection>,
}

impl SongscopeApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Setup custom theme
        apply_theme(&cc.egui_ctx, &Theme::default());

        // Initialize tokio runtime
        let runtime = tokio::runtime::Runtime::new().unwrap();

        let config = AppConfig::default();
        let selection = Arc::new(SelectionEngine::new());

        // Create shared viewer context
        let viewer_context = Arc::new(ViewerContext {
            data_source: Arc::new(RwLock::new(None)),
            selection: selection.clone(),
            hovered_data: Arc::new(RwLock::new(HoveredData::default())),
            runtime_handle: runtime.handle().clone(),
        });

        // Repaint on every brush/legend change so linked views stay in sync
        let repaint_hook = Arc::new(RepaintOnSelection {
            egui_ctx: cc.egui_ctx.clone(),
        });
        selection.add_subscriber(repaint_hook.clone());

        // Load the dataset once; re-renders reuse the memoized copy
        let loader = DatasetLoader::new();
        let (dataset, load_error) = match runtime.block_on(loader.load(&config.dataset_path)) {
            Ok(dataset) => {
                let source: Arc<dyn DataSource> = dataset.clone();
                *viewer_context.data_source.write() = Some(source);
                (Some(dataset), None)
            }
            Err(e) => {
                error!("Failed to load dataset: {}", e);
                (
                    None,
                    Some(format!(
                        "Could not read {:?}: {}",
                        config.dataset_path, e
                    )),
                )
            }
        };

        let axis_selection = vec![
            DEFAULT_AXIS_PAIR.0.to_string(),
            DEFAULT_AXIS_PAIR.1.to_string(),
        ];
        let current_axes = resolve_axis_features(&axis_selection, DEFAULT_AXIS_PAIR);
        let linked = build_linked_views(&current_axes.0, &current_axes.1);

        let mut heatmap = CorrelationHeatmapView::new(
            SpaceViewId::new_v4(),
            "Intercorrelation heatmap".to_string(),
        );
        let mut features: Vec<String> = CORE_FEATURES.iter().map(|s| s.to_string()).collect();
        features.sort();
        heatmap.config.features = features;
        if let Some(dataset) = &dataset {
            let mut genres = dataset.genres().to_vec();
            genres.sort();
            heatmap.config.genres = genres;
        }

        let pie = GenrePieView::new(
            SpaceViewId::new_v4(),
            "Proportion of genres in the dataset".to_string(),
        );
        let table = RawTableView::new(SpaceViewId::new_v4(), "Raw dataset".to_string());

        let player = match AudioPlayer::new() {
            Ok(player) => Some(player),
            Err(e) => {
                error!("Audio output unavailable: {}", e);
                None
            }
        };

        Self {
            viewer_context,
            dataset,
            load_error,
            linked,
            axis_selection,
            current_axes,
            show_facet_grid: false,
            heatmap,
            pie,
            table,
            explore: ExplorePanel::new(),
            audio_library: AudioLibrary::new(config.audio_root),
            player,
            _runtime: runtime,
            _repaint_hook: repaint_hook,
        }
    }

    /// Resolve and start playback for one song; failures become a notice
    /// in the explore panel rather than a crash.
    fn handle_play_request(&mut self, request: PlayRequest) {
        info!("Play requested: {}/{}", request.genre, request.filename);
        match self
            .audio_library
            .load_bytes(&request.genre, &request.filename)
        {
            Ok(bytes) => match self.player.as_mut() {
                Some(player) => match player.play_wav(bytes) {
                    Ok(()) => self.explore.set_now_playing(request),
                    Err(e) => {
                        error!("Playback failed: {}", e);
                        self.explore.set_playback_error(format!("Playback failed: {}", e));
                    }
                },
                None => self
                    .explore
                    .set_playback_error("Audio output unavailable on this machine"),
            },
            Err(e) => self.explore.set_playback_error(e.to_string()),
        }
    }

    /// Dataset missing or unreadable: the whole page is replaced by an
    /// error screen, nothing else renders.
    fn show_fatal_error(&self, ui: &mut Ui, message: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.heading("Dataset unavailable");
            ui.add_space(12.0);
            ui.label(message);
            ui.add_space(12.0);
            ui.label(
                RichText::new("Place the features table next to the executable and restart.")
                    .weak(),
            );
        });
    }

    fn show_dashboard(&mut self, ui: &mut Ui) {
        let Some(dataset) = self.dataset.clone() else {
            return;
        };
        let viewer_context = self.viewer_context.clone();

        ui.heading("Recognizing patterns in songs");
        ui.label(RichText::new(INTRO).weak());
        ui.add_space(6.0);

        // Ordered multiselect: the first two picks become the scatter axes
        let changed = ordered_multiselect(
            ui,
            "Choose X and Y features to see how they correlate:",
            &AXIS_CANDIDATES,
            &mut self.axis_selection,
        );
        if changed {
            let axes = resolve_axis_features(&self.axis_selection, DEFAULT_AXIS_PAIR);
            if axes != self.current_axes {
                self.linked.set_axes(&axes.0, &axes.1);
                self.current_axes = axes;
            }
        }

        ui.add_space(8.0);
        ui.horizontal_top(|ui| {
            // Chart column
            let left_width = (ui.available_width() * 0.62).max(480.0);
            ui.vertical(|ui| {
                ui.set_width(left_width);
                ui.strong("Analyze the correlation among genres");

                let mut facet = self.show_facet_grid;
                if ui.checkbox(&mut facet, "Genre breakdown grid").changed() {
                    self.show_facet_grid = facet;
                    self.linked.set_facet_grid(facet);
                }
                ui.label(
                    RichText::new(
                        "Drag across a strip plot to brush; double-click a strip to clear.",
                    )
                    .weak()
                    .small(),
                );

                self.linked.ui(&viewer_context, ui);
            });

            ui.add_space(12.0);

            // Explorer column
            ui.vertical(|ui| {
                ui.strong("Explore the songs");

                let genre = self
                    .explore
                    .selected_genre()
                    .map(str::to_string)
                    .unwrap_or_else(|| dataset.genres().first().cloned().unwrap_or_default());
                let playlist = dataset.playlist(&genre);

                if let Some(request) = self.explore.ui(ui, dataset.genres(), &playlist) {
                    self.handle_play_request(request);
                }

                ui.add_space(8.0);
                egui::CollapsingHeader::new("Genre breakdown pie chart").show(ui, |ui| {
                    self.pie.ui(&viewer_context, ui);
                });
            });
        });

        ui.add_space(12.0);
        ui.separator();

        // Heatmap section
        ui.strong("Intercorrelation heatmap");
        ui.horizontal_top(|ui| {
            let left_width = (ui.available_width() * 0.6).max(420.0);
            ui.vertical(|ui| {
                ui.set_width(left_width);
                ui.set_min_height(340.0);
                self.heatmap.ui(&viewer_context, ui);
            });

            ui.add_space(12.0);

            ui.vertical(|ui| {
                let mut feature_options = CORE_FEATURES.to_vec();
                feature_options.sort_unstable();
                ordered_multiselect(
                    ui,
                    "Features to include in the heatmap:",
                    &feature_options,
                    &mut self.heatmap.config.features,
                );

                let mut genre_options: Vec<&str> =
                    dataset.genres().iter().map(String::as_str).collect();
                genre_options.sort_unstable();
                ordered_multiselect(
                    ui,
                    "Genres to include in the correlation:",
                    &genre_options,
                    &mut self.heatmap.config.genres,
                );

                ui.checkbox(
                    &mut self.heatmap.config.scale_to_observed,
                    "Scale colors to the observed min/max",
                );
            });
        });

        ui.add_space(8.0);
        egui::CollapsingHeader::new("See the raw dataset").show(ui, |ui| {
            self.table.ui(&viewer_context, ui);
        });

        ui.add_space(8.0);
        ui.weak("Songscope — an interactive explorer for the song features dataset.");
    }
}

impl eframe::App for SongscopeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(message) = self.load_error.clone() {
                self.show_fatal_error(ui, &message);
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.show_dashboard(ui);
                });
        });
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Songscope");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([900.0, 600.0]),
        default_theme: eframe::Theme::Dark,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "Songscope",
        options,
        Box::new(|cc| Box::new(SongscopeApp::new(cc))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
