//! Space view abstraction - base trait for all chart views

use egui::Ui;
use serde_json::Value;
use uuid::Uuid;

use sv_core::{SelectionContext, ViewerContext};

/// Unique identifier for a space view
pub type SpaceViewId = Uuid;

/// Base trait for all chart views (plots, tables, etc)
pub trait SpaceView: Send + Sync {
    /// Get the unique ID of this view
    fn id(&self) -> SpaceViewId;

    /// Get the display name
    fn display_name(&self) -> &str;

    /// Get the view type (for serialization)
    fn view_type(&self) -> &str;

    /// Get the title of this view
    fn title(&self) -> &str;

    /// Draw the UI
    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui);

    /// Save configuration
    fn save_config(&self) -> Value;

    /// Load configuration
    fn load_config(&mut self, config: Value);

    /// Handle brush/legend selection changes
    fn on_selection_change(&mut self, ctx: &ViewerContext, selection: &SelectionContext);

    /// Get as any for downcasting
    fn as_any(&self) -> &dyn std::any::Any;

    /// Get as any mut for downcasting
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
