//! User interface components for the song exploration dashboard
//!
//! This crate provides the egui-based UI pieces around the charts: the
//! theme, the genre/song explorer panel, and small reusable widgets.

pub mod explore_panel;
pub mod glossary;
pub mod theme;
pub mod widgets;

/// Re-export commonly used types
pub use explore_panel::{ExplorePanel, PlayRequest};
pub use glossary::FEATURE_GLOSSARY;
pub use theme::{apply_theme, Theme};
pub use widgets::ordered_multiselect;

// Common icon definitions
pub mod icons {
    pub const PLAY: &str = "▶";
    pub const PAUSE: &str = "⏸";
    pub const STOP: &str = "⏹";
    pub const MUSIC: &str = "🎵";
    pub const CHART: &str = "📊";
}
