use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

mod engine;
mod subscriber;

pub use engine::SelectionEngine;
pub use subscriber::SelectionSubscriber;

/// An interval dragged out over one feature axis.
///
/// The brush is shared by every linked chart: a view checks each row's
/// value of `feature` against `[min, max]` when drawing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrushRange {
    /// Feature column the interval was dragged on
    pub feature: String,
    pub min: f64,
    pub max: f64,
}

impl BrushRange {
    /// Build a range from two drag endpoints in either order.
    pub fn from_endpoints(feature: impl Into<String>, a: f64, b: f64) -> Self {
        Self {
            feature: feature.into(),
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

/// Snapshot of the shared selection state handed to views at render time.
#[derive(Debug, Clone, Default)]
pub struct SelectionContext {
    /// Active brush interval, if any
    pub brush: Option<BrushRange>,
    /// Genres emphasized via the legend; empty means all genres
    pub emphasized: BTreeSet<String>,
    /// Monotonically increasing change counter for cache staleness checks
    pub generation: u64,
}

impl SelectionContext {
    /// Whether a row with the given label should be drawn at full strength.
    pub fn is_emphasized(&self, label: &str) -> bool {
        self.emphasized.is_empty() || self.emphasized.contains(label)
    }

    /// Whether a row passes the brush, given the value of the brushed feature.
    pub fn passes_brush(&self, value: Option<f64>) -> bool {
        match (&self.brush, value) {
            (Some(brush), Some(v)) => brush.contains(v),
            (Some(_), None) => false,
            (None, _) => true,
        }
    }
}
