//! Selection engine implementation

use super::{BrushRange, SelectionContext, SelectionSubscriber};
use std::collections::BTreeSet;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

/// Selection state stored internally
#[derive(Debug, Clone, Default)]
struct SelectionState {
    brush: Option<BrushRange>,
    emphasized: BTreeSet<String>,
    generation: u64,
}

/// The shared brush + legend selection, observable by every view.
///
/// All linked charts read the same snapshot during a frame; mutations bump
/// the generation counter and notify subscribers.
pub struct SelectionEngine {
    state: Arc<RwLock<SelectionState>>,
    subscribers: Arc<RwLock<Vec<Weak<dyn SelectionSubscriber>>>>,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(SelectionState::default())),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Replace the brush interval.
    pub fn set_brush(&self, brush: BrushRange) {
        {
            let mut state = self.state.write();
            if state.brush.as_ref() == Some(&brush) {
                return;
            }
            state.brush = Some(brush);
            state.generation += 1;
        }
        self.notify_subscribers();
    }

    /// Clear the brush interval.
    pub fn clear_brush(&self) {
        {
            let mut state = self.state.write();
            if state.brush.is_none() {
                return;
            }
            state.brush = None;
            state.generation += 1;
        }
        self.notify_subscribers();
    }

    /// Toggle a genre label in the legend selection.
    pub fn toggle_label(&self, label: &str) {
        {
            let mut state = self.state.write();
            if !state.emphasized.remove(label) {
                state.emphasized.insert(label.to_string());
            }
            state.generation += 1;
        }
        tracing::debug!("Legend selection toggled: {}", label);
        self.notify_subscribers();
    }

    /// Drop the legend selection entirely (all genres shown).
    pub fn clear_labels(&self) {
        {
            let mut state = self.state.write();
            if state.emphasized.is_empty() {
                return;
            }
            state.emphasized.clear();
            state.generation += 1;
        }
        self.notify_subscribers();
    }

    /// Get an immutable snapshot of the current selection.
    pub fn snapshot(&self) -> SelectionContext {
        let state = self.state.read();
        SelectionContext {
            brush: state.brush.clone(),
            emphasized: state.emphasized.clone(),
            generation: state.generation,
        }
    }

    /// Add a subscriber
    pub fn add_subscriber(&self, subscriber: Arc<dyn SelectionSubscriber>) {
        let mut subscribers = self.subscribers.write();
        subscribers.push(Arc::downgrade(&subscriber));
    }

    /// Notify all subscribers of a selection change
    fn notify_subscribers(&self) {
        let context = self.snapshot();
        let mut subscribers = self.subscribers.write();

        // Remove any dead weak references
        subscribers.retain(|weak| weak.strong_count() > 0);

        for weak in subscribers.iter() {
            if let Some(subscriber) = weak.upgrade() {
                subscriber.on_selection_change(&context);
            }
        }
    }
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSubscriber(AtomicUsize);

    impl SelectionSubscriber for CountingSubscriber {
        fn on_selection_change(&self, _context: &SelectionContext) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_brush_round_trip() {
        let engine = SelectionEngine::new();
        assert!(engine.snapshot().brush.is_none());

        engine.set_brush(BrushRange::from_endpoints("tempo", 140.0, 90.0));
        let brush = engine.snapshot().brush.expect("brush set");
        assert_eq!(brush.min, 90.0);
        assert_eq!(brush.max, 140.0);
        assert!(brush.contains(120.0));
        assert!(!brush.contains(150.0));

        engine.clear_brush();
        assert!(engine.snapshot().brush.is_none());
    }

    #[test]
    fn test_label_toggle() {
        let engine = SelectionEngine::new();
        assert!(engine.snapshot().is_emphasized("jazz"));

        engine.toggle_label("jazz");
        let snapshot = engine.snapshot();
        assert!(snapshot.is_emphasized("jazz"));
        assert!(!snapshot.is_emphasized("metal"));

        engine.toggle_label("jazz");
        assert!(engine.snapshot().is_emphasized("metal"));
    }

    #[test]
    fn test_generation_monotonicity() {
        let engine = SelectionEngine::new();
        let g0 = engine.snapshot().generation;

        engine.set_brush(BrushRange::from_endpoints("rms_mean", 0.1, 0.2));
        let g1 = engine.snapshot().generation;
        assert!(g1 > g0);

        // No-op mutations do not bump the counter
        engine.clear_labels();
        assert_eq!(engine.snapshot().generation, g1);

        engine.toggle_label("blues");
        assert!(engine.snapshot().generation > g1);
    }

    #[test]
    fn test_subscriber_notification() {
        let engine = SelectionEngine::new();
        let subscriber = Arc::new(CountingSubscriber(AtomicUsize::new(0)));
        engine.add_subscriber(subscriber.clone());

        engine.set_brush(BrushRange::from_endpoints("tempo", 0.0, 1.0));
        engine.clear_brush();
        assert_eq!(subscriber.0.load(Ordering::SeqCst), 2);
    }
}
