//! Selection subscriber trait

use super::SelectionContext;

/// Trait for components that need to respond to brush/legend changes
pub trait SelectionSubscriber: Send + Sync {
    /// Called when the shared selection changes
    fn on_selection_change(&self, context: &SelectionContext);
}
