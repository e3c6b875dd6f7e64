//! Small reusable widgets

use egui::Ui;

/// Toggle `value` in an ordered selection list.
///
/// Newly picked entries append to the end, so the list records click
/// order — the axis resolver reads the first two picks.
pub fn toggle_selection(selected: &mut Vec<String>, value: &str) {
    if let Some(index) = selected.iter().position(|v| v == value) {
        selected.remove(index);
    } else {
        selected.push(value.to_string());
    }
}

/// A multiselect rendered as a row of toggle buttons that preserves the
/// order options were picked in. Returns true if the selection changed.
pub fn ordered_multiselect(
    ui: &mut Ui,
    label: &str,
    options: &[&str],
    selected: &mut Vec<String>,
) -> bool {
    let mut changed = false;

    // Drop selections for options that no longer exist
    let before = selected.len();
    selected.retain(|value| options.iter().any(|o| o == value));
    changed |= selected.len() != before;

    ui.horizontal_wrapped(|ui| {
        if !label.is_empty() {
            ui.label(label);
        }
        for option in options {
            let is_selected = selected.iter().any(|v| v == option);
            if ui.selectable_label(is_selected, *option).clicked() {
                toggle_selection(selected, option);
                changed = true;
            }
        }
    });

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_preserves_click_order() {
        let mut selected = Vec::new();
        toggle_selection(&mut selected, "tempo");
        toggle_selection(&mut selected, "rms_mean");
        toggle_selection(&mut selected, "harmony_mean");
        assert_eq!(selected, vec!["tempo", "rms_mean", "harmony_mean"]);

        // Removing the middle entry keeps the rest in order
        toggle_selection(&mut selected, "rms_mean");
        assert_eq!(selected, vec!["tempo", "harmony_mean"]);

        // Re-adding appends at the end
        toggle_selection(&mut selected, "rms_mean");
        assert_eq!(selected, vec!["tempo", "harmony_mean", "rms_mean"]);
    }
}
