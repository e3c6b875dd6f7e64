//! Construction of the linked chart stack

use sv_data::CORE_FEATURES;
use sv_views::LinkedCharts;

/// Fallback axis pair when fewer than two features are picked.
pub const DEFAULT_AXIS_PAIR: (&str, &str) = ("tempo", "chroma_stft_mean");

/// Features offered by the axis multiselect, in display order.
pub const AXIS_CANDIDATES: [&str; 5] = [
    "harmony_mean",
    "rms_mean",
    "chroma_stft_mean",
    "rolloff_mean",
    "tempo",
];

/// Resolve the scatter axes from an ordered multiselect.
///
/// With two or more picks the first two are used in click order; otherwise
/// the default pair applies. Duplicate picks are passed through unchanged —
/// a same-feature pair draws a degenerate diagonal and is harmless.
pub fn resolve_axis_features(selected: &[String], defaults: (&str, &str)) -> (String, String) {
    if selected.len() < 2 {
        (defaults.0.to_string(), defaults.1.to_string())
    } else {
        (selected[0].clone(), selected[1].clone())
    }
}

/// Build the six linked views: one overview pair and five strip plots, all
/// reading the shared brush and legend selection.
pub fn build_linked_views(x_column: &str, y_column: &str) -> LinkedCharts {
    LinkedCharts::new(x_column, y_column, &CORE_FEATURES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picks(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_defaults_when_underselected() {
        let expected = ("tempo".to_string(), "chroma_stft_mean".to_string());
        assert_eq!(resolve_axis_features(&[], DEFAULT_AXIS_PAIR), expected);
        assert_eq!(
            resolve_axis_features(&picks(&["rms_mean"]), DEFAULT_AXIS_PAIR),
            expected
        );
    }

    #[test]
    fn test_first_two_in_click_order() {
        let selected = picks(&["rolloff_mean", "harmony_mean", "tempo"]);
        assert_eq!(
            resolve_axis_features(&selected, DEFAULT_AXIS_PAIR),
            ("rolloff_mean".to_string(), "harmony_mean".to_string())
        );
    }

    #[test]
    fn test_duplicate_picks_pass_through() {
        let selected = picks(&["tempo", "tempo"]);
        assert_eq!(
            resolve_axis_features(&selected, DEFAULT_AXIS_PAIR),
            ("tempo".to_string(), "tempo".to_string())
        );
    }

    #[test]
    fn test_linked_stack_shape() {
        let linked = build_linked_views("tempo", "chroma_stft_mean");
        assert_eq!(linked.strip_count(), CORE_FEATURES.len());
        assert!(!linked.use_facet_grid());
    }
}
