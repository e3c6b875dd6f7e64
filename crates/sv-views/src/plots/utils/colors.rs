//! Color utilities for plots

use egui::Color32;

/// Fixed palette for the ten genre labels, keyed by genre index.
///
/// Matches the conventional blues/classical/.../rock ordering of the
/// dataset so a genre keeps its color across every view.
pub fn genre_color(index: usize) -> Color32 {
    const PALETTE: &[Color32] = &[
        Color32::from_rgb(66, 110, 240),   // blue
        Color32::from_rgb(255, 140, 0),    // dark orange
        Color32::from_rgb(220, 60, 60),    // red
        Color32::from_rgb(64, 200, 200),   // cyan
        Color32::from_rgb(80, 180, 80),    // green
        Color32::from_rgb(235, 195, 50),   // gold
        Color32::from_rgb(190, 80, 220),   // magenta
        Color32::from_rgb(255, 105, 180),  // hot pink
        Color32::from_rgb(160, 82, 45),    // sienna
        Color32::from_rgb(176, 176, 176),  // silver
    ];
    PALETTE[index % PALETTE.len()]
}

/// Color for rows pushed outside the active brush interval.
pub fn muted_tick() -> Color32 {
    Color32::from_gray(70)
}

/// Sequential colormap for the correlation heatmap, light at 0 to a deep
/// red-black at 1 (a rocket-style ramp, reversed so strong correlations
/// read dark).
pub fn rocket_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);

    // Piecewise-linear ramp through four anchor colors
    const STOPS: &[(f32, (u8, u8, u8))] = &[
        (0.00, (250, 235, 221)),
        (0.35, (240, 96, 67)),
        (0.70, (158, 22, 83)),
        (1.00, (35, 4, 43)),
    ];

    for window in STOPS.windows(2) {
        let (t0, c0) = window[0];
        let (t1, c1) = window[1];
        if t <= t1 {
            let s = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
            return Color32::from_rgb(
                (c0.0 as f32 * (1.0 - s) + c1.0 as f32 * s) as u8,
                (c0.1 as f32 * (1.0 - s) + c1.1 as f32 * s) as u8,
                (c0.2 as f32 * (1.0 - s) + c1.2 as f32 * s) as u8,
            );
        }
    }

    let (_, last) = STOPS[STOPS.len() - 1];
    Color32::from_rgb(last.0, last.1, last.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_wraps() {
        assert_eq!(genre_color(0), genre_color(10));
        assert_ne!(genre_color(0), genre_color(1));
    }

    #[test]
    fn test_rocket_endpoints() {
        assert_eq!(rocket_color(0.0), Color32::from_rgb(250, 235, 221));
        assert_eq!(rocket_color(1.0), Color32::from_rgb(35, 4, 43));
        // Out-of-range inputs clamp
        assert_eq!(rocket_color(-2.0), rocket_color(0.0));
        assert_eq!(rocket_color(5.0), rocket_color(1.0));
    }
}
