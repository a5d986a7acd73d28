use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Gold background for the top-ranked company.
pub const HIGHLIGHT: Color32 = Color32::from_rgb(255, 215, 0);

const BEST_HUE: f32 = 51.0;
const WORST_HUE: f32 = 210.0;

// ---------------------------------------------------------------------------
// Rank gradient
// ---------------------------------------------------------------------------

/// `n` colours fading from gold (position 1) towards blue (position n).
pub fn rank_gradient(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let t = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 };
            let hue = BEST_HUE + t * (WORST_HUE - BEST_HUE);
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_has_one_colour_per_row() {
        assert!(rank_gradient(0).is_empty());
        assert_eq!(rank_gradient(10).len(), 10);
    }

    #[test]
    fn gradient_starts_warm_and_ends_cool() {
        let colours = rank_gradient(10);
        let first = colours[0];
        let last = colours[9];
        assert!(first.r() > first.b());
        assert!(last.b() > last.r());
    }
}
