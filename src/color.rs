use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
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

// ---------------------------------------------------------------------------
// Color mapping: sample name → Color32
// ---------------------------------------------------------------------------

/// Gives each sample of a table its own colour, shared by the bar chart
/// and the sample table.
#[derive(Debug, Clone, Default)]
pub struct SampleColors {
    mapping: BTreeMap<String, Color32>,
}

impl SampleColors {
    pub fn new<'a>(samples: impl IntoIterator<Item = &'a str>) -> Self {
        let mut names: Vec<&str> = samples.into_iter().collect();
        names.sort_unstable();
        names.dedup();
        let mapping = names
            .iter()
            .zip(generate_palette(names.len()))
            .map(|(name, c)| (name.to_string(), c))
            .collect();
        Self { mapping }
    }

    /// Colour of `sample`, grey for names not in the table.
    pub fn color_for(&self, sample: &str) -> Color32 {
        self.mapping.get(sample).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_length() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(5);
        assert_eq!(colors.len(), 5);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn colors_do_not_depend_on_row_order() {
        let a = SampleColors::new(["x", "y", "z"]);
        let b = SampleColors::new(["z", "x", "y"]);
        assert_eq!(a.color_for("y"), b.color_for("y"));
        assert_eq!(a.color_for("missing"), Color32::GRAY);
    }
}
