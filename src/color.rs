use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::stats::DistributionBucket;

/// Trend line / area colour.
pub const TREND: Color32 = Color32::from_rgb(0x0a, 0x84, 0xff);
/// First and second series of the comparison chart.
pub const COMPARE_A: Color32 = Color32::from_rgb(0x30, 0xd1, 0x58);
pub const COMPARE_B: Color32 = Color32::from_rgb(0xbf, 0x5a, 0xf2);
/// Error text in the upload panel and top bar.
pub const ERROR: Color32 = Color32::from_rgb(0xff, 0x45, 0x3a);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
/// The hue starts at the trend colour's blue.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (212.0 + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.85, 0.55);
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
// Slice colours for the distribution chart
// ---------------------------------------------------------------------------

/// One colour per distribution bucket, in bucket order.
#[derive(Debug, Clone)]
pub struct SliceColors {
    entries: Vec<(String, Color32)>,
}

impl SliceColors {
    pub fn new(buckets: &[DistributionBucket]) -> Self {
        let palette = generate_palette(buckets.len());
        let entries = buckets
            .iter()
            .zip(palette)
            .map(|(b, c)| (b.label.clone(), c))
            .collect();
        SliceColors { entries }
    }

    /// Colour of the `i`-th bucket.
    pub fn color_at(&self, i: usize) -> Color32 {
        self.entries
            .get(i)
            .map(|(_, c)| *c)
            .unwrap_or(Color32::GRAY)
    }

    /// Legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> &[(String, Color32)] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colors = generate_palette(5);
        assert_eq!(colors.len(), 5);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn slices_follow_bucket_order() {
        let buckets = vec![
            DistributionBucket { label: "NY".into(), count: 2 },
            DistributionBucket { label: "LA".into(), count: 1 },
        ];
        let slices = SliceColors::new(&buckets);
        let labels: Vec<&str> = slices.legend_entries().iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["NY", "LA"]);
        assert_eq!(slices.color_at(9), Color32::GRAY);
    }
}
