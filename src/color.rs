use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::GroupKey;

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
            let hsl = Hsl::new(hue, 0.65, 0.55);
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
// Category → Color32
// ---------------------------------------------------------------------------

/// Stable colour per category value within one chart.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<GroupKey, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(categories: &[GroupKey]) -> Self {
        let mapping = categories
            .iter()
            .cloned()
            .zip(generate_palette(categories.len()))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, key: &GroupKey) -> Color32 {
        self.mapping.get(key).copied().unwrap_or(self.default_color)
    }

    /// Legend entries (label → colour) in key order.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(k, c)| (k.to_string(), *c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colours = generate_palette(5);
        assert_eq!(colours.len(), 5);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_category_falls_back_to_gray() {
        let map = ColorMap::new(&[GroupKey::Category("Sports".to_string())]);
        assert_ne!(map.color_for(&GroupKey::Category("Sports".to_string())), Color32::GRAY);
        assert_eq!(map.color_for(&GroupKey::Category("Truck".to_string())), Color32::GRAY);
        assert_eq!(map.legend_entries().len(), 1);
    }

    #[test]
    fn legend_follows_key_order_with_slice_colours() {
        let keys: Vec<GroupKey> = ["Sports", "Executivecar", "Mediumfamilycar"]
            .iter()
            .map(|s| GroupKey::Category(s.to_string()))
            .collect();
        let map = ColorMap::new(&keys);

        let legend = map.legend_entries();
        let names: Vec<&str> = legend.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Executivecar", "Mediumfamilycar", "Sports"]);

        let mut sorted = keys.clone();
        sorted.sort();
        for ((_, colour), key) in legend.iter().zip(&sorted) {
            assert_eq!(*colour, map.color_for(key));
        }
    }
}
