use std::collections::BTreeMap;

use airport_explorer::data::AirportType;
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
            let hsl = Hsl::new(hue, 0.70, 0.50);
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
// Airport type → Color32
// ---------------------------------------------------------------------------

/// One colour per airport type, shared by the bar chart, the map and the
/// sidebar so a type looks the same everywhere.
#[derive(Debug, Clone, Default)]
pub struct TypeColors {
    mapping: BTreeMap<AirportType, Color32>,
}

impl TypeColors {
    pub fn new(types: &[AirportType]) -> Self {
        let mapping = types
            .iter()
            .cloned()
            .zip(generate_palette(types.len()))
            .collect();
        Self { mapping }
    }

    pub fn color_for(&self, kind: &AirportType) -> Color32 {
        self.mapping.get(kind).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colours() {
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        for (i, a) in p.iter().enumerate() {
            assert!(p[i + 1..].iter().all(|b| a != b));
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_types_fall_back_to_gray() {
        let colors = TypeColors::new(&[AirportType::SmallAirport, AirportType::Heliport]);
        assert_ne!(colors.color_for(&AirportType::SmallAirport), Color32::GRAY);
        assert_eq!(colors.color_for(&AirportType::Closed), Color32::GRAY);
    }
}
