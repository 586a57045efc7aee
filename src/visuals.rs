//! Per-type color palettes.
//!
//! The engine itself never reads colors; it carries one color per particle
//! type through to the snapshot so renderers can draw each type
//! consistently. [`Palette::type_colors`] turns a preset gradient into a
//! discrete per-type table.
//!
//! # Example
//!
//! ```ignore
//! let mut config = SimConfig::default();
//! config.colors = Palette::Neon.type_colors(config.type_count());
//! ```

use glam::Vec3;

/// Pre-defined color palettes sampled into per-type colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Palette {
    /// Classic rainbow gradient (red through violet) - the default.
    #[default]
    Rainbow,

    /// Vibrant cyberpunk colors (pink, cyan, purple).
    Neon,

    /// Cool blues and teals.
    Ocean,

    /// Warm oranges and pinks.
    Sunset,

    /// Black to white.
    Grayscale,
}

impl Palette {
    /// Get the color stops for this palette (5 colors).
    pub fn colors(&self) -> [Vec3; 5] {
        match self {
            Palette::Rainbow => [
                Vec3::new(1.0, 0.0, 0.0), // Red
                Vec3::new(1.0, 1.0, 0.0), // Yellow
                Vec3::new(0.0, 1.0, 0.0), // Green
                Vec3::new(0.0, 1.0, 1.0), // Cyan
                Vec3::new(0.5, 0.0, 1.0), // Purple
            ],
            Palette::Neon => [
                Vec3::new(1.0, 0.0, 0.6), // Hot pink
                Vec3::new(0.8, 0.0, 1.0), // Magenta
                Vec3::new(0.4, 0.2, 1.0), // Electric purple
                Vec3::new(0.0, 0.6, 1.0), // Blue
                Vec3::new(0.0, 1.0, 0.9), // Cyan
            ],
            Palette::Ocean => [
                Vec3::new(0.0, 0.05, 0.15), // Deep blue
                Vec3::new(0.0, 0.2, 0.4),   // Dark blue
                Vec3::new(0.0, 0.4, 0.6),   // Blue
                Vec3::new(0.2, 0.6, 0.8),   // Light blue
                Vec3::new(0.6, 0.9, 1.0),   // Cyan
            ],
            Palette::Sunset => [
                Vec3::new(0.1, 0.0, 0.2), // Dark purple
                Vec3::new(0.5, 0.0, 0.5), // Purple
                Vec3::new(1.0, 0.2, 0.4), // Pink
                Vec3::new(1.0, 0.5, 0.2), // Orange
                Vec3::new(1.0, 0.9, 0.4), // Yellow
            ],
            Palette::Grayscale => [
                Vec3::new(0.1, 0.1, 0.1),
                Vec3::new(0.3, 0.3, 0.3),
                Vec3::new(0.5, 0.5, 0.5),
                Vec3::new(0.75, 0.75, 0.75),
                Vec3::new(1.0, 1.0, 1.0),
            ],
        }
    }

    /// Sample `type_count` evenly spaced colors across the palette.
    ///
    /// One color per particle type, linearly interpolated between the
    /// five stops. A single type gets the first stop; zero types get an
    /// empty table.
    pub fn type_colors(&self, type_count: usize) -> Vec<Vec3> {
        let stops = self.colors();
        (0..type_count)
            .map(|t| {
                let fraction = if type_count > 1 {
                    t as f32 / (type_count - 1) as f32
                } else {
                    0.0
                };
                let scaled = fraction * (stops.len() - 1) as f32;
                let lower = (scaled as usize).min(stops.len() - 2);
                stops[lower].lerp(stops[lower + 1], scaled - lower as f32)
            })
            .collect()
    }
}
