//! Simulation configuration.
//!
//! [`SimConfig`] is the full parameter snapshot the engine runs from. It is
//! validated once at the configuration boundary
//! ([`SimConfig::validate`]); inside a tick the engine treats every field
//! as trusted. Hosts mutate a copy and hand it back through
//! [`Engine::configure`](crate::Engine::configure) - the engine decides
//! whether the change needs a particle rebuild (counts changed) or can be
//! applied in place while motion continues.

use glam::Vec3;

use crate::error::ConfigError;
use crate::interactions::InteractionMatrix;
use crate::visuals::Palette;

/// All tunable parameters of a simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Desired particle count per type. The length defines the number of
    /// types; changing any element (or the length) triggers a rebuild.
    pub counts: Vec<u32>,

    /// Signed coefficient table, one row/column per type.
    pub matrix: InteractionMatrix,

    /// Fraction of velocity lost per tick, in `[0, 1)`. Values at or past
    /// 1.0 fully replace velocity with the tick's accumulated force.
    pub friction: f32,

    /// World-unit distance beyond which no pairwise force is computed.
    pub cut_off_radius: f32,

    /// Global force multiplier.
    pub force_factor: f32,

    /// Integration step multiplier, applied to both velocity accumulation
    /// and the position delta.
    pub time_scale: f32,

    /// Strength assigned to newly triggered ripples. Zero (or below)
    /// disables ripple creation.
    pub ripple_strength: f32,

    /// Per-type render color. Carried through to the snapshot untouched.
    pub colors: Vec<Vec3>,

    /// Spawn RNG seed; `None` draws from OS entropy on every rebuild.
    pub seed: Option<u64>,
}

impl SimConfig {
    /// Number of particle types.
    #[inline]
    pub fn type_count(&self) -> usize {
        self.counts.len()
    }

    /// Total particle count across all types.
    pub fn total_count(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    /// Check the configuration for shape and numeric validity.
    ///
    /// A failing config must not be applied; the engine keeps the previous
    /// one. NaN and infinity are rejected here so the tick loop never has
    /// to re-check them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let types = self.type_count();
        if self.matrix.type_count() != types {
            return Err(ConfigError::MatrixShape {
                types,
                matrix: self.matrix.type_count(),
            });
        }
        if self.colors.len() != types {
            return Err(ConfigError::ColorCount {
                types,
                colors: self.colors.len(),
            });
        }
        if !self.cut_off_radius.is_finite() || self.cut_off_radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.cut_off_radius));
        }
        if !self.friction.is_finite() {
            return Err(ConfigError::NonFinite("friction"));
        }
        if !self.force_factor.is_finite() {
            return Err(ConfigError::NonFinite("force_factor"));
        }
        if !self.time_scale.is_finite() {
            return Err(ConfigError::NonFinite("time_scale"));
        }
        if !self.ripple_strength.is_finite() {
            return Err(ConfigError::NonFinite("ripple_strength"));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    /// Three types, 200 particles each, zero matrix: a quiet starting
    /// point hosts are expected to randomize or preset.
    fn default() -> Self {
        let types = 3;
        Self {
            counts: vec![200; types],
            matrix: InteractionMatrix::new(types),
            friction: 0.1,
            cut_off_radius: 80.0,
            force_factor: 1.0,
            time_scale: 1.0,
            ripple_strength: 4.0,
            colors: Palette::default().type_colors(types),
            seed: None,
        }
    }
}
