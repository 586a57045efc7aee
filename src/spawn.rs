//! Spawn context for particle initialization.
//!
//! A small seeded RNG wrapper used when (re)building the particle store.
//! Seeding makes spawn layouts reproducible: the same seed over the same
//! world produces the same initial positions, which is the only place
//! randomness enters the engine.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Context used while spawning one batch of particles.
pub struct SpawnContext {
    /// World width in world units.
    pub width: f32,
    /// World height in world units.
    pub height: f32,
    /// Internal RNG - use the helper methods instead of accessing directly.
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a spawn context over a `width` x `height` world.
    ///
    /// `seed` pins the layout; `None` draws a fresh seed from OS entropy.
    pub fn new(width: f32, height: f32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self { width, height, rng }
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    /// Uniformly random point in `[0, width) x [0, height)`.
    pub fn random_in_world(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.gen_range(0.0..self.width),
            self.rng.gen_range(0.0..self.height),
        )
    }
}
