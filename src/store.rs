//! Particle state storage.
//!
//! [`ParticleStore`] keeps particle state as structure-of-arrays: parallel
//! `positions` / `velocities` / `type_ids` vectors rather than a vector of
//! particle structs. The pairwise pass is O(N²) over these arrays, so the
//! layout keeps the inner loop reading contiguous, type-uniform memory.
//!
//! Particles are grouped by type: all of type 0 first, then type 1, and so
//! on, with `group_ranges` recording the bucket boundaries so renderers can
//! draw one type at a time. The grouping is an internal convenience, not a
//! stable ordering contract.

use glam::Vec2;
use tracing::{debug, warn};

use crate::spawn::SpawnContext;

/// Structure-of-arrays particle state over a toroidal world.
#[derive(Clone, Debug)]
pub struct ParticleStore {
    pub(crate) positions: Vec<Vec2>,
    pub(crate) velocities: Vec<Vec2>,
    pub(crate) type_ids: Vec<u32>,
    /// Bucket offsets: type `t` occupies `[group_ranges[t], group_ranges[t + 1])`.
    group_ranges: Vec<usize>,
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl ParticleStore {
    /// Create an empty store over a `width` x `height` world.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            positions: Vec::new(),
            velocities: Vec::new(),
            type_ids: Vec::new(),
            group_ranges: vec![0],
            width,
            height,
        }
    }

    /// Rebuild the store from per-type counts.
    ///
    /// Drops all existing particles, assigns types bucket-by-bucket in
    /// ascending type order, draws positions uniformly over the world and
    /// zeroes velocities. Any non-negative counts are legal, including
    /// all-zero (an empty store).
    pub fn rebuild(&mut self, counts: &[u32], ctx: &mut SpawnContext) {
        let total: usize = counts.iter().map(|&c| c as usize).sum();

        self.positions.clear();
        self.velocities.clear();
        self.type_ids.clear();
        self.positions.reserve(total);
        self.velocities.reserve(total);
        self.type_ids.reserve(total);

        self.group_ranges.clear();
        self.group_ranges.push(0);
        for (type_id, &count) in counts.iter().enumerate() {
            for _ in 0..count {
                self.positions.push(ctx.random_in_world());
                self.velocities.push(Vec2::ZERO);
                self.type_ids.push(type_id as u32);
            }
            self.group_ranges.push(self.positions.len());
        }

        debug!(particles = total, types = counts.len(), "rebuilt particle store");
    }

    /// Update world bounds, keeping particles.
    ///
    /// Existing positions are wrapped into the new bounds immediately so
    /// the position invariant holds even before the next tick. Velocities
    /// are untouched. Non-positive bounds are a caller bug and are
    /// ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            warn!(width, height, "ignoring resize to non-positive bounds");
            return;
        }
        self.width = width;
        self.height = height;
        for p in &mut self.positions {
            p.x = p.x.rem_euclid(width);
            p.y = p.y.rem_euclid(height);
        }
        debug!(width, height, "resized world");
    }

    /// Toroidally-shortest displacement from `from` to `to`.
    ///
    /// Each axis is corrected by at most one world extent, so the result
    /// lies in `[-width/2, width/2] x [-height/2, height/2]`.
    #[inline]
    pub fn wrapped_delta(&self, from: Vec2, to: Vec2) -> Vec2 {
        let mut dx = to.x - from.x;
        let mut dy = to.y - from.y;
        if dx > self.width * 0.5 {
            dx -= self.width;
        } else if dx < -self.width * 0.5 {
            dx += self.width;
        }
        if dy > self.height * 0.5 {
            dy -= self.height;
        } else if dy < -self.height * 0.5 {
            dy += self.height;
        }
        Vec2::new(dx, dy)
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the store holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// World width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// World height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// All particle positions.
    #[inline]
    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    /// All particle velocities.
    #[inline]
    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities
    }

    /// Per-particle type ids.
    #[inline]
    pub fn type_ids(&self) -> &[u32] {
        &self.type_ids
    }

    /// Index range holding all particles of type `type_id`.
    pub fn group_range(&self, type_id: usize) -> std::ops::Range<usize> {
        self.group_ranges[type_id]..self.group_ranges[type_id + 1]
    }

    /// Positions as raw bytes, for uploading to a vertex buffer.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Velocities as raw bytes.
    pub fn velocity_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.velocities)
    }
}
