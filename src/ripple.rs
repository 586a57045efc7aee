//! Transient pointer-triggered impulses.
//!
//! A ripple is an expanding circular wavefront injected at a world point
//! (typically where a pointer went down). Each tick it grows by
//! [`RIPPLE_SPEED`], its strength decays geometrically, and every particle
//! sitting inside the wavefront band gets an outward velocity kick. Ripples
//! are independent of particle types and of each other; overlapping ripples
//! simply sum.
//!
//! Ripples live entirely in the [`RippleSet`]; nothing else holds them.

use glam::Vec2;
use tracing::trace;

use crate::store::ParticleStore;

/// Wavefront expansion speed, world units per tick.
pub const RIPPLE_SPEED: f32 = 6.0;
/// Half-influence band: particles within this distance of the wavefront
/// are pushed.
pub const RIPPLE_WIDTH: f32 = 30.0;
/// Geometric strength decay applied every tick.
pub const STRENGTH_DECAY: f32 = 0.95;
/// Ripples below this strength are dropped.
pub const STRENGTH_FLOOR: f32 = 0.05;
/// Ripples older than this many ticks are dropped regardless of strength.
pub const MAX_AGE: u32 = 300;
/// Impulse multiplier applied on top of `intensity * strength`.
pub const IMPULSE_SCALE: f32 = 5.0;

/// One expanding impulse wavefront.
#[derive(Clone, Copy, Debug)]
pub struct Ripple {
    /// World point the ripple expands from.
    pub origin: Vec2,
    /// Ticks since creation.
    pub age: u32,
    /// Current impulse strength.
    pub strength: f32,
}

impl Ripple {
    /// Current wavefront radius in world units.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.age as f32 * RIPPLE_SPEED
    }
}

/// The set of currently live ripples, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct RippleSet {
    ripples: Vec<Ripple>,
}

impl RippleSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ripple at `(x, y)` with the given starting strength.
    ///
    /// No-op when `strength` is not positive - that is how hosts disable
    /// ripples globally.
    pub fn trigger(&mut self, x: f32, y: f32, strength: f32) {
        if strength > 0.0 {
            trace!(x, y, strength, "ripple triggered");
            self.ripples.push(Ripple {
                origin: Vec2::new(x, y),
                age: 0,
                strength,
            });
        }
    }

    /// Advance every ripple one tick and kick nearby particles.
    ///
    /// Per ripple, in insertion order: age it, expand the wavefront, decay
    /// its strength, then either retire it (strength under
    /// [`STRENGTH_FLOOR`] or age past [`MAX_AGE`]) or push every particle
    /// within [`RIPPLE_WIDTH`] of the wavefront outward. The push uses the
    /// toroidally-shortest displacement from the origin, the same metric
    /// as the pairwise force pass, and falls off linearly across the band.
    /// Only velocities are touched; integration happens later in the tick.
    pub fn advance_and_apply(&mut self, store: &mut ParticleStore) {
        let particle_count = store.len();
        self.ripples.retain_mut(|ripple| {
            ripple.age += 1;
            let radius = ripple.radius();
            ripple.strength *= STRENGTH_DECAY;
            if ripple.strength < STRENGTH_FLOOR || ripple.age > MAX_AGE {
                return false;
            }

            for i in 0..particle_count {
                let delta = store.wrapped_delta(ripple.origin, store.positions[i]);
                let dist = delta.length();
                if dist <= f32::EPSILON {
                    // Particle sits on the origin: no defined direction
                    continue;
                }
                let from_front = (dist - radius).abs();
                if from_front < RIPPLE_WIDTH {
                    let intensity = 1.0 - from_front / RIPPLE_WIDTH;
                    let impulse = intensity * ripple.strength * IMPULSE_SCALE;
                    store.velocities[i] += delta * (impulse / dist);
                }
            }
            true
        });
    }

    /// Live ripples, for rendering.
    #[inline]
    pub fn as_slice(&self) -> &[Ripple] {
        &self.ripples
    }

    /// Number of live ripples.
    #[inline]
    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    /// Whether no ripples are live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawn::SpawnContext;

    fn empty_store() -> ParticleStore {
        ParticleStore::new(1000.0, 1000.0)
    }

    fn store_with_positions(positions: &[Vec2]) -> ParticleStore {
        let mut store = ParticleStore::new(1000.0, 1000.0);
        let mut ctx = SpawnContext::new(1000.0, 1000.0, Some(0));
        store.rebuild(&[positions.len() as u32], &mut ctx);
        store.positions.copy_from_slice(positions);
        store
    }

    #[test]
    fn test_trigger_zero_strength_is_noop() {
        let mut set = RippleSet::new();
        set.trigger(10.0, 10.0, 0.0);
        set.trigger(10.0, 10.0, -1.0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_strength_decays_geometrically() {
        let mut set = RippleSet::new();
        let mut store = empty_store();
        set.trigger(0.0, 0.0, 1.0);
        for k in 1..=58 {
            set.advance_and_apply(&mut store);
            assert_eq!(set.len(), 1, "removed too early at tick {k}");
            let expected = 0.95f32.powi(k);
            assert!((set.as_slice()[0].strength - expected).abs() < 1e-4);
        }
        // 0.95^59 dips under the floor
        set.advance_and_apply(&mut store);
        assert!(set.is_empty());
    }

    #[test]
    fn test_age_cap_removes_strong_ripples() {
        let mut set = RippleSet::new();
        let mut store = empty_store();
        // Strong enough that decay alone would outlive the cap
        set.trigger(0.0, 0.0, 1.0e6);
        for _ in 1..=300 {
            set.advance_and_apply(&mut store);
            assert_eq!(set.len(), 1);
        }
        set.advance_and_apply(&mut store);
        assert!(set.is_empty());
    }

    #[test]
    fn test_wavefront_center_impulse() {
        // One particle exactly on the wavefront after one tick
        let mut store = store_with_positions(&[Vec2::new(56.0, 50.0)]);
        let mut set = RippleSet::new();
        set.trigger(50.0, 50.0, 1.0);
        set.advance_and_apply(&mut store);

        // Decay precedes application; intensity is 1 at the band center
        let expected = 0.95 * IMPULSE_SCALE;
        let v = store.velocities()[0];
        assert!((v.x - expected).abs() < 1e-4, "got {v:?}");
        assert!(v.y.abs() < 1e-6);
    }

    #[test]
    fn test_outside_band_untouched() {
        // Front at radius 6; distance 36 puts the particle exactly at the
        // band edge, where intensity reaches zero
        let mut store = store_with_positions(&[Vec2::new(86.0, 50.0)]);
        let mut set = RippleSet::new();
        set.trigger(50.0, 50.0, 1.0);
        set.advance_and_apply(&mut store);
        assert_eq!(store.velocities()[0], Vec2::ZERO);
    }

    #[test]
    fn test_origin_coincident_particle_skipped() {
        let mut store = store_with_positions(&[Vec2::new(50.0, 50.0)]);
        let mut set = RippleSet::new();
        set.trigger(50.0, 50.0, 1.0);
        set.advance_and_apply(&mut store);
        assert_eq!(store.velocities()[0], Vec2::ZERO);
    }

    #[test]
    fn test_simultaneous_ripples_sum() {
        let mut store = store_with_positions(&[Vec2::new(56.0, 50.0)]);
        let mut set = RippleSet::new();
        set.trigger(50.0, 50.0, 1.0);
        set.trigger(50.0, 50.0, 1.0);
        set.advance_and_apply(&mut store);
        let expected = 2.0 * 0.95 * IMPULSE_SCALE;
        assert!((store.velocities()[0].x - expected).abs() < 1e-4);
    }

    #[test]
    fn test_impulse_wraps_across_seam() {
        // Origin near the right edge, particle just past the seam
        let mut store = store_with_positions(&[Vec2::new(2.0, 50.0)]);
        let mut set = RippleSet::new();
        set.trigger(996.0, 50.0, 1.0);
        set.advance_and_apply(&mut store);
        // Shortest displacement is +6 in x, so the kick points +x
        assert!(store.velocities()[0].x > 0.0);
        assert_eq!(store.velocities()[0].y, 0.0);
    }
}
