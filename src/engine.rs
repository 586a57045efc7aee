//! The simulation engine.
//!
//! [`Engine`] owns all mutable simulation state and exposes the whole
//! control surface: [`configure`](Engine::configure),
//! [`resize`](Engine::resize), [`trigger_ripple`](Engine::trigger_ripple),
//! [`tick`](Engine::tick) and [`snapshot`](Engine::snapshot). A host frame
//! pump calls `tick()` once per frame, then draws from `snapshot()`.
//!
//! Every entry point takes `&mut self` or `&self`, so the single-writer
//! discipline the engine needs - no configuration change or render read
//! racing a tick - is enforced by the borrow checker rather than locks.
//! The engine never blocks, spawns threads, or yields mid-tick.

use glam::{Vec2, Vec3};
use tracing::{debug, warn};

use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::forces::tent_force;
use crate::ripple::{Ripple, RippleSet};
use crate::spawn::SpawnContext;
use crate::store::ParticleStore;

/// A complete particle-life simulation.
pub struct Engine {
    config: SimConfig,
    store: ParticleStore,
    ripples: RippleSet,
    /// Per-tick force accumulator, allocated once and reused.
    forces: Vec<Vec2>,
    ticks: u64,
}

impl Engine {
    /// Build an engine over a `width` x `height` world.
    ///
    /// The configuration is validated up front; particles are placed
    /// uniformly at random with zero velocity.
    pub fn new(config: SimConfig, width: f32, height: f32) -> Result<Self, ConfigError> {
        config.validate()?;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidWorld { width, height });
        }
        let mut engine = Self {
            config,
            store: ParticleStore::new(width, height),
            ripples: RippleSet::new(),
            forces: Vec::new(),
            ticks: 0,
        };
        engine.rebuild_store();
        Ok(engine)
    }

    /// Replace the active configuration.
    ///
    /// On validation failure the previous configuration stays active and
    /// particle state is untouched. Particles are rebuilt only when the
    /// per-type counts changed (length or any element) - an explicit
    /// comparison, no change-tracking machinery. Any other parameter swap
    /// leaves positions and velocities alone so motion continues smoothly.
    pub fn configure(&mut self, config: SimConfig) -> Result<(), ConfigError> {
        if let Err(err) = config.validate() {
            warn!(%err, "rejected configuration");
            return Err(err);
        }
        let rebuild = config.counts != self.config.counts;
        self.config = config;
        if rebuild {
            self.rebuild_store();
        }
        Ok(())
    }

    /// Update world bounds, keeping particles (wrapped into the new world).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.store.resize(width, height);
    }

    /// Inject a ripple at world coordinates.
    ///
    /// Callers translate from device coordinates beforehand. No-op when
    /// the configured ripple strength is zero.
    pub fn trigger_ripple(&mut self, x: f32, y: f32) {
        self.ripples.trigger(x, y, self.config.ripple_strength);
    }

    /// Advance the simulation by exactly one step.
    ///
    /// The fixed sequence: ripple impulses, pairwise forces, velocity
    /// update with friction, position update with toroidal wrap. Given
    /// identical state this is fully deterministic - randomness only ever
    /// enters at (re)build time.
    pub fn tick(&mut self) {
        self.ripples.advance_and_apply(&mut self.store);
        self.accumulate_pairwise_forces();
        self.integrate();
        self.ticks += 1;
    }

    /// Pairwise pass over all ordered pairs `(i, j)`, `i != j`.
    ///
    /// Ordered, not unordered: the matrix is generally asymmetric, so the
    /// force on `i` from `j` says nothing about the force on `j` from `i`.
    /// Displacements are toroidally shortest; pairs at or beyond the
    /// cutoff radius, and exactly coincident pairs, contribute nothing.
    fn accumulate_pairwise_forces(&mut self) {
        let n = self.store.len();
        self.forces.resize(n, Vec2::ZERO);

        let radius = self.config.cut_off_radius;
        let radius_sq = radius * radius;
        let force_factor = self.config.force_factor;

        for i in 0..n {
            let pos_i = self.store.positions[i];
            let row = self.config.matrix.row(self.store.type_ids[i] as usize);
            let mut accum = Vec2::ZERO;

            for j in 0..n {
                if j == i {
                    continue;
                }
                let delta = self.store.wrapped_delta(pos_i, self.store.positions[j]);
                let dist_sq = delta.length_squared();
                if dist_sq == 0.0 || dist_sq >= radius_sq {
                    continue;
                }
                let dist = dist_sq.sqrt();
                let coeff = row[self.store.type_ids[j] as usize];
                let force = tent_force(dist / radius, coeff) * force_factor;
                accum += delta * (force / dist);
            }
            self.forces[i] = accum;
        }
    }

    /// Velocity and position update from the accumulated forces.
    ///
    /// Runs only after the full pairwise pass. Positions move by at most a
    /// fraction of the world per tick, so one wrap per axis suffices.
    fn integrate(&mut self) {
        let keep = (1.0 - self.config.friction).max(0.0);
        let dt = self.config.time_scale;
        let width = self.store.width;
        let height = self.store.height;

        for i in 0..self.store.len() {
            let velocity = self.store.velocities[i] * keep + self.forces[i] * dt;
            self.store.velocities[i] = velocity;

            let mut p = self.store.positions[i] + velocity * dt;
            if p.x < 0.0 {
                p.x += width;
                if p.x >= width {
                    // A tiny negative can round up to the bound itself
                    p.x = 0.0;
                }
            } else if p.x >= width {
                p.x -= width;
            }
            if p.y < 0.0 {
                p.y += height;
                if p.y >= height {
                    p.y = 0.0;
                }
            } else if p.y >= height {
                p.y -= height;
            }
            self.store.positions[i] = p;
        }
    }

    /// Read-only view of everything a renderer needs.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            positions: self.store.positions(),
            type_ids: self.store.type_ids(),
            colors: &self.config.colors,
            ripples: self.ripples.as_slice(),
            width: self.store.width(),
            height: self.store.height(),
        }
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The particle store.
    #[inline]
    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    /// Ticks advanced since construction.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn rebuild_store(&mut self) {
        let mut ctx = SpawnContext::new(
            self.store.width(),
            self.store.height(),
            self.config.seed,
        );
        self.store.rebuild(&self.config.counts, &mut ctx);
        self.forces.clear();
        self.forces.resize(self.store.len(), Vec2::ZERO);
        debug!(
            particles = self.store.len(),
            types = self.config.type_count(),
            "engine (re)built"
        );
    }
}

/// Borrowed render view of one tick's results.
///
/// Produced by [`Engine::snapshot`]; holds no copies. How particles and
/// ripples are drawn (point size, wavefront style) is entirely the
/// renderer's business.
pub struct Snapshot<'a> {
    /// Particle positions, grouped by type.
    pub positions: &'a [Vec2],
    /// Per-particle type ids, indices into `colors`.
    pub type_ids: &'a [u32],
    /// Per-type render colors.
    pub colors: &'a [Vec3],
    /// Live ripples (origin, age, strength).
    pub ripples: &'a [Ripple],
    /// World width.
    pub width: f32,
    /// World height.
    pub height: f32,
}

impl Snapshot<'_> {
    /// Positions as raw bytes, ready for a vertex buffer upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forces::BETA;
    use crate::interactions::InteractionMatrix;
    use crate::visuals::Palette;

    /// Two-particle fixture: type 0 feels `coeff` from type 1, type 1
    /// ignores type 0.
    fn two_particle_config(coeff: f32) -> SimConfig {
        let mut matrix = InteractionMatrix::new(2);
        matrix.set(0, 1, coeff);
        SimConfig {
            counts: vec![1, 1],
            matrix,
            friction: 0.0,
            cut_off_radius: 100.0,
            force_factor: 1.0,
            time_scale: 1.0,
            ripple_strength: 4.0,
            colors: Palette::Rainbow.type_colors(2),
            seed: Some(11),
        }
    }

    #[test]
    fn test_rebuild_invariants() {
        let config = SimConfig {
            counts: vec![3, 2, 5],
            matrix: InteractionMatrix::new(3),
            colors: Palette::Rainbow.type_colors(3),
            ..SimConfig::default()
        };
        let engine = Engine::new(config, 800.0, 600.0).unwrap();
        let store = engine.store();
        assert_eq!(store.len(), 10);
        assert_eq!(store.positions().len(), 10);
        assert_eq!(store.velocities().len(), 10);
        assert_eq!(store.type_ids().len(), 10);
        for &t in store.type_ids() {
            assert!((t as usize) < 3);
        }
    }

    #[test]
    fn test_two_particle_force_matches_law() {
        let mut engine = Engine::new(two_particle_config(0.8), 1000.0, 1000.0).unwrap();
        engine.store.positions[0] = Vec2::new(100.0, 100.0);
        engine.store.positions[1] = Vec2::new(160.0, 100.0);
        engine.store.velocities.fill(Vec2::ZERO);

        engine.tick();

        // d = 60, radius = 100: velocity along the line equals the raw law
        let expected = tent_force(0.6, 0.8);
        let v0 = engine.store.velocities[0];
        assert!((v0.x - expected).abs() < 1e-5, "got {v0:?}");
        assert!(v0.y.abs() < 1e-6);
        // Type 1 ignores type 0 and sits outside the hard core
        assert_eq!(engine.store.velocities[1], Vec2::ZERO);
    }

    #[test]
    fn test_two_particle_force_across_seam() {
        let mut engine = Engine::new(two_particle_config(0.8), 1000.0, 1000.0).unwrap();
        // Wrapped distance is 60 even though the direct gap is 940
        engine.store.positions[0] = Vec2::new(980.0, 100.0);
        engine.store.positions[1] = Vec2::new(40.0, 100.0);
        engine.store.velocities.fill(Vec2::ZERO);

        engine.tick();

        let expected = tent_force(0.6, 0.8);
        let v0 = engine.store.velocities[0];
        assert!((v0.x - expected).abs() < 1e-5, "got {v0:?}");
    }

    #[test]
    fn test_full_friction_replaces_velocity() {
        let mut config = two_particle_config(0.8);
        config.friction = 1.0;
        let mut engine = Engine::new(config, 1000.0, 1000.0).unwrap();
        engine.store.positions[0] = Vec2::new(100.0, 100.0);
        engine.store.positions[1] = Vec2::new(160.0, 100.0);
        // Prior velocity must be fully annihilated by 1 - friction = 0
        engine.store.velocities[0] = Vec2::new(5.0, -3.0);

        engine.tick();

        let expected = tent_force(0.6, 0.8);
        let v0 = engine.store.velocities[0];
        assert!((v0.x - expected).abs() < 1e-5, "got {v0:?}");
        assert!(v0.y.abs() < 1e-6);
    }

    #[test]
    fn test_zero_matrix_is_stationary() {
        let config = SimConfig {
            counts: vec![2, 1],
            matrix: InteractionMatrix::new(2),
            friction: 0.0,
            cut_off_radius: 100.0,
            colors: Palette::Rainbow.type_colors(2),
            seed: Some(3),
            ..SimConfig::default()
        };
        let mut engine = Engine::new(config, 1000.0, 1000.0).unwrap();
        // Spacing of 50 puts every pair in the tent band (where a zero
        // coefficient means zero force), clear of the hard core
        engine.store.positions[0] = Vec2::new(100.0, 100.0);
        engine.store.positions[1] = Vec2::new(150.0, 100.0);
        engine.store.positions[2] = Vec2::new(125.0, 143.3);
        engine.store.velocities.fill(Vec2::ZERO);
        let before = engine.store.positions.clone();

        for _ in 0..25 {
            engine.tick();
        }
        assert_eq!(engine.store.positions, before);
        assert!(engine.store.velocities.iter().all(|&v| v == Vec2::ZERO));
    }

    #[test]
    fn test_hard_core_repels_regardless_of_coefficient() {
        let mut engine = Engine::new(two_particle_config(0.0), 1000.0, 1000.0).unwrap();
        // d/radius = 0.1 < BETA: unconditional repulsion
        engine.store.positions[0] = Vec2::new(100.0, 100.0);
        engine.store.positions[1] = Vec2::new(110.0, 100.0);
        engine.store.velocities.fill(Vec2::ZERO);
        assert!(0.1 < BETA);

        engine.tick();

        // Pushed away from the neighbor on the right
        assert!(engine.store.velocities[0].x < 0.0);
    }

    #[test]
    fn test_wrap_invariant_over_many_ticks() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::SmallRng::seed_from_u64(5);
        // Friction and force factor chosen so velocities stay far below
        // one world extent per tick
        let config = SimConfig {
            counts: vec![30, 30],
            matrix: InteractionMatrix::random(2, &mut rng),
            friction: 0.2,
            cut_off_radius: 60.0,
            force_factor: 0.1,
            colors: Palette::Neon.type_colors(2),
            seed: Some(8),
            ..SimConfig::default()
        };
        let mut engine = Engine::new(config, 300.0, 200.0).unwrap();
        engine.trigger_ripple(150.0, 100.0);

        for _ in 0..60 {
            engine.tick();
            for p in engine.store().positions() {
                assert!((0.0..300.0).contains(&p.x), "x out of bounds: {p:?}");
                assert!((0.0..200.0).contains(&p.y), "y out of bounds: {p:?}");
            }
        }
    }

    #[test]
    fn test_configure_same_counts_keeps_state() {
        let mut engine = Engine::new(two_particle_config(0.8), 1000.0, 1000.0).unwrap();
        engine.store.positions[0] = Vec2::new(100.0, 100.0);
        engine.store.positions[1] = Vec2::new(160.0, 100.0);
        for _ in 0..5 {
            engine.tick();
        }
        let positions = engine.store.positions.clone();
        let velocities = engine.store.velocities.clone();

        let mut next = two_particle_config(0.8);
        next.friction = 0.5;
        next.cut_off_radius = 42.0;
        engine.configure(next).unwrap();

        assert_eq!(engine.store.positions, positions);
        assert_eq!(engine.store.velocities, velocities);
        assert_eq!(engine.config().friction, 0.5);
    }

    #[test]
    fn test_configure_changed_counts_rebuilds() {
        let mut engine = Engine::new(two_particle_config(0.8), 1000.0, 1000.0).unwrap();
        for _ in 0..3 {
            engine.tick();
        }

        let mut next = two_particle_config(0.8);
        next.counts = vec![4, 1];
        engine.configure(next).unwrap();

        assert_eq!(engine.store().len(), 5);
        assert!(engine.store().velocities().iter().all(|&v| v == Vec2::ZERO));
    }

    #[test]
    fn test_configure_invalid_keeps_previous() {
        let mut engine = Engine::new(two_particle_config(0.8), 1000.0, 1000.0).unwrap();

        let mut bad = two_particle_config(0.8);
        bad.matrix = InteractionMatrix::new(5);
        assert!(matches!(
            engine.configure(bad),
            Err(ConfigError::MatrixShape { types: 2, matrix: 5 })
        ));
        // Previous config is still active
        assert_eq!(engine.config().matrix.type_count(), 2);
        assert_eq!(engine.store().len(), 2);
    }

    #[test]
    fn test_empty_engine_ticks() {
        let config = SimConfig {
            counts: Vec::new(),
            matrix: InteractionMatrix::new(0),
            colors: Vec::new(),
            ..SimConfig::default()
        };
        let mut engine = Engine::new(config, 100.0, 100.0).unwrap();
        for _ in 0..10 {
            engine.tick();
        }
        assert_eq!(engine.ticks(), 10);
        assert!(engine.snapshot().positions.is_empty());
    }

    #[test]
    fn test_bad_world_bounds_rejected() {
        for (w, h) in [(0.0, 100.0), (100.0, -1.0), (f32::NAN, 100.0)] {
            assert!(matches!(
                Engine::new(SimConfig::default(), w, h),
                Err(ConfigError::InvalidWorld { .. })
            ));
        }
    }

    #[test]
    fn test_ripple_strength_zero_disables_trigger() {
        let mut config = two_particle_config(0.0);
        config.ripple_strength = 0.0;
        let mut engine = Engine::new(config, 1000.0, 1000.0).unwrap();
        engine.trigger_ripple(10.0, 10.0);
        assert!(engine.snapshot().ripples.is_empty());
    }

    #[test]
    fn test_snapshot_exposes_render_state() {
        let mut engine = Engine::new(two_particle_config(0.5), 640.0, 480.0).unwrap();
        engine.trigger_ripple(320.0, 240.0);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.positions.len(), 2);
        assert_eq!(snapshot.type_ids.len(), 2);
        assert_eq!(snapshot.colors.len(), 2);
        assert_eq!(snapshot.ripples.len(), 1);
        assert_eq!(snapshot.width, 640.0);
        assert_eq!(snapshot.height, 480.0);
        assert_eq!(
            snapshot.position_bytes().len(),
            2 * std::mem::size_of::<Vec2>()
        );
    }

    #[test]
    fn test_seeded_engines_agree() {
        let build = || {
            let mut config = two_particle_config(0.8);
            config.counts = vec![20, 20];
            config.seed = Some(77);
            Engine::new(config, 500.0, 500.0).unwrap()
        };
        let mut a = build();
        let mut b = build();
        for _ in 0..20 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.store().positions(), b.store().positions());
        assert_eq!(a.store().velocities(), b.store().velocities());
    }
}
