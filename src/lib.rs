//! # PLIFE - Particle Life Engine
//!
//! CPU engine for "particle life" simulations: a 2D population of typed
//! particles that attract or repel each other according to a per-type-pair
//! coefficient matrix, producing emergent cells, chains, and chaotic soup.
//!
//! PLIFE is the simulation core only. It owns particle state and the
//! per-tick update; rendering, UI and frame scheduling stay on the host
//! side and consume the engine through a handful of calls.
//!
//! ## Quick Start
//!
//! ```ignore
//! use plife::prelude::*;
//!
//! let mut rng = rand::thread_rng();
//! let mut config = SimConfig::default();
//! config.matrix = InteractionMatrix::random(config.type_count(), &mut rng);
//!
//! let mut engine = Engine::new(config, 1280.0, 720.0)?;
//!
//! // In your frame loop:
//! engine.tick();
//! let frame = engine.snapshot();
//! draw_particles(frame.positions, frame.type_ids, frame.colors);
//! draw_ripples(frame.ripples);
//!
//! // On pointer down (translated to world coordinates):
//! engine.trigger_ripple(x, y);
//! ```
//!
//! ## Core Concepts
//!
//! ### Types and the interaction matrix
//!
//! Each particle has a type; [`SimConfig::counts`] says how many particles
//! of each type exist. The [`InteractionMatrix`] holds one signed
//! coefficient per ordered type pair: `[a][b]` is how strongly type `a`
//! is attracted to (positive) or repelled by (negative) type `b`. The
//! matrix need not be symmetric - asymmetry is where chasing and
//! snake-like structures come from.
//!
//! ### The force law
//!
//! All pairwise forces share one profile over normalized distance
//! (see [`forces::tent_force`]): an unconditional hard-core repulsion up
//! close, then a triangular coefficient-scaled band out to the cutoff
//! radius. Beyond the cutoff there is no force at all.
//!
//! ### The world is a torus
//!
//! Positions wrap at the world edges, and distances are measured the
//! short way around. There are no walls and no edge effects.
//!
//! ### Ripples
//!
//! [`Engine::trigger_ripple`] injects an expanding circular impulse at a
//! world point - the pointer-interaction primitive. Ripples decay
//! geometrically and push particles outward as the wavefront passes them
//! (see the [`ripple`] module).
//!
//! ### Reconfiguration
//!
//! [`Engine::configure`] swaps the whole parameter set. Per-type counts
//! changing triggers a rebuild (fresh random positions); any other change
//! applies in place while motion continues. Invalid configurations are
//! rejected and the previous one stays active (see [`ConfigError`]).
//!
//! ## Performance
//!
//! The pairwise pass is an exact O(N²) loop over structure-of-arrays
//! state; there is no spatial partitioning. Thousands of particles at
//! interactive rates are fine; see `benches/tick.rs` for the numbers on
//! your machine.

mod config;
mod engine;
pub mod error;
pub mod forces;
mod interactions;
pub mod ripple;
mod spawn;
mod store;
pub mod visuals;

pub use bytemuck;
pub use config::SimConfig;
pub use engine::{Engine, Snapshot};
pub use error::ConfigError;
pub use glam::{Vec2, Vec3};
pub use interactions::InteractionMatrix;
pub use ripple::{Ripple, RippleSet};
pub use spawn::SpawnContext;
pub use store::ParticleStore;
pub use visuals::Palette;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use plife::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::SimConfig;
    pub use crate::engine::{Engine, Snapshot};
    pub use crate::error::ConfigError;
    pub use crate::interactions::InteractionMatrix;
    pub use crate::ripple::Ripple;
    pub use crate::visuals::Palette;
    pub use crate::{Vec2, Vec3};
}
