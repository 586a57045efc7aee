//! Interaction matrix for type-based particle forces.
//!
//! The interaction matrix defines how different particle types affect each
//! other. This is the foundation of particle-life simulations: complex
//! emergent behavior (cells, chains, chasing blobs) arises from a small
//! table of attraction/repulsion coefficients.
//!
//! # Example
//!
//! ```ignore
//! let mut matrix = InteractionMatrix::new(3);
//!
//! // Type 0 chases type 1, flees type 2
//! matrix.attract(0, 1, 0.8);
//! matrix.repel(0, 2, 0.5);
//!
//! // Type 1 clumps with itself
//! matrix.set(1, 1, 0.6);
//! ```
//!
//! Coefficients conventionally live in `[-1, 1]` but the engine does not
//! clamp them; they scale the tent band of the force law
//! (see [`tent_force`](crate::forces::tent_force)).

use rand::Rng;

/// Square table of signed interaction coefficients.
///
/// Cell `[self_type][other_type]` governs the force a particle of
/// `self_type` feels from a neighbor of `other_type`:
/// positive = attract, negative = repel, zero = ignore (outside the hard
/// core). The table is generally asymmetric: `[a][b]` and `[b][a]` are
/// independent, which is what makes chase/flee dynamics possible.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractionMatrix {
    /// Flattened matrix: `[self_type * type_count + other_type]`.
    coefficients: Vec<f32>,
    /// Number of particle types.
    type_count: usize,
}

impl InteractionMatrix {
    /// Create a new matrix for `type_count` particle types, all zero.
    pub fn new(type_count: usize) -> Self {
        Self {
            coefficients: vec![0.0; type_count * type_count],
            type_count,
        }
    }

    /// Uniformly random coefficients in `[-1, 1)`.
    ///
    /// The classic particle-life starting point: most random matrices
    /// produce something alive.
    pub fn random<R: Rng>(type_count: usize, rng: &mut R) -> Self {
        let mut matrix = Self::new(type_count);
        for c in &mut matrix.coefficients {
            *c = rng.gen_range(-1.0..1.0);
        }
        matrix
    }

    /// Random but mirror-symmetric: `[a][b] == [b][a]`.
    ///
    /// Symmetric matrices conserve momentum-like behavior and tend toward
    /// static crystalline clusters rather than chasing structures.
    pub fn symmetric<R: Rng>(type_count: usize, rng: &mut R) -> Self {
        let mut matrix = Self::random(type_count, rng);
        for a in 0..type_count {
            for b in a..type_count {
                let value = matrix.get(b, a);
                matrix.set(a, b, value);
            }
        }
        matrix
    }

    /// Chain preset: strong self/neighbor attraction, repulsion elsewhere.
    ///
    /// Types attract themselves and their cyclic neighbors, producing long
    /// membrane-like strands.
    pub fn chains(type_count: usize) -> Self {
        let mut matrix = Self::new(type_count);
        for a in 0..type_count {
            for b in 0..type_count {
                let coeff = if b == a
                    || b == (a + 1) % type_count
                    || b == (a + type_count - 1) % type_count
                {
                    1.0
                } else {
                    -1.0
                };
                matrix.set(a, b, coeff);
            }
        }
        matrix
    }

    /// Snake preset: self-attraction plus a weak pull toward the next type.
    ///
    /// The cyclic asymmetry makes each cluster crawl after the next,
    /// forming moving trains.
    pub fn snakes(type_count: usize) -> Self {
        let mut matrix = Self::new(type_count);
        for a in 0..type_count {
            matrix.set(a, a, 1.0);
            matrix.set(a, (a + 1) % type_count, 0.2);
        }
        matrix
    }

    /// Coefficient for a particle of `self_type` near one of `other_type`.
    #[inline]
    pub fn get(&self, self_type: usize, other_type: usize) -> f32 {
        self.coefficients[self_type * self.type_count + other_type]
    }

    /// One row of the matrix: every coefficient `self_type` feels.
    ///
    /// The hot loop resolves the row once per particle instead of
    /// re-multiplying indices per pair.
    #[inline]
    pub fn row(&self, self_type: usize) -> &[f32] {
        let start = self_type * self.type_count;
        &self.coefficients[start..start + self.type_count]
    }

    /// Set the coefficient for `self_type` reacting to `other_type`.
    ///
    /// Out-of-range type indices are ignored.
    pub fn set(&mut self, self_type: usize, other_type: usize, coeff: f32) {
        if self_type < self.type_count && other_type < self.type_count {
            self.coefficients[self_type * self.type_count + other_type] = coeff;
        }
    }

    /// Convenience: attraction. Equivalent to `set` with `coeff.abs()`.
    pub fn attract(&mut self, self_type: usize, other_type: usize, coeff: f32) {
        self.set(self_type, other_type, coeff.abs());
    }

    /// Convenience: repulsion. Equivalent to `set` with `-coeff.abs()`.
    pub fn repel(&mut self, self_type: usize, other_type: usize, coeff: f32) {
        self.set(self_type, other_type, -coeff.abs());
    }

    /// Set both `[a][b]` and `[b][a]` to the same coefficient.
    pub fn set_symmetric(&mut self, type_a: usize, type_b: usize, coeff: f32) {
        self.set(type_a, type_b, coeff);
        self.set(type_b, type_a, coeff);
    }

    /// Number of types this matrix covers.
    #[inline]
    pub fn type_count(&self) -> usize {
        self.type_count
    }
}
