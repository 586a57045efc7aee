//! Error types for PLIFE.
//!
//! All validation happens at the configuration boundary: a rejected
//! [`SimConfig`](crate::SimConfig) never touches particle state, and the
//! previously applied configuration stays active. The tick loop itself has
//! no failure modes.

use std::fmt;

/// Errors raised when a configuration is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Interaction matrix dimensions do not match the number of types.
    MatrixShape {
        /// Number of types implied by `counts`.
        types: usize,
        /// Number of types the matrix was built for.
        matrix: usize,
    },
    /// Color table length does not match the number of types.
    ColorCount {
        /// Number of types implied by `counts`.
        types: usize,
        /// Number of colors provided.
        colors: usize,
    },
    /// Cutoff radius is not a positive finite number.
    InvalidRadius(f32),
    /// A scalar parameter is NaN or infinite.
    NonFinite(&'static str),
    /// World bounds are not positive finite numbers.
    InvalidWorld {
        /// Requested world width.
        width: f32,
        /// Requested world height.
        height: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MatrixShape { types, matrix } => write!(
                f,
                "Interaction matrix is {matrix}x{matrix} but counts define {types} types"
            ),
            ConfigError::ColorCount { types, colors } => write!(
                f,
                "Color table has {colors} entries but counts define {types} types"
            ),
            ConfigError::InvalidRadius(r) => {
                write!(f, "Cutoff radius must be finite and positive, got {r}")
            }
            ConfigError::NonFinite(name) => {
                write!(f, "Parameter `{name}` must be finite")
            }
            ConfigError::InvalidWorld { width, height } => {
                write!(f, "World bounds must be positive and finite, got {width}x{height}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
