//! Atmospheric column state.
//!
//! The column is the state object every scheme in this crate reads and
//! writes: pressure grid, temperature, trace gases and derived heights.
//! Schemes only write the fields they document; everything else is input.

mod column;

pub use column::{density, hypsometric_height, vmr_to_mixing_ratio, Atmosphere};

use thiserror::Error;

/// Errors raised while assembling an [`Atmosphere`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtmosphereError {
    /// A column needs at least one full level
    #[error("atmospheric column has no levels")]
    EmptyColumn,

    /// `phlev` must have exactly one more element than `plev`
    #[error("{half_levels} half-levels given for {levels} full levels")]
    HalfLevelCount { levels: usize, half_levels: usize },

    /// A per-level field is not on the full-level grid
    #[error("field {field} has {actual} values, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}
