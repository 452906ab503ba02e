//! Error type for convective adjustment.

use thiserror::Error;

/// Result alias for convection operations.
pub type ConvectionResult<T> = Result<T, ConvectionError>;

/// Failures of a convective adjustment step.
///
/// Columns that are already stable, or surfaces held at a fixed temperature,
/// are normal outcomes and never produce an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvectionError {
    /// The surface temperature search hit its iteration cap.
    ///
    /// The bracket at the moment of failure is reported for diagnosis.
    #[error(
        "no energy conserving convective profile found after {iterations} iterations \
         (surface temperature bracket [{surface_temperature_neg:.4}, {surface_temperature_pos:.4}] K, \
         energy change [{diff_neg:.4e}, {diff_pos:.4e}] J/m²)"
    )]
    NoEnergyConservingProfile {
        iterations: usize,
        surface_temperature_neg: f64,
        surface_temperature_pos: f64,
        diff_neg: f64,
        diff_pos: f64,
    },

    /// An input array does not fit the pressure grid
    #[error("{field} has {actual} values, expected {expected}")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}
