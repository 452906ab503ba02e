//! Configuration for convective adjustment schemes.

use serde::{Deserialize, Serialize};

use super::relaxed::ConvectiveTau;
use crate::core_types::units::KelvinPerDay;

/// Tunable parameters shared by all adjustment schemes.
///
/// The defaults are empirical choices, not physical constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvectionConfig {
    /// Convective heating rate that marks the convective top.
    ///
    /// Kept above zero so the diagnosed top does not depend on the vertical
    /// grid spacing.
    pub heating_threshold: KelvinPerDay,

    /// Iteration cap of the surface temperature search
    pub max_iterations: usize,

    /// Energy tolerance is `surface heat capacity / near_zero_divisor` (J/m²).
    ///
    /// Scaling with the heat capacity lets very deep surfaces still reach the
    /// target.
    pub near_zero_divisor: f64,
}

impl Default for ConvectionConfig {
    fn default() -> Self {
        Self {
            heating_threshold: KelvinPerDay::new(0.2),
            max_iterations: 100,
            near_zero_divisor: 1e13,
        }
    }
}

impl ConvectionConfig {
    /// Energy change treated as zero for a surface of the given heat capacity (J/m²)
    #[must_use]
    pub fn near_zero(&self, heat_capacity: f64) -> f64 {
        heat_capacity / self.near_zero_divisor
    }
}

/// Selects an adjustment scheme, e.g. from a run configuration file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConvectionScheme {
    /// No convection
    NonConvective,
    /// Instantaneous adjustment to the critical lapse rate
    #[default]
    Hard,
    /// Relaxation towards the critical lapse rate
    Relaxed {
        /// Source of the convective timescale
        tau: ConvectiveTau,
    },
}
