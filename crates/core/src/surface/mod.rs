//! Surface boundary condition for the column.
//!
//! The surface exchanges energy with the atmosphere through convection. A
//! slab surface has a finite effective heat capacity and warms or cools when
//! convection redistributes energy; a fixed-temperature surface is held by
//! the caller and disables energy conservation in the adjustment.

use serde::{Deserialize, Serialize};

use crate::core_types::constants::{SPECIFIC_HEAT_WATER, WATER_DENSITY};
use crate::core_types::units::Kelvin;

/// How the surface temperature responds to convection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// Temperature evolves; energy is conserved against the heat capacity
    HeatCapacity,
    /// Temperature is held externally fixed
    FixedTemperature,
}

/// Surface state: temperature and effective heat capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Surface temperature
    pub temperature: Kelvin,

    /// Effective heat capacity (J/(m²·K))
    pub heat_capacity: f64,

    kind: SurfaceKind,
}

impl Surface {
    /// Create a surface with an explicit heat capacity.
    ///
    /// # Arguments
    ///
    /// * `temperature` - Initial surface temperature
    /// * `heat_capacity` - Effective heat capacity (J/(m²·K))
    pub fn new(temperature: Kelvin, heat_capacity: f64) -> Self {
        Self {
            temperature,
            heat_capacity,
            kind: SurfaceKind::HeatCapacity,
        }
    }

    /// Create a mixed-layer ocean slab of the given depth.
    ///
    /// ```text
    /// C_s = ρ_w × c_w × depth
    /// ```
    ///
    /// A 50 m slab gives about 2.1e8 J/(m²·K).
    pub fn slab(temperature: Kelvin, depth_m: f64) -> Self {
        Self::new(temperature, WATER_DENSITY * SPECIFIC_HEAT_WATER * depth_m)
    }

    /// Create a surface whose temperature is held externally fixed.
    ///
    /// The heat capacity is kept nominal (1 m slab); it only scales the
    /// convergence tolerance, which a fixed surface never uses.
    pub fn fixed(temperature: Kelvin) -> Self {
        Self {
            kind: SurfaceKind::FixedTemperature,
            ..Self::slab(temperature, 1.0)
        }
    }

    /// Surface behaviour
    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    /// Whether the temperature is held externally fixed
    pub fn is_fixed_temperature(&self) -> bool {
        self.kind == SurfaceKind::FixedTemperature
    }
}
