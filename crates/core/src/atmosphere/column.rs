//! Single atmospheric column on a pressure grid.
//!
//! Levels are ordered surface-to-top: `plev[0]` is the lowest full level and
//! `phlev[0]` the surface half-level. Every full level is bracketed by two
//! half-levels, `phlev[i] >= plev[i] >= phlev[i + 1]`.
//!
//! # Scientific Background
//!
//! Heights follow from the hypsometric equation for a layer of mean
//! temperature `T̄` between pressures `p₁ > p₂`:
//!
//! ```text
//! Δz = (R_d × T̄ / g) × ln(p₁ / p₂)
//! ```
//!
//! # References
//!
//! - Wallace, J.M. & Hobbs, P.V. (2006). "Atmospheric Science", eq. 3.29.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use super::AtmosphereError;
use crate::core_types::constants::{
    GAS_CONSTANT_DRY_AIR, GRAVITY, MOLAR_MASS_DRY_AIR, MOLAR_MASS_WATER, SPECIFIC_HEAT_DRY_AIR,
    SPECIFIC_HEAT_WATER_VAPOUR,
};
use crate::core_types::interp::gradient;

/// Atmospheric column state.
///
/// Holds pressure levels and half-levels [Pa], temperature [K], water vapour
/// and ozone volume mixing ratios [mol/mol], and geopotential height [m].
/// `Clone` produces a fully independent deep copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    plev: DVector<f64>,
    phlev: DVector<f64>,
    temperature: DVector<f64>,
    h2o: DVector<f64>,
    o3: DVector<f64>,
    height: DVector<f64>,
}

impl Atmosphere {
    /// Create a dry, ozone-free column and compute its heights.
    ///
    /// # Arguments
    ///
    /// * `plev` - Full pressure levels [Pa], surface first
    /// * `phlev` - Half pressure levels [Pa], one more than `plev`
    /// * `temperature` - Temperature on `plev` [K]
    ///
    /// # Errors
    ///
    /// Returns [`AtmosphereError`] if the column is empty or the array
    /// lengths are inconsistent.
    pub fn new(
        plev: Vec<f64>,
        phlev: Vec<f64>,
        temperature: Vec<f64>,
    ) -> Result<Self, AtmosphereError> {
        let n = plev.len();
        if n == 0 {
            return Err(AtmosphereError::EmptyColumn);
        }
        if phlev.len() != n + 1 {
            return Err(AtmosphereError::HalfLevelCount {
                levels: n,
                half_levels: phlev.len(),
            });
        }
        check_len("T", n, temperature.len())?;

        let mut atmosphere = Self {
            plev: DVector::from_vec(plev),
            phlev: DVector::from_vec(phlev),
            temperature: DVector::from_vec(temperature),
            h2o: DVector::zeros(n),
            o3: DVector::zeros(n),
            height: DVector::zeros(n),
        };
        atmosphere.update_height();
        Ok(atmosphere)
    }

    /// Replace the water vapour profile (volume mixing ratio).
    ///
    /// # Errors
    ///
    /// Returns [`AtmosphereError::LengthMismatch`] if `vmr` is not on `plev`.
    pub fn with_h2o(mut self, vmr: Vec<f64>) -> Result<Self, AtmosphereError> {
        check_len("H2O", self.levels(), vmr.len())?;
        self.h2o = DVector::from_vec(vmr);
        Ok(self)
    }

    /// Replace the ozone profile (volume mixing ratio).
    ///
    /// # Errors
    ///
    /// Returns [`AtmosphereError::LengthMismatch`] if `vmr` is not on `plev`.
    pub fn with_o3(mut self, vmr: Vec<f64>) -> Result<Self, AtmosphereError> {
        check_len("O3", self.levels(), vmr.len())?;
        self.o3 = DVector::from_vec(vmr);
        Ok(self)
    }

    /// Number of full levels
    pub fn levels(&self) -> usize {
        self.plev.len()
    }

    /// Full pressure levels [Pa]
    pub fn plev(&self) -> &DVector<f64> {
        &self.plev
    }

    /// Half pressure levels [Pa]
    pub fn phlev(&self) -> &DVector<f64> {
        &self.phlev
    }

    /// Temperature [K]
    pub fn temperature(&self) -> &DVector<f64> {
        &self.temperature
    }

    /// Water vapour volume mixing ratio
    pub fn h2o(&self) -> &DVector<f64> {
        &self.h2o
    }

    /// Mutable water vapour, for humidity models
    pub fn h2o_mut(&mut self) -> &mut DVector<f64> {
        &mut self.h2o
    }

    /// Ozone volume mixing ratio
    pub fn o3(&self) -> &DVector<f64> {
        &self.o3
    }

    /// Geopotential height of the full levels [m]
    pub fn height(&self) -> &DVector<f64> {
        &self.height
    }

    /// Overwrite the temperature profile.
    ///
    /// Heights are *not* recomputed; call [`Atmosphere::update_height`].
    ///
    /// # Panics
    ///
    /// If `temperature` is not on `plev`.
    pub fn set_temperature(&mut self, temperature: &DVector<f64>) {
        self.temperature.copy_from(temperature);
    }

    /// Recompute geopotential height from the current temperature.
    pub fn update_height(&mut self) {
        self.height = hypsometric_height(&self.plev, &self.phlev, &self.temperature);
    }

    /// Air density on the full levels [kg/m³], `ρ = p / (R_d T)`.
    pub fn density(&self) -> DVector<f64> {
        density(&self.plev, &self.temperature)
    }

    /// Isobaric heat capacity per layer [J/(kg·K)].
    ///
    /// Mass-weighted between dry air and water vapour using the specific
    /// humidity of each layer.
    pub fn heat_capacity(&self) -> DVector<f64> {
        self.h2o.map(|vmr| {
            let r = vmr_to_mixing_ratio(vmr);
            let q = r / (1.0 + r);
            (1.0 - q) * SPECIFIC_HEAT_DRY_AIR + q * SPECIFIC_HEAT_WATER_VAPOUR
        })
    }

    /// Water vapour mass per layer [kg/m²].
    ///
    /// ```text
    /// h2o = r × ρ × Δz
    /// ```
    ///
    /// where `Δz` is the finite-difference gradient of the level heights.
    /// A one-level column uses the hypsometric thickness between its two
    /// half-levels instead.
    pub fn water_vapour_profile(&self) -> DVector<f64> {
        let rho = self.density();
        let dz = if self.levels() < 2 {
            DVector::from_element(
                1,
                GAS_CONSTANT_DRY_AIR * self.temperature[0] / GRAVITY
                    * (self.phlev[0] / self.phlev[1]).ln(),
            )
        } else {
            gradient(&self.height)
        };
        DVector::from_fn(self.levels(), |i, _| {
            vmr_to_mixing_ratio(self.h2o[i]) * rho[i] * dz[i]
        })
    }
}

fn check_len(field: &'static str, expected: usize, actual: usize) -> Result<(), AtmosphereError> {
    if expected == actual {
        Ok(())
    } else {
        Err(AtmosphereError::LengthMismatch {
            field,
            expected,
            actual,
        })
    }
}

/// Air density of an ideal dry gas [kg/m³].
pub fn density(p: &DVector<f64>, t: &DVector<f64>) -> DVector<f64> {
    p.zip_map(t, |p, t| p / (GAS_CONSTANT_DRY_AIR * t))
}

/// Convert a volume mixing ratio to a mass mixing ratio [kg/kg].
pub fn vmr_to_mixing_ratio(vmr: f64) -> f64 {
    vmr * MOLAR_MASS_WATER / MOLAR_MASS_DRY_AIR
}

/// Geopotential height of the full levels by hypsometric integration.
///
/// The lowest level sits `R_d T₀ / g × ln(phlev₀ / plev₀)` above the
/// surface half-level; each further level adds the thickness of the layer
/// to the level below, using the mean of the two level temperatures.
pub fn hypsometric_height(
    plev: &DVector<f64>,
    phlev: &DVector<f64>,
    temperature: &DVector<f64>,
) -> DVector<f64> {
    let n = plev.len();
    let scale = GAS_CONSTANT_DRY_AIR / GRAVITY;
    let mut z = DVector::zeros(n);
    if n == 0 {
        return z;
    }
    z[0] = scale * temperature[0] * (phlev[0] / plev[0]).ln();
    for i in 1..n {
        let t_mean = 0.5 * (temperature[i - 1] + temperature[i]);
        z[i] = z[i - 1] + scale * t_mean * (plev[i - 1] / plev[i]).ln();
    }
    z
}
