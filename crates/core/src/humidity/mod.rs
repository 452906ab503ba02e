//! Humidity models.
//!
//! A humidity model re-equilibrates the water vapour of a column after its
//! temperature changed. Convection calls it on scratch copies of the column
//! while searching for an energy-conserving profile, so implementations must
//! only touch the atmosphere they are handed.
//!
//! # References
//!
//! - Manabe, S. & Wetherald, R.T. (1967). "Thermal equilibrium of the
//!   atmosphere with a given distribution of relative humidity." JAS 24(3).
//! - Alduchov, O.A. & Eskridge, R.E. (1996). "Improved Magnus form
//!   approximation of saturation vapor pressure." JAM 35(4).

use crate::atmosphere::Atmosphere;

/// Re-equilibrates moisture to a new temperature profile.
pub trait Humidity {
    /// Adjust the water vapour of `atmosphere` in place.
    fn adjust_humidity(&self, atmosphere: &mut Atmosphere);
}

/// Keeps the water vapour volume mixing ratio unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedVmr;

impl Humidity for FixedVmr {
    fn adjust_humidity(&self, _atmosphere: &mut Atmosphere) {}
}

/// Holds relative humidity fixed per level (Manabe & Wetherald 1967).
///
/// Water vapour follows temperature through the saturation vapour pressure:
///
/// ```text
/// vmr = RH × e_s(T) / p
/// ```
#[derive(Debug, Clone)]
pub struct FixedRelativeHumidity {
    relative_humidity: Vec<f64>,
}

impl FixedRelativeHumidity {
    /// Create from a relative humidity profile (fraction 0-1, one value per level).
    pub fn new(relative_humidity: Vec<f64>) -> Self {
        Self {
            relative_humidity: relative_humidity
                .into_iter()
                .map(|rh| rh.clamp(0.0, 1.0))
                .collect(),
        }
    }

    /// Same relative humidity on every level.
    pub fn uniform(levels: usize, relative_humidity: f64) -> Self {
        Self::new(vec![relative_humidity; levels])
    }
}

impl Humidity for FixedRelativeHumidity {
    fn adjust_humidity(&self, atmosphere: &mut Atmosphere) {
        let vmr: Vec<f64> = atmosphere
            .plev()
            .iter()
            .zip(atmosphere.temperature().iter())
            .zip(&self.relative_humidity)
            .map(|((&p, &t), &rh)| (rh * saturation_vapour_pressure(t) / p).min(1.0))
            .collect();
        let h2o = atmosphere.h2o_mut();
        for (target, value) in h2o.iter_mut().zip(vmr) {
            *target = value;
        }
    }
}

/// Saturation vapour pressure over liquid water [Pa] (Magnus form).
///
/// ```text
/// e_s = 610.94 × exp(17.625 × T_c / (T_c + 243.04))
/// ```
///
/// # Arguments
///
/// * `temperature` - Air temperature [K]
pub fn saturation_vapour_pressure(temperature: f64) -> f64 {
    let t_c = temperature - 273.15;
    610.94 * (17.625 * t_c / (t_c + 243.04)).exp()
}
