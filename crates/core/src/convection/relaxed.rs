//! Relaxed convective adjustment.
//!
//! Instead of jumping to the lapse-rate profile, each level relaxes towards
//! it with a convective timescale `τ`:
//!
//! ```text
//! f     = 1 - exp(-Δt / τ)
//! T_con = (1 - f) × T_rad + f × T_lapse
//! ```
//!
//! Short timescales (lower troposphere) adjust almost fully within a step;
//! long timescales (upper levels) barely move, giving a smooth transition
//! into the radiatively controlled stratosphere. For `Δt / τ → ∞` the result
//! approaches the lapse-rate profile.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use super::error::{ConvectionError, ConvectionResult};
use super::profile::{lapse_profile, ConvectiveProfile, ProfileInputs};
use crate::core_types::interp::interp_clamped;

/// Default surface convective timescale: one hour (days).
pub const DEFAULT_TAU0: f64 = 1.0 / 24.0;

/// Source of the convective timescale profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvectiveTau {
    /// Caller-supplied timescale per level (days)
    Fixed(Vec<f64>),

    /// `τ = τ₀ × exp(p_s / p)`, with `p_s` the lowest full level
    Pressure {
        /// Timescale at the lowest level scale (days)
        tau0: f64,
    },

    /// Timescale profile mapped onto the temperature of the first call and
    /// afterwards looked up by temperature
    Temperature {
        /// Timescale at the lowest level scale (days), used when `tau` is absent
        tau0: f64,
        /// Caller-supplied timescale per level (days) replacing the pressure default
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tau: Option<Vec<f64>>,
    },
}

impl Default for ConvectiveTau {
    fn default() -> Self {
        Self::Pressure { tau0: DEFAULT_TAU0 }
    }
}

/// Timescale as a function of temperature, sorted by temperature.
#[derive(Debug, Clone, PartialEq)]
struct TauTable {
    temperature: Vec<f64>,
    tau: Vec<f64>,
}

impl TauTable {
    fn new(temperature: &DVector<f64>, tau: &DVector<f64>) -> Self {
        let mut pairs: Vec<(f64, f64)> = temperature
            .iter()
            .copied()
            .zip(tau.iter().copied())
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (temperature, tau) = pairs.into_iter().unzip();
        Self { temperature, tau }
    }

    fn lookup(&self, temperature: f64) -> f64 {
        interp_clamped(&self.temperature, &self.tau, temperature)
    }
}

/// Relaxed profile builder with a lazily built timescale cache.
///
/// The cache is filled on first use and never invalidated: one instance
/// belongs to one column for the length of one run. It is not meant to be
/// shared between runs or threads.
#[derive(Debug, Clone, Default)]
pub struct RelaxedProfile {
    source: ConvectiveTau,
    pressure_tau: Option<DVector<f64>>,
    table: Option<TauTable>,
}

impl RelaxedProfile {
    /// Create a builder for the given timescale source.
    pub fn new(source: ConvectiveTau) -> Self {
        Self {
            source,
            pressure_tau: None,
            table: None,
        }
    }

    /// Whether the timescale cache has been populated
    pub fn is_cached(&self) -> bool {
        match self.source {
            ConvectiveTau::Fixed(_) => true,
            ConvectiveTau::Pressure { .. } => self.pressure_tau.is_some(),
            ConvectiveTau::Temperature { .. } => self.table.is_some(),
        }
    }

    /// Convective timescale per level (days).
    ///
    /// # Errors
    ///
    /// Returns [`ConvectionError::ShapeMismatch`] if a caller-supplied
    /// timescale does not have one value per level.
    pub fn convective_tau(
        &mut self,
        plev: &DVector<f64>,
        t_old: &DVector<f64>,
    ) -> ConvectionResult<DVector<f64>> {
        match &self.source {
            ConvectiveTau::Fixed(tau) => per_level(tau, plev.len()),
            ConvectiveTau::Pressure { tau0 } => {
                let tau0 = *tau0;
                Ok(self
                    .pressure_tau
                    .get_or_insert_with(|| pressure_tau(plev, tau0))
                    .clone())
            }
            ConvectiveTau::Temperature { tau0, tau } => {
                let table = match self.table.take() {
                    Some(table) => table,
                    None => {
                        let initial = match tau {
                            Some(tau) => per_level(tau, plev.len())?,
                            None => pressure_tau(plev, *tau0),
                        };
                        TauTable::new(t_old, &initial)
                    }
                };
                let tau = t_old.map(|t| table.lookup(t));
                self.table = Some(table);
                Ok(tau)
            }
        }
    }
}

fn per_level(tau: &[f64], levels: usize) -> ConvectionResult<DVector<f64>> {
    if tau.len() != levels {
        return Err(ConvectionError::ShapeMismatch {
            field: "tau",
            expected: levels,
            actual: tau.len(),
        });
    }
    Ok(DVector::from_column_slice(tau))
}

/// `τ = τ₀ × exp(p₀ / p)` (days)
pub fn pressure_tau(plev: &DVector<f64>, tau0: f64) -> DVector<f64> {
    let p0 = plev[0];
    plev.map(|p| tau0 * (p0 / p).exp())
}

impl ConvectiveProfile for RelaxedProfile {
    fn convective_profile(
        &mut self,
        inputs: &ProfileInputs<'_>,
        surface_t: f64,
    ) -> ConvectionResult<DVector<f64>> {
        let tau = self.convective_tau(inputs.plev, inputs.t_old)?;
        let target = lapse_profile(inputs, surface_t);
        let dt = *inputs.timestep;
        Ok(DVector::from_fn(target.len(), |i, _| {
            let tf = 1.0 - (-dt / tau[i]).exp();
            inputs.t_rad[i] * (1.0 - tf) + tf * target[i]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convection::profile::fixtures::Column;
    use crate::convection::profile::HardProfile;
    use crate::core_types::units::Days;
    use approx::assert_relative_eq;

    #[test]
    fn test_pressure_tau_grows_aloft() {
        let column = Column::three_level();
        let tau = pressure_tau(&column.plev, DEFAULT_TAU0);
        assert_relative_eq!(tau[0], DEFAULT_TAU0 * 1f64.exp());
        assert!(tau[0] < tau[1] && tau[1] < tau[2]);
        // 100 hPa: exp(9) hours ≈ 338 days
        assert_relative_eq!(tau[2], 9f64.exp() / 24.0, max_relative = 1e-12);
    }

    #[test]
    fn test_pressure_tau_is_cached() {
        let column = Column::three_level();
        let mut builder = RelaxedProfile::new(ConvectiveTau::default());
        assert!(!builder.is_cached());
        let first = builder.convective_tau(&column.plev, &column.t_rad).unwrap();
        assert!(builder.is_cached());
        // A different grid no longer changes the answer
        let other = DVector::from_vec(vec![80_000.0, 40_000.0, 20_000.0]);
        assert_eq!(builder.convective_tau(&other, &column.t_rad).unwrap(), first);
    }

    #[test]
    fn test_fixed_tau_shape_is_checked() {
        let column = Column::three_level();
        let mut builder = RelaxedProfile::new(ConvectiveTau::Fixed(vec![1.0, 2.0]));
        assert!(matches!(
            builder.convective_tau(&column.plev, &column.t_rad),
            Err(ConvectionError::ShapeMismatch { field: "tau", .. })
        ));
    }

    #[test]
    fn test_temperature_tau_is_built_once_and_indexed_by_temperature() {
        let column = Column::three_level();
        let mut builder = RelaxedProfile::new(ConvectiveTau::Temperature {
            tau0: DEFAULT_TAU0,
            tau: None,
        });
        let first = builder.convective_tau(&column.plev, &column.t_rad).unwrap();
        let expected = pressure_tau(&column.plev, DEFAULT_TAU0);
        for i in 0..3 {
            assert_relative_eq!(first[i], expected[i], max_relative = 1e-12);
        }

        // Warming the column by 10 K moves every level towards the timescale
        // the warmer level had on the first call; beyond the table it clamps.
        let warmer = column.t_rad.map(|t| t + 10.0);
        let tau = builder.convective_tau(&column.plev, &warmer).unwrap();
        assert_relative_eq!(tau[0], first[0]);
        assert!(tau[1] < first[1] && tau[1] > first[0]);
        assert!(tau[2] < first[2] && tau[2] > first[1]);

        // The pressure grid is ignored once the table exists
        let other = DVector::from_vec(vec![80_000.0, 40_000.0, 20_000.0]);
        let again = builder.convective_tau(&other, &column.t_rad).unwrap();
        for i in 0..3 {
            assert_relative_eq!(again[i], first[i], max_relative = 1e-12);
        }
    }

    #[test]
    fn test_supplied_temperature_tau_is_mapped_onto_first_temperature() {
        let column = Column::three_level();
        let mut builder = RelaxedProfile::new(ConvectiveTau::Temperature {
            tau0: DEFAULT_TAU0,
            tau: Some(vec![0.1, 1.0, 10.0]),
        });
        let first = builder.convective_tau(&column.plev, &column.t_rad).unwrap();
        assert_relative_eq!(first[0], 0.1);
        assert_relative_eq!(first[1], 1.0);
        assert_relative_eq!(first[2], 10.0);

        // 275 K lies halfway between the 300 K and 250 K levels
        let t = DVector::from_vec(vec![275.0, 310.0, 200.0]);
        let tau = builder.convective_tau(&column.plev, &t).unwrap();
        assert_relative_eq!(tau[0], 0.55);
        assert_relative_eq!(tau[1], 0.1);
        assert_relative_eq!(tau[2], 10.0);
    }

    #[test]
    fn test_supplied_temperature_tau_shape_is_checked() {
        let column = Column::three_level();
        let mut builder = RelaxedProfile::new(ConvectiveTau::Temperature {
            tau0: DEFAULT_TAU0,
            tau: Some(vec![1.0; 4]),
        });
        assert!(matches!(
            builder.convective_tau(&column.plev, &column.t_rad),
            Err(ConvectionError::ShapeMismatch { field: "tau", expected: 3, actual: 4 })
        ));
        assert!(!builder.is_cached());
    }

    #[test]
    fn test_short_timescale_converges_to_lapse_profile() {
        let column = Column::three_level();
        let mut builder = RelaxedProfile::new(ConvectiveTau::Fixed(vec![1e-6; 3]));
        let inputs = column.inputs(Days::new(1.0));
        let relaxed = builder.convective_profile(&inputs, 305.0).unwrap();
        let target = lapse_profile(&inputs, 305.0);
        for i in 0..3 {
            assert_relative_eq!(relaxed[i], target[i], epsilon = 1e-9);
        }
        // Below the convective top the hard scheme keeps the same profile
        let hard = HardProfile::build(&inputs, 305.0);
        assert_relative_eq!(relaxed[0], hard[0], epsilon = 1e-9);
        assert_relative_eq!(relaxed[1], hard[1], epsilon = 1e-9);
    }

    #[test]
    fn test_long_timescale_keeps_radiative_profile() {
        let column = Column::three_level();
        let mut builder = RelaxedProfile::new(ConvectiveTau::Fixed(vec![1e9; 3]));
        let relaxed = builder
            .convective_profile(&column.inputs(Days::new(0.5)), 305.0)
            .unwrap();
        for i in 0..3 {
            assert_relative_eq!(relaxed[i], column.t_rad[i], epsilon = 1e-6);
        }
    }
}
