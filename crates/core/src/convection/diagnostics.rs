//! Convective-top diagnostics.
//!
//! The convective top is where the convective heating rate
//! `(T_con - T_rad) / Δt` falls back below a small positive threshold. Any
//! profile variable (pressure, temperature, level index, height) is
//! evaluated there by linear interpolation between the two levels that
//! bracket the crossing.
//!
//! A column without convective heating has no top. That is reported as
//! `None` in [`ConvectiveTop`] and as NaN in the variable store.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::core_types::interp::interp_extrapolate;
use crate::core_types::units::{Days, Kelvin, KelvinPerDay, Meters, Pascals};
use crate::core_types::VariableStore;

/// Convective heating rate per level (K/day)
pub const CONVECTIVE_HEATING_RATE: &str = "convective_heating_rate";
/// Pressure of the convective top (Pa)
pub const CONVECTIVE_TOP_PLEV: &str = "convective_top_plev";
/// Temperature of the convective top (K)
pub const CONVECTIVE_TOP_TEMPERATURE: &str = "convective_top_temperature";
/// Fractional model level of the convective top
pub const CONVECTIVE_TOP_INDEX: &str = "convective_top_index";
/// Height of the convective top (m)
pub const CONVECTIVE_TOP_HEIGHT: &str = "convective_top_height";

/// Convective heating rate (K/day) of an adjustment over one timestep.
pub fn convective_heating_rate(
    t_con: &DVector<f64>,
    t_rad: &DVector<f64>,
    timestep: Days,
) -> DVector<f64> {
    (t_con - t_rad) / *timestep
}

/// Value of `variable` where `heating` crosses `threshold` from above.
///
/// Searches upward for the first level with heating above the threshold,
/// then for the first level above it where heating drops below again, and
/// interpolates linearly between that level and the one beneath it. If the
/// heating never drops back inside the column the top level value is used.
///
/// # Returns
///
/// `None` if heating never exceeds the threshold.
pub fn interp_variable(
    variable: &DVector<f64>,
    heating: &DVector<f64>,
    threshold: f64,
) -> Option<f64> {
    let first = heating.iter().position(|&h| h > threshold)?;
    let Some(offset) = heating.iter().skip(first).position(|&h| h < threshold) else {
        return variable.as_slice().last().copied();
    };
    let top = first + offset;
    Some(interp_extrapolate(
        &[heating[top - 1], heating[top]],
        &[variable[top - 1], variable[top]],
        threshold,
    ))
}

/// Where convection stopped during the last adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvectiveTop {
    /// Pressure at the convective top
    pub plev: Option<Pascals>,
    /// Temperature at the convective top
    pub temperature: Option<Kelvin>,
    /// Fractional level index, 0 at the lowest full level
    pub index: Option<f64>,
    /// Height above the surface half-level
    pub height: Option<Meters>,
    /// Convective heating rate per level (K/day)
    pub heating_rate: DVector<f64>,
}

impl ConvectiveTop {
    /// Diagnose the convective top of an adjusted column.
    ///
    /// # Arguments
    ///
    /// * `t_rad` - Radiatively updated temperature [K]
    /// * `t_con` - Convectively adjusted temperature [K]
    /// * `plev` - Full pressure levels [Pa]
    /// * `height` - Height of the adjusted column [m]
    /// * `timestep` - Model timestep
    /// * `threshold` - Heating rate that marks the top
    pub fn diagnose(
        t_rad: &DVector<f64>,
        t_con: &DVector<f64>,
        plev: &DVector<f64>,
        height: &DVector<f64>,
        timestep: Days,
        threshold: KelvinPerDay,
    ) -> Self {
        let heating_rate = convective_heating_rate(t_con, t_rad, timestep);
        let levels = DVector::from_fn(plev.len(), |i, _| i as f64);
        let at_top =
            |variable: &DVector<f64>| interp_variable(variable, &heating_rate, *threshold);
        Self {
            plev: at_top(plev).map(Pascals::new),
            temperature: at_top(t_con).map(Kelvin::new),
            index: at_top(&levels),
            height: at_top(height).map(Meters::new),
            heating_rate,
        }
    }

    /// Whether convection heated the column anywhere
    pub fn is_defined(&self) -> bool {
        self.plev.is_some()
    }

    /// Publish under the standard variable names, NaN for undefined values.
    pub fn write_to(&self, store: &mut VariableStore) {
        store.set(CONVECTIVE_HEATING_RATE, self.heating_rate.clone());
        store.set_scalar(CONVECTIVE_TOP_PLEV, self.plev.map_or(f64::NAN, |p| *p));
        store.set_scalar(
            CONVECTIVE_TOP_TEMPERATURE,
            self.temperature.map_or(f64::NAN, |t| *t),
        );
        store.set_scalar(CONVECTIVE_TOP_INDEX, self.index.unwrap_or(f64::NAN));
        store.set_scalar(CONVECTIVE_TOP_HEIGHT, self.height.map_or(f64::NAN, |z| *z));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plev() -> DVector<f64> {
        DVector::from_vec(vec![90_000.0, 50_000.0, 10_000.0])
    }

    #[test]
    fn test_crossing_is_interpolated_linearly() {
        let heating = DVector::from_vec(vec![0.0, 1.0, 0.0]);
        // 0.2 K/day is 80% of the way from 500 to 100 hPa
        let p = interp_variable(&plev(), &heating, 0.2).unwrap();
        assert_relative_eq!(p, 18_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_no_heating_has_no_top() {
        let heating = DVector::from_vec(vec![0.1, 0.2, -3.0]);
        assert_eq!(interp_variable(&plev(), &heating, 0.2), None);
    }

    #[test]
    fn test_heating_up_to_model_top_uses_top_level() {
        let heating = DVector::from_vec(vec![0.0, 1.0, 2.0]);
        assert_eq!(interp_variable(&plev(), &heating, 0.2), Some(10_000.0));
    }

    #[test]
    fn test_heating_exactly_at_threshold_is_not_a_crossing() {
        let heating = DVector::from_vec(vec![1.0, 0.2, 0.1]);
        assert_relative_eq!(interp_variable(&plev(), &heating, 0.2).unwrap(), 50_000.0);
    }

    #[test]
    fn test_diagnose_and_publish() {
        let t_rad = DVector::from_vec(vec![300.0, 250.0, 220.0]);
        let t_con = DVector::from_vec(vec![300.0, 250.5, 220.0]);
        let height = DVector::from_vec(vec![900.0, 5_500.0, 16_000.0]);
        let top = ConvectiveTop::diagnose(
            &t_rad,
            &t_con,
            &plev(),
            &height,
            Days::new(0.5),
            KelvinPerDay::new(0.2),
        );

        assert!(top.is_defined());
        assert_relative_eq!(top.heating_rate[1], 1.0);
        assert_relative_eq!(top.index.unwrap(), 1.8, max_relative = 1e-12);
        assert_relative_eq!(*top.height.unwrap(), 13_900.0, max_relative = 1e-12);
        assert_relative_eq!(*top.temperature.unwrap(), 226.1, max_relative = 1e-12);

        let mut store = VariableStore::new();
        top.write_to(&mut store);
        assert_eq!(store.len(), 5);
        let plev_top = store.scalar(CONVECTIVE_TOP_PLEV).unwrap();
        assert_relative_eq!(plev_top, 18_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_undefined_top_is_nan_in_store() {
        let t = DVector::from_vec(vec![300.0, 250.0, 220.0]);
        let height = DVector::from_vec(vec![900.0, 5_500.0, 16_000.0]);
        let top = ConvectiveTop::diagnose(
            &t,
            &t,
            &plev(),
            &height,
            Days::new(1.0),
            KelvinPerDay::new(0.2),
        );
        assert!(!top.is_defined());
        assert_eq!(top.index, None);

        let mut store = VariableStore::new();
        top.write_to(&mut store);
        assert!(store.scalar(CONVECTIVE_TOP_HEIGHT).unwrap().is_nan());
        assert!(store.scalar(CONVECTIVE_TOP_TEMPERATURE).unwrap().is_nan());
        assert_eq!(store.scalar(CONVECTIVE_HEATING_RATE), Some(0.0));
    }
}
