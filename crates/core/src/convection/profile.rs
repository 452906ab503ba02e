//! Construction of candidate convective temperature profiles.
//!
//! A candidate starts from an assumed surface temperature and follows the
//! pressure lapse rate upward:
//!
//! ```text
//! T_con[i] = T_s - Σ_{k≤i} Δp[k] × Γ_p[k]
//! ```
//!
//! `Δp[0] = plev[0] - phlev[0]` spans the surface half-level to the lowest
//! full level; above that `Δp` is the full-level spacing, because the lapse
//! rate lives on the half-levels between them.

use nalgebra::DVector;

use super::error::ConvectionResult;
use crate::core_types::interp::cumulative_sum;
use crate::core_types::units::Days;

/// Column data a profile builder may read.
#[derive(Debug, Clone, Copy)]
pub struct ProfileInputs<'a> {
    /// Radiatively updated temperature [K]
    pub t_rad: &'a DVector<f64>,
    /// Temperature at the previous timestep [K]
    pub t_old: &'a DVector<f64>,
    /// Full pressure levels [Pa]
    pub plev: &'a DVector<f64>,
    /// Half pressure levels [Pa]
    pub phlev: &'a DVector<f64>,
    /// Pressure lapse rate on the lower half-levels [K/Pa]
    pub lapse: &'a DVector<f64>,
    /// Model timestep
    pub timestep: Days,
}

/// Builds the convectively adjusted profile for an assumed surface temperature.
///
/// This is the one override point of the adjustment schemes; everything else
/// (energy balance, surface search, diagnostics) is shared.
pub trait ConvectiveProfile {
    /// Candidate temperature profile [K] for surface temperature `surface_t` [K].
    ///
    /// # Errors
    ///
    /// Implementations return an error when their own parameters do not fit
    /// the column (for example a timescale profile of the wrong length).
    fn convective_profile(
        &mut self,
        inputs: &ProfileInputs<'_>,
        surface_t: f64,
    ) -> ConvectionResult<DVector<f64>>;
}

/// Pressure thickness used for the lapse rate integral [Pa].
pub fn lapse_thickness(plev: &DVector<f64>, phlev: &DVector<f64>) -> DVector<f64> {
    DVector::from_fn(plev.len(), |i, _| {
        if i == 0 {
            plev[0] - phlev[0]
        } else {
            plev[i] - plev[i - 1]
        }
    })
}

/// Temperature profile following the lapse rate everywhere (no clipping).
pub fn lapse_profile(inputs: &ProfileInputs<'_>, surface_t: f64) -> DVector<f64> {
    let dp = lapse_thickness(inputs.plev, inputs.phlev);
    let integral = cumulative_sum(&dp.component_mul(inputs.lapse));
    integral.map(|cooling| surface_t - cooling)
}

/// Instantaneous adjustment with a sharp convective top.
///
/// The lapse-rate profile is kept up to the highest level where it is
/// warmer than the radiative profile; above that the radiative profile is
/// used unchanged. A column the lapse-rate profile never warms is returned
/// as is, so a stable column is never cooled.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardProfile;

impl HardProfile {
    /// Index of the highest level where `t_con` exceeds `t_rad`.
    pub fn convective_top(t_con: &DVector<f64>, t_rad: &DVector<f64>) -> Option<usize> {
        (0..t_con.len()).rev().find(|&i| t_con[i] > t_rad[i])
    }

    /// Hard-adjusted profile without going through the trait object.
    pub fn build(inputs: &ProfileInputs<'_>, surface_t: f64) -> DVector<f64> {
        let t_con = lapse_profile(inputs, surface_t);
        match Self::convective_top(&t_con, inputs.t_rad) {
            Some(top) => DVector::from_fn(t_con.len(), |i, _| {
                if i <= top {
                    t_con[i]
                } else {
                    inputs.t_rad[i]
                }
            }),
            None => inputs.t_rad.clone(),
        }
    }
}

impl ConvectiveProfile for HardProfile {
    fn convective_profile(
        &mut self,
        inputs: &ProfileInputs<'_>,
        surface_t: f64,
    ) -> ConvectionResult<DVector<f64>> {
        Ok(Self::build(inputs, surface_t))
    }
}
