//! Critical lapse rate in height and pressure coordinates.
//!
//! The adjustment integrates the lapse rate in pressure, so the height-based
//! critical lapse rate is converted with the hydrostatic relation
//! `dp = -ρ g dz`:
//!
//! ```text
//! Γ_p = -Γ_z / (g × ρ)
//! ```
//!
//! Density is evaluated on the half-levels by linear interpolation of the
//! full-level density, extrapolating past the ends of the column.

use nalgebra::DVector;

use super::error::{ConvectionError, ConvectionResult};
use crate::atmosphere::density;
use crate::core_types::constants::GRAVITY;
use crate::core_types::interp::interp_extrapolate;

/// Convert a height lapse rate (K/m) to a pressure lapse rate (K/Pa).
///
/// Only the first `plev.len()` half-levels are used; the top half-level
/// bounds the column and never carries a lapse rate.
///
/// # Arguments
///
/// * `plev` - Full pressure levels [Pa]
/// * `phlev` - Half pressure levels [Pa]
/// * `temperature` - Temperature used for the density [K]
/// * `lapse` - Height lapse rate on the half-levels [K/m]
///
/// # Errors
///
/// Returns [`ConvectionError::ShapeMismatch`] if `lapse` has fewer values
/// than there are full levels.
pub fn pressure_lapse_rate(
    plev: &DVector<f64>,
    phlev: &DVector<f64>,
    temperature: &DVector<f64>,
    lapse: &[f64],
) -> ConvectionResult<DVector<f64>> {
    let n = plev.len();
    if lapse.len() < n {
        return Err(ConvectionError::ShapeMismatch {
            field: "lapse",
            expected: n,
            actual: lapse.len(),
        });
    }

    let rho = density(plev, temperature);
    Ok(DVector::from_fn(n, |i, _| {
        let rho_half = interp_extrapolate(plev.as_slice(), rho.as_slice(), phlev[i]);
        -lapse[i] / (GRAVITY * rho_half)
    }))
}
