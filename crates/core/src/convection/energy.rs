//! Column + surface energy balance of a candidate adjustment.
//!
//! Convection only redistributes energy, so an admissible adjustment leaves
//! the total of dry static and latent energy unchanged:
//!
//! ```text
//! ΔE_dry = -Σ (c_p / g) × ΔT × Δphlev + C_s × ΔT_s
//! ΔE_lat = Σ Δm_h2o × L_v
//! ```
//!
//! `Δphlev` is negative for a surface-first grid, hence the leading minus.

use nalgebra::DVector;

use crate::atmosphere::Atmosphere;
use crate::core_types::constants::{GRAVITY, LATENT_HEAT_VAPORIZATION};
use crate::humidity::Humidity;
use crate::surface::Surface;

/// Dry energy difference between two column states, `2 - 1` (J/m²).
///
/// # Arguments
///
/// * `t_2`, `t_1` - Temperature profiles [K]
/// * `sst_2`, `sst_1` - Surface temperatures [K]
/// * `phlev` - Half pressure levels shared by both states [Pa]
/// * `cp` - Isobaric heat capacity per layer [J/(kg·K)]
/// * `eff_cp_s` - Effective surface heat capacity [J/(m²·K)]
pub fn energy_difference_dry(
    t_2: &DVector<f64>,
    t_1: &DVector<f64>,
    sst_2: f64,
    sst_1: f64,
    phlev: &DVector<f64>,
    cp: &DVector<f64>,
    eff_cp_s: f64,
) -> f64 {
    let atmosphere: f64 = (0..t_2.len())
        .map(|i| cp[i] / GRAVITY * (t_2[i] - t_1[i]) * (phlev[i + 1] - phlev[i]))
        .sum();
    -atmosphere + eff_cp_s * (sst_2 - sst_1)
}

/// Latent energy difference between two water vapour profiles, `2 - 1` (J/m²).
///
/// Profiles are water vapour mass per layer [kg/m²].
pub fn latent_heat_difference(h2o_2: &DVector<f64>, h2o_1: &DVector<f64>) -> f64 {
    (h2o_2 - h2o_1).sum() * LATENT_HEAT_VAPORIZATION
}

/// Evaluates the energy change of candidate profiles against the
/// radiatively updated state.
///
/// Each evaluation works on a private copy of the atmosphere: the candidate
/// temperature is written into the copy, the humidity model re-equilibrates
/// it and heights are recomputed before the water vapour is integrated. The
/// caller's atmosphere is never touched.
pub struct EnergyEvaluator<'a> {
    atmosphere: &'a Atmosphere,
    humidity: &'a dyn Humidity,
    surface: &'a Surface,
    heat_capacity: DVector<f64>,
    h2o_old: DVector<f64>,
}

impl<'a> EnergyEvaluator<'a> {
    /// Prepare an evaluator.
    ///
    /// # Arguments
    ///
    /// * `atmosphere` - Radiatively updated column (reference state)
    /// * `atmosphere_old` - Column at the previous timestep (latent reference)
    /// * `humidity` - Humidity model applied to every candidate
    /// * `surface` - Surface before adjustment
    pub fn new(
        atmosphere: &'a Atmosphere,
        atmosphere_old: &Atmosphere,
        humidity: &'a dyn Humidity,
        surface: &'a Surface,
    ) -> Self {
        Self {
            atmosphere,
            humidity,
            surface,
            heat_capacity: atmosphere.heat_capacity(),
            h2o_old: atmosphere_old.water_vapour_profile(),
        }
    }

    /// Surface the energy balance is closed against
    pub fn surface(&self) -> &Surface {
        self.surface
    }

    /// Energy change (J/m²) of replacing the reference state by `t_con`
    /// and surface temperature `surface_t`.
    pub fn evaluate(&self, t_con: &DVector<f64>, surface_t: f64) -> f64 {
        let mut scratch = self.atmosphere.clone();
        scratch.set_temperature(t_con);
        self.humidity.adjust_humidity(&mut scratch);
        scratch.update_height();
        let h2o_new = scratch.water_vapour_profile();

        let dry = energy_difference_dry(
            t_con,
            self.atmosphere.temperature(),
            surface_t,
            *self.surface.temperature,
            self.atmosphere.phlev(),
            &self.heat_capacity,
            self.surface.heat_capacity,
        );
        dry + latent_heat_difference(&h2o_new, &self.h2o_old)
    }

    /// Energy change of moving only the surface to `surface_t` (J/m²).
    pub fn surface_only(&self, surface_t: f64) -> f64 {
        self.surface.heat_capacity * (surface_t - *self.surface.temperature)
    }
}
