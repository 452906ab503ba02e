//! Surface temperature search for energy-conserving convection.
//!
//! The adjusted profile is parameterised by the surface temperature it
//! starts from. Keeping the surface unchanged gives an upper bound (the
//! column only gains energy); moving the surface down to the coldest
//! radiative temperature without touching the atmosphere gives a lower
//! bound (the surface only loses energy). Regula falsi between the two
//! finds the surface temperature whose profile neither gains nor loses
//! energy:
//!
//! ```text
//! T_s = T_neg + (T_pos - T_neg) × (-ΔE_neg) / (ΔE_pos - ΔE_neg)
//! ```
//!
//! Only the bound with the sign of the new energy change is replaced, so
//! `T_neg ≤ T_s ≤ T_pos` and `ΔE_neg ≤ 0 ≤ ΔE_pos` hold on every iteration.

use nalgebra::DVector;
use tracing::{debug, trace, warn};

use super::energy::EnergyEvaluator;
use super::error::{ConvectionError, ConvectionResult};
use super::profile::{ConvectiveProfile, ProfileInputs};

/// How the solver reached its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Fixed-temperature surface: profile built without energy conservation
    FixedSurface,
    /// Convection would not add energy; surface left unchanged
    Stable,
    /// Moving the surface to the coldest radiative temperature already balances
    LowerBound,
    /// Regula falsi converged after this many iterations
    Converged(usize),
}

/// One regula falsi iteration: the bracket used and the point it proposed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketStep {
    /// Lower surface temperature bound [K]
    pub surface_t_neg: f64,
    /// Proposed surface temperature [K]
    pub surface_t: f64,
    /// Upper surface temperature bound [K]
    pub surface_t_pos: f64,
    /// Energy change at the lower bound [J/m²]
    pub diff_neg: f64,
    /// Energy change at the proposed point [J/m²]
    pub diff: f64,
    /// Energy change at the upper bound [J/m²]
    pub diff_pos: f64,
}

/// Result of a surface temperature search.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome {
    /// Adjusted temperature profile [K]
    pub temperature: DVector<f64>,
    /// Adjusted surface temperature [K]
    pub surface_temperature: f64,
    /// How the answer was reached
    pub resolution: Resolution,
    /// Regula falsi iterations, in order
    pub history: Vec<BracketStep>,
}

/// Bounded regula falsi search over surface temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTemperatureSolver {
    max_iterations: usize,
    near_zero_divisor: f64,
}

impl Default for SurfaceTemperatureSolver {
    fn default() -> Self {
        Self::new(100, 1e13)
    }
}

impl SurfaceTemperatureSolver {
    /// Create a solver.
    ///
    /// # Arguments
    ///
    /// * `max_iterations` - Iteration cap before giving up
    /// * `near_zero_divisor` - Tolerance is `heat_capacity / near_zero_divisor`
    pub fn new(max_iterations: usize, near_zero_divisor: f64) -> Self {
        Self {
            max_iterations,
            near_zero_divisor,
        }
    }

    /// Find the energy-conserving profile and surface temperature.
    ///
    /// # Errors
    ///
    /// Returns [`ConvectionError::NoEnergyConservingProfile`] if the search
    /// does not converge within the iteration cap, and propagates errors
    /// from the profile builder.
    pub fn solve<P: ConvectiveProfile + ?Sized>(
        &self,
        builder: &mut P,
        inputs: &ProfileInputs<'_>,
        evaluator: &EnergyEvaluator<'_>,
    ) -> ConvectionResult<SolverOutcome> {
        let surface = evaluator.surface();
        let surface_t0 = *surface.temperature;

        if surface.is_fixed_temperature() {
            debug!("Fixed surface temperature {:.2} K, energy not conserved", surface_t0);
            return Ok(SolverOutcome {
                temperature: builder.convective_profile(inputs, surface_t0)?,
                surface_temperature: surface_t0,
                resolution: Resolution::FixedSurface,
                history: Vec::new(),
            });
        }

        let near_zero = surface.heat_capacity / self.near_zero_divisor;

        // Upper bound: surface unchanged, convection can only add energy.
        // A column this candidate would not warm keeps its radiative profile.
        let mut surface_t_pos = surface_t0;
        let t_con = builder.convective_profile(inputs, surface_t_pos)?;
        let mut diff_pos = evaluator.evaluate(&t_con, surface_t_pos);
        if diff_pos < near_zero {
            debug!(
                "Convection does not warm the column (dE = {:.3e} J/m²), no adjustment",
                diff_pos
            );
            return Ok(SolverOutcome {
                temperature: inputs.t_rad.clone(),
                surface_temperature: surface_t0,
                resolution: Resolution::Stable,
                history: Vec::new(),
            });
        }

        // Lower bound: coldest radiative temperature, atmosphere unchanged
        let mut surface_t_neg = inputs.t_rad.min();
        let mut diff_neg = evaluator.surface_only(surface_t_neg);
        if diff_neg.abs() < near_zero {
            return Ok(SolverOutcome {
                temperature: t_con,
                surface_temperature: surface_t_neg,
                resolution: Resolution::LowerBound,
                history: Vec::new(),
            });
        }

        debug!(
            "Bracketing surface temperature in [{:.3}, {:.3}] K, dE in [{:.3e}, {:.3e}] J/m²",
            surface_t_neg, surface_t_pos, diff_neg, diff_pos
        );

        let mut history = Vec::new();
        for iteration in 1..=self.max_iterations {
            let surface_t = surface_t_neg
                + (surface_t_pos - surface_t_neg) * (-diff_neg) / (-diff_neg + diff_pos);
            let candidate = builder.convective_profile(inputs, surface_t)?;
            let diff = evaluator.evaluate(&candidate, surface_t);
            trace!(
                "Iteration {}: T_s = {:.6} K, dE = {:.4e} J/m²",
                iteration,
                surface_t,
                diff
            );
            history.push(BracketStep {
                surface_t_neg,
                surface_t,
                surface_t_pos,
                diff_neg,
                diff,
                diff_pos,
            });

            if diff > 0.0 {
                diff_pos = diff;
                surface_t_pos = surface_t;
            } else {
                diff_neg = diff;
                surface_t_neg = surface_t;
            }

            if diff_pos < near_zero || diff_neg.abs() < near_zero {
                return Ok(SolverOutcome {
                    temperature: candidate,
                    surface_temperature: surface_t,
                    resolution: Resolution::Converged(iteration),
                    history,
                });
            }
        }

        warn!(
            "No energy conserving convective profile after {} iterations",
            self.max_iterations
        );
        Err(ConvectionError::NoEnergyConservingProfile {
            iterations: self.max_iterations,
            surface_temperature_neg: surface_t_neg,
            surface_temperature_pos: surface_t_pos,
            diff_neg,
            diff_pos,
        })
    }
}
