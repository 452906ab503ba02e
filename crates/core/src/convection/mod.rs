//! Energy-conserving convective adjustment
//!
//! Given a column whose temperature was just updated by radiation, the
//! adjustment replaces unstable parts of the profile by the critical lapse
//! rate and searches for the surface temperature that keeps the total of
//! column and surface energy unchanged.
//!
//! # Scientific Background
//!
//! Radiative-convective equilibrium models represent convection as a
//! constraint rather than a flux: wherever the radiative profile is steeper
//! than the critical lapse rate (typically 6.5 K/km), it is reset to that
//! lapse rate. The energy this takes from or gives to the atmosphere comes
//! from the surface, so the adjusted surface temperature is found by a
//! bounded regula falsi search on the energy change.
//!
//! # Schemes
//!
//! - [`NonConvective`]: no adjustment
//! - [`HardAdjustment`]: instantaneous adjustment up to a sharp convective top
//! - [`RelaxedAdjustment`]: relaxation with a convective timescale that is
//!   fixed, pressure dependent or temperature dependent
//!
//! # References
//!
//! - Manabe, S. & Strickler, R.F. (1964). "Thermal equilibrium of the
//!   atmosphere with a convective adjustment." JAS 21(4), 361-385.
//! - Kluft, L. et al. (2019). "Re-examining the first climate models:
//!   climate sensitivity of a modern radiative-convective equilibrium model."
//!   J. Climate 32(23).
//!
//! # Example
//!
//! ```
//! use rce_sim_core::atmosphere::Atmosphere;
//! use rce_sim_core::convection::{create_convection, ConvectionConfig, ConvectionScheme};
//! use rce_sim_core::core_types::units::{Days, Kelvin};
//! use rce_sim_core::humidity::FixedVmr;
//! use rce_sim_core::surface::Surface;
//!
//! let mut atmosphere = Atmosphere::new(
//!     vec![90_000.0, 50_000.0, 10_000.0],
//!     vec![100_000.0, 70_000.0, 30_000.0, 5_000.0],
//!     vec![300.0, 250.0, 220.0],
//! )
//! .unwrap();
//! let previous = atmosphere.clone();
//! let mut surface = Surface::slab(Kelvin::new(305.0), 50.0);
//!
//! let mut convection = create_convection(&ConvectionScheme::Hard, ConvectionConfig::default());
//! let lapse = [0.0065; 4];
//! convection
//!     .stabilize(&mut atmosphere, &previous, &FixedVmr, &lapse, &mut surface, Days::new(0.5))
//!     .unwrap();
//! assert!(*surface.temperature < 305.0);
//! ```

mod adjustment;
mod config;
pub mod diagnostics;
pub mod energy;
mod error;
pub mod lapse;
pub mod profile;
pub mod relaxed;
pub mod solver;
#[allow(clippy::module_name_repetitions)]
mod r#trait;

// Re-exports
pub use adjustment::{Adjustment, HardAdjustment, NonConvective, RelaxedAdjustment};
pub use config::{ConvectionConfig, ConvectionScheme};
pub use diagnostics::{interp_variable, ConvectiveTop};
pub use energy::{energy_difference_dry, latent_heat_difference, EnergyEvaluator};
pub use error::{ConvectionError, ConvectionResult};
pub use lapse::pressure_lapse_rate;
pub use profile::{ConvectiveProfile, HardProfile, ProfileInputs};
pub use r#trait::Convection;
pub use relaxed::{ConvectiveTau, RelaxedProfile, DEFAULT_TAU0};
pub use solver::{BracketStep, Resolution, SolverOutcome, SurfaceTemperatureSolver};

use tracing::info;

/// Create a convection scheme from its configuration.
///
/// # Arguments
///
/// * `scheme` - Which adjustment to apply
/// * `config` - Parameters shared by the adjustment schemes
///
/// # Returns
///
/// A boxed `Convection` trait object
pub fn create_convection(
    scheme: &ConvectionScheme,
    config: ConvectionConfig,
) -> Box<dyn Convection> {
    match scheme {
        ConvectionScheme::NonConvective => {
            info!("Convection disabled");
            Box::new(NonConvective::new())
        }
        ConvectionScheme::Hard => {
            info!("Using hard convective adjustment");
            Box::new(HardAdjustment::new(config))
        }
        ConvectionScheme::Relaxed { tau } => {
            info!("Using relaxed convective adjustment ({:?})", tau);
            Box::new(RelaxedAdjustment::new(tau.clone(), config))
        }
    }
}
