//! Convective adjustment schemes.
//!
//! One adjustment step:
//! 1. convert the critical lapse rate to pressure coordinates using the
//!    radiatively updated temperature,
//! 2. search for the surface temperature whose adjusted profile conserves
//!    column + surface energy (skipped for a fixed-temperature surface),
//! 3. write the profile and surface temperature back,
//! 4. diagnose the convective top.
//!
//! The schemes differ only in how a candidate profile is built, which is
//! the [`ConvectiveProfile`] type parameter of [`Adjustment`].

use tracing::{debug, info};

use super::config::ConvectionConfig;
use super::diagnostics::ConvectiveTop;
use super::energy::EnergyEvaluator;
use super::error::ConvectionResult;
use super::lapse::pressure_lapse_rate;
use super::profile::{ConvectiveProfile, HardProfile, ProfileInputs};
use super::r#trait::Convection;
use super::relaxed::{ConvectiveTau, RelaxedProfile};
use super::solver::{Resolution, SurfaceTemperatureSolver};
use crate::atmosphere::Atmosphere;
use crate::core_types::units::{Days, Kelvin};
use crate::core_types::VariableStore;
use crate::humidity::Humidity;
use crate::surface::Surface;

/// Leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct NonConvective {
    variables: VariableStore,
}

impl NonConvective {
    /// Create the no-op scheme
    pub fn new() -> Self {
        Self::default()
    }
}

impl Convection for NonConvective {
    fn stabilize(
        &mut self,
        _atmosphere: &mut Atmosphere,
        _atmosphere_old: &Atmosphere,
        _humidity: &dyn Humidity,
        _lapse: &[f64],
        _surface: &mut Surface,
        _timestep: Days,
    ) -> ConvectionResult<()> {
        Ok(())
    }

    fn variables(&self) -> &VariableStore {
        &self.variables
    }
}

/// Energy-conserving adjustment towards the critical lapse rate.
#[derive(Debug, Clone)]
pub struct Adjustment<P> {
    profile: P,
    config: ConvectionConfig,
    variables: VariableStore,
    convective_top: Option<ConvectiveTop>,
    resolution: Option<Resolution>,
}

/// Instantaneous adjustment with a sharp convective top
pub type HardAdjustment = Adjustment<HardProfile>;

/// Relaxation towards the lapse-rate profile with a convective timescale
pub type RelaxedAdjustment = Adjustment<RelaxedProfile>;

impl HardAdjustment {
    /// Create a hard adjustment scheme
    pub fn new(config: ConvectionConfig) -> Self {
        Self::with_profile(HardProfile, config)
    }
}

impl RelaxedAdjustment {
    /// Create a relaxed adjustment scheme
    ///
    /// # Arguments
    ///
    /// * `tau` - Source of the convective timescale
    /// * `config` - Shared adjustment parameters
    pub fn new(tau: ConvectiveTau, config: ConvectionConfig) -> Self {
        Self::with_profile(RelaxedProfile::new(tau), config)
    }
}

impl<P: ConvectiveProfile> Adjustment<P> {
    /// Create a scheme around any profile builder.
    pub fn with_profile(profile: P, config: ConvectionConfig) -> Self {
        Self {
            profile,
            config,
            variables: VariableStore::new(),
            convective_top: None,
            resolution: None,
        }
    }

    /// Profile builder (holds the timescale cache of relaxed schemes)
    pub fn profile(&self) -> &P {
        &self.profile
    }

    /// How the last surface temperature search was resolved
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }
}

impl<P: ConvectiveProfile + Send> Convection for Adjustment<P> {
    fn stabilize(
        &mut self,
        atmosphere: &mut Atmosphere,
        atmosphere_old: &Atmosphere,
        humidity: &dyn Humidity,
        lapse: &[f64],
        surface: &mut Surface,
        timestep: Days,
    ) -> ConvectionResult<()> {
        let t_rad = atmosphere.temperature().clone();
        let t_old = atmosphere_old.temperature().clone();
        let lp = pressure_lapse_rate(atmosphere.plev(), atmosphere.phlev(), &t_rad, lapse)?;

        let outcome = {
            let inputs = ProfileInputs {
                t_rad: &t_rad,
                t_old: &t_old,
                plev: atmosphere.plev(),
                phlev: atmosphere.phlev(),
                lapse: &lp,
                timestep,
            };
            let evaluator = EnergyEvaluator::new(atmosphere, atmosphere_old, humidity, surface);
            let solver = SurfaceTemperatureSolver::new(
                self.config.max_iterations,
                self.config.near_zero_divisor,
            );
            solver.solve(&mut self.profile, &inputs, &evaluator)?
        };

        atmosphere.set_temperature(&outcome.temperature);
        atmosphere.update_height();
        if !surface.is_fixed_temperature() {
            surface.temperature = Kelvin::new(outcome.surface_temperature);
        }

        let top = ConvectiveTop::diagnose(
            &t_rad,
            atmosphere.temperature(),
            atmosphere.plev(),
            atmosphere.height(),
            timestep,
            self.config.heating_threshold,
        );
        top.write_to(&mut self.variables);

        match (outcome.resolution, top.plev) {
            (Resolution::Stable, _) => {}
            (resolution, Some(plev)) => info!(
                "Convective adjustment ({:?}): top at {}, surface {}",
                resolution, plev, surface.temperature
            ),
            (resolution, None) => debug!(
                "Convective adjustment ({:?}) below the heating threshold, surface {}",
                resolution, surface.temperature
            ),
        }

        self.convective_top = Some(top);
        self.resolution = Some(outcome.resolution);
        Ok(())
    }

    fn variables(&self) -> &VariableStore {
        &self.variables
    }

    fn convective_top(&self) -> Option<&ConvectiveTop> {
        self.convective_top.as_ref()
    }
}
