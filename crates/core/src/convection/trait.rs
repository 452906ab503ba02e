//! Convection scheme trait definition
//!
//! Every scheme exposes the same single step: take a radiatively updated
//! column and make it convectively stable. The driver does not need to know
//! which scheme it holds.

use super::diagnostics::ConvectiveTop;
use super::error::ConvectionResult;
use crate::atmosphere::Atmosphere;
use crate::core_types::units::Days;
use crate::core_types::VariableStore;
use crate::humidity::Humidity;
use crate::surface::Surface;

/// Stabilises a temperature profile by redistributing energy.
pub trait Convection: Send {
    /// Adjust `atmosphere` and `surface` in place.
    ///
    /// # Arguments
    ///
    /// * `atmosphere` - Column after the radiative update of this timestep
    /// * `atmosphere_old` - Column at the previous timestep
    /// * `humidity` - Humidity model re-equilibrating water vapour
    /// * `lapse` - Critical lapse rate on the half-levels (K/m)
    /// * `surface` - Surface coupled to the column
    /// * `timestep` - Model timestep
    ///
    /// # Errors
    ///
    /// Returns [`super::ConvectionError`] if the lapse rate does not fit the
    /// column or no energy-conserving profile is found.
    fn stabilize(
        &mut self,
        atmosphere: &mut Atmosphere,
        atmosphere_old: &Atmosphere,
        humidity: &dyn Humidity,
        lapse: &[f64],
        surface: &mut Surface,
        timestep: Days,
    ) -> ConvectionResult<()>;

    /// Diagnostics written by the last call to [`Convection::stabilize`]
    fn variables(&self) -> &VariableStore;

    /// Convective top of the last adjustment, if the scheme diagnoses one
    fn convective_top(&self) -> Option<&ConvectiveTop> {
        None
    }
}
