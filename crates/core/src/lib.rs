//! Radiative-Convective Equilibrium Core Library
//!
//! Column physics for a one-dimensional radiative-convective equilibrium
//! model. The centrepiece is an energy-conserving convective adjustment:
//! after each radiative update the temperature profile is reset to a
//! critical lapse rate wherever it is unstable, and the surface temperature
//! is moved so that the column and surface together neither gain nor lose
//! energy.
//!
//! ## Modules
//!
//! - [`atmosphere`]: the atmospheric column (pressure grid, temperature,
//!   trace gases, heights)
//! - [`convection`]: adjustment schemes, energy balance, surface
//!   temperature solver and convective-top diagnostics
//! - [`humidity`]: humidity models applied to adjusted profiles
//! - [`surface`]: slab and fixed-temperature surfaces
//! - [`core_types`]: constants, units, interpolation and named variables

// Core types and utilities
pub mod core_types;

// Column state and its boundary conditions
pub mod atmosphere;
pub mod humidity;
pub mod surface;

// Convective adjustment
pub mod convection;

// Re-export core types
pub use core_types::{Days, Kelvin, KelvinPerDay, Meters, Pascals, VariableStore};

// Re-export column types
pub use atmosphere::{Atmosphere, AtmosphereError};
pub use humidity::{FixedRelativeHumidity, FixedVmr, Humidity};
pub use surface::{Surface, SurfaceKind};

// Re-export convection types
pub use convection::{
    create_convection, Convection, ConvectionConfig, ConvectionError, ConvectionResult,
    ConvectionScheme, ConvectiveTau, ConvectiveTop, HardAdjustment, NonConvective,
    RelaxedAdjustment,
};
