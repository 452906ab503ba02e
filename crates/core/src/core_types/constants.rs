//! Physical constants for column thermodynamics.
//!
//! Values follow the usual radiative-convective modelling conventions
//! (WMO standard gravity, dry-air gas constant from the molar mass of dry air).
//!
//! # References
//!
//! - WMO (1988). "Technical Regulations", standard gravity.
//! - Wallace, J.M. & Hobbs, P.V. (2006). "Atmospheric Science", 2nd ed., ch. 3.

/// Standard gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.80665;

/// Universal gas constant (J/(mol·K)).
pub const GAS_CONSTANT: f64 = 8.3144598;

/// Molar mass of dry air (kg/mol).
pub const MOLAR_MASS_DRY_AIR: f64 = 28.9645e-3;

/// Molar mass of water (kg/mol).
pub const MOLAR_MASS_WATER: f64 = 18.01528e-3;

/// Specific gas constant of dry air (J/(kg·K)).
pub const GAS_CONSTANT_DRY_AIR: f64 = GAS_CONSTANT / MOLAR_MASS_DRY_AIR;

/// Isobaric specific heat capacity of dry air (J/(kg·K)).
pub const SPECIFIC_HEAT_DRY_AIR: f64 = 1004.64;

/// Isobaric specific heat capacity of water vapour (J/(kg·K)).
pub const SPECIFIC_HEAT_WATER_VAPOUR: f64 = 1859.0;

/// Latent heat of vaporization of water at 0 °C (J/kg).
pub const LATENT_HEAT_VAPORIZATION: f64 = 2.501e6;

/// Density of liquid water (kg/m³).
pub const WATER_DENSITY: f64 = 1000.0;

/// Specific heat capacity of liquid water (J/(kg·K)).
pub const SPECIFIC_HEAT_WATER: f64 = 4185.0;
