//! Semantic unit types for the scalar quantities crossing the column API
//!
//! Profiles stay as plain `DVector<f64>` arrays; the newtypes here wrap the
//! scalars that are easy to mix up at call sites (surface temperature,
//! timestep, convective-top pressure and height).
//!
//! # Design Philosophy
//! - All types are `f64`: the energy balance sums terms of order 1e9 J/m² and
//!   needs the headroom
//! - `Deref` to the raw value for arithmetic inside the physics code
//! - Total ordering via `Ord` (NaN sorts above all values)
//! - Serde support so diagnostics and configs can be written out
//!
//! # Usage
//! ```
//! use rce_sim_core::core_types::units::{Days, Kelvin, Pascals};
//!
//! let surface = Kelvin::new(300.0);
//! let step = Days::from_hours(12.0);
//! assert_eq!(*step, 0.5);
//! assert_eq!(Pascals::from_hpa(850.0).to_string(), "850.0 hPa");
//! assert!(*surface > 273.15);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// TEMPERATURE TYPES
// ============================================================================

/// Temperature in Kelvin (absolute scale)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kelvin(f64);

impl Eq for Kelvin {}

impl PartialOrd for Kelvin {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Kelvin {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Kelvin {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Kelvin {
    /// Create a new Kelvin temperature.
    ///
    /// Asserts the value is not below absolute zero. NaN is let through so
    /// that malformed columns surface as NaN rather than a panic.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(
            value >= 0.0 || value.is_nan(),
            "Kelvin::new: value is below absolute zero (0 K)"
        );
        Kelvin(value)
    }
}

impl From<f64> for Kelvin {
    fn from(v: f64) -> Self {
        Kelvin::new(v)
    }
}

impl From<Kelvin> for f64 {
    fn from(k: Kelvin) -> f64 {
        k.0
    }
}

impl fmt::Display for Kelvin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} K", self.0)
    }
}

// ============================================================================
// PRESSURE / LENGTH
// ============================================================================

/// Pressure in Pascals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Pascals(f64);

impl Pascals {
    /// Create a pressure value
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Pascals(value)
    }

    /// Create from hectopascals (1 hPa = 100 Pa)
    #[inline]
    #[must_use]
    pub fn from_hpa(value: f64) -> Self {
        Pascals(value * 100.0)
    }

    /// Value in hectopascals
    #[inline]
    #[must_use]
    pub fn to_hpa(self) -> f64 {
        self.0 / 100.0
    }
}

impl Deref for Pascals {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for Pascals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} hPa", self.to_hpa())
    }
}

/// Geopotential height in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(f64);

impl Meters {
    /// Create a height value
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Meters(value)
    }
}

impl Deref for Meters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} m", self.0)
    }
}

// ============================================================================
// TIME / RATES
// ============================================================================

/// Duration in days (model timestep unit)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Days(f64);

impl Days {
    /// Create a duration. Asserts the value is strictly positive.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(value > 0.0, "Days::new: timestep must be positive");
        Days(value)
    }

    /// Create from hours
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn from_hours(hours: f64) -> Self {
        Days::new(hours / 24.0)
    }
}

impl Deref for Days {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for Days {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} d", self.0)
    }
}

/// Heating rate in Kelvin per day
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct KelvinPerDay(f64);

impl KelvinPerDay {
    /// Create a heating rate (any sign)
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        KelvinPerDay(value)
    }
}

impl Deref for KelvinPerDay {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for KelvinPerDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} K/day", self.0)
    }
}
