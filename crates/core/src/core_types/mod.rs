//! Core types and utilities

pub mod constants;
pub mod interp;
pub mod units;
pub mod variables;

pub use units::*;
pub use variables::VariableStore;
