//! Named output variables written by a model component.
//!
//! Schemes publish their diagnostics under fixed names so an outer driver
//! can collect them without knowing the concrete scheme type.

use nalgebra::DVector;
use rustc_hash::FxHashMap;

/// Flat store of named diagnostic arrays.
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    values: FxHashMap<String, DVector<f64>>,
}

impl VariableStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite a variable
    pub fn set(&mut self, name: &str, value: DVector<f64>) {
        self.values.insert(name.to_owned(), value);
    }

    /// Store a scalar as a one-element array
    pub fn set_scalar(&mut self, name: &str, value: f64) {
        self.set(name, DVector::from_element(1, value));
    }

    /// Look up a variable by name
    pub fn get(&self, name: &str) -> Option<&DVector<f64>> {
        self.values.get(name)
    }

    /// First element of a variable, if present
    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|v| v.iter().next().copied())
    }

    /// Whether a variable has been written
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of stored variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over names in arbitrary order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}
