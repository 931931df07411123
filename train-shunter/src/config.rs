//! Yard configuration.

use serde::{Deserialize, Serialize};

/// Configuration parameters for a [`Yard`](crate::yard::Yard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YardConfig {
    /// Number of wagon slots to reserve up front.
    pub initial_capacity: usize,

    /// Re-check the full chain of a train after every successful mutation.
    /// Violations are logged at `warn` level; the mutation is not undone.
    pub verify_after_mutation: bool,
}

impl YardConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(initial_capacity: usize, verify_after_mutation: bool) -> Self {
        Self {
            initial_capacity,
            verify_after_mutation,
        }
    }
}

impl Default for YardConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            verify_after_mutation: cfg!(debug_assertions),
        }
    }
}
