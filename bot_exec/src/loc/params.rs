//! Localisation parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for reading the position reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Maximum number of times the reference is polled for a valid reading.
    pub max_polls: usize,

    /// Time between polls.
    ///
    /// Units: seconds
    pub poll_interval_s: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_polls: 40,
            poll_interval_s: 0.05,
        }
    }
}
