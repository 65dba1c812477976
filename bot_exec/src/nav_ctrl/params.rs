//! Navigation control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for navigation control.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Distance from the target below which the robot stops stepping and
    /// makes its final approach.
    ///
    /// Units: inches
    pub threshold_in: f64,

    /// Length of each advance step.
    ///
    /// Units: inches
    pub step_in: f64,

    /// Factor applied to the threshold and step length for careful targets.
    pub careful_factor: f64,

    /// Distance from the target at which it is considered reached.
    ///
    /// Units: inches
    pub tolerance_in: f64,

    /// Maximum number of advance steps towards one target.
    pub max_steps: usize,

    /// Maximum number of final approach attempts.
    pub final_attempts: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            threshold_in: 15.0,
            step_in: 7.0,
            careful_factor: 0.5,
            tolerance_in: 0.5,
            max_steps: 50,
            final_attempts: 3,
        }
    }
}
