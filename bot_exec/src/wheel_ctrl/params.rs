//! Parameters structure for WheelCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Gains of a wheel speed controller.
///
/// The defaults were tuned against a 0.15 s sampling period, changing the
/// sampling period will require the gains to be retuned.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Gains {
    /// Proportional gain
    pub k_p: f64,

    /// Integral gain
    pub k_i: f64,

    /// Derivative gain
    pub k_d: f64,
}

impl Default for Gains {
    fn default() -> Self {
        Self {
            k_p: 0.9,
            k_i: 0.09,
            k_d: 0.3
        }
    }
}
