//! Parameters structure for DriveCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;
use crate::wheel_ctrl::Gains;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for drive control.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Params {

    // ---- GEOMETRY ----

    /// Distance travelled by a wheel per encoder count.
    ///
    /// Units: inches
    pub dist_per_count_in: f64,

    /// Calibration factor applied to the number of counts required to cover
    /// a distance.
    pub count_adjust: f64,

    /// Distance between the contact points of the two wheels.
    ///
    /// Units: inches
    pub track_width_in: f64,

    // ---- CLOSED LOOP ----

    /// Wheel speed controller gains.
    pub gains: Gains,

    /// Sampling period of the wheel speed controllers. The gains are tuned
    /// against this period.
    ///
    /// Units: seconds
    pub sample_period_s: f64,

    /// Shortest period the final sample of a move can be trimmed to.
    ///
    /// Units: seconds
    pub min_sample_period_s: f64,

    /// Number of powered samples over which stalls are detected.
    pub stall_window_samples: usize,

    /// Minimum counts a wheel must make over the stall window. Kept below
    /// the counts made in the first samples of a slow move, while the
    /// controllers are still ramping up.
    pub stall_min_counts: i64,

    /// A move times out after `duration * timeout_factor + timeout_margin_s`.
    pub timeout_factor: f64,

    /// Units: seconds
    pub timeout_margin_s: f64,

    // ---- OPEN LOOP ----

    /// Multiplier applied to the right motor power in open-loop drives.
    pub right_power_comp: f64,

    /// Multiplier applied to the right motor power in open-loop turns.
    pub right_turn_comp: f64,

    /// Period at which encoders are polled during open-loop drives.
    ///
    /// Units: seconds
    pub poll_period_s: f64,

    /// Window over which `drive_until_stopped` checks the left wheel is
    /// still moving.
    ///
    /// Units: seconds
    pub until_stopped_window_s: f64,

    /// Minimum counts the left wheel must make over the window for
    /// `drive_until_stopped` to keep going.
    pub until_stopped_min_counts: i64,

    /// Maximum duration of any open-loop drive.
    ///
    /// Units: seconds
    pub open_loop_timeout_s: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            dist_per_count_in: 6.0 / 242.0,
            count_adjust: 1.03,
            track_width_in: 7.25,
            gains: Gains::default(),
            sample_period_s: 0.15,
            min_sample_period_s: 0.02,
            stall_window_samples: 2,
            stall_min_counts: 5,
            timeout_factor: 3.0,
            timeout_margin_s: 2.0,
            right_power_comp: 1.02,
            right_turn_comp: 0.98,
            poll_period_s: 0.01,
            until_stopped_window_s: 0.5,
            until_stopped_min_counts: 10,
            open_loop_timeout_s: 30.0,
        }
    }
}

impl Params {
    /// Number of encoder counts needed to cover the given distance.
    pub fn counts_for(&self, dist_in: f64) -> f64 {
        dist_in.abs() / self.dist_per_count_in * self.count_adjust
    }
}
