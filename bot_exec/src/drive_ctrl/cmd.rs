//! Commands passed into DriveCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;
use std::f64::consts::PI;

use super::DriveCtrlError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command to move each wheel through a signed distance in a given time.
///
/// The sign of each distance gives the direction of that wheel, positive
/// being forwards. Equal distances drive straight, equal and opposite
/// distances turn on the spot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MoveCommand {
    /// Distance for the right wheel.
    ///
    /// Units: inches
    pub right_dist_in: f64,

    /// Distance for the left wheel.
    ///
    /// Units: inches
    pub left_dist_in: f64,

    /// Time in which both wheels should complete their distance.
    ///
    /// Units: seconds
    pub duration_s: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Direction of an in-place rotation, as seen from above.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Rotation {
    /// Heading decreasing: left wheel forwards, right wheel backwards.
    Clockwise,

    /// Heading increasing: right wheel forwards, left wheel backwards.
    CounterClockwise,
}

/// Direction of a straight line move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Travel {
    Forward,
    Backward,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl MoveCommand {

    /// Build a straight move covering `dist_in` (negative to reverse) at `speed_ins`.
    pub fn straight(dist_in: f64, speed_ins: f64) -> Result<Self, DriveCtrlError> {
        check_speed(speed_ins)?;

        Ok(Self {
            right_dist_in: dist_in,
            left_dist_in: dist_in,
            duration_s: dist_in.abs() / speed_ins
        })
    }

    /// Build an in-place turn through `angle_deg` with each wheel moving at `speed_ins`.
    ///
    /// Positive angles turn counter-clockwise.
    pub fn turn(
        angle_deg: f64, 
        speed_ins: f64, 
        track_width_in: f64
    ) -> Result<Self, DriveCtrlError> {
        check_speed(speed_ins)?;

        let arc_in = turn_arc_in(angle_deg, track_width_in);
        let dir = util::maths::sign(angle_deg);

        Ok(Self {
            right_dist_in: dir * arc_in,
            left_dist_in: -dir * arc_in,
            duration_s: arc_in / speed_ins
        })
    }

    /// Determine if the command can be executed.
    ///
    /// Distances must be finite. Unless both distances are zero, in which
    /// case there is nothing to do, the duration must be positive and finite.
    pub fn is_valid(&self) -> bool {
        if !(self.right_dist_in.is_finite() && self.left_dist_in.is_finite()) {
            return false
        }

        self.is_null() || (self.duration_s.is_finite() && self.duration_s > 0f64)
    }

    /// True if neither wheel needs to move.
    pub fn is_null(&self) -> bool {
        self.right_dist_in == 0f64 && self.left_dist_in == 0f64
    }

    /// Sum of the absolute wheel distances.
    pub fn total_dist_in(&self) -> f64 {
        self.right_dist_in.abs() + self.left_dist_in.abs()
    }

    /// Signed target speeds of the (left, right) wheels.
    pub fn target_speeds_ins(&self) -> (f64, f64) {
        (
            self.left_dist_in / self.duration_s,
            self.right_dist_in / self.duration_s
        )
    }
}

impl Rotation {
    /// Get the rotation that reduces a signed angular error.
    ///
    /// Negative errors turn clockwise, zero and positive errors
    /// counter-clockwise.
    pub fn from_error(error_deg: f64) -> Self {
        if error_deg < 0f64 {
            Rotation::Clockwise
        }
        else {
            Rotation::CounterClockwise
        }
    }

    /// `+1` for counter-clockwise, `-1` for clockwise.
    pub fn sign(&self) -> f64 {
        match self {
            Rotation::Clockwise => -1f64,
            Rotation::CounterClockwise => 1f64
        }
    }
}

impl Travel {
    /// Get the direction of travel that reduces a signed distance error.
    pub fn from_error(error: f64) -> Self {
        if error < 0f64 {
            Travel::Backward
        }
        else {
            Travel::Forward
        }
    }

    /// `+1` for forwards, `-1` for backwards.
    pub fn sign(&self) -> f64 {
        match self {
            Travel::Forward => 1f64,
            Travel::Backward => -1f64
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Distance each wheel must cover to turn the robot in place through `angle_deg`.
pub fn turn_arc_in(angle_deg: f64, track_width_in: f64) -> f64 {
    PI * track_width_in * angle_deg.abs() / 360f64
}

fn check_speed(speed_ins: f64) -> Result<(), DriveCtrlError> {
    if speed_ins.is_finite() && speed_ins > 0f64 {
        Ok(())
    }
    else {
        Err(DriveCtrlError::InvalidSpeed(speed_ins))
    }
}
