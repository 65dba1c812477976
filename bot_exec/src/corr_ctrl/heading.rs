//! Heading conventions
//!
//! All headings and bearings are in degrees, counter-clockwise from the
//! course X axis, in the range [0, 360). A positive heading error is
//! corrected by turning counter-clockwise.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::drive_ctrl::Rotation;
use util::maths::{get_ang_dist_deg, wrap_360};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Bearing from one point to another.
///
/// Computed with the quadrant corrected arctangent, so it is the same as
/// `atan2(dy, dx)` wrapped into [0, 360). Points directly above or below give
/// 90 and 270, a coincident point gives 0.
pub fn bearing_deg(from_x: f64, from_y: f64, to_x: f64, to_y: f64) -> f64 {
    let dx = to_x - from_x;
    let dy = to_y - from_y;

    if dx == 0f64 {
        return if dy > 0f64 {
            90f64
        }
        else if dy < 0f64 {
            270f64
        }
        else {
            0f64
        }
    }

    let base_deg = (dy / dx).atan().to_degrees();

    let bearing = if dx < 0f64 {
        base_deg + 180f64
    }
    else if dy < 0f64 {
        base_deg + 360f64
    }
    else {
        base_deg
    };

    wrap_360(bearing)
}

/// Signed heading error to go from the current to the target heading, in
/// (-180, 180].
pub fn heading_error_deg(current_deg: f64, target_deg: f64) -> f64 {
    get_ang_dist_deg(current_deg, target_deg)
}

/// The direction of the shortest rotation from the current to the target
/// heading.
///
/// When the target is exactly opposite the rotation is counter-clockwise.
pub fn shortest_rotation(current_deg: f64, target_deg: f64) -> Rotation {
    Rotation::from_error(heading_error_deg(current_deg, target_deg))
}
