//! Navigation targets and routes

use serde::{Deserialize, Serialize};

use crate::loc::Pose;

/// A point to navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavTarget {
    /// Units: course units (inches)
    pub x: f64,

    /// Units: course units (inches)
    pub y: f64,

    /// Wheel speed for the advance steps and final approach.
    ///
    /// Units: inches/second
    pub speed_ins: f64,

    /// Approach in shorter steps, re-checking the pose more often.
    #[serde(default)]
    pub careful: bool,
}

/// A list of targets to visit in order.
///
/// Routes are stored as TOML, with the start pose in a `[start]` table and
/// each target in a `[[waypoint]]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Route {
    /// Pose the robot starts the route from.
    pub start: Pose,

    #[serde(rename = "waypoint", default)]
    pub waypoints: Vec<NavTarget>,
}

impl NavTarget {
    pub fn new(x: f64, y: f64, speed_ins: f64) -> Self {
        Self {
            x,
            y,
            speed_ins,
            careful: false
        }
    }

    /// Set whether the target should be approached carefully.
    pub fn careful(mut self, careful: bool) -> Self {
        self.careful = careful;
        self
    }

    /// The target's coordinates must be finite and its speed positive.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() 
            && self.y.is_finite() 
            && self.speed_ins.is_finite() 
            && self.speed_ins > 0f64
    }
}
