//! # Localisation module
//!
//! The robot's absolute pose comes from an external reference which is only
//! intermittently valid: each of its readings is either a non-negative value
//! or a negative sentinel meaning there is no fix. This module turns those
//! readings into validated [`Pose`] snapshots, polling the reference a
//! bounded number of times rather than waiting on it forever.
//!
//! A pose is a snapshot. It shall not be cached between actions, as the
//! robot moves and the next reading may be invalid.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
pub use params::Params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{debug, trace, warn};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::hal::{Clock, PoseRef};
use util::maths::wrap_360;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The pose of the robot on the course.
///
/// Deserialising goes through [`Pose::new`], so headings read from files are
/// wrapped too.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "PoseDef")]
pub struct Pose {
    /// X coordinate.
    ///
    /// Units: course units (inches)
    pub x: f64,

    /// Y coordinate.
    ///
    /// Units: course units (inches)
    pub y: f64,

    /// Heading, counter-clockwise from the course X axis, in the range
    /// [0, 360).
    ///
    /// Units: degrees
    pub heading_deg: f64,
}

/// Pose as written in files, before the heading is wrapped.
#[derive(Deserialize)]
struct PoseDef {
    x: f64,
    y: f64,
    heading_deg: f64,
}

/// Reads validated poses from an external reference.
pub struct RefReader<R> {
    params: Params,
    source: R,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Possible errors that can occur when reading the reference.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum LocError {
    #[error("No valid fix from the position reference after {attempts} polls")]
    SensorUnavailable { attempts: usize },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    /// Create a new pose, wrapping the heading into [0, 360).
    pub fn new(x: f64, y: f64, heading_deg: f64) -> Self {
        Self {
            x,
            y,
            heading_deg: wrap_360(heading_deg)
        }
    }

    /// Position as a vector.
    pub fn position(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Unit vector pointing in the direction the robot faces.
    pub fn forward(&self) -> Vector2<f64> {
        let h = self.heading_deg.to_radians();
        Vector2::new(h.cos(), h.sin())
    }

    /// Straight line distance to a point.
    pub fn dist_to(&self, x: f64, y: f64) -> f64 {
        (Vector2::new(x, y) - self.position()).norm()
    }
}

impl From<PoseDef> for Pose {
    fn from(def: PoseDef) -> Self {
        Pose::new(def.x, def.y, def.heading_deg)
    }
}

impl<R> RefReader<R>
where
    R: PoseRef
{
    pub fn new(params: Params, source: R) -> Self {
        Self {
            params,
            source
        }
    }

    /// The underlying reference.
    pub fn source(&self) -> &R {
        &self.source
    }

    /// Take a single reading of the reference.
    ///
    /// Returns `None` if any of the three values in this cycle is a sentinel
    /// (negative) or not finite.
    pub fn read_once(&self) -> Option<Pose> {
        let x = self.source.x();
        let y = self.source.y();
        let heading_deg = self.source.heading();

        if [x, y, heading_deg].iter().all(|v| v.is_finite() && *v >= 0f64) {
            Some(Pose::new(x, y, heading_deg))
        }
        else {
            trace!("Discarding reference reading ({}, {}, {})", x, y, heading_deg);
            None
        }
    }

    /// Poll the reference until it gives a valid reading.
    ///
    /// Polls are separated by the poll interval. If no valid reading is
    /// obtained within the maximum number of polls
    /// [`LocError::SensorUnavailable`] is returned.
    pub fn poll_pose<C>(&mut self, clock: &mut C) -> Result<Pose, LocError> 
    where
        C: Clock
    {
        for attempt in 1..=self.params.max_polls {
            if let Some(pose) = self.read_once() {
                if attempt > 1 {
                    debug!("Reference valid after {} polls", attempt);
                }
                return Ok(pose)
            }

            if attempt < self.params.max_polls {
                clock.sleep(self.params.poll_interval_s);
            }
        }

        warn!("No valid reference fix after {} polls", self.params.max_polls);

        Err(LocError::SensorUnavailable { attempts: self.params.max_polls })
    }
}
