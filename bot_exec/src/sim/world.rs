//! Simulated world model

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::{cell::RefCell, rc::Rc};

use super::Params;
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A world shared between all the simulated equipment.
pub type SharedWorld = Rc<RefCell<SimWorld>>;

/// Which side of the robot a piece of equipment is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Kinematic model of the robot on the course.
///
/// Time only advances when the simulated clock sleeps, and the robot's pose
/// and encoders are integrated over that time with the motor powers that
/// were set before the sleep.
#[derive(Debug, Clone)]
pub struct SimWorld {
    params: Params,

    pose: Pose,
    time_s: f64,

    left_power: f64,
    right_power: f64,

    /// Fractional encoder counts
    left_counts: f64,
    right_counts: f64,

    /// If true the wheels are held in place whatever the motor power
    blocked: bool,

    /// Number of reference field reads that will return the no-fix sentinel
    ref_dropout_reads: usize,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimWorld {
    pub fn new(params: Params, start: Pose) -> Self {
        Self {
            params,
            pose: start,
            time_s: 0f64,
            left_power: 0f64,
            right_power: 0f64,
            left_counts: 0f64,
            right_counts: 0f64,
            blocked: false,
            ref_dropout_reads: 0,
        }
    }

    /// Wrap the world for sharing between equipment.
    pub fn shared(self) -> SharedWorld {
        Rc::new(RefCell::new(self))
    }

    /// True pose of the robot.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Simulation time.
    ///
    /// Units: seconds
    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    /// Commanded power of a motor.
    pub fn power(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left_power,
            Side::Right => self.right_power
        }
    }

    /// Hold the wheels in place, as if the robot were pushed against a wall.
    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    /// Make the next `reads` reads of the reference return the sentinel.
    pub fn set_ref_dropout(&mut self, reads: usize) {
        self.ref_dropout_reads = reads;
    }

    pub(crate) fn set_power(&mut self, side: Side, percent: f64) {
        let p = percent.clamp(-100f64, 100f64);
        match side {
            Side::Left => self.left_power = p,
            Side::Right => self.right_power = p
        }
    }

    pub(crate) fn counts(&self, side: Side) -> i64 {
        match side {
            Side::Left => self.left_counts as i64,
            Side::Right => self.right_counts as i64
        }
    }

    pub(crate) fn reset_counts(&mut self, side: Side) {
        match side {
            Side::Left => self.left_counts = 0f64,
            Side::Right => self.right_counts = 0f64
        }
    }

    /// Read a reference field, returning the sentinel during a dropout or
    /// when the robot is off the course.
    pub(crate) fn read_ref(&mut self, value: f64) -> f64 {
        if self.ref_dropout_reads > 0 {
            self.ref_dropout_reads -= 1;
            return -1f64
        }

        if self.pose.x < 0f64 || self.pose.y < 0f64 {
            return -1f64
        }

        value
    }

    /// Advance the world by `dt` seconds.
    pub(crate) fn step(&mut self, dt: f64) {
        if !(dt > 0f64) {
            return
        }

        self.time_s += dt;

        if self.blocked {
            return
        }

        let p = &self.params;

        let left_in = self.left_power / 100f64 * p.max_wheel_speed_ins * dt;
        let right_in = 
            self.right_power / 100f64 * p.max_wheel_speed_ins * p.right_motor_gain * dt;

        self.left_counts += left_in * p.count_scale / p.dist_per_count_in;
        self.right_counts += right_in * p.count_scale / p.dist_per_count_in;

        // Differential kinematics, moving along the mean heading of the step
        let fwd_in = (left_in + right_in) / 2f64;
        let dtheta_rad = (right_in - left_in) / p.track_width_in;
        let mid_rad = self.pose.heading_deg.to_radians() + dtheta_rad / 2f64;

        self.pose = Pose::new(
            self.pose.x + fwd_in * mid_rad.cos(),
            self.pose.y + fwd_in * mid_rad.sin(),
            self.pose.heading_deg + dtheta_rad.to_degrees()
        );
    }
}
