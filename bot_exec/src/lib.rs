//! # Robot library.
//!
//! This library allows other crates in the workspace, and the integration tests, to access items
//! defined inside the robot crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Correction control module - re-anchors the robot's heading and position against the position
/// reference
pub mod corr_ctrl;

/// Drive control module - executes closed loop moves and open-loop pulses of the drive base
pub mod drive_ctrl;

/// Hardware abstraction - traits for the motors, encoders, position reference and clock
pub mod hal;

/// Localisation module - reads validated poses from the external position reference
pub mod loc;

/// Navigation control module - drives the robot to points on the course
pub mod nav_ctrl;

/// Simulation - a kinematic model of the robot implementing the hardware traits
pub mod sim;

/// Wheel control module - per-wheel speed control and stall detection
pub mod wheel_ctrl;
