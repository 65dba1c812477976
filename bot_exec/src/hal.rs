//! # Hardware abstraction layer
//!
//! Traits describing the equipment the control modules drive. Every module
//! takes owned instances of these through its constructor, a real robot
//! provides board-specific implementations and the [`crate::sim`] module
//! provides simulated ones.

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A drive motor.
pub trait Motor {
    /// Command the motor at the given power.
    ///
    /// ## Arguments
    /// - `percent` - Power as a percentage of full scale, between -100 and +100. Values outside
    ///   this range shall be saturated by the implementation.
    fn set_power(&mut self, percent: f64);

    /// Stop the motor.
    fn stop(&mut self);
}

/// A wheel encoder.
pub trait Encoder {
    /// Number of counts accumulated since the last reset.
    ///
    /// Counts are signed: driving the wheel backwards decreases the count.
    fn counts(&self) -> i64;

    /// Reset the count to zero.
    fn reset_counts(&mut self);
}

/// An external absolute position reference.
///
/// Each reading is either a valid, non-negative value or a negative sentinel indicating that no
/// fix is available. Readings shall not be trusted until they have been validated, see
/// [`crate::loc::RefReader`].
pub trait PoseRef {
    /// X coordinate of the robot in course units.
    fn x(&self) -> f64;

    /// Y coordinate of the robot in course units.
    fn y(&self) -> f64;

    /// Heading of the robot in degrees, counter-clockwise from the course X axis.
    fn heading(&self) -> f64;
}

/// A monotonic clock with a blocking delay.
pub trait Clock {
    /// Current time in seconds.
    fn now(&self) -> f64;

    /// Block for the given number of seconds.
    fn sleep(&mut self, seconds: f64);
}
