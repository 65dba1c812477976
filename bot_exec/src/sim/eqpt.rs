//! Simulated equipment
//!
//! Each piece of equipment holds a handle to the shared [`SimWorld`] and
//! implements the matching [`crate::hal`] trait on top of it.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use super::{SharedWorld, Side};
use crate::hal::{Clock, Encoder, Motor, PoseRef};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A simulated drive motor.
pub struct SimMotor {
    world: SharedWorld,
    side: Side,
}

/// A simulated wheel encoder.
pub struct SimEncoder {
    world: SharedWorld,
    side: Side,
}

/// The simulated external position reference.
pub struct SimRef {
    world: SharedWorld,
}

/// The simulated clock. Sleeping advances the world.
pub struct SimClock {
    world: SharedWorld,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl SimMotor {
    pub fn new(world: SharedWorld, side: Side) -> Self {
        Self { world, side }
    }
}

impl Motor for SimMotor {
    fn set_power(&mut self, percent: f64) {
        self.world.borrow_mut().set_power(self.side, percent);
    }

    fn stop(&mut self) {
        self.world.borrow_mut().set_power(self.side, 0f64);
    }
}

impl SimEncoder {
    pub fn new(world: SharedWorld, side: Side) -> Self {
        Self { world, side }
    }
}

impl Encoder for SimEncoder {
    fn counts(&self) -> i64 {
        self.world.borrow().counts(self.side)
    }

    fn reset_counts(&mut self) {
        self.world.borrow_mut().reset_counts(self.side);
    }
}

impl SimRef {
    pub fn new(world: SharedWorld) -> Self {
        Self { world }
    }
}

impl PoseRef for SimRef {
    fn x(&self) -> f64 {
        let mut world = self.world.borrow_mut();
        let x = world.pose().x;
        world.read_ref(x)
    }

    fn y(&self) -> f64 {
        let mut world = self.world.borrow_mut();
        let y = world.pose().y;
        world.read_ref(y)
    }

    fn heading(&self) -> f64 {
        let mut world = self.world.borrow_mut();
        let h = world.pose().heading_deg;
        world.read_ref(h)
    }
}

impl SimClock {
    pub fn new(world: SharedWorld) -> Self {
        Self { world }
    }
}

impl Clock for SimClock {
    fn now(&self) -> f64 {
        self.world.borrow().time_s()
    }

    fn sleep(&mut self, seconds: f64) {
        self.world.borrow_mut().step(seconds);
    }
}
