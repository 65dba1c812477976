//! Drive wheel: a motor, its encoder and the speed controller driving them

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;

// Internal
use super::{Gains, SpeedCtrl, WheelCtrlError, MAX_POWER_PCT};
use crate::hal::{Encoder, Motor};
use util::logger::CTRL_LOOP_TARGET;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A drive wheel.
pub struct Wheel<M, E> {
    /// Name used in log messages
    name: &'static str,

    motor: M,
    encoder: E,
    ctrl: SpeedCtrl
}

/// A wheel engaged in a closed loop move.
///
/// Engaging a wheel clears its controller and encoder, so every move starts
/// from fresh controller state. The direction of travel is fixed for the
/// life of the handle and every demand is `direction * power`. The
/// controller output is signed, so a negative output on a reversing wheel
/// drives the motor forwards to brake it.
///
/// The motor is stopped when the handle is dropped, whichever way the move
/// ends.
pub struct Engaged<'w, M, E>
where
    M: Motor,
    E: Encoder
{
    wheel: &'w mut Wheel<M, E>,

    /// Direction of travel, `+1`, `-1` or `0` for a wheel held still.
    direction: f64,

    last_counts: i64,

    /// Total counts made in the direction of travel
    progress: i64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<M, E> Wheel<M, E>
where
    M: Motor,
    E: Encoder
{
    /// Create a new wheel from its equipment.
    pub fn new(
        name: &'static str,
        motor: M, 
        mut encoder: E, 
        gains: Gains, 
        dist_per_count_in: f64
    ) -> Self {
        encoder.reset_counts();

        Self {
            name,
            motor,
            encoder,
            ctrl: SpeedCtrl::new(gains, dist_per_count_in)
        }
    }

    /// Reset the controller and encoder and engage the wheel for a new move in the given
    /// direction.
    ///
    /// Only the sign of `direction` is used.
    pub fn engage(&mut self, direction: f64) -> Engaged<'_, M, E> {
        self.ctrl.reset();
        self.encoder.reset_counts();
        self.motor.stop();

        Engaged {
            wheel: self,
            direction: util::maths::sign(direction),
            last_counts: 0,
            progress: 0
        }
    }

    /// The wheel's speed controller.
    pub fn ctrl(&self) -> &SpeedCtrl {
        &self.ctrl
    }

    /// Current encoder count.
    pub fn counts(&self) -> i64 {
        self.encoder.counts()
    }

    /// Reset the encoder count to zero.
    pub fn reset_counts(&mut self) {
        self.encoder.reset_counts();
    }

    /// Command the motor directly, bypassing the speed controller.
    pub fn set_power(&mut self, percent: f64) {
        self.motor.set_power(percent.clamp(-MAX_POWER_PCT, MAX_POWER_PCT));
    }

    /// Stop the motor.
    pub fn stop(&mut self) {
        self.motor.stop();
    }
}

impl<'w, M, E> Engaged<'w, M, E>
where
    M: Motor,
    E: Encoder
{
    /// Direction of travel of the wheel.
    pub fn direction(&self) -> f64 {
        self.direction
    }

    /// True if the wheel is held still for this move.
    pub fn is_idle(&self) -> bool {
        self.direction == 0f64
    }

    /// Total counts made in the direction of travel since the wheel was engaged.
    pub fn progress(&self) -> i64 {
        self.progress
    }

    /// Read the encoder and return the counts made in the direction of travel since the previous
    /// sample.
    pub fn sample(&mut self) -> i64 {
        let counts = self.wheel.encoder.counts();
        let delta = counts - self.last_counts;
        self.last_counts = counts;

        let delta_progress = if self.direction < 0f64 { -delta } else { delta };
        self.progress += delta_progress;

        delta_progress
    }

    /// Run the speed controller on the last sample and command the motor.
    ///
    /// Returns the power that was commanded, including the direction. Idle wheels are held at
    /// zero power.
    pub fn adjust(
        &mut self, 
        delta_progress: i64, 
        delta_time_s: f64, 
        target_speed_ins: f64
    ) -> Result<f64, WheelCtrlError> {
        if self.is_idle() {
            self.wheel.motor.set_power(0f64);
            return Ok(0f64)
        }

        let power = self.wheel.ctrl.adjust(delta_progress, delta_time_s, target_speed_ins)?;
        let demand = self.direction * power;

        trace!(
            target: CTRL_LOOP_TARGET,
            "{} wheel: {} counts in {:.3} s, demand {:.2} %", 
            self.wheel.name, delta_progress, delta_time_s, demand
        );

        self.wheel.motor.set_power(demand);

        Ok(demand)
    }
}

impl<'w, M, E> Drop for Engaged<'w, M, E>
where
    M: Motor,
    E: Encoder
{
    fn drop(&mut self) {
        self.wheel.motor.stop();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    /// Motor double recording the last commanded power
    struct RecMotor(Rc<Cell<f64>>);

    /// Encoder double reading a shared count
    struct SharedEncoder(Rc<Cell<i64>>);

    impl Motor for RecMotor {
        fn set_power(&mut self, percent: f64) {
            self.0.set(percent);
        }

        fn stop(&mut self) {
            self.0.set(0.0);
        }
    }

    impl Encoder for SharedEncoder {
        fn counts(&self) -> i64 {
            self.0.get()
        }

        fn reset_counts(&mut self) {
            self.0.set(0);
        }
    }

    fn wheel() -> (Wheel<RecMotor, SharedEncoder>, Rc<Cell<f64>>, Rc<Cell<i64>>) {
        let power = Rc::new(Cell::new(0.0));
        let counts = Rc::new(Cell::new(0));
        let w = Wheel::new(
            "test",
            RecMotor(power.clone()), 
            SharedEncoder(counts.clone()), 
            Gains::default(), 
            6.0 / 242.0
        );
        (w, power, counts)
    }

    #[test]
    fn test_engage_resets_state() {
        let (mut w, _, counts) = wheel();

        {
            let mut e = w.engage(1.0);
            counts.set(5);
            let d = e.sample();
            e.adjust(d, 0.15, 6.0).unwrap();
        }
        assert!(w.ctrl().power() != 0.0);

        counts.set(123);
        let e = w.engage(1.0);
        assert_eq!(e.progress(), 0);
        drop(e);

        assert_eq!(w.counts(), 0);
        assert_eq!(w.ctrl().power(), 0.0);
        assert_eq!(w.ctrl().error_sum(), 0.0);
        assert_eq!(w.ctrl().last_error(), 0.0);
    }

    #[test]
    fn test_reverse_direction_keeps_sign() {
        let (mut w, power, counts) = wheel();
        let mut e = w.engage(-3.0);
        assert_eq!(e.direction(), -1.0);

        // Driving backwards decreases the counts, which is progress for this wheel
        counts.set(-20);
        let d = e.sample();
        assert_eq!(d, 20);
        assert_eq!(e.progress(), 20);

        let demand = e.adjust(d, 0.15, -6.0).unwrap();
        assert!(demand < 0.0);
        assert_eq!(power.get(), demand);

        // Dropping the handle stops the motor
        drop(e);
        assert_eq!(power.get(), 0.0);
    }

    #[test]
    fn test_overspeed_reverse_wheel_brakes_forwards() {
        let (mut w, power, counts) = wheel();
        let mut e = w.engage(-1.0);

        // Far faster than 6 in/s backwards, so the controller output goes negative
        counts.set(-200);
        let d = e.sample();
        let demand = e.adjust(d, 0.15, -6.0).unwrap();

        assert!(demand > 0.0);
        assert_eq!(power.get(), demand);

        drop(e);
        assert!(w.ctrl().power() < 0.0);
        assert_eq!(demand, -w.ctrl().power());
    }

    #[test]
    fn test_idle_wheel_held_still() {
        let (mut w, power, _) = wheel();
        power.set(40.0);

        let mut e = w.engage(0.0);
        assert!(e.is_idle());
        assert_eq!(e.adjust(0, 0.15, 0.0).unwrap(), 0.0);
        assert_eq!(power.get(), 0.0);
    }

    #[test]
    fn test_direct_power_saturates() {
        let (mut w, power, _) = wheel();
        w.set_power(150.0);
        assert_eq!(power.get(), 100.0);
        w.set_power(-101.0);
        assert_eq!(power.get(), -100.0);
        w.stop();
        assert_eq!(power.get(), 0.0);
    }
}
