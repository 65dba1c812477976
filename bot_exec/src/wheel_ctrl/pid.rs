//! Incremental PID speed controller

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::{Gains, WheelCtrlError, MAX_POWER_PCT};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Speed controller state for a single wheel.
#[derive(Debug, Clone, Serialize)]
pub struct SpeedCtrl {
    #[serde(skip)]
    gains: Gains,

    /// Distance travelled by the wheel per encoder count.
    ///
    /// Units: inches
    dist_per_count_in: f64,

    /// Accumulated speed error
    error_sum: f64,

    /// Speed error of the previous sample
    last_error: f64,

    /// Current power demand
    ///
    /// Units: percent
    power: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SpeedCtrl {

    /// Create a new controller with cleared state.
    pub fn new(gains: Gains, dist_per_count_in: f64) -> Self {
        Self {
            gains,
            dist_per_count_in,
            error_sum: 0f64,
            last_error: 0f64,
            power: 0f64
        }
    }

    /// Clear the accumulated error, previous error and power.
    pub fn reset(&mut self) {
        self.error_sum = 0f64;
        self.last_error = 0f64;
        self.power = 0f64;
    }

    /// Accumulated speed error.
    pub fn error_sum(&self) -> f64 {
        self.error_sum
    }

    /// Speed error of the most recent sample.
    pub fn last_error(&self) -> f64 {
        self.last_error
    }

    /// Current power demand in percent.
    pub fn power(&self) -> f64 {
        self.power
    }

    /// Adjust the power demand for a new sample and return it.
    ///
    /// ## Arguments
    /// - `delta_counts` - Encoder counts made in the direction of travel since the last sample.
    /// - `delta_time_s` - Time since the last sample, must be positive.
    /// - `target_speed_ins` - Target linear speed. Only the magnitude is used, the direction of
    ///   travel is applied by the caller.
    ///
    /// The returned power is saturated to +/-100 %. An invalid `delta_time_s` is rejected and
    /// leaves the controller untouched.
    pub(crate) fn adjust(
        &mut self, 
        delta_counts: i64, 
        delta_time_s: f64, 
        target_speed_ins: f64
    ) -> Result<f64, WheelCtrlError> {
        if !(delta_time_s.is_finite() && delta_time_s > 0f64) {
            return Err(WheelCtrlError::InvalidDeltaTime(delta_time_s))
        }

        // Measured speed from the encoder
        let measured_ins = self.dist_per_count_in * delta_counts as f64 / delta_time_s;
        let error = target_speed_ins.abs() - measured_ins;

        self.error_sum += error;
        self.power += 
            self.gains.k_p * error
            + self.gains.k_i * self.error_sum
            + self.gains.k_d * (error - self.last_error);
        self.power = self.power.clamp(-MAX_POWER_PCT, MAX_POWER_PCT);

        self.last_error = error;

        Ok(self.power)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const DPC: f64 = 6.0 / 242.0;

    fn ctrl() -> SpeedCtrl {
        SpeedCtrl::new(Gains::default(), DPC)
    }

    #[test]
    fn test_error_accumulates_without_motion() {
        let mut c = ctrl();
        let mut prev_sum = c.error_sum();

        for _ in 0..5 {
            c.adjust(0, 0.15, -4.0).unwrap();

            // No motion means the whole target speed is error, regardless of direction
            assert_eq!(c.last_error(), 4.0);
            assert!(c.error_sum() > prev_sum);
            prev_sum = c.error_sum();
        }

        assert!((c.error_sum() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_incremental_update() {
        let mut c = ctrl();

        // First sample: error 10, sum 10, delta error 10
        let p0 = c.adjust(0, 0.15, 10.0).unwrap();
        assert!((p0 - (0.9 * 10.0 + 0.09 * 10.0 + 0.3 * 10.0)).abs() < 1e-9);

        // Second sample travels exactly at the target speed so the error is zero, but the
        // integral and derivative terms still act on the accumulated output.
        let counts = (10.0 * 0.15 / DPC).round() as i64;
        let measured = DPC * counts as f64 / 0.15;
        let err = 10.0 - measured;
        let p1 = c.adjust(counts, 0.15, 10.0).unwrap();
        let expected = p0 + 0.9 * err + 0.09 * (10.0 + err) + 0.3 * (err - 10.0);
        assert!((p1 - expected).abs() < 1e-9);
    }

    #[test]
    fn test_power_saturates() {
        let mut c = ctrl();
        for _ in 0..100 {
            c.adjust(0, 0.15, 30.0).unwrap();
        }
        assert_eq!(c.power(), 100.0);

        // Running far too fast drives the power down to the negative limit
        for _ in 0..100 {
            c.adjust(10_000, 0.15, 1.0).unwrap();
        }
        assert_eq!(c.power(), -100.0);
    }

    #[test]
    fn test_reset() {
        let mut c = ctrl();
        c.adjust(3, 0.15, 6.0).unwrap();
        c.adjust(5, 0.15, 6.0).unwrap();
        assert!(c.power() != 0.0);

        c.reset();
        assert_eq!(c.power(), 0.0);
        assert_eq!(c.error_sum(), 0.0);
        assert_eq!(c.last_error(), 0.0);
    }

    #[test]
    fn test_invalid_delta_time() {
        let mut c = ctrl();
        c.adjust(0, 0.15, 6.0).unwrap();
        let before = c.clone();

        for dt in [0.0, -0.1, std::f64::NAN, std::f64::INFINITY].iter() {
            match c.adjust(10, *dt, 6.0) {
                Err(WheelCtrlError::InvalidDeltaTime(_)) => (),
                r => panic!("Expected delta time rejection for {}, got {:?}", dt, r)
            }
        }

        assert_eq!(c.power(), before.power());
        assert_eq!(c.error_sum(), before.error_sum());
        assert_eq!(c.last_error(), before.last_error());
    }
}
