//! Open-loop drive primitives
//!
//! These drive the motors at fixed powers without the speed controllers. The
//! pulses are used by correction control to nudge the robot by small amounts,
//! the fixed power drives are kept for moves where closed loop control isn't
//! wanted, such as pushing into a wall to square up against it.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, trace, warn};

// Internal
use super::{turn_arc_in, DriveCtrl, DriveCtrlError, MoveReport, Rotation, Travel};
use crate::hal::{Clock, Encoder, Motor};
use util::{logger::CTRL_LOOP_TARGET, maths::sign};

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<M, E, C> DriveCtrl<M, E, C>
where
    M: Motor,
    E: Encoder,
    C: Clock
{
    /// Drive the motors at fixed powers for a fixed time, then stop them.
    pub fn pulse(&mut self, left_pct: f64, right_pct: f64, duration_s: f64) {
        if duration_s > 0f64 {
            self.left.set_power(left_pct);
            self.right.set_power(right_pct);
            self.clock.sleep(duration_s);
        }

        self.left.stop();
        self.right.stop();
    }

    /// Pulse the robot round on the spot.
    pub fn pulse_turn(&mut self, rotation: Rotation, power_pct: f64, duration_s: f64) {
        let p = rotation.sign() * power_pct.abs();
        self.pulse(-p, p, duration_s);
    }

    /// Pulse the robot forwards or backwards.
    pub fn pulse_straight(&mut self, travel: Travel, power_pct: f64, duration_s: f64) {
        let p = travel.sign() * power_pct.abs();
        self.pulse(p, p, duration_s);
    }

    /// Drive straight at a fixed power until the distance has been covered.
    ///
    /// The sign of `dist_in` gives the direction, the right motor power is
    /// scaled by the right motor compensation factor.
    pub fn drive_at_percent(
        &mut self, 
        percent: f64, 
        dist_in: f64
    ) -> Result<MoveReport, DriveCtrlError> {
        let report = self.straight_open_loop(percent, dist_in, false)?;

        info!("Drove {:.2} in at {:.0} %", dist_in, percent);

        Ok(report)
    }

    /// Drive straight at a fixed power until either the distance has been
    /// covered or the left wheel stops making progress.
    ///
    /// Stopping early is the expected outcome when driving into an obstacle
    /// and is flagged in the report rather than returned as an error.
    pub fn drive_until_stopped(
        &mut self, 
        percent: f64, 
        dist_in: f64
    ) -> Result<MoveReport, DriveCtrlError> {
        let report = self.straight_open_loop(percent, dist_in, true)?;

        if report.stopped_early {
            info!(
                "Stopped after {:.2} in of {:.2} in", 
                report.left_counts as f64 * self.params.dist_per_count_in 
                    / self.params.count_adjust,
                dist_in
            );
        }
        else {
            info!("Drove {:.2} in at {:.0} %", dist_in, percent);
        }

        Ok(report)
    }

    /// Turn on the spot at a fixed power through the given angle.
    ///
    /// Positive angles turn counter-clockwise, the right motor power is
    /// scaled by the right turn compensation factor.
    pub fn turn_at_percent(
        &mut self, 
        percent: f64, 
        angle_deg: f64
    ) -> Result<MoveReport, DriveCtrlError> {
        if !angle_deg.is_finite() {
            return Err(DriveCtrlError::InvalidDistance(angle_deg))
        }

        let dir = sign(angle_deg);
        let p = percent.abs();
        let required = self.params.counts_for(
            turn_arc_in(angle_deg, self.params.track_width_in)
        );

        let report = self.run_open_loop(
            -dir * p, 
            dir * p * self.params.right_turn_comp, 
            required, 
            false
        )?;

        info!("Turned {:.1} deg at {:.0} %", angle_deg, percent);

        Ok(report)
    }

    fn straight_open_loop(
        &mut self, 
        percent: f64, 
        dist_in: f64, 
        until_stopped: bool
    ) -> Result<MoveReport, DriveCtrlError> {
        if !dist_in.is_finite() {
            return Err(DriveCtrlError::InvalidDistance(dist_in))
        }

        let dir = sign(dist_in);
        let p = percent.abs();
        let required = self.params.counts_for(dist_in);

        self.run_open_loop(
            dir * p, 
            dir * p * self.params.right_power_comp, 
            required, 
            until_stopped
        )
    }

    /// Hold the motors at fixed powers until the average absolute count of
    /// the two wheels reaches `required`.
    fn run_open_loop(
        &mut self,
        left_pct: f64,
        right_pct: f64,
        required: f64,
        until_stopped: bool
    ) -> Result<MoveReport, DriveCtrlError> {
        if !(required > 0f64) {
            return Ok(MoveReport::default())
        }

        if !(left_pct.is_finite() && right_pct.is_finite()) 
            || (left_pct == 0f64 && right_pct == 0f64)
        {
            return Err(DriveCtrlError::InvalidPower(left_pct))
        }

        self.left.reset_counts();
        self.right.reset_counts();
        self.left.set_power(left_pct);
        self.right.set_power(right_pct);

        let start_s = self.clock.now();
        let mut check_s = start_s;
        let mut check_counts = 0i64;
        let mut report = MoveReport::default();

        let result = loop {
            self.clock.sleep(self.params.poll_period_s);

            let now_s = self.clock.now();
            report.left_counts = self.left.counts().abs();
            report.right_counts = self.right.counts().abs();
            report.elapsed_s = now_s - start_s;
            report.samples += 1;

            trace!(
                target: CTRL_LOOP_TARGET,
                "Open-loop: L {} R {} / {:.0} counts", 
                report.left_counts, report.right_counts, required
            );

            if report.total_counts() as f64 / 2f64 >= required {
                break Ok(report)
            }

            if until_stopped && now_s - check_s >= self.params.until_stopped_window_s {
                if report.left_counts - check_counts < self.params.until_stopped_min_counts {
                    report.stopped_early = true;
                    break Ok(report)
                }

                check_s = now_s;
                check_counts = report.left_counts;
            }

            if report.elapsed_s > self.params.open_loop_timeout_s {
                warn!("Open-loop drive timed out after {:.2} s", report.elapsed_s);
                break Err(DriveCtrlError::Timeout(report))
            }
        };

        self.left.stop();
        self.right.stop();

        result
    }
}
