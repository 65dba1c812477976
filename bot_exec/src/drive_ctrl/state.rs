//! DriveCtrl state and closed loop move execution

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace, warn};
use serde::Serialize;

// Internal
use super::{DriveCtrlError, MoveCommand, Params};
use crate::{
    hal::{Clock, Encoder, Motor},
    wheel_ctrl::{StallMonitor, Wheel},
};
use util::logger::CTRL_LOOP_TARGET;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drive control module state.
///
/// Owns both drive wheels and the clock used to pace the control loops.
pub struct DriveCtrl<M, E, C> {
    pub(crate) params: Params,

    pub(crate) left: Wheel<M, E>,
    pub(crate) right: Wheel<M, E>,

    pub(crate) clock: C,
}

/// Report on the execution of a move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MoveReport {
    /// Counts made by the left wheel in its direction of travel.
    pub left_counts: i64,

    /// Counts made by the right wheel in its direction of travel.
    pub right_counts: i64,

    /// Time from the start to the end of the move.
    ///
    /// Units: seconds
    pub elapsed_s: f64,

    /// Number of control samples taken.
    pub samples: usize,

    /// Set by open-loop drives that ended because the robot stopped moving.
    pub stopped_early: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<M, E, C> DriveCtrl<M, E, C>
where
    M: Motor,
    E: Encoder,
    C: Clock
{
    /// Create a new drive controller from the robot's equipment.
    pub fn new(
        params: Params,
        left_motor: M,
        left_encoder: E,
        right_motor: M,
        right_encoder: E,
        clock: C
    ) -> Self {
        let left = Wheel::new(
            "left", left_motor, left_encoder, params.gains, params.dist_per_count_in
        );
        let right = Wheel::new(
            "right", right_motor, right_encoder, params.gains, params.dist_per_count_in
        );

        Self {
            params,
            left,
            right,
            clock
        }
    }

    /// The drive control parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The clock pacing the drive.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the clock, used by other modules to wait between
    /// actions.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Number of combined wheel counts a move needs to be complete.
    pub fn required_counts(&self, cmd: &MoveCommand) -> f64 {
        self.params.counts_for(cmd.total_dist_in())
    }

    /// Drive straight for the given distance (negative reverses) at the given speed.
    pub fn drive_straight(
        &mut self, 
        dist_in: f64, 
        speed_ins: f64
    ) -> Result<MoveReport, DriveCtrlError> {
        let cmd = MoveCommand::straight(dist_in, speed_ins)?;
        let report = self.do_move(&cmd)?;

        info!("Drove {:.2} in", dist_in);

        Ok(report)
    }

    /// Turn on the spot through the given angle with the wheels moving at the given speed.
    ///
    /// Positive angles turn counter-clockwise.
    pub fn turn(
        &mut self, 
        angle_deg: f64, 
        speed_ins: f64
    ) -> Result<MoveReport, DriveCtrlError> {
        let cmd = MoveCommand::turn(angle_deg, speed_ins, self.params.track_width_in)?;
        let report = self.do_move(&cmd)?;

        info!("Turned {:.1} deg", angle_deg);

        Ok(report)
    }

    /// Execute a move command.
    ///
    /// Both wheels are engaged in their own direction and sampled at the
    /// drive's sampling period. On each sample the progress of each wheel is
    /// fed to its speed controller and the resulting power commanded. The
    /// move ends:
    ///
    /// - successfully when the combined progress of both wheels reaches the
    ///   counts required for the total distance,
    /// - with [`DriveCtrlError::StallDetected`] when both wheels are stalled,
    /// - with [`DriveCtrlError::Timeout`] when the move overruns its duration
    ///   by the configured factor and margin.
    ///
    /// Both motors are stopped however the move ends.
    pub fn do_move(&mut self, cmd: &MoveCommand) -> Result<MoveReport, DriveCtrlError> {
        if !cmd.is_valid() {
            return Err(DriveCtrlError::InvalidMove(*cmd))
        }

        let required = self.required_counts(cmd);
        if cmd.is_null() || required <= 0f64 {
            return Ok(MoveReport::default())
        }

        let params = &self.params;
        let clock = &mut self.clock;

        let (left_speed_ins, right_speed_ins) = cmd.target_speeds_ins();
        let timeout_s = cmd.duration_s * params.timeout_factor + params.timeout_margin_s;

        debug!(
            "Move L {:.2} in, R {:.2} in over {:.2} s ({:.0} counts)",
            cmd.left_dist_in, cmd.right_dist_in, cmd.duration_s, required
        );

        // Engaging resets the controllers and encoders
        let mut left = self.left.engage(cmd.left_dist_in);
        let mut right = self.right.engage(cmd.right_dist_in);

        let mut left_stall = StallMonitor::new(
            params.stall_window_samples, params.stall_min_counts
        );
        let mut right_stall = left_stall.clone();
        let mut left_powered = false;
        let mut right_powered = false;

        let start_s = clock.now();
        let mut prev_s = start_s;
        let mut rate = 0f64;
        let mut report = MoveReport::default();

        loop {
            // Trim the final sample if the last rate says we'll be done early
            let mut period_s = params.sample_period_s;
            if rate > 0f64 {
                let remaining_s = (required - report.total_counts() as f64) / rate;
                if remaining_s < period_s {
                    period_s = remaining_s.max(params.min_sample_period_s);
                }
            }

            clock.sleep(period_s);

            let now_s = clock.now();
            let dt = now_s - prev_s;
            prev_s = now_s;

            let left_delta = left.sample();
            let right_delta = right.sample();

            report.left_counts = left.progress();
            report.right_counts = right.progress();
            report.elapsed_s = now_s - start_s;
            report.samples += 1;

            rate = if dt > 0f64 { (left_delta + right_delta) as f64 / dt } else { 0f64 };

            trace!(
                target: CTRL_LOOP_TARGET,
                "Move sample {}: {} / {:.0} counts", 
                report.samples, report.total_counts(), required
            );

            if report.total_counts() as f64 >= required {
                debug!(
                    "Move complete in {:.2} s: L {} R {} counts", 
                    report.elapsed_s, report.left_counts, report.right_counts
                );
                return Ok(report)
            }

            // Only samples in which the wheel had power count towards a stall
            if left_powered {
                left_stall.push(left_delta);
            }
            if right_powered {
                right_stall.push(right_delta);
            }

            if (left.is_idle() || left_stall.is_stalled()) 
                && (right.is_idle() || right_stall.is_stalled()) 
            {
                warn!(
                    "Both wheels stalled after {:.2} s ({} / {:.0} counts)",
                    report.elapsed_s, report.total_counts(), required
                );
                return Err(DriveCtrlError::StallDetected(report))
            }

            if report.elapsed_s > timeout_s {
                warn!(
                    "Move timed out after {:.2} s ({} / {:.0} counts)",
                    report.elapsed_s, report.total_counts(), required
                );
                return Err(DriveCtrlError::Timeout(report))
            }

            left_powered = left.adjust(left_delta, dt, left_speed_ins)? != 0f64;
            right_powered = right.adjust(right_delta, dt, right_speed_ins)? != 0f64;
        }
    }
}

impl MoveReport {
    /// Combined counts of both wheels.
    pub fn total_counts(&self) -> i64 {
        self.left_counts + self.right_counts
    }
}
