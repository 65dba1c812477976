//! CorrCtrl state and correction loops

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};
use serde::Serialize;

// Internal
use super::{bearing_deg, heading_error_deg, CorrCtrlError, Params};
use crate::{
    drive_ctrl::{DriveCtrl, Rotation, Travel},
    hal::{Clock, Encoder, Motor, PoseRef},
    loc::{LocError, Pose, RefReader},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Correction control module state.
///
/// Owns the drive and the reader of the position reference.
pub struct CorrCtrl<M, E, C, R> {
    params: Params,

    drive: DriveCtrl<M, E, C>,
    loc: RefReader<R>,
}

/// Report on a completed correction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CorrReport {
    /// Number of correction pulses made.
    pub iterations: usize,

    /// Remaining error once within tolerance, in degrees for headings or
    /// course units for axes.
    pub error: f64,
}

/// An axis of the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<M, E, C, R> CorrCtrl<M, E, C, R>
where
    M: Motor,
    E: Encoder,
    C: Clock,
    R: PoseRef
{
    pub fn new(params: Params, drive: DriveCtrl<M, E, C>, loc: RefReader<R>) -> Self {
        Self {
            params,
            drive,
            loc
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn drive(&self) -> &DriveCtrl<M, E, C> {
        &self.drive
    }

    pub fn drive_mut(&mut self) -> &mut DriveCtrl<M, E, C> {
        &mut self.drive
    }

    pub fn loc(&self) -> &RefReader<R> {
        &self.loc
    }

    /// Poll the reference for the current pose, waiting on the drive's clock
    /// between polls.
    pub fn poll_pose(&mut self) -> Result<Pose, LocError> {
        self.loc.poll_pose(self.drive.clock_mut())
    }

    /// Bearing from the robot's current position to a point.
    pub fn heading_to_point(&mut self, x: f64, y: f64) -> Result<f64, CorrCtrlError> {
        let pose = self.poll_pose()?;
        Ok(bearing_deg(pose.x, pose.y, x, y))
    }

    /// Pulse the robot round until its heading is within tolerance of the
    /// target.
    ///
    /// Each iteration reads the reference, and if the heading is out of
    /// tolerance pulses the robot in the direction of the shortest rotation
    /// to the target and waits for it to settle.
    pub fn correct_heading(&mut self, target_deg: f64) -> Result<CorrReport, CorrCtrlError> {
        let mut iterations = 0;

        loop {
            let pose = self.poll_pose()?;
            let error = heading_error_deg(pose.heading_deg, target_deg);

            if error.abs() <= self.params.heading_tol_deg {
                info!(
                    "Heading corrected to {:.1} deg ({} pulses)", 
                    pose.heading_deg, iterations
                );
                return Ok(CorrReport { iterations, error })
            }

            if iterations >= self.params.max_iterations {
                warn!(
                    "Heading correction to {:.1} deg failed, error {:.2} deg", 
                    target_deg, error
                );
                return Err(CorrCtrlError::CorrectionTimeout { iterations, error })
            }

            let rotation = Rotation::from_error(error);
            debug!(
                "Heading {:.2} deg, target {:.2} deg, pulsing {:?}", 
                pose.heading_deg, target_deg, rotation
            );

            self.drive.pulse_turn(rotation, self.params.pulse_power_pct, self.params.pulse_s);
            self.drive.clock_mut().sleep(self.params.settle_s);

            iterations += 1;
        }
    }

    /// Turn to face the target heading.
    ///
    /// Large errors are first taken out with closed loop turns, then the
    /// heading is finished off with [`CorrCtrl::correct_heading`].
    pub fn turn_and_correct(&mut self, target_deg: f64) -> Result<CorrReport, CorrCtrlError> {
        let mut coarse_turns = 0;

        while coarse_turns < self.params.max_coarse_turns {
            let pose = self.poll_pose()?;
            let error = heading_error_deg(pose.heading_deg, target_deg);

            if error.abs() <= self.params.coarse_min_deg {
                break
            }

            debug!(
                "Coarse turn {} of {:.1} deg from {:.1} deg", 
                coarse_turns + 1, error, pose.heading_deg
            );

            self.drive.turn(error, self.params.turn_speed_ins)?;
            self.drive.clock_mut().sleep(self.params.settle_s);

            coarse_turns += 1;
        }

        self.correct_heading(target_deg)
    }

    /// Pulse forwards or backwards until the robot's X coordinate is within
    /// tolerance of the target.
    pub fn check_x(&mut self, target_x: f64) -> Result<CorrReport, CorrCtrlError> {
        self.check_axis(Axis::X, target_x)
    }

    /// Pulse forwards or backwards until the robot's Y coordinate is within
    /// tolerance of the target.
    pub fn check_y(&mut self, target_y: f64) -> Result<CorrReport, CorrCtrlError> {
        self.check_axis(Axis::Y, target_y)
    }

    fn check_axis(&mut self, axis: Axis, target: f64) -> Result<CorrReport, CorrCtrlError> {
        let mut iterations = 0;

        loop {
            let pose = self.poll_pose()?;
            let forward = pose.forward();
            let (position, projection) = match axis {
                Axis::X => (pose.x, forward.x),
                Axis::Y => (pose.y, forward.y)
            };
            let error = target - position;

            if error.abs() <= self.params.axis_tol {
                info!("{:?} corrected to {:.2} ({} pulses)", axis, position, iterations);
                return Ok(CorrReport { iterations, error })
            }

            if projection.abs() < self.params.min_axis_alignment {
                return Err(CorrCtrlError::AxisNotAligned { heading_deg: pose.heading_deg })
            }

            if iterations >= self.params.max_iterations {
                warn!("{:?} correction to {:.2} failed, error {:.3}", axis, target, error);
                return Err(CorrCtrlError::CorrectionTimeout { iterations, error })
            }

            // Driving forwards moves along the axis in the direction of the projection
            let travel = Travel::from_error(error * projection);
            debug!("{:?} {:.3}, target {:.3}, pulsing {:?}", axis, position, target, travel);

            self.drive.pulse_straight(
                travel, 
                self.params.axis_pulse_power_pct, 
                self.params.axis_pulse_s
            );
            self.drive.clock_mut().sleep(self.params.settle_s);

            iterations += 1;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        drive_ctrl::{self, DriveCtrlError},
        loc,
        sim::{self, Sim, SimCorrCtrl},
    };

    fn sim_corr(start: Pose) -> (Sim, SimCorrCtrl) {
        let sim = Sim::new(sim::Params::default(), start);
        let corr = sim.corr_ctrl(
            drive_ctrl::Params::default(), 
            Params::default(), 
            loc::Params::default()
        );
        (sim, corr)
    }

    #[test]
    fn test_correct_heading() {
        let (sim, mut corr) = sim_corr(Pose::new(10.0, 10.0, 80.0));

        let report = corr.correct_heading(90.0).unwrap();
        assert!(report.iterations > 0);
        assert!(report.error.abs() <= 1.5);
        assert!(heading_error_deg(sim.pose().heading_deg, 90.0).abs() <= 1.5);

        // Already corrected, nothing to do
        let report = corr.correct_heading(90.0).unwrap();
        assert_eq!(report.iterations, 0);
    }

    #[test]
    fn test_correct_heading_through_zero() {
        let (sim, mut corr) = sim_corr(Pose::new(10.0, 10.0, 355.0));

        corr.correct_heading(3.0).unwrap();
        assert!(heading_error_deg(sim.pose().heading_deg, 3.0).abs() <= 1.5);
    }

    #[test]
    fn test_turn_and_correct() {
        let (sim, mut corr) = sim_corr(Pose::new(18.0, 18.0, 0.0));

        for target in [90.0, 300.0, 135.0, 180.0].iter() {
            corr.turn_and_correct(*target).unwrap();
            assert!(heading_error_deg(sim.pose().heading_deg, *target).abs() <= 1.5);
        }

        // Turning on the spot doesn't move the robot
        assert!(sim.pose().dist_to(18.0, 18.0) < 0.5);
    }

    #[test]
    fn test_heading_timeout() {
        let (sim, mut corr) = sim_corr(Pose::new(10.0, 10.0, 0.0));
        corr.params.max_iterations = 5;
        sim.world().borrow_mut().set_blocked(true);

        match corr.correct_heading(3.0) {
            Err(CorrCtrlError::CorrectionTimeout { iterations, error }) => {
                assert_eq!(iterations, 5);
                assert!((error - 3.0).abs() < 1e-9);
            },
            r => panic!("Expected a correction timeout, got {:?}", r)
        }
    }

    #[test]
    fn test_turn_stall() {
        let (sim, mut corr) = sim_corr(Pose::new(10.0, 10.0, 0.0));
        sim.world().borrow_mut().set_blocked(true);

        match corr.turn_and_correct(90.0) {
            Err(CorrCtrlError::DriveCtrl(DriveCtrlError::StallDetected(_))) => (),
            r => panic!("Expected a stall, got {:?}", r)
        }
    }

    #[test]
    fn test_check_axes() {
        let (sim, mut corr) = sim_corr(Pose::new(10.0, 10.0, 30.0));

        // Heading 30 deg moves both X and Y forwards
        let report = corr.check_x(11.0).unwrap();
        assert!(report.iterations > 0);
        assert!((sim.pose().x - 11.0).abs() <= 0.25);

        corr.check_y(9.5).unwrap();
        assert!((sim.pose().y - 9.5).abs() <= 0.25);

        // Facing backwards along X
        let (sim, mut corr) = sim_corr(Pose::new(10.0, 10.0, 180.0));
        corr.check_x(11.0).unwrap();
        assert!((sim.pose().x - 11.0).abs() <= 0.25);
    }

    #[test]
    fn test_axis_not_aligned() {
        let (_sim, mut corr) = sim_corr(Pose::new(10.0, 10.0, 90.0));

        match corr.check_x(12.0) {
            Err(CorrCtrlError::AxisNotAligned { heading_deg }) => {
                assert!((heading_deg - 90.0).abs() < 1e-9)
            },
            r => panic!("Expected axis not aligned, got {:?}", r)
        }

        // Within tolerance there's nothing to correct, so alignment doesn't matter
        assert!(corr.check_x(10.1).is_ok());
    }

    #[test]
    fn test_heading_to_point() {
        let (_sim, mut corr) = sim_corr(Pose::new(10.0, 10.0, 0.0));
        assert!((corr.heading_to_point(20.0, 20.0).unwrap() - 45.0).abs() < 1e-9);
        assert!((corr.heading_to_point(10.0, 0.0).unwrap() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_sensor_unavailable() {
        let (sim, mut corr) = sim_corr(Pose::new(10.0, 10.0, 0.0));
        sim.world().borrow_mut().set_ref_dropout(usize::MAX);

        assert_eq!(
            corr.correct_heading(90.0),
            Err(CorrCtrlError::Loc(LocError::SensorUnavailable { attempts: 40 }))
        );
    }
}
