//! NavCtrl state and waypoint navigation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};
use serde::Serialize;

// Internal
use super::{NavCtrlError, NavTarget, Params};
use crate::{
    corr_ctrl::{bearing_deg, CorrCtrl},
    hal::{Clock, Encoder, Motor, PoseRef},
    loc::Pose,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Navigation control module state.
pub struct NavCtrl<M, E, C, R> {
    params: Params,

    corr: CorrCtrl<M, E, C, R>,
}

/// Report on reaching a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NavReport {
    /// Number of advance steps made before the final approach.
    pub steps: usize,

    /// Distance left between the robot and the target.
    ///
    /// Units: inches
    pub remaining_in: f64,

    /// Pose of the robot once the target was reached.
    pub final_pose: Pose,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<M, E, C, R> NavCtrl<M, E, C, R>
where
    M: Motor,
    E: Encoder,
    C: Clock,
    R: PoseRef
{
    pub fn new(params: Params, corr: CorrCtrl<M, E, C, R>) -> Self {
        Self {
            params,
            corr
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn corr(&self) -> &CorrCtrl<M, E, C, R> {
        &self.corr
    }

    pub fn corr_mut(&mut self) -> &mut CorrCtrl<M, E, C, R> {
        &mut self.corr
    }

    /// Drive the robot to the target.
    ///
    /// The robot first turns to face the target. While it is further than
    /// the threshold distance away it advances one step at a time, turning
    /// back onto the bearing to the target before each step. Inside the
    /// threshold it makes a final approach covering the exact remaining
    /// distance, retried while it is still outside the tolerance.
    pub fn goto(&mut self, target: &NavTarget) -> Result<NavReport, NavCtrlError> {
        if !target.is_valid() {
            return Err(NavCtrlError::InvalidTarget(*target))
        }

        let factor = if target.careful { self.params.careful_factor } else { 1f64 };
        let threshold_in = self.params.threshold_in * factor;
        let step_in = self.params.step_in * factor;

        let mut pose = self.corr.poll_pose()?;
        let mut remaining_in = pose.dist_to(target.x, target.y);

        info!(
            "Navigating from ({:.2}, {:.2}) to ({:.2}, {:.2}), {:.2} in", 
            pose.x, pose.y, target.x, target.y, remaining_in
        );

        if remaining_in <= self.params.tolerance_in {
            return Ok(NavReport { steps: 0, final_pose: pose, remaining_in })
        }

        self.face_target(&pose, target)?;
        pose = self.corr.poll_pose()?;
        remaining_in = pose.dist_to(target.x, target.y);

        let mut steps = 0;

        while remaining_in > threshold_in {
            if steps >= self.params.max_steps {
                warn!("Step limit reached with {:.2} in to go", remaining_in);
                return Err(NavCtrlError::StepLimitExceeded { steps, remaining_in })
            }

            self.face_target(&pose, target)?;
            self.corr.drive_mut().drive_straight(step_in, target.speed_ins)?;
            steps += 1;

            pose = self.corr.poll_pose()?;
            remaining_in = pose.dist_to(target.x, target.y);

            debug!(
                "Step {}: at ({:.2}, {:.2}), {:.2} in to go", 
                steps, pose.x, pose.y, remaining_in
            );
        }

        for attempt in 1..=self.params.final_attempts {
            self.face_target(&pose, target)?;
            self.corr.drive_mut().drive_straight(remaining_in, target.speed_ins)?;

            pose = self.corr.poll_pose()?;
            remaining_in = pose.dist_to(target.x, target.y);

            if remaining_in <= self.params.tolerance_in {
                info!(
                    "Reached ({:.2}, {:.2}) after {} steps, {:.2} in off", 
                    target.x, target.y, steps, remaining_in
                );
                return Ok(NavReport { steps, final_pose: pose, remaining_in })
            }

            debug!("Final approach {} left {:.2} in to go", attempt, remaining_in);
        }

        warn!("Target ({:.2}, {:.2}) not reached, {:.2} in off", target.x, target.y, remaining_in);

        Err(NavCtrlError::TargetNotReached { remaining_in })
    }

    fn face_target(&mut self, pose: &Pose, target: &NavTarget) -> Result<(), NavCtrlError> {
        let bearing = bearing_deg(pose.x, pose.y, target.x, target.y);
        self.corr.turn_and_correct(bearing)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        corr_ctrl::{self, CorrCtrlError},
        drive_ctrl::{self, DriveCtrlError},
        loc::{self, LocError},
        sim::{self, Sim, SimNavCtrl},
    };

    fn sim_nav(start: Pose) -> (Sim, SimNavCtrl) {
        let sim = Sim::new(sim::Params::default(), start);
        let nav = sim.build(
            drive_ctrl::Params::default(),
            corr_ctrl::Params::default(),
            loc::Params::default(),
            Params::default()
        );
        (sim, nav)
    }

    #[test]
    fn test_goto() {
        let (sim, mut nav) = sim_nav(Pose::new(2.0, 2.0, 0.0));

        let report = nav.goto(&NavTarget::new(30.0, 18.0, 6.0)).unwrap();

        assert!(report.remaining_in <= 0.5);
        assert!(report.steps > 0);
        assert!(sim.pose().dist_to(30.0, 18.0) <= 0.5);
        assert_eq!(report.final_pose, sim.pose());
    }

    #[test]
    fn test_goto_inside_threshold() {
        let (sim, mut nav) = sim_nav(Pose::new(30.0, 30.0, 270.0));

        let report = nav.goto(&NavTarget::new(30.0, 18.0, 6.0)).unwrap();
        assert_eq!(report.steps, 0);
        assert!(sim.pose().dist_to(30.0, 18.0) <= 0.5);
    }

    #[test]
    fn test_already_there() {
        let (sim, mut nav) = sim_nav(Pose::new(30.0, 18.2, 45.0));

        let report = nav.goto(&NavTarget::new(30.0, 18.0, 6.0)).unwrap();
        assert_eq!(report.steps, 0);
        assert_eq!(sim.world().borrow().time_s(), 0.0);
        assert_eq!(sim.pose(), Pose::new(30.0, 18.2, 45.0));
    }

    #[test]
    fn test_careful_takes_more_steps() {
        let target = NavTarget::new(30.0, 18.0, 6.0);

        let (_, mut nav) = sim_nav(Pose::new(5.0, 5.0, 90.0));
        let normal = nav.goto(&target).unwrap();

        let (sim, mut nav) = sim_nav(Pose::new(5.0, 5.0, 90.0));
        let careful = nav.goto(&target.careful(true)).unwrap();

        assert!(careful.steps > normal.steps);
        assert!(sim.pose().dist_to(30.0, 18.0) <= 0.5);
    }

    #[test]
    fn test_invalid_target() {
        let (_sim, mut nav) = sim_nav(Pose::new(5.0, 5.0, 90.0));

        assert!(matches!(
            nav.goto(&NavTarget::new(f64::NAN, 18.0, 6.0)),
            Err(NavCtrlError::InvalidTarget(_))
        ));
        assert!(matches!(
            nav.goto(&NavTarget::new(30.0, 18.0, 0.0)),
            Err(NavCtrlError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_step_limit() {
        let (_sim, mut nav) = sim_nav(Pose::new(2.0, 2.0, 0.0));
        nav.params.max_steps = 1;

        match nav.goto(&NavTarget::new(30.0, 30.0, 6.0)) {
            Err(NavCtrlError::StepLimitExceeded { steps, remaining_in }) => {
                assert_eq!(steps, 1);
                assert!(remaining_in > 15.0);
            },
            r => panic!("Expected the step limit, got {:?}", r)
        }
    }

    #[test]
    fn test_target_not_reached() {
        let (_sim, mut nav) = sim_nav(Pose::new(5.0, 5.0, 0.0));
        nav.params.final_attempts = 0;

        match nav.goto(&NavTarget::new(10.0, 5.0, 6.0)) {
            Err(NavCtrlError::TargetNotReached { remaining_in }) => {
                assert!((remaining_in - 5.0).abs() < 0.1);
            },
            r => panic!("Expected target not reached, got {:?}", r)
        }
    }

    #[test]
    fn test_sensor_dropout() {
        let (sim, mut nav) = sim_nav(Pose::new(5.0, 5.0, 90.0));

        // A short dropout is waited out
        sim.world().borrow_mut().set_ref_dropout(30);
        assert!(nav.goto(&NavTarget::new(30.0, 18.0, 6.0)).is_ok());

        // A long one is reported
        sim.world().borrow_mut().set_ref_dropout(usize::MAX);
        assert_eq!(
            nav.goto(&NavTarget::new(5.0, 5.0, 6.0)),
            Err(NavCtrlError::Loc(LocError::SensorUnavailable { attempts: 40 }))
        );
    }

    #[test]
    fn test_blocked() {
        let (sim, mut nav) = sim_nav(Pose::new(5.0, 5.0, 0.0));
        sim.world().borrow_mut().set_blocked(true);

        match nav.goto(&NavTarget::new(5.0, 30.0, 6.0)) {
            Err(NavCtrlError::CorrCtrl(CorrCtrlError::DriveCtrl(
                DriveCtrlError::StallDetected(_)
            ))) => (),
            r => panic!("Expected a stall, got {:?}", r)
        }
    }
}
