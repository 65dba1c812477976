//! # Simulation module
//!
//! A deterministic kinematic model of the robot which provides simulated
//! implementations of all the [`crate::hal`] equipment. The simulation is
//! driven entirely by the clock: time only passes when the control modules
//! sleep, so a simulated run is exactly repeatable.
//!
//! [`Sim`] owns the shared world and wires simulated equipment into the
//! control modules.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod eqpt;
mod params;
mod world;

pub use eqpt::*;
pub use params::Params;
pub use world::*;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::{
    corr_ctrl::{self, CorrCtrl},
    drive_ctrl::{self, DriveCtrl},
    loc::{self, Pose, RefReader},
    nav_ctrl::{self, NavCtrl},
};

// ------------------------------------------------------------------------------------------------
// TYPES
// ------------------------------------------------------------------------------------------------

pub type SimDriveCtrl = DriveCtrl<SimMotor, SimEncoder, SimClock>;
pub type SimCorrCtrl = CorrCtrl<SimMotor, SimEncoder, SimClock, SimRef>;
pub type SimNavCtrl = NavCtrl<SimMotor, SimEncoder, SimClock, SimRef>;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A simulated robot.
pub struct Sim {
    world: SharedWorld,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Sim {
    /// Create a new simulation with the robot at the start pose.
    pub fn new(params: Params, start: Pose) -> Self {
        Self {
            world: SimWorld::new(params, start).shared()
        }
    }

    /// Handle to the simulated world, used to inspect the true state of the
    /// robot or to inject faults.
    pub fn world(&self) -> &SharedWorld {
        &self.world
    }

    /// True pose of the robot.
    pub fn pose(&self) -> Pose {
        self.world.borrow().pose()
    }

    /// Build a drive controller on the simulated motors and encoders.
    pub fn drive_ctrl(&self, params: drive_ctrl::Params) -> SimDriveCtrl {
        DriveCtrl::new(
            params,
            SimMotor::new(self.world.clone(), Side::Left),
            SimEncoder::new(self.world.clone(), Side::Left),
            SimMotor::new(self.world.clone(), Side::Right),
            SimEncoder::new(self.world.clone(), Side::Right),
            SimClock::new(self.world.clone())
        )
    }

    /// Build a reader of the simulated position reference.
    pub fn ref_reader(&self, params: loc::Params) -> RefReader<SimRef> {
        RefReader::new(params, SimRef::new(self.world.clone()))
    }

    /// Build a correction controller on the simulated equipment.
    pub fn corr_ctrl(
        &self,
        drive_params: drive_ctrl::Params,
        corr_params: corr_ctrl::Params,
        loc_params: loc::Params
    ) -> SimCorrCtrl {
        CorrCtrl::new(
            corr_params, 
            self.drive_ctrl(drive_params), 
            self.ref_reader(loc_params)
        )
    }

    /// Build a fully wired navigation controller on the simulated equipment.
    pub fn build(
        &self,
        drive_params: drive_ctrl::Params,
        corr_params: corr_ctrl::Params,
        loc_params: loc::Params,
        nav_params: nav_ctrl::Params
    ) -> SimNavCtrl {
        NavCtrl::new(
            nav_params, 
            self.corr_ctrl(drive_params, corr_params, loc_params)
        )
    }
}
