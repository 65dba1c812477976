//! Main robot executable entry point.
//!
//! Drives the simulated robot through a route of waypoints, using the same navigation, correction
//! and drive control modules as run on the robot itself.
//!
//! # Usage
//!
//! ```text
//! bot_exec <ROUTE> [--careful] [--trace-ctrl]
//! ```
//!
//! Parameters are loaded from `$BOT_SW_ROOT/params`, and the session (including the log file) is
//! created under `$BOT_SW_ROOT/sessions`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;
use structopt::StructOpt;

// Internal
use bot_lib::{
    corr_ctrl, drive_ctrl, loc, 
    nav_ctrl::{self, NavReport, Route}, 
    sim::{self, Sim}
};
use util::{
    logger::{logger_init, LevelFilter},
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drive the simulated robot through a route.
#[derive(Debug, StructOpt)]
#[structopt(name = "bot_exec")]
struct Opt {
    /// Path to the route file.
    #[structopt(parse(from_os_str))]
    route: PathBuf,

    /// Approach every waypoint carefully, whatever the route says.
    #[structopt(long)]
    careful: bool,

    /// Log every sample of the control loops.
    #[structopt(long)]
    trace_ctrl: bool,
}

/// Summary of a route, saved into the session directory.
#[derive(Debug, Serialize)]
struct RouteSummary {
    /// Units: seconds
    sim_time_s: f64,

    #[serde(rename = "waypoint")]
    waypoints: Vec<NavReport>,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    let session = Session::new(
        "bot_exec", 
        "sessions"
    ).wrap_err("Failed to create the session")?;

    let ctrl_loop_level = if opt.trace_ctrl { LevelFilter::Trace } else { LevelFilter::Info };
    logger_init(LevelFilter::Debug, ctrl_loop_level, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Robot Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let drive_params: drive_ctrl::Params = util::params::load("drive_ctrl.toml")
        .wrap_err("Could not load DriveCtrl params")?;
    let corr_params: corr_ctrl::Params = util::params::load("corr_ctrl.toml")
        .wrap_err("Could not load CorrCtrl params")?;
    let loc_params: loc::Params = util::params::load("loc.toml")
        .wrap_err("Could not load Loc params")?;
    let nav_params: nav_ctrl::Params = util::params::load("nav_ctrl.toml")
        .wrap_err("Could not load NavCtrl params")?;
    let sim_params: sim::Params = util::params::load("sim.toml")
        .wrap_err("Could not load Sim params")?;

    info!("Parameters loaded");

    let route: Route = util::params::load_path(&opt.route)
        .wrap_err_with(|| format!("Could not load the route from {:?}", opt.route))?;

    info!(
        "Loaded route with {} waypoints starting from {:?}\n", 
        route.waypoints.len(), route.start
    );

    // ---- INITIALISE MODULES ----

    let sim = Sim::new(sim_params, route.start);
    let mut nav = sim.build(drive_params, corr_params, loc_params, nav_params);

    info!("Module initialisation complete\n");

    // ---- RUN ROUTE ----

    let mut summary = RouteSummary {
        sim_time_s: 0f64,
        waypoints: Vec::with_capacity(route.waypoints.len())
    };

    for (i, waypoint) in route.waypoints.iter().enumerate() {
        let target = waypoint.careful(waypoint.careful || opt.careful);

        info!("Waypoint {}: ({:.2}, {:.2})", i, target.x, target.y);

        let report = nav.goto(&target)
            .wrap_err_with(|| format!("Failed to reach waypoint {}", i))?;

        let true_pose = sim.pose();
        info!(
            "Waypoint {} reached in {} steps at {:.2} s, reported {:.2} in off, truth {:.2} in off\n",
            i, 
            report.steps, 
            sim.world().borrow().time_s(),
            report.remaining_in, 
            true_pose.dist_to(target.x, target.y)
        );

        summary.waypoints.push(report);
    }

    if route.waypoints.is_empty() {
        warn!("Route contained no waypoints");
    }

    summary.sim_time_s = sim.world().borrow().time_s();

    info!(
        "Route complete in {:.2} s simulated, {:.2} s elapsed", 
        summary.sim_time_s, 
        session::get_elapsed_seconds()
    );

    let summary_path = session.save("route_summary.toml", &summary)
        .wrap_err("Failed to save the route summary")?;
    info!("Route summary saved to {:?}", summary_path);

    Ok(())
}
