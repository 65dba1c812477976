//! Checks the parameter files shipped in `params/` parse and hold the tuned values.

use bot_lib::{corr_ctrl, drive_ctrl, loc, nav_ctrl, sim};

#[test]
fn drive_ctrl_params() {
    let p: drive_ctrl::Params = util::params::parse(
        include_str!("../../params/drive_ctrl.toml")
    ).unwrap();
    let d = drive_ctrl::Params::default();

    assert_eq!(p.dist_per_count_in, d.dist_per_count_in);
    assert_eq!(p.count_adjust, d.count_adjust);
    assert_eq!(p.track_width_in, d.track_width_in);
    assert_eq!(p.gains, d.gains);
    assert_eq!(p.sample_period_s, d.sample_period_s);
    assert_eq!(p.stall_window_samples, d.stall_window_samples);
    assert_eq!(p.stall_min_counts, d.stall_min_counts);
    assert_eq!(p.until_stopped_min_counts, d.until_stopped_min_counts);
    assert_eq!(p.right_power_comp, d.right_power_comp);
}

#[test]
fn corr_ctrl_params() {
    let p: corr_ctrl::Params = util::params::parse(
        include_str!("../../params/corr_ctrl.toml")
    ).unwrap();

    assert_eq!(p.heading_tol_deg, 1.5);
    assert_eq!(p.axis_tol, 0.25);
    assert_eq!(p.max_iterations, 60);
    assert_eq!(p.max_coarse_turns, 3);
}

#[test]
fn loc_params() {
    let p: loc::Params = util::params::parse(include_str!("../../params/loc.toml")).unwrap();

    assert_eq!(p.max_polls, 40);
    assert_eq!(p.poll_interval_s, 0.05);
}

#[test]
fn nav_ctrl_params() {
    let p: nav_ctrl::Params = util::params::parse(
        include_str!("../../params/nav_ctrl.toml")
    ).unwrap();

    assert_eq!(p.threshold_in, 15.0);
    assert_eq!(p.step_in, 7.0);
    assert_eq!(p.careful_factor, 0.5);
    assert_eq!(p.tolerance_in, 0.5);
}

#[test]
fn sim_params() {
    let p: sim::Params = util::params::parse(include_str!("../../params/sim.toml")).unwrap();
    let d = sim::Params::default();

    assert_eq!(p.max_wheel_speed_ins, d.max_wheel_speed_ins);
    assert_eq!(p.right_motor_gain, d.right_motor_gain);
    assert_eq!(p.dist_per_count_in, d.dist_per_count_in);
}

#[test]
fn empty_file_gives_defaults() {
    let p: nav_ctrl::Params = util::params::parse("").unwrap();
    assert_eq!(p.max_steps, 50);
    assert_eq!(p.final_attempts, 3);
}
