//! Drives the simulated robot end to end through navigation control.

use bot_lib::{
    corr_ctrl, drive_ctrl, loc::{self, LocError, Pose}, 
    nav_ctrl::{self, NavCtrlError, NavTarget, Route}, 
    sim::{self, Sim, SimNavCtrl}
};

fn build(sim: &Sim) -> SimNavCtrl {
    sim.build(
        drive_ctrl::Params::default(),
        corr_ctrl::Params::default(),
        loc::Params::default(),
        nav_ctrl::Params::default()
    )
}

#[test]
fn converge_from_many_starts() {
    let target = NavTarget::new(30.0, 18.0, 6.0);

    let starts = [
        Pose::new(2.0, 2.0, 0.0),
        Pose::new(5.0, 5.0, 90.0),
        Pose::new(34.0, 30.0, 200.0),
        Pose::new(28.0, 2.0, 135.0),
        Pose::new(30.0, 30.0, 270.0),
        Pose::new(1.0, 35.0, 359.0),
    ];

    for start in starts.iter() {
        let sim = Sim::new(sim::Params::default(), *start);
        let mut nav = build(&sim);

        let report = nav.goto(&target)
            .unwrap_or_else(|e| panic!("From {:?}: {}", start, e));

        assert!(report.remaining_in <= 0.5, "From {:?}: {:?}", start, report);
        assert!(report.steps <= nav.params().max_steps);
        assert!(sim.pose().dist_to(30.0, 18.0) <= 0.5, "From {:?}: {:?}", start, sim.pose());
    }
}

#[test]
fn careful_approach() {
    let sim = Sim::new(sim::Params::default(), Pose::new(5.0, 5.0, 90.0));
    let mut nav = build(&sim);

    let report = nav.goto(&NavTarget::new(30.0, 18.0, 6.0).careful(true)).unwrap();

    assert!(report.steps >= 4);
    assert!(sim.pose().dist_to(30.0, 18.0) <= 0.5);
}

#[test]
fn route_through_course() {
    let route: Route = util::params::parse(include_str!("../../routes/demo.toml")).unwrap();

    let sim = Sim::new(sim::Params::default(), route.start);
    let mut nav = build(&sim);

    for waypoint in route.waypoints.iter() {
        nav.goto(waypoint).unwrap();
        assert!(sim.pose().dist_to(waypoint.x, waypoint.y) <= 0.5);
    }
}

#[test]
fn mismatched_motors() {
    let params = sim::Params {
        right_motor_gain: 0.98,
        ..Default::default()
    };
    let sim = Sim::new(params, Pose::new(2.0, 2.0, 0.0));
    let mut nav = build(&sim);

    nav.goto(&NavTarget::new(30.0, 18.0, 6.0)).unwrap();
    assert!(sim.pose().dist_to(30.0, 18.0) <= 0.5);
}

#[test]
fn reference_dropout() {
    let sim = Sim::new(sim::Params::default(), Pose::new(5.0, 5.0, 90.0));
    let mut nav = build(&sim);

    // Waited out
    sim.world().borrow_mut().set_ref_dropout(60);
    nav.goto(&NavTarget::new(30.0, 18.0, 6.0)).unwrap();
    assert!(sim.pose().dist_to(30.0, 18.0) <= 0.5);

    // Reported
    sim.world().borrow_mut().set_ref_dropout(usize::MAX);
    let start_s = sim.world().borrow().time_s();

    assert_eq!(
        nav.goto(&NavTarget::new(10.0, 10.0, 6.0)),
        Err(NavCtrlError::Loc(LocError::SensorUnavailable { attempts: 40 }))
    );

    // Gave up after the bounded number of polls
    let waited_s = sim.world().borrow().time_s() - start_s;
    assert!((waited_s - 39.0 * 0.05).abs() < 1e-6);
}
