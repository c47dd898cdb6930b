use approx::assert_relative_eq;
use glidepath::components::{Channel, ChannelMode, RunStatus, TerminalState};
use glidepath::{ApproachMetrics, Simulation};

use crate::common::{
    assert_modes_monotonic, assert_single_terminal, assert_trajectory_valid, baseline_config,
    first_tracking_index, max_correction, offset_config, on_slope_config, run,
};

#[test]
fn test_baseline_approach_lands_on_centerline() {
    let config = baseline_config();
    let outcome = run(&config);

    assert_eq!(outcome.terminal, TerminalState::Landed);
    assert_trajectory_valid(&outcome.trajectory);
    assert_single_terminal(&outcome);

    let metrics = ApproachMetrics::from_outcome(&outcome, &config);
    let touchdown = metrics.touchdown.expect("landed run has a touchdown");
    assert!(touchdown.lateral_deviation.abs() < 1.0);
    assert!(metrics.vertical_angular_rms_deg.expect("glideslope captured") < 0.5);
    assert!(metrics.vertical_capture_time.is_some());
}

#[test]
fn test_lateral_offset_is_captured_then_lands() {
    let config = offset_config(300.0);
    let outcome = run(&config);

    let capture = first_tracking_index(&outcome.trajectory, Channel::Lateral)
        .expect("localizer should capture");
    // 60 s of flight at the default step
    assert!(capture > 0 && capture < 1200, "captured at sample {capture}");
    assert_eq!(
        outcome.trajectory.samples()[0].command.lateral.mode,
        ChannelMode::Acquiring
    );

    assert_eq!(outcome.terminal, TerminalState::Landed);
    let touchdown = outcome.touchdown().expect("touchdown state");
    assert!(touchdown.cross_track().abs() < 1.0);
    assert_modes_monotonic(&outcome.trajectory);
}

#[test]
fn test_on_slope_approach_needs_no_correction() {
    let outcome = run(&on_slope_config());

    assert!(outcome.landed());
    assert!(max_correction(&outcome.trajectory) < 1e-6);
    assert!(outcome
        .trajectory
        .samples()
        .iter()
        .all(|s| s.command.lateral.mode.is_tracking() && s.command.vertical.mode.is_tracking()));
}

#[test]
fn test_airspeed_constant_without_speed_model() {
    let config = offset_config(150.0);
    let outcome = run(&config);
    for state in outcome.trajectory.states() {
        assert_eq!(state.airspeed, config.aircraft.nominal_speed);
    }
}

#[test]
fn test_altitude_decreases_once_glideslope_tracks() {
    let outcome = run(&baseline_config());
    let start = first_tracking_index(&outcome.trajectory, Channel::Vertical)
        .expect("glideslope should capture");

    let altitudes: Vec<f64> = outcome
        .trajectory
        .states()
        .skip(start)
        .map(|s| s.altitude())
        .collect();
    for pair in altitudes.windows(2) {
        assert!(pair[1] < pair[0], "altitude rose from {} to {}", pair[0], pair[1]);
    }
}

#[test]
fn test_step_by_step_matches_run() {
    let config = offset_config(120.0);
    let mut simulation = Simulation::new(&config).unwrap();
    let mut steps = 0;
    while let RunStatus::Running = simulation.step() {
        steps += 1;
        assert!(steps <= config.max_steps(), "loop must terminate");
    }
    let stepped = simulation.trajectory().clone();

    let outcome = run(&config);
    assert_eq!(stepped, outcome.trajectory);
    assert_eq!(simulation.status().terminal(), Some(outcome.terminal));
}

#[test]
fn test_touchdown_sample_clamped_to_ground() {
    let outcome = run(&baseline_config());
    let last = outcome.trajectory.last().unwrap();
    assert_eq!(last.state.altitude(), 0.0);

    let before = &outcome.trajectory.samples()[outcome.trajectory.len() - 2];
    assert!(before.state.altitude() > 0.0);
    assert_relative_eq!(last.state.time - before.state.time, 0.05, epsilon = 1e-9);
}
