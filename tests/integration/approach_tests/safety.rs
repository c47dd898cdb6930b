use glidepath::components::{AbortReason, Channel, EventKind, TerminalState};

use crate::common::{assert_single_terminal, baseline_config, count_events, offset_config, run};

#[test]
fn test_descent_rate_limit_aborts() {
    let mut config = baseline_config();
    config.safety.max_descent_rate = 2.0;
    let outcome = run(&config);

    match outcome.terminal {
        TerminalState::Aborted(AbortReason::DescentRate { descent_rate, limit }) => {
            assert!(descent_rate > limit);
            assert_eq!(limit, 2.0);
        }
        other => panic!("expected a descent-rate abort, got {other}"),
    }
    assert!(outcome.touchdown().is_none());
    assert_single_terminal(&outcome);
}

#[test]
fn test_lateral_limit_aborts() {
    let mut config = offset_config(300.0);
    config.safety.max_lateral_deviation = 100.0;
    let outcome = run(&config);

    assert!(matches!(
        outcome.terminal,
        TerminalState::Aborted(AbortReason::LateralDeviation { .. })
    ));
}

#[test]
fn test_time_limit_reached() {
    let mut config = baseline_config();
    config.simulation.max_duration = 10.0;
    let outcome = run(&config);

    assert_eq!(outcome.terminal, TerminalState::TimedOut);
    assert_eq!(outcome.trajectory.len(), config.max_steps() + 1);
    assert_single_terminal(&outcome);
}

#[test]
fn test_overflight_aborts() {
    let mut config = baseline_config();
    config.initial_state.x = -1000.0;
    config.initial_state.h = 600.0;
    config.initial_state.flight_path_angle_deg = 0.0;
    config.guidance.vertical.acquire_limit_deg = 1.0;
    let outcome = run(&config);

    assert!(matches!(
        outcome.terminal,
        TerminalState::Aborted(AbortReason::ThresholdOverflown { .. })
    ));
}

#[test]
fn test_saturation_recorded_on_onset_only() {
    let outcome = run(&offset_config(300.0));
    let lateral = count_events(&outcome.trajectory, |k| {
        matches!(k, EventKind::Saturated { channel } if *channel == Channel::Lateral)
    });
    let saturated_samples = outcome
        .trajectory
        .samples()
        .iter()
        .filter(|s| s.command.lateral.saturated)
        .count();

    assert!(lateral >= 1);
    assert!(lateral < saturated_samples);
}
