use glidepath::components::{AircraftState, Channel, EventKind, Trajectory};
use glidepath::SimulationOutcome;

/// Assert that an aircraft state is physically sensible
#[track_caller]
pub fn assert_state_valid(state: &AircraftState) {
    assert!(
        state.position.iter().all(|x| x.is_finite()),
        "Position is not finite: {:?}",
        state.position
    );
    assert!(
        state.ground_velocity.iter().all(|x| x.is_finite()),
        "Ground velocity is not finite: {:?}",
        state.ground_velocity
    );
    assert!(state.airspeed >= 0.0, "Negative airspeed {}", state.airspeed);
    assert!(state.heading.is_finite(), "Heading is not finite");
    assert!(
        state.flight_path_angle.is_finite(),
        "Flight-path angle is not finite"
    );
    assert!(state.time >= 0.0, "Negative time {}", state.time);
}

/// Assert every sample is valid and time advances strictly
#[track_caller]
pub fn assert_trajectory_valid(trajectory: &Trajectory) {
    assert!(!trajectory.is_empty(), "Trajectory is empty");
    let mut previous: Option<f64> = None;
    for state in trajectory.states() {
        assert_state_valid(state);
        if let Some(time) = previous {
            assert!(state.time > time, "Time did not advance at t = {}", time);
        }
        previous = Some(state.time);
    }
}

/// Assert that no channel ever falls back from tracking to acquiring
#[track_caller]
pub fn assert_modes_monotonic(trajectory: &Trajectory) {
    for channel in [Channel::Lateral, Channel::Vertical] {
        let mut tracking = false;
        for sample in trajectory.samples() {
            let now = sample.command.modes().get(channel).is_tracking();
            assert!(
                now || !tracking,
                "{} channel left tracking at t = {}",
                channel,
                sample.state.time
            );
            tracking = now;
        }
    }
}

/// Assert that exactly one terminal event was recorded and it matches the outcome
#[track_caller]
pub fn assert_single_terminal(outcome: &SimulationOutcome) {
    let terminals: Vec<_> = outcome
        .trajectory
        .events()
        .iter()
        .filter_map(|e| match &e.kind {
            EventKind::Terminated { terminal } => Some(*terminal),
            _ => None,
        })
        .collect();
    assert_eq!(terminals, vec![outcome.terminal]);

    let last_event = outcome.trajectory.events().last().map(|e| &e.kind);
    assert!(
        matches!(last_event, Some(EventKind::Terminated { .. })),
        "Terminal event is not the last event"
    );
}
