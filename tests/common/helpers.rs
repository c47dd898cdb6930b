use glidepath::components::{Channel, EventKind, Trajectory};
use glidepath::{Simulation, SimulationConfig, SimulationOutcome};
use std::io::Write;
use tempfile::NamedTempFile;

/// Run a configuration to completion
pub fn run(config: &SimulationConfig) -> SimulationOutcome {
    Simulation::new(config)
        .expect("test configuration should be valid")
        .run()
}

/// Index of the first sample whose channel was tracking
pub fn first_tracking_index(trajectory: &Trajectory, channel: Channel) -> Option<usize> {
    trajectory
        .samples()
        .iter()
        .position(|s| s.command.modes().get(channel).is_tracking())
}

pub fn count_events<F>(trajectory: &Trajectory, predicate: F) -> usize
where
    F: Fn(&EventKind) -> bool,
{
    trajectory
        .events()
        .iter()
        .filter(|e| predicate(&e.kind))
        .count()
}

/// Largest correction magnitude commanded on either channel
pub fn max_correction(trajectory: &Trajectory) -> f64 {
    trajectory
        .samples()
        .iter()
        .flat_map(|s| [s.command.lateral.correction, s.command.vertical.correction])
        .fold(0.0, |acc: f64, c| acc.max(c.abs()))
}

/// Write `contents` to a temporary YAML file
pub fn write_temp_yaml(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}
