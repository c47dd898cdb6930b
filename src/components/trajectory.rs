use serde::{Deserialize, Serialize};

use crate::components::{AircraftState, Channel, GuidanceCommand, TerminalState, WindSample};

/// One recorded instant of the approach.
///
/// `command` and `wind` are the inputs of the step that produced `state`; the initial
/// sample carries the command evaluated on the initial condition and calm air.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub state: AircraftState,
    pub command: GuidanceCommand,
    pub wind: WindSample,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    /// Channel switched from acquiring to tracking
    Captured { channel: Channel },
    /// Channel correction started hitting its limit
    Saturated { channel: Channel },
    /// Commanded flight-path angle was outside the aircraft limits
    FlightPathLimited { commanded: f64, applied: f64 },
    /// Speed model drove the airspeed below zero
    SpeedClamped { unclamped: f64 },
    Terminated { terminal: TerminalState },
}

/// Annotation recorded alongside the trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimEvent {
    pub time: f64,
    /// Index of the trajectory sample the event belongs to
    pub sample: usize,
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Time-ordered record of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
    events: Vec<SimEvent>,
}

impl Trajectory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            events: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.samples.capacity()
    }

    pub(crate) fn push(&mut self, sample: TrajectorySample) {
        self.samples.push(sample);
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut TrajectorySample> {
        self.samples.last_mut()
    }

    pub(crate) fn record(&mut self, kind: EventKind) {
        let (time, sample) = match self.samples.last() {
            Some(last) => (last.state.time, self.samples.len() - 1),
            None => (0.0, 0),
        };
        self.events.push(SimEvent { time, sample, kind });
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn states(&self) -> impl Iterator<Item = &AircraftState> + '_ {
        self.samples.iter().map(|s| &s.state)
    }

    pub fn first(&self) -> Option<&TrajectorySample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time of the first sample at which `channel` was tracking
    pub fn capture_time(&self, channel: Channel) -> Option<f64> {
        self.samples
            .iter()
            .find(|s| s.command.modes().get(channel).is_tracking())
            .map(|s| s.state.time)
    }
}
