use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::{Channel, EventKind, GuidancePath, TerminalState, TrajectorySample};
use crate::resources::SimulationConfig;
use crate::systems::runner::SimulationOutcome;
use crate::utils::{
    rad_to_deg, rms, STABILIZED_GATE_HEIGHT, STABILIZED_MAX_LATERAL, STABILIZED_MAX_SPEED_ERROR,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchdownMetrics {
    /// Cross-track offset at touchdown [m]
    pub lateral_deviation: f64,
    /// Touchdown point along the runway, negative when short of the threshold [m]
    pub along_track: f64,
    /// Vertical speed at touchdown, negative down [m/s]
    pub vertical_speed: f64,
    pub airspeed: f64,
}

/// Stabilized-approach check over every sample below the gate height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilizedGate {
    pub passed: bool,
    pub max_lateral_deviation: f64,
    pub max_speed_error: f64,
    pub samples: usize,
}

/// Summary statistics of one approach.
///
/// Tracking-phase statistics only cover samples whose channel was tracking, and are
/// `None` when the channel never captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproachMetrics {
    pub terminal: TerminalState,
    pub flight_time: f64,
    pub touchdown: Option<TouchdownMetrics>,
    pub lateral_capture_time: Option<f64>,
    pub vertical_capture_time: Option<f64>,
    /// Cross-track RMS while the localizer tracked [m]
    pub lateral_rms: Option<f64>,
    /// Height-above-path RMS while the glideslope tracked [m]
    pub vertical_rms: Option<f64>,
    /// Angular glideslope deviation RMS while the glideslope tracked, outside the
    /// distance floor around the glide path origin [deg]
    pub vertical_angular_rms_deg: Option<f64>,
    pub max_descent_rate: f64,
    pub saturation_events: usize,
    pub stabilized: Option<StabilizedGate>,
}

impl ApproachMetrics {
    pub fn from_outcome(outcome: &SimulationOutcome, config: &SimulationConfig) -> Self {
        let path = GuidancePath::from_config(&config.approach);
        let trajectory = &outcome.trajectory;
        let samples = trajectory.samples();

        let tracking = |channel: Channel| {
            samples
                .iter()
                .filter(move |s| s.command.modes().get(channel).is_tracking())
        };

        let lateral_rms = rms(tracking(Channel::Lateral).map(|s| s.state.cross_track()));
        let vertical_rms = rms(tracking(Channel::Vertical).map(|s| height_above_path(&path, s)));
        let vertical_angular_rms_deg = rms(
            tracking(Channel::Vertical)
                .filter_map(|s| path.covered_angular_deviation(&s.state))
                .map(rad_to_deg),
        );

        let touchdown = outcome.touchdown().map(|state| TouchdownMetrics {
            lateral_deviation: state.cross_track(),
            along_track: state.along_track(),
            vertical_speed: state.ground_velocity.z,
            airspeed: state.airspeed,
        });

        let max_descent_rate = trajectory
            .states()
            .map(|s| s.descent_rate())
            .fold(f64::NEG_INFINITY, f64::max)
            .max(0.0);

        let saturation_events = trajectory
            .events()
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Saturated { .. }))
            .count();

        Self {
            terminal: outcome.terminal,
            flight_time: trajectory.last().map_or(0.0, |s| s.state.time),
            touchdown,
            lateral_capture_time: trajectory.capture_time(Channel::Lateral),
            vertical_capture_time: trajectory.capture_time(Channel::Vertical),
            lateral_rms,
            vertical_rms,
            vertical_angular_rms_deg,
            max_descent_rate,
            saturation_events,
            stabilized: stabilized_gate(samples, config.aircraft.nominal_speed),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn height_above_path(path: &GuidancePath, sample: &TrajectorySample) -> f64 {
    sample.state.altitude() - path.nominal_altitude(sample.state.along_track())
}

fn stabilized_gate(samples: &[TrajectorySample], nominal_speed: f64) -> Option<StabilizedGate> {
    let below: Vec<_> = samples
        .iter()
        .filter(|s| s.state.altitude() < STABILIZED_GATE_HEIGHT)
        .collect();
    if below.is_empty() {
        return None;
    }

    let max_lateral_deviation = below
        .iter()
        .map(|s| s.state.cross_track().abs())
        .fold(0.0, f64::max);
    let max_speed_error = below
        .iter()
        .map(|s| (s.state.airspeed - nominal_speed).abs())
        .fold(0.0, f64::max);

    Some(StabilizedGate {
        passed: max_lateral_deviation <= STABILIZED_MAX_LATERAL
            && max_speed_error <= STABILIZED_MAX_SPEED_ERROR,
        max_lateral_deviation,
        max_speed_error,
        samples: below.len(),
    })
}

fn fmt_opt(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.3} {unit}"))
}

impl fmt::Display for ApproachMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "outcome:              {}", self.terminal)?;
        writeln!(f, "flight time:          {:.2} s", self.flight_time)?;
        if let Some(td) = &self.touchdown {
            writeln!(f, "touchdown y:          {:.3} m", td.lateral_deviation)?;
            writeln!(f, "touchdown x:          {:.1} m", td.along_track)?;
            writeln!(f, "touchdown v/s:        {:.2} m/s", td.vertical_speed)?;
        }
        writeln!(
            f,
            "capture (lat/vert):   {} / {}",
            fmt_opt(self.lateral_capture_time, "s"),
            fmt_opt(self.vertical_capture_time, "s")
        )?;
        writeln!(f, "lateral RMS:          {}", fmt_opt(self.lateral_rms, "m"))?;
        writeln!(f, "vertical RMS:         {}", fmt_opt(self.vertical_rms, "m"))?;
        writeln!(
            f,
            "angular RMS:          {}",
            fmt_opt(self.vertical_angular_rms_deg, "deg")
        )?;
        writeln!(f, "max descent rate:     {:.2} m/s", self.max_descent_rate)?;
        writeln!(f, "saturation events:    {}", self.saturation_events)?;
        match &self.stabilized {
            Some(gate) => write!(
                f,
                "stabilized at {STABILIZED_GATE_HEIGHT:.0} m:   {}",
                if gate.passed { "yes" } else { "no" }
            ),
            None => write!(f, "stabilized at {STABILIZED_GATE_HEIGHT:.0} m:   not reached"),
        }
    }
}
