use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::components::{
    AbortReason, AircraftLimits, AircraftState, Channel, ChannelModes, EventKind, GuidanceCommand,
    GuidanceGains, GuidancePath, RunStatus, SafetyConfig, TerminalState, Trajectory,
    TrajectorySample, WindSample,
};
use crate::resources::{ConfigError, SimulationConfig};
use crate::systems::dynamics::{self, StepResult};
use crate::systems::guidance::GuidanceLaw;
use crate::systems::wind::WindModel;
use crate::utils::MAX_RESERVED_SAMPLES;

/// Finished run: the full trajectory and the single terminal state it ended in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub terminal: TerminalState,
    pub trajectory: Trajectory,
}

impl SimulationOutcome {
    pub fn landed(&self) -> bool {
        self.terminal.is_landed()
    }

    /// Final state when the run ended on the ground
    pub fn touchdown(&self) -> Option<&AircraftState> {
        if self.landed() {
            self.trajectory.last().map(|s| &s.state)
        } else {
            None
        }
    }
}

/// Onset flags for the edge-triggered events
#[derive(Debug, Default, Clone, Copy)]
struct Latches {
    lateral_saturated: bool,
    vertical_saturated: bool,
    flight_path_limited: bool,
    speed_clamped: bool,
}

/// One approach from the configured initial state to a terminal state.
///
/// Each tick samples the wind, evaluates guidance on the current state, advances the
/// dynamics and then checks for touchdown, safety violations and the time limit, in
/// that order.
pub struct Simulation {
    law: GuidanceLaw,
    limits: AircraftLimits,
    safety: SafetyConfig,
    wind: WindModel,
    dt: f64,
    max_steps: usize,

    state: AircraftState,
    modes: ChannelModes,
    trajectory: Trajectory,
    steps: usize,
    status: RunStatus,
    latches: Latches,
}

impl Simulation {
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let path = GuidancePath::from_config(&config.approach);
        let gains = GuidanceGains::from_config(&config.guidance);
        let max_steps = config.max_steps();
        let state = config.initial_state();

        let mut simulation = Self {
            law: GuidanceLaw::new(path, gains),
            limits: AircraftLimits::from_config(&config.aircraft),
            safety: config.safety,
            wind: WindModel::new(&config.wind),
            dt: config.simulation.dt,
            max_steps,
            state,
            modes: ChannelModes::default(),
            trajectory: Trajectory::with_capacity(
                max_steps.saturating_add(1).min(MAX_RESERVED_SAMPLES),
            ),
            steps: 0,
            status: RunStatus::Running,
            latches: Latches::default(),
        };

        info!(
            "Starting approach at x = {:.1} m, y = {:.1} m, h = {:.1} m, V = {:.1} m/s",
            state.position.x, state.position.y, state.position.z, state.airspeed
        );

        // Initial condition, annotated with the guidance it would command in still air
        let command = simulation.law.compute(&state, simulation.modes);
        simulation.trajectory.push(TrajectorySample {
            state,
            command,
            wind: WindSample::calm(),
        });
        simulation.annotate(&command, None, None);
        simulation.modes = command.modes();

        // An initial condition can already be outside the envelope
        if let Some(terminal) = simulation.evaluate_terminal() {
            simulation.finish(terminal);
        }

        Ok(simulation)
    }

    /// Advance one tick. A finished simulation stays in its terminal state.
    pub fn step(&mut self) -> RunStatus {
        if !self.status.is_running() {
            return self.status;
        }

        let wind = self.wind.sample(self.state.time);
        let command = self.law.compute(&self.state, self.modes);
        let result = dynamics::step(&self.state, &command, &wind, &self.limits, self.dt);
        let StepResult {
            state,
            flight_path_clamped,
            speed_clamped,
        } = result;

        self.steps += 1;
        self.state = state;
        self.trajectory.push(TrajectorySample {
            state,
            command,
            wind,
        });
        self.annotate(&command, flight_path_clamped, speed_clamped);
        self.modes = command.modes();

        if let Some(terminal) = self.evaluate_terminal() {
            self.finish(terminal);
        }
        self.status
    }

    /// Run to completion. Bounded by the configured duration, so this always returns.
    pub fn run(mut self) -> SimulationOutcome {
        let terminal = loop {
            if let RunStatus::Finished(terminal) = self.step() {
                break terminal;
            }
        };
        SimulationOutcome {
            terminal,
            trajectory: self.trajectory,
        }
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn state(&self) -> &AircraftState {
        &self.state
    }

    pub fn modes(&self) -> ChannelModes {
        self.modes
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn guidance(&self) -> &GuidanceLaw {
        &self.law
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    fn evaluate_terminal(&self) -> Option<TerminalState> {
        let state = &self.state;

        if state.altitude() <= 0.0 {
            return Some(TerminalState::Landed);
        }

        let deviation = state.cross_track();
        if deviation.abs() > self.safety.max_lateral_deviation {
            return Some(TerminalState::Aborted(AbortReason::LateralDeviation {
                deviation,
                limit: self.safety.max_lateral_deviation,
            }));
        }
        let descent_rate = state.descent_rate();
        if descent_rate > self.safety.max_descent_rate {
            return Some(TerminalState::Aborted(AbortReason::DescentRate {
                descent_rate,
                limit: self.safety.max_descent_rate,
            }));
        }
        if state.along_track() > self.law.path().runway_length {
            return Some(TerminalState::Aborted(AbortReason::ThresholdOverflown {
                along_track: state.along_track(),
            }));
        }

        if self.steps >= self.max_steps {
            return Some(TerminalState::TimedOut);
        }
        None
    }

    fn finish(&mut self, terminal: TerminalState) {
        if terminal.is_landed() {
            self.state.position.z = 0.0;
            if let Some(last) = self.trajectory.last_mut() {
                last.state.position.z = 0.0;
            }
        }
        info!(
            "Approach finished: {} at t = {:.2} s after {} steps",
            terminal, self.state.time, self.steps
        );
        self.trajectory.record(EventKind::Terminated { terminal });
        self.status = RunStatus::Finished(terminal);
    }

    /// Record capture, saturation onset and limiting events for the newest sample.
    fn annotate(
        &mut self,
        command: &GuidanceCommand,
        flight_path_clamped: Option<f64>,
        speed_clamped: Option<f64>,
    ) {
        let time = self.state.time;

        for channel in [Channel::Lateral, Channel::Vertical] {
            let output = command.channel(channel);
            if output.mode.is_tracking() && !self.modes.get(channel).is_tracking() {
                info!(
                    "{} channel captured at t = {:.2} s, deviation {:.2} m",
                    channel, time, output.deviation
                );
                self.trajectory.record(EventKind::Captured { channel });
            }

            let latch = match channel {
                Channel::Lateral => &mut self.latches.lateral_saturated,
                Channel::Vertical => &mut self.latches.vertical_saturated,
            };
            if output.saturated && !*latch {
                debug!("{} correction saturated at t = {:.2} s", channel, time);
                self.trajectory.record(EventKind::Saturated { channel });
            }
            *latch = output.saturated;
        }

        if let Some(commanded) = flight_path_clamped {
            if !self.latches.flight_path_limited {
                debug!(
                    "Flight-path command {:.4} rad limited at t = {:.2} s",
                    commanded, time
                );
                self.trajectory.record(EventKind::FlightPathLimited {
                    commanded,
                    applied: commanded.clamp(self.limits.gamma_min, self.limits.gamma_max),
                });
            }
        }
        self.latches.flight_path_limited = flight_path_clamped.is_some();

        if let Some(unclamped) = speed_clamped {
            if !self.latches.speed_clamped {
                self.trajectory
                    .record(EventKind::SpeedClamped { unclamped });
            }
        }
        self.latches.speed_clamped = speed_clamped.is_some();
    }
}

/// Build and run a simulation in one call.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationOutcome, ConfigError> {
    Ok(Simulation::new(config)?.run())
}
