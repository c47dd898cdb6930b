use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::{
    AircraftConfig, AircraftState, ApproachConfig, GuidanceConfig, SafetyConfig,
};
use crate::resources::{
    require_finite, require_non_negative, require_positive, ConfigError, WindConfig,
};
use crate::utils::deg_to_rad;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Fixed integration step [s]
    pub dt: f64,
    /// Longest simulated time before the run times out [s]
    pub max_duration: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            dt: 0.05,
            max_duration: 200.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialStateConfig {
    pub x: f64,
    pub y: f64,
    pub h: f64,
    pub heading_deg: f64,
    pub flight_path_angle_deg: f64,
    /// Starting airspeed, the aircraft's nominal speed when absent [m/s]
    #[serde(default)]
    pub airspeed: Option<f64>,
}

impl Default for InitialStateConfig {
    fn default() -> Self {
        Self {
            x: -5000.0,
            y: 0.0,
            h: 500.0,
            heading_deg: 0.0,
            flight_path_angle_deg: -3.0,
            airspeed: None,
        }
    }
}

/// Everything needed to run one approach. Immutable once a run starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub simulation: TimingConfig,
    pub approach: ApproachConfig,
    pub aircraft: AircraftConfig,
    pub guidance: GuidanceConfig,
    pub wind: WindConfig,
    pub safety: SafetyConfig,
    pub initial_state: InitialStateConfig,
}

impl SimulationConfig {
    /// Read, parse and validate a YAML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("simulation.dt", self.simulation.dt)?;
        require_positive("simulation.max_duration", self.simulation.max_duration)?;
        if self.simulation.dt > self.simulation.max_duration {
            return Err(ConfigError::invalid(
                "simulation.dt",
                "must not exceed simulation.max_duration",
            ));
        }

        self.approach.validate()?;
        self.aircraft.validate()?;
        self.guidance.validate()?;
        self.wind.validate()?;
        self.safety.validate()?;

        let initial = &self.initial_state;
        require_finite("initial_state.x", initial.x)?;
        require_finite("initial_state.y", initial.y)?;
        require_non_negative("initial_state.h", initial.h)?;
        require_finite("initial_state.heading_deg", initial.heading_deg)?;
        if initial.flight_path_angle_deg < self.aircraft.gamma_min_deg
            || initial.flight_path_angle_deg > self.aircraft.gamma_max_deg
        {
            return Err(ConfigError::invalid(
                "initial_state.flight_path_angle_deg",
                "must lie within the aircraft flight-path limits",
            ));
        }
        if let Some(airspeed) = initial.airspeed {
            require_non_negative("initial_state.airspeed", airspeed)?;
        }
        Ok(())
    }

    /// Copy of this configuration with a different gust seed.
    pub fn with_seed(&self, seed: u64) -> Self {
        let mut config = self.clone();
        config.wind.seed = seed;
        config
    }

    /// Upper bound on the number of integration steps of a run
    pub fn max_steps(&self) -> usize {
        (self.simulation.max_duration / self.simulation.dt - 1e-9)
            .ceil()
            .max(1.0) as usize
    }

    pub fn initial_state(&self) -> AircraftState {
        let initial = &self.initial_state;
        AircraftState::new(
            Vector3::new(initial.x, initial.y, initial.h),
            initial.airspeed.unwrap_or(self.aircraft.nominal_speed),
            deg_to_rad(initial.heading_deg),
            deg_to_rad(initial.flight_path_angle_deg),
        )
    }
}
