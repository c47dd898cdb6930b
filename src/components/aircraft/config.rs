use serde::{Deserialize, Serialize};

use crate::resources::{require_non_negative, require_positive, ConfigError};
use crate::utils::deg_to_rad;

/// How the aircraft's heading and flight-path angle follow their commands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseModel {
    /// Idealized inner loop: angles jump to the commanded values.
    Instantaneous,
    /// First-order lag towards the commanded values [s].
    FirstOrderLag {
        heading_time_constant: f64,
        flight_path_time_constant: f64,
    },
}

impl Default for ResponseModel {
    fn default() -> Self {
        Self::FirstOrderLag {
            heading_time_constant: 2.0,
            flight_path_time_constant: 1.0,
        }
    }
}

/// Airspeed model. No thrust or drag polynomials, only a speed-hold loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpeedModel {
    /// Airspeed stays at its initial value.
    Constant,
    /// `dV/dt = speed_gain * (reference_speed - V) - drag_deceleration - g * sin(gamma)`
    Energy {
        reference_speed: f64,
        speed_gain: f64,
        drag_deceleration: f64,
    },
}

impl Default for SpeedModel {
    fn default() -> Self {
        Self::Constant
    }
}

/// Aircraft parameters as written in the configuration document (angles in degrees).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftConfig {
    /// Approach speed [m/s]
    pub nominal_speed: f64,
    pub max_bank_deg: f64,
    pub gamma_min_deg: f64,
    pub gamma_max_deg: f64,
    pub max_flight_path_rate_deg_s: f64,
    #[serde(default)]
    pub response: ResponseModel,
    #[serde(default)]
    pub speed: SpeedModel,
}

impl Default for AircraftConfig {
    fn default() -> Self {
        Self {
            nominal_speed: 70.0,
            max_bank_deg: 25.0,
            gamma_min_deg: -10.0,
            gamma_max_deg: 5.0,
            max_flight_path_rate_deg_s: 3.0,
            response: ResponseModel::default(),
            speed: SpeedModel::default(),
        }
    }
}

impl AircraftConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("aircraft.nominal_speed", self.nominal_speed)?;
        require_positive("aircraft.max_bank_deg", self.max_bank_deg)?;
        if self.max_bank_deg >= 90.0 {
            return Err(ConfigError::invalid(
                "aircraft.max_bank_deg",
                "must be below 90 degrees",
            ));
        }
        require_positive(
            "aircraft.max_flight_path_rate_deg_s",
            self.max_flight_path_rate_deg_s,
        )?;
        if self.gamma_min_deg >= self.gamma_max_deg {
            return Err(ConfigError::invalid(
                "aircraft.gamma_min_deg",
                "must be below aircraft.gamma_max_deg",
            ));
        }
        if self.gamma_min_deg <= -90.0 || self.gamma_max_deg >= 90.0 {
            return Err(ConfigError::invalid(
                "aircraft.gamma_min_deg",
                "flight-path limits must lie within (-90, 90) degrees",
            ));
        }

        if let ResponseModel::FirstOrderLag {
            heading_time_constant,
            flight_path_time_constant,
        } = self.response
        {
            require_positive("aircraft.response.heading_time_constant", heading_time_constant)?;
            require_positive(
                "aircraft.response.flight_path_time_constant",
                flight_path_time_constant,
            )?;
        }

        if let SpeedModel::Energy {
            reference_speed,
            speed_gain,
            drag_deceleration,
        } = self.speed
        {
            require_non_negative("aircraft.speed.reference_speed", reference_speed)?;
            require_non_negative("aircraft.speed.speed_gain", speed_gain)?;
            require_non_negative("aircraft.speed.drag_deceleration", drag_deceleration)?;
        }

        Ok(())
    }
}

/// Aircraft performance limits in the units the dynamics use (radians).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AircraftLimits {
    pub max_bank_angle: f64,
    pub gamma_min: f64,
    pub gamma_max: f64,
    pub max_flight_path_rate: f64,
    pub response: ResponseModel,
    pub speed: SpeedModel,
}

impl AircraftLimits {
    pub fn from_config(config: &AircraftConfig) -> Self {
        Self {
            max_bank_angle: deg_to_rad(config.max_bank_deg),
            gamma_min: deg_to_rad(config.gamma_min_deg),
            gamma_max: deg_to_rad(config.gamma_max_deg),
            max_flight_path_rate: deg_to_rad(config.max_flight_path_rate_deg_s),
            response: config.response,
            speed: config.speed,
        }
    }
}

impl Default for AircraftLimits {
    fn default() -> Self {
        Self::from_config(&AircraftConfig::default())
    }
}
