use serde::{Deserialize, Serialize};

use crate::components::AircraftState;
use crate::resources::{require_non_negative, require_positive, ConfigError};
use crate::utils::{deg_to_rad, MIN_ANGULAR_DISTANCE};

/// Approach geometry as written in the configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproachConfig {
    pub glideslope_deg: f64,
    /// Glideslope height over the threshold [m]
    #[serde(default)]
    pub threshold_crossing_height: f64,
    pub runway_length: f64,
    pub runway_width: f64,
}

impl Default for ApproachConfig {
    fn default() -> Self {
        Self {
            glideslope_deg: 3.0,
            threshold_crossing_height: 0.0,
            runway_length: 2500.0,
            runway_width: 45.0,
        }
    }
}

impl ApproachConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.glideslope_deg > 0.0 && self.glideslope_deg < 10.0) {
            return Err(ConfigError::invalid(
                "approach.glideslope_deg",
                format!("{} is outside (0, 10) degrees", self.glideslope_deg),
            ));
        }
        require_non_negative(
            "approach.threshold_crossing_height",
            self.threshold_crossing_height,
        )?;
        require_positive("approach.runway_length", self.runway_length)?;
        require_positive("approach.runway_width", self.runway_width)
    }
}

/// Static localizer and glideslope definition.
///
/// The localizer course is the runway centerline itself, so the lateral reference is
/// the line `y = 0` of the runway frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuidancePath {
    /// Nominal descent angle, positive [rad]
    pub glideslope_angle: f64,
    pub threshold_crossing_height: f64,
    pub runway_length: f64,
    pub runway_width: f64,
}

impl GuidancePath {
    pub fn from_config(config: &ApproachConfig) -> Self {
        Self {
            glideslope_angle: deg_to_rad(config.glideslope_deg),
            threshold_crossing_height: config.threshold_crossing_height,
            runway_length: config.runway_length,
            runway_width: config.runway_width,
        }
    }

    /// Height of the glideslope above the threshold elevation at along-track `x`.
    ///
    /// The path continues past the threshold down to the ground, where it is held at 0.
    pub fn nominal_altitude(&self, x: f64) -> f64 {
        (self.threshold_crossing_height - x * self.glideslope_angle.tan()).max(0.0)
    }

    /// Rate of change of the nominal altitude for a ground speed `vx` along the runway.
    pub fn nominal_altitude_rate(&self, x: f64, vx: f64) -> f64 {
        if self.nominal_altitude(x) > 0.0 {
            -vx * self.glideslope_angle.tan()
        } else {
            0.0
        }
    }

    /// Along-track position where the extended glideslope meets the ground
    pub fn glide_path_origin(&self) -> f64 {
        self.threshold_crossing_height / self.glideslope_angle.tan()
    }

    /// Elevation angle of the aircraft as seen from the glide path origin [rad].
    ///
    /// The horizontal distance is floored so the angle stays finite near the runway.
    pub fn elevation_angle(&self, state: &AircraftState) -> f64 {
        let distance = (self.glide_path_origin() - state.along_track()).max(MIN_ANGULAR_DISTANCE);
        state.altitude().atan2(distance)
    }

    /// Elevation angle minus the glideslope angle, positive above the path [rad]
    pub fn angular_deviation(&self, state: &AircraftState) -> f64 {
        self.elevation_angle(state) - self.glideslope_angle
    }

    /// Angular deviation where it is defined without the distance floor, `None` once
    /// the glide path origin is closer than `MIN_ANGULAR_DISTANCE`.
    pub fn covered_angular_deviation(&self, state: &AircraftState) -> Option<f64> {
        let distance = self.glide_path_origin() - state.along_track();
        (distance >= MIN_ANGULAR_DISTANCE).then(|| self.angular_deviation(state))
    }
}

impl Default for GuidancePath {
    fn default() -> Self {
        Self::from_config(&ApproachConfig::default())
    }
}

/// One guidance channel as written in the configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Proportional gain [rad/m]
    pub kp: f64,
    /// Rate gain [rad/(m/s)]
    pub kd: f64,
    /// Deviation magnitude below which the channel captures [m]
    pub capture_threshold: f64,
    /// Correction limit while acquiring [deg]
    pub acquire_limit_deg: f64,
    /// Correction limit while tracking [deg]
    pub track_limit_deg: f64,
}

impl ChannelConfig {
    pub fn validate(&self, channel: &str) -> Result<(), ConfigError> {
        require_non_negative(&format!("guidance.{channel}.kp"), self.kp)?;
        require_non_negative(&format!("guidance.{channel}.kd"), self.kd)?;
        require_positive(
            &format!("guidance.{channel}.capture_threshold"),
            self.capture_threshold,
        )?;
        require_positive(
            &format!("guidance.{channel}.acquire_limit_deg"),
            self.acquire_limit_deg,
        )?;
        require_positive(
            &format!("guidance.{channel}.track_limit_deg"),
            self.track_limit_deg,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidanceConfig {
    pub lateral: ChannelConfig,
    pub vertical: ChannelConfig,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            lateral: ChannelConfig {
                kp: 0.004,
                kd: 0.004,
                capture_threshold: 25.0,
                acquire_limit_deg: 30.0,
                track_limit_deg: 10.0,
            },
            vertical: ChannelConfig {
                kp: 0.004,
                kd: 0.002,
                capture_threshold: 10.0,
                acquire_limit_deg: 4.0,
                track_limit_deg: 2.0,
            },
        }
    }
}

impl GuidanceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lateral.validate("lateral")?;
        self.vertical.validate("vertical")?;
        if self.vertical.track_limit_deg >= 90.0 || self.lateral.acquire_limit_deg >= 90.0 {
            return Err(ConfigError::invalid(
                "guidance",
                "correction limits must stay below 90 degrees",
            ));
        }
        Ok(())
    }
}

/// Proportional-derivative gains and limits of one channel (radians).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelGains {
    pub kp: f64,
    pub kd: f64,
    pub capture_threshold: f64,
    pub acquire_limit: f64,
    pub track_limit: f64,
}

impl ChannelGains {
    pub fn from_config(config: &ChannelConfig) -> Self {
        Self {
            kp: config.kp,
            kd: config.kd,
            capture_threshold: config.capture_threshold,
            acquire_limit: deg_to_rad(config.acquire_limit_deg),
            track_limit: deg_to_rad(config.track_limit_deg),
        }
    }

    /// Correction limit that applies in `mode`
    pub fn limit(&self, mode: ChannelMode) -> f64 {
        match mode {
            ChannelMode::Acquiring => self.acquire_limit,
            ChannelMode::Tracking => self.track_limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuidanceGains {
    pub lateral: ChannelGains,
    pub vertical: ChannelGains,
}

impl GuidanceGains {
    pub fn from_config(config: &GuidanceConfig) -> Self {
        Self {
            lateral: ChannelGains::from_config(&config.lateral),
            vertical: ChannelGains::from_config(&config.vertical),
        }
    }
}

impl Default for GuidanceGains {
    fn default() -> Self {
        Self::from_config(&GuidanceConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Lateral,
    Vertical,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Lateral => write!(f, "lateral"),
            Channel::Vertical => write!(f, "vertical"),
        }
    }
}

/// Capture state of a guidance channel. Capture is sticky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelMode {
    #[default]
    Acquiring,
    Tracking,
}

impl ChannelMode {
    /// Next mode given the current deviation; there is no way back to acquiring.
    pub fn advance(self, deviation: f64, capture_threshold: f64) -> Self {
        match self {
            ChannelMode::Acquiring if deviation.abs() < capture_threshold => ChannelMode::Tracking,
            mode => mode,
        }
    }

    pub fn is_tracking(self) -> bool {
        self == ChannelMode::Tracking
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelModes {
    pub lateral: ChannelMode,
    pub vertical: ChannelMode,
}

impl ChannelModes {
    pub fn get(&self, channel: Channel) -> ChannelMode {
        match channel {
            Channel::Lateral => self.lateral,
            Channel::Vertical => self.vertical,
        }
    }
}

/// Result of evaluating one channel for one step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChannelOutput {
    pub mode: ChannelMode,
    /// Signed deviation: right of course, or above the glideslope [m]
    pub deviation: f64,
    pub deviation_rate: f64,
    /// Clamped correction [rad]
    pub correction: f64,
    /// True when the raw correction exceeded the mode's limit
    pub saturated: bool,
}

/// Commanded flight-path corrections for one step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GuidanceCommand {
    pub lateral: ChannelOutput,
    pub vertical: ChannelOutput,
    /// Commanded heading relative to the runway course [rad]
    pub heading: f64,
    /// Commanded flight-path angle [rad]
    pub flight_path_angle: f64,
}

impl GuidanceCommand {
    pub fn modes(&self) -> ChannelModes {
        ChannelModes {
            lateral: self.lateral.mode,
            vertical: self.vertical.mode,
        }
    }

    pub fn channel(&self, channel: Channel) -> &ChannelOutput {
        match channel {
            Channel::Lateral => &self.lateral,
            Channel::Vertical => &self.vertical,
        }
    }
}
