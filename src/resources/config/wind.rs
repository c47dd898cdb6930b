use serde::{Deserialize, Serialize};

use crate::resources::{require_finite, require_non_negative, require_positive, ConfigError};

/// Time-varying part of the wind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GustConfig {
    None,
    /// Rotating oscillation of fixed amplitude [m/s] and period [s]
    Sinusoidal { amplitude: f64, period: f64 },
    /// First-order filtered uniform noise bounded by `intensity` [m/s]
    Random { intensity: f64, time_scale: f64 },
    /// Coherent Perlin turbulence scaled by `intensity` [m/s]
    Perlin { intensity: f64, time_scale: f64 },
}

impl Default for GustConfig {
    fn default() -> Self {
        GustConfig::None
    }
}

impl GustConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            GustConfig::None => Ok(()),
            GustConfig::Sinusoidal { amplitude, period } => {
                require_non_negative("wind.gust.amplitude", amplitude)?;
                require_positive("wind.gust.period", period)
            }
            GustConfig::Random {
                intensity,
                time_scale,
            }
            | GustConfig::Perlin {
                intensity,
                time_scale,
            } => {
                require_non_negative("wind.gust.intensity", intensity)?;
                require_positive("wind.gust.time_scale", time_scale)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindConfig {
    /// Steady wind speed [m/s]
    pub speed: f64,
    /// Direction the wind blows from, clockwise from the runway course [deg]
    pub direction_deg: f64,
    /// Seed of the gust process
    pub seed: u64,
    #[serde(default)]
    pub gust: GustConfig,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            speed: 0.0,
            direction_deg: 0.0,
            seed: 0,
            gust: GustConfig::None,
        }
    }
}

impl WindConfig {
    pub fn calm() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("wind.speed", self.speed)?;
        require_finite("wind.direction_deg", self.direction_deg)?;
        self.gust.validate()
    }

    pub fn is_calm(&self) -> bool {
        let gusty = match self.gust {
            GustConfig::None => false,
            GustConfig::Sinusoidal { amplitude, .. } => amplitude > 0.0,
            GustConfig::Random { intensity, .. } | GustConfig::Perlin { intensity, .. } => {
                intensity > 0.0
            }
        };
        self.speed == 0.0 && !gusty
    }
}
