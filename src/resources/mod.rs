pub mod config;
mod errors;

pub use config::{GustConfig, InitialStateConfig, SimulationConfig, TimingConfig, WindConfig};
pub use errors::{require_finite, require_non_negative, require_positive, ConfigError};
