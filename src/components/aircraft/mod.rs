pub mod config;
pub mod state;

pub use config::{AircraftConfig, AircraftLimits, ResponseModel, SpeedModel};
pub use state::AircraftState;
