pub mod simulation;
pub mod wind;

pub use simulation::{InitialStateConfig, SimulationConfig, TimingConfig};
pub use wind::{GustConfig, WindConfig};
