//! Point-mass simulation of an ILS-guided final approach.
//!
//! A run threads the wind model, the localizer/glideslope guidance law and the
//! aircraft dynamics through fixed time steps until the aircraft lands, aborts or
//! times out. Metrics and cockpit rendering consume the finished trajectory.

pub mod components;
pub mod rendering;
pub mod resources;
pub mod systems;
pub mod utils;

pub use components::{AircraftState, GuidanceCommand, TerminalState, Trajectory};
pub use resources::{ConfigError, SimulationConfig};
pub use systems::{run_simulation, ApproachMetrics, Simulation, SimulationOutcome};
