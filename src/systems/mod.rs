pub mod batch;
pub mod dynamics;
pub mod guidance;
pub mod metrics;
pub mod runner;
pub mod wind;

pub use batch::{run_batch, BatchReport, BatchRun};
pub use dynamics::StepResult;
pub use guidance::GuidanceLaw;
pub use metrics::{ApproachMetrics, StabilizedGate, TouchdownMetrics};
pub use runner::{run_simulation, Simulation, SimulationOutcome};
pub use wind::WindModel;
