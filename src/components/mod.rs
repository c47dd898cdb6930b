pub mod aircraft;
pub mod guidance;
pub mod termination;
pub mod trajectory;
pub mod wind;

pub use aircraft::{AircraftConfig, AircraftLimits, AircraftState, ResponseModel, SpeedModel};
pub use guidance::{
    ApproachConfig, Channel, ChannelConfig, ChannelGains, ChannelMode, ChannelModes,
    ChannelOutput, GuidanceCommand, GuidanceConfig, GuidanceGains, GuidancePath,
};
pub use termination::{AbortReason, RunStatus, SafetyConfig, TerminalState};
pub use trajectory::{EventKind, SimEvent, Trajectory, TrajectorySample};
pub use wind::WindSample;
