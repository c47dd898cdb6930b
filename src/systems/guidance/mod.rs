mod glideslope;
mod localizer;

pub use glideslope::vertical_deviation;
pub use localizer::lateral_deviation;

use crate::components::{
    AircraftState, ChannelGains, ChannelMode, ChannelModes, ChannelOutput, GuidanceCommand,
    GuidanceGains, GuidancePath,
};
use crate::utils::saturate;

/// Localizer and glideslope tracking law.
///
/// Stateless: the channel modes are passed in and handed back in the command, so
/// the runner owns the only mutable guidance state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuidanceLaw {
    path: GuidancePath,
    gains: GuidanceGains,
}

impl GuidanceLaw {
    pub fn new(path: GuidancePath, gains: GuidanceGains) -> Self {
        Self { path, gains }
    }

    pub fn path(&self) -> &GuidancePath {
        &self.path
    }

    pub fn gains(&self) -> &GuidanceGains {
        &self.gains
    }

    /// Evaluate both channels for `state`, starting from the modes of the last step.
    pub fn compute(&self, state: &AircraftState, modes: ChannelModes) -> GuidanceCommand {
        let (lateral_dev, lateral_rate) = lateral_deviation(state);
        let lateral = evaluate_channel(&self.gains.lateral, modes.lateral, lateral_dev, lateral_rate);

        let (vertical_dev, vertical_rate) = vertical_deviation(&self.path, state);
        let vertical = evaluate_channel(
            &self.gains.vertical,
            modes.vertical,
            vertical_dev,
            vertical_rate,
        );

        GuidanceCommand {
            lateral,
            vertical,
            heading: lateral.correction,
            flight_path_angle: -self.path.glideslope_angle + vertical.correction,
        }
    }
}

/// Mode update followed by the clamped PD correction of one channel.
///
/// The capture check runs first, so the capturing step already uses the tracking limit.
pub fn evaluate_channel(
    gains: &ChannelGains,
    mode: ChannelMode,
    deviation: f64,
    deviation_rate: f64,
) -> ChannelOutput {
    let mode = mode.advance(deviation, gains.capture_threshold);
    let raw = -gains.kp * deviation - gains.kd * deviation_rate;
    let (correction, saturated) = saturate(raw, gains.limit(mode));

    ChannelOutput {
        mode,
        deviation,
        deviation_rate,
        correction,
        saturated,
    }
}
