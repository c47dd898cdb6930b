use crate::components::{AircraftState, GuidancePath};

/// Height above the glideslope and its rate, positive above the path.
///
/// The rate removes the descent the path itself demands at the current ground speed,
/// so an aircraft flying exactly down the slope sees a zero rate.
pub fn vertical_deviation(path: &GuidancePath, state: &AircraftState) -> (f64, f64) {
    let x = state.along_track();
    let deviation = state.altitude() - path.nominal_altitude(x);
    let rate = state.ground_velocity.z - path.nominal_altitude_rate(x, state.ground_velocity.x);
    (deviation, rate)
}
