use crate::components::AircraftState;

/// Cross-track deviation from the localizer course and its rate.
///
/// The course is the runway centerline, so the deviation is the runway-frame `y`
/// (positive right) and the rate is the lateral ground speed.
pub fn lateral_deviation(state: &AircraftState) -> (f64, f64) {
    (state.cross_track(), state.ground_velocity.y)
}
