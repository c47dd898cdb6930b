use tracing::warn;

use crate::components::{
    AircraftLimits, AircraftState, GuidanceCommand, ResponseModel, SpeedModel, WindSample,
};
use crate::utils::{wrap_pi, GRAVITY, MIN_TURN_SPEED};

/// New state plus the limits the step ran into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    pub state: AircraftState,
    /// Commanded flight-path angle, when it had to be clamped to the aircraft limits
    pub flight_path_clamped: Option<f64>,
    /// Negative airspeed the speed model produced before clamping to zero
    pub speed_clamped: Option<f64>,
}

/// Advance the point-mass aircraft by one explicit Euler step of `dt` seconds.
///
/// Heading and flight-path angle follow the guidance command through the configured
/// response model, then position integrates the ground velocity (air velocity plus
/// the horizontal wind). Altitude is not clamped here; touchdown is the runner's call.
pub fn step(
    state: &AircraftState,
    command: &GuidanceCommand,
    wind: &WindSample,
    limits: &AircraftLimits,
    dt: f64,
) -> StepResult {
    let gamma_cmd = command
        .flight_path_angle
        .clamp(limits.gamma_min, limits.gamma_max);
    let flight_path_clamped =
        (gamma_cmd != command.flight_path_angle).then_some(command.flight_path_angle);

    let heading_error = wrap_pi(command.heading - state.heading);
    let gamma_error = gamma_cmd - state.flight_path_angle;

    // Rates of the kinematic angles
    let (heading_rate, gamma_rate) = match limits.response {
        ResponseModel::Instantaneous => (heading_error / dt, gamma_error / dt),
        ResponseModel::FirstOrderLag {
            heading_time_constant,
            flight_path_time_constant,
        } => {
            let max_turn_rate =
                GRAVITY * limits.max_bank_angle.tan() / state.airspeed.max(MIN_TURN_SPEED);
            // A step longer than the time constant lands on the command, never past it
            (
                (heading_error / heading_time_constant.max(dt))
                    .clamp(-max_turn_rate, max_turn_rate),
                (gamma_error / flight_path_time_constant.max(dt))
                    .clamp(-limits.max_flight_path_rate, limits.max_flight_path_rate),
            )
        }
    };

    let heading = match limits.response {
        ResponseModel::Instantaneous => command.heading,
        ResponseModel::FirstOrderLag { .. } => wrap_pi(state.heading + heading_rate * dt),
    };
    let flight_path_angle = match limits.response {
        ResponseModel::Instantaneous => gamma_cmd,
        ResponseModel::FirstOrderLag { .. } => state.flight_path_angle + gamma_rate * dt,
    };

    // Speed from the state at the start of the step
    let mut speed_clamped = None;
    let airspeed = match limits.speed {
        SpeedModel::Constant => state.airspeed,
        SpeedModel::Energy {
            reference_speed,
            speed_gain,
            drag_deceleration,
        } => {
            let acceleration = speed_gain * (reference_speed - state.airspeed)
                - drag_deceleration
                - GRAVITY * state.flight_path_angle.sin();
            let unclamped = state.airspeed + acceleration * dt;
            if unclamped < 0.0 {
                warn!(
                    "Airspeed {:.3} m/s below zero at t = {:.2} s, clamping to 0",
                    unclamped, state.time
                );
                speed_clamped = Some(unclamped);
                0.0
            } else {
                unclamped
            }
        }
    };

    let air_velocity = AircraftState::air_velocity(airspeed, heading, flight_path_angle);
    let wind = wind.total();
    let ground_velocity = air_velocity + nalgebra::Vector3::new(wind.x, wind.y, 0.0);

    let next = AircraftState {
        position: state.position + ground_velocity * dt,
        airspeed,
        heading,
        flight_path_angle,
        bank_angle: (airspeed * heading_rate / GRAVITY).atan(),
        ground_velocity,
        time: state.time + dt,
    };

    StepResult {
        state: next,
        flight_path_clamped,
        speed_clamped,
    }
}
