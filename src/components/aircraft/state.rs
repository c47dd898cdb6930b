use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Point-mass state of the aircraft in the runway frame.
///
/// The runway frame has its origin on the centerline at the threshold, `x` along the
/// landing direction (negative on approach), `y` to the right of the centerline and
/// `z` up. Angles are radians relative to the runway course.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftState {
    /// Position `(x, y, altitude)` [m]
    pub position: Vector3<f64>,
    /// Speed along the air-relative velocity vector [m/s], never negative
    pub airspeed: f64,
    /// Heading relative to the runway course, positive to the right [rad]
    pub heading: f64,
    /// Flight-path angle, positive climbing [rad]
    pub flight_path_angle: f64,
    /// Coordinated-turn bank equivalent of the current turn rate [rad]
    pub bank_angle: f64,
    /// Ground-relative velocity, air velocity plus wind [m/s]
    pub ground_velocity: Vector3<f64>,
    /// Elapsed time since the start of the approach [s]
    pub time: f64,
}

impl Default for AircraftState {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            airspeed: 0.0,
            heading: 0.0,
            flight_path_angle: 0.0,
            bank_angle: 0.0,
            ground_velocity: Vector3::zeros(),
            time: 0.0,
        }
    }
}

impl AircraftState {
    /// Create a state with the ground velocity of still air.
    pub fn new(position: Vector3<f64>, airspeed: f64, heading: f64, flight_path_angle: f64) -> Self {
        Self {
            position,
            airspeed,
            heading,
            flight_path_angle,
            bank_angle: 0.0,
            ground_velocity: Self::air_velocity(airspeed, heading, flight_path_angle),
            time: 0.0,
        }
    }

    /// Air-relative velocity for the given speed and kinematic angles.
    pub fn air_velocity(airspeed: f64, heading: f64, flight_path_angle: f64) -> Vector3<f64> {
        let (sin_gamma, cos_gamma) = flight_path_angle.sin_cos();
        let (sin_psi, cos_psi) = heading.sin_cos();
        Vector3::new(
            airspeed * cos_gamma * cos_psi,
            airspeed * cos_gamma * sin_psi,
            airspeed * sin_gamma,
        )
    }

    pub fn along_track(&self) -> f64 {
        self.position.x
    }

    /// Signed cross-track offset, positive right of the centerline [m]
    pub fn cross_track(&self) -> f64 {
        self.position.y
    }

    pub fn altitude(&self) -> f64 {
        self.position.z
    }

    /// Distance still to fly to the threshold, negative once past it [m]
    pub fn distance_to_threshold(&self) -> f64 {
        -self.position.x
    }

    /// Rate of descent, positive when descending [m/s]
    pub fn descent_rate(&self) -> f64 {
        -self.ground_velocity.z
    }
}
