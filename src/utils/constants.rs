pub const GRAVITY: f64 = 9.80665; // m/s^2

// Numerical floors
pub const MIN_TURN_SPEED: f64 = 1.0; // m/s, airspeed floor when converting turn rate <-> bank
pub const MIN_ANGULAR_DISTANCE: f64 = 200.0; // m, distance floor for angular deviations

// Trajectory samples reserved up front; longer runs grow the buffer
pub const MAX_RESERVED_SAMPLES: usize = 8192;

// Stabilized approach gate
pub const STABILIZED_GATE_HEIGHT: f64 = 150.0; // m
pub const STABILIZED_MAX_LATERAL: f64 = 5.0; // m
pub const STABILIZED_MAX_SPEED_ERROR: f64 = 10.0; // m/s

// PAPI light transition offsets from the glideslope angle (degrees)
pub const PAPI_OFFSETS_DEG: [f64; 4] = [-0.5, -0.2, 0.2, 0.5];
