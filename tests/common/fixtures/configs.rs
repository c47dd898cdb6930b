use glidepath::resources::{GustConfig, SimulationConfig};

/// Straight-in approach: 5000 m out, 500 m up, on the centerline, calm air
pub fn baseline_config() -> SimulationConfig {
    SimulationConfig::default()
}

/// Baseline with the aircraft displaced sideways
pub fn offset_config(lateral_offset: f64) -> SimulationConfig {
    let mut config = baseline_config();
    config.initial_state.y = lateral_offset;
    config
}

/// Baseline started exactly on the glideslope
pub fn on_slope_config() -> SimulationConfig {
    let mut config = baseline_config();
    let x = config.initial_state.x;
    config.initial_state.h = -x * config.approach.glideslope_deg.to_radians().tan();
    config
}

/// Baseline in a steady wind from `direction_deg`
pub fn steady_wind_config(speed: f64, direction_deg: f64) -> SimulationConfig {
    let mut config = baseline_config();
    config.wind.speed = speed;
    config.wind.direction_deg = direction_deg;
    config
}

/// Quartering wind with random gusts
pub fn gusty_config(seed: u64) -> SimulationConfig {
    let mut config = steady_wind_config(5.0, 45.0);
    config.wind.seed = seed;
    config.wind.gust = GustConfig::Random {
        intensity: 2.5,
        time_scale: 3.0,
    };
    config
}

pub const MINIMAL_YAML: &str = r#"
simulation:
  dt: 0.1
  max_duration: 150.0
approach:
  glideslope_deg: 3.0
  runway_length: 2500.0
  runway_width: 45.0
aircraft:
  nominal_speed: 65.0
  max_bank_deg: 25.0
  gamma_min_deg: -10.0
  gamma_max_deg: 5.0
  max_flight_path_rate_deg_s: 3.0
guidance:
  lateral:
    kp: 0.004
    kd: 0.004
    capture_threshold: 25.0
    acquire_limit_deg: 30.0
    track_limit_deg: 10.0
  vertical:
    kp: 0.004
    kd: 0.002
    capture_threshold: 10.0
    acquire_limit_deg: 4.0
    track_limit_deg: 2.0
wind:
  speed: 3.0
  direction_deg: 20.0
  seed: 5
safety:
  max_lateral_deviation: 1000.0
  max_descent_rate: 12.0
initial_state:
  x: -4000.0
  y: 0.0
  h: 300.0
  heading_deg: 0.0
  flight_path_angle_deg: -3.0
"#;
