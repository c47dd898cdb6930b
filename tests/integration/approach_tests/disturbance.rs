use approx::assert_relative_eq;
use glidepath::resources::{GustConfig, WindConfig};
use glidepath::systems::WindModel;
use glidepath::ApproachMetrics;

use crate::common::{baseline_config, gusty_config, run, steady_wind_config};

#[test]
fn test_same_seed_same_trajectory() {
    let first = run(&gusty_config(21));
    let second = run(&gusty_config(21));
    assert_eq!(first, second);

    let other = run(&gusty_config(22));
    assert_ne!(first.trajectory, other.trajectory);
}

#[test]
fn test_crosswind_leaves_standing_offset() {
    // Wind from the right pushes the aircraft left; the PD law balances it off-center.
    let config = steady_wind_config(5.0, 90.0);
    let outcome = run(&config);
    assert!(outcome.landed());

    let gains = &config.guidance.lateral;
    let expected = -5.0 / (config.aircraft.nominal_speed * gains.kp);
    let touchdown = outcome.touchdown().unwrap();
    assert_relative_eq!(touchdown.cross_track(), expected, epsilon = 1.0);
}

#[test]
fn test_headwind_lengthens_approach() {
    let calm = baseline_config();
    let windy = steady_wind_config(10.0, 0.0);

    let calm_metrics = ApproachMetrics::from_outcome(&run(&calm), &calm);
    let windy_metrics = ApproachMetrics::from_outcome(&run(&windy), &windy);

    assert!(windy_metrics.terminal.is_landed());
    assert!(windy_metrics.flight_time > calm_metrics.flight_time);
}

#[test]
fn test_recorded_gusts_stay_bounded() {
    let outcome = run(&gusty_config(3));
    for sample in outcome.trajectory.samples() {
        assert!(sample.wind.gust.x.abs() <= 2.5);
        assert!(sample.wind.gust.y.abs() <= 2.5);
    }
}

#[test]
fn test_perlin_turbulence_reproducible() {
    let config = WindConfig {
        speed: 0.0,
        direction_deg: 0.0,
        seed: 99,
        gust: GustConfig::Perlin {
            intensity: 3.0,
            time_scale: 5.0,
        },
    };
    let mut a = WindModel::new(&config);
    let mut b = WindModel::new(&config);
    let mut moved = false;
    for i in 0..200 {
        let t = i as f64 * 0.05;
        let (sa, sb) = (a.sample(t), b.sample(t));
        assert_eq!(sa, sb);
        moved |= sa.gust.norm() > 1e-6;
    }
    assert!(moved);
}
