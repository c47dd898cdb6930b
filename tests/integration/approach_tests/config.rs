use glidepath::resources::{ConfigError, GustConfig};
use glidepath::components::{ResponseModel, SpeedModel};
use glidepath::SimulationConfig;
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use crate::common::{run, write_temp_yaml, MINIMAL_YAML};

fn repo_config(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("configs")
        .join(name)
}

#[test]
fn test_baseline_file_matches_defaults() {
    let loaded = SimulationConfig::load(repo_config("baseline.yaml")).unwrap();
    let defaults = SimulationConfig::default();

    assert_eq!(loaded.max_steps(), defaults.max_steps());
    assert_eq!(loaded.initial_state(), defaults.initial_state());
    assert_eq!(loaded.aircraft.response, ResponseModel::default());
    assert_eq!(run(&loaded), run(&defaults));
}

#[test]
fn test_gusty_crosswind_file_lands() {
    let config = SimulationConfig::load(repo_config("gusty_crosswind.yaml")).unwrap();
    assert!(matches!(config.wind.gust, GustConfig::Random { .. }));
    assert!(matches!(config.aircraft.speed, SpeedModel::Energy { .. }));

    let outcome = run(&config);
    assert!(outcome.landed(), "ended {}", outcome.terminal);
}

#[test]
fn test_optional_sections_default() {
    let file = write_temp_yaml(MINIMAL_YAML);
    let config = SimulationConfig::load(file.path()).unwrap();

    assert_eq!(config.wind.gust, GustConfig::None);
    assert_eq!(config.aircraft.speed, SpeedModel::Constant);
    assert_eq!(config.approach.threshold_crossing_height, 0.0);
    assert_eq!(config.initial_state().airspeed, 65.0);
    assert_eq!(config.max_steps(), 1500);
}

#[test]
fn test_missing_section_rejected() {
    let yaml = MINIMAL_YAML.replace("safety:", "unused:");
    let file = write_temp_yaml(&yaml);
    let err = SimulationConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::YamlError(_)), "got {err}");
}

#[test]
fn test_invalid_values_name_the_field() {
    let cases = [
        ("dt: 0.1", "dt: 0.0", "simulation.dt"),
        ("glideslope_deg: 3.0", "glideslope_deg: 12.0", "approach.glideslope_deg"),
        ("nominal_speed: 65.0", "nominal_speed: -5.0", "aircraft.nominal_speed"),
        ("speed: 3.0", "speed: -3.0", "wind.speed"),
        ("h: 300.0", "h: -1.0", "initial_state.h"),
    ];
    for (from, to, field) in cases {
        let yaml = MINIMAL_YAML.replacen(from, to, 1);
        let err = SimulationConfig::from_yaml_str(&yaml).unwrap_err();
        match err {
            ConfigError::ValidationError { field: f, .. } => assert_eq!(f, field),
            other => panic!("expected a validation error for {field}, got {other}"),
        }
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let err = SimulationConfig::load("does/not/exist.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::FileError(_)));
}

#[test]
fn test_save_then_load() {
    let mut config = SimulationConfig::default();
    config.wind.gust = GustConfig::Sinusoidal {
        amplitude: 1.5,
        period: 8.0,
    };
    let file = NamedTempFile::new().unwrap();
    config.save(file.path()).unwrap();

    let loaded = SimulationConfig::load(file.path()).unwrap();
    assert_eq!(loaded.wind.gust, config.wind.gust);
    assert_eq!(run(&loaded), run(&config));
}
