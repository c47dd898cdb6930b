use glidepath::components::GuidancePath;
use glidepath::rendering::{
    read_outcome_json, write_gif, write_outcome_json, write_png_sequence, write_profile_png,
    CockpitRenderer, RenderConfig,
};
use glidepath::ApproachMetrics;
use tempfile::tempdir;

use crate::common::{baseline_config, offset_config, run};

fn renderer(stride: usize) -> CockpitRenderer {
    let config = RenderConfig {
        width: 160,
        height: 120,
        ..Default::default()
    }
    .with_stride(stride);
    CockpitRenderer::new(config, GuidancePath::default()).unwrap()
}

#[test]
fn test_trajectory_json_round_trip() {
    let outcome = run(&baseline_config());
    let dir = tempdir().unwrap();
    let path = dir.path().join("trajectory.json");

    write_outcome_json(&outcome, &path).unwrap();
    let restored = read_outcome_json(&path).unwrap();

    assert_eq!(restored.terminal, outcome.terminal);
    assert_eq!(restored.trajectory.len(), outcome.trajectory.len());
    assert_eq!(
        restored.trajectory.events().len(),
        outcome.trajectory.events().len()
    );
}

#[test]
fn test_metrics_json_fields() {
    let config = baseline_config();
    let metrics = ApproachMetrics::from_outcome(&run(&config), &config);
    let value: serde_json::Value = serde_json::from_str(&metrics.to_json().unwrap()).unwrap();

    for key in [
        "terminal",
        "flight_time",
        "touchdown",
        "lateral_capture_time",
        "vertical_capture_time",
        "lateral_rms",
        "vertical_rms",
        "vertical_angular_rms_deg",
        "max_descent_rate",
        "saturation_events",
        "stabilized",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn test_frames_cover_whole_approach() {
    let outcome = run(&baseline_config());
    let dir = tempdir().unwrap();
    let stride = 200;

    let written = write_png_sequence(&renderer(stride), &outcome.trajectory, dir.path()).unwrap();
    let expected = (outcome.trajectory.len() - 1) / stride + 1;
    let expected = if (outcome.trajectory.len() - 1) % stride == 0 {
        expected
    } else {
        expected + 1
    };
    assert_eq!(written.len(), expected);
    assert!(written.last().unwrap().ends_with(format!("frame_{:05}.png", expected - 1)));
}

#[test]
fn test_gif_written() {
    let mut config = baseline_config();
    config.simulation.max_duration = 3.0;
    let outcome = run(&config);
    let dir = tempdir().unwrap();
    let path = dir.path().join("approach.gif");

    let frames = write_gif(&renderer(15), &outcome.trajectory, &path).unwrap();
    assert_eq!(frames, 5);
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn test_profile_plot_of_offset_approach() {
    let config = offset_config(150.0);
    let outcome = run(&config);
    let dir = tempdir().unwrap();
    let path = dir.path().join("profile.png");

    write_profile_png(
        &outcome.trajectory,
        &GuidancePath::from_config(&config.approach),
        &RenderConfig {
            width: 400,
            height: 300,
            ..Default::default()
        },
        &path,
    )
    .unwrap();

    let image = image::open(&path).unwrap();
    assert_eq!((image.width(), image.height()), (400, 300));
}
