use std::path::Path;
use tiny_skia::*;
use tracing::info;

use crate::components::{GuidancePath, Trajectory, TrajectorySample};
use crate::rendering::cockpit::{paint, stroke};
use crate::rendering::{RenderConfig, RenderError};
use crate::utils::{interp, rad_to_deg};

const BACKGROUND: [u8; 3] = [250, 250, 250];
const FRAME: [u8; 3] = [60, 60, 60];
const GRID: [u8; 3] = [215, 215, 215];
const REFERENCE: [u8; 3] = [120, 120, 120];
const TRACK: [u8; 3] = [31, 119, 180];
const ALTITUDE: [u8; 3] = [255, 127, 14];
const SPEED: [u8; 3] = [44, 160, 44];
const BANK: [u8; 3] = [214, 39, 40];
const FLIGHT_PATH: [u8; 3] = [148, 103, 189];

const MARGIN: f32 = 12.0;
const GRID_DIVISIONS: usize = 4;

/// One plot area with its data ranges.
struct Panel {
    rect: Rect,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl Panel {
    fn new(rect: Rect, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            rect,
            x_range: padded(x_range, 0.0),
            y_range: padded(y_range, 0.08),
        }
    }

    fn point(&self, x: f64, y: f64) -> (f32, f32) {
        let (x_lo, x_hi) = self.x_range;
        let (y_lo, y_hi) = self.y_range;
        (
            interp(x, x_lo, x_hi, self.rect.left() as f64, self.rect.right() as f64) as f32,
            interp(y, y_lo, y_hi, self.rect.bottom() as f64, self.rect.top() as f64) as f32,
        )
    }

    fn draw_frame(&self, canvas: &mut Pixmap) {
        let grid = paint(GRID);
        let (left, top) = (self.rect.left(), self.rect.top());
        let (width, height) = (self.rect.width(), self.rect.height());
        let mut pb = PathBuilder::new();
        for i in 1..GRID_DIVISIONS {
            let f = i as f32 / GRID_DIVISIONS as f32;
            pb.move_to(left + f * width, top);
            pb.line_to(left + f * width, top + height);
            pb.move_to(left, top + f * height);
            pb.line_to(left + width, top + f * height);
        }
        if let Some(lines) = pb.finish() {
            canvas.stroke_path(&lines, &grid, &stroke(1.0), Transform::identity(), None);
        }

        let outline = PathBuilder::from_rect(self.rect);
        canvas.stroke_path(&outline, &paint(FRAME), &stroke(1.0), Transform::identity(), None);
    }

    /// Polyline through `points`, clipped to the panel
    fn draw_series<I>(&self, canvas: &mut Pixmap, points: I, color: [u8; 3], width: f32)
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut pb = PathBuilder::new();
        for (i, (x, y)) in points.into_iter().enumerate() {
            let (px, py) = self.point(x, y);
            if i == 0 {
                pb.move_to(px, py);
            } else {
                pb.line_to(px, py);
            }
        }
        let Some(series) = pb.finish() else {
            return;
        };
        let clip = Mask::new(canvas.width(), canvas.height()).map(|mut mask| {
            let area = PathBuilder::from_rect(self.rect);
            mask.fill_path(&area, FillRule::Winding, false, Transform::identity());
            mask
        });
        canvas.stroke_path(
            &series,
            &paint(color),
            &stroke(width),
            Transform::identity(),
            clip.as_ref(),
        );
    }
}

fn padded((lo, hi): (f64, f64), fraction: f64) -> (f64, f64) {
    if hi - lo < 1e-9 {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * fraction;
    (lo - pad, hi + pad)
}

fn range<I: IntoIterator<Item = f64>>(values: I) -> (f64, f64) {
    values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

/// Four time-history panels of a run, laid out in a 2x2 grid.
///
/// Top left is the ground track `y(x)` against the centerline, top right the altitude
/// against the glideslope over `x`, bottom left airspeed over time and bottom right
/// bank and flight-path angle over time.
pub fn render_profile(
    trajectory: &Trajectory,
    path: &GuidancePath,
    config: &RenderConfig,
) -> Result<Pixmap, RenderError> {
    config.validate()?;
    let samples = trajectory.samples();
    if samples.is_empty() {
        return Err(RenderError::EmptyTrajectory);
    }

    let mut canvas = Pixmap::new(config.width, config.height).ok_or(RenderError::Canvas)?;
    canvas.fill(Color::from_rgba8(BACKGROUND[0], BACKGROUND[1], BACKGROUND[2], 255));

    let cell_w = config.width as f32 / 2.0;
    let cell_h = config.height as f32 / 2.0;
    let cell = |col: f32, row: f32| {
        Rect::from_xywh(
            col * cell_w + MARGIN,
            row * cell_h + MARGIN,
            cell_w - 2.0 * MARGIN,
            cell_h - 2.0 * MARGIN,
        )
        .ok_or(RenderError::InvalidSize {
            width: config.width,
            height: config.height,
        })
    };

    let along = |s: &TrajectorySample| s.state.along_track();
    let time = |s: &TrajectorySample| s.state.time;
    let x_range = range(samples.iter().map(along));
    let t_range = range(samples.iter().map(time));

    // Ground track
    let track = Panel::new(
        cell(0.0, 0.0)?,
        x_range,
        range(samples.iter().map(|s| s.state.cross_track()).chain([0.0])),
    );
    track.draw_frame(&mut canvas);
    track.draw_series(&mut canvas, [(x_range.0, 0.0), (x_range.1, 0.0)], REFERENCE, 1.5);
    track.draw_series(
        &mut canvas,
        samples.iter().map(|s| (along(s), s.state.cross_track())),
        TRACK,
        2.0,
    );

    // Glideslope tracking
    let nominal = |x: f64| path.nominal_altitude(x);
    let vertical = Panel::new(
        cell(1.0, 0.0)?,
        x_range,
        range(
            samples
                .iter()
                .flat_map(|s| [s.state.altitude(), nominal(along(s))]),
        ),
    );
    vertical.draw_frame(&mut canvas);
    vertical.draw_series(
        &mut canvas,
        samples.iter().map(|s| (along(s), nominal(along(s)))),
        REFERENCE,
        1.5,
    );
    vertical.draw_series(
        &mut canvas,
        samples.iter().map(|s| (along(s), s.state.altitude())),
        ALTITUDE,
        2.0,
    );

    let speed = Panel::new(
        cell(0.0, 1.0)?,
        t_range,
        range(samples.iter().map(|s| s.state.airspeed)),
    );
    speed.draw_frame(&mut canvas);
    speed.draw_series(
        &mut canvas,
        samples.iter().map(|s| (time(s), s.state.airspeed)),
        SPEED,
        2.0,
    );

    let angles = Panel::new(
        cell(1.0, 1.0)?,
        t_range,
        range(samples.iter().flat_map(|s| {
            [
                rad_to_deg(s.state.bank_angle),
                rad_to_deg(s.state.flight_path_angle),
            ]
        })),
    );
    angles.draw_frame(&mut canvas);
    angles.draw_series(
        &mut canvas,
        samples
            .iter()
            .map(|s| (time(s), rad_to_deg(s.state.bank_angle))),
        BANK,
        2.0,
    );
    angles.draw_series(
        &mut canvas,
        samples
            .iter()
            .map(|s| (time(s), rad_to_deg(s.state.flight_path_angle))),
        FLIGHT_PATH,
        2.0,
    );

    Ok(canvas)
}

/// Render the profile panels of a run and save them as one PNG.
pub fn write_profile_png(
    trajectory: &Trajectory,
    path: &GuidancePath,
    config: &RenderConfig,
    file: &Path,
) -> Result<(), RenderError> {
    let pixmap = render_profile(trajectory, path, config)?;
    pixmap
        .save_png(file)
        .map_err(|e| RenderError::Png(e.to_string()))?;
    info!("Wrote approach profile to {}", file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::SimulationConfig;
    use crate::systems::run_simulation;
    use tempfile::tempdir;

    fn baseline() -> (Trajectory, GuidancePath) {
        let config = SimulationConfig::default();
        let outcome = run_simulation(&config).unwrap();
        (
            outcome.trajectory,
            GuidancePath::from_config(&config.approach),
        )
    }

    /// Pixels within a few levels of `color`, allowing for edge coverage
    fn count_color(canvas: &Pixmap, color: [u8; 3]) -> usize {
        canvas
            .pixels()
            .iter()
            .map(|p| p.demultiply())
            .filter(|c| {
                [c.red(), c.green(), c.blue()]
                    .iter()
                    .zip(color)
                    .all(|(&a, b)| a.abs_diff(b) <= 8)
            })
            .count()
    }

    #[test]
    fn test_profile_draws_every_series() {
        let (trajectory, path) = baseline();
        let canvas = render_profile(&trajectory, &path, &RenderConfig::default()).unwrap();

        assert_eq!((canvas.width(), canvas.height()), (640, 480));
        assert!(count_color(&canvas, BACKGROUND) > 0);
        for color in [TRACK, ALTITUDE, SPEED, BANK, FLIGHT_PATH, REFERENCE] {
            assert!(count_color(&canvas, color) > 0, "missing series {color:?}");
        }
    }

    #[test]
    fn test_series_stays_inside_panel() {
        let (trajectory, path) = baseline();
        let canvas = render_profile(&trajectory, &path, &RenderConfig::default()).unwrap();

        // Gutter between the two columns
        for y in 0..canvas.height() {
            for x in 318..322 {
                let c = canvas.pixel(x, y).map(|p| p.demultiply());
                let rgb = c.map(|c| [c.red(), c.green(), c.blue()]);
                assert_eq!(rgb, Some(BACKGROUND), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_empty_trajectory_rejected() {
        let result = render_profile(
            &Trajectory::default(),
            &GuidancePath::default(),
            &RenderConfig::default(),
        );
        assert!(matches!(result, Err(RenderError::EmptyTrajectory)));
    }

    #[test]
    fn test_profile_png_written() {
        let (trajectory, path) = baseline();
        let dir = tempdir().unwrap();
        let file = dir.path().join("profile.png");
        let config = RenderConfig {
            width: 320,
            height: 240,
            ..Default::default()
        };
        write_profile_png(&trajectory, &path, &config, &file).unwrap();

        let image = image::open(&file).unwrap();
        assert_eq!((image.width(), image.height()), (320, 240));
    }
}
