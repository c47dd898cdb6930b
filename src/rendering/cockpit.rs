use nalgebra::Vector3;
use tiny_skia::*;

use crate::components::{AircraftState, GuidancePath};
use crate::rendering::{PapiLight, RenderConfig, RenderError};
use crate::utils::{deg_to_rad, interp, rad_to_deg, PAPI_OFFSETS_DEG};

const SKY: [u8; 3] = [92, 148, 214];
const GROUND: [u8; 3] = [104, 92, 66];
const RUNWAY: [u8; 3] = [58, 58, 62];
const MARKING: [u8; 3] = [235, 235, 235];
const SYMBOL: [u8; 3] = [255, 210, 0];
const NEEDLE: [u8; 3] = [220, 60, 220];
const PAPI_WHITE: [u8; 3] = [250, 250, 250];
const PAPI_RED: [u8; 3] = [230, 30, 30];

/// Closest runway point still drawn, ahead of the eye [m]
const NEAR_CLIP: f64 = 5.0;
const CENTERLINE_SPACING: f64 = 100.0;
const CENTERLINE_DASH: f64 = 36.0;
/// Needle full-scale deflection [deg]
const LOCALIZER_FULL_SCALE_DEG: f64 = 2.5;
const GLIDESLOPE_FULL_SCALE_DEG: f64 = 0.7;

/// Which PAPI lights show white for the aircraft's elevation angle, left to right.
///
/// Light `i` turns white once the elevation angle exceeds the glideslope angle plus
/// its transition offset, so an aircraft on the slope sees two white and two red.
pub fn papi_indication(path: &GuidancePath, state: &AircraftState) -> [PapiLight; 4] {
    let elevation = rad_to_deg(path.elevation_angle(state));
    let glideslope = rad_to_deg(path.glideslope_angle);
    PAPI_OFFSETS_DEG.map(|offset| {
        if elevation > glideslope + offset {
            PapiLight::White
        } else {
            PapiLight::Red
        }
    })
}

/// Angle off the localizer course seen from the antenna at the far runway end [rad]
pub fn localizer_angle(path: &GuidancePath, state: &AircraftState) -> f64 {
    let distance = (path.runway_length - state.along_track()).max(1.0);
    state.cross_track().atan2(distance)
}

pub(super) fn paint(color: [u8; 3]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], 255);
    paint.anti_alias = true;
    paint
}

fn polygon(points: &[(f32, f32)]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.0, first.1);
    for p in rest {
        pb.line_to(p.0, p.1);
    }
    pb.close();
    pb.finish()
}

fn line(from: (f32, f32), to: (f32, f32)) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(from.0, from.1);
    pb.line_to(to.0, to.1);
    pb.finish()
}

pub(super) fn stroke(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        ..Stroke::default()
    }
}

/// Pinhole eye at the aircraft, looking down the flight path and rolled with the bank.
struct Camera {
    origin: Vector3<f64>,
    forward: Vector3<f64>,
    right: Vector3<f64>,
    up: Vector3<f64>,
    flight_path_angle: f64,
    roll: f64,
    focal: f64,
    center: (f64, f64),
}

impl Camera {
    fn new(state: &AircraftState, focal: f64, width: u32, height: u32) -> Self {
        let (sin_psi, cos_psi) = state.heading.sin_cos();
        let (sin_gamma, cos_gamma) = state.flight_path_angle.sin_cos();
        let forward = Vector3::new(cos_gamma * cos_psi, cos_gamma * sin_psi, sin_gamma);
        let right = Vector3::new(-sin_psi, cos_psi, 0.0);
        Self {
            origin: state.position,
            forward,
            right,
            up: forward.cross(&right),
            flight_path_angle: state.flight_path_angle,
            roll: state.bank_angle,
            focal,
            center: (width as f64 / 2.0, height as f64 / 2.0),
        }
    }

    /// Image-plane coordinates (up positive) to pixels, rotated by the roll angle
    fn to_screen(&self, u: f64, v: f64) -> (f32, f32) {
        let (sin_phi, cos_phi) = self.roll.sin_cos();
        let u_rolled = u * cos_phi + v * sin_phi;
        let v_rolled = -u * sin_phi + v * cos_phi;
        (
            (self.center.0 + u_rolled) as f32,
            (self.center.1 - v_rolled) as f32,
        )
    }

    /// Pixel position of a runway-frame point, `None` behind the near plane
    fn project(&self, point: &Vector3<f64>) -> Option<(f32, f32)> {
        let relative = point - self.origin;
        let depth = relative.dot(&self.forward);
        if depth < 1.0 {
            return None;
        }
        Some(self.to_screen(
            self.focal * relative.dot(&self.right) / depth,
            self.focal * relative.dot(&self.up) / depth,
        ))
    }

    /// Height of the horizon line above the image centre before roll [px]
    fn horizon_height(&self) -> f64 {
        -self.focal * self.flight_path_angle.tan()
    }
}

/// Out-the-window view with ILS needles and a PAPI bar, drawn with tiny-skia.
pub struct CockpitRenderer {
    config: RenderConfig,
    path: GuidancePath,
    focal: f64,
}

impl CockpitRenderer {
    pub fn new(config: RenderConfig, path: GuidancePath) -> Result<Self, RenderError> {
        config.validate()?;
        let focal = (config.width as f64 / 2.0) / (deg_to_rad(config.fov_deg) / 2.0).tan();
        Ok(Self {
            config,
            path,
            focal,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn render(&self, state: &AircraftState) -> Result<Pixmap, RenderError> {
        let mut canvas = self.create_canvas()?;
        let camera = Camera::new(state, self.focal, self.config.width, self.config.height);

        self.draw_ground(&mut canvas, &camera);
        self.draw_runway(&mut canvas, &camera);
        self.draw_aircraft_symbol(&mut canvas);
        self.draw_ils(&mut canvas, state);
        self.draw_papi(&mut canvas, state);

        Ok(canvas)
    }

    fn create_canvas(&self) -> Result<Pixmap, RenderError> {
        let mut canvas =
            Pixmap::new(self.config.width, self.config.height).ok_or(RenderError::Canvas)?;
        canvas.fill(Color::from_rgba8(SKY[0], SKY[1], SKY[2], 255));
        Ok(canvas)
    }

    fn draw_ground(&self, canvas: &mut Pixmap, camera: &Camera) {
        // Half-plane below the horizon, wide enough to cover any roll
        let extent = 4.0 * (self.config.width + self.config.height) as f64;
        let horizon = camera.horizon_height();
        let corners = [
            camera.to_screen(-extent, horizon),
            camera.to_screen(extent, horizon),
            camera.to_screen(extent, horizon - extent),
            camera.to_screen(-extent, horizon - extent),
        ];
        if let Some(ground) = polygon(&corners) {
            canvas.fill_path(
                &ground,
                &paint(GROUND),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn draw_runway(&self, canvas: &mut Pixmap, camera: &Camera) {
        let near = self.path.runway_length.min(0.0_f64.max(camera.origin.x + NEAR_CLIP));
        let far = self.path.runway_length;
        if near >= far {
            return;
        }
        let half_width = self.path.runway_width / 2.0;

        let corners: Option<Vec<_>> = [
            Vector3::new(near, -half_width, 0.0),
            Vector3::new(near, half_width, 0.0),
            Vector3::new(far, half_width, 0.0),
            Vector3::new(far, -half_width, 0.0),
        ]
        .iter()
        .map(|p| camera.project(p))
        .collect();
        let Some(outline) = corners.as_deref().and_then(polygon) else {
            return;
        };
        canvas.fill_path(
            &outline,
            &paint(RUNWAY),
            FillRule::Winding,
            Transform::identity(),
            None,
        );

        let marking = paint(MARKING);
        if near == 0.0 {
            let threshold = camera
                .project(&Vector3::new(0.0, -half_width, 0.0))
                .zip(camera.project(&Vector3::new(0.0, half_width, 0.0)))
                .and_then(|(a, b)| line(a, b));
            if let Some(threshold) = threshold {
                canvas.stroke_path(&threshold, &marking, &stroke(3.0), Transform::identity(), None);
            }
        }

        let mut x = (near / CENTERLINE_SPACING).ceil() * CENTERLINE_SPACING;
        while x + CENTERLINE_DASH <= far {
            let dash = camera
                .project(&Vector3::new(x, 0.0, 0.0))
                .zip(camera.project(&Vector3::new(x + CENTERLINE_DASH, 0.0, 0.0)))
                .and_then(|(a, b)| line(a, b));
            if let Some(dash) = dash {
                canvas.stroke_path(&dash, &marking, &stroke(1.5), Transform::identity(), None);
            }
            x += CENTERLINE_SPACING;
        }
    }

    fn draw_aircraft_symbol(&self, canvas: &mut Pixmap) {
        let cx = self.config.width as f32 / 2.0;
        let cy = self.config.height as f32 / 2.0;
        let span = self.config.width as f32 * 0.06;
        let symbol = paint(SYMBOL);
        for (from, to) in [
            ((cx - 2.0 * span, cy), (cx - span, cy)),
            ((cx - span, cy), (cx - span / 2.0, cy + span / 3.0)),
            ((cx + span, cy), (cx + span / 2.0, cy + span / 3.0)),
            ((cx + span, cy), (cx + 2.0 * span, cy)),
        ] {
            if let Some(segment) = line(from, to) {
                canvas.stroke_path(&segment, &symbol, &stroke(3.0), Transform::identity(), None);
            }
        }
    }

    /// Deviation indicator in the lower right corner, needles fly-to.
    fn draw_ils(&self, canvas: &mut Pixmap, state: &AircraftState) {
        let size = self.config.width.min(self.config.height) as f32 * 0.3;
        let half = size / 2.0;
        let cx = self.config.width as f32 - half - 10.0;
        let cy = self.config.height as f32 - half - 10.0;

        if let Some(rect) = Rect::from_xywh(cx - half, cy - half, size, size) {
            let mut background = Paint::default();
            background.set_color_rgba8(0, 0, 0, 160);
            canvas.fill_rect(rect, &background, Transform::identity(), None);
        }

        let marking = paint(MARKING);
        for dot in [-2.0_f32, -1.0, 1.0, 2.0] {
            let offset = dot * half / 2.5;
            for (x, y) in [(cx + offset, cy), (cx, cy + offset)] {
                if let Some(circle) = PathBuilder::from_circle(x, y, 2.5) {
                    canvas.fill_path(
                        &circle,
                        &marking,
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
            }
        }

        let localizer = interp(
            rad_to_deg(localizer_angle(&self.path, state)),
            -LOCALIZER_FULL_SCALE_DEG,
            LOCALIZER_FULL_SCALE_DEG,
            -1.0,
            1.0,
        ) as f32;
        let glideslope = interp(
            rad_to_deg(self.path.angular_deviation(state)),
            -GLIDESLOPE_FULL_SCALE_DEG,
            GLIDESLOPE_FULL_SCALE_DEG,
            -1.0,
            1.0,
        ) as f32;

        let needle = paint(NEEDLE);
        let lx = cx - localizer * half * 0.8;
        let gy = cy + glideslope * half * 0.8;
        for segment in [
            line((lx, cy - half * 0.9), (lx, cy + half * 0.9)),
            line((cx - half * 0.9, gy), (cx + half * 0.9, gy)),
        ]
        .into_iter()
        .flatten()
        {
            canvas.stroke_path(&segment, &needle, &stroke(2.5), Transform::identity(), None);
        }
    }

    fn draw_papi(&self, canvas: &mut Pixmap, state: &AircraftState) {
        let radius = (self.config.height as f32 * 0.018).max(3.0);
        let spacing = radius * 3.0;
        let y = radius * 2.5;
        for (i, light) in papi_indication(&self.path, state).iter().enumerate() {
            let color = match light {
                PapiLight::White => PAPI_WHITE,
                PapiLight::Red => PAPI_RED,
            };
            let x = radius * 2.5 + i as f32 * spacing;
            if let Some(circle) = PathBuilder::from_circle(x, y, radius) {
                canvas.fill_path(
                    &circle,
                    &paint(color),
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
        }
    }
}
