use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tiny_skia::Pixmap;
use tracing::info;

use crate::components::Trajectory;
use crate::rendering::{CockpitRenderer, RenderError};
use crate::systems::SimulationOutcome;

/// Straight (non-premultiplied) RGBA copy of a frame
pub fn to_rgba_image(pixmap: &Pixmap) -> Result<RgbaImage, RenderError> {
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data).ok_or(RenderError::Canvas)
}

fn frame_indices(trajectory: &Trajectory, stride: usize) -> Result<Vec<usize>, RenderError> {
    if trajectory.is_empty() {
        return Err(RenderError::EmptyTrajectory);
    }
    let last = trajectory.len() - 1;
    let mut indices: Vec<usize> = (0..=last).step_by(stride.max(1)).collect();
    // Always end on the terminal sample
    if indices.last() != Some(&last) {
        indices.push(last);
    }
    Ok(indices)
}

/// Write `frame_00000.png`, `frame_00001.png`, ... into `dir`.
pub fn write_png_sequence(
    renderer: &CockpitRenderer,
    trajectory: &Trajectory,
    dir: &Path,
) -> Result<Vec<PathBuf>, RenderError> {
    fs::create_dir_all(dir)?;
    let samples = trajectory.samples();

    let mut written = Vec::new();
    for (frame, index) in frame_indices(trajectory, renderer.config().frame_stride)?
        .into_iter()
        .enumerate()
    {
        let pixmap = renderer.render(&samples[index].state)?;
        let path = dir.join(format!("frame_{frame:05}.png"));
        pixmap
            .save_png(&path)
            .map_err(|e| RenderError::Png(e.to_string()))?;
        written.push(path);
    }

    info!("Wrote {} frames to {}", written.len(), dir.display());
    Ok(written)
}

/// Encode the cockpit view of the whole trajectory as a looping animated GIF.
pub fn write_gif(
    renderer: &CockpitRenderer,
    trajectory: &Trajectory,
    path: &Path,
) -> Result<usize, RenderError> {
    let samples = trajectory.samples();
    let indices = frame_indices(trajectory, renderer.config().frame_stride)?;
    let delay = Delay::from_numer_denom_ms(renderer.config().frame_delay_ms, 1);

    let mut encoder = GifEncoder::new(BufWriter::new(File::create(path)?));
    encoder.set_repeat(Repeat::Infinite)?;
    for &index in &indices {
        let image = to_rgba_image(&renderer.render(&samples[index].state)?)?;
        encoder.encode_frame(Frame::from_parts(image, 0, 0, delay))?;
    }

    info!("Wrote {} GIF frames to {}", indices.len(), path.display());
    Ok(indices.len())
}

pub fn write_outcome_json(outcome: &SimulationOutcome, path: &Path) -> Result<(), RenderError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, outcome)?;
    Ok(())
}

pub fn read_outcome_json(path: &Path) -> Result<SimulationOutcome, RenderError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
