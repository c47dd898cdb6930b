use serde::{Deserialize, Serialize};

use crate::rendering::RenderError;

/// Frame and export settings for the cockpit view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Horizontal field of view [deg]
    pub fov_deg: f64,
    /// Render every n-th trajectory sample
    pub frame_stride: usize,
    /// Display time of one GIF frame [ms]
    pub frame_delay_ms: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fov_deg: 50.0,
            frame_stride: 10,
            frame_delay_ms: 100,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width < 16 || self.height < 16 {
            return Err(RenderError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.fov_deg > 1.0 && self.fov_deg < 170.0) {
            return Err(RenderError::Config(format!(
                "field of view {} deg outside (1, 170)",
                self.fov_deg
            )));
        }
        if self.frame_stride == 0 {
            return Err(RenderError::Config("frame_stride must be >= 1".into()));
        }
        Ok(())
    }

    pub fn with_stride(mut self, frame_stride: usize) -> Self {
        self.frame_stride = frame_stride.max(1);
        self
    }
}

/// Colour of one PAPI light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PapiLight {
    White,
    Red,
}
