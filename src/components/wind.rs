use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Horizontal wind acting on the aircraft for one step, runway frame [m/s].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindSample {
    pub steady: Vector2<f64>,
    pub gust: Vector2<f64>,
}

impl Default for WindSample {
    fn default() -> Self {
        Self::calm()
    }
}

impl WindSample {
    pub fn calm() -> Self {
        Self {
            steady: Vector2::zeros(),
            gust: Vector2::zeros(),
        }
    }

    pub fn total(&self) -> Vector2<f64> {
        self.steady + self.gust
    }

    /// Component along the landing direction, negative for a headwind
    pub fn along_track(&self) -> f64 {
        self.total().x
    }

    /// Component pushing the aircraft to the right of the centerline
    pub fn cross_track(&self) -> f64 {
        self.total().y
    }
}
