use nalgebra::Vector2;
use noise::{NoiseFn, Perlin};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;
use tracing::debug;

use crate::components::WindSample;
use crate::resources::{GustConfig, WindConfig};
use crate::utils::deg_to_rad;

// Second Perlin row, keeps the two horizontal axes uncorrelated.
const PERLIN_CROSS_ROW: f64 = 57.31;

enum GustProcess {
    None,
    Sinusoidal {
        amplitude: f64,
        omega: f64,
    },
    Random {
        intensity: f64,
        time_scale: f64,
        rng: ChaCha8Rng,
        value: Vector2<f64>,
        last_time: Option<f64>,
    },
    Perlin {
        intensity: f64,
        time_scale: f64,
        noise: Perlin,
    },
}

/// Steady wind plus a gust process, one instance per run.
///
/// The random gust process is the only mutable state: it owns its own `ChaCha8Rng`
/// seeded from the configuration, so equal seeds give equal wind histories.
pub struct WindModel {
    steady: Vector2<f64>,
    gust: GustProcess,
}

impl WindModel {
    pub fn new(config: &WindConfig) -> Self {
        let steady = steady_vector(config.speed, config.direction_deg);
        let gust = match config.gust {
            GustConfig::None => GustProcess::None,
            GustConfig::Sinusoidal { amplitude, period } => GustProcess::Sinusoidal {
                amplitude,
                omega: 2.0 * PI / period,
            },
            GustConfig::Random {
                intensity,
                time_scale,
            } => GustProcess::Random {
                intensity,
                time_scale,
                rng: ChaCha8Rng::seed_from_u64(config.seed),
                value: Vector2::zeros(),
                last_time: None,
            },
            GustConfig::Perlin {
                intensity,
                time_scale,
            } => GustProcess::Perlin {
                intensity,
                time_scale,
                noise: Perlin::new(perlin_seed(config.seed)),
            },
        };
        if config.is_calm() {
            debug!("Wind model: calm air");
        } else {
            debug!(
                "Wind model: steady ({:.2}, {:.2}) m/s, gust {:?}, seed {}",
                steady.x, steady.y, config.gust, config.seed
            );
        }
        Self { steady, gust }
    }

    /// Wind at simulation time `time`. Random gusts advance the internal sequence.
    pub fn sample(&mut self, time: f64) -> WindSample {
        let gust = match &mut self.gust {
            GustProcess::None => Vector2::zeros(),
            GustProcess::Sinusoidal { amplitude, omega } => {
                let phase = *omega * time;
                Vector2::new(*amplitude * phase.sin(), *amplitude * phase.cos())
            }
            GustProcess::Random {
                intensity,
                time_scale,
                rng,
                value,
                last_time,
            } => {
                let elapsed = last_time.map_or(0.0, |last| (time - last).max(0.0));
                let decay = (-elapsed / *time_scale).exp();
                let drive = Vector2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
                // Convex blend of the old value and a bounded draw stays within the bound.
                *value = *value * decay + drive * (*intensity * (1.0 - decay));
                *last_time = Some(time);
                *value
            }
            GustProcess::Perlin {
                intensity,
                time_scale,
                noise,
            } => {
                let s = time / *time_scale;
                Vector2::new(
                    noise.get([s, 0.0]).clamp(-1.0, 1.0),
                    noise.get([s, PERLIN_CROSS_ROW]).clamp(-1.0, 1.0),
                ) * *intensity
            }
        };

        WindSample {
            steady: self.steady,
            gust,
        }
    }

    pub fn steady(&self) -> Vector2<f64> {
        self.steady
    }
}

/// Folds both halves of the 64-bit seed into the 32-bit Perlin seed.
fn perlin_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

/// Runway-frame vector of a wind blowing from `direction_deg` (clockwise from the
/// runway course): 0 deg is a headwind, 90 deg pushes the aircraft to the left.
pub fn steady_vector(speed: f64, direction_deg: f64) -> Vector2<f64> {
    let direction = deg_to_rad(direction_deg);
    -Vector2::new(direction.cos(), direction.sin()) * speed
}
