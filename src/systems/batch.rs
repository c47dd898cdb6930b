use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::resources::{ConfigError, SimulationConfig};
use crate::systems::metrics::ApproachMetrics;
use crate::systems::runner::run_simulation;
use crate::utils::{rms, RngManager};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRun {
    pub index: usize,
    /// Gust seed the run was given
    pub seed: u64,
    pub metrics: ApproachMetrics,
}

/// Metrics of a seeded sweep, ordered by run index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub master_seed: u64,
    pub runs: Vec<BatchRun>,
}

impl BatchReport {
    pub fn landed(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| r.metrics.terminal.is_landed())
            .count()
    }

    pub fn aborted(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| r.metrics.terminal.is_aborted())
            .count()
    }

    pub fn timed_out(&self) -> usize {
        self.runs.len() - self.landed() - self.aborted()
    }

    /// RMS of the touchdown cross-track offsets over the landed runs
    pub fn touchdown_lateral_rms(&self) -> Option<f64> {
        rms(self
            .runs
            .iter()
            .filter_map(|r| r.metrics.touchdown.map(|t| t.lateral_deviation)))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Seed of run `index`, independent of how the sweep is scheduled
pub fn run_seed(rng_manager: &RngManager, index: usize) -> u64 {
    rng_manager.derive_seed(&format!("wind/run-{index}"))
}

/// Run `runs` copies of `config` in parallel, each with its own gust seed.
pub fn run_batch(
    config: &SimulationConfig,
    runs: usize,
    master_seed: u64,
) -> Result<BatchReport, ConfigError> {
    config.validate()?;
    let rng_manager = RngManager::new(master_seed);
    info!("Running {} approaches, master seed {}", runs, master_seed);

    let runs = (0..runs)
        .into_par_iter()
        .map(|index| {
            let seed = run_seed(&rng_manager, index);
            let run_config = config.with_seed(seed);
            let outcome = run_simulation(&run_config)?;
            Ok::<_, ConfigError>(BatchRun {
                index,
                seed,
                metrics: ApproachMetrics::from_outcome(&outcome, &run_config),
            })
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    let report = BatchReport { master_seed, runs };
    info!(
        "Batch finished: {} landed, {} aborted, {} timed out",
        report.landed(),
        report.aborted(),
        report.timed_out()
    );
    Ok(report)
}
