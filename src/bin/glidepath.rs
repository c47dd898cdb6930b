//! Command-line front end: run one approach, sweep seeds, or validate a config.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use glidepath::components::GuidancePath;
use glidepath::rendering::{
    write_gif, write_outcome_json, write_png_sequence, write_profile_png, CockpitRenderer,
    RenderConfig,
};
use glidepath::systems::run_batch;
use glidepath::{ApproachMetrics, Simulation, SimulationConfig};

const PROFILE_WIDTH: u32 = 1200;
const PROFILE_HEIGHT: u32 = 800;

#[derive(Parser)]
#[command(name = "glidepath")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fly one approach and report its metrics
    Run {
        /// Configuration file (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Override the gust seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write the full trajectory as JSON
        #[arg(long)]
        trajectory: Option<PathBuf>,

        /// Write the metrics as JSON
        #[arg(long)]
        metrics: Option<PathBuf>,

        /// Write a PNG frame sequence into this directory
        #[arg(long)]
        frames: Option<PathBuf>,

        /// Write an animated GIF of the cockpit view
        #[arg(long)]
        gif: Option<PathBuf>,

        /// Write ground track, glideslope, speed and attitude plots as one PNG
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Render every n-th sample
        #[arg(long, default_value_t = 10)]
        frame_stride: usize,
    },

    /// Fly many approaches with derived gust seeds
    Sweep {
        #[arg(short, long)]
        config: PathBuf,

        /// Number of runs
        #[arg(short, long, default_value_t = 20)]
        runs: usize,

        #[arg(short, long, default_value_t = 0)]
        master_seed: u64,

        /// Write the per-run metrics as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a configuration file
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn load_config(path: &Path) -> Result<SimulationConfig> {
    SimulationConfig::load(path)
        .with_context(|| format!("loading configuration {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Run {
            config,
            seed,
            trajectory,
            metrics,
            frames,
            gif,
            profile,
            frame_stride,
        } => {
            let mut config = load_config(&config)?;
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }

            let outcome = Simulation::new(&config)?.run();
            let summary = ApproachMetrics::from_outcome(&outcome, &config);
            println!("{summary}");

            if let Some(path) = metrics {
                std::fs::write(&path, summary.to_json()?)
                    .with_context(|| format!("writing metrics {}", path.display()))?;
            }
            if let Some(path) = trajectory {
                write_outcome_json(&outcome, &path)
                    .with_context(|| format!("writing trajectory {}", path.display()))?;
            }

            if let Some(path) = profile {
                write_profile_png(
                    &outcome.trajectory,
                    &GuidancePath::from_config(&config.approach),
                    &RenderConfig {
                        width: PROFILE_WIDTH,
                        height: PROFILE_HEIGHT,
                        ..Default::default()
                    },
                    &path,
                )
                .with_context(|| format!("writing profile {}", path.display()))?;
            }

            if frames.is_some() || gif.is_some() {
                let renderer = CockpitRenderer::new(
                    RenderConfig::default().with_stride(frame_stride),
                    GuidancePath::from_config(&config.approach),
                )?;
                if let Some(dir) = frames {
                    write_png_sequence(&renderer, &outcome.trajectory, &dir)
                        .with_context(|| format!("writing frames to {}", dir.display()))?;
                }
                if let Some(path) = gif {
                    write_gif(&renderer, &outcome.trajectory, &path)
                        .with_context(|| format!("writing {}", path.display()))?;
                }
            }
        }
        Commands::Sweep {
            config,
            runs,
            master_seed,
            output,
        } => {
            let config = load_config(&config)?;
            let report = run_batch(&config, runs, master_seed)?;

            println!(
                "{} runs: {} landed, {} aborted, {} timed out",
                report.runs.len(),
                report.landed(),
                report.aborted(),
                report.timed_out()
            );
            if let Some(rms) = report.touchdown_lateral_rms() {
                println!("touchdown lateral RMS: {rms:.3} m");
            }
            if let Some(path) = output {
                std::fs::write(&path, report.to_json()?)
                    .with_context(|| format!("writing sweep report {}", path.display()))?;
            }
        }
        Commands::Check { config } => {
            let loaded = load_config(&config)?;
            info!(
                "{} is valid: dt = {} s, up to {} steps",
                config.display(),
                loaded.simulation.dt,
                loaded.max_steps()
            );
        }
    }

    Ok(())
}
