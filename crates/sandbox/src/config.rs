//! Runner configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `sandbox.ron` in the working directory, or the file passed with `--config`
//! 3. Environment variables prefixed with `SANDBOX_`
//! 4. Command-line flags (applied by `main`)
//!
//! Example environment variable: `SANDBOX_SIM__WIDTH=320`

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use sandbox_core::SimConfig;
use sandbox_core::simulation::DIFFUSION_RATE;
use sandbox_core::world::DEFAULT_TICK_RATE;
use serde::{Deserialize, Serialize};

use crate::scenario::ScenarioKind;

/// Everything the runner needs to build and drive one simulation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunnerConfig {
    #[serde(default)]
    pub sim: SimConfig,

    #[serde(default)]
    pub run: RunConfig,
}

/// How long to run and how to report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Ticks to simulate before exiting
    pub ticks: u64,
    /// Simulation rate of the tick clock
    pub tick_rate: u32,
    /// Rate at which frame time is fed to the clock
    pub frame_rate: u32,
    /// World painted before the first tick
    pub scenario: ScenarioKind,
    /// Log a material histogram every N ticks (0 disables)
    pub report_every: u64,
    /// Pause once this many ticks have run
    pub pause_after: Option<u64>,
    /// Frames spent idling while paused
    pub pause_frames: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            tick_rate: DEFAULT_TICK_RATE,
            frame_rate: 60,
            scenario: ScenarioKind::SandPile,
            report_every: 100,
            pause_after: None,
            pause_frames: 30,
        }
    }
}

impl RunnerConfig {
    /// Load with the default optional `sandbox.ron`
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Self::defaults()?.add_source(
                File::with_name("sandbox")
                    .format(FileFormat::Ron)
                    .required(false),
            ),
        )
    }

    /// Load with an explicit config file, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::from_builder(
            Self::defaults()?.add_source(File::from(path).format(FileFormat::Ron).required(true)),
        )
        .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let builder = Config::builder()
            .set_default("sim.width", 200_i64)?
            .set_default("sim.height", 150_i64)?
            .set_default("sim.seed", 0_i64)?
            .set_default("sim.diffusion_rate", DIFFUSION_RATE as f64)?
            .set_default("run.ticks", 600_i64)?
            .set_default("run.tick_rate", DEFAULT_TICK_RATE as i64)?
            .set_default("run.frame_rate", 60_i64)?
            .set_default("run.scenario", "sand-pile")?
            .set_default("run.report_every", 100_i64)?
            .set_default("run.pause_frames", 30_i64)?;
        Ok(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder
            // SANDBOX_SIM__WIDTH, SANDBOX_RUN__TICKS, ...
            .add_source(
                Environment::with_prefix("SANDBOX")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.sim.validate().context("Invalid simulation config")?;
        anyhow::ensure!(self.run.tick_rate > 0, "tick_rate must be positive");
        anyhow::ensure!(
            (1..=1000).contains(&self.run.frame_rate),
            "frame_rate must be between 1 and 1000"
        );
        Ok(())
    }
}
