use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use sandbox_core::world::TickClock;
use sandbox_core::{SimConfig, Simulation};

mod config;
mod report;
mod scenario;

use config::{RunConfig, RunnerConfig};
use report::RunSummary;
use scenario::{ScenarioDefinition, ScenarioKind};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Ticks to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// Seed of the simulation's random source
    #[arg(long)]
    seed: Option<u64>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Built-in scenario
    #[arg(long, value_enum)]
    scenario: Option<ScenarioKind>,

    /// RON scenario file (overrides --scenario)
    #[arg(long)]
    scenario_file: Option<PathBuf>,

    /// Pause the clock once this many ticks have run
    #[arg(long)]
    pause_after: Option<u64>,

    /// Log a material histogram every N ticks (0 disables)
    #[arg(long)]
    report_every: Option<u64>,

    /// Print the final state of cell X,Y (repeatable)
    #[arg(long, value_parser = report::parse_point)]
    inspect: Vec<(usize, usize)>,

    /// Config file (default: optional sandbox.ron in the working directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    /// Command-line flags take precedence over every config layer
    fn apply(&self, config: &mut RunnerConfig) {
        let sim: &mut SimConfig = &mut config.sim;
        if let Some(width) = self.width {
            sim.width = width;
        }
        if let Some(height) = self.height {
            sim.height = height;
        }
        if let Some(seed) = self.seed {
            sim.seed = seed;
        }

        let run: &mut RunConfig = &mut config.run;
        if let Some(ticks) = self.ticks {
            run.ticks = ticks;
        }
        if let Some(scenario) = self.scenario {
            run.scenario = scenario;
        }
        if self.pause_after.is_some() {
            run.pause_after = self.pause_after;
        }
        if let Some(report_every) = self.report_every {
            run.report_every = report_every;
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RunnerConfig::load_from(path)?,
        None => RunnerConfig::load()?,
    };
    args.apply(&mut config);
    config.validate()?;

    let scenario = match &args.scenario_file {
        Some(path) => ScenarioDefinition::from_file(path)?,
        None => config
            .run
            .scenario
            .definition(config.sim.width, config.sim.height),
    };

    log::info!(
        "Starting sandbox: {}x{} grid, seed {}, scenario '{}'",
        config.sim.width,
        config.sim.height,
        config.sim.seed,
        scenario.name
    );
    if !scenario.description.is_empty() {
        log::info!("{}", scenario.description);
    }

    let mut sim = Simulation::new(config.sim.clone()).context("Failed to create simulation")?;
    scenario.apply(&mut sim);

    run(&mut sim, &config.run);

    let summary = RunSummary::collect(&sim, &scenario.name, &args.inspect)?;
    log::info!(
        "Finished after {} ticks: {} moves, {} phase changes, {} expiries, {} spawns",
        summary.ticks,
        summary.stats.total_cells_moved,
        summary.stats.total_phase_changes,
        summary.stats.total_expiries,
        summary.stats.total_spawns
    );
    println!("{}", summary.to_ron()?);

    Ok(())
}

/// Feed fixed frame times to the clock until `run.ticks` ticks have run
///
/// Each frame runs at most the ticks left before the next stop, so the run
/// ends exactly at `run.ticks` and pauses exactly at `run.pause_after`.
/// Returns the tick the clock was paused at, if it was.
fn run(sim: &mut Simulation, run: &RunConfig) -> Option<u64> {
    let mut clock = TickClock::new(run.tick_rate);
    let frame = Duration::from_secs(1) / run.frame_rate;
    let mut next_report = run.report_every;
    let mut pause_pending = run.pause_after;
    let mut paused_at = None;

    while sim.tick_count() < run.ticks {
        let stop = pause_pending.map_or(run.ticks, |at| at.min(run.ticks));
        let remaining =
            usize::try_from(stop.saturating_sub(sim.tick_count())).unwrap_or(usize::MAX);
        clock.advance_at_most(sim, frame, remaining);

        if run.report_every > 0 && sim.tick_count() >= next_report {
            log::info!("tick {}: {}", sim.tick_count(), report::histogram(sim));
            next_report = sim.tick_count() + run.report_every;
        }

        if let Some(pause_at) = pause_pending
            && sim.tick_count() >= pause_at
        {
            pause_pending = None;
            paused_at = Some(sim.tick_count());
            let digest = sim.state_digest();
            clock.set_paused(true);
            for _ in 0..run.pause_frames {
                clock.advance(sim, frame);
            }
            if sim.state_digest() != digest {
                log::warn!("World changed while paused");
            }
            clock.set_paused(false);
        }
    }

    log::debug!("Clock stopped at tick {}", sim.tick_count());
    paused_at
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandbox_core::materials::Material;

    fn sand_world() -> Simulation {
        let mut sim = Simulation::new(SimConfig {
            width: 8,
            height: 8,
            seed: 3,
            ..Default::default()
        })
        .unwrap();
        sim.paint_circle(4, 2, 2, Material::Sand);
        sim
    }

    fn fast_ticks(ticks: u64, pause_after: Option<u64>) -> RunConfig {
        RunConfig {
            ticks,
            tick_rate: 240,
            frame_rate: 10,
            report_every: 0,
            pause_after,
            pause_frames: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_run_stops_exactly_at_tick_target() {
        for ticks in [0, 1, 7, 8, 9, 23, 50] {
            let mut sim = sand_world();
            assert_eq!(run(&mut sim, &fast_ticks(ticks, None)), None);
            assert_eq!(sim.tick_count(), ticks);
        }
    }

    #[test]
    fn test_run_pauses_exactly_at_pause_tick() {
        let mut sim = sand_world();
        assert_eq!(run(&mut sim, &fast_ticks(7, Some(5))), Some(5));
        assert_eq!(sim.tick_count(), 7);

        let mut sim = sand_world();
        assert_eq!(run(&mut sim, &fast_ticks(20, Some(0))), Some(0));
        assert_eq!(sim.tick_count(), 20);
    }

    #[test]
    fn test_pause_past_the_end_never_fires() {
        let mut sim = sand_world();
        assert_eq!(run(&mut sim, &fast_ticks(6, Some(10))), None);
        assert_eq!(sim.tick_count(), 6);
    }
}
