//! Run summaries and cell inspection output

use anyhow::{Context, Result};
use sandbox_core::materials::{CellSnapshot, Material};
use sandbox_core::{Simulation, TickStats};
use serde::Serialize;

/// One-line material histogram, skipping absent materials
pub fn histogram(sim: &Simulation) -> String {
    let counts = sim.material_counts();
    Material::ALL
        .iter()
        .filter(|m| **m != Material::Empty && counts[m.index() as usize] > 0)
        .map(|m| format!("{}={}", m, counts[m.index() as usize]))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse an `X,Y` cell coordinate
pub fn parse_point(s: &str) -> Result<(usize, usize), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let x = x
        .trim()
        .parse()
        .map_err(|e| format!("bad x coordinate '{x}': {e}"))?;
    let y = y
        .trim()
        .parse()
        .map_err(|e| format!("bad y coordinate '{y}': {e}"))?;
    Ok((x, y))
}

/// An inspected cell with its position
#[derive(Debug, Serialize)]
pub struct Inspection {
    pub x: usize,
    pub y: usize,
    pub cell: CellSnapshot,
}

/// Final state of a run
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub scenario: String,
    pub ticks: u64,
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    /// Hex-encoded state digest
    pub digest: String,
    pub stats: TickStats,
    pub inspected: Vec<Inspection>,
}

impl RunSummary {
    pub fn collect(sim: &Simulation, scenario: &str, points: &[(usize, usize)]) -> Result<Self> {
        let inspected = points
            .iter()
            .map(|&(x, y)| {
                anyhow::ensure!(
                    x < sim.width() && y < sim.height(),
                    "Cannot inspect ({x}, {y}): grid is {}x{}",
                    sim.width(),
                    sim.height()
                );
                Ok(Inspection {
                    x,
                    y,
                    cell: sim.read(x, y),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            scenario: scenario.to_string(),
            ticks: sim.tick_count(),
            width: sim.width(),
            height: sim.height(),
            seed: sim.config().seed,
            digest: format!("{:016x}", sim.state_digest()),
            stats: sim.stats().clone(),
            inspected,
        })
    }

    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize run summary to RON")
    }
}
