//! Heat diffusion between neighboring cells
//!
//! Each visited cell exchanges heat with its 8 neighbors: every neighbor's
//! staged temperature is nudged immediately, then the cell's own net change is
//! written. A neighbor visited later overwrites its staged value with its own
//! exchange, so the scheme is a one-step-lagged explicit diffusion.

use crate::world::Grid;
use crate::world::neighbor_queries::NEIGHBOR_OFFSETS;

/// Fraction of a temperature difference exchanged per neighbor per visit
pub const DIFFUSION_RATE: f32 = 0.01;

/// Largest stable rate: 8 neighbors may never move more than the full difference
pub const MAX_DIFFUSION_RATE: f32 = 0.125;

/// Heat exchange system
pub struct HeatDiffusion;

impl HeatDiffusion {
    /// Exchange heat between `(x, y)` and its in-bounds neighbors
    ///
    /// Reads temperatures from `current`. Neighbor writes land in `next` in
    /// neighborhood order, then the cell itself is committed to `next` with its
    /// net change applied. Every write is clamped.
    pub fn diffuse(grid: &mut Grid, x: usize, y: usize, rate: f32) {
        let cell = grid.read(x, y);
        let self_temp = cell.temperature() as f32;
        let mut net = 0.0f32;

        for (dx, dy) in NEIGHBOR_OFFSETS {
            let Some((nx, ny)) = grid.offset(x, y, dx, dy) else {
                continue;
            };

            let neighbor_temp = grid.read(nx, ny).temperature() as f32;
            let delta = (self_temp - neighbor_temp) * rate;
            net -= delta;

            let transfer = delta.round() as i32;
            if transfer != 0 {
                let mut staged = grid.staged(nx, ny);
                staged.set_temperature(staged.temperature() as i32 + transfer);
                grid.write(nx, ny, staged);
            }
        }

        let updated = cell.with_temperature(cell.temperature() as i32 + net.round() as i32);
        grid.write(x, y, updated);
    }
}
