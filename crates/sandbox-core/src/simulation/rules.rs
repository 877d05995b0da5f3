//! Per-material behavior
//!
//! Dispatch runs after heat diffusion has staged the cell's new temperature.
//! Every rule leaves a final value in `next` for its position: a transition,
//! a payload update, a relocation, or the staged cell itself.

use sandbox_simulation::{Cell, Material};

use super::motion::Motion;
use super::state_changes::StateChangeSystem;
use crate::world::neighbor_queries::NeighborQueries;
use crate::world::{Grid, SimRng, SimStats};

/// Fire spawned by the player burns for up to this many ticks (plus jitter)
pub const FIRE_LIFE: u32 = 40;
/// Fire spawned by other fire burns longer
pub const FIRE_CHILD_LIFE: u32 = 90;
/// Fire older than this stops spreading
pub const FIRE_SPREAD_AGE: u32 = 40;
/// Fire surrounded by this many fire neighbors stops spreading
pub const FIRE_CROWD: usize = 6;

/// Electric arcs always expire at this age
pub const ARC_LIFE: u32 = 8;
/// Arcs with fewer or more arc neighbors than this range may fizzle
pub const ARC_NEIGHBORS: std::ops::RangeInclusive<usize> = 1..=5;

/// Smoke lingers until the global tick counter passes this plus jitter
pub const SMOKE_WINDOW: u64 = 600;
pub const SMOKE_JITTER: u32 = 100;

/// Per-tick inputs shared by every rule
#[derive(Clone, Copy, Debug)]
pub struct TickContext {
    /// Monotonic count of completed ticks before this one
    pub tick: u64,
}

impl TickContext {
    #[inline]
    fn every(&self, period: u64) -> bool {
        self.tick % period == 0
    }
}

/// Material rule dispatcher
pub struct MaterialRules;

impl MaterialRules {
    /// Apply the rule for the material at `(x, y)`
    pub fn update<R: SimRng + ?Sized>(
        grid: &mut Grid,
        x: usize,
        y: usize,
        ctx: &TickContext,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        match grid.read(x, y).material() {
            Material::Empty => {}
            Material::Sand => Self::update_sand(grid, x, y, ctx, stats, rng),
            Material::Water => Self::update_water(grid, x, y, ctx, stats, rng),
            Material::Stone => {
                Self::apply_transition(grid, x, y, stats);
            }
            Material::Wood | Material::Glass => {
                if !Self::apply_transition(grid, x, y, stats) {
                    Motion::fall(grid, x, y, stats, rng);
                }
            }
            Material::Oil => {
                Motion::flow(grid, x, y, stats, rng);
            }
            Material::Lava => {
                if !Self::apply_transition(grid, x, y, stats) {
                    Motion::flow(grid, x, y, stats, rng);
                }
            }
            Material::Steam => {
                if !Self::apply_transition(grid, x, y, stats) {
                    Motion::rise(grid, x, y, stats);
                }
            }
            Material::Smoke => Self::update_smoke(grid, x, y, ctx, stats, rng),
            Material::Fire => Self::update_fire(grid, x, y, stats, rng),
            Material::Electricity => Self::update_electricity(grid, x, y, stats, rng),
            Material::Cold => Self::expire(grid, x, y, stats),
        }
    }

    /// Replace the cell if its temperature crossed a transition threshold
    ///
    /// Returns true when the cell changed material; motion is skipped then.
    fn apply_transition(
        grid: &mut Grid,
        x: usize,
        y: usize,
        stats: &mut dyn SimStats,
    ) -> bool {
        let cell = grid.read(x, y);
        let staged = grid.staged(x, y);

        match StateChangeSystem::check_state_change(&cell, staged.temperature()) {
            Some(changed) => {
                stats.record_phase_change(cell.material(), changed.material());
                grid.write(x, y, changed);
                true
            }
            None => false,
        }
    }

    /// Revert to empty, keeping the staged temperature
    fn expire(grid: &mut Grid, x: usize, y: usize, stats: &mut dyn SimStats) {
        let staged = grid.staged(x, y);
        stats.record_expiry(grid.read(x, y).material());
        grid.write(
            x,
            y,
            Cell::empty_with_temperature(staged.temperature() as i32),
        );
    }

    fn update_sand<R: SimRng + ?Sized>(
        grid: &mut Grid,
        x: usize,
        y: usize,
        ctx: &TickContext,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        let stagnation = grid.read(x, y).stagnation();
        let throttled = if stagnation >= 300 {
            !ctx.every(90)
        } else if stagnation >= 60 {
            !ctx.every(30)
        } else {
            false
        };
        if throttled {
            Motion::hold(grid, x, y);
            return;
        }

        if !Self::apply_transition(grid, x, y, stats) {
            Motion::fall(grid, x, y, stats, rng);
        }
    }

    fn update_water<R: SimRng + ?Sized>(
        grid: &mut Grid,
        x: usize,
        y: usize,
        ctx: &TickContext,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        if grid.read(x, y).stagnation() >= 60 && !ctx.every(10) {
            Motion::hold(grid, x, y);
            return;
        }

        if !Self::apply_transition(grid, x, y, stats) {
            Motion::flow(grid, x, y, stats, rng);
        }
    }

    fn update_smoke<R: SimRng + ?Sized>(
        grid: &mut Grid,
        x: usize,
        y: usize,
        ctx: &TickContext,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        // Shared tick counter, not per-cell age
        let window = SMOKE_WINDOW + rng.gen_below(SMOKE_JITTER) as u64;
        if ctx.tick > window {
            Self::expire(grid, x, y, stats);
            return;
        }

        Motion::rise(grid, x, y, stats);
    }

    /// Fire ages one tick per visit, expires at its life limit and may spawn
    /// one child fire one or two rows above
    fn update_fire<R: SimRng + ?Sized>(
        grid: &mut Grid,
        x: usize,
        y: usize,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        let cell = grid.read(x, y);
        let age = cell.lifetime() as u32;
        let base_life = if cell.is_parent() {
            FIRE_CHILD_LIFE
        } else {
            FIRE_LIFE
        };

        if age >= base_life + rng.gen_below(5) {
            Self::expire(grid, x, y, stats);
            return;
        }

        let staged = grid.staged(x, y);
        grid.write(x, y, staged.with_lifetime(age + 1));

        if age > FIRE_SPREAD_AGE
            || NeighborQueries::count_material(grid, x, y, Material::Fire) >= FIRE_CROWD
        {
            return;
        }

        let spread_chance = 1.0 - age as f32 / 50.0;
        if !rng.check_probability(spread_chance) {
            return;
        }

        let reach = 1 + rng.gen_below(2) as i32;
        for rise in 1..=reach {
            let dx = rng.gen_step();
            let Some((tx, ty)) = grid.offset(x, y, dx, -rise) else {
                continue;
            };

            if grid.read(tx, ty).is_empty() && !grid.is_claimed(tx, ty) {
                let mut child = Cell::from_material(Material::Fire)
                    .with_lifetime(age + 1 + rng.gen_below(3));
                child.set_parent(true);
                grid.spawn(tx, ty, child);
                stats.record_spawn(Material::Fire);
                break;
            }
        }
    }

    /// Arcs age one tick per visit and branch away from neighboring arc cells
    fn update_electricity<R: SimRng + ?Sized>(
        grid: &mut Grid,
        x: usize,
        y: usize,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        let cell = grid.read(x, y);
        let age = cell.lifetime() as u32 + 1;
        if age >= ARC_LIFE {
            Self::expire(grid, x, y, stats);
            return;
        }

        let (offset_sum, neighbors) =
            NeighborQueries::material_offset_sum(grid, x, y, Material::Electricity);
        if !ARC_NEIGHBORS.contains(&neighbors) && rng.gen_bool() {
            Self::expire(grid, x, y, stats);
            return;
        }

        let staged = grid.staged(x, y);
        grid.write(x, y, staged.with_lifetime(age));

        let spread_chance = 1.0 - age as f32 / ARC_LIFE as f32;
        if !rng.check_probability(spread_chance) {
            return;
        }

        let step_x = (rng.gen_step() - offset_sum.x).clamp(-1, 1);
        let step_y = (rng.gen_step() - offset_sum.y).clamp(-1, 1);
        if step_x == 0 && step_y == 0 {
            return;
        }

        if let Some((tx, ty)) = grid.offset(x, y, step_x, step_y)
            && grid.read(tx, ty).is_empty()
            && !grid.is_claimed(tx, ty)
        {
            let spark = Cell::from_material_at(Material::Electricity, cell.temperature() as i32)
                .with_lifetime(age + 1);
            grid.spawn(tx, ty, spark);
            stats.record_spawn(Material::Electricity);
        }
    }
}
