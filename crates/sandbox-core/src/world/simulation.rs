//! Simulation facade - owns the grid, scheduler and random source

use std::hash::{BuildHasher, Hasher};

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use sandbox_simulation::{Cell, CellSnapshot, MATERIAL_COUNT, Material};

use super::brush::{circle_points_within, line_points_within};
use super::config::{SimConfig, SimError};
use super::grid::Grid;
use super::scheduler::{ScanOrder, Scheduler};
use super::stats::TickStats;

/// Fixed seeds so digests are comparable across runs and processes
const DIGEST_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// A falling-sand world
///
/// Collaborators only get snapshot reads and point writes; the buffers stay
/// private. Every call runs to completion.
pub struct Simulation {
    config: SimConfig,
    grid: Grid,
    scheduler: Scheduler,
    rng: Xoshiro256StarStar,
    stats: TickStats,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        log::debug!(
            "Creating {}x{} simulation (seed {}, diffusion rate {})",
            config.width,
            config.height,
            config.seed,
            config.diffusion_rate
        );

        Ok(Self {
            grid: Grid::new(config.width, config.height),
            scheduler: Scheduler::new(),
            rng: Xoshiro256StarStar::seed_from_u64(config.seed),
            stats: TickStats::default(),
            config,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.grid.in_bounds(x, y)
    }

    fn assert_in_bounds(&self, x: usize, y: usize) {
        assert!(
            x < self.width() && y < self.height(),
            "({x}, {y}) outside {}x{} grid",
            self.width(),
            self.height()
        );
    }

    /// Inspection view of the cell at `(x, y)`; panics when out of bounds
    pub fn read(&self, x: usize, y: usize) -> CellSnapshot {
        self.cell(x, y).snapshot()
    }

    /// The cell at `(x, y)`; panics when out of bounds
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.assert_in_bounds(x, y);
        self.grid.read(x, y)
    }

    /// Replace the cell at `(x, y)` in both buffers
    pub fn place(&mut self, x: usize, y: usize, cell: Cell) {
        self.assert_in_bounds(x, y);
        self.grid.place(x, y, cell);
    }

    /// Paint a fresh cell of `material` with its table defaults
    pub fn paint(&mut self, x: usize, y: usize, material: Material) {
        self.place(x, y, Cell::from_material(material));
    }

    /// Paint a fresh cell of `material` at a chosen temperature
    pub fn paint_with_temperature(
        &mut self,
        x: usize,
        y: usize,
        material: Material,
        temperature: i32,
    ) {
        self.place(x, y, Cell::from_material_at(material, temperature));
    }

    /// Paint the in-bounds part of a disk; returns the number of cells painted
    pub fn paint_circle(&mut self, cx: i32, cy: i32, radius: i32, material: Material) -> usize {
        let points = circle_points_within(cx, cy, radius, self.width(), self.height());
        for point in &points {
            self.paint(point.x as usize, point.y as usize, material);
        }
        points.len()
    }

    /// Paint the in-bounds part of a filled rectangle; returns cells painted
    ///
    /// Non-positive sizes paint nothing.
    pub fn paint_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        material: Material,
    ) -> usize {
        let clip = |start: i32, size: i32, len: usize| {
            let start = start as i64;
            (start.max(0), (start + size.max(0) as i64).min(len as i64))
        };
        let (x0, x1) = clip(x, width, self.width());
        let (y0, y1) = clip(y, height, self.height());

        let mut painted = 0;
        for py in y0..y1 {
            for px in x0..x1 {
                self.paint(px as usize, py as usize, material);
                painted += 1;
            }
        }
        painted
    }

    /// Paint the in-bounds part of a segment, both ends included; returns cells painted
    pub fn paint_line(&mut self, from: (i32, i32), to: (i32, i32), material: Material) -> usize {
        let points = line_points_within(from, to, self.width(), self.height());
        for point in &points {
            self.paint(point.x as usize, point.y as usize, material);
        }
        points.len()
    }

    /// Advance the simulation by exactly one step
    pub fn tick(&mut self) -> ScanOrder {
        self.stats.begin_tick();

        let order = self.scheduler.run_tick(
            &mut self.grid,
            self.config.diffusion_rate,
            &mut self.stats,
            &mut self.rng,
        );

        log::trace!(
            "tick {} ({:?}): {} moved, {} phase changes, {} expired, {} spawned",
            self.scheduler.tick_count(),
            order,
            self.stats.cells_moved,
            self.stats.phase_changes,
            self.stats.expiries,
            self.stats.spawns
        );

        order
    }

    /// Exchange buffer roles without simulating
    ///
    /// `next` is synced first, so reads stay unchanged across any number of calls.
    pub fn idle_advance(&mut self) {
        self.grid.sync_next();
        self.grid.swap_roles();
    }

    /// Number of completed ticks
    pub fn tick_count(&self) -> u64 {
        self.scheduler.tick_count()
    }

    pub fn last_scan_order(&self) -> Option<ScanOrder> {
        self.scheduler.last_scan_order()
    }

    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Cell count per material, indexed by [`Material::index`]
    pub fn material_counts(&self) -> [usize; MATERIAL_COUNT] {
        let mut counts = [0; MATERIAL_COUNT];
        for cell in self.grid.cells() {
            counts[cell.material().index() as usize] += 1;
        }
        counts
    }

    /// Deterministic fingerprint of the visible state
    pub fn state_digest(&self) -> u64 {
        let [k0, k1, k2, k3] = DIGEST_SEEDS;
        let mut hasher = ahash::RandomState::with_seeds(k0, k1, k2, k3).build_hasher();

        hasher.write_usize(self.width());
        hasher.write_usize(self.height());
        for cell in self.grid.cells() {
            hasher.write_u64(cell.pack().0);
        }

        hasher.finish()
    }
}
