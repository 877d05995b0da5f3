//! Motion primitives - relocating cells by falling, flowing and rising
//!
//! Coordinates grow downward: falling is `dy = +1`, rising is `dy = -1`.
//! A relocation is committed through [`Grid::swap_cells`], so it is visible
//! to every cell evaluated later in the same tick and the destination is
//! claimed. A primitive that cannot relocate re-commits the staged cell with
//! its stagnation counter bumped.

use sandbox_simulation::{Category, Cell};

use crate::world::{Grid, SimRng, SimStats};

/// Furthest horizontal distance a liquid scans for a free spot
pub const FLOW_DISTANCE: i32 = 5;

/// Motion primitives - stateless methods over the grid
pub struct Motion;

impl Motion {
    /// Solid motion: straight down, then both lower diagonals in random order
    ///
    /// A solid that cannot fall keeps its staged cell untouched and does not
    /// count stagnation.
    pub fn fall<R: SimRng + ?Sized>(
        grid: &mut Grid,
        x: usize,
        y: usize,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) -> bool {
        let cell = grid.read(x, y);
        if !cell.can_fall() {
            return false;
        }

        let dx = if rng.gen_bool() { -1 } else { 1 };
        let target = Self::first_accepted(grid, x, y, &cell, [(0, 1), (dx, 1), (-dx, 1)]);

        Self::settle(grid, x, y, target, stats)
    }

    /// Liquid motion: straight down, then the lower diagonals, then a
    /// horizontal scan of up to [`FLOW_DISTANCE`] cells
    ///
    /// Each tier picks a random starting side. The diagonal tier only looks one
    /// step out. The horizontal scan checks every distance up to the grid edge;
    /// the first legal target wins, whatever lies in between.
    pub fn flow<R: SimRng + ?Sized>(
        grid: &mut Grid,
        x: usize,
        y: usize,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) -> bool {
        let cell = grid.read(x, y);

        let mut target = Self::first_accepted(grid, x, y, &cell, [(0, 1)]);

        if target.is_none() {
            let dir = if rng.gen_bool() { -1 } else { 1 };
            target = Self::first_accepted(grid, x, y, &cell, [(dir, 1), (-dir, 1)]);
        }

        if target.is_none() {
            let dir = if rng.gen_bool() { -1 } else { 1 };
            target = Self::scan_horizontal(grid, x, y, &cell, dir)
                .or_else(|| Self::scan_horizontal(grid, x, y, &cell, -dir));
        }

        Self::settle(grid, x, y, target, stats)
    }

    /// Gas motion: straight up, then up-left, then up-right; only into empty cells
    pub fn rise(grid: &mut Grid, x: usize, y: usize, stats: &mut dyn SimStats) -> bool {
        let cell = grid.read(x, y);
        let target = Self::first_accepted(grid, x, y, &cell, [(0, -1), (-1, -1), (1, -1)]);

        Self::settle(grid, x, y, target, stats)
    }

    /// Whether `mover` may relocate into `(tx, ty)`
    ///
    /// Claimed positions are never legal. Empty cells always are; a liquid may
    /// also displace a strictly lighter liquid.
    pub fn accepts(grid: &Grid, mover: &Cell, tx: usize, ty: usize) -> bool {
        if grid.is_claimed(tx, ty) {
            return false;
        }

        let target = grid.read(tx, ty);
        if target.is_empty() {
            return true;
        }

        mover.category() == Category::Liquid
            && target.category() == Category::Liquid
            && target.density() < mover.density()
    }

    /// First in-bounds offset from `(x, y)` that `mover` may relocate into
    fn first_accepted<I>(
        grid: &Grid,
        x: usize,
        y: usize,
        mover: &Cell,
        offsets: I,
    ) -> Option<(usize, usize)>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        offsets
            .into_iter()
            .filter_map(|(dx, dy)| grid.offset(x, y, dx, dy))
            .find(|&(tx, ty)| Self::accepts(grid, mover, tx, ty))
    }

    fn scan_horizontal(
        grid: &Grid,
        x: usize,
        y: usize,
        mover: &Cell,
        dir: i32,
    ) -> Option<(usize, usize)> {
        for dist in 1..=FLOW_DISTANCE {
            let (tx, ty) = grid.offset(x, y, dir * dist, 0)?;
            if Self::accepts(grid, mover, tx, ty) {
                return Some((tx, ty));
            }
        }
        None
    }

    /// Commit the outcome of a motion attempt
    fn settle(
        grid: &mut Grid,
        x: usize,
        y: usize,
        target: Option<(usize, usize)>,
        stats: &mut dyn SimStats,
    ) -> bool {
        match target {
            Some(to) => {
                // The mover carries the temperature diffusion just staged for it
                let staged = grid.staged(x, y);
                grid.place(x, y, staged);
                grid.swap_cells((x, y), to);
                stats.record_cell_moved();
                true
            }
            None => {
                Self::hold(grid, x, y);
                false
            }
        }
    }

    /// Re-commit the staged cell with one more tick of stagnation
    pub fn hold(grid: &mut Grid, x: usize, y: usize) {
        let mut staged = grid.staged(x, y);
        staged.bump_stagnation();
        grid.write(x, y, staged);
    }
}
