//! Neighbor cell collection utilities

use glam::IVec2;
use sandbox_simulation::{Cell, Material};

use super::grid::Grid;

/// Offsets of the 8-neighborhood
///
/// Order: NW, N, NE, W, E, SW, S, SE (y grows downward)
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), // NW
    (0, -1),  // N
    (1, -1),  // NE
    (-1, 0),  // W
    (1, 0),   // E
    (-1, 1),  // SW
    (0, 1),   // S
    (1, 1),   // SE
];

/// Stateless queries over the `current` buffer
pub struct NeighborQueries;

impl NeighborQueries {
    /// Call `callback` for every in-bounds 8-neighbor of `(x, y)`
    pub fn for_each_neighbor<F>(grid: &Grid, x: usize, y: usize, mut callback: F)
    where
        F: FnMut(usize, usize, Cell),
    {
        for (dx, dy) in NEIGHBOR_OFFSETS {
            if let Some((nx, ny)) = grid.offset(x, y, dx, dy) {
                callback(nx, ny, grid.read(nx, ny));
            }
        }
    }

    /// Number of 8-neighbors holding `material`
    pub fn count_material(grid: &Grid, x: usize, y: usize, material: Material) -> usize {
        let mut count = 0;
        Self::for_each_neighbor(grid, x, y, |_, _, cell| {
            if cell.material() == material {
                count += 1;
            }
        });
        count
    }

    /// Sum of the offsets of 8-neighbors holding `material`, plus their count
    ///
    /// Dividing the sum by the count gives the neighbors' centroid relative to
    /// the center cell.
    pub fn material_offset_sum(
        grid: &Grid,
        x: usize,
        y: usize,
        material: Material,
    ) -> (IVec2, usize) {
        let mut sum = IVec2::ZERO;
        let mut count = 0;

        for (dx, dy) in NEIGHBOR_OFFSETS {
            if let Some((nx, ny)) = grid.offset(x, y, dx, dy)
                && grid.read(nx, ny).material() == material
            {
                sum += IVec2::new(dx, dy);
                count += 1;
            }
        }

        (sum, count)
    }
}
