//! Simulation statistics collection trait

use sandbox_simulation::Material;
use serde::Serialize;

/// Trait for collecting simulation statistics
///
/// Systems report events through this trait so the engine does not depend on
/// how (or whether) they are aggregated.
pub trait SimStats {
    /// Record that a cell was relocated by a motion primitive
    fn record_cell_moved(&mut self);

    /// Record a temperature-driven material change
    fn record_phase_change(&mut self, from: Material, to: Material);

    /// Record that a lifetime-bound cell reverted to empty
    fn record_expiry(&mut self, material: Material);

    /// Record that a cell spawned a new cell
    fn record_spawn(&mut self, material: Material);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_cell_moved(&mut self) {}
    fn record_phase_change(&mut self, _from: Material, _to: Material) {}
    fn record_expiry(&mut self, _material: Material) {}
    fn record_spawn(&mut self, _material: Material) {}
}

/// Counters for the most recent tick plus running totals
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct TickStats {
    pub cells_moved: u64,
    pub phase_changes: u64,
    pub expiries: u64,
    pub spawns: u64,
    pub total_cells_moved: u64,
    pub total_phase_changes: u64,
    pub total_expiries: u64,
    pub total_spawns: u64,
}

impl TickStats {
    /// Zero the per-tick counters; totals keep accumulating
    pub fn begin_tick(&mut self) {
        self.cells_moved = 0;
        self.phase_changes = 0;
        self.expiries = 0;
        self.spawns = 0;
    }
}

impl SimStats for TickStats {
    fn record_cell_moved(&mut self) {
        self.cells_moved += 1;
        self.total_cells_moved += 1;
    }

    fn record_phase_change(&mut self, from: Material, to: Material) {
        log::trace!("phase change {from} -> {to}");
        self.phase_changes += 1;
        self.total_phase_changes += 1;
    }

    fn record_expiry(&mut self, material: Material) {
        log::trace!("{material} expired");
        self.expiries += 1;
        self.total_expiries += 1;
    }

    fn record_spawn(&mut self, material: Material) {
        log::trace!("{material} spawned");
        self.spawns += 1;
        self.total_spawns += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_stats_all_methods() {
        let mut stats = NoopStats;

        for _ in 0..100 {
            stats.record_cell_moved();
            stats.record_phase_change(Material::Water, Material::Steam);
            stats.record_expiry(Material::Fire);
            stats.record_spawn(Material::Electricity);
        }
    }

    #[test]
    fn test_tick_stats_counts() {
        let mut stats = TickStats::default();

        stats.record_cell_moved();
        stats.record_cell_moved();
        stats.record_phase_change(Material::Sand, Material::Glass);
        stats.record_expiry(Material::Fire);
        stats.record_spawn(Material::Fire);
        stats.record_spawn(Material::Fire);
        stats.record_spawn(Material::Fire);

        assert_eq!(stats.cells_moved, 2);
        assert_eq!(stats.phase_changes, 1);
        assert_eq!(stats.expiries, 1);
        assert_eq!(stats.spawns, 3);
    }

    #[test]
    fn test_tick_stats_begin_tick_keeps_totals() {
        let mut stats = TickStats::default();
        stats.record_cell_moved();
        stats.record_expiry(Material::Cold);
        assert_eq!(stats.total_cells_moved, 1);

        stats.begin_tick();
        assert_eq!(stats.cells_moved, 0);
        assert_eq!(stats.expiries, 0);
        assert_eq!(stats.total_cells_moved, 1);
        assert_eq!(stats.total_expiries, 1);

        stats.record_cell_moved();
        stats.begin_tick();
        assert_eq!(stats.total_cells_moved, 2);
    }
}
