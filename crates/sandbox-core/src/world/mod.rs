//! World state - grid storage, scan scheduling and the simulation facade

pub mod brush;
pub mod clock;
mod config;
mod grid;
pub mod neighbor_queries;
pub mod rng_trait;
pub mod scheduler;
mod simulation;
pub mod stats;

pub use brush::{circle_points, circle_points_within, line_points_within};
pub use clock::{DEFAULT_TICK_RATE, TickClock};
pub use config::{MAX_DIMENSION, SimConfig, SimError};
pub use grid::Grid;
pub use neighbor_queries::NeighborQueries;
pub use rng_trait::SimRng;
pub use scheduler::{ScanOrder, Scheduler};
pub use simulation::Simulation;
pub use stats::{NoopStats, SimStats, TickStats};

#[cfg(test)]
pub(crate) use rng_trait::test_rng;
