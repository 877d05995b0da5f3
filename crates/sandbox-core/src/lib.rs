//! Falling-sand cellular automaton engine
//!
//! [`Simulation`] owns a double-buffered grid of cells and advances it one
//! tick at a time: every cell exchanges heat with its neighbors, then applies
//! its material rule (phase changes, lifetimes, falling, flowing, rising).

pub mod simulation;
pub mod world;

pub use sandbox_simulation as materials;

pub use world::{ScanOrder, SimConfig, SimError, Simulation, TickClock, TickStats};
