//! Per-cell simulation systems - heat, motion, material rules

pub mod motion;
pub mod rules;
pub mod state_changes;
pub mod temperature;

pub use motion::Motion;
pub use rules::{MaterialRules, TickContext};
pub use state_changes::{PHASE_TRANSITIONS, PhaseTransition, StateChangeSystem, Threshold};
pub use temperature::{DIFFUSION_RATE, HeatDiffusion, MAX_DIFFUSION_RATE};

// Re-export from sandbox-simulation for convenience
pub use sandbox_simulation::{
    Category, Cell, CellSnapshot, Material, MaterialProps, Payload, TEMP_MAX, TEMP_MIN,
};
