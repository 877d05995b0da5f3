//! Material and cell data for the sandbox simulation
//!
//! This crate provides the foundational data types the engine works on:
//! - Material tags, categories and the static property table
//! - The cell value with its category-specific payload
//! - A packed fixed-size encoding of cells

mod cell;
mod codec;
mod materials;

pub use cell::{
    Cell, CellSnapshot, DENSITY_MAX, LIFETIME_MAX, Payload, STAGNATION_MAX, TEMP_MAX, TEMP_MIN,
    clamp_temperature,
};
pub use codec::{CodecError, PackedCell};
pub use materials::{Category, MATERIAL_COUNT, Material, MaterialProps};
