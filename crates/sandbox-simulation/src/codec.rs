//! Packed cell encoding
//!
//! Packs a cell into a single `u64` word:
//!
//! | bits  | field                              |
//! |-------|------------------------------------|
//! | 0-3   | material index                     |
//! | 4-5   | category                           |
//! | 6-18  | temperature, biased by `-TEMP_MIN` |
//! | 19-29 | stagnation counter                 |
//! | 30-37 | thermal conductivity               |
//! | 38-45 | payload byte                       |
//! | 46    | parent flag (other category)       |
//! | 47-63 | unused, always zero                |
//!
//! The payload byte holds `can_fall` (solid), `density` (liquid) or
//! `lifetime` (gas, other). This is a footprint and fingerprint format only.

use crate::cell::{TEMP_MAX, TEMP_MIN};
use crate::{Category, Cell, Material, Payload};
use thiserror::Error;

const MATERIAL_SHIFT: u32 = 0;
const CATEGORY_SHIFT: u32 = 4;
const TEMPERATURE_SHIFT: u32 = 6;
const STAGNATION_SHIFT: u32 = 19;
const CONDUCTIVITY_SHIFT: u32 = 30;
const PAYLOAD_SHIFT: u32 = 38;
const PARENT_SHIFT: u32 = 46;

const MATERIAL_MASK: u64 = 0xF;
const CATEGORY_MASK: u64 = 0x3;
const TEMPERATURE_MASK: u64 = 0x1FFF;
const STAGNATION_MASK: u64 = 0x7FF;
const BYTE_MASK: u64 = 0xFF;
/// Bits 47-63
const UNUSED_MASK: u64 = !0 << (PARENT_SHIFT + 1);

/// Errors raised when a packed word or a serialized record does not describe a valid cell
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid material index {0}")]
    InvalidMaterial(u8),

    #[error("material {material} stored with category bits {stored}")]
    CategoryMismatch { material: Material, stored: u8 },

    #[error("{material} cell carries a {found:?} payload")]
    PayloadMismatch { material: Material, found: Category },

    #[error("temperature {0} outside [-273, 3000]")]
    TemperatureOutOfRange(i32),

    #[error("stagnation {0} above the counter ceiling")]
    StagnationOutOfRange(u16),

    #[error("density {0} above 15")]
    DensityOutOfRange(u8),

    #[error("solid flag byte {0:#04x} has reserved bits set")]
    ReservedBits(u8),

    #[error("unused bits set: {0:#x}")]
    UnusedBits(u64),
}

/// A cell packed into one machine word
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct PackedCell(pub u64);

impl PackedCell {
    #[inline]
    fn field(self, shift: u32, mask: u64) -> u64 {
        (self.0 >> shift) & mask
    }

    #[inline]
    pub fn material_bits(self) -> u8 {
        self.field(MATERIAL_SHIFT, MATERIAL_MASK) as u8
    }

    #[inline]
    pub fn category_bits(self) -> u8 {
        self.field(CATEGORY_SHIFT, CATEGORY_MASK) as u8
    }

    /// Unbiased temperature
    #[inline]
    pub fn temperature(self) -> i32 {
        self.field(TEMPERATURE_SHIFT, TEMPERATURE_MASK) as i32 + TEMP_MIN as i32
    }

    #[inline]
    pub fn stagnation(self) -> u16 {
        self.field(STAGNATION_SHIFT, STAGNATION_MASK) as u16
    }

    #[inline]
    pub fn thermal_conductivity(self) -> u8 {
        self.field(CONDUCTIVITY_SHIFT, BYTE_MASK) as u8
    }

    #[inline]
    pub fn payload_byte(self) -> u8 {
        self.field(PAYLOAD_SHIFT, BYTE_MASK) as u8
    }

    #[inline]
    pub fn parent_bit(self) -> bool {
        self.field(PARENT_SHIFT, 1) == 1
    }

    /// Decode, validating every field against the cell invariants
    ///
    /// Bits above the parent flag must be clear, and so must the parent flag
    /// itself unless the material is in the other category.
    pub fn unpack(self) -> Result<Cell, CodecError> {
        if self.0 & UNUSED_MASK != 0 {
            return Err(CodecError::UnusedBits(self.0 & UNUSED_MASK));
        }

        let material = Material::from_index(self.material_bits())
            .ok_or(CodecError::InvalidMaterial(self.material_bits()))?;

        let category = material.category();
        if self.category_bits() != category as u8 {
            return Err(CodecError::CategoryMismatch {
                material,
                stored: self.category_bits(),
            });
        }

        if category != Category::Other && self.parent_bit() {
            return Err(CodecError::UnusedBits(1 << PARENT_SHIFT));
        }

        let temperature = self.temperature();
        if temperature > TEMP_MAX as i32 {
            return Err(CodecError::TemperatureOutOfRange(temperature));
        }

        let byte = self.payload_byte();
        let payload = match category {
            Category::Solid => {
                if byte > 1 {
                    return Err(CodecError::ReservedBits(byte));
                }
                Payload::Solid { can_fall: byte == 1 }
            }
            Category::Liquid => Payload::Liquid { density: byte },
            Category::Gas => Payload::Gas { lifetime: byte },
            Category::Other => Payload::Other {
                parent: self.parent_bit(),
                lifetime: byte,
            },
        };

        Cell::from_parts(
            material,
            temperature as i16,
            self.stagnation(),
            self.thermal_conductivity(),
            payload,
        )
    }
}

impl Cell {
    /// Encode into a packed word
    pub fn pack(&self) -> PackedCell {
        let (byte, parent) = match *self.payload() {
            Payload::Solid { can_fall } => (can_fall as u64, false),
            Payload::Liquid { density } => (density as u64, false),
            Payload::Gas { lifetime } => (lifetime as u64, false),
            Payload::Other { parent, lifetime } => (lifetime as u64, parent),
        };
        let biased = (self.temperature() as i32 - TEMP_MIN as i32) as u64;

        PackedCell(
            (self.material().index() as u64) << MATERIAL_SHIFT
                | (self.category() as u64) << CATEGORY_SHIFT
                | (biased & TEMPERATURE_MASK) << TEMPERATURE_SHIFT
                | (self.stagnation() as u64 & STAGNATION_MASK) << STAGNATION_SHIFT
                | (self.thermal_conductivity() as u64) << CONDUCTIVITY_SHIFT
                | byte << PAYLOAD_SHIFT
                | (parent as u64) << PARENT_SHIFT,
        )
    }
}
