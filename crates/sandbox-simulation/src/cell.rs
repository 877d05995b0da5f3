//! Cell type and constants
//!
//! A cell is the atomic simulation unit: a material tag, a temperature, a
//! stagnation counter and exactly one category-specific payload.

use crate::{Category, CodecError, Material};
use serde::{Deserialize, Serialize};

/// Absolute zero, minimum temperature
pub const TEMP_MIN: i16 = -273;

/// Maximum temperature
pub const TEMP_MAX: i16 = 3000;

/// Largest packed liquid density
pub const DENSITY_MAX: u8 = 15;

/// Ceiling of the stagnation counter
pub const STAGNATION_MAX: u16 = 1024;

/// Ceiling of gas and other-category lifetimes
pub const LIFETIME_MAX: u8 = u8::MAX;

/// Clamp a temperature into `[TEMP_MIN, TEMP_MAX]`
#[inline]
pub fn clamp_temperature(temperature: i32) -> i16 {
    temperature.clamp(TEMP_MIN as i32, TEMP_MAX as i32) as i16
}

/// Category-specific cell data; the variant always matches the material's category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    Solid { can_fall: bool },
    Liquid { density: u8 },
    Gas { lifetime: u8 },
    Other { parent: bool, lifetime: u8 },
}

impl Payload {
    fn category(&self) -> Category {
        match self {
            Payload::Solid { .. } => Category::Solid,
            Payload::Liquid { .. } => Category::Liquid,
            Payload::Gas { .. } => Category::Gas,
            Payload::Other { .. } => Category::Other,
        }
    }
}

/// A single grid cell
///
/// Deserialization goes through [`Cell::from_parts`], so a decoded cell holds
/// the same invariants as one built with [`Cell::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CellRecord")]
pub struct Cell {
    material: Material,
    temperature: i16,
    /// Consecutive ticks without a relocation
    stagnation: u16,
    thermal_conductivity: u8,
    payload: Payload,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// Inert cell at the empty material's ambient temperature
    pub const EMPTY: Cell = Cell {
        material: Material::Empty,
        temperature: 20,
        stagnation: 0,
        thermal_conductivity: 0,
        payload: Payload::Other {
            parent: false,
            lifetime: 0,
        },
    };

    /// Canonical constructor
    ///
    /// Panics if `temperature` is outside `[TEMP_MIN, TEMP_MAX]` or `density`
    /// exceeds `DENSITY_MAX`; both are caller contract violations.
    pub fn new(material: Material, temperature: i32, density: u8, can_fall: bool) -> Self {
        assert!(
            (TEMP_MIN as i32..=TEMP_MAX as i32).contains(&temperature),
            "Cell::new: temperature {temperature} out of bounds for {material}"
        );
        assert!(
            density <= DENSITY_MAX,
            "Cell::new: density {density} out of bounds for {material}"
        );

        let payload = match material.category() {
            Category::Solid => Payload::Solid { can_fall },
            Category::Liquid => Payload::Liquid { density },
            Category::Gas => Payload::Gas { lifetime: 0 },
            Category::Other => Payload::Other {
                parent: false,
                lifetime: 0,
            },
        };

        Self {
            material,
            temperature: temperature as i16,
            stagnation: 0,
            thermal_conductivity: material.props().thermal_conductivity,
            payload,
        }
    }

    /// Build a cell from the property table defaults
    pub fn from_material(material: Material) -> Self {
        let props = material.props();
        Self::new(
            material,
            props.ambient_temperature as i32,
            props.density,
            props.can_fall,
        )
    }

    /// Build a cell from the property table defaults at a given temperature
    pub fn from_material_at(material: Material, temperature: i32) -> Self {
        let props = material.props();
        Self::new(material, temperature, props.density, props.can_fall)
    }

    /// Inert cell that keeps a temperature (clamped)
    pub fn empty_with_temperature(temperature: i32) -> Self {
        Self::from_material_at(Material::Empty, clamp_temperature(temperature) as i32)
    }

    #[inline]
    pub fn material(&self) -> Material {
        self.material
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.material.category()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.material.is_empty()
    }

    #[inline]
    pub fn temperature(&self) -> i16 {
        self.temperature
    }

    /// Set the temperature, clamped into range
    #[inline]
    pub fn set_temperature(&mut self, temperature: i32) {
        self.temperature = clamp_temperature(temperature);
    }

    pub fn with_temperature(mut self, temperature: i32) -> Self {
        self.set_temperature(temperature);
        self
    }

    #[inline]
    pub fn stagnation(&self) -> u16 {
        self.stagnation
    }

    /// Count one more tick without relocation (saturating)
    #[inline]
    pub fn bump_stagnation(&mut self) {
        self.stagnation = (self.stagnation + 1).min(STAGNATION_MAX);
    }

    #[inline]
    pub fn reset_stagnation(&mut self) {
        self.stagnation = 0;
    }

    #[inline]
    pub fn thermal_conductivity(&self) -> u8 {
        self.thermal_conductivity
    }

    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Solid payload: whether this solid falls
    pub fn can_fall(&self) -> bool {
        match self.payload {
            Payload::Solid { can_fall } => can_fall,
            _ => panic!("can_fall read on {} cell", self.material),
        }
    }

    /// Liquid payload: packed density
    pub fn density(&self) -> u8 {
        match self.payload {
            Payload::Liquid { density } => density,
            _ => panic!("density read on {} cell", self.material),
        }
    }

    /// Gas or other payload: lifetime in ticks
    pub fn lifetime(&self) -> u8 {
        match self.payload {
            Payload::Gas { lifetime } | Payload::Other { lifetime, .. } => lifetime,
            _ => panic!("lifetime read on {} cell", self.material),
        }
    }

    /// Set the lifetime (saturates at `LIFETIME_MAX`)
    pub fn set_lifetime(&mut self, value: u32) {
        let value = value.min(LIFETIME_MAX as u32) as u8;
        match &mut self.payload {
            Payload::Gas { lifetime } | Payload::Other { lifetime, .. } => *lifetime = value,
            _ => panic!("lifetime write on {} cell", self.material),
        }
    }

    pub fn with_lifetime(mut self, value: u32) -> Self {
        self.set_lifetime(value);
        self
    }

    /// Other payload: set on cells spawned by a cell of the same material
    pub fn is_parent(&self) -> bool {
        match self.payload {
            Payload::Other { parent, .. } => parent,
            _ => panic!("parent flag read on {} cell", self.material),
        }
    }

    pub fn set_parent(&mut self, value: bool) {
        match &mut self.payload {
            Payload::Other { parent, .. } => *parent = value,
            _ => panic!("parent flag write on {} cell", self.material),
        }
    }

    /// Inspection view with every payload field flattened
    ///
    /// Fields foreign to the cell's category read as zero/false.
    pub fn snapshot(&self) -> CellSnapshot {
        let (density, lifetime, can_fall, parent) = match self.payload {
            Payload::Solid { can_fall } => (0, 0, can_fall, false),
            Payload::Liquid { density } => (density, 0, false, false),
            Payload::Gas { lifetime } => (0, lifetime, false, false),
            Payload::Other { parent, lifetime } => (0, lifetime, false, parent),
        };

        CellSnapshot {
            material: self.material,
            category: self.category(),
            temperature: self.temperature,
            density,
            lifetime,
            can_fall,
            parent,
            stagnation: self.stagnation,
        }
    }

    /// Reassemble a cell from raw parts, checking every cell invariant
    ///
    /// Used by the packed codec and by deserialization.
    pub fn from_parts(
        material: Material,
        temperature: i16,
        stagnation: u16,
        thermal_conductivity: u8,
        payload: Payload,
    ) -> Result<Self, CodecError> {
        let category = material.category();
        if payload.category() != category {
            return Err(CodecError::PayloadMismatch {
                material,
                found: payload.category(),
            });
        }
        if !(TEMP_MIN..=TEMP_MAX).contains(&temperature) {
            return Err(CodecError::TemperatureOutOfRange(temperature as i32));
        }
        if stagnation > STAGNATION_MAX {
            return Err(CodecError::StagnationOutOfRange(stagnation));
        }
        if let Payload::Liquid { density } = payload
            && density > DENSITY_MAX
        {
            return Err(CodecError::DensityOutOfRange(density));
        }

        Ok(Self {
            material,
            temperature,
            stagnation,
            thermal_conductivity,
            payload,
        })
    }
}

/// Unchecked wire shape of a [`Cell`]
#[derive(Deserialize)]
#[serde(rename = "Cell")]
struct CellRecord {
    material: Material,
    temperature: i16,
    stagnation: u16,
    thermal_conductivity: u8,
    payload: Payload,
}

impl TryFrom<CellRecord> for Cell {
    type Error = CodecError;

    fn try_from(record: CellRecord) -> Result<Self, Self::Error> {
        Cell::from_parts(
            record.material,
            record.temperature,
            record.stagnation,
            record.thermal_conductivity,
            record.payload,
        )
    }
}

/// Read-only view of a cell for rendering and inspection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub material: Material,
    pub category: Category,
    pub temperature: i16,
    pub density: u8,
    pub lifetime: u8,
    pub can_fall: bool,
    pub parent: bool,
    pub stagnation: u16,
}
