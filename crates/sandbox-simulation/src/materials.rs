//! Material definitions and the static property table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of material tags
pub const MATERIAL_COUNT: usize = 13;

/// Built-in material tags (index order is fixed, see [`Material::index`])
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Material {
    /// Vacuum/air, the inert tag
    Empty = 0,
    Sand = 1,
    Water = 2,
    Stone = 3,
    Fire = 4,
    Oil = 5,
    Wood = 6,
    Steam = 7,
    Smoke = 8,
    Electricity = 9,
    Glass = 10,
    Lava = 11,
    /// One-shot heat sink, reverts to empty after a single tick
    Cold = 12,
}

/// Coarse grouping of materials
///
/// The category selects which payload a cell carries and which motion
/// primitive moves it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    /// Falls if allowed to (sand), otherwise static (stone, wood, glass)
    Solid = 0,
    /// Flows, seeks level and displaces lighter liquids
    Liquid = 1,
    /// Rises into empty space
    Gas = 2,
    /// Lifetime-driven or inert (fire, electricity, cold, empty)
    Other = 3,
}

impl Category {
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Category::Solid),
            1 => Some(Category::Liquid),
            2 => Some(Category::Gas),
            3 => Some(Category::Other),
            _ => None,
        }
    }
}

/// Static per-material defaults
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialProps {
    /// Temperature a freshly painted cell starts at (Celsius)
    pub ambient_temperature: i16,
    /// Packed density class (0-15), compared between liquids
    pub density: u8,
    /// Whether a solid of this material falls
    pub can_fall: bool,
    /// Reserved for per-material diffusion tuning (0 = insulating, 255 = conducting)
    pub thermal_conductivity: u8,
}

const fn props(ambient_temperature: i16, density: u8, can_fall: bool) -> MaterialProps {
    MaterialProps {
        ambient_temperature,
        density,
        can_fall,
        thermal_conductivity: 0,
    }
}

/// Property table, indexed by [`Material::index`]
const PROPERTY_TABLE: [MaterialProps; MATERIAL_COUNT] = [
    //    temp  dens  fall
    props(20, 0, false),     // empty
    props(20, 10, true),     // sand
    props(20, 8, false),     // water
    props(20, 12, false),    // stone
    props(1000, 0, false),   // fire
    props(20, 6, false),     // oil
    props(20, 5, false),     // wood
    props(100, 0, false),    // steam
    props(100, 0, false),    // smoke
    props(3000, 0, false),   // electricity
    props(1700, 12, false),  // glass
    props(1200, 12, false),  // lava
    props(-273, 0, false),   // cold
];

impl Material {
    /// All materials in index order
    pub const ALL: [Material; MATERIAL_COUNT] = [
        Material::Empty,
        Material::Sand,
        Material::Water,
        Material::Stone,
        Material::Fire,
        Material::Oil,
        Material::Wood,
        Material::Steam,
        Material::Smoke,
        Material::Electricity,
        Material::Glass,
        Material::Lava,
        Material::Cold,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Category of this material; a fixed mapping
    pub fn category(self) -> Category {
        match self {
            Material::Sand | Material::Stone | Material::Wood | Material::Glass => Category::Solid,
            Material::Water | Material::Oil | Material::Lava => Category::Liquid,
            Material::Steam | Material::Smoke => Category::Gas,
            Material::Fire | Material::Electricity | Material::Cold | Material::Empty => {
                Category::Other
            }
        }
    }

    /// Property table row for this material
    #[inline]
    pub fn props(self) -> &'static MaterialProps {
        &PROPERTY_TABLE[self as usize]
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Material::Empty
    }

    pub fn name(self) -> &'static str {
        match self {
            Material::Empty => "empty",
            Material::Sand => "sand",
            Material::Water => "water",
            Material::Stone => "stone",
            Material::Fire => "fire",
            Material::Oil => "oil",
            Material::Wood => "wood",
            Material::Steam => "steam",
            Material::Smoke => "smoke",
            Material::Electricity => "electricity",
            Material::Glass => "glass",
            Material::Lava => "lava",
            Material::Cold => "cold",
        }
    }

    /// Look up a material by its lower-case name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.name() == name)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
