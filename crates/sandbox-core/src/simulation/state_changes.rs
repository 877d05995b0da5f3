//! State change system
//!
//! Handles temperature-driven material transitions:
//! - Vitrifying (sand → glass)
//! - Boiling and condensing (water ↔ steam)
//! - Melting and solidifying (stone ↔ lava, with a hysteresis band)
//! - Igniting (wood → fire)

use sandbox_simulation::{Cell, Material};

/// Temperature condition that triggers a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Threshold {
    AtOrAbove(i16),
    AtOrBelow(i16),
}

impl Threshold {
    #[inline]
    pub fn is_met(self, temperature: i16) -> bool {
        match self {
            Threshold::AtOrAbove(limit) => temperature >= limit,
            Threshold::AtOrBelow(limit) => temperature <= limit,
        }
    }
}

/// One row of the transition table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: Material,
    pub threshold: Threshold,
    pub to: Material,
}

/// Stone melts at 1205 but lava only solidifies at 1195
pub const MELTING_POINT: i16 = 1205;
pub const SOLIDIFYING_POINT: i16 = 1195;

/// Water boils and steam condenses at the same temperature
pub const BOILING_POINT: i16 = 100;

pub const VITRIFYING_POINT: i16 = 1700;
pub const IGNITION_POINT: i16 = 300;

/// Every temperature-driven transition; at most one row exists per source material
pub const PHASE_TRANSITIONS: [PhaseTransition; 6] = [
    PhaseTransition {
        from: Material::Sand,
        threshold: Threshold::AtOrAbove(VITRIFYING_POINT),
        to: Material::Glass,
    },
    PhaseTransition {
        from: Material::Water,
        threshold: Threshold::AtOrAbove(BOILING_POINT),
        to: Material::Steam,
    },
    PhaseTransition {
        from: Material::Steam,
        threshold: Threshold::AtOrBelow(BOILING_POINT),
        to: Material::Water,
    },
    PhaseTransition {
        from: Material::Stone,
        threshold: Threshold::AtOrAbove(MELTING_POINT),
        to: Material::Lava,
    },
    PhaseTransition {
        from: Material::Lava,
        threshold: Threshold::AtOrBelow(SOLIDIFYING_POINT),
        to: Material::Stone,
    },
    PhaseTransition {
        from: Material::Wood,
        threshold: Threshold::AtOrAbove(IGNITION_POINT),
        to: Material::Fire,
    },
];

/// System for checking state changes
pub struct StateChangeSystem;

impl StateChangeSystem {
    /// Material `material` turns into at `temperature`, if any
    pub fn transition_for(material: Material, temperature: i16) -> Option<Material> {
        PHASE_TRANSITIONS
            .iter()
            .find(|t| t.from == material && t.threshold.is_met(temperature))
            .map(|t| t.to)
    }

    /// Check whether `cell` changes state
    ///
    /// The threshold is tested against the cell's own temperature. The
    /// replacement is a freshly constructed cell of the target material that
    /// carries `carried_temperature`, so heat gained or lost this tick survives
    /// the change.
    pub fn check_state_change(cell: &Cell, carried_temperature: i16) -> Option<Cell> {
        Self::transition_for(cell.material(), cell.temperature())
            .map(|to| Cell::from_material_at(to, carried_temperature as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_row_per_source() {
        for (i, a) in PHASE_TRANSITIONS.iter().enumerate() {
            for b in &PHASE_TRANSITIONS[i + 1..] {
                assert_ne!(a.from, b.from);
            }
        }
    }

    #[test]
    fn test_boiling_threshold_exact() {
        assert_eq!(StateChangeSystem::transition_for(Material::Water, 99), None);
        assert_eq!(
            StateChangeSystem::transition_for(Material::Water, 100),
            Some(Material::Steam)
        );
    }

    #[test]
    fn test_condensing() {
        assert_eq!(StateChangeSystem::transition_for(Material::Steam, 101), None);
        assert_eq!(
            StateChangeSystem::transition_for(Material::Steam, 100),
            Some(Material::Water)
        );
    }

    #[test]
    fn test_stone_lava_hysteresis_band() {
        for temperature in (SOLIDIFYING_POINT + 1)..MELTING_POINT {
            assert_eq!(
                StateChangeSystem::transition_for(Material::Stone, temperature),
                None
            );
            assert_eq!(
                StateChangeSystem::transition_for(Material::Lava, temperature),
                None
            );
        }
        assert_eq!(
            StateChangeSystem::transition_for(Material::Stone, MELTING_POINT),
            Some(Material::Lava)
        );
        assert_eq!(
            StateChangeSystem::transition_for(Material::Lava, SOLIDIFYING_POINT),
            Some(Material::Stone)
        );
    }

    #[test]
    fn test_sand_vitrifies_and_wood_ignites() {
        assert_eq!(
            StateChangeSystem::transition_for(Material::Sand, 1699),
            None
        );
        assert_eq!(
            StateChangeSystem::transition_for(Material::Sand, 1700),
            Some(Material::Glass)
        );
        assert_eq!(StateChangeSystem::transition_for(Material::Wood, 299), None);
        assert_eq!(
            StateChangeSystem::transition_for(Material::Wood, 300),
            Some(Material::Fire)
        );
    }

    #[test]
    fn test_materials_without_transitions() {
        for material in [
            Material::Empty,
            Material::Oil,
            Material::Glass,
            Material::Fire,
            Material::Smoke,
            Material::Electricity,
            Material::Cold,
        ] {
            assert_eq!(StateChangeSystem::transition_for(material, 3000), None);
            assert_eq!(StateChangeSystem::transition_for(material, -273), None);
        }
    }

    #[test]
    fn test_check_state_change_builds_canonical_cell() {
        let water = Cell::from_material(Material::Water).with_temperature(100);
        let steam = StateChangeSystem::check_state_change(&water, 97).unwrap();
        assert_eq!(steam.material(), Material::Steam);
        assert_eq!(steam.temperature(), 97);
        assert_eq!(steam.lifetime(), 0);
        assert_eq!(steam.stagnation(), 0);

        let cool = Cell::from_material(Material::Water);
        assert!(StateChangeSystem::check_state_change(&cool, 120).is_none());
    }
}
