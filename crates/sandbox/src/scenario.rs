//! Scenario definitions: paint actions applied before the first tick
//!
//! Built-in scenarios are generated for the configured grid size. Custom ones
//! are loaded from RON files with the same action vocabulary.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use sandbox_core::Simulation;
use sandbox_core::materials::{Material, clamp_temperature};
use serde::{Deserialize, Serialize};

/// Built-in starting worlds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioKind {
    /// Sand poured onto a floor next to a pool
    SandPile,
    /// A stone pot of water sitting on lava
    BoilingPot,
    /// Wood stack lit from above with an oil puddle nearby
    Bonfire,
    /// Lava running down stone steps into sand and water
    LavaFlow,
    /// Rain, lightning and a cold front over a tree
    Storm,
}

impl ScenarioKind {
    /// Lay out the scenario for a `width` x `height` grid
    pub fn definition(self, width: usize, height: usize) -> ScenarioDefinition {
        let (w, h) = (width as i32, height as i32);
        let floor = PaintAction::Rect {
            x: 0,
            y: h - 3,
            width: w,
            height: 3,
            material: Material::Stone,
        };

        let (name, description, actions) = match self {
            ScenarioKind::SandPile => (
                "sand-pile",
                "Sand poured onto a floor next to a pool",
                vec![
                    floor,
                    PaintAction::Circle {
                        cx: w / 3,
                        cy: h / 4,
                        radius: (w.min(h) / 8).max(1),
                        material: Material::Sand,
                    },
                    PaintAction::Rect {
                        x: w / 2,
                        y: h - 3 - h / 6,
                        width: w / 3,
                        height: h / 6,
                        material: Material::Water,
                    },
                ],
            ),
            ScenarioKind::BoilingPot => {
                let pot_x = w / 4;
                let pot_w = w / 2;
                let pot_top = h / 2;
                let pot_bottom = h - 8;
                (
                    "boiling-pot",
                    "A stone pot of water sitting on lava",
                    vec![
                        floor,
                        PaintAction::Rect {
                            x: 0,
                            y: pot_bottom + 1,
                            width: w,
                            height: 4,
                            material: Material::Lava,
                        },
                        PaintAction::Rect {
                            x: pot_x,
                            y: pot_bottom - 1,
                            width: pot_w,
                            height: 2,
                            material: Material::Stone,
                        },
                        PaintAction::Rect {
                            x: pot_x,
                            y: pot_top,
                            width: 2,
                            height: pot_bottom - pot_top,
                            material: Material::Stone,
                        },
                        PaintAction::Rect {
                            x: pot_x + pot_w - 2,
                            y: pot_top,
                            width: 2,
                            height: pot_bottom - pot_top,
                            material: Material::Stone,
                        },
                        PaintAction::Rect {
                            x: pot_x + 2,
                            y: pot_top + 4,
                            width: pot_w - 4,
                            height: pot_bottom - pot_top - 5,
                            material: Material::Water,
                        },
                    ],
                )
            }
            ScenarioKind::Bonfire => {
                let base = h - 3;
                let mut actions = vec![floor];
                // Log pile: shrinking layers of wood
                for layer in 0..4 {
                    actions.push(PaintAction::Rect {
                        x: w / 2 - 12 + layer * 3,
                        y: base - (layer + 1) * 3,
                        width: 24 - layer * 6,
                        height: 3,
                        material: Material::Wood,
                    });
                }
                actions.push(PaintAction::Cell {
                    x: w / 2,
                    y: base - 13,
                    material: Material::Fire,
                    temperature: None,
                });
                actions.push(PaintAction::Rect {
                    x: w / 2 + 20,
                    y: base - 2,
                    width: 12,
                    height: 2,
                    material: Material::Oil,
                });
                ("bonfire", "Wood stack lit from above with an oil puddle nearby", actions)
            }
            ScenarioKind::LavaFlow => {
                let mut actions = vec![floor];
                for step in 0..5 {
                    actions.push(PaintAction::Rect {
                        x: 0,
                        y: h / 3 + step * (h / 10),
                        width: w / 3 - step * (w / 20),
                        height: h,
                        material: Material::Stone,
                    });
                }
                actions.push(PaintAction::Circle {
                    cx: w / 10,
                    cy: h / 3 - 6,
                    radius: 5,
                    material: Material::Lava,
                });
                actions.push(PaintAction::Rect {
                    x: w / 2,
                    y: h - 9,
                    width: w / 5,
                    height: 6,
                    material: Material::Sand,
                });
                actions.push(PaintAction::Rect {
                    x: w / 2 + w / 5,
                    y: h - 9,
                    width: w / 5,
                    height: 6,
                    material: Material::Water,
                });
                (
                    "lava-flow",
                    "Lava running down stone steps into sand and water",
                    actions,
                )
            }
            ScenarioKind::Storm => {
                let mut actions = vec![
                    floor,
                    // Trunk and canopy
                    PaintAction::Rect {
                        x: w / 2 - 1,
                        y: h - 3 - h / 4,
                        width: 3,
                        height: h / 4,
                        material: Material::Wood,
                    },
                    PaintAction::Circle {
                        cx: w / 2,
                        cy: h - 3 - h / 4,
                        radius: (h / 10).max(1),
                        material: Material::Wood,
                    },
                    PaintAction::Circle {
                        cx: w / 5,
                        cy: h / 2,
                        radius: 4,
                        material: Material::Cold,
                    },
                ];
                for i in 0..8 {
                    actions.push(PaintAction::Cell {
                        x: w * (2 * i + 1) / 16,
                        y: 2 + (i % 3) * 2,
                        material: Material::Water,
                        temperature: None,
                    });
                    actions.push(PaintAction::Circle {
                        cx: w * (2 * i + 1) / 16,
                        cy: 1,
                        radius: 1,
                        material: Material::Smoke,
                    });
                }
                actions.push(PaintAction::Line {
                    x0: w / 2,
                    y0: 4,
                    x1: w / 2 + 3,
                    y1: h / 3,
                    material: Material::Electricity,
                });
                ("storm", "Rain, lightning and a cold front over a tree", actions)
            }
        };

        ScenarioDefinition {
            name: name.to_string(),
            description: description.to_string(),
            setup: actions,
        }
    }
}

/// One painting step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaintAction {
    /// A single cell, optionally at a chosen temperature
    Cell {
        x: i32,
        y: i32,
        material: Material,
        #[serde(default)]
        temperature: Option<i32>,
    },
    /// Filled axis-aligned rectangle
    Rect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        material: Material,
    },
    /// Filled disk
    Circle {
        cx: i32,
        cy: i32,
        radius: i32,
        material: Material,
    },
    /// Straight line between two points, both ends included
    Line {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        material: Material,
    },
}

impl PaintAction {
    /// Paint the in-bounds part of this action; returns cells painted
    pub fn apply(&self, sim: &mut Simulation) -> usize {
        match *self {
            PaintAction::Cell {
                x,
                y,
                material,
                temperature,
            } => {
                if !sim.in_bounds(x, y) {
                    return 0;
                }
                let (x, y) = (x as usize, y as usize);
                match temperature {
                    Some(t) => {
                        sim.paint_with_temperature(x, y, material, clamp_temperature(t) as i32)
                    }
                    None => sim.paint(x, y, material),
                }
                1
            }
            PaintAction::Rect {
                x,
                y,
                width,
                height,
                material,
            } => sim.paint_rect(x, y, width, height, material),
            PaintAction::Circle {
                cx,
                cy,
                radius,
                material,
            } => sim.paint_circle(cx, cy, radius, material),
            PaintAction::Line {
                x0,
                y0,
                x1,
                y1,
                material,
            } => sim.paint_line((x0, y0), (x1, y1), material),
        }
    }
}

/// A named list of paint actions, loadable from RON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    /// Scenario name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Paint actions, applied in order
    pub setup: Vec<PaintAction>,
}

impl ScenarioDefinition {
    /// Load scenario from RON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;

        let scenario = ron::from_str(&content)
            .with_context(|| format!("Failed to parse RON scenario: {}", path.display()))?;

        Ok(scenario)
    }

    /// Paint every action into `sim`; returns the total cells painted
    pub fn apply(&self, sim: &mut Simulation) -> usize {
        let painted = self.setup.iter().map(|action| action.apply(sim)).sum();
        log::info!(
            "Scenario '{}': {} actions, {} cells painted",
            self.name,
            self.setup.len(),
            painted
        );
        painted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandbox_core::SimConfig;

    fn sim(width: usize, height: usize) -> Simulation {
        Simulation::new(SimConfig {
            width,
            height,
            ..Default::default()
        })
        .unwrap()
    }

    fn count(sim: &Simulation, material: Material) -> usize {
        sim.material_counts()[material.index() as usize]
    }

    #[test]
    fn test_every_scenario_paints_on_default_grid() {
        for kind in ScenarioKind::value_variants() {
            let mut sim = sim(200, 150);
            let definition = kind.definition(200, 150);
            assert!(definition.apply(&mut sim) > 0, "{kind:?}");
            assert!(count(&sim, Material::Stone) >= 200 * 3, "{kind:?} has no floor");
        }
    }

    #[test]
    fn test_scenarios_fit_small_grids() {
        for kind in ScenarioKind::value_variants() {
            let mut sim = sim(24, 20);
            // Clipping keeps every action inside the grid
            kind.definition(24, 20).apply(&mut sim);
            sim.tick();
        }
    }

    #[test]
    fn test_scenario_contents() {
        let mut pot = sim(120, 80);
        ScenarioKind::BoilingPot.definition(120, 80).apply(&mut pot);
        assert!(count(&pot, Material::Water) > 0);
        assert!(count(&pot, Material::Lava) > 0);

        let mut fire = sim(120, 80);
        ScenarioKind::Bonfire.definition(120, 80).apply(&mut fire);
        assert_eq!(count(&fire, Material::Fire), 1);
        assert!(count(&fire, Material::Wood) > 0);
        assert!(count(&fire, Material::Oil) > 0);

        let mut storm = sim(120, 80);
        ScenarioKind::Storm.definition(120, 80).apply(&mut storm);
        assert!(count(&storm, Material::Electricity) > 0);
        assert!(count(&storm, Material::Cold) > 0);
    }

    #[test]
    fn test_rect_clips_and_counts() {
        let mut sim = sim(10, 10);
        let action = PaintAction::Rect {
            x: -2,
            y: 8,
            width: 5,
            height: 5,
            material: Material::Sand,
        };
        // Columns 0..3, rows 8..10
        assert_eq!(action.apply(&mut sim), 6);

        let empty = PaintAction::Rect {
            x: 0,
            y: 0,
            width: -4,
            height: 3,
            material: Material::Sand,
        };
        assert_eq!(empty.apply(&mut sim), 0);
    }

    #[test]
    fn test_extreme_coordinates_stay_on_grid() {
        let mut sim = sim(10, 10);
        let actions = [
            PaintAction::Rect {
                x: i32::MAX,
                y: i32::MAX,
                width: i32::MAX,
                height: i32::MAX,
                material: Material::Sand,
            },
            PaintAction::Circle {
                cx: i32::MIN,
                cy: 0,
                radius: i32::MAX,
                material: Material::Sand,
            },
            PaintAction::Line {
                x0: i32::MIN,
                y0: i32::MAX,
                x1: i32::MAX,
                y1: i32::MIN,
                material: Material::Sand,
            },
        ];
        let painted: usize = actions.iter().map(|a| a.apply(&mut sim)).sum();
        assert_eq!(painted, count(&sim, Material::Sand));

        let fill = PaintAction::Rect {
            x: i32::MIN,
            y: i32::MIN,
            width: i32::MAX,
            height: i32::MAX,
            material: Material::Water,
        };
        assert_eq!(fill.apply(&mut sim), 0);

        let disk = PaintAction::Circle {
            cx: 5,
            cy: 5,
            radius: i32::MAX,
            material: Material::Stone,
        };
        assert_eq!(disk.apply(&mut sim), 100);
    }

    #[test]
    fn test_line_includes_both_ends() {
        let mut sim = sim(10, 10);
        let line = PaintAction::Line {
            x0: 1,
            y0: 1,
            x1: 6,
            y1: 3,
            material: Material::Stone,
        };
        assert_eq!(line.apply(&mut sim), 6);
        assert_eq!(sim.read(1, 1).material, Material::Stone);
        assert_eq!(sim.read(6, 3).material, Material::Stone);
    }

    #[test]
    fn test_cell_with_temperature() {
        let mut sim = sim(4, 4);
        let hot = PaintAction::Cell {
            x: 2,
            y: 2,
            material: Material::Water,
            temperature: Some(90),
        };
        assert_eq!(hot.apply(&mut sim), 1);
        assert_eq!(sim.read(2, 2).temperature, 90);

        let outside = PaintAction::Cell {
            x: 4,
            y: 0,
            material: Material::Water,
            temperature: None,
        };
        assert_eq!(outside.apply(&mut sim), 0);
    }

    #[test]
    fn test_scenario_from_ron() {
        let ron = r#"(
            name: "puddle",
            setup: [
                Rect(x: 0, y: 7, width: 8, height: 1, material: Stone),
                Circle(cx: 4, cy: 3, radius: 1, material: Water),
                Cell(x: 0, y: 0, material: Lava, temperature: Some(1500)),
            ],
        )"#;
        let definition: ScenarioDefinition = ron::from_str(ron).unwrap();
        assert_eq!(definition.name, "puddle");
        assert!(definition.description.is_empty());

        let mut sim = sim(8, 8);
        assert_eq!(definition.apply(&mut sim), 8 + 5 + 1);
        assert_eq!(sim.read(0, 0).temperature, 1500);
    }

    #[test]
    fn test_bundled_scenario_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../scenarios/hourglass.ron");
        let definition = ScenarioDefinition::from_file(path).unwrap();
        assert_eq!(definition.name, "hourglass");

        let mut sim = sim(64, 64);
        definition.apply(&mut sim);
        let sand = count(&sim, Material::Sand);
        assert!(sand > 0);
        for _ in 0..50 {
            sim.tick();
        }
        assert_eq!(count(&sim, Material::Sand), sand);
    }

    #[test]
    fn test_missing_scenario_file() {
        let err = ScenarioDefinition::from_file("no/such/scenario.ron").unwrap_err();
        assert!(err.to_string().contains("Failed to read scenario file"));
    }

    #[test]
    fn test_kind_names_match_cli() {
        let kind: ScenarioKind = ron::from_str("\"lava-flow\"").unwrap();
        assert_eq!(kind, ScenarioKind::LavaFlow);
        assert_eq!(
            ScenarioKind::from_str("boiling-pot", false),
            Ok(ScenarioKind::BoilingPot)
        );
    }
}
