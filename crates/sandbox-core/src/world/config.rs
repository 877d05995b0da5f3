//! Simulation parameters and construction errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::simulation::{DIFFUSION_RATE, MAX_DIFFUSION_RATE};

/// Largest accepted grid side
pub const MAX_DIMENSION: usize = 4096;

/// Errors raised when a simulation cannot be built from its configuration
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("grid dimensions {width}x{height} must each be between 1 and 4096")]
    InvalidDimensions { width: usize, height: usize },

    #[error("diffusion rate {0} must be in (0, 0.125]")]
    InvalidDiffusionRate(f32),
}

/// Parameters fixed for the lifetime of a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Seed of the simulation's random source
    pub seed: u64,
    /// Fraction of each neighbor temperature difference exchanged per visit
    pub diffusion_rate: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 150,
            seed: 0,
            diffusion_rate: DIFFUSION_RATE,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        let side_ok = |side: usize| (1..=MAX_DIMENSION).contains(&side);
        if !side_ok(self.width) || !side_ok(self.height) {
            return Err(SimError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        // Also rejects NaN
        if !(self.diffusion_rate > 0.0 && self.diffusion_rate <= MAX_DIFFUSION_RATE) {
            return Err(SimError::InvalidDiffusionRate(self.diffusion_rate));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert_eq!(config.width, 200);
        assert_eq!(config.height, 150);
        assert_eq!(config.diffusion_rate, 0.01);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_and_huge_dimensions() {
        let config = SimConfig {
            width: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(SimError::InvalidDimensions {
                width: 0,
                height: 150
            })
        );

        let config = SimConfig {
            height: MAX_DIMENSION + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unstable_rates() {
        for rate in [0.0, -0.01, 0.2, f32::NAN] {
            let config = SimConfig {
                diffusion_rate: rate,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(SimError::InvalidDiffusionRate(_))),
                "rate {rate} accepted"
            );
        }

        let config = SimConfig {
            diffusion_rate: MAX_DIFFUSION_RATE,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config: SimConfig = ron::from_str("(width: 64, seed: 7)").unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 150);
        assert_eq!(config.seed, 7);
        assert_eq!(config.diffusion_rate, DIFFUSION_RATE);
    }

    #[test]
    fn test_error_messages() {
        let err = SimError::InvalidDiffusionRate(0.5);
        assert_eq!(err.to_string(), "diffusion rate 0.5 must be in (0, 0.125]");
    }
}
