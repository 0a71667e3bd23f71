#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::utils::error::{LayoutError, Result};
use crate::utils::validation::{validate_positive_number, validate_range, Validate};
use serde::{Deserialize, Serialize};

/// Tuning knobs of the continent layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Minimum hex separation between unconnected continents.
    pub water_gap: u32,
    /// Minimum hex separation between connected continents.
    pub connected_gap: u32,
    pub padding_ratio: f64,
    pub force_iterations: u32,
    /// Seeds the indicator draws and synthetic data, never the centroid hash.
    pub seed: u64,
    pub collision_rate: f64,
    pub indicator_rate: f64,
    /// Side length of the square the hashed start positions fall in.
    pub initial_scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            water_gap: 2,
            connected_gap: 1,
            padding_ratio: 0.2,
            force_iterations: 100,
            seed: 42,
            collision_rate: 0.01,
            indicator_rate: 0.15,
            initial_scale: 50.0,
        }
    }
}

impl LayoutConfig {
    /// Defaults for real inventories: no injected collision demo.
    pub fn production() -> Self {
        Self {
            collision_rate: 0.0,
            ..Self::default()
        }
    }
}

impl Validate for LayoutConfig {
    fn validate(&self) -> Result<()> {
        if self.connected_gap > self.water_gap {
            return Err(LayoutError::InvalidConfigValueError {
                field: "layout.connected_gap".to_string(),
                value: self.connected_gap.to_string(),
                reason: format!("Must not exceed water_gap ({})", self.water_gap),
            });
        }
        validate_range("layout.padding_ratio", self.padding_ratio, 0.0, f64::MAX)?;
        validate_positive_number("layout.force_iterations", self.force_iterations as usize, 1)?;
        validate_range("layout.collision_rate", self.collision_rate, 0.0, 1.0)?;
        validate_range("layout.indicator_rate", self.indicator_rate, 0.0, 1.0)?;
        if !(self.initial_scale > 0.0 && self.initial_scale.is_finite()) {
            return Err(LayoutError::InvalidConfigValueError {
                field: "layout.initial_scale".to_string(),
                value: self.initial_scale.to_string(),
                reason: "Scale must be a positive finite number".to_string(),
            });
        }
        Ok(())
    }
}
