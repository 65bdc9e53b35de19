//! Field configuration
//!
//! Screen size and a single `cell_size` unit that every derived radius,
//! speed and offset scales with. Persisted as JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::Bounds;

/// Construction parameters for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Visible screen width
    pub width: f32,
    /// Visible screen height
    pub height: f32,
    /// Size of one screen division; scales radii, speeds and offsets
    pub cell_size: f32,
    /// Seed for the simulation RNG
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        // A 1000px window: field is min(window) / 2.5, cell is min(window) / 40
        Self {
            width: 400.0,
            height: 400.0,
            cell_size: 25.0,
            seed: 0x5EED_A57E,
        }
    }
}

impl FieldConfig {
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        Self {
            width,
            height,
            cell_size,
            ..Self::default()
        }
    }

    /// Same field, different seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject dimensions the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.width) {
            return Err(ConfigError::Invalid {
                field: "width",
                reason: "must be finite and greater than zero",
            });
        }
        if !positive(self.height) {
            return Err(ConfigError::Invalid {
                field: "height",
                reason: "must be finite and greater than zero",
            });
        }
        if !positive(self.cell_size) {
            return Err(ConfigError::Invalid {
                field: "cell_size",
                reason: "must be finite and greater than zero",
            });
        }
        Ok(())
    }

    /// Wrap-around bounds: the visible screen inflated by a quarter cell on
    /// every side, so entities visibly exit before reappearing
    pub fn bounds(&self) -> (Bounds, Bounds) {
        let margin = self.cell_size / 4.0;
        (
            Bounds::new(-margin, self.width + margin),
            Bounds::new(-margin, self.height + margin),
        )
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded field config from {}", path.display());
        Ok(config)
    }

    /// Save as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Field config saved");
        Ok(())
    }
}
