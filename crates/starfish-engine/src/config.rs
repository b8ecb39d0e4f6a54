//! Engine configuration.
//!
//! Every field has a default matching the classic Starfish look, so an empty
//! JSON object (`{}`) is a valid config.

use serde::{Deserialize, Serialize};

use crate::color::MAX_PALETTE_ENTRIES;
use crate::error::EngineError;

/// Most colour layers a random texture may have.
pub const MAX_LAYERS: usize = 6;

/// Which generator table a texture draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorSet {
    /// The production generators.
    #[default]
    Production,
    /// Production generators plus the experimental ones.
    All,
}

/// Bounds for the random choices made while building a texture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Fewest colour layers in a texture.
    pub min_layers: usize,
    /// Most colour layers in a texture.
    pub max_layers: usize,
    /// Randomize each layer's origin so wrap seams don't line up.
    pub roll_texture: bool,
    /// Opacity cutoff thresholds are drawn from `[0, cutoff_range)`.
    pub cutoff_range: u16,
    /// Palette entries kept by a texture.
    pub max_palette_entries: usize,
    /// Foreground colour re-picks before a distinct colour is forced.
    pub max_color_retries: u32,
    /// Generator table to draw from.
    pub generators: GeneratorSet,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_layers: 2,
            max_layers: 6,
            roll_texture: true,
            cutoff_range: 16,
            max_palette_entries: MAX_PALETTE_ENTRIES - 1,
            max_color_retries: 64,
            generators: GeneratorSet::Production,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the bounds are usable.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.min_layers == 0 {
            return Err(EngineError::InvalidConfig(
                "min_layers must be at least 1".into(),
            ));
        }
        if self.min_layers > self.max_layers {
            return Err(EngineError::InvalidConfig(format!(
                "min_layers ({}) exceeds max_layers ({})",
                self.min_layers, self.max_layers
            )));
        }
        if self.max_layers > MAX_LAYERS {
            return Err(EngineError::InvalidConfig(format!(
                "max_layers must be at most {}, got {}",
                MAX_LAYERS, self.max_layers
            )));
        }
        if self.cutoff_range == 0 || self.cutoff_range > 256 {
            return Err(EngineError::InvalidConfig(format!(
                "cutoff_range must be in 1..=256, got {}",
                self.cutoff_range
            )));
        }
        if self.max_palette_entries < 2 || self.max_palette_entries > MAX_PALETTE_ENTRIES {
            return Err(EngineError::InvalidConfig(format!(
                "max_palette_entries must be in 2..={}, got {}",
                MAX_PALETTE_ENTRIES, self.max_palette_entries
            )));
        }
        if self.max_color_retries == 0 {
            return Err(EngineError::InvalidConfig(
                "max_color_retries must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
