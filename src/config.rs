//! Game configuration
//!
//! Loaded from a JSON file when one is given, otherwise the built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;
use crate::sim::{Color, Playfield};

/// Tunable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Columns per row
    pub width: u32,
    /// Number of rows
    pub height: u32,
    /// Rows packed with random bubbles at game start
    pub filled_rows: u32,
    /// Colors bubbles and bullets are drawn from
    pub palette: Vec<Color>,
    /// Bullet-to-bubble distance that counts as a hit
    pub collision_radius: f32,
    /// Points per exploded bubble
    pub reward: i64,
    /// Points lost per missed shot
    pub penalty: i64,
    /// Scheduler interval between simulation ticks
    pub tick_interval_ms: u32,
    /// Distance travelled per tick
    pub step_scale: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            filled_rows: FILLED_ROWS,
            palette: vec![Color::Orange, Color::White, Color::Blue],
            collision_radius: DEFAULT_COLLISION_RADIUS,
            reward: REWARD,
            penalty: PENALTY,
            tick_interval_ms: TICK_INTERVAL_MS,
            step_scale: STEP_SCALE,
        }
    }
}

impl GameConfig {
    /// Playfield described by this configuration
    pub fn playfield(&self) -> Playfield {
        Playfield::new(self.width, self.height)
    }

    /// Check every value the engine relies on
    pub fn validate(&self) -> Result<(), GameError> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::config(format!(
                "playfield must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.filled_rows > self.height {
            return Err(GameError::config(format!(
                "filledRows ({}) exceeds height ({})",
                self.filled_rows, self.height
            )));
        }
        if self.palette.is_empty() {
            return Err(GameError::config("palette is empty"));
        }
        if !(self.collision_radius > 0.0) {
            return Err(GameError::config(format!(
                "collisionRadius must be positive, got {}",
                self.collision_radius
            )));
        }
        if !(self.step_scale > 0.0) {
            return Err(GameError::config(format!(
                "stepScale must be positive, got {}",
                self.step_scale
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::config("tickIntervalMs must be positive"));
        }
        if self.reward < 0 {
            return Err(GameError::config(format!(
                "reward must not be negative, got {}",
                self.reward
            )));
        }
        if self.penalty < 0 {
            return Err(GameError::config(format!(
                "penalty must not be negative, got {}",
                self.penalty
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration string
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path` if given, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match Self::load(path) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    return config;
                }
                Err(err) => {
                    log::warn!("Ignoring config {}: {}", path.display(), err);
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, 40);
        assert_eq!(config.height, 30);
        assert!((config.collision_radius - 1.7).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            GameConfig::from_json(r#"{"width": 12, "filledRows": 2, "palette": ["red", "green"]}"#)
                .unwrap();
        assert_eq!(config.width, 12);
        assert_eq!(config.height, PLAYFIELD_HEIGHT);
        assert_eq!(config.filled_rows, 2);
        assert_eq!(config.palette, vec![Color::Red, Color::Green]);
        assert_eq!(config.tick_interval_ms, TICK_INTERVAL_MS);
    }

    #[test]
    fn test_rejects_bad_values() {
        let too_many_rows = GameConfig {
            height: 4,
            filled_rows: 5,
            ..Default::default()
        };
        assert!(matches!(too_many_rows.validate(), Err(GameError::Config { .. })));

        let no_width = GameConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(no_width.validate(), Err(GameError::Config { .. })));

        let no_palette = GameConfig {
            palette: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(no_palette.validate(), Err(GameError::Config { .. })));

        let negative_reward = GameConfig {
            reward: -5,
            ..Default::default()
        };
        assert!(matches!(negative_reward.validate(), Err(GameError::Config { .. })));

        let negative_penalty = GameConfig {
            penalty: -10,
            ..Default::default()
        };
        assert!(matches!(negative_penalty.validate(), Err(GameError::Config { .. })));

        let no_radius = GameConfig {
            collision_radius: 0.0,
            ..Default::default()
        };
        assert!(no_radius.validate().is_err());
    }

    #[test]
    fn test_negative_penalty_json_is_rejected() {
        let result = GameConfig::from_json(r#"{"penalty": -10, "reward": -5}"#);
        assert!(matches!(result, Err(GameError::Config { .. })));
    }

    #[test]
    fn test_malformed_json() {
        let result = GameConfig::from_json("{ width: ");
        assert!(matches!(result, Err(GameError::Json(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = GameConfig::load_or_default(Some(Path::new("/nonexistent/bubbles.json")));
        assert_eq!(config, GameConfig::default());
    }
}
