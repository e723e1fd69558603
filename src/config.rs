use std::fs::File;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::{BoundingArea, Coordinate};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file")]
    Io(#[from] io::Error),
    #[error("failed to parse config file")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("unknown palette {0:?}")]
    UnknownPalette(String),
}

/// Immutable runtime configuration, loaded once before the engine is built.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub border: BorderConfig,
    pub snake: SnakeConfig,
    pub food: FoodConfig,
    pub frame_delay_ms: u64,
    pub palette: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BorderConfig {
    pub width: i32,
    pub height: i32,
    pub horizontal_wall_char: char,
    pub vertical_wall_char: char,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    pub start: Coordinate,
    pub head_char: char,
    pub body_char: char,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FoodConfig {
    pub start: Coordinate,
    pub char: char,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            border: BorderConfig::default(),
            snake: SnakeConfig::default(),
            food: FoodConfig::default(),
            frame_delay_ms: 100,
            palette: "classic".to_string(),
        }
    }
}

impl Default for BorderConfig {
    fn default() -> Self {
        BorderConfig {
            width: 30,
            height: 15,
            horizontal_wall_char: '=',
            vertical_wall_char: '|',
        }
    }
}

impl Default for SnakeConfig {
    fn default() -> Self {
        SnakeConfig {
            start: Coordinate::new(10, 10),
            head_char: '<',
            body_char: '#',
        }
    }
}

impl Default for FoodConfig {
    fn default() -> Self {
        FoodConfig {
            start: Coordinate::new(20, 10),
            char: '@',
        }
    }
}

impl Config {
    /// Loads the config file, falling back to the built-in defaults when the
    /// file does not exist. A present-but-broken file is a startup error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Config::default());
        }

        let file = File::open(path)?;
        let config: Config = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn bounding_area(&self) -> BoundingArea {
        BoundingArea::new(self.border.width, self.border.height)
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let area = self.bounding_area();

        if self.border.width < 5 || self.border.height < 5 {
            return Err(ConfigError::Invalid(format!(
                "border {}x{} leaves no room to play",
                self.border.width, self.border.height
            )));
        }
        if !area.contains(self.snake.start) {
            return Err(ConfigError::Invalid(format!(
                "snake start ({}, {}) is outside the playable area",
                self.snake.start.x, self.snake.start.y
            )));
        }
        if !area.contains(self.food.start) {
            return Err(ConfigError::Invalid(format!(
                "food start ({}, {}) is outside the playable area",
                self.food.start.x, self.food.start.y
            )));
        }
        if self.frame_delay_ms == 0 {
            return Err(ConfigError::Invalid("frame_delay_ms must be positive".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn parses_nested_json() {
        let json = r#"{
            "border": { "width": 40, "height": 20,
                        "horizontal_wall_char": "-", "vertical_wall_char": "!" },
            "snake": { "start": { "x": 5, "y": 5 }, "head_char": "<", "body_char": "o" },
            "food": { "start": { "x": 12, "y": 7 }, "char": "*" },
            "frame_delay_ms": 80,
            "palette": "classic"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.border.width, 40);
        assert_eq!(config.snake.start, Coordinate::new(5, 5));
        assert_eq!(config.food.char, '*');
        assert_eq!(config.frame_delay(), Duration::from_millis(80));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{ "frame_delay_ms": 50 }"#).unwrap();
        assert_eq!(config.frame_delay_ms, 50);
        assert_eq!(config.border.width, 30);
        assert_eq!(config.palette, "classic");
    }

    #[test]
    fn rejects_degenerate_border() {
        let mut config = Config::default();
        config.border.width = 2;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_start_outside_playable_area() {
        let mut config = Config::default();
        config.snake.start = Coordinate::new(0, 5);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.food.start = Coordinate::new(30, 5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_frame_delay() {
        let mut config = Config::default();
        config.frame_delay_ms = 0;
        assert!(config.validate().is_err());
    }
}
