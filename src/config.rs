use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{SnakeError, SnakeResult};

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;
pub const BLANK_CHAR: char = ' ';

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glyphs {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    pub snake: char,
    pub food: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Glyphs {
            top_left: '\u{250C}',
            top_right: '\u{2510}',
            bottom_left: '\u{2514}',
            bottom_right: '\u{2518}',
            horizontal: '\u{2500}',
            vertical: '\u{2502}',
            snake: '*',
            food: '$',
        }
    }
}

impl Validate for Glyphs {
    fn validate(&self) -> Result<(), String> {
        let all = [
            ("top_left", self.top_left),
            ("top_right", self.top_right),
            ("bottom_left", self.bottom_left),
            ("bottom_right", self.bottom_right),
            ("horizontal", self.horizontal),
            ("vertical", self.vertical),
            ("snake", self.snake),
            ("food", self.food),
        ];

        if let Some((name, _)) = all.iter().find(|(_, ch)| ch.is_control()) {
            return Err(format!("glyph '{}' must be printable", name));
        }

        if self.snake == BLANK_CHAR || self.food == BLANK_CHAR {
            return Err("snake and food glyphs must be visible".to_string());
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tick_interval_ms: u64,
    pub glyphs: Glyphs,
    /// Fixed food seed; a random one is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { tick_interval_ms: DEFAULT_TICK_INTERVAL_MS, glyphs: Glyphs::default(), seed: None }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be greater than 0".to_string());
        }

        self.glyphs.validate()
    }
}

impl GameConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn from_yaml(content: &str) -> SnakeResult<Self> {
        let config: GameConfig = serde_yaml_ng::from_str(content)
            .map_err(|e| SnakeError::Config(format!("Failed to deserialize config: {}", e)))?;

        config.validate().map_err(|e| SnakeError::Config(format!("Config validation error: {}", e)))?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> SnakeResult<String> {
        serde_yaml_ng::to_string(self).map_err(|e| SnakeError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Reads the YAML file at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> SnakeResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_yaml(&content),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(SnakeError::Config(format!("Failed to read config file {}: {}", path.display(), err))),
        }
    }
}
