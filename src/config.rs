use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ai::Difficulty;
use crate::error::ConfigError;
use crate::game::{Board, Player, DEFAULT_ROWS};
use crate::rules::StandardRules;

/// Board and rule settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board height. The width is always 7.
    pub rows: usize,
    /// Only allow popping a bottom piece of your own colour.
    pub pop_own_pieces_only: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: DEFAULT_ROWS,
            pop_own_pieces_only: true,
        }
    }
}

impl GameConfig {
    pub fn rules(&self) -> StandardRules {
        StandardRules {
            pop_own_pieces_only: self.pop_own_pieces_only,
        }
    }

    pub fn empty_board(&self) -> Board {
        Board::new(self.rows)
    }
}

/// Computer opponent settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputerConfig {
    /// Play against the computer instead of another person.
    pub enabled: bool,
    pub difficulty: Difficulty,
    /// Colour the computer plays. Yellow always moves first.
    pub plays: Player,
    /// Seed for the random player, for reproducible games.
    pub seed: Option<u64>,
}

impl Default for ComputerConfig {
    fn default() -> Self {
        ComputerConfig {
            enabled: false,
            difficulty: Difficulty::default(),
            plays: Player::Red,
            seed: None,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub computer: ComputerConfig,
}

/// Tallest board the UI and search are expected to handle.
pub const MAX_ROWS: usize = 16;

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.rows == 0 {
            return Err(ConfigError::Validation("game.rows must be >= 1".into()));
        }
        if self.game.rows > MAX_ROWS {
            return Err(ConfigError::Validation(format!(
                "game.rows must be <= {MAX_ROWS}"
            )));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
