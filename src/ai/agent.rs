use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::{GameState, Move};

/// Universal interface for computer players.
///
/// Implementations only read the state they are given and simulate moves
/// through the pure engine functions, so independent searches can run on
/// separate threads.
pub trait Agent: Send {
    /// Select a move for the player to move. Returns `None` when the game is
    /// over or no legal move exists.
    fn select_move(&mut self, state: &GameState) -> Option<Move>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Computer strength, from 1 (weakest) to [`Difficulty::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Result<Self, ConfigError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Difficulty(level))
        } else {
            Err(ConfigError::Validation(format!(
                "difficulty must be in {}..={}, got {level}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Search depth in plies, or `None` for the random player.
    pub fn search_depth(self) -> Option<usize> {
        match self.0 {
            1 => None,
            2 => Some(2),
            3 => Some(3),
            4 => Some(4),
            _ => Some(6),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty(3)
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = ConfigError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Difficulty::new(level)
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.0
    }
}
