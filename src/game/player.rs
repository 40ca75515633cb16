use serde::{Deserialize, Serialize};

use super::board::Cell;

/// The two players. Yellow moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Yellow,
    Red,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Red => Player::Yellow,
            Player::Yellow => Player::Red,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Red => Cell::Red,
            Player::Yellow => Cell::Yellow,
        }
    }

    /// The player owning a cell, if any.
    pub fn from_cell(cell: Cell) -> Option<Player> {
        match cell {
            Cell::Yellow => Some(Player::Yellow),
            Cell::Red => Some(Player::Red),
            Cell::Empty => None,
        }
    }

    /// Numeric identity: Yellow = 1, Red = 2.
    pub fn id(self) -> u8 {
        self.to_cell().code()
    }

    pub fn from_id(id: u8) -> Option<Player> {
        Cell::from_code(id).and_then(Player::from_cell)
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Red => "Red",
            Player::Yellow => "Yellow",
        }
    }
}
