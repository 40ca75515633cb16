use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::board::{Board, Cell};
use super::player::Player;
use crate::error::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    /// Place a piece on top of the column's stack.
    Drop,
    /// Remove the bottom piece of the column; the rest of the stack falls.
    Pop,
}

/// A column together with how it is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub column: usize,
    pub kind: MoveKind,
}

impl Move {
    pub fn drop(column: usize) -> Self {
        Move {
            column,
            kind: MoveKind::Drop,
        }
    }

    pub fn pop(column: usize) -> Self {
        Move {
            column,
            kind: MoveKind::Pop,
        }
    }

    pub fn is_pop(&self) -> bool {
        self.kind == MoveKind::Pop
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            MoveKind::Drop => "drop",
            MoveKind::Pop => "pop",
        };
        write!(f, "{verb} {}", self.column)
    }
}

/// Apply `mv` for `player` and return the resulting board.
///
/// The input board is never modified. Legality beyond the structural
/// preconditions (column in range, room to drop, a piece to pop) is the
/// caller's job; see [`crate::rules`].
#[instrument(level = "trace", skip(board), fields(rows = board.num_rows()))]
pub fn apply_move(board: &Board, player: Player, mv: Move) -> Result<Board, BoardError> {
    match mv.kind {
        MoveKind::Drop => board.drop_piece(mv.column, player.to_cell()),
        MoveKind::Pop => board.pop_piece(mv.column),
    }
}

impl Board {
    /// Return a copy of this board with `cell` placed in the lowest empty
    /// slot of `col`.
    pub fn drop_piece(&self, col: usize, cell: Cell) -> Result<Board, BoardError> {
        Board::check_column(col)?;
        let row = self.column_height(col);
        if row >= self.num_rows() {
            return Err(BoardError::ColumnFull(col));
        }

        let mut next = self.clone();
        next.cells_mut()[Board::index(row, col)] = cell;
        Ok(next)
    }

    /// Return a copy of this board with the bottom piece of `col` removed and
    /// everything above it shifted down one row.
    pub fn pop_piece(&self, col: usize) -> Result<Board, BoardError> {
        Board::check_column(col)?;
        if self.is_column_empty(col) {
            return Err(BoardError::ColumnEmpty(col));
        }

        let rows = self.num_rows();
        let mut next = self.clone();
        let cells = next.cells_mut();
        for row in 0..rows - 1 {
            cells[Board::index(row, col)] = cells[Board::index(row + 1, col)];
        }
        cells[Board::index(rows - 1, col)] = Cell::Empty;
        Ok(next)
    }
}
