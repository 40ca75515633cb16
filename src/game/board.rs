use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

pub const COLS: usize = 7;
pub const DEFAULT_ROWS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Yellow = 1,
    Red = 2,
}

impl Cell {
    /// Numeric code used by the flat board encoding.
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Yellow),
            2 => Some(Cell::Red),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A 7-wide board stored as a flat, row-major vector with the bottom row
/// first. Cell `(row, col)` lives at `row * COLS + col`.
///
/// Boards are snapshots: every move produces a new `Board` and leaves the
/// previous one untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board with `rows` rows. A zero height is bumped to one
    /// row so the board is always structurally valid.
    pub fn new(rows: usize) -> Self {
        Board {
            cells: vec![Cell::Empty; rows.max(1) * COLS],
        }
    }

    /// Build a board from its flat cell codes, bottom row first.
    ///
    /// Pieces must rest on the bottom row or on another piece; a column with
    /// an empty cell under a piece is rejected.
    pub fn from_cells(codes: Vec<u8>) -> Result<Self, BoardError> {
        if codes.is_empty() || codes.len() % COLS != 0 {
            return Err(BoardError::InvalidBoardShape {
                len: codes.len(),
                width: COLS,
            });
        }
        let cells = codes
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                Cell::from_code(value).ok_or(BoardError::InvalidCell { index, value })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let board = Board { cells };
        board.check_no_gaps()?;
        Ok(board)
    }

    fn check_no_gaps(&self) -> Result<(), BoardError> {
        for col in 0..COLS {
            let height = self.column_height(col);
            let floating = (height..self.num_rows()).find(|&row| !self.get(row, col).is_empty());
            if let Some(row) = floating {
                return Err(BoardError::FloatingPiece { row, col });
            }
        }
        Ok(())
    }

    /// Build a board from rows of cell codes, listed bottom row first.
    pub fn from_rows(rows: &[[u8; COLS]]) -> Result<Self, BoardError> {
        Self::from_cells(rows.iter().flatten().copied().collect())
    }

    /// Number of rows, derived from the cell count.
    pub fn num_rows(&self) -> usize {
        self.cells.len() / COLS
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    /// Linear index of `(row, col)`.
    pub fn index(row: usize, col: usize) -> usize {
        row * COLS + col
    }

    /// The cell at `(row, col)`, or `None` off the board. Row 0 is the bottom.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.num_rows() || col >= COLS {
            return None;
        }
        Some(self.cells[Self::index(row, col)])
    }

    /// Unchecked lookup for callers that already iterate within bounds.
    pub(crate) fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[Self::index(row, col)]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub(crate) fn check_column(col: usize) -> Result<(), BoardError> {
        if col >= COLS {
            Err(BoardError::ColumnOutOfRange(col))
        } else {
            Ok(())
        }
    }

    /// Number of pieces stacked in a column, counted from the bottom up to
    /// the first empty cell. Out-of-range columns have height zero.
    pub fn column_height(&self, col: usize) -> usize {
        if col >= COLS {
            return 0;
        }
        (0..self.num_rows())
            .take_while(|&row| !self.get(row, col).is_empty())
            .count()
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        col >= COLS || self.column_height(col) == self.num_rows()
    }

    /// Check if a column has no pieces. Out-of-range columns count as empty.
    pub fn is_column_empty(&self, col: usize) -> bool {
        self.column_height(col) == 0
    }

    /// Check if the board is completely full.
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    pub fn piece_count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// The cells of one column, bottom to top. Empty for out-of-range columns.
    pub fn column(&self, col: usize) -> Vec<Cell> {
        if col >= COLS {
            return Vec::new();
        }
        (0..self.num_rows()).map(|row| self.get(row, col)).collect()
    }

    /// The flat encoding of this board: one code per cell, bottom row first.
    pub fn to_codes(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.code()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(DEFAULT_ROWS)
    }
}

impl TryFrom<Vec<u8>> for Board {
    type Error = BoardError;

    fn try_from(codes: Vec<u8>) -> Result<Self, Self::Error> {
        Board::from_cells(codes)
    }
}

impl From<Board> for Vec<u8> {
    fn from(board: Board) -> Self {
        board.to_codes()
    }
}

/// Renders top row first, one character per cell: `.`, `Y`, `R`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.num_rows()).rev() {
            for col in 0..COLS {
                let symbol = match self.get(row, col) {
                    Cell::Empty => '.',
                    Cell::Yellow => 'Y',
                    Cell::Red => 'R',
                };
                write!(f, "{symbol}")?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
