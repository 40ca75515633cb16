//! Four-in-a-row detection over whole boards.
//!
//! A pop can complete lines for both colours at once, so the detector never
//! stops at the first win it sees. Each colour is tracked on its own and the
//! scan only ends early once both are known to have won.

use tracing::{debug, instrument};

use super::board::{Board, Cell, COLS};
use super::player::Player;

/// Minimum run length that wins.
pub const WIN_LENGTH: usize = 4;

/// One straight line across the board: a start cell, a step and a length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Line {
    row: usize,
    col: usize,
    row_step: usize,
    col_step: isize,
    len: usize,
}

impl Line {
    fn at(&self, pos: usize) -> (usize, usize) {
        let col = self.col as isize + self.col_step * pos as isize;
        (self.row + self.row_step * pos, col as usize)
    }
}

/// Every line of at least [`WIN_LENGTH`] cells on a board with `rows` rows:
/// horizontals, then verticals and both diagonal directions when the board is
/// tall enough to hold them.
fn lines(rows: usize) -> Vec<Line> {
    let mut lines: Vec<Line> = (0..rows)
        .map(|row| Line {
            row,
            col: 0,
            row_step: 0,
            col_step: 1,
            len: COLS,
        })
        .collect();

    if rows < WIN_LENGTH {
        return lines;
    }

    // Verticals, bottom to top.
    lines.extend((0..COLS).map(|col| Line {
        row: 0,
        col,
        row_step: 1,
        col_step: 0,
        len: rows,
    }));

    // Up-right diagonals: from the bottom row, then from the left edge.
    lines.extend((0..=COLS - WIN_LENGTH).map(|col| Line {
        row: 0,
        col,
        row_step: 1,
        col_step: 1,
        len: rows.min(COLS - col),
    }));
    lines.extend((1..=rows - WIN_LENGTH).map(|row| Line {
        row,
        col: 0,
        row_step: 1,
        col_step: 1,
        len: (rows - row).min(COLS),
    }));

    // Up-left diagonals: from the bottom row, then from the right edge.
    lines.extend((WIN_LENGTH - 1..COLS).map(|col| Line {
        row: 0,
        col,
        row_step: 1,
        col_step: -1,
        len: rows.min(col + 1),
    }));
    lines.extend((1..=rows - WIN_LENGTH).map(|row| Line {
        row,
        col: COLS - 1,
        row_step: 1,
        col_step: -1,
        len: (rows - row).min(COLS),
    }));

    lines
}

/// Run-length scan of one line. Calls `on_win(colour, start, length)` for
/// every run of a non-empty colour at least [`WIN_LENGTH`] long.
fn scan_line(board: &Board, line: &Line, mut on_win: impl FnMut(Cell, usize, usize)) {
    let mut streak = Cell::Empty;
    let mut start = 0;

    for pos in 0..line.len {
        let (row, col) = line.at(pos);
        let piece = board.get(row, col);
        if piece != streak {
            if !streak.is_empty() && pos - start >= WIN_LENGTH {
                on_win(streak, start, pos - start);
            }
            streak = piece;
            start = pos;
        }
    }

    // The final run never reaches the colour-change branch above.
    if !streak.is_empty() && line.len - start >= WIN_LENGTH {
        on_win(streak, start, line.len - start);
    }
}

/// Which colours have a winning run somewhere on the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WinFlags {
    pub yellow: bool,
    pub red: bool,
}

impl WinFlags {
    fn record(&mut self, cell: Cell) {
        match cell {
            Cell::Yellow => self.yellow = true,
            Cell::Red => self.red = true,
            Cell::Empty => {}
        }
    }

    pub fn both(&self) -> bool {
        self.yellow && self.red
    }

    /// Decide the winner. When both colours have four in a row the player who
    /// just moved loses. This rule only makes sense for two players.
    pub fn resolve(&self, who_played: Player) -> Option<Player> {
        match (self.yellow, self.red) {
            (true, true) => Some(who_played.other()),
            (true, false) => Some(Player::Yellow),
            (false, true) => Some(Player::Red),
            (false, false) => None,
        }
    }
}

/// Scan every line for winning runs of either colour.
pub fn win_flags(board: &Board) -> WinFlags {
    let mut flags = WinFlags::default();
    for line in lines(board.num_rows()) {
        scan_line(board, &line, |cell, _, _| flags.record(cell));
        if flags.both() {
            break;
        }
    }
    flags
}

/// Return the winner after `who_played` has moved, or `None`.
#[instrument(level = "trace", skip(board), fields(rows = board.num_rows()))]
pub fn check_victory(board: &Board, who_played: Player) -> Option<Player> {
    let flags = win_flags(board);
    let winner = flags.resolve(who_played);
    if let Some(player) = winner {
        debug!(
            yellow = flags.yellow,
            red = flags.red,
            winner = player.name(),
            "four in a row detected"
        );
    }
    winner
}

/// Numeric form of [`check_victory`]: `0` for no winner, otherwise the
/// winner's id (Yellow = 1, Red = 2).
pub fn winner_code(board: &Board, who_played: Player) -> u8 {
    check_victory(board, who_played).map_or(0, Player::id)
}

/// A winning run on the board, used for highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinningLine {
    pub player: Player,
    /// `(row, col)` of every cell in the run, in scan order.
    pub cells: Vec<(usize, usize)>,
}

/// Every winning run on the board, for both colours.
pub fn winning_lines(board: &Board) -> Vec<WinningLine> {
    let mut found = Vec::new();
    for line in lines(board.num_rows()) {
        scan_line(board, &line, |cell, start, len| {
            if let Some(player) = Player::from_cell(cell) {
                found.push(WinningLine {
                    player,
                    cells: (start..start + len).map(|pos| line.at(pos)).collect(),
                });
            }
        });
    }
    found
}
