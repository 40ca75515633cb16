//! Core game logic: the flat board model, players, the pure move applier and
//! victory detector, and a game state machine with immutable transitions.

mod board;
mod moves;
mod player;
mod state;
pub mod victory;

pub use board::{Board, Cell, COLS, DEFAULT_ROWS};
pub use moves::{apply_move, Move, MoveKind};
pub use player::Player;
pub use state::GameState;
pub use victory::{check_victory, winner_code, winning_lines, WinningLine, WIN_LENGTH};
