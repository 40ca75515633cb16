//! # Pop Connect Four
//!
//! Connect Four on a 7-column board of any height, where a turn either drops
//! a piece on top of a column or pops the bottom piece out of it.
//!
//! The engine is a set of pure functions over immutable board snapshots:
//! [`game::apply_move`] produces a new board and [`game::check_victory`]
//! scans the whole board for four in a row. A pop can complete lines for
//! both colours at once; the player who made that move loses.
//!
//! ## Modules
//!
//! - [`game`] — Board model, move applier, victory detector, game state
//! - [`rules`] — Pluggable move legality
//! - [`ai`] — Computer players and difficulty levels
//! - [`ui`] — Terminal UI
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod rules;
pub mod ui;
