//! Terminal UI: a single game view for player-vs-player or
//! player-vs-computer games.

mod app;
mod game_view;

pub use app::App;
