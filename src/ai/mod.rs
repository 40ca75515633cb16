//! Computer players: the agent interface, a random player and a negamax
//! search, plus the mapping from difficulty level to player.

mod agent;
mod computer;
pub mod negamax;
mod random;

pub use agent::{Agent, Difficulty};
pub use computer::{agent_for, computer_move};
pub use negamax::{ConnectFourHeuristic, Heuristic, NegamaxAgent};
pub use random::RandomAgent;
