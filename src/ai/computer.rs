use tracing::debug;

use crate::game::{GameState, Move};

use super::agent::{Agent, Difficulty};
use super::negamax::NegamaxAgent;
use super::random::RandomAgent;

/// Build the computer player for a difficulty level. `seed` only affects the
/// random player used at the lowest level.
pub fn agent_for(difficulty: Difficulty, seed: Option<u64>) -> Box<dyn Agent> {
    match difficulty.search_depth() {
        None => Box::new(seed.map_or_else(RandomAgent::new, RandomAgent::seeded)),
        Some(depth) => Box::new(NegamaxAgent::new(depth)),
    }
}

/// Pick a move for the player to move at the given difficulty.
pub fn computer_move(state: &GameState, difficulty: Difficulty) -> Option<Move> {
    let mut agent = agent_for(difficulty, None);
    let mv = agent.select_move(state);
    debug!(
        agent = agent.name(),
        level = difficulty.level(),
        player = state.current_player().name(),
        chosen = ?mv,
        "computer move"
    );
    mv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_for_levels() {
        assert_eq!(agent_for(Difficulty::new(1).unwrap(), Some(3)).name(), "Random");
        for level in 2..=Difficulty::MAX {
            assert_eq!(agent_for(Difficulty::new(level).unwrap(), None).name(), "Negamax");
        }
    }

    #[test]
    fn test_computer_move_is_legal_at_every_level() {
        let state = GameState::initial()
            .apply_move(Move::drop(3))
            .unwrap()
            .apply_move(Move::drop(3))
            .unwrap();
        let legal = state.legal_moves();
        for level in Difficulty::MIN..=4 {
            let mv = computer_move(&state, Difficulty::new(level).unwrap()).unwrap();
            assert!(legal.contains(&mv), "level {level} chose illegal {mv}");
        }
    }

    #[test]
    fn test_computer_move_on_finished_game() {
        let mut state = GameState::initial();
        for col in 0..4 {
            state = state.apply_move(Move::drop(col)).unwrap();
            if col < 3 {
                state = state.apply_move(Move::drop(col)).unwrap();
            }
        }
        assert!(state.is_terminal());
        assert_eq!(computer_move(&state, Difficulty::default()), None);
    }
}
