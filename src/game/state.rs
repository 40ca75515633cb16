use tracing::debug;

use super::{apply_move, check_victory, Board, Move, Player};
use crate::error::MoveError;
use crate::rules::{legal_moves, LegalityChecker, StandardRules};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    winner: Option<Player>,
    move_count: usize,
    rules: StandardRules,
}

impl GameState {
    /// Create initial game state on a default-height board
    pub fn initial() -> Self {
        Self::with_board(Board::default(), StandardRules::default())
    }

    /// Start a game from an arbitrary position, Yellow to move.
    ///
    /// A position that already holds four in a row is finished. Red is
    /// taken as the player who made it, so a double win goes to Yellow.
    pub fn with_board(board: Board, rules: StandardRules) -> Self {
        let winner = check_victory(&board, Player::Red);
        if let Some(winner) = winner {
            debug!(winner = winner.name(), "starting position is already won");
        }
        GameState {
            board,
            current_player: Player::Yellow, // Yellow starts
            winner,
            move_count: 0,
            rules,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> StandardRules {
        self.rules
    }

    /// Number of moves played so far
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// The winner, once the game is over. A position that is four in a row
    /// for both colours goes to the player who did not create it.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }

    /// Legal moves for the player to move
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        legal_moves(&self.rules, &self.board, self.current_player)
    }

    /// Apply a move under this game's rules and return the new state
    pub fn apply_move(&self, mv: Move) -> Result<GameState, MoveError> {
        self.apply_move_with(mv, &self.rules)
    }

    /// Apply a move, checking legality with `checker` instead of the
    /// game's own rules
    pub fn apply_move_with(
        &self,
        mv: Move,
        checker: &dyn LegalityChecker,
    ) -> Result<GameState, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let mover = self.current_player;
        checker.check(&self.board, mover, mv)?;
        let board = apply_move(&self.board, mover, mv)?;
        debug!(player = mover.name(), %mv, "move applied");

        let winner = check_victory(&board, mover);

        Ok(GameState {
            board,
            current_player: mover.other(),
            winner,
            move_count: self.move_count + 1,
            rules: self.rules,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use crate::game::Cell;
    use crate::rules::PermissiveRules;

    #[test]
    fn test_initial_state() {
        let state = GameState::initial();
        assert_eq!(state.current_player(), Player::Yellow);
        assert!(!state.is_terminal());
        assert_eq!(state.legal_moves().len(), 7);
        assert_eq!(state.move_count(), 0);
    }

    #[test]
    fn test_apply_move() {
        let state = GameState::initial();
        let new_state = state.apply_move(Move::drop(3)).unwrap();

        assert_eq!(new_state.current_player(), Player::Red);
        assert_eq!(new_state.board().get(0, 3), Cell::Yellow);
        assert_eq!(new_state.move_count(), 1);
        // The previous snapshot is untouched.
        assert!(state.board().is_empty());
    }

    #[test]
    fn test_win_detection() {
        let mut state = GameState::initial();

        // Yellow wins with horizontal line
        for col in 0..4 {
            state = state.apply_move(Move::drop(col)).unwrap(); // Yellow
            if col < 3 {
                state = state.apply_move(Move::drop(col)).unwrap(); // Red (row above)
            }
        }

        assert!(state.is_terminal());
        assert_eq!(state.winner(), Some(Player::Yellow));
        assert_eq!(state.apply_move(Move::drop(6)), Err(MoveError::GameOver));
        assert!(state.legal_moves().is_empty());
    }

    #[test]
    fn test_illegal_pop_rejected_by_rules() {
        let state = GameState::initial().apply_move(Move::drop(2)).unwrap();
        // Red may not pop Yellow's piece under the standard rules.
        assert!(matches!(
            state.apply_move(Move::pop(2)),
            Err(MoveError::IllegalMove(_))
        ));
        // A permissive checker lets it through.
        let popped = state.apply_move_with(Move::pop(2), &PermissiveRules).unwrap();
        assert!(popped.board().is_empty());
    }

    #[test]
    fn test_permissive_checker_still_fails_fast() {
        let state = GameState::initial();
        assert_eq!(
            state.apply_move_with(Move::pop(0), &PermissiveRules),
            Err(MoveError::Board(BoardError::ColumnEmpty(0)))
        );
    }

    #[test]
    fn test_pop_that_wins_for_both_loses() {
        let board = Board::from_rows(&[
            [2, 1, 1, 1, 0, 0, 0],
            [1, 1, 2, 2, 0, 0, 0],
            [2, 2, 2, 1, 0, 0, 0],
            [0, 0, 2, 1, 0, 0, 0],
            [0, 0, 0, 2, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0],
        ])
        .unwrap();
        let rules = StandardRules {
            pop_own_pieces_only: false,
        };
        let state = GameState::with_board(board, rules);
        let next = state.apply_move(Move::pop(0)).unwrap();
        assert_eq!(next.winner(), Some(Player::Red));
    }

    #[test]
    fn test_start_from_won_position() {
        let board = Board::from_rows(&[[1, 1, 1, 1, 0, 0, 0], [2, 2, 2, 0, 0, 0, 0]]).unwrap();
        let state = GameState::with_board(board, StandardRules::default());
        assert!(state.is_terminal());
        assert_eq!(state.winner(), Some(Player::Yellow));
        assert!(state.legal_moves().is_empty());
        assert_eq!(state.apply_move(Move::drop(4)), Err(MoveError::GameOver));
    }

    #[test]
    fn test_start_from_double_win_goes_to_yellow() {
        let board = Board::from_rows(&[[1, 1, 1, 1, 0, 0, 0], [2, 2, 2, 2, 0, 0, 0]]).unwrap();
        let state = GameState::with_board(board, StandardRules::default());
        assert_eq!(state.winner(), Some(Player::Yellow));
    }

    #[test]
    fn test_full_board_still_has_pops() {
        let board = Board::from_rows(&[[1, 1, 2, 1, 2, 2, 0]]).unwrap();
        let state = GameState::with_board(board, StandardRules::default());
        let next = state.apply_move(Move::drop(6)).unwrap();
        assert!(next.board().is_full());
        assert!(!next.is_terminal());
        assert_eq!(next.legal_moves(), vec![Move::pop(2), Move::pop(4), Move::pop(5)]);
    }
}
