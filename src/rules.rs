//! Move legality. The engine never depends on a particular rule set: callers
//! hand a [`LegalityChecker`] to the game state, and the pure move applier
//! only enforces structural preconditions.

use serde::{Deserialize, Serialize};

use crate::error::MoveError;
use crate::game::{Board, Move, MoveKind, Player, COLS};

/// Decides whether a move may be played on a board.
pub trait LegalityChecker: Send + Sync {
    /// `Ok(())` if `player` may play `mv` on `board`, otherwise the reason.
    fn check(&self, board: &Board, player: Player, mv: Move) -> Result<(), MoveError>;

    fn is_legal(&self, board: &Board, player: Player, mv: Move) -> bool {
        self.check(board, player, mv).is_ok()
    }
}

/// Accepts every move. Structural problems still surface from the move
/// applier as [`crate::error::BoardError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveRules;

impl LegalityChecker for PermissiveRules {
    fn check(&self, _board: &Board, _player: Player, _mv: Move) -> Result<(), MoveError> {
        Ok(())
    }
}

/// The regular rules: a column must be in range, drops need room and pops
/// need a piece. With `pop_own_pieces_only` a player may only pop a bottom
/// piece of their own colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardRules {
    pub pop_own_pieces_only: bool,
}

impl Default for StandardRules {
    fn default() -> Self {
        StandardRules {
            pop_own_pieces_only: true,
        }
    }
}

impl LegalityChecker for StandardRules {
    fn check(&self, board: &Board, player: Player, mv: Move) -> Result<(), MoveError> {
        if mv.column >= COLS {
            return Err(MoveError::IllegalMove(format!(
                "column {} is out of range",
                mv.column
            )));
        }
        match mv.kind {
            MoveKind::Drop if board.is_column_full(mv.column) => Err(MoveError::IllegalMove(
                format!("column {} is full", mv.column),
            )),
            MoveKind::Pop if board.is_column_empty(mv.column) => Err(MoveError::IllegalMove(
                format!("column {} has nothing to pop", mv.column),
            )),
            MoveKind::Pop
                if self.pop_own_pieces_only && board.get(0, mv.column) != player.to_cell() =>
            {
                Err(MoveError::IllegalMove(format!(
                    "{} can only pop their own pieces",
                    player.name()
                )))
            }
            _ => Ok(()),
        }
    }
}

/// All legal moves for `player`: drops first, then pops, each in column order.
pub fn legal_moves(rules: &dyn LegalityChecker, board: &Board, player: Player) -> Vec<Move> {
    (0..COLS)
        .map(Move::drop)
        .chain((0..COLS).map(Move::pop))
        .filter(|&mv| rules.is_legal(board, player, mv))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::apply_move;

    fn sample_board() -> Board {
        Board::from_rows(&[
            [1, 2, 0, 0, 0, 0, 0],
            [2, 0, 0, 0, 0, 0, 0],
            [1, 0, 0, 0, 0, 0, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_permissive_accepts_everything() {
        let board = sample_board();
        let rules = PermissiveRules;
        assert!(rules.is_legal(&board, Player::Red, Move::drop(0)));
        assert!(rules.is_legal(&board, Player::Red, Move::pop(5)));
        assert!(rules.is_legal(&board, Player::Red, Move::drop(42)));
    }

    #[test]
    fn test_permissive_failures_surface_from_applier() {
        let board = sample_board();
        let mv = Move::drop(0);
        assert!(PermissiveRules.is_legal(&board, Player::Red, mv));
        assert!(apply_move(&board, Player::Red, mv).is_err());
    }

    #[test]
    fn test_standard_rejects_out_of_range() {
        let rules = StandardRules::default();
        let err = rules.check(&Board::default(), Player::Yellow, Move::drop(7));
        assert_eq!(
            err,
            Err(MoveError::IllegalMove("column 7 is out of range".into()))
        );
    }

    #[test]
    fn test_standard_rejects_full_drop_and_empty_pop() {
        let board = sample_board();
        let rules = StandardRules::default();
        assert!(!rules.is_legal(&board, Player::Yellow, Move::drop(0)));
        assert!(!rules.is_legal(&board, Player::Yellow, Move::pop(3)));
        assert!(rules.is_legal(&board, Player::Yellow, Move::drop(3)));
    }

    #[test]
    fn test_pop_own_pieces_only() {
        let board = sample_board();
        let strict = StandardRules::default();
        assert!(strict.is_legal(&board, Player::Yellow, Move::pop(0)));
        assert!(!strict.is_legal(&board, Player::Yellow, Move::pop(1)));
        assert!(strict.is_legal(&board, Player::Red, Move::pop(1)));

        let loose = StandardRules {
            pop_own_pieces_only: false,
        };
        assert!(loose.is_legal(&board, Player::Yellow, Move::pop(1)));
    }

    #[test]
    fn test_legal_moves_enumeration() {
        let board = sample_board();
        let moves = legal_moves(&StandardRules::default(), &board, Player::Yellow);
        assert_eq!(
            moves,
            vec![
                Move::drop(1),
                Move::drop(2),
                Move::drop(3),
                Move::drop(4),
                Move::drop(5),
                Move::drop(6),
                Move::pop(0),
            ]
        );

        let empty = legal_moves(&StandardRules::default(), &Board::default(), Player::Red);
        assert_eq!(empty.len(), COLS);
        assert!(empty.iter().all(|mv| !mv.is_pop()));
    }

    #[test]
    fn test_standard_rules_agree_with_applier() {
        let rules = StandardRules {
            pop_own_pieces_only: false,
        };
        let board = Board::from_rows(&[
            [1, 2, 0, 2, 0, 0, 1],
            [2, 1, 0, 0, 0, 0, 0],
            [1, 0, 0, 0, 0, 0, 0],
        ])
        .unwrap();
        for player in [Player::Yellow, Player::Red] {
            for col in 0..=COLS {
                for mv in [Move::drop(col), Move::pop(col)] {
                    assert_eq!(
                        rules.is_legal(&board, player, mv),
                        apply_move(&board, player, mv).is_ok(),
                        "{player:?} {mv}"
                    );
                }
            }
        }
    }
}
