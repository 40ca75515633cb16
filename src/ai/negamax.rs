use tracing::trace;

use crate::game::{Board, GameState, Move, Player, COLS, WIN_LENGTH};

use super::agent::Agent;

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, player: Player) -> f64;
}

/// Default heuristic that scans all 4-cell windows and scores threats.
pub struct ConnectFourHeuristic;

impl ConnectFourHeuristic {
    fn score_window(own: usize, opp: usize, empty: usize) -> f64 {
        if own == 3 && empty == 1 {
            50.0
        } else if own == 2 && empty == 2 {
            10.0
        } else if opp == 3 && empty == 1 {
            -80.0
        } else if opp == 2 && empty == 2 {
            -10.0
        } else {
            0.0
        }
    }
}

/// Row and column steps of the four window orientations.
const DIRECTIONS: [(usize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

impl Heuristic for ConnectFourHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> f64 {
        let own_cell = player.to_cell();
        let opp_cell = player.other().to_cell();
        let rows = board.num_rows();
        let mut score = 0.0;

        // Center column bonus
        for row in 0..rows {
            let cell = board.get(row, COLS / 2);
            if cell == own_cell {
                score += 3.0;
            } else if cell == opp_cell {
                score -= 3.0;
            }
        }

        // Bottom-row pieces can be popped by their owner
        for col in 0..COLS {
            if board.get(0, col) == own_cell {
                score += 1.0;
            }
        }

        let span = WIN_LENGTH as isize - 1;
        for row in 0..rows {
            for col in 0..COLS {
                for &(row_step, col_step) in &DIRECTIONS {
                    let end_row = row + row_step * (WIN_LENGTH - 1);
                    let end_col = col as isize + col_step * span;
                    if end_row >= rows || end_col < 0 || end_col >= COLS as isize {
                        continue;
                    }

                    let mut own = 0;
                    let mut opp = 0;
                    let mut empty = 0;
                    for i in 0..WIN_LENGTH {
                        let c = (col as isize + col_step * i as isize) as usize;
                        match board.get(row + row_step * i, c) {
                            cell if cell == own_cell => own += 1,
                            cell if cell == opp_cell => opp += 1,
                            _ => empty += 1,
                        }
                    }
                    score += Self::score_window(own, opp, empty);
                }
            }
        }

        score
    }
}

const WIN_SCORE: f64 = 100_000.0;

/// Center-first ordering, drops before pops, for better alpha-beta pruning.
fn ordered_moves(state: &GameState) -> Vec<Move> {
    let mut moves = state.legal_moves();
    moves.sort_by_key(|mv| (mv.is_pop(), mv.column.abs_diff(COLS / 2), mv.column));
    moves
}

/// Negamax agent with alpha-beta pruning.
pub struct NegamaxAgent {
    depth: usize,
    heuristic: Box<dyn Heuristic>,
}

impl NegamaxAgent {
    pub fn new(depth: usize) -> Self {
        NegamaxAgent {
            depth: depth.max(1),
            heuristic: Box::new(ConnectFourHeuristic),
        }
    }

    pub fn with_heuristic(depth: usize, heuristic: Box<dyn Heuristic>) -> Self {
        NegamaxAgent {
            depth: depth.max(1),
            heuristic,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    fn best_move(&self, state: &GameState) -> Option<Move> {
        let mut best: Option<(Move, f64)> = None;

        for mv in ordered_moves(state) {
            let Ok(next) = state.apply_move(mv) else {
                continue;
            };
            // Negamax: opponent's score is negated
            let score = -self.negamax(&next, self.depth - 1, f64::NEG_INFINITY, f64::INFINITY);
            trace!(%mv, score, "root move scored");
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        best.map(|(mv, _)| mv)
    }

    fn negamax(&self, state: &GameState, depth: usize, mut alpha: f64, beta: f64) -> f64 {
        // A pop can hand the win to either side, so compare against the
        // player to move rather than assuming the mover won.
        if let Some(winner) = state.winner() {
            let score = WIN_SCORE + depth as f64;
            return if winner == state.current_player() {
                score
            } else {
                -score
            };
        }

        if depth == 0 {
            return self
                .heuristic
                .evaluate(state.board(), state.current_player());
        }

        let mut best = f64::NEG_INFINITY;
        for mv in ordered_moves(state) {
            let Ok(next) = state.apply_move(mv) else {
                continue;
            };
            let score = -self.negamax(&next, depth - 1, -beta, -alpha);
            if score > best {
                best = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        if best == f64::NEG_INFINITY {
            0.0
        } else {
            best
        }
    }
}

impl Agent for NegamaxAgent {
    fn select_move(&mut self, state: &GameState) -> Option<Move> {
        self.best_move(state)
    }

    fn name(&self) -> &str {
        "Negamax"
    }
}
