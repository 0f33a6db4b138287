//! The computer opponent.

use super::rules::has_won;
use super::{Board, Mark, Move, Square};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument, warn};

/// Chooses the opponent's move.
///
/// The session asks for a move only while the game is undecided, so the
/// board handed in always has at least one empty square.
pub trait Opponent {
    /// Picks a square for [`Mark::Opponent`].
    fn choose_move(&mut self, board: &Board) -> Move;
}

/// Single-ply greedy opponent.
///
/// Takes the first empty square, in row-major order, that completes a line
/// of O. Otherwise picks uniformly among the empty squares. It never blocks
/// the player and looks no further than one move ahead.
#[derive(Debug, Clone)]
pub struct GreedyOpponent<R> {
    rng: R,
}

impl<R: Rng> GreedyOpponent<R> {
    /// Creates an opponent drawing its random choices from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns the first empty square that wins immediately for O.
    #[instrument(skip_all)]
    pub fn winning_move(board: &Board) -> Option<Move> {
        board.empty_squares().into_iter().find(|mv| {
            let mut trial = *board;
            trial.set(*mv, Square::Occupied(Mark::Opponent));
            has_won(&trial, Mark::Opponent)
        })
    }
}

impl<R: Rng> Opponent for GreedyOpponent<R> {
    #[instrument(skip_all)]
    fn choose_move(&mut self, board: &Board) -> Move {
        if let Some(mv) = Self::winning_move(board) {
            debug!(row = mv.row(), col = mv.col(), "Taking winning square");
            return mv;
        }

        let empty = board.empty_squares();
        match empty.choose(&mut self.rng) {
            Some(mv) => {
                debug!(row = mv.row(), col = mv.col(), choices = empty.len(), "Random square");
                *mv
            }
            None => {
                warn!("No empty square left, returning sentinel");
                Move::SENTINEL
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn at(row: usize, col: usize) -> Move {
        Move::new(row, col).unwrap()
    }

    #[test]
    fn test_completes_row_regardless_of_seed() {
        let mut board = Board::new();
        board.set(at(0, 0), Square::Occupied(Mark::Opponent));
        board.set(at(0, 1), Square::Occupied(Mark::Opponent));
        for seed in 0..50 {
            let mut opponent = GreedyOpponent::new(StdRng::seed_from_u64(seed));
            assert_eq!(opponent.choose_move(&board), at(0, 2));
        }
    }

    #[test]
    fn test_first_winning_square_in_row_major_order() {
        // O can win at (0,2) via the top row and at (2,0) via the left column.
        let mut board = Board::new();
        for mv in [at(0, 0), at(0, 1), at(1, 0)] {
            board.set(mv, Square::Occupied(Mark::Opponent));
        }
        assert_eq!(GreedyOpponent::<StdRng>::winning_move(&board), Some(at(0, 2)));
    }

    #[test]
    fn test_does_not_block_player() {
        // X threatens the top row; O has no win. O should not be forced to (0,2).
        let mut board = Board::new();
        board.set(at(0, 0), Square::Occupied(Mark::Player));
        board.set(at(0, 1), Square::Occupied(Mark::Player));
        board.set(at(2, 2), Square::Occupied(Mark::Opponent));
        assert_eq!(GreedyOpponent::<StdRng>::winning_move(&board), None);

        let mut seen_other = false;
        for seed in 0..100 {
            let mut opponent = GreedyOpponent::new(StdRng::seed_from_u64(seed));
            if opponent.choose_move(&board) != at(0, 2) {
                seen_other = true;
                break;
            }
        }
        assert!(seen_other);
    }

    #[test]
    fn test_only_chooses_empty_squares() {
        let mut board = Board::new();
        board.set(at(1, 1), Square::Occupied(Mark::Player));
        board.set(at(0, 0), Square::Occupied(Mark::Opponent));
        board.set(at(2, 2), Square::Occupied(Mark::Player));
        let mut opponent = GreedyOpponent::new(StdRng::seed_from_u64(3));
        for _ in 0..200 {
            let mv = opponent.choose_move(&board);
            assert!(board.is_empty(mv));
        }
    }

    #[test]
    fn test_full_board_returns_sentinel() {
        let mut board = Board::new();
        for mv in Move::ALL {
            board.set(mv, Square::Occupied(Mark::Player));
        }
        let mut opponent = GreedyOpponent::new(StdRng::seed_from_u64(0));
        assert_eq!(opponent.choose_move(&board), Move::SENTINEL);
    }

    #[test]
    fn test_fallback_roughly_uniform() {
        let board = Board::new();
        let mut counts = [0usize; 9];
        let trials = 9_000;
        for seed in 0..trials {
            let mut opponent = GreedyOpponent::new(StdRng::seed_from_u64(seed));
            counts[opponent.choose_move(&board).to_index()] += 1;
        }
        for (idx, count) in counts.iter().enumerate() {
            // Expected 1000 each; allow a wide margin.
            assert!(
                (700..=1300).contains(count),
                "square {} chosen {} times",
                idx,
                count
            );
        }
    }
}
