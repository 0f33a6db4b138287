//! Win detection.

use super::super::{Board, Mark, Move, Square};
use tracing::instrument;

const fn at(row: usize, col: usize) -> Move {
    Move::ALL[row * 3 + col]
}

/// The eight lines of three: rows, columns, diagonals.
pub const LINES: [[Move; 3]; 8] = [
    // Rows
    [at(0, 0), at(0, 1), at(0, 2)],
    [at(1, 0), at(1, 1), at(1, 2)],
    [at(2, 0), at(2, 1), at(2, 2)],
    // Columns
    [at(0, 0), at(1, 0), at(2, 0)],
    [at(0, 1), at(1, 1), at(2, 1)],
    [at(0, 2), at(1, 2), at(2, 2)],
    // Diagonals
    [at(0, 0), at(1, 1), at(2, 2)],
    [at(0, 2), at(1, 1), at(2, 0)],
];

/// Returns `true` if `mark` fills any row, column or diagonal.
#[instrument(skip(board))]
pub fn has_won(board: &Board, mark: Mark) -> bool {
    let target = Square::Occupied(mark);
    LINES
        .iter()
        .any(|line| line.iter().all(|mv| board.get(*mv) == target))
}

/// Returns the mark with three in a line, if any.
///
/// The player is checked first. On boards reached through legal play at
/// most one mark can hold a line.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    [Mark::Player, Mark::Opponent]
        .into_iter()
        .find(|mark| has_won(board, *mark))
}
