//! Draw detection.

use super::super::{Board, Mark};
use super::win::has_won;
use tracing::instrument;

/// A full board on which neither mark holds a line.
///
/// Callers that sequence their own checks (the session does) test for a
/// win first and then only need [`Board::is_full`].
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && !has_won(board, Mark::Player) && !has_won(board, Mark::Opponent)
}
