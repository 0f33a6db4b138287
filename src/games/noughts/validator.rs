//! Turns raw player input into a legal [`Move`].

use super::position::Move;
use super::types::Board;
use tracing::{debug, instrument};

/// Why an input was rejected. Each variant displays the feedback shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidMove {
    /// Input is not a whole non-negative number.
    #[display("Invalid input. Please enter a number between 1 and 9.")]
    NotANumber(#[error(not(source))] String),

    /// A number outside 1-9.
    #[display("Number out of range. Please choose between 1 and 9.")]
    OutOfRange(#[error(not(source))] String),

    /// The square is already taken.
    #[display("That square is already taken. Choose another one.")]
    Occupied(#[error(not(source))] Move),
}

/// Validates a square number typed by the player against the current board.
///
/// Surrounding whitespace is ignored. Anything other than ASCII digits is
/// [`InvalidMove::NotANumber`]; a number outside 1-9 (including one too large
/// to parse) is [`InvalidMove::OutOfRange`]; a taken square is
/// [`InvalidMove::Occupied`].
#[instrument(skip(board))]
pub fn validate(input: &str, board: &Board) -> Result<Move, InvalidMove> {
    let text = input.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        debug!("Rejected non-numeric input");
        return Err(InvalidMove::NotANumber(text.to_string()));
    }

    let mv = text
        .parse::<u32>()
        .ok()
        .and_then(Move::from_number)
        .ok_or_else(|| InvalidMove::OutOfRange(text.to_string()))?;

    if !board.is_empty(mv) {
        debug!(row = mv.row(), col = mv.col(), "Rejected occupied square");
        return Err(InvalidMove::Occupied(mv));
    }

    Ok(mv)
}
