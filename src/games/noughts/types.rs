//! Core domain types for noughts and crosses.

use super::position::Move;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Mark placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Mark {
    /// The human player's mark (X, always moves first).
    #[display("X")]
    Player,
    /// The computer opponent's mark (O).
    #[display("O")]
    Opponent,
}

impl Mark {
    /// Returns the other mark.
    pub fn other(self) -> Self {
        match self {
            Mark::Player => Mark::Opponent,
            Mark::Opponent => Mark::Player,
        }
    }

    /// Symbol drawn on the board.
    pub fn symbol(self) -> char {
        match self {
            Mark::Player => 'X',
            Mark::Opponent => 'O',
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    fn symbol(self) -> char {
        match self {
            Square::Empty => ' ',
            Square::Occupied(mark) => mark.symbol(),
        }
    }
}

/// 3x3 board.
///
/// Squares are addressed by [`Move`], so every access is in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Clears every square.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.squares = [Square::Empty; 9];
    }

    /// Gets the square at the given coordinate.
    pub fn get(&self, mv: Move) -> Square {
        self.squares[mv.to_index()]
    }

    /// Sets the square at the given coordinate.
    pub fn set(&mut self, mv: Move, square: Square) {
        self.squares[mv.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, mv: Move) -> bool {
        self.get(mv) == Square::Empty
    }

    /// Returns `true` when no empty square remains.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Empty squares in row-major order.
    pub fn empty_squares(&self) -> Vec<Move> {
        Move::ALL
            .iter()
            .copied()
            .filter(|mv| self.is_empty(*mv))
            .collect()
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Checks the turn-order invariant: the player moves first and turns
    /// alternate, so X count minus O count is 0 or 1.
    pub fn is_consistent(&self) -> bool {
        let x = self.count(Mark::Player);
        let o = self.count(Mark::Opponent);
        x == o || x == o + 1
    }

    /// Formats the board as rows of marks.
    ///
    /// ```text
    /// X |   | O
    /// --+---+--
    ///   | X |
    /// --+---+--
    ///   |   |
    /// ```
    pub fn display(&self) -> String {
        render(|idx| self.squares[idx].symbol())
    }

    /// Shows which number selects which square.
    pub fn index_guide() -> String {
        render(|idx| char::from(b'1' + idx as u8))
    }
}

fn render(cell: impl Fn(usize) -> char) -> String {
    let rows: Vec<String> = (0..3)
        .map(|row| {
            let cells: Vec<String> = (0..3).map(|col| cell(row * 3 + col).to_string()).collect();
            cells.join(" | ")
        })
        .collect();
    rows.join("\n--+---+--\n")
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: usize, col: usize) -> Move {
        Move::new(row, col).unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.squares().iter().all(|s| *s == Square::Empty));
        assert_eq!(board.empty_squares().len(), 9);
        assert!(!board.is_full());
    }

    #[test]
    fn test_default_board_is_new_board() {
        assert_eq!(Board::default(), Board::new());
    }

    #[test]
    fn test_reset_clears_marks() {
        let mut board = Board::new();
        board.set(at(1, 1), Square::Occupied(Mark::Player));
        board.set(at(0, 2), Square::Occupied(Mark::Opponent));
        board.reset();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut board = Board::new();
        board.set(at(2, 0), Square::Occupied(Mark::Opponent));
        assert_eq!(board.get(at(2, 0)), Square::Occupied(Mark::Opponent));
        assert!(board.is_empty(at(0, 2)));
        assert_eq!(board.squares()[6], Square::Occupied(Mark::Opponent));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for mv in Move::ALL {
            board.set(mv, Square::Occupied(Mark::Player));
        }
        assert!(board.is_full());
        assert!(board.empty_squares().is_empty());
    }

    #[test]
    fn test_consistency_counts() {
        let mut board = Board::new();
        assert!(board.is_consistent());
        board.set(at(0, 0), Square::Occupied(Mark::Player));
        assert!(board.is_consistent());
        board.set(at(0, 1), Square::Occupied(Mark::Opponent));
        assert!(board.is_consistent());
        board.set(at(0, 2), Square::Occupied(Mark::Opponent));
        assert!(!board.is_consistent());
    }

    #[test]
    fn test_display_layout() {
        let mut board = Board::new();
        board.set(at(0, 0), Square::Occupied(Mark::Player));
        board.set(at(0, 2), Square::Occupied(Mark::Opponent));
        board.set(at(1, 1), Square::Occupied(Mark::Player));
        assert_eq!(
            board.display(),
            "X |   | O\n--+---+--\n  | X |  \n--+---+--\n  |   |  "
        );
    }

    #[test]
    fn test_index_guide() {
        assert_eq!(
            Board::index_guide(),
            "1 | 2 | 3\n--+---+--\n4 | 5 | 6\n--+---+--\n7 | 8 | 9"
        );
    }
}
