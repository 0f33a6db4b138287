//! Board coordinates.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A coordinate on the board: row and column, each in `0..3`.
///
/// Construction is checked, so a `Move` always addresses a real square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    row: usize,
    col: usize,
}

impl Move {
    /// All nine coordinates in row-major order.
    pub const ALL: [Move; 9] = [
        Move { row: 0, col: 0 },
        Move { row: 0, col: 1 },
        Move { row: 0, col: 2 },
        Move { row: 1, col: 0 },
        Move { row: 1, col: 1 },
        Move { row: 1, col: 2 },
        Move { row: 2, col: 0 },
        Move { row: 2, col: 1 },
        Move { row: 2, col: 2 },
    ];

    /// Returned by the opponent when the board has no empty square.
    pub const SENTINEL: Move = Move { row: 0, col: 0 };

    /// Creates a coordinate, or `None` if either part is outside `0..3`.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < 3 && col < 3).then_some(Self { row, col })
    }

    /// Converts a human-facing square number (1-9) to a coordinate.
    #[instrument]
    pub fn from_number(n: u32) -> Option<Self> {
        if !(1..=9).contains(&n) {
            return None;
        }
        let idx = (n - 1) as usize;
        Some(Self {
            row: idx / 3,
            col: idx % 3,
        })
    }

    /// Row, 0 at the top.
    pub fn row(self) -> usize {
        self.row
    }

    /// Column, 0 at the left.
    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major board index (0-8).
    pub fn to_index(self) -> usize {
        self.row * 3 + self.col
    }

    /// Human-facing square number (1-9).
    pub fn number(self) -> u32 {
        self.to_index() as u32 + 1
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
