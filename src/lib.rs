//! Noughts and crosses library.
//!
//! A single-player game against a greedy computer opponent, plus a
//! leaderboard of last scores shared through a JSON file.
//!
//! # Architecture
//!
//! - **Games**: board, move validation, win/draw rules, opponent, session
//! - **Leaderboard**: file-backed name to score store
//! - **Server**: HTTP API over the leaderboard
//! - **Menu**: text front end for terminal play
//!
//! # Example
//!
//! ```
//! use noughts::{GreedyOpponent, Session, SessionState, validate};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut session = Session::new(GreedyOpponent::new(StdRng::seed_from_u64(7)));
//! let mv = validate("5", session.board()).unwrap();
//! assert_eq!(session.player_move(mv).unwrap(), SessionState::AwaitingOpponentMove);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod leaderboard;
mod menu;

pub mod server;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, LEADERBOARD_ENV, PORT_ENV};

// Crate-level exports - Game types
pub use games::noughts::{
    Board, GreedyOpponent, InvalidMove, Mark, Move, MoveError, Opponent, Outcome, PlayerInput,
    Session, SessionState, Square, rules, validate,
};

// Crate-level exports - Leaderboard
pub use leaderboard::{LeaderboardStore, PersistenceError, PlayerName, Scores};

// Crate-level exports - Terminal front end
pub use menu::{Menu, MenuChoice, MenuContext, write_leaderboard};
