//! Noughts and crosses: board, rules, opponent and session.

mod opponent;
mod position;
pub mod rules;
mod session;
mod types;
mod validator;

pub use opponent::{GreedyOpponent, Opponent};
pub use position::Move;
pub use session::{MoveError, Outcome, PlayerInput, Session, SessionState};
pub use types::{Board, Mark, Square};
pub use validator::{InvalidMove, validate};
