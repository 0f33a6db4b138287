//! Persisted leaderboard of name to last score.

mod error;
mod models;
mod store;

pub use error::PersistenceError;
pub use models::{PlayerName, Scores};
pub use store::LeaderboardStore;
