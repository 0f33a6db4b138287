//! Game rules for noughts and crosses.
//!
//! Pure functions over a [`Board`](super::Board). Rules are kept apart from
//! board storage so the session and the opponent can both consult them.

pub mod draw;
pub mod win;

pub use draw::is_draw;
pub use win::{check_winner, has_won};
