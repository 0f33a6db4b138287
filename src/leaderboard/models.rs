//! Leaderboard domain types.

use std::collections::BTreeMap;
use tracing::instrument;

/// Name to last submitted score. Keys are unique; listing order is by name.
pub type Scores = BTreeMap<String, i64>;

/// A non-empty, trimmed player name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub struct PlayerName(String);

impl PlayerName {
    /// Trims `raw` and returns `None` if nothing is left.
    #[instrument]
    pub fn new(raw: &str) -> Option<Self> {
        let name = raw.trim();
        (!name.is_empty()).then(|| Self(name.to_string()))
    }

    /// Returns the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_trimmed() {
        assert_eq!(PlayerName::new("  Ann \n").unwrap().as_str(), "Ann");
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(PlayerName::new("").is_none());
        assert!(PlayerName::new("   ").is_none());
    }
}
