//! File-backed leaderboard store.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::leaderboard::{PersistenceError, PlayerName, Scores};

/// Leaderboard kept as one JSON object in a text file.
///
/// Every write rewrites the whole document. The store does no locking of
/// its own: two processes doing load, merge and save at the same time can
/// lose one of the updates. The HTTP server serialises its own writers.
#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    path: PathBuf,
}

impl LeaderboardStore {
    /// Creates a store backed by the file at `path`. The file need not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        debug!("Creating LeaderboardStore");
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the leaderboard.
    ///
    /// A missing, empty or corrupt document reads as an empty mapping.
    /// Entries whose score is not an integer are skipped.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Scores {
        if !self.path.is_file() {
            debug!("No leaderboard file yet");
            return Scores::new();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(error = %e, "Failed to read leaderboard, treating as empty");
                return Scores::new();
            }
        };

        let content = content.trim();
        if content.is_empty() {
            return Scores::new();
        }

        let value: serde_json::Value = match serde_json::from_str(content) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Corrupt leaderboard, treating as empty");
                return Scores::new();
            }
        };
        let serde_json::Value::Object(entries) = value else {
            warn!("Leaderboard is not a JSON object, treating as empty");
            return Scores::new();
        };

        let scores: Scores = entries
            .into_iter()
            .filter_map(|(name, score)| match score.as_i64() {
                Some(score) => Some((name, score)),
                None => {
                    warn!(%name, %score, "Dropping non-integer score");
                    None
                }
            })
            .collect();
        debug!(count = scores.len(), "Leaderboard loaded");
        scores
    }

    /// Records `score` for `name`, replacing any earlier score, and returns
    /// the stored mapping.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the document cannot be written. The
    /// previous document stays in place.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn save(&self, name: &PlayerName, score: i64) -> Result<Scores, PersistenceError> {
        let mut scores = self.load();
        scores.insert(name.as_str().to_string(), score);
        self.store(&scores)?;
        info!(%name, score, "Score saved");
        Ok(scores)
    }

    /// Folds `incoming` into the stored mapping, incoming entries winning
    /// name by name, and returns the stored result.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the document cannot be written.
    #[instrument(skip(self, incoming), fields(path = %self.path.display(), incoming = incoming.len()))]
    pub fn merge_all(&self, incoming: Scores) -> Result<Scores, PersistenceError> {
        let merged = merge(self.load(), incoming);
        self.store(&merged)?;
        info!(count = merged.len(), "Leaderboard merged");
        Ok(merged)
    }

    /// Writes a sibling temp file and renames it over the document, so
    /// readers see either the old or the new document in full.
    fn store(&self, scores: &Scores) -> Result<(), PersistenceError> {
        let encoded = serde_json::to_string(scores)?;
        let staging = self.staging_path();
        let written = fs::write(&staging, encoded).and_then(|()| fs::rename(&staging, &self.path));
        written.map_err(|e| {
            warn!(error = %e, path = %self.path.display(), "Failed to write leaderboard");
            if let Err(cleanup) = fs::remove_file(&staging) {
                debug!(error = %cleanup, "No staging file to remove");
            }
            PersistenceError::new(format!(
                "Failed to write '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Overwrites `existing` with every entry of `incoming`. No accumulation.
pub fn merge(mut existing: Scores, incoming: Scores) -> Scores {
    existing.extend(incoming);
    existing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(entries: &[(&str, i64)]) -> Scores {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_merge_overwrites_and_adds() {
        let merged = merge(
            scores(&[("Ann", 1), ("Bob", -1)]),
            scores(&[("Ann", 0), ("Cy", 1)]),
        );
        assert_eq!(merged, scores(&[("Ann", 0), ("Bob", -1), ("Cy", 1)]));
    }

    #[test]
    fn test_merge_empty_incoming() {
        let existing = scores(&[("Ann", 1)]);
        assert_eq!(merge(existing.clone(), Scores::new()), existing);
    }
}
