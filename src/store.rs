//! JSON save file: the last session plus the best score.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::SavedGame;

/// On-disk contents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaveFile {
    /// `None` after a finished game or before the first move.
    #[serde(default)]
    pub session: Option<SavedGame>,
    #[serde(default)]
    pub best_score: u64,
}

impl SaveFile {
    /// Raise the best score if `score` beats it. Returns true when it did.
    pub fn record_score(&mut self, score: u64) -> bool {
        if score > self.best_score {
            self.best_score = score;
            true
        } else {
            false
        }
    }
}

/// Reads and writes a [`SaveFile`] at a fixed path.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the save file. A missing file is an empty save.
    pub fn load(&self) -> Result<SaveFile> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no save file");
                return Ok(SaveFile::default());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read {}", self.path.display()))
            }
        };
        serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse {}", self.path.display()))
    }

    /// Write the save file, replacing any previous contents.
    ///
    /// Writes to a sibling temp file first so a crash never leaves a
    /// truncated save behind.
    pub fn save(&self, file: &SaveFile) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_vec_pretty(file).context("failed to encode save file")?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;

        debug!(path = %self.path.display(), best = file.best_score, "saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_score_only_raises() {
        let mut file = SaveFile::default();
        assert!(file.record_score(12));
        assert!(!file.record_score(8));
        assert!(!file.record_score(12));
        assert_eq!(file.best_score, 12);
    }

    #[test]
    fn missing_fields_default() {
        let file: SaveFile = serde_json::from_str("{}").unwrap();
        assert_eq!(file, SaveFile::default());
    }
}
