//! Rebase settings
//!
//! Controls how selections react to text inserted exactly at one of their
//! boundaries. Settings are stored as JSON; missing fields take defaults.

use crate::error::CollabResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where a caret ends up when text is inserted at its offset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InsertBias {
    /// The caret stays in front of the inserted text
    Before,
    /// The caret moves behind the inserted text
    #[default]
    After,
}

/// Settings for rebasing selections across document operations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RebaseSettings {
    /// Behaviour of collapsed selections at the insert position
    pub insert_bias: InsertBias,
    /// Whether text inserted at a boundary of a span becomes part of it
    pub expand_at_boundaries: bool,
}

impl Default for RebaseSettings {
    fn default() -> Self {
        Self {
            insert_bias: InsertBias::After,
            expand_at_boundaries: false,
        }
    }
}

impl RebaseSettings {
    /// Load settings from a JSON file, or return defaults if the file doesn't
    /// exist or can't be parsed
    pub fn load(path: impl AsRef<Path>) -> CollabResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<RebaseSettings>(&content) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse rebase settings {}, using defaults: {}",
                    path.display(),
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> CollabResult<()> {
        let path = path.as_ref();
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = RebaseSettings::load(dir.path().join("rebase.json")).unwrap();
        assert_eq!(settings, RebaseSettings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("rebase.json");
        let settings = RebaseSettings {
            insert_bias: InsertBias::Before,
            expand_at_boundaries: true,
        };

        settings.save(&path).unwrap();
        assert_eq!(RebaseSettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rebase.json");
        std::fs::write(&path, r#"{"expandAtBoundaries": true}"#).unwrap();

        let settings = RebaseSettings::load(&path).unwrap();
        assert_eq!(settings.insert_bias, InsertBias::After);
        assert!(settings.expand_at_boundaries);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rebase.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(RebaseSettings::load(&path).unwrap(), RebaseSettings::default());
    }
}
