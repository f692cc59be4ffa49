use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Tuning knobs for the learning-session scheduler
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Maximum number of items in a fresh batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Exposures required before an item can graduate
    #[serde(default = "default_min_shows_per_card")]
    pub min_shows_per_card: u32,
    /// Easy answers required when an item is graduated on its first exposure
    #[serde(default = "default_easy_required_easy")]
    pub easy_required_easy: u32,
    /// Easy answers required on every later exposure
    #[serde(default = "default_medium_required_easy")]
    pub medium_required_easy: u32,
    /// Reserved; graduation never consults it
    #[serde(default = "default_hard_required_easy")]
    pub hard_required_easy: u32,
    /// Queue position a hard item is reinserted at
    #[serde(default = "default_hard_reinsert_offset")]
    pub hard_reinsert_offset: usize,
    #[serde(default = "default_shuffle_new_batch")]
    pub shuffle_new_batch: bool,
}

fn default_batch_size() -> usize {
    15
}

fn default_min_shows_per_card() -> u32 {
    2
}

fn default_easy_required_easy() -> u32 {
    2
}

fn default_medium_required_easy() -> u32 {
    3
}

fn default_hard_required_easy() -> u32 {
    3
}

fn default_hard_reinsert_offset() -> usize {
    4
}

fn default_shuffle_new_batch() -> bool {
    true
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            min_shows_per_card: default_min_shows_per_card(),
            easy_required_easy: default_easy_required_easy(),
            medium_required_easy: default_medium_required_easy(),
            hard_required_easy: default_hard_required_easy(),
            hard_reinsert_offset: default_hard_reinsert_offset(),
            shuffle_new_batch: default_shuffle_new_batch(),
        }
    }
}

impl SchedulerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Copy with the lower bounds applied: batch size, minimum shows and
    /// hard reinsert offset are all at least 1.
    pub fn normalized(&self) -> Self {
        Self {
            batch_size: self.batch_size.max(1),
            min_shows_per_card: self.min_shows_per_card.max(1),
            hard_reinsert_offset: self.hard_reinsert_offset.max(1),
            ..self.clone()
        }
    }

    /// Easy answers needed to graduate after `seen_count` exposures.
    ///
    /// Keyed on exposure count rather than on grade history, so
    /// `hard_required_easy` has no effect here.
    pub fn required_easy(&self, seen_count: u32) -> u32 {
        if seen_count == 1 {
            self.easy_required_easy
        } else {
            self.medium_required_easy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = SchedulerConfig::default();

        assert_eq!(config.batch_size, 15);
        assert_eq!(config.min_shows_per_card, 2);
        assert_eq!(config.easy_required_easy, 2);
        assert_eq!(config.medium_required_easy, 3);
        assert_eq!(config.hard_required_easy, 3);
        assert_eq!(config.hard_reinsert_offset, 4);
        assert!(config.shuffle_new_batch);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SchedulerConfig::from_toml_str("batchSize = 5\nshuffleNewBatch = false\n").unwrap();

        assert_eq!(config.batch_size, 5);
        assert!(!config.shuffle_new_batch);
        assert_eq!(config.hard_reinsert_offset, 4);
    }

    #[test]
    fn test_invalid_toml() {
        let result = SchedulerConfig::from_toml_str("batchSize = \"many\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "minShowsPerCard = 1").unwrap();
        writeln!(file, "hardReinsertOffset = 2").unwrap();

        let config = SchedulerConfig::load(file.path()).unwrap();
        assert_eq!(config.min_shows_per_card, 1);
        assert_eq!(config.hard_reinsert_offset, 2);
    }

    #[test]
    fn test_load_missing_file() {
        let result = SchedulerConfig::load(Path::new("/nonexistent/cihui.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_normalized_clamps_lower_bounds() {
        let config = SchedulerConfig {
            batch_size: 0,
            min_shows_per_card: 0,
            hard_reinsert_offset: 0,
            ..SchedulerConfig::default()
        }
        .normalized();

        assert_eq!(config.batch_size, 1);
        assert_eq!(config.min_shows_per_card, 1);
        assert_eq!(config.hard_reinsert_offset, 1);
    }

    #[test]
    fn test_required_easy_follows_exposure_count() {
        let config = SchedulerConfig::default();

        assert_eq!(config.required_easy(1), 2);
        assert_eq!(config.required_easy(2), 3);
        assert_eq!(config.required_easy(7), 3);
    }
}
