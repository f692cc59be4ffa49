use std::path::Path;

use anyhow::{Context, Result};

use cihui_lib::import::{import_file, ImportMode, ImportSummary};
use cihui_lib::session::SchedulerConfig;
use cihui_lib::vocabulary::MemoryVocabularyStore;

/// Shared state for CLI commands
pub struct App {
    pub store: MemoryVocabularyStore,
    pub config: SchedulerConfig,
    pub import_summary: ImportSummary,
}

impl App {
    /// Load the scheduler config (or defaults) and import the word list
    pub fn new(words: &Path, config_path: Option<&Path>, mode: ImportMode) -> Result<Self> {
        let config = match config_path {
            Some(path) => SchedulerConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => SchedulerConfig::default(),
        };

        let mut store = MemoryVocabularyStore::new();
        let import_summary = import_file(&mut store, words, mode)
            .with_context(|| format!("Failed to import {}", words.display()))?;

        Ok(Self {
            store,
            config,
            import_summary,
        })
    }
}
