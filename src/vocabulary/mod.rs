//! Vocabulary records for the trainer
//!
//! This module provides:
//! - The vocabulary item model and its review status
//! - Whole-vocabulary statistics
//! - The store seam the session scheduler writes back through

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{MemoryVocabularyStore, PoolFilter, VocabularyStore, VocabularyStoreError};
