//! Data models for vocabulary items

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category assigned when a word list does not name one
pub const DEFAULT_CATEGORY: &str = "General";

/// Starting ease factor for a new item
const DEFAULT_EASE_FACTOR: f32 = 2.5;

/// A single vocabulary entry with its learning state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: Uuid,
    /// Word in the target script (e.g. hanzi)
    pub native_text: String,
    /// Pronunciation aid (e.g. pinyin)
    pub phonetic_text: String,
    /// Meaning in the learner's language
    pub translation_text: String,
    #[serde(default = "default_category")]
    pub category: String,
    /// Retained for long-term review; the session scheduler never reads it
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f32,
    /// When the item is next due for review
    pub next_review_at: DateTime<Utc>,
    #[serde(default)]
    pub is_learned: bool,
    /// Exposures in the current batch
    #[serde(default)]
    pub seen_count: u32,
    /// Easy answers in the current batch
    #[serde(default)]
    pub easy_count: u32,
    pub created_at: DateTime<Utc>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_ease_factor() -> f32 {
    DEFAULT_EASE_FACTOR
}

impl VocabularyItem {
    pub fn new(native_text: String, phonetic_text: String, translation_text: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            native_text,
            phonetic_text,
            translation_text,
            category: default_category(),
            ease_factor: DEFAULT_EASE_FACTOR,
            next_review_at: now,
            is_learned: false,
            seen_count: 0,
            easy_count: 0,
            created_at: now,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Clear the per-batch counters and the learned flag
    pub fn reset_batch_counters(&mut self) {
        self.seen_count = 0;
        self.easy_count = 0;
        self.is_learned = false;
    }

    /// Check if the item is due for review at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }

    pub fn status(&self, now: DateTime<Utc>) -> ReviewStatus {
        if !self.is_learned && self.seen_count == 0 && self.next_review_at <= self.created_at {
            ReviewStatus::New
        } else if self.is_due(now) {
            ReviewStatus::Due
        } else {
            ReviewStatus::Scheduled
        }
    }
}

/// Where an item stands in the review cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewStatus {
    /// Never studied
    New,
    /// Review date has passed
    Due,
    /// Waiting for its review date
    Scheduled,
}

/// Counts over a whole vocabulary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyStats {
    pub total: usize,
    pub new: usize,
    pub due: usize,
    pub scheduled: usize,
    pub learned: usize,
}

impl VocabularyStats {
    pub fn collect<'a>(items: impl IntoIterator<Item = &'a VocabularyItem>, now: DateTime<Utc>) -> Self {
        let mut stats = Self::default();
        for item in items {
            stats.total += 1;
            match item.status(now) {
                ReviewStatus::New => stats.new += 1,
                ReviewStatus::Due => stats.due += 1,
                ReviewStatus::Scheduled => stats.scheduled += 1,
            }
            if item.is_learned {
                stats.learned += 1;
            }
        }
        stats
    }
}

/// Format an interval in days to a short label
pub fn format_interval(days: i64) -> String {
    match days {
        d if d <= 0 => "now".to_string(),
        d if d < 7 => format!("{}d", d),
        d if d < 30 => format!("{}w", d / 7),
        d if d < 365 => format!("{}mo", d / 30),
        d => format!("{}y", d / 365),
    }
}
