//! Data models for learning sessions

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Learner feedback for one exposure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Grade {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Grade {
    type Err = String;

    /// Accepts `easy`/`medium`/`hard` or their first letter, any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "e" | "easy" => Ok(Grade::Easy),
            "m" | "medium" => Ok(Grade::Medium),
            "h" | "hard" => Ok(Grade::Hard),
            other => Err(format!("Unknown grade '{}'", other)),
        }
    }
}

/// Last grade an entry received in this batch, for progress display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradeMark {
    #[default]
    None,
    Hard,
    Medium,
    Easy,
}

impl From<Grade> for GradeMark {
    fn from(grade: Grade) -> Self {
        match grade {
            Grade::Easy => GradeMark::Easy,
            Grade::Medium => GradeMark::Medium,
            Grade::Hard => GradeMark::Hard,
        }
    }
}

/// A queued handle into the store, plus what the progress bar shows for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub item_id: Uuid,
    #[serde(default)]
    pub last_grade: GradeMark,
}

impl BatchEntry {
    pub fn new(item_id: Uuid) -> Self {
        Self {
            item_id,
            last_grade: GradeMark::None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.item_id
    }
}

/// What happened to the head entry after an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnswerOutcome {
    /// The queue was empty; nothing changed
    Empty,
    /// The entry went back into the queue at `position`
    Requeued { item_id: Uuid, position: usize },
    /// The entry left the batch and is scheduled for long-term review
    Graduated {
        item_id: Uuid,
        next_review_at: DateTime<Utc>,
    },
    /// The store no longer holds the item, so its entry was removed
    Dropped { item_id: Uuid },
}
