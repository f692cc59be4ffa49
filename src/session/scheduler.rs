//! Batch learning-session scheduler
//!
//! Picks a bounded batch from a candidate pool and re-queues the head entry
//! after each graded answer:
//! - Easy: back to the tail, unless the item has enough easy answers and
//!   exposures to graduate
//! - Medium: back to the tail
//! - Hard: reinserted `hard_reinsert_offset` places from the front (clamped
//!   to the queue length)
//!
//! Graduated items leave the batch with `is_learned` set and a review date
//! one day out. The session is finished once the queue is empty.
//!
//! The queue holds item ids only; the store keeps the records. Each answer
//! reads the current record, changes the batch counters, `is_learned` and
//! `next_review_at`, and writes it back before the queue moves. An item the
//! store no longer has is dropped from the batch.

use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use uuid::Uuid;

use super::config::SchedulerConfig;
use super::models::{AnswerOutcome, BatchEntry, Grade, GradeMark};
use crate::vocabulary::{VocabularyItem, VocabularyStore, VocabularyStoreError};

/// Days until a graduated item comes up for review
const GRADUATION_INTERVAL_DAYS: i64 = 1;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Store error: {0}")]
    Store(#[from] VocabularyStoreError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Look up a record, treating a missing one as `None`
fn lookup<S>(store: &S, id: Uuid) -> Result<Option<VocabularyItem>>
where
    S: VocabularyStore + ?Sized,
{
    match store.get_item(id) {
        Ok(item) => Ok(Some(item)),
        Err(VocabularyStoreError::ItemNotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug)]
pub struct SessionScheduler<R = StdRng> {
    queue: VecDeque<BatchEntry>,
    /// Config the current batch was started with
    active: SchedulerConfig,
    /// Config for the next batch
    pending: SchedulerConfig,
    rng: R,
}

impl SessionScheduler<StdRng> {
    /// Scheduler shuffling with an entropy-seeded generator
    pub fn new(config: SchedulerConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> SessionScheduler<R> {
    pub fn with_rng(config: SchedulerConfig, rng: R) -> Self {
        Self {
            queue: VecDeque::new(),
            active: config.normalized(),
            pending: config,
            rng,
        }
    }

    /// Replace the configuration used by the next `start_session`
    pub fn apply_config(&mut self, config: SchedulerConfig) {
        self.pending = config;
    }

    /// Configuration waiting for the next batch
    pub fn config(&self) -> &SchedulerConfig {
        &self.pending
    }

    /// Configuration in force for the current batch
    pub fn active_config(&self) -> &SchedulerConfig {
        &self.active
    }

    /// Start a new batch from `pool`, discarding whatever was queued.
    ///
    /// The pool is taken in the order given (or shuffled, if configured),
    /// duplicates after the first occurrence are dropped, and the first
    /// `batch_size` items are selected. Each selected item has its batch
    /// counters reset in the store. Pool items the store no longer holds
    /// are left out.
    ///
    /// Returns the number of entries in the new batch.
    pub fn start_session<S>(&mut self, mut pool: Vec<VocabularyItem>, store: &mut S) -> Result<usize>
    where
        S: VocabularyStore + ?Sized,
    {
        let config = self.pending.normalized();

        let mut seen = HashSet::new();
        pool.retain(|item| seen.insert(item.id));

        if config.shuffle_new_batch {
            pool.shuffle(&mut self.rng);
        }
        pool.truncate(config.batch_size);

        let mut queue = VecDeque::with_capacity(pool.len());
        for candidate in &pool {
            let Some(mut record) = lookup(store, candidate.id)? else {
                log::warn!("Skipping {} in new batch: no longer in store", candidate.id);
                continue;
            };
            record.reset_batch_counters();
            store.update_item(&record)?;
            queue.push_back(BatchEntry::new(record.id));
        }

        self.queue = queue;
        self.active = config;

        log::info!(
            "Started session batch with {} items (batch size {})",
            self.queue.len(),
            self.active.batch_size
        );

        Ok(self.queue.len())
    }

    /// Id of the head entry
    pub fn current_id(&self) -> Option<Uuid> {
        self.queue.front().map(BatchEntry::id)
    }

    /// Store's record for the head entry
    pub fn current<S>(&self, store: &S) -> Option<VocabularyItem>
    where
        S: VocabularyStore + ?Sized,
    {
        self.current_id().and_then(|id| store.get_item(id).ok())
    }

    /// Remove queued entries whose records the store no longer holds.
    ///
    /// Returns how many were removed.
    pub fn discard_missing<S>(&mut self, store: &S) -> usize
    where
        S: VocabularyStore + ?Sized,
    {
        let before = self.queue.len();
        self.queue.retain(|entry| store.get_item(entry.item_id).is_ok());
        before - self.queue.len()
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queue in order, head first
    pub fn entries(&self) -> impl Iterator<Item = &BatchEntry> {
        self.queue.iter()
    }

    /// Last grade of every queued entry, head first
    pub fn progress(&self) -> Vec<GradeMark> {
        self.queue.iter().map(|entry| entry.last_grade).collect()
    }

    /// Grade the head entry, using the current time for graduation
    pub fn answer<S>(&mut self, grade: Grade, store: &mut S) -> Result<AnswerOutcome>
    where
        S: VocabularyStore + ?Sized,
    {
        self.answer_at(grade, Utc::now(), store)
    }

    /// Grade the head entry as of `now`. A no-op on an empty queue.
    pub fn answer_at<S>(&mut self, grade: Grade, now: DateTime<Utc>, store: &mut S) -> Result<AnswerOutcome>
    where
        S: VocabularyStore + ?Sized,
    {
        let Some(mut entry) = self.queue.front().copied() else {
            return Ok(AnswerOutcome::Empty);
        };

        let Some(mut record) = lookup(store, entry.item_id)? else {
            self.queue.pop_front();
            log::warn!("Dropped {} from batch: no longer in store", entry.item_id);
            return Ok(AnswerOutcome::Dropped {
                item_id: entry.item_id,
            });
        };

        record.seen_count += 1;
        entry.last_grade = grade.into();

        let graduates = match grade {
            Grade::Easy => {
                record.easy_count += 1;
                let required = self.active.required_easy(record.seen_count);
                record.easy_count >= required && record.seen_count >= self.active.min_shows_per_card
            }
            Grade::Medium | Grade::Hard => false,
        };

        if graduates {
            record.is_learned = true;
            record.next_review_at = now + Duration::days(GRADUATION_INTERVAL_DAYS);
        }

        store.update_item(&record)?;
        self.queue.pop_front();

        log::debug!(
            "Answered {:?} for {} (seen {}, easy {})",
            grade,
            record.id,
            record.seen_count,
            record.easy_count
        );

        if graduates {
            log::info!(
                "Graduated {} after {} exposures, next review at {}",
                record.id,
                record.seen_count,
                record.next_review_at
            );
            return Ok(AnswerOutcome::Graduated {
                item_id: record.id,
                next_review_at: record.next_review_at,
            });
        }

        let position = match grade {
            Grade::Hard => self.active.hard_reinsert_offset.min(self.queue.len()),
            Grade::Easy | Grade::Medium => self.queue.len(),
        };
        self.queue.insert(position, entry);

        Ok(AnswerOutcome::Requeued {
            item_id: record.id,
            position,
        })
    }
}
