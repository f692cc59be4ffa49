//! Persistence seam for vocabulary items
//!
//! The store owns the canonical records. Anything that mutates an item
//! (the session scheduler, importers) works on its own copy and writes it
//! back through [`VocabularyStore::update_item`].

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::models::{VocabularyItem, VocabularyStats};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum VocabularyStoreError {
    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Item already exists: {0}")]
    DuplicateItem(Uuid),
}

pub type Result<T> = std::result::Result<T, VocabularyStoreError>;

/// Which items a pool fetch should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolFilter {
    All,
    /// Items whose review date is at or before the given instant
    Due(DateTime<Utc>),
    Unlearned,
}

impl PoolFilter {
    fn matches(&self, item: &VocabularyItem) -> bool {
        match self {
            PoolFilter::All => true,
            PoolFilter::Due(now) => item.is_due(*now),
            PoolFilter::Unlearned => !item.is_learned,
        }
    }
}

pub trait VocabularyStore {
    /// Snapshot of every item in insertion order
    fn list_items(&self) -> Vec<VocabularyItem>;

    fn get_item(&self, id: Uuid) -> Result<VocabularyItem>;

    fn insert_item(&mut self, item: VocabularyItem) -> Result<()>;

    /// Replace the stored record with the same id
    fn update_item(&mut self, item: &VocabularyItem) -> Result<()>;

    fn remove_item(&mut self, id: Uuid) -> Result<VocabularyItem>;

    /// Candidate pool for a session, oldest review date first
    fn fetch_pool(&self, filter: PoolFilter) -> Vec<VocabularyItem> {
        let mut pool: Vec<VocabularyItem> = self
            .list_items()
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect();
        pool.sort_by(|a, b| a.next_review_at.cmp(&b.next_review_at));
        pool
    }

    /// Distinct categories, sorted
    fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self.list_items().into_iter().map(|i| i.category).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    fn stats(&self, now: DateTime<Utc>) -> VocabularyStats {
        VocabularyStats::collect(&self.list_items(), now)
    }
}

/// Process-lifetime store backed by a vector
#[derive(Debug, Default)]
pub struct MemoryVocabularyStore {
    items: Vec<VocabularyItem>,
}

impl MemoryVocabularyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: Uuid) -> Result<usize> {
        self.items
            .iter()
            .position(|i| i.id == id)
            .ok_or(VocabularyStoreError::ItemNotFound(id))
    }
}

impl FromIterator<VocabularyItem> for MemoryVocabularyStore {
    fn from_iter<T: IntoIterator<Item = VocabularyItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl VocabularyStore for MemoryVocabularyStore {
    fn list_items(&self) -> Vec<VocabularyItem> {
        self.items.clone()
    }

    fn get_item(&self, id: Uuid) -> Result<VocabularyItem> {
        let pos = self.position(id)?;
        Ok(self.items[pos].clone())
    }

    fn insert_item(&mut self, item: VocabularyItem) -> Result<()> {
        if self.items.iter().any(|i| i.id == item.id) {
            return Err(VocabularyStoreError::DuplicateItem(item.id));
        }
        self.items.push(item);
        Ok(())
    }

    fn update_item(&mut self, item: &VocabularyItem) -> Result<()> {
        let pos = self.position(item.id)?;
        self.items[pos] = item.clone();
        Ok(())
    }

    fn remove_item(&mut self, id: Uuid) -> Result<VocabularyItem> {
        let pos = self.position(id)?;
        Ok(self.items.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn word(native: &str, category: &str) -> VocabularyItem {
        VocabularyItem::new(native.to_string(), String::new(), String::new()).with_category(category)
    }

    #[test]
    fn test_insert_get_update_remove() {
        let mut store = MemoryVocabularyStore::new();
        let mut item = word("水", "Nature");
        store.insert_item(item.clone()).unwrap();

        item.seen_count = 3;
        store.update_item(&item).unwrap();
        assert_eq!(store.get_item(item.id).unwrap().seen_count, 3);

        let removed = store.remove_item(item.id).unwrap();
        assert_eq!(removed.id, item.id);
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_and_missing() {
        let mut store = MemoryVocabularyStore::new();
        let item = word("火", "Nature");
        store.insert_item(item.clone()).unwrap();

        assert_eq!(
            store.insert_item(item.clone()),
            Err(VocabularyStoreError::DuplicateItem(item.id))
        );

        let stranger = word("土", "Nature");
        assert_eq!(
            store.update_item(&stranger),
            Err(VocabularyStoreError::ItemNotFound(stranger.id))
        );
        assert!(store.get_item(stranger.id).is_err());
    }

    #[test]
    fn test_fetch_pool_sorted_by_review_date() {
        let now = Utc::now();
        let mut late = word("晚", "Time");
        late.next_review_at = now + Duration::days(3);
        let mut early = word("早", "Time");
        early.next_review_at = now - Duration::days(1);
        let mut middle = word("中", "Time");
        middle.next_review_at = now + Duration::hours(1);

        let store: MemoryVocabularyStore = vec![late.clone(), early.clone(), middle.clone()].into_iter().collect();

        let ids: Vec<Uuid> = store.fetch_pool(PoolFilter::All).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![early.id, middle.id, late.id]);

        let due: Vec<Uuid> = store.fetch_pool(PoolFilter::Due(now)).iter().map(|i| i.id).collect();
        assert_eq!(due, vec![early.id]);
    }

    #[test]
    fn test_fetch_unlearned() {
        let mut learned = word("学", "Verbs");
        learned.is_learned = true;
        let fresh = word("吃", "Verbs");
        let store: MemoryVocabularyStore = vec![learned, fresh.clone()].into_iter().collect();

        let pool = store.fetch_pool(PoolFilter::Unlearned);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].id, fresh.id);
    }

    #[test]
    fn test_categories_sorted_and_distinct() {
        let store: MemoryVocabularyStore = vec![word("a", "Verbs"), word("b", "Food"), word("c", "Verbs")]
            .into_iter()
            .collect();

        assert_eq!(store.categories(), vec!["Food".to_string(), "Verbs".to_string()]);
    }
}
