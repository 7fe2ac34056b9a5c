use super::StorageResult;
use crate::models::Card;
use chrono::{DateTime, Utc};

/// Durable keyed storage for cards, one record per (learner, word).
///
/// Lookups report a missing record as `None`; errors are reserved for
/// genuine storage failures.
pub trait CardStore: Send + Sync {
    fn get(&self, learner_id: i64, word: &str) -> StorageResult<Option<Card>>;

    /// Inserts the card, replacing any record with the same key.
    fn upsert(&self, card: &Card) -> StorageResult<()>;

    /// Loads the card, lets `apply` change it and writes it back as one atomic
    /// step, so concurrent writers on the same store never lose an update.
    /// Returns the stored card, or `None` when there is no such card.
    /// `apply` must not change the card's key.
    fn update(
        &self,
        learner_id: i64,
        word: &str,
        apply: &mut dyn FnMut(&mut Card),
    ) -> StorageResult<Option<Card>>;

    /// Returns whether a record was removed.
    fn delete(&self, learner_id: i64, word: &str) -> StorageResult<bool>;

    fn exists(&self, learner_id: i64, word: &str) -> StorageResult<bool>;

    /// Word of the earliest due card, ties broken by word.
    fn next_due(&self, learner_id: i64, now: DateTime<Utc>) -> StorageResult<Option<String>>;

    fn count(&self, learner_id: i64) -> StorageResult<u64>;

    fn count_due(&self, learner_id: i64, now: DateTime<Utc>) -> StorageResult<u64>;

    /// All cards of a learner ordered by word.
    fn list(&self, learner_id: i64) -> StorageResult<Vec<Card>>;
}
