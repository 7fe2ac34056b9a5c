use crate::database::CardStore;
use crate::error::{Result, StorageContext};
use chrono::{DateTime, Utc};

/// Picks the cards a learner should review next.
pub struct ReviewQueue<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: CardStore + ?Sized> ReviewQueue<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Word of one card with `next_review_at <= now`, or `None` when the
    /// learner has nothing due. Repeated calls on the same store state pick
    /// the same card.
    pub fn next_due(&self, learner_id: i64, now: DateTime<Utc>) -> Result<Option<String>> {
        self.store
            .next_due(learner_id, now)
            .context("next due card", learner_id, "")
    }

    pub fn due_count(&self, learner_id: i64, now: DateTime<Utc>) -> Result<u64> {
        self.store
            .count_due(learner_id, now)
            .context("count due cards", learner_id, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::SqliteCardStore;
    use crate::models::Card;
    use chrono::TimeDelta;

    #[test]
    fn test_nothing_due_is_not_an_error() {
        let store = SqliteCardStore::open_in_memory().unwrap();
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        store
            .upsert(&Card {
                learner_id: 3,
                word: "holnap".to_string(),
                definition: "tomorrow".to_string(),
                ease: 250,
                interval_days: 1,
                last_reviewed_at: now,
                next_review_at: now + TimeDelta::days(1),
            })
            .unwrap();

        let queue = ReviewQueue::new(&store);
        assert_eq!(queue.next_due(3, now).unwrap(), None);
        assert_eq!(queue.due_count(3, now).unwrap(), 0);
        assert_eq!(
            queue.next_due(3, now + TimeDelta::days(1)).unwrap().as_deref(),
            Some("holnap")
        );
    }
}
