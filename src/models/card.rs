//! Card is one saved word of one learner, together with its review schedule.
use super::Schedule;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub learner_id: i64,
    pub word: String,
    pub definition: String,
    pub ease: i64,
    pub interval_days: i64,
    pub last_reviewed_at: DateTime<Utc>,
    pub next_review_at: DateTime<Utc>,
}

impl Card {
    pub fn new(
        learner_id: i64,
        word: impl Into<String>,
        definition: impl Into<String>,
        schedule: Schedule,
    ) -> Self {
        Self {
            learner_id,
            word: word.into(),
            definition: definition.into(),
            ease: schedule.ease,
            interval_days: schedule.interval_days,
            last_reviewed_at: schedule.last_reviewed_at,
            next_review_at: schedule.next_review_at,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }

    pub fn schedule(&self) -> Schedule {
        Schedule {
            ease: self.ease,
            interval_days: self.interval_days,
            last_reviewed_at: self.last_reviewed_at,
            next_review_at: self.next_review_at,
        }
    }

    pub fn apply(&mut self, schedule: Schedule) {
        self.ease = schedule.ease;
        self.interval_days = schedule.interval_days;
        self.last_reviewed_at = schedule.last_reviewed_at;
        self.next_review_at = schedule.next_review_at;
    }
}
