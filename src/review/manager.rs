//! Card lifecycle: saving words, grading them, and reading them back.

use super::locks::KeyLocks;
use super::mask::masked_prompt;
use super::queue::ReviewQueue;
use crate::clock::Clock;
use crate::config::SchedulerConfig;
use crate::database::CardStore;
use crate::error::{RepetitionError, Result, StorageContext};
use crate::models::schedule::{MAX_EASE, MIN_EASE};
use crate::models::{Card, CardStats, Grade, Schedule, calculate_next_review};
use tracing::{debug, info, warn};

/// A due card ready to be shown, with the answer hidden from its definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuePrompt {
    pub word: String,
    pub prompt: String,
}

pub struct CardManager<S, C> {
    store: S,
    clock: C,
    config: SchedulerConfig,
    locks: KeyLocks,
}

impl<S: CardStore, C: Clock> CardManager<S, C> {
    pub fn new(store: S, clock: C, config: SchedulerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            clock,
            config,
            locks: KeyLocks::default(),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Saves a word with a fresh schedule. Saving a word that already exists
    /// replaces its definition and restarts its schedule.
    pub fn create(&self, learner_id: i64, word: &str, definition: &str) -> Result<Card> {
        validate_word(word)?;
        let _guard = self.locks.lock(learner_id, word);

        let now = self.clock.now();
        let card = Card::new(
            learner_id,
            word,
            definition,
            Schedule::initial(&self.config, now),
        );
        self.store
            .upsert(&card)
            .context("create", learner_id, word)?;

        info!(learner_id, word, next_review_at = %card.next_review_at, "card saved");
        Ok(card)
    }

    /// Applies a grade to a card and persists the resulting schedule.
    pub fn grade(&self, learner_id: i64, word: &str, grade: Grade) -> Result<Card> {
        validate_word(word)?;
        let _guard = self.locks.lock(learner_id, word);

        // The store applies the new schedule inside one transaction, so
        // other processes sharing the database file cannot interleave.
        let now = self.clock.now();
        let card = self
            .store
            .update(learner_id, word, &mut |card| {
                if now < card.last_reviewed_at {
                    warn!(
                        learner_id,
                        word,
                        last_reviewed_at = %card.last_reviewed_at,
                        %now,
                        "clock is behind last review"
                    );
                }
                let schedule = calculate_next_review(card, grade, now, &self.config);
                card.apply(schedule);
            })
            .context("grade", learner_id, word)?
            .ok_or_else(|| RepetitionError::not_found(learner_id, word))?;

        debug!(
            learner_id,
            word,
            %grade,
            ease = card.ease,
            interval_days = card.interval_days,
            next_review_at = %card.next_review_at,
            "card graded"
        );
        Ok(card)
    }

    pub fn exists(&self, learner_id: i64, word: &str) -> Result<bool> {
        validate_word(word)?;
        self.store
            .exists(learner_id, word)
            .context("exists", learner_id, word)
    }

    /// Removes a card. Removing a card that is not there succeeds.
    pub fn delete(&self, learner_id: i64, word: &str) -> Result<()> {
        validate_word(word)?;
        let _guard = self.locks.lock(learner_id, word);
        let removed = self
            .store
            .delete(learner_id, word)
            .context("delete", learner_id, word)?;
        if removed {
            info!(learner_id, word, "card deleted");
        }
        Ok(())
    }

    pub fn definition(&self, learner_id: i64, word: &str) -> Result<String> {
        validate_word(word)?;
        self.store
            .get(learner_id, word)
            .context("definition", learner_id, word)?
            .map(|card| card.definition)
            .ok_or_else(|| RepetitionError::not_found(learner_id, word))
    }

    /// Word of a card due now, or `None` when the learner is done.
    pub fn next_due(&self, learner_id: i64) -> Result<Option<String>> {
        ReviewQueue::new(&self.store).next_due(learner_id, self.clock.now())
    }

    /// The next due card with its masked definition.
    pub fn next_due_prompt(&self, learner_id: i64) -> Result<Option<DuePrompt>> {
        let Some(word) = self.next_due(learner_id)? else {
            return Ok(None);
        };
        let definition = self.definition(learner_id, &word)?;
        Ok(Some(DuePrompt {
            prompt: masked_prompt(&definition, &word),
            word,
        }))
    }

    pub fn stats(&self, learner_id: i64) -> Result<CardStats> {
        let word_count = self
            .store
            .count(learner_id)
            .context("stats", learner_id, "")?;
        let due_count = ReviewQueue::new(&self.store).due_count(learner_id, self.clock.now())?;
        Ok(CardStats {
            word_count,
            due_count,
        })
    }

    /// All cards of a learner, ordered by word.
    pub fn cards(&self, learner_id: i64) -> Result<Vec<Card>> {
        self.store.list(learner_id).context("list", learner_id, "")
    }

    /// Stores a card that carries its own schedule, e.g. from an export.
    pub fn restore(&self, mut card: Card) -> Result<()> {
        validate_word(&card.word)?;
        card.ease = card.ease.clamp(MIN_EASE, MAX_EASE);
        card.interval_days = card.interval_days.clamp(0, self.config.max_interval_days);
        if card.next_review_at < card.last_reviewed_at {
            card.next_review_at = card.last_reviewed_at;
        }

        let _guard = self.locks.lock(card.learner_id, &card.word);
        self.store
            .upsert(&card)
            .context("restore", card.learner_id, &card.word)
    }
}

fn validate_word(word: &str) -> Result<()> {
    if word.trim().is_empty() {
        return Err(RepetitionError::Validation("word must not be empty".to_string()));
    }
    Ok(())
}
