//! Review session of one learner.
//! Walks the due queue card by card until nothing is due anymore; cards graded
//! `Again` come back within the same session once their short delay passes.

use super::manager::CardManager;
use crate::clock::Clock;
use crate::database::CardStore;
use crate::error::Result;
use crate::models::{Card, Grade};

pub struct ReviewSession {
    pub learner_id: i64,
    pub show_definition: bool,
    current: Option<String>,
    reviewed: usize,
    lapses: usize,
    completed: bool,
}

impl ReviewSession {
    pub fn new(learner_id: i64) -> Self {
        Self {
            learner_id,
            show_definition: false,
            current: None,
            reviewed: 0,
            lapses: 0,
            completed: false,
        }
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Moves to the next due card. Returns `None` and completes the session
    /// when nothing is due.
    pub fn next_card<S: CardStore, C: Clock>(
        &mut self,
        manager: &CardManager<S, C>,
    ) -> Result<Option<&str>> {
        self.current = manager.next_due(self.learner_id)?;
        self.show_definition = false;
        self.completed = self.current.is_none();
        Ok(self.current.as_deref())
    }

    pub fn toggle_definition(&mut self) {
        self.show_definition = !self.show_definition;
    }

    /// Definition of the card on display, once it has been revealed.
    pub fn current_definition<S: CardStore, C: Clock>(
        &self,
        manager: &CardManager<S, C>,
    ) -> Result<Option<String>> {
        match &self.current {
            Some(word) if self.show_definition => {
                manager.definition(self.learner_id, word).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Grades the card on display. Does nothing when no card is shown.
    pub fn grade_current<S: CardStore, C: Clock>(
        &mut self,
        manager: &CardManager<S, C>,
        grade: Grade,
    ) -> Result<Option<Card>> {
        let Some(word) = self.current.take() else {
            return Ok(None);
        };
        let card = manager.grade(self.learner_id, &word, grade)?;
        self.reviewed += 1;
        if grade == Grade::Again {
            self.lapses += 1;
        }
        Ok(Some(card))
    }

    pub fn reviewed_count(&self) -> usize {
        self.reviewed
    }

    /// Number of `Again` grades given in this session.
    pub fn lapse_count(&self) -> usize {
        self.lapses
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn phase_message(&self) -> String {
        if self.completed {
            format!(
                "Done: {} review{}, {} to relearn",
                self.reviewed,
                if self.reviewed == 1 { "" } else { "s" },
                self.lapses
            )
        } else {
            format!("Review {}", self.reviewed + 1)
        }
    }
}
