//! Error taxonomy of the scheduling core.

use crate::database::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepetitionError {
    /// No card for the key, or nothing due. Callers branch on this.
    #[error("no card {word:?} for learner {learner_id}")]
    NotFound { learner_id: i64, word: String },

    #[error("{op} failed for learner {learner_id} word {word:?}: {source}")]
    Storage {
        op: &'static str,
        learner_id: i64,
        word: String,
        #[source]
        source: StorageError,
    },

    #[error("invalid input: {0}")]
    Validation(String),
}

impl RepetitionError {
    pub fn not_found(learner_id: i64, word: &str) -> Self {
        Self::NotFound {
            learner_id,
            word: word.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, RepetitionError>;

/// Attaches operation and key context to store failures.
pub(crate) trait StorageContext<T> {
    fn context(self, op: &'static str, learner_id: i64, word: &str) -> Result<T>;
}

impl<T> StorageContext<T> for std::result::Result<T, StorageError> {
    fn context(self, op: &'static str, learner_id: i64, word: &str) -> Result<T> {
        self.map_err(|source| RepetitionError::Storage {
            op,
            learner_id,
            word: word.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_carries_context() {
        let failed: std::result::Result<(), StorageError> =
            Err(StorageError::Corrupt("ease column is text".to_string()));
        let err = failed.context("grade", 7, "foo").unwrap_err();

        let message = err.to_string();
        assert!(message.contains("grade"));
        assert!(message.contains("learner 7"));
        assert!(message.contains("\"foo\""));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_is_recognised() {
        assert!(RepetitionError::not_found(1, "foo").is_not_found());
        assert!(!RepetitionError::Validation("x".to_string()).is_not_found());
    }
}
