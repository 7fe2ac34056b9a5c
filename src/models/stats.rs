use serde::Serialize;
use std::fmt;

/// Per-learner counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CardStats {
    /// Number of words the learner has saved.
    pub word_count: u64,
    /// Number of those words due right now.
    pub due_count: u64,
}

impl fmt::Display for CardStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            concat!("Saved words: {}\n", "Due now:     {}"),
            self.word_count, self.due_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_display() {
        let stats = CardStats {
            word_count: 12,
            due_count: 3,
        };
        assert_eq!(stats.to_string(), "Saved words: 12\nDue now:     3");
    }
}
