//! JSON import/export of a learner's cards.
//! Cards keep their schedule, so a learner can move between databases
//! without losing progress.

use crate::clock::Clock;
use crate::database::CardStore;
use crate::error::RepetitionError;
use crate::models::Card;
use crate::review::CardManager;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Repetition(#[from] RepetitionError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerCards {
    pub learner_id: i64,
    pub cards: Vec<Card>,
}

/// Writes all cards of `learner_id` to `path`. Returns how many were written.
pub fn export_json_to_path<S: CardStore, C: Clock>(
    manager: &CardManager<S, C>,
    learner_id: i64,
    path: &Path,
) -> Result<usize, ExportError> {
    let export = LearnerCards {
        learner_id,
        cards: manager.cards(learner_id)?,
    };
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &export)?;
    writer.flush()?;

    info!(learner_id, cards = export.cards.len(), path = %path.display(), "cards exported");
    Ok(export.cards.len())
}

/// Reads an export without storing anything.
pub fn read_json(path: &Path) -> Result<LearnerCards, ExportError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Stores every card of an export under the learner it was exported for,
/// replacing cards with the same word. Returns how many were stored.
pub fn import_json<S: CardStore, C: Clock>(
    manager: &CardManager<S, C>,
    path: &Path,
) -> Result<usize, ExportError> {
    let LearnerCards { learner_id, cards } = read_json(path)?;
    let count = cards.len();
    for mut card in cards {
        card.learner_id = learner_id;
        manager.restore(card)?;
    }

    info!(learner_id, cards = count, path = %path.display(), "cards imported");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::SchedulerConfig;
    use crate::database::SqliteCardStore;
    use crate::models::Grade;
    use chrono::DateTime;
    use std::fs;

    fn manager() -> CardManager<SqliteCardStore, ManualClock> {
        CardManager::new(
            SqliteCardStore::open_in_memory().unwrap(),
            ManualClock::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap()),
            SchedulerConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_export_then_import_keeps_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.json");

        let source = manager();
        source.create(7, "kutya", "dog").unwrap();
        source.create(7, "macska", "cat").unwrap();
        source.grade(7, "kutya", Grade::Good).unwrap();
        assert_eq!(export_json_to_path(&source, 7, &path).unwrap(), 2);

        let target = manager();
        assert_eq!(import_json(&target, &path).unwrap(), 2);
        assert_eq!(target.cards(7).unwrap(), source.cards(7).unwrap());
        assert_eq!(
            target.store().get(7, "kutya").unwrap().unwrap().interval_days,
            1
        );
    }

    #[test]
    fn test_import_uses_file_learner() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.json");
        let json = r#"{
  "learner_id": 3,
  "cards": [
    {
      "learner_id": 99,
      "word": "ház",
      "definition": "house",
      "ease": 250,
      "interval_days": 3,
      "last_reviewed_at": "2023-11-14T22:13:20Z",
      "next_review_at": "2023-11-17T22:13:20Z"
    }
  ]
}"#;
        fs::write(&path, json).unwrap();

        let target = manager();
        assert_eq!(import_json(&target, &path).unwrap(), 1);
        assert!(target.exists(3, "ház").unwrap());
        assert!(!target.exists(99, "ház").unwrap());
    }

    #[test]
    fn test_import_nonexistent_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = import_json(&manager(), &dir.path().join("missing.json"));
        assert!(matches!(result, Err(ExportError::Io(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(matches!(
            import_json(&manager(), &path),
            Err(ExportError::Json(_))
        ));
    }

    #[test]
    fn test_import_rejects_empty_word() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        let export = LearnerCards {
            learner_id: 1,
            cards: vec![Card {
                learner_id: 1,
                word: String::new(),
                definition: "nothing".to_string(),
                ease: 250,
                interval_days: 0,
                last_reviewed_at: DateTime::from_timestamp(0, 0).unwrap(),
                next_review_at: DateTime::from_timestamp(0, 0).unwrap(),
            }],
        };
        fs::write(&path, serde_json::to_string(&export).unwrap()).unwrap();

        assert!(matches!(
            import_json(&manager(), &path),
            Err(ExportError::Repetition(RepetitionError::Validation(_)))
        ));
    }
}
