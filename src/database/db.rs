//! SQLite card store
//!
//! Keeps every card in one `cards` table keyed by (learner_id, word).
//! Timestamps are stored as seconds since the Unix epoch.

use super::{CardStore, StorageError, StorageResult};
use crate::models::Card;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS cards (
        learner_id INTEGER NOT NULL,
        word TEXT NOT NULL,
        definition TEXT NOT NULL,
        ease INTEGER NOT NULL,
        interval_days INTEGER NOT NULL,
        last_reviewed_at INTEGER NOT NULL,
        next_review_at INTEGER NOT NULL,
        PRIMARY KEY (learner_id, word)
    );
    CREATE INDEX IF NOT EXISTS cards_due ON cards (learner_id, next_review_at);
";

const CARD_COLUMNS: &str =
    "learner_id, word, definition, ease, interval_days, last_reviewed_at, next_review_at";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct SqliteCardStore {
    conn: Mutex<Connection>,
}

impl SqliteCardStore {
    /// Opens (or creates) the database file and makes sure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        })?;
        Self::init(conn)
    }

    /// Private database that disappears with the store.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StorageResult<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(SCHEMA)?;

        let rows: i64 = conn.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
        debug!(rows, "card store opened");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

/// Raw column values; converted into a `Card` outside of rusqlite callbacks.
struct CardRow {
    learner_id: i64,
    word: String,
    definition: String,
    ease: i64,
    interval_days: i64,
    last_reviewed_at: i64,
    next_review_at: i64,
}

impl CardRow {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            learner_id: row.get(0)?,
            word: row.get(1)?,
            definition: row.get(2)?,
            ease: row.get(3)?,
            interval_days: row.get(4)?,
            last_reviewed_at: row.get(5)?,
            next_review_at: row.get(6)?,
        })
    }

    fn into_card(self) -> StorageResult<Card> {
        let last_reviewed_at = timestamp(self.last_reviewed_at, &self.word)?;
        let next_review_at = timestamp(self.next_review_at, &self.word)?;
        Ok(Card {
            learner_id: self.learner_id,
            word: self.word,
            definition: self.definition,
            ease: self.ease,
            interval_days: self.interval_days,
            last_reviewed_at,
            next_review_at,
        })
    }
}

fn timestamp(secs: i64, word: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        StorageError::Corrupt(format!("timestamp {secs} of {word:?} is out of range"))
    })
}

fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

fn read_card(conn: &Connection, learner_id: i64, word: &str) -> StorageResult<Option<Card>> {
    let row = conn
        .query_row(
            &format!("SELECT {CARD_COLUMNS} FROM cards WHERE learner_id = ?1 AND word = ?2"),
            params![learner_id, word],
            CardRow::from_row,
        )
        .optional()?;
    row.map(CardRow::into_card).transpose()
}

fn write_card(conn: &Connection, card: &Card) -> StorageResult<()> {
    conn.execute(
        &format!(
            "INSERT INTO cards ({CARD_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT (learner_id, word) DO UPDATE SET
                definition = excluded.definition,
                ease = excluded.ease,
                interval_days = excluded.interval_days,
                last_reviewed_at = excluded.last_reviewed_at,
                next_review_at = excluded.next_review_at"
        ),
        params![
            card.learner_id,
            card.word,
            card.definition,
            card.ease,
            card.interval_days,
            card.last_reviewed_at.timestamp(),
            card.next_review_at.timestamp(),
        ],
    )?;
    Ok(())
}

impl CardStore for SqliteCardStore {
    fn get(&self, learner_id: i64, word: &str) -> StorageResult<Option<Card>> {
        read_card(&self.conn.lock(), learner_id, word)
    }

    fn upsert(&self, card: &Card) -> StorageResult<()> {
        write_card(&self.conn.lock(), card)
    }

    fn update(
        &self,
        learner_id: i64,
        word: &str,
        apply: &mut dyn FnMut(&mut Card),
    ) -> StorageResult<Option<Card>> {
        let mut conn = self.conn.lock();
        // IMMEDIATE takes the write lock up front; other connections to the
        // same file wait in the busy handler instead of reading a stale row.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let Some(mut card) = read_card(&tx, learner_id, word)? else {
            return Ok(None);
        };
        apply(&mut card);
        write_card(&tx, &card)?;
        tx.commit()?;
        Ok(Some(card))
    }

    fn delete(&self, learner_id: i64, word: &str) -> StorageResult<bool> {
        let conn = self.conn.lock();
        let removed = conn.execute(
            "DELETE FROM cards WHERE learner_id = ?1 AND word = ?2",
            params![learner_id, word],
        )?;
        Ok(removed > 0)
    }

    fn exists(&self, learner_id: i64, word: &str) -> StorageResult<bool> {
        let conn = self.conn.lock();
        let found: i64 = conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM cards WHERE learner_id = ?1 AND word = ?2)",
            params![learner_id, word],
            |row| row.get(0),
        )?;
        Ok(found != 0)
    }

    fn next_due(&self, learner_id: i64, now: DateTime<Utc>) -> StorageResult<Option<String>> {
        let conn = self.conn.lock();
        let word = conn
            .query_row(
                "SELECT word FROM cards
                 WHERE learner_id = ?1 AND next_review_at <= ?2
                 ORDER BY next_review_at ASC, word ASC
                 LIMIT 1",
                params![learner_id, now.timestamp()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(word)
    }

    fn count(&self, learner_id: i64) -> StorageResult<u64> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM cards WHERE learner_id = ?1",
            params![learner_id],
            |row| row.get(0),
        )?;
        Ok(count_to_u64(count))
    }

    fn count_due(&self, learner_id: i64, now: DateTime<Utc>) -> StorageResult<u64> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM cards WHERE learner_id = ?1 AND next_review_at <= ?2",
            params![learner_id, now.timestamp()],
            |row| row.get(0),
        )?;
        Ok(count_to_u64(count))
    }

    fn list(&self, learner_id: i64) -> StorageResult<Vec<Card>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE learner_id = ?1 ORDER BY word ASC"
        ))?;

        let rows = stmt
            .query_map(params![learner_id], CardRow::from_row)?
            .collect::<rusqlite::Result<Vec<CardRow>>>()?;

        rows.into_iter().map(CardRow::into_card).collect()
    }
}
