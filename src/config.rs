//! Configuration for the scheduler and the binary.

use crate::error::{RepetitionError, Result};
use crate::models::schedule::{INTERVAL_DAYS_LIMIT, MAX_EASE, MIN_EASE};
use chrono::TimeDelta;
use std::path::PathBuf;

/// Scheduling parameters consumed when the card manager is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Ease given to new cards, in percent (250 = 2.5x).
    pub initial_ease: i64,
    /// Days between saving a word and its first review.
    pub initial_interval_days: i64,
    /// Delay before a card graded `Again` comes back. Must stay below a day.
    pub again_delay: TimeDelta,
    /// Upper bound for any computed interval, at most `INTERVAL_DAYS_LIMIT`.
    pub max_interval_days: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_ease: 250,
            initial_interval_days: 0,
            again_delay: TimeDelta::seconds(20),
            max_interval_days: INTERVAL_DAYS_LIMIT,
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_EASE..=MAX_EASE).contains(&self.initial_ease) {
            return Err(RepetitionError::Validation(format!(
                "initial ease {} outside [{MIN_EASE}, {MAX_EASE}]",
                self.initial_ease
            )));
        }
        if self.initial_interval_days < 0 {
            return Err(RepetitionError::Validation(format!(
                "initial interval {} is negative",
                self.initial_interval_days
            )));
        }
        if self.again_delay < TimeDelta::zero() || self.again_delay >= TimeDelta::days(1) {
            return Err(RepetitionError::Validation(format!(
                "again delay of {}s is not below one day",
                self.again_delay.num_seconds()
            )));
        }
        if !(1..=INTERVAL_DAYS_LIMIT).contains(&self.max_interval_days) {
            return Err(RepetitionError::Validation(format!(
                "maximum interval {} outside [1, {INTERVAL_DAYS_LIMIT}] days",
                self.max_interval_days
            )));
        }
        Ok(())
    }

    /// Reads overrides from `WORDREP_*` variables, keeping defaults for
    /// missing or unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            initial_ease: env_parse("WORDREP_INITIAL_EASE").unwrap_or(defaults.initial_ease),
            initial_interval_days: env_parse("WORDREP_INITIAL_INTERVAL_DAYS")
                .unwrap_or(defaults.initial_interval_days),
            again_delay: env_parse("WORDREP_AGAIN_DELAY_SECS")
                .and_then(TimeDelta::try_seconds)
                .unwrap_or(defaults.again_delay),
            max_interval_days: env_parse("WORDREP_MAX_INTERVAL_DAYS")
                .unwrap_or(defaults.max_interval_days),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_level: String,
    pub scheduler: SchedulerConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let db_path = std::env::var("WORDREP_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("wordrep.sqlite3"));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            db_path,
            log_level,
            scheduler: SchedulerConfig::from_env(),
        }
    }
}

fn env_parse(key: &str) -> Option<i64> {
    std::env::var(key).ok().and_then(|value| value.trim().parse().ok())
}
