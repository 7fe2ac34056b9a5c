//! Ease/interval review scheduling, close to the one used by Anki but without
//! separate learning and relearning steps.
//!
//! - Each card carries an ease (percent, 250 = 2.5x) and an interval in days
//! - `Again` drops the ease by 20 and brings the card back after a short delay
//! - `Hard` drops the ease by 15 and grows the interval by 1.2x
//! - `Good` grows the interval by the ease, `Easy` adds 15 to the ease and a 1.3x bonus
//! - Fresh intervals go 0 → 1 → 3 days, after that they are multiplied
//! - A review done late counts the days actually elapsed as the prior interval

use super::{Card, Grade};
use crate::config::SchedulerConfig;
use chrono::{DateTime, TimeDelta, Utc};

pub const MIN_EASE: i64 = 130;
pub const MAX_EASE: i64 = 1300;
pub const MAX_MULTIPLIER: f64 = 13.0;
/// Largest interval a configuration may allow, one hundred years.
pub const INTERVAL_DAYS_LIMIT: i64 = 36_500;
const HARD_MULTIPLIER: f64 = 1.2;
const EASY_BONUS: f64 = 1.3;

/// Ease, interval and review times of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
    pub ease: i64,
    pub interval_days: i64,
    pub last_reviewed_at: DateTime<Utc>,
    pub next_review_at: DateTime<Utc>,
}

impl Schedule {
    /// Schedule of a word saved at `now`.
    pub fn initial(config: &SchedulerConfig, now: DateTime<Utc>) -> Self {
        let interval_days = config.initial_interval_days.clamp(0, config.max_interval_days);
        Self {
            ease: config.initial_ease.clamp(MIN_EASE, MAX_EASE),
            interval_days,
            last_reviewed_at: now,
            next_review_at: add_days(now, interval_days),
        }
    }
}

/// Calculates the schedule that follows grading `card` with `grade` at `now`.
/// Never touches storage.
pub fn calculate_next_review(
    card: &Card,
    grade: Grade,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> Schedule {
    // Reviews done late grow from the time that actually passed.
    let elapsed_days = (now - card.last_reviewed_at).num_days();
    let prior = card.interval_days.max(elapsed_days).max(0);

    let ease = (card.ease + grade.ease_delta()).clamp(MIN_EASE, MAX_EASE);

    if grade == Grade::Again {
        return Schedule {
            ease,
            interval_days: 0,
            last_reviewed_at: now,
            next_review_at: now + config.again_delay,
        };
    }

    let interval_days = match prior {
        0 => 1,
        1 => 3,
        _ => {
            let grown = (prior as f64 * multiplier(grade, ease)) as i64;
            // Always grow by at least one day.
            if grown == prior { prior.saturating_add(1) } else { grown }
        }
    }
    .min(config.max_interval_days);

    Schedule {
        ease,
        interval_days,
        last_reviewed_at: now,
        next_review_at: add_days(now, interval_days),
    }
}

/// Interval growth factor for a grade, given the already adjusted ease.
pub fn multiplier(grade: Grade, ease: i64) -> f64 {
    let mult = match grade {
        Grade::Again => 1.0,
        Grade::Hard => HARD_MULTIPLIER,
        Grade::Good => ease as f64 / 100.0,
        Grade::Easy => ease as f64 * EASY_BONUS / 100.0,
    };
    mult.min(MAX_MULTIPLIER)
}

fn add_days(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    TimeDelta::try_days(days)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
