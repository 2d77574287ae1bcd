//! Review Scheduler
//!
//! A small state machine over `(interval, last_grade, consecutive_correct,
//! forgot_count)` with the four grades as its transition alphabet:
//! - `LEARNED`: first-acquisition signal, seeds the interval regardless of
//!   prior state,
//! - `FORGOT`: drops back to the forgot interval and counts the lapse,
//! - `HARD` / `EASY`: grow or shrink the interval with factors that depend
//!   on the previous grade (an EASY→HARD flip is penalized, a HARD→EASY
//!   flip recovers faster).
//!
//! Due dates are normalized to midnight of the calendar date of `now` plus
//! the interval, so two reviews on the same day produce the same due date
//! regardless of time-of-day. Hosts that want learner-local day boundaries
//! pass a `now` already shifted into that frame.
//!
//! All tuning constants live in an explicit [`SchedulerConfig`] passed into
//! [`advance`], keeping the scheduler a pure function.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Grade, VocabularyEntry};

/// Interval tuning for the review state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Interval (days) seeded by `LEARNED`, or by `HARD` from zero.
    pub initial_hard_interval: u32,
    /// Interval floor (days) for any `EASY` outcome.
    pub initial_easy_interval: u32,
    /// Interval (days) after a `FORGOT`.
    pub forgot_interval: u32,
    /// Shrink applied to the interval when `HARD` follows `EASY`.
    pub easy_hard_penalty_factor: f64,
    /// Growth applied when `HARD` repeats on a non-zero interval.
    pub hard_hard_growth_factor: f64,
    /// Growth applied when `EASY` follows `HARD`.
    pub hard_easy_recovery_factor: f64,
    /// Growth applied when `EASY` repeats.
    pub easy_easy_growth_factor: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_hard_interval: 1,
            initial_easy_interval: 3,
            forgot_interval: 1,
            easy_hard_penalty_factor: 0.5,
            hard_hard_growth_factor: 1.2,
            hard_easy_recovery_factor: 1.5,
            easy_easy_growth_factor: 2.0,
        }
    }
}

/// Advance the scheduling state by one grading event.
///
/// Pure transform: returns the updated entry, leaves the input untouched.
/// Callers must follow with a score pass; [`crate::engine::apply_review`]
/// composes the full pipeline.
pub fn advance(
    entry: &VocabularyEntry,
    grade: Grade,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> VocabularyEntry {
    let mut next = entry.clone();

    match grade {
        Grade::Learned => {
            next.consecutive_correct = 1;
            next.interval = config.initial_hard_interval;
        }
        Grade::Forgot => {
            next.interval = config.forgot_interval;
            next.consecutive_correct = 0;
            next.forgot_count += 1;
        }
        Grade::Hard => {
            next.interval = if entry.last_grade == Some(Grade::Easy) {
                scaled(entry.interval, config.easy_hard_penalty_factor)
            } else if entry.interval == 0 {
                config.initial_hard_interval
            } else {
                scaled(entry.interval, config.hard_hard_growth_factor)
            };
            next.consecutive_correct += 1;
        }
        Grade::Easy => {
            next.interval = if entry.interval == 0 {
                config.initial_easy_interval
            } else if entry.last_grade == Some(Grade::Hard) {
                scaled(entry.interval, config.hard_easy_recovery_factor)
                    .max(config.initial_easy_interval)
            } else {
                scaled(entry.interval, config.easy_easy_growth_factor)
                    .max(config.initial_easy_interval)
            };
            next.consecutive_correct += 1;
        }
    }

    next.next_review_at = due_at(now, next.interval);
    next.last_grade = Some(grade);
    next.last_reviewed_at = Some(now);

    debug!(
        entry = %next.id,
        grade = grade.as_str(),
        interval = next.interval,
        "review graded"
    );
    next
}

/// Demote an entry back to "new": due immediately, zero interval and
/// counters, no grade, and the quiz history cleared entirely.
pub fn reset(entry: &VocabularyEntry, now: DateTime<Utc>) -> VocabularyEntry {
    let mut next = entry.clone();
    next.next_review_at = now;
    next.interval = 0;
    next.consecutive_correct = 0;
    next.forgot_count = 0;
    next.last_grade = None;
    next.last_reviewed_at = None;
    next.test_results.clear();

    debug!(entry = %next.id, "scheduling state reset");
    next
}

pub fn is_due(entry: &VocabularyEntry, now: DateTime<Utc>) -> bool {
    entry.next_review_at <= now
}

/// `floor(interval * factor)` with a one-day floor.
fn scaled(interval: u32, factor: f64) -> u32 {
    ((interval as f64 * factor).floor() as u32).max(1)
}

/// Midnight of `now`'s calendar date plus `interval` days.
fn due_at(now: DateTime<Utc>, interval: u32) -> DateTime<Utc> {
    (now.date_naive() + Duration::days(i64::from(interval)))
        .and_time(NaiveTime::MIN)
        .and_utc()
}
