//! Entry lifecycle pipeline.
//!
//! Every mutation of an entry — new word, AI-content merge, manual edit,
//! review grading, reset — must re-run the same fixed pass order to keep
//! the derived fields consistent:
//!
//! Enumerate → Merge → Score → Eligibility
//!
//! The functions here compose the component modules in that order and are
//! the intended entry points for hosts. Each returns a new entry value;
//! the caller owns persistence and must treat the returned entry as the
//! sole source of truth to write back.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::games;
use crate::history::{self, History};
use crate::scheduler::{self, SchedulerConfig};
use crate::score;
use crate::types::{Grade, VocabularyEntry};

/// Rebuild the derived fields from content + history.
///
/// Run after any content mutation (AI merge, manual edit, quality change).
/// The stored history is normalized in the same pass, so legacy keys can
/// sit in a persisted entry until the next refresh touches it.
pub fn refresh(entry: &VocabularyEntry) -> VocabularyEntry {
    let mut next = entry.clone();
    next.test_results = history::normalize(&entry.test_results);
    next.complexity = score::complexity(&next);
    next.mastery_score = score::mastery(&next);
    next.game_eligibility = games::eligible_games(&next);
    next
}

/// Fold a batch of quiz results into the entry's history (semantic-group
/// eviction applies), then rebuild the derived fields.
pub fn apply_results(entry: &VocabularyEntry, incoming: &History) -> VocabularyEntry {
    let mut next = entry.clone();
    next.test_results = history::merge_by_group(&entry.test_results, incoming);
    refresh(&next)
}

/// Grade a review: advance the scheduling state machine, fold in the quiz
/// results the grading event carried, then rebuild the derived fields.
pub fn apply_review(
    entry: &VocabularyEntry,
    grade: Grade,
    results: &History,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> VocabularyEntry {
    let advanced = scheduler::advance(entry, grade, now, config);
    apply_results(&advanced, results)
}

/// Demote an entry back to "new": clear scheduling state and history, then
/// rebuild the derived fields.
pub fn reset(entry: &VocabularyEntry, now: DateTime<Utc>) -> VocabularyEntry {
    refresh(&scheduler::reset(entry, now))
}

/// Create a new entry with zero scheduling history and consistent derived
/// fields (complexity 1: the unconditional spelling unit).
pub fn new_entry(
    id: impl Into<String>,
    word: impl Into<String>,
    now: DateTime<Utc>,
) -> VocabularyEntry {
    let entry = refresh(&VocabularyEntry::created(id, word, now));
    debug!(entry = %entry.id, word = %entry.word, "entry created");
    entry
}
