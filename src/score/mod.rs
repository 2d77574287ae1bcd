//! Score Calculator
//!
//! Two composite scores derived from the knowledge-unit list and the
//! normalized quiz history:
//! - `complexity`: how many units the entry currently contains,
//! - `mastery`: the rounded percentage of units whose required history
//!   keys are all passed.
//!
//! Both are caches on the entry, recomputed after every content mutation
//! or grading event; they are never independently settable.

use crate::types::VocabularyEntry;
use crate::units;

/// Total count of knowledge units currently applicable to the entry.
/// Pure content count, no history involved. Always ≥ 1 (the spelling unit
/// is unconditional).
pub fn complexity(entry: &VocabularyEntry) -> u32 {
    units::enumerate(entry).len() as u32
}

/// Percentage (0–100) of knowledge units fully passed in the entry's
/// history. Expects the history in normalized form; absent keys count as
/// failing. An entry with zero units scores 0, signalling "nothing to
/// master yet" without a divide-by-zero.
pub fn mastery(entry: &VocabularyEntry) -> u8 {
    let units = units::enumerate(entry);
    if units.is_empty() {
        return 0;
    }
    let passed = units
        .iter()
        .filter(|unit| unit.is_passed(&entry.test_results))
        .count();
    let pct = (100.0 * passed as f64 / units.len() as f64).round();
    pct.clamp(0.0, 100.0) as u8
}
