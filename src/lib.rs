//! # wordhoard-core - Vocabulary Knowledge-Model Core
//!
//! Pure Rust implementation of the knowledge model behind a vocabulary
//! learning app:
//!
//! - **Knowledge Unit Enumerator** - decompose an entry into its
//!   independently testable sub-facts
//! - **Key Normalizer & Merger** - fold heterogeneous, historically-evolved
//!   quiz-result keys into one history, with semantic-group eviction
//! - **Score Calculator** - complexity and mastery (0-100) composites
//! - **Review Scheduler** - grade-driven interval state machine
//! - **Game Eligibility Resolver** - content/quality rule table for the
//!   mini-games
//!
//! ## Design
//!
//! - **Pure** - every operation is a synchronous transform from
//!   `(entry[, grade, now])` to a new entry value; no I/O, no shared state
//! - **Caller-owned persistence** - the returned entry is the sole source
//!   of truth to write back
//! - **Deterministic** - enumeration order is fixed and map-order
//!   independent, so derived scores are reproducible
//! - **Forward-compatible history** - unknown quiz-type tokens pass
//!   through unmodified
//!
//! ## Module structure
//!
//! - [`types`] - entry model, grades, quality, game tags
//! - [`units`] - knowledge-unit enumeration
//! - [`history`] - key normalization and group merging
//! - [`score`] - complexity and mastery calculators
//! - [`scheduler`] - review interval state machine
//! - [`games`] - game eligibility rules
//! - [`engine`] - the fixed Enumerate → Merge → Score → Eligibility
//!   pipeline composing the above
//!
//! ## Usage
//!
//! ```rust
//! use chrono::Utc;
//! use wordhoard_core::{engine, Grade, SchedulerConfig};
//!
//! let now = Utc::now();
//! let mut entry = engine::new_entry("entry-1", "mitigate", now);
//! entry.meaning = "to lessen".to_string();
//! let entry = engine::refresh(&entry);
//! assert_eq!(entry.complexity, 2);
//!
//! let results = [("MEANING_QUIZ".to_string(), true)].into();
//! let entry = engine::apply_review(
//!     &entry,
//!     Grade::Learned,
//!     &results,
//!     now,
//!     &SchedulerConfig::default(),
//! );
//! assert_eq!(entry.mastery_score, 50);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

pub mod engine;
pub mod games;
pub mod history;
pub mod scheduler;
pub mod score;
pub mod types;
pub mod units;

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export the entry model and shared enums
pub use types::{
    AnnotatedItem, FamilyMember, GameTag, Grade, InvalidGradeError, ParaphraseItem,
    PrepositionItem, Quality, VocabularyEntry, WordFamily,
};

/// Re-export the knowledge-unit model
pub use units::{enumerate, KnowledgeUnit};

/// Re-export the history key model
pub use history::{merge_by_group, normalize, History, HistoryKey, SemanticGroup, TestKind};

/// Re-export the scheduler
pub use scheduler::{advance, is_due, SchedulerConfig};

/// Re-export the eligibility resolver
pub use games::eligible_games;
