//! Common Types
//!
//! Shared data structures used across all core modules. The
//! `VocabularyEntry` is owned by the caller; this crate never persists it
//! and treats the returned value of every operation as the sole source of
//! truth to write back.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==================== Grades ====================

/// Learner-reported review outcome driving interval scheduling.
///
/// `Learned` is the first-acquisition signal; the other three grade a
/// review of an already-acquired entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Grade {
    Learned,
    Forgot,
    Hard,
    Easy,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Learned => "LEARNED",
            Self::Forgot => "FORGOT",
            Self::Hard => "HARD",
            Self::Easy => "EASY",
        }
    }
}

/// A grade value outside the four-symbol alphabet is a caller contract
/// violation and is rejected at the boundary, before any entry mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid grade: {0:?}")]
pub struct InvalidGradeError(pub String);

impl FromStr for Grade {
    type Err = InvalidGradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LEARNED" => Ok(Self::Learned),
            "FORGOT" => Ok(Self::Forgot),
            "HARD" => Ok(Self::Hard),
            "EASY" => Ok(Self::Easy),
            other => Err(InvalidGradeError(other.to_string())),
        }
    }
}

// ==================== Content quality ====================

/// Editorial quality of an entry's content. Only `Verified` entries feed
/// the mini-games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Quality {
    #[default]
    Raw,
    Refined,
    Verified,
    Failed,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::Refined => "REFINED",
            Self::Verified => "VERIFIED",
            Self::Failed => "FAILED",
        }
    }
}

// ==================== Game tags ====================

/// Mini-games an entry can qualify for. Eligibility is recomputed from
/// content and quality by [`crate::games::eligible_games`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameTag {
    ColloConnect,
    IdiomConnect,
    MeaningMatch,
    IpaSorter,
    SentenceScramble,
    PrepositionPower,
    WordTransformer,
    ParaphraseContext,
}

// ==================== Content items ====================

/// A collocation or idiom attached to an entry. Ignored items exist in the
/// data but contribute no knowledge unit and no game eligibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedItem {
    pub text: String,
    #[serde(default)]
    pub ignored: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepositionItem {
    pub prep: String,
    #[serde(default)]
    pub ignored: bool,
}

/// A paraphrase with its own context sentence; the context feeds the
/// paraphrase-in-context game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParaphraseItem {
    pub word: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub ignored: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub word: String,
    #[serde(default)]
    pub ignored: bool,
}

/// Word-family members grouped by part of speech.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFamily {
    #[serde(default)]
    pub nouns: Vec<FamilyMember>,
    #[serde(default)]
    pub verbs: Vec<FamilyMember>,
    #[serde(default)]
    pub adjs: Vec<FamilyMember>,
    #[serde(default)]
    pub advs: Vec<FamilyMember>,
}

impl WordFamily {
    /// Non-ignored members in fixed sub-list order, tagged with the short
    /// part-of-speech code used in history keys (`n`, `v`, `j`, `d`).
    pub fn active_members(&self) -> Vec<(char, &str)> {
        let mut out = Vec::new();
        for (code, list) in [
            ('n', &self.nouns),
            ('v', &self.verbs),
            ('j', &self.adjs),
            ('d', &self.advs),
        ] {
            for member in list.iter().filter(|m| !m.ignored) {
                out.push((code, member.word.as_str()));
            }
        }
        out
    }
}

// ==================== Vocabulary entry ====================

/// One vocabulary entry: content, scheduling state, quiz history, and the
/// derived caches rebuilt from them.
///
/// Content fields may be empty; an empty field means "this sub-fact does
/// not exist yet", never an error. The derived fields (`complexity`,
/// `mastery_score`, `game_eligibility`) are caches: they are recomputed by
/// [`crate::engine::refresh`] after every content mutation or grading
/// event and must never be hand-edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub id: String,
    pub word: String,

    #[serde(default)]
    pub ipa: String,
    #[serde(default)]
    pub needs_pronunciation_focus: bool,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub collocations: Vec<AnnotatedItem>,
    #[serde(default)]
    pub idioms: Vec<AnnotatedItem>,
    #[serde(default)]
    pub prepositions: Vec<PrepositionItem>,
    #[serde(default)]
    pub paraphrases: Vec<ParaphraseItem>,
    #[serde(default)]
    pub word_family: WordFamily,

    /// Current review interval in days.
    #[serde(default)]
    pub interval: u32,
    pub next_review_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_grade: Option<Grade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub consecutive_correct: u32,
    #[serde(default)]
    pub forgot_count: u32,

    /// Flat pass/fail quiz history, keyed by `TYPE[:IDENTIFIER]`. Legacy
    /// short tokens are accepted and normalized on the next refresh.
    #[serde(default)]
    pub test_results: BTreeMap<String, bool>,

    #[serde(default)]
    pub complexity: u32,
    #[serde(default)]
    pub mastery_score: u8,
    #[serde(default)]
    pub game_eligibility: BTreeSet<GameTag>,

    #[serde(default)]
    pub quality: Quality,
}

impl VocabularyEntry {
    /// A brand-new entry with zero scheduling history: `interval = 0`,
    /// due immediately, empty quiz history.
    pub fn created(id: impl Into<String>, word: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            word: word.into(),
            ipa: String::new(),
            needs_pronunciation_focus: false,
            meaning: String::new(),
            example: String::new(),
            collocations: Vec::new(),
            idioms: Vec::new(),
            prepositions: Vec::new(),
            paraphrases: Vec::new(),
            word_family: WordFamily::default(),
            interval: 0,
            next_review_at: now,
            last_grade: None,
            last_reviewed_at: None,
            consecutive_correct: 0,
            forgot_count: 0,
            test_results: BTreeMap::new(),
            complexity: 0,
            mastery_score: 0,
            game_eligibility: BTreeSet::new(),
            quality: Quality::default(),
        }
    }

    /// Case-insensitive distinct set of non-ignored family members plus
    /// the headword. A set of size one means the family adds nothing
    /// beyond the headword itself.
    pub fn distinct_family_words(&self) -> BTreeSet<String> {
        let mut set: BTreeSet<String> = self
            .word_family
            .active_members()
            .iter()
            .map(|(_, word)| word.to_lowercase())
            .collect();
        set.insert(self.word.to_lowercase());
        set
    }
}
