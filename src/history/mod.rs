//! Test-Result Key Normalizer & Merger
//!
//! Quiz results arrive as a flat `TYPE[:IDENTIFIER]` string map whose type
//! tokens have evolved over time. This module:
//! - parses keys into a typed `(kind, identifier)` pair,
//! - rewrites legacy abbreviated tokens to their long forms,
//! - merges result batches by semantic group: quiz subtypes that probe the
//!   same concept supersede each other, so an incoming result of any type
//!   in a group evicts all existing results of sibling types.
//!
//! Unknown type tokens pass through verbatim so a host can introduce a new
//! quiz type before this crate learns about it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::trace;

// ==================== Key model ====================

/// Long-form quiz-type tokens.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TestKind {
    Spelling,
    Pronunciation,
    IpaQuiz,
    MeaningQuiz,
    SentenceScramble,
    CollocationQuiz,
    CollocationContextQuiz,
    CollocationMultichoiceQuiz,
    IdiomQuiz,
    IdiomContextQuiz,
    PrepositionQuiz,
    ParaphraseQuiz,
    ParaphraseContextQuiz,
    WordFamily,
    /// Forward-compatible pass-through for tokens this crate predates.
    Unknown(String),
}

impl TestKind {
    pub fn as_token(&self) -> &str {
        match self {
            Self::Spelling => "SPELLING",
            Self::Pronunciation => "PRONUNCIATION",
            Self::IpaQuiz => "IPA_QUIZ",
            Self::MeaningQuiz => "MEANING_QUIZ",
            Self::SentenceScramble => "SENTENCE_SCRAMBLE",
            Self::CollocationQuiz => "COLLOCATION_QUIZ",
            Self::CollocationContextQuiz => "COLLOCATION_CONTEXT_QUIZ",
            Self::CollocationMultichoiceQuiz => "COLLOCATION_MULTICHOICE_QUIZ",
            Self::IdiomQuiz => "IDIOM_QUIZ",
            Self::IdiomContextQuiz => "IDIOM_CONTEXT_QUIZ",
            Self::PrepositionQuiz => "PREPOSITION_QUIZ",
            Self::ParaphraseQuiz => "PARAPHRASE_QUIZ",
            Self::ParaphraseContextQuiz => "PARAPHRASE_CONTEXT_QUIZ",
            Self::WordFamily => "WORD_FAMILY",
            Self::Unknown(token) => token,
        }
    }

    /// Resolve a long-form token. Anything unrecognized is `Unknown`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "SPELLING" => Self::Spelling,
            "PRONUNCIATION" => Self::Pronunciation,
            "IPA_QUIZ" => Self::IpaQuiz,
            "MEANING_QUIZ" => Self::MeaningQuiz,
            "SENTENCE_SCRAMBLE" => Self::SentenceScramble,
            "COLLOCATION_QUIZ" => Self::CollocationQuiz,
            "COLLOCATION_CONTEXT_QUIZ" => Self::CollocationContextQuiz,
            "COLLOCATION_MULTICHOICE_QUIZ" => Self::CollocationMultichoiceQuiz,
            "IDIOM_QUIZ" => Self::IdiomQuiz,
            "IDIOM_CONTEXT_QUIZ" => Self::IdiomContextQuiz,
            "PREPOSITION_QUIZ" => Self::PrepositionQuiz,
            "PARAPHRASE_QUIZ" => Self::ParaphraseQuiz,
            "PARAPHRASE_CONTEXT_QUIZ" => Self::ParaphraseContextQuiz,
            "WORD_FAMILY" => Self::WordFamily,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The semantic group this kind belongs to, if any. Kinds outside a
    /// group are never evicted by a merge.
    pub fn group(&self) -> Option<SemanticGroup> {
        match self {
            Self::CollocationQuiz
            | Self::CollocationContextQuiz
            | Self::CollocationMultichoiceQuiz => Some(SemanticGroup::Collocation),
            Self::ParaphraseQuiz | Self::ParaphraseContextQuiz => Some(SemanticGroup::Paraphrase),
            Self::IdiomQuiz | Self::IdiomContextQuiz => Some(SemanticGroup::Idiom),
            Self::Pronunciation | Self::IpaQuiz => Some(SemanticGroup::Pronunciation),
            _ => None,
        }
    }
}

/// Quiz-type tokens that probe the same concept through different question
/// styles, treated as mutually superseding on merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SemanticGroup {
    Collocation,
    Paraphrase,
    Idiom,
    Pronunciation,
}

/// A parsed history key: quiz type plus the optional identifier of the
/// content item the result concerns (exact, case-sensitive text).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HistoryKey {
    pub kind: TestKind,
    pub ident: Option<String>,
}

impl HistoryKey {
    pub fn new(kind: TestKind, ident: Option<String>) -> Self {
        Self { kind, ident }
    }

    /// Parse a raw key, rewriting legacy abbreviated type tokens.
    ///
    /// The per-type family shorthands (`wf_n:run`) bake their
    /// part-of-speech code into the identifier (`WORD_FAMILY:n:run`).
    pub fn parse(raw: &str) -> Self {
        let (token, rest) = match raw.split_once(':') {
            Some((token, rest)) => (token, Some(rest)),
            None => (raw, None),
        };

        if let Some(code) = family_shorthand(token) {
            let ident = match rest {
                Some(rest) => format!("{code}:{rest}"),
                None => code.to_string(),
            };
            return Self::new(TestKind::WordFamily, Some(ident));
        }

        let kind = match token {
            "sp" => TestKind::Spelling,
            "p" => TestKind::Pronunciation,
            "iq" => TestKind::IpaQuiz,
            "mq" => TestKind::MeaningQuiz,
            "sc" => TestKind::SentenceScramble,
            "cq" => TestKind::CollocationQuiz,
            "ccq" => TestKind::CollocationContextQuiz,
            "cmq" => TestKind::CollocationMultichoiceQuiz,
            "idq" => TestKind::IdiomQuiz,
            "icq" => TestKind::IdiomContextQuiz,
            "pq" => TestKind::PrepositionQuiz,
            "prq" => TestKind::ParaphraseQuiz,
            "pcq" => TestKind::ParaphraseContextQuiz,
            "wf" => TestKind::WordFamily,
            other => TestKind::from_token(other),
        };
        Self::new(kind, rest.map(str::to_string))
    }

    /// The flat boundary form, `TYPE` or `TYPE:IDENTIFIER`.
    pub fn encode(&self) -> String {
        match &self.ident {
            Some(ident) => format!("{}:{ident}", self.kind.as_token()),
            None => self.kind.as_token().to_string(),
        }
    }
}

fn family_shorthand(token: &str) -> Option<char> {
    match token {
        "wf_n" => Some('n'),
        "wf_v" => Some('v'),
        "wf_j" => Some('j'),
        "wf_d" => Some('d'),
        _ => None,
    }
}

// ==================== History operations ====================

/// Pass/fail quiz history, keyed by the flat boundary form.
pub type History = BTreeMap<String, bool>;

/// Rewrite every key's leading type token to its long form, preserving any
/// `:`-delimited suffix unchanged.
pub fn normalize(raw: &History) -> History {
    raw.iter()
        .map(|(key, &passed)| (HistoryKey::parse(key).encode(), passed))
        .collect()
}

/// Merge a batch of fresh results into existing history.
///
/// Both sides are normalized first. For every semantic group touched by an
/// incoming key, all existing keys of that group are discarded before the
/// incoming keys are applied; ungrouped keys and untouched groups survive.
/// Incoming wins on exact-key collision.
pub fn merge_by_group(existing: &History, incoming: &History) -> History {
    let existing = normalize(existing);
    let incoming = normalize(incoming);

    let touched: BTreeSet<SemanticGroup> = incoming
        .keys()
        .filter_map(|key| HistoryKey::parse(key).kind.group())
        .collect();

    let mut merged: History = existing
        .into_iter()
        .filter(|(key, _)| {
            let evict = HistoryKey::parse(key)
                .kind
                .group()
                .is_some_and(|group| touched.contains(&group));
            if evict {
                trace!(key = %key, "evicting superseded quiz result");
            }
            !evict
        })
        .collect();
    merged.extend(incoming);
    merged
}
