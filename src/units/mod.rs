//! Knowledge Unit Enumerator
//!
//! A vocabulary entry is not one fact but a bundle of independently
//! testable sub-facts: spelling, pronunciation, meaning, contextual usage,
//! and an open-ended set of collocations, idioms, prepositions,
//! paraphrases and word-family members. Each sub-fact is one
//! `KnowledgeUnit` carrying the history keys that must all be passed for
//! the unit to count as mastered.
//!
//! Enumeration rules, in fixed order:
//! 1. spelling (always)
//! 2. phonetic (ipa present or pronunciation focus; one unit, one or two keys)
//! 3. meaning, 4. context (when the field is non-empty)
//! 5-8. one unit per non-ignored collocation / idiom / preposition / paraphrase
//! 9. one unit per non-ignored family member, unless the family collapses
//!    to the headword itself
//!
//! The enumerator is a pure function of entry content: it never consults
//! `test_results` to decide what units exist.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::history::{HistoryKey, TestKind};
use crate::types::VocabularyEntry;

/// One independently testable sub-fact of an entry.
///
/// Ephemeral: computed on demand, never stored. `unit_key` is a stable
/// display identifier; `required_keys` lists every history key that must
/// map to `true` for the unit to be passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeUnit {
    pub unit_key: String,
    pub required_keys: Vec<HistoryKey>,
}

impl KnowledgeUnit {
    fn single(unit_key: impl Into<String>, kind: TestKind, ident: Option<String>) -> Self {
        Self {
            unit_key: unit_key.into(),
            required_keys: vec![HistoryKey::new(kind, ident)],
        }
    }

    /// A unit is passed iff every required key is recorded as `true`.
    /// Absent keys count as failing, never as passing.
    pub fn is_passed(&self, history: &BTreeMap<String, bool>) -> bool {
        self.required_keys
            .iter()
            .all(|key| history.get(&key.encode()).copied().unwrap_or(false))
    }
}

/// Enumerate the knowledge units an entry currently contains.
///
/// Deterministic and order-stable for a given entry, so complexity and
/// mastery are reproducible across recomputation.
pub fn enumerate(entry: &VocabularyEntry) -> Vec<KnowledgeUnit> {
    let mut units = Vec::new();

    units.push(KnowledgeUnit::single("spelling", TestKind::Spelling, None));

    if !entry.ipa.is_empty() || entry.needs_pronunciation_focus {
        let mut required = vec![HistoryKey::new(TestKind::Pronunciation, None)];
        if !entry.ipa.is_empty() {
            required.push(HistoryKey::new(TestKind::IpaQuiz, None));
        }
        units.push(KnowledgeUnit {
            unit_key: "phonetic".to_string(),
            required_keys: required,
        });
    }

    if !entry.meaning.is_empty() {
        units.push(KnowledgeUnit::single("meaning", TestKind::MeaningQuiz, None));
    }

    if !entry.example.is_empty() {
        units.push(KnowledgeUnit::single("context", TestKind::SentenceScramble, None));
    }

    for colloc in entry.collocations.iter().filter(|c| !c.ignored) {
        units.push(KnowledgeUnit::single(
            format!("colloc:{}", colloc.text),
            TestKind::CollocationQuiz,
            Some(colloc.text.clone()),
        ));
    }

    for idiom in entry.idioms.iter().filter(|i| !i.ignored) {
        units.push(KnowledgeUnit::single(
            format!("idiom:{}", idiom.text),
            TestKind::IdiomQuiz,
            Some(idiom.text.clone()),
        ));
    }

    for prep in entry.prepositions.iter().filter(|p| !p.ignored) {
        units.push(KnowledgeUnit::single(
            format!("prep:{}", prep.prep),
            TestKind::PrepositionQuiz,
            Some(prep.prep.clone()),
        ));
    }

    for para in entry.paraphrases.iter().filter(|p| !p.ignored) {
        units.push(KnowledgeUnit::single(
            format!("para:{}", para.word),
            TestKind::ParaphraseQuiz,
            Some(para.word.clone()),
        ));
    }

    // A family whose only non-ignored member is the headword itself is not
    // a distinct fact to test.
    if entry.distinct_family_words().len() > 1 {
        for (code, word) in entry.word_family.active_members() {
            units.push(KnowledgeUnit::single(
                format!("fam:{code}:{word}"),
                TestKind::WordFamily,
                Some(format!("{code}:{word}")),
            ));
        }
    }

    units
}
