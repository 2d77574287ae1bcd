//! Property-Based Tests for the Knowledge Model
//!
//! Tests the following invariants:
//! - Determinism: enumerate twice returns identical ordered unit lists
//! - Complexity ≥ 1 always (spelling unit is unconditional)
//! - Mastery bounds: 0 ≤ mastery ≤ 100, and 0 on empty history
//! - Refresh idempotence: re-running the pipeline on unchanged content and
//!   history never changes the derived fields
//! - Normalization idempotence and merge behavior over arbitrary keys
//! - Serde round-trip: entry JSON round-trips preserve derived fields and
//!   the flat history map

use proptest::prelude::*;
use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use wordhoard_core::{
    engine, history, score, units, AnnotatedItem, FamilyMember, Grade, ParaphraseItem,
    PrepositionItem, Quality, SchedulerConfig, VocabularyEntry, WordFamily,
};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_text() -> impl Strategy<Value = String> {
    "[a-z]{1,10}( [a-z]{1,10})?"
}

fn arb_annotated() -> impl Strategy<Value = AnnotatedItem> {
    (arb_text(), any::<bool>()).prop_map(|(text, ignored)| AnnotatedItem { text, ignored })
}

fn arb_preposition() -> impl Strategy<Value = PrepositionItem> {
    ("[a-z]{2,6}", any::<bool>()).prop_map(|(prep, ignored)| PrepositionItem { prep, ignored })
}

fn arb_paraphrase() -> impl Strategy<Value = ParaphraseItem> {
    (arb_text(), arb_text(), any::<bool>()).prop_map(|(word, context, ignored)| ParaphraseItem {
        word,
        context,
        ignored,
    })
}

fn arb_family_member() -> impl Strategy<Value = FamilyMember> {
    ("[a-z]{1,10}", any::<bool>()).prop_map(|(word, ignored)| FamilyMember { word, ignored })
}

fn arb_word_family() -> impl Strategy<Value = WordFamily> {
    (
        prop::collection::vec(arb_family_member(), 0..3),
        prop::collection::vec(arb_family_member(), 0..3),
        prop::collection::vec(arb_family_member(), 0..3),
        prop::collection::vec(arb_family_member(), 0..3),
    )
        .prop_map(|(nouns, verbs, adjs, advs)| WordFamily { nouns, verbs, adjs, advs })
}

fn arb_quality() -> impl Strategy<Value = Quality> {
    prop_oneof![
        Just(Quality::Raw),
        Just(Quality::Refined),
        Just(Quality::Verified),
        Just(Quality::Failed),
    ]
}

/// Keys mixing long-form, legacy, and unknown type tokens.
fn arb_history_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("SPELLING".to_string()),
        Just("PRONUNCIATION".to_string()),
        Just("IPA_QUIZ".to_string()),
        Just("MEANING_QUIZ".to_string()),
        Just("sp".to_string()),
        Just("p".to_string()),
        "cq:[a-z]{1,8}",
        "COLLOCATION_CONTEXT_QUIZ:[a-z]{1,8}",
        "idq:[a-z]{1,8}",
        "prq:[a-z]{1,8}",
        "wf_n:[a-z]{1,8}",
        "WORD_FAMILY:v:[a-z]{1,8}",
        "[A-Z_]{3,12}",
    ]
}

fn arb_history() -> impl Strategy<Value = BTreeMap<String, bool>> {
    prop::collection::btree_map(arb_history_key(), any::<bool>(), 0..12)
}

fn arb_entry() -> impl Strategy<Value = VocabularyEntry> {
    (
        "[a-z]{1,12}",                                  // word
        prop::option::of("[a-zɪʊæʃθðŋəː]{2,10}"),       // ipa
        any::<bool>(),                                  // needs_pronunciation_focus
        prop::option::of(arb_text()),                   // meaning
        prop::option::of("([a-z]{1,8} ){2,7}[a-z]{1,8}"), // example
        prop::collection::vec(arb_annotated(), 0..3),   // collocations
        prop::collection::vec(arb_annotated(), 0..3),   // idioms
        prop::collection::vec(arb_preposition(), 0..3), // prepositions
        prop::collection::vec(arb_paraphrase(), 0..3),  // paraphrases
        arb_word_family(),
        arb_history(),
        arb_quality(),
    )
        .prop_map(
            |(
                word,
                ipa,
                needs_focus,
                meaning,
                example,
                collocations,
                idioms,
                prepositions,
                paraphrases,
                word_family,
                test_results,
                quality,
            )| {
                let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
                let mut entry = VocabularyEntry::created("entry", word, now);
                entry.ipa = ipa.unwrap_or_default();
                entry.needs_pronunciation_focus = needs_focus;
                entry.meaning = meaning.unwrap_or_default();
                entry.example = example.unwrap_or_default();
                entry.collocations = collocations;
                entry.idioms = idioms;
                entry.prepositions = prepositions;
                entry.paraphrases = paraphrases;
                entry.word_family = word_family;
                entry.test_results = test_results;
                entry.quality = quality;
                entry
            },
        )
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_enumerate_is_deterministic(entry in arb_entry()) {
        prop_assert_eq!(units::enumerate(&entry), units::enumerate(&entry));
    }

    #[test]
    fn prop_complexity_at_least_one(entry in arb_entry()) {
        prop_assert!(score::complexity(&entry) >= 1);
        prop_assert_eq!(
            score::complexity(&entry) as usize,
            units::enumerate(&entry).len()
        );
    }

    #[test]
    fn prop_mastery_bounded(entry in arb_entry()) {
        let refreshed = engine::refresh(&entry);
        prop_assert!(refreshed.mastery_score <= 100);
    }

    #[test]
    fn prop_mastery_zero_on_empty_history(entry in arb_entry()) {
        let mut entry = entry;
        entry.test_results.clear();
        prop_assert_eq!(score::mastery(&entry), 0);
    }

    #[test]
    fn prop_refresh_idempotent(entry in arb_entry()) {
        let once = engine::refresh(&entry);
        let twice = engine::refresh(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_normalize_idempotent(raw in arb_history()) {
        let once = history::normalize(&raw);
        prop_assert_eq!(history::normalize(&once), once);
    }

    #[test]
    fn prop_merge_applies_every_incoming_key(
        existing in arb_history(),
        incoming in arb_history(),
    ) {
        let merged = history::merge_by_group(&existing, &incoming);
        for (key, passed) in history::normalize(&incoming) {
            prop_assert_eq!(merged.get(&key), Some(&passed));
        }
    }

    #[test]
    fn prop_merge_preserves_ungrouped_existing_keys(
        existing in arb_history(),
        incoming in arb_history(),
    ) {
        let merged = history::merge_by_group(&existing, &incoming);
        let incoming_norm = history::normalize(&incoming);
        for (key, passed) in history::normalize(&existing) {
            let kind = history::HistoryKey::parse(&key).kind;
            if kind.group().is_none() && !incoming_norm.contains_key(&key) {
                prop_assert_eq!(merged.get(&key), Some(&passed));
            }
        }
    }

    #[test]
    fn prop_advance_interval_at_least_one(
        entry in arb_entry(),
        grade in prop_oneof![
            Just(Grade::Learned),
            Just(Grade::Forgot),
            Just(Grade::Hard),
            Just(Grade::Easy),
        ],
    ) {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let next = wordhoard_core::advance(&entry, grade, now, &SchedulerConfig::default());
        prop_assert!(next.interval >= 1);
        prop_assert!(next.next_review_at > now - chrono::Duration::days(1));
    }

    #[test]
    fn prop_entry_serde_round_trip(entry in arb_entry()) {
        let refreshed = engine::refresh(&entry);
        let json = serde_json::to_string(&refreshed).expect("serialize");
        let back: VocabularyEntry = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(refreshed, back);
    }
}
