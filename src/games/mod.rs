//! Game Eligibility Resolver
//!
//! A rule table mapping entry content and quality to the mini-games the
//! entry currently qualifies for. Hard gate first: only entries that are
//! human-verified (`Quality::Verified`) and have been reviewed at least
//! once are eligible for any game at all. Past the gate, every rule is
//! evaluated independently; a word may qualify for any subset.

use std::collections::BTreeSet;

use crate::types::{GameTag, Quality, VocabularyEntry};

/// Multi-character IPA phonemes consumed as one symbol during scanning, so
/// their parts never match on their own (`d` inside `dʒ`, `ʃ` inside `tʃ`,
/// `ɪ`/`ʊ` at the tail of a diphthong).
const COMPOUND_PHONEMES: &[&str] = &[
    "tʃ", "dʒ", "eɪ", "aɪ", "ɔɪ", "əʊ", "oʊ", "aʊ", "ɪə", "eə", "ʊə", "iː", "uː", "ɑː", "ɔː",
    "ɜː",
];

/// Phonemes the IPA sorter currently has rounds for.
const TARGET_PHONEMES: &[&str] = &[
    "tʃ", "dʒ", "eɪ", "aɪ", "əʊ", "aʊ", "iː", "uː", "ʃ", "ʒ", "θ", "ð", "ŋ", "æ", "ʌ", "ə",
    "ɪ", "ʊ", "d",
];

/// Count the target phonemes cleanly present in an IPA transcription.
///
/// The scan is longest-match-first: at each position a compound phoneme is
/// consumed whole before any single character is considered, so a symbol
/// that is really the fragment of a larger phoneme is never counted as a
/// match of its own.
pub fn target_phoneme_count(ipa: &str) -> usize {
    let chars: Vec<char> = ipa.chars().collect();
    let mut count = 0;
    let mut i = 0;
    while i < chars.len() {
        let mut consumed = 0;
        for compound in COMPOUND_PHONEMES {
            let len = compound.chars().count();
            if i + len <= chars.len() && chars[i..i + len].iter().copied().eq(compound.chars()) {
                if TARGET_PHONEMES.contains(compound) {
                    count += 1;
                }
                consumed = len;
                break;
            }
        }
        if consumed == 0 {
            let single = chars[i].to_string();
            if TARGET_PHONEMES.contains(&single.as_str()) {
                count += 1;
            }
            consumed = 1;
        }
        i += consumed;
    }
    count
}

/// Resolve the set of mini-games the entry qualifies for.
pub fn eligible_games(entry: &VocabularyEntry) -> BTreeSet<GameTag> {
    let mut games = BTreeSet::new();

    if entry.quality != Quality::Verified || entry.last_reviewed_at.is_none() {
        return games;
    }

    if entry.collocations.iter().any(|c| !c.ignored) {
        games.insert(GameTag::ColloConnect);
    }

    if entry.idioms.iter().any(|i| !i.ignored) {
        games.insert(GameTag::IdiomConnect);
    }

    if !entry.word.trim().is_empty() && !entry.meaning.trim().is_empty() {
        games.insert(GameTag::MeaningMatch);
    }

    if !entry.ipa.is_empty() && target_phoneme_count(&entry.ipa) > 0 {
        games.insert(GameTag::IpaSorter);
    }

    if entry.example.split_whitespace().count() >= 5 {
        games.insert(GameTag::SentenceScramble);
    }

    if !entry.example.trim().is_empty() && entry.prepositions.iter().any(|p| !p.ignored) {
        games.insert(GameTag::PrepositionPower);
    }

    if !entry.example.trim().is_empty() && entry.distinct_family_words().len() >= 2 {
        games.insert(GameTag::WordTransformer);
    }

    let contextual_paraphrases = entry
        .paraphrases
        .iter()
        .filter(|p| !p.ignored && !p.context.trim().is_empty())
        .count();
    if contextual_paraphrases >= 2 {
        games.insert(GameTag::ParaphraseContext);
    }

    games
}
