//! Lemma resolution: mapping a raw article word to lexicon entries.
//!
//! Resolution is a strict first-success-wins cascade:
//! 1. direct match on the cleaned word;
//! 2. contraction split (e.g. "don't" → "don" + "'t"), both halves must
//!    resolve;
//! 3. hyphen split (e.g. "mother-in-law"), every fragment must resolve.
//!
//! A word that survives none of the fallbacks is simply unannotated; that
//! is a normal outcome, not an error.

use serde::{Deserialize, Serialize};

use lr_core::lexicon::{LexiconIndex, WordFormEntry};

use crate::tokenize::{clean_word, normalize_apostrophes};

// ---------------------------------------------------------------------------
// AnnotatedPart
// ---------------------------------------------------------------------------

/// One resolved sub-span of a token. Most tokens produce exactly one part;
/// contraction and hyphen splits produce one per fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedPart {
    /// Surface text shown for this part.
    pub text: String,
    /// The lexicon surface form this part matched (practice records key on
    /// it together with the part of speech).
    pub word: String,
    /// Frequency rank of the matched entry (1 = most common).
    pub rank: u32,
    /// Dictionary base form of the matched entry.
    pub lemma: String,
    /// One-letter part-of-speech code of the matched entry.
    pub part_of_speech: String,
}

impl AnnotatedPart {
    fn from_entry(text: impl Into<String>, entry: &WordFormEntry) -> Self {
        Self {
            text: text.into(),
            word: entry.word.clone(),
            rank: entry.lem_rank,
            lemma: entry.lemma.clone(),
            part_of_speech: entry.part_of_speech.clone(),
        }
    }

    /// Key of the practice record backing this part.
    pub fn practice_key(&self) -> String {
        lr_core::practice::practice_key(&self.word, &self.part_of_speech)
    }
}

// ---------------------------------------------------------------------------
// Resolution cascade
// ---------------------------------------------------------------------------

/// Resolve `raw_word` against the lexicon.
///
/// Returns `None` when the word (after cleaning) is empty or no fallback
/// matches; the caller renders the raw token unannotated.
pub fn resolve(raw_word: &str, lexicon: &LexiconIndex) -> Option<Vec<AnnotatedPart>> {
    let cleaned = clean_word(raw_word);
    if cleaned.is_empty() {
        return None;
    }

    // 1. Direct match keeps the original (uncleaned) text for display.
    if let Some(entry) = lexicon.lookup(cleaned) {
        return Some(vec![AnnotatedPart::from_entry(raw_word, entry)]);
    }

    if let Some(parts) = resolve_contraction(cleaned, lexicon) {
        return Some(parts);
    }

    if cleaned.contains('-') {
        if let Some(parts) = resolve_hyphenated(cleaned, lexicon) {
            return Some(parts);
        }
    }

    None
}

/// Contraction fallback: the first known suffix the word ends with wins;
/// both the base and the suffix must be in the lexicon.
fn resolve_contraction(cleaned: &str, lexicon: &LexiconIndex) -> Option<Vec<AnnotatedPart>> {
    let normalized = normalize_apostrophes(cleaned).to_lowercase();

    for suffix in lexicon.contraction_suffixes() {
        let suffix = normalize_apostrophes(suffix);
        if normalized.len() <= suffix.len() || !normalized.ends_with(suffix.as_str()) {
            continue;
        }

        let base_chars = normalized.chars().count() - suffix.chars().count();
        let base: String = normalized.chars().take(base_chars).collect();

        let base_entry = lexicon.lookup(&base)?;
        let suffix_entry = lexicon.lookup(&suffix)?;

        // Split the cleaned original at the same character boundary so the
        // two parts reconstruct the input exactly.
        let display_base: String = cleaned.chars().take(base_chars).collect();
        let display_suffix: String = cleaned.chars().skip(base_chars).collect();

        return Some(vec![
            AnnotatedPart::from_entry(display_base, base_entry),
            AnnotatedPart::from_entry(display_suffix, suffix_entry),
        ]);
    }
    None
}

/// Hyphen fallback: every non-empty fragment must resolve, one part each.
fn resolve_hyphenated(cleaned: &str, lexicon: &LexiconIndex) -> Option<Vec<AnnotatedPart>> {
    let fragments: Vec<&str> = cleaned.split('-').filter(|f| !f.is_empty()).collect();
    if fragments.is_empty() {
        return None;
    }

    let mut parts = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        let entry = lexicon.lookup(fragment)?;
        parts.push(AnnotatedPart::from_entry(fragment, entry));
    }
    Some(parts)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
