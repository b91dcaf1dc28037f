//! The reference lexicon: ~5000 ranked word forms with lemma and
//! part-of-speech, loaded once at startup and shared read-only by every
//! component.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LexError, Result};

/// Rank sentinel for words that are not in the reference list.
///
/// Never a real tier: callers must treat it as "unranked", not as a very
/// unpopular word.
pub const UNRANKED: u32 = 9999;

// ---------------------------------------------------------------------------
// WordFormEntry
// ---------------------------------------------------------------------------

/// One surface form in the reference lexicon.
///
/// `part_of_speech` is a one-letter code carried through from the resource
/// (e.g. `"n"`, `"v"`); the codes are data, not a closed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordFormEntry {
    pub word: String,
    pub lemma: String,
    #[serde(rename = "lemRank")]
    pub lem_rank: u32,
    #[serde(rename = "PoS")]
    pub part_of_speech: String,
}

impl WordFormEntry {
    /// Key under which a practice record for this entry is stored.
    pub fn practice_key(&self) -> String {
        format!("{}_{}", self.word, self.part_of_speech)
    }
}

// ---------------------------------------------------------------------------
// LexiconIndex
// ---------------------------------------------------------------------------

/// Immutable in-memory index over the reference word-form list.
///
/// Lookup is case-insensitive exact match on the surface form. Two derived
/// sets are precomputed at load time for the resolver's fallback cascade:
/// contraction suffixes (entries whose surface form begins with an
/// apostrophe, e.g. `'s`) and hyphenated forms.
pub struct LexiconIndex {
    by_word: HashMap<String, WordFormEntry>,
    contraction_suffixes: Vec<String>,
    hyphenated_forms: HashSet<String>,
}

impl LexiconIndex {
    /// Build the index from an already-parsed entry list.
    ///
    /// Duplicate surface forms keep the first entry, so lookup is stable
    /// with respect to the ordered resource.
    pub fn from_entries(entries: Vec<WordFormEntry>) -> Self {
        let mut by_word: HashMap<String, WordFormEntry> = HashMap::with_capacity(entries.len());
        let mut contraction_suffixes = Vec::new();
        let mut hyphenated_forms = HashSet::new();

        for entry in entries {
            let key = entry.word.to_lowercase();
            if key.starts_with('\'') && !contraction_suffixes.contains(&key) {
                contraction_suffixes.push(key.clone());
            }
            if key.contains('-') {
                hyphenated_forms.insert(key.clone());
            }
            by_word.entry(key).or_insert(entry);
        }

        Self {
            by_word,
            contraction_suffixes,
            hyphenated_forms,
        }
    }

    /// Parse a JSON array of word-form records from a reader.
    pub fn load_from_reader<R: Read>(reader: R) -> Result<Self> {
        let entries: Vec<WordFormEntry> = serde_json::from_reader(reader)
            .map_err(|e| LexError::LexiconLoad(e.to_string()))?;
        if entries.is_empty() {
            return Err(LexError::LexiconLoad("lexicon resource is empty".into()));
        }
        Ok(Self::from_entries(entries))
    }

    /// Load the lexicon resource from a file path.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| LexError::LexiconLoad(format!("{}: {e}", path.display())))?;
        Self::load_from_reader(std::io::BufReader::new(file))
    }

    /// Case-insensitive exact lookup of a surface form.
    pub fn lookup(&self, word: &str) -> Option<&WordFormEntry> {
        self.by_word.get(&word.to_lowercase())
    }

    /// Rank of `word`, or [`UNRANKED`] when it is not in the lexicon.
    pub fn rank_of(&self, word: &str) -> u32 {
        self.lookup(word).map(|e| e.lem_rank).unwrap_or(UNRANKED)
    }

    /// All surface forms beginning with an apostrophe (e.g. `'s`, `'t`),
    /// in resource order.
    pub fn contraction_suffixes(&self) -> &[String] {
        &self.contraction_suffixes
    }

    /// All surface forms containing a hyphen.
    pub fn hyphenated_forms(&self) -> &HashSet<String> {
        &self.hyphenated_forms
    }

    /// Number of distinct surface forms indexed.
    pub fn len(&self) -> usize {
        self.by_word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_word.is_empty()
    }

    /// Iterate over every indexed entry (unspecified order).
    pub fn entries(&self) -> impl Iterator<Item = &WordFormEntry> {
        self.by_word.values()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
