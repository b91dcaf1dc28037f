use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lexicon::WordFormEntry;

/// Build the storage key for a `(word, part-of-speech)` pair.
pub fn practice_key(word: &str, part_of_speech: &str) -> String {
    format!("{word}_{part_of_speech}")
}

// ---------------------------------------------------------------------------
// LemmaPracticeRecord
// ---------------------------------------------------------------------------

/// Per-lemma practice history and spaced-repetition scheduling state.
///
/// One record exists per lexicon entry, created at initialization and never
/// deleted. Only the practice operation mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LemmaPracticeRecord {
    /// Unique key `{word}_{part_of_speech}`.
    pub key: String,
    pub word: String,
    pub lemma: String,
    pub lem_rank: u32,
    pub part_of_speech: String,
    /// Timestamp of the most recent practice event, if any.
    pub last_practiced_at: Option<DateTime<Utc>>,
    /// Total practice events, counted even when the schedule does not advance.
    pub repetition_count: u32,
    /// Position in the interval schedule, 0..=12.
    pub interval_index: usize,
    /// Days until the next review at the current schedule position.
    pub interval_days: u32,
    /// When the item next becomes due; `None` until first practiced.
    pub next_review_at: Option<DateTime<Utc>>,
}

impl LemmaPracticeRecord {
    /// Fresh, never-practiced record for a lexicon entry.
    pub fn seed(entry: &WordFormEntry) -> Self {
        Self {
            key: entry.practice_key(),
            word: entry.word.clone(),
            lemma: entry.lemma.clone(),
            lem_rank: entry.lem_rank,
            part_of_speech: entry.part_of_speech.clone(),
            last_practiced_at: None,
            repetition_count: 0,
            interval_index: 0,
            interval_days: 0,
            next_review_at: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_starts_at_schedule_origin() {
        let entry = WordFormEntry {
            word: "report".into(),
            lemma: "report".into(),
            lem_rank: 410,
            part_of_speech: "v".into(),
        };
        let record = LemmaPracticeRecord::seed(&entry);
        assert_eq!(record.key, "report_v");
        assert_eq!(record.repetition_count, 0);
        assert_eq!(record.interval_index, 0);
        assert_eq!(record.interval_days, 0);
        assert!(record.last_practiced_at.is_none());
        assert!(record.next_review_at.is_none());
    }

    #[test]
    fn practice_key_formats_word_and_pos() {
        assert_eq!(practice_key("run", "v"), "run_v");
    }

    #[test]
    fn record_round_trips_json() {
        let entry = WordFormEntry {
            word: "unit".into(),
            lemma: "unit".into(),
            lem_rank: 620,
            part_of_speech: "n".into(),
        };
        let record = LemmaPracticeRecord::seed(&entry);
        let json = serde_json::to_string(&record).expect("serialize");
        let restored: LemmaPracticeRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, record);
    }
}
