//! The practice engine: lemma-table seeding, the practice transition, and
//! dueness queries.
//!
//! All mutating operations run their read, mutation, and write inside one
//! SQLite transaction so that concurrent practice events on the same key
//! cannot lose updates.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use lr_core::db::{get_lemma_in, get_meta_in, put_lemma_in, set_meta_in};
use lr_core::lexicon::LexiconIndex;
use lr_core::practice::{practice_key, LemmaPracticeRecord};
use lr_core::schema::META_LEMMAS_INITIALIZED;
use lr_core::Result;

use crate::schedule::{advance, interval_days, is_due};

// ---------------------------------------------------------------------------
// PracticeOutcome
// ---------------------------------------------------------------------------

/// What a practice event did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PracticeOutcome {
    /// The item was due: repetition counted and the schedule advanced.
    Advanced(LemmaPracticeRecord),
    /// The item was not yet due: repetition counted, schedule unchanged.
    Counted(LemmaPracticeRecord),
    /// No record exists for the `(word, part-of-speech)` pair; nothing was
    /// written. A warning, not an error.
    UnknownLemma,
}

// ---------------------------------------------------------------------------
// PracticeEngine
// ---------------------------------------------------------------------------

pub struct PracticeEngine;

impl PracticeEngine {
    /// Seed one practice record per lexicon entry, exactly once.
    ///
    /// Returns the number of records written; 0 when the table was already
    /// initialized. Idempotent unless `force_reseed` is set, which rewrites
    /// every record back to its fresh state (debug override).
    pub fn initialize(
        conn: &mut Connection,
        lexicon: &LexiconIndex,
        force_reseed: bool,
    ) -> Result<usize> {
        let tx = conn.transaction()?;

        let initialized =
            get_meta_in(&tx, META_LEMMAS_INITIALIZED)?.as_deref() == Some("true");
        if initialized && !force_reseed {
            return Ok(0);
        }

        let mut written = 0;
        for entry in lexicon.entries() {
            put_lemma_in(&tx, &LemmaPracticeRecord::seed(entry))?;
            written += 1;
        }
        set_meta_in(&tx, META_LEMMAS_INITIALIZED, "true")?;

        tx.commit()?;
        Ok(written)
    }

    /// Apply one practice event to the record for `(word, part_of_speech)`.
    ///
    /// The repetition is always counted and `last_practiced_at` updated.
    /// The schedule advances only when the item is due, so repeated
    /// same-day practice cannot fast-forward the intervals.
    pub fn practice(
        conn: &mut Connection,
        word: &str,
        part_of_speech: &str,
        now: DateTime<Utc>,
    ) -> Result<PracticeOutcome> {
        let key = practice_key(word, part_of_speech);
        let tx = conn.transaction()?;

        let Some(mut record) = get_lemma_in(&tx, &key)? else {
            eprintln!("practice: no record for \"{word}\" ({part_of_speech})");
            return Ok(PracticeOutcome::UnknownLemma);
        };

        record.repetition_count += 1;
        record.last_practiced_at = Some(now);

        let due = is_due(record.next_review_at, now.date_naive());
        if due {
            record.interval_index = advance(record.interval_index);
            record.interval_days = interval_days(record.interval_index);
            record.next_review_at = Some(now + Duration::days(record.interval_days as i64));
        }

        put_lemma_in(&tx, &record)?;
        tx.commit()?;

        Ok(if due {
            PracticeOutcome::Advanced(record)
        } else {
            PracticeOutcome::Counted(record)
        })
    }

    /// Subset of `keys` whose records are due as of `as_of`, in input order.
    /// Keys with no record are omitted.
    pub fn due_lemmas(conn: &Connection, keys: &[String], as_of: NaiveDate) -> Result<Vec<String>> {
        let mut due = Vec::new();
        for key in keys {
            if let Some(record) = get_lemma_in(conn, key)? {
                if is_due(record.next_review_at, as_of) {
                    due.push(key.clone());
                }
            }
        }
        Ok(due)
    }

    /// Filter ranked learn candidates down to the ones due for review,
    /// preserving their order and truncating to `top_n`.
    ///
    /// Runs strictly after annotation: the candidate list is the completed
    /// assembler output, keyed by practice-record key.
    pub fn words_to_learn<T, F>(
        conn: &Connection,
        candidates: Vec<T>,
        key_of: F,
        as_of: NaiveDate,
        top_n: usize,
    ) -> Result<Vec<T>>
    where
        F: Fn(&T) -> String,
    {
        let keys: Vec<String> = candidates.iter().map(&key_of).collect();
        let due: HashSet<String> = Self::due_lemmas(conn, &keys, as_of)?.into_iter().collect();

        let mut kept: Vec<T> = candidates
            .into_iter()
            .filter(|c| due.contains(&key_of(c)))
            .collect();
        kept.truncate(top_n);
        Ok(kept)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lr_core::lexicon::WordFormEntry;
    use lr_core::schema::run_migrations;

    fn entry(word: &str, rank: u32, pos: &str) -> WordFormEntry {
        WordFormEntry {
            word: word.into(),
            lemma: word.into(),
            lem_rank: rank,
            part_of_speech: pos.into(),
        }
    }

    fn lexicon() -> LexiconIndex {
        LexiconIndex::from_entries(vec![
            entry("report", 410, "v"),
            entry("unit", 620, "n"),
            entry("people", 80, "n"),
        ])
    }

    fn setup() -> Connection {
        let mut conn = Connection::open_in_memory().expect("in-memory db");
        run_migrations(&conn).expect("migrations");
        PracticeEngine::initialize(&mut conn, &lexicon(), false).expect("seed");
        conn
    }

    fn instant(s: &str) -> DateTime<Utc> {
        s.parse().expect("timestamp")
    }

    #[test]
    fn initialize_seeds_once() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let first = PracticeEngine::initialize(&mut conn, &lexicon(), false).unwrap();
        assert_eq!(first, 3);

        let second = PracticeEngine::initialize(&mut conn, &lexicon(), false).unwrap();
        assert_eq!(second, 0, "re-running initialization is a no-op");
    }

    #[test]
    fn force_reseed_resets_records() {
        let mut conn = setup();
        PracticeEngine::practice(&mut conn, "report", "v", instant("2026-03-01T10:00:00Z"))
            .unwrap();

        let written = PracticeEngine::initialize(&mut conn, &lexicon(), true).unwrap();
        assert_eq!(written, 3);

        let record = get_lemma_in(&conn, "report_v").unwrap().unwrap();
        assert_eq!(record.repetition_count, 0);
        assert!(record.next_review_at.is_none());
    }

    #[test]
    fn fresh_record_advances_to_one_day() {
        let mut conn = setup();
        let now = instant("2026-03-01T10:00:00Z");

        let outcome = PracticeEngine::practice(&mut conn, "report", "v", now).unwrap();
        let PracticeOutcome::Advanced(record) = outcome else {
            panic!("expected Advanced, got {outcome:?}");
        };
        assert_eq!(record.interval_index, 1);
        assert_eq!(record.interval_days, 1);
        assert_eq!(record.repetition_count, 1);
        assert_eq!(record.last_practiced_at, Some(now));
        assert_eq!(record.next_review_at, Some(now + Duration::days(1)));
    }

    #[test]
    fn same_day_practice_counts_but_does_not_advance() {
        let mut conn = setup();
        let morning = instant("2026-03-01T09:00:00Z");
        let evening = instant("2026-03-01T21:00:00Z");

        PracticeEngine::practice(&mut conn, "report", "v", morning).unwrap();
        let outcome = PracticeEngine::practice(&mut conn, "report", "v", evening).unwrap();

        let PracticeOutcome::Counted(record) = outcome else {
            panic!("expected Counted, got {outcome:?}");
        };
        assert_eq!(record.interval_index, 1, "schedule unchanged");
        assert_eq!(record.repetition_count, 2, "repetition still counted");
        assert_eq!(record.last_practiced_at, Some(evening));
    }

    #[test]
    fn due_practice_climbs_the_ladder() {
        let mut conn = setup();
        let first = instant("2026-03-01T10:00:00Z");
        let second = instant("2026-03-02T10:00:00Z");
        let third = instant("2026-03-05T10:00:00Z");

        PracticeEngine::practice(&mut conn, "unit", "n", first).unwrap();
        PracticeEngine::practice(&mut conn, "unit", "n", second).unwrap();
        let outcome = PracticeEngine::practice(&mut conn, "unit", "n", third).unwrap();

        let PracticeOutcome::Advanced(record) = outcome else {
            panic!("expected Advanced, got {outcome:?}");
        };
        assert_eq!(record.interval_index, 3);
        assert_eq!(record.interval_days, 7);
    }

    #[test]
    fn terminal_index_keeps_yearly_cadence() {
        let mut conn = setup();
        let mut record = get_lemma_in(&conn, "unit_n").unwrap().unwrap();
        record.interval_index = 12;
        record.interval_days = 365;
        record.next_review_at = Some(instant("2026-03-01T00:00:00Z"));
        put_lemma_in(&conn, &record).unwrap();

        let now = instant("2026-03-02T10:00:00Z");
        let outcome = PracticeEngine::practice(&mut conn, "unit", "n", now).unwrap();
        let PracticeOutcome::Advanced(record) = outcome else {
            panic!("expected Advanced, got {outcome:?}");
        };
        assert_eq!(record.interval_index, 12, "never exceeds the max index");
        assert_eq!(record.next_review_at, Some(now + Duration::days(365)));
    }

    #[test]
    fn outcome_serializes_tagged() {
        let json = serde_json::to_string(&PracticeOutcome::UnknownLemma).unwrap();
        assert_eq!(json, r#"{"outcome":"unknown_lemma"}"#);
    }

    #[test]
    fn unknown_lemma_is_a_noop_warning() {
        let mut conn = setup();
        let outcome =
            PracticeEngine::practice(&mut conn, "zyzzyva", "n", instant("2026-03-01T10:00:00Z"))
                .unwrap();
        assert_eq!(outcome, PracticeOutcome::UnknownLemma);
        assert_eq!(get_lemma_in(&conn, "zyzzyva_n").unwrap(), None);
    }

    #[test]
    fn due_lemmas_filters_by_date() {
        let mut conn = setup();
        let now = instant("2026-03-01T10:00:00Z");
        PracticeEngine::practice(&mut conn, "report", "v", now).unwrap();

        let keys = vec!["report_v".to_string(), "unit_n".to_string()];

        // Same day: report was just scheduled a day out, unit never practiced.
        let due = PracticeEngine::due_lemmas(&conn, &keys, now.date_naive()).unwrap();
        assert_eq!(due, vec!["unit_n".to_string()]);

        // Next day: both due.
        let due =
            PracticeEngine::due_lemmas(&conn, &keys, now.date_naive() + Duration::days(1)).unwrap();
        assert_eq!(due, keys);
    }

    #[test]
    fn due_lemmas_omits_unknown_keys() {
        let conn = setup();
        let keys = vec!["missing_x".to_string(), "unit_n".to_string()];
        let due =
            PracticeEngine::due_lemmas(&conn, &keys, "2026-03-01".parse().unwrap()).unwrap();
        assert_eq!(due, vec!["unit_n".to_string()]);
    }

    #[test]
    fn words_to_learn_preserves_order_and_truncates() {
        let mut conn = setup();
        let now = instant("2026-03-01T10:00:00Z");
        // Practicing "people" schedules it out of dueness for today.
        PracticeEngine::practice(&mut conn, "people", "n", now).unwrap();

        let candidates = vec![
            "people_n".to_string(),
            "report_v".to_string(),
            "unit_n".to_string(),
        ];
        let kept = PracticeEngine::words_to_learn(
            &conn,
            candidates,
            |k| k.clone(),
            now.date_naive(),
            10,
        )
        .unwrap();
        assert_eq!(kept, vec!["report_v".to_string(), "unit_n".to_string()]);

        let truncated = PracticeEngine::words_to_learn(
            &conn,
            vec!["report_v".to_string(), "unit_n".to_string()],
            |k| k.clone(),
            now.date_naive(),
            1,
        )
        .unwrap();
        assert_eq!(truncated, vec!["report_v".to_string()]);
    }
}
