//! Annotation result types — the structured output of one annotation run.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resolve::AnnotatedPart;

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// Which part of the document a token belongs to. Title tokens come first
/// in the index space, body tokens after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Title,
    Body,
}

// ---------------------------------------------------------------------------
// SpanCategory / SpanTag
// ---------------------------------------------------------------------------

/// Category a span scan assigns to covered tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpanCategory {
    ProminentDigit,
    ProminentNumber,
    ProminentAgent { agent_id: i64 },
}

impl SpanCategory {
    /// Class-style name of the category as rendered on the tokens.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanCategory::ProminentDigit => "prominent-digit",
            SpanCategory::ProminentNumber => "prominent-number",
            SpanCategory::ProminentAgent { .. } => "prominent-agent",
        }
    }
}

/// One contiguous tagged run over the token sequence, inclusive on both
/// ends of the token index space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanTag {
    pub low: usize,
    pub high: usize,
    pub category: SpanCategory,
    /// Human-readable tooltip content for the covered run.
    pub tooltip: String,
}

// ---------------------------------------------------------------------------
// AnnotatedToken
// ---------------------------------------------------------------------------

/// One rendered token of the document, in index order.
///
/// A token with no resolved parts still occupies its index slot and renders
/// as plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    /// Monotonic position across the full document (title then body);
    /// never reused within one annotation run.
    pub index: usize,
    /// Original surface text as it appeared in the article.
    pub text: String,
    /// Lowercased, punctuation-stripped form used by the span scans.
    pub normalized: String,
    /// Stable DOM-safe identifier derived from the surface text.
    pub safe_name: String,
    pub segment: Segment,
    /// Zero-based ordinal of the containing sentence within the document.
    pub sentence: usize,
    /// Resolved lexicon parts; empty when the word is not in the lexicon.
    pub parts: Vec<AnnotatedPart>,
    /// Span category stamped by the marker scans; last scan wins on overlap.
    pub category: Option<SpanCategory>,
}

// ---------------------------------------------------------------------------
// LearnCandidate
// ---------------------------------------------------------------------------

/// An aggregated "word to learn" candidate: one matched lexicon entry with
/// its occurrence count in the current document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnCandidate {
    /// Practice-record key `{word}_{part_of_speech}`.
    pub key: String,
    pub word: String,
    pub lemma: String,
    pub rank: u32,
    pub part_of_speech: String,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// AnnotationStats
// ---------------------------------------------------------------------------

/// Aggregate counts summarising one annotation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStats {
    pub tokens: usize,
    pub resolved_tokens: usize,
    pub unresolved_tokens: usize,
    pub digit_runs: usize,
    pub number_runs: usize,
    pub agent_runs: usize,
}

// ---------------------------------------------------------------------------
// ArticleAnnotation
// ---------------------------------------------------------------------------

/// The top-level output of a single annotation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleAnnotation {
    /// Stable unique identifier for this run (UUIDv4).
    pub run_id: Uuid,
    /// Ordered token sequence, title first, body second.
    pub tokens: Vec<AnnotatedToken>,
    /// Tagged spans from all three marker scans.
    pub spans: Vec<SpanTag>,
    /// Ranked words-to-learn candidates (rank ascending, count descending),
    /// not yet filtered by practice dueness.
    pub candidates: Vec<LearnCandidate>,
    pub stats: AnnotationStats,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
