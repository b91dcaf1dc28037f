//! The annotation assembler: one pass over title and body producing the
//! ordered, annotated token sequence, span tags, and ranked learn
//! candidates.
//!
//! Title and body go through the identical code path; the segment flag is
//! the only difference. The span scans run only after both segments are
//! tokenized and resolved, so ranges always see the complete index space.

use std::collections::HashMap;

use lr_core::agent::Agent;
use lr_core::article::Article;
use lr_core::lexicon::{LexiconIndex, UNRANKED};

use crate::resolve::resolve;
use crate::result::{
    AnnotatedToken, AnnotationStats, ArticleAnnotation, LearnCandidate, Segment,
};
use crate::session::RenderSession;
use crate::spans::{mark_agent_phrases, mark_digit_runs, mark_number_runs};
use crate::tokenize::{clean_word, safe_name, split_sentences, split_words};

// ---------------------------------------------------------------------------
// AnnotateConfig
// ---------------------------------------------------------------------------

/// Runtime configuration for the assembler.
pub struct AnnotateConfig {
    /// Maximum number of learn candidates to keep. Default: 10.
    pub top_n: usize,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self { top_n: 10 }
    }
}

// ---------------------------------------------------------------------------
// Annotator
// ---------------------------------------------------------------------------

/// Drives tokenizer → resolver → span marker over one article.
pub struct Annotator {
    config: AnnotateConfig,
}

impl Annotator {
    pub fn new(config: AnnotateConfig) -> Self {
        Self { config }
    }

    /// Annotate `article` against the lexicon and the registered agents.
    pub fn annotate(
        &self,
        article: &Article,
        lexicon: &LexiconIndex,
        agents: &[Agent],
    ) -> ArticleAnnotation {
        let mut session = RenderSession::new();
        let mut tokens = Vec::new();
        let mut sentence = 0;

        tokenize_segment(
            &mut session,
            &mut tokens,
            &mut sentence,
            &article.title,
            Segment::Title,
            Some(lexicon),
        );
        tokenize_segment(
            &mut session,
            &mut tokens,
            &mut sentence,
            &article.body,
            Segment::Body,
            Some(lexicon),
        );

        let mut spans = Vec::new();
        let digit_spans = mark_digit_runs(&mut tokens);
        let number_spans = mark_number_runs(&mut tokens);
        let agent_spans = mark_agent_phrases(&mut tokens, agents, lexicon);

        let stats = AnnotationStats {
            tokens: tokens.len(),
            resolved_tokens: tokens.iter().filter(|t| !t.parts.is_empty()).count(),
            unresolved_tokens: tokens.iter().filter(|t| t.parts.is_empty()).count(),
            digit_runs: digit_spans.len(),
            number_runs: number_spans.len(),
            agent_runs: agent_spans.len(),
        };

        spans.extend(digit_spans);
        spans.extend(number_spans);
        spans.extend(agent_spans);

        let candidates = rank_candidates(&tokens, self.config.top_n);

        ArticleAnnotation {
            run_id: session.run_id(),
            tokens,
            spans,
            candidates,
            stats,
        }
    }

    /// Fallback when the lexicon failed to load: every token renders plain
    /// (no parts, no spans, no candidates) so the article still displays.
    pub fn annotate_plain(&self, article: &Article) -> ArticleAnnotation {
        let mut session = RenderSession::new();
        let mut tokens = Vec::new();
        let mut sentence = 0;

        tokenize_segment(
            &mut session,
            &mut tokens,
            &mut sentence,
            &article.title,
            Segment::Title,
            None,
        );
        tokenize_segment(
            &mut session,
            &mut tokens,
            &mut sentence,
            &article.body,
            Segment::Body,
            None,
        );

        let stats = AnnotationStats {
            tokens: tokens.len(),
            unresolved_tokens: tokens.len(),
            ..AnnotationStats::default()
        };

        ArticleAnnotation {
            run_id: session.run_id(),
            tokens,
            spans: Vec::new(),
            candidates: Vec::new(),
            stats,
        }
    }
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(AnnotateConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Segment tokenization
// ---------------------------------------------------------------------------

fn tokenize_segment(
    session: &mut RenderSession,
    tokens: &mut Vec<AnnotatedToken>,
    sentence: &mut usize,
    text: &str,
    segment: Segment,
    lexicon: Option<&LexiconIndex>,
) {
    for sentence_text in split_sentences(text) {
        for word in split_words(&sentence_text) {
            let parts = lexicon
                .and_then(|lex| resolve(word, lex))
                .unwrap_or_default();
            tokens.push(AnnotatedToken {
                index: session.next_index(),
                text: word.to_string(),
                normalized: clean_word(word).to_lowercase(),
                safe_name: safe_name(word),
                segment,
                sentence: *sentence,
                parts,
                category: None,
            });
        }
        *sentence += 1;
    }
}

// ---------------------------------------------------------------------------
// Learn candidates
// ---------------------------------------------------------------------------

/// Aggregate resolved parts into ranked learn candidates: one candidate per
/// matched lexicon entry, ordered by rank ascending (most common first),
/// then occurrence count descending, then word.
fn rank_candidates(tokens: &[AnnotatedToken], top_n: usize) -> Vec<LearnCandidate> {
    let mut by_key: HashMap<String, LearnCandidate> = HashMap::new();

    for token in tokens {
        for part in &token.parts {
            if part.rank == UNRANKED {
                continue;
            }
            by_key
                .entry(part.practice_key())
                .and_modify(|c| c.count += 1)
                .or_insert_with(|| LearnCandidate {
                    key: part.practice_key(),
                    word: part.word.clone(),
                    lemma: part.lemma.clone(),
                    rank: part.rank,
                    part_of_speech: part.part_of_speech.clone(),
                    count: 1,
                });
        }
    }

    let mut candidates: Vec<LearnCandidate> = by_key.into_values().collect();
    candidates.sort_by(|a, b| {
        a.rank
            .cmp(&b.rank)
            .then(b.count.cmp(&a.count))
            .then(a.word.cmp(&b.word))
    });
    candidates.truncate(top_n);
    candidates
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
