//! Span marking: contiguous multi-token runs over the annotated token
//! sequence.
//!
//! Three independent left-to-right scans, each producing inclusive
//! `[low, high]` index ranges and stamping the covered tokens:
//! - digit runs (`prominent-digit`),
//! - spelled-out number runs (`prominent-number`),
//! - registered agent phrases (`prominent-agent`).
//!
//! The scans are pure functions of the token sequence and the agent list;
//! re-running a scan over an unmodified sequence yields identical ranges.
//! Where scans overlap, the stamp written last wins.

use lr_core::agent::{Agent, AgentKind};
use lr_core::lexicon::{LexiconIndex, UNRANKED};

use crate::numwords::{
    format_value, hyphenated_number_value, is_number_word, number_to_words, number_word_value,
};
use crate::result::{AnnotatedToken, SpanCategory, SpanTag};
use crate::tokenize::clean_word;

// ---------------------------------------------------------------------------
// Digit runs
// ---------------------------------------------------------------------------

/// A token participates in a digit run when its normalized text is digits,
/// optionally with thousands-separator commas ("1,000").
fn is_digit_token(normalized: &str) -> bool {
    let digits: String = normalized.chars().filter(|c| *c != ',').collect();
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Scan for maximal runs of digit tokens and tag them `prominent-digit`.
///
/// The tooltip concatenates the run's digits (separators stripped) and adds
/// the English word form: "1,234" → "1234 (one thousand two hundred
/// thirty-four)".
pub fn mark_digit_runs(tokens: &mut [AnnotatedToken]) -> Vec<SpanTag> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        if !is_digit_token(&tokens[i].normalized) {
            i += 1;
            continue;
        }

        let start = i;
        while i < tokens.len() && is_digit_token(&tokens[i].normalized) {
            i += 1;
        }

        let digits: String = tokens[start..i]
            .iter()
            .flat_map(|t| t.normalized.chars())
            .filter(|c| *c != ',')
            .collect();
        let words = match digits.parse::<u64>() {
            Ok(value) => number_to_words(value),
            Err(_) => digits.clone(), // beyond u64: digits speak for themselves
        };

        let span = SpanTag {
            low: tokens[start].index,
            high: tokens[i - 1].index,
            category: SpanCategory::ProminentDigit,
            tooltip: format!("{digits} ({words})"),
        };
        for token in &mut tokens[start..i] {
            token.category = Some(SpanCategory::ProminentDigit);
        }
        spans.push(span);
    }

    spans
}

// ---------------------------------------------------------------------------
// Spelled-out number runs
// ---------------------------------------------------------------------------

/// A token participates in a number run when its normalized text is in the
/// number-word table, or is a hyphenated compound whose halves both are.
fn is_number_token(normalized: &str) -> bool {
    is_number_word(normalized) || hyphenated_number_value(normalized).is_some()
}

/// Value string for one number-run token.
fn number_token_value(normalized: &str) -> String {
    if let Some(joined) = hyphenated_number_value(normalized) {
        return joined;
    }
    match number_word_value(normalized) {
        Some(value) => format_value(value),
        None => normalized.to_string(),
    }
}

/// Scan for maximal runs of spelled-out number tokens and tag them
/// `prominent-number`.
///
/// The tooltip maps the literal phrase to its values: "Twenty-one" →
/// "Twenty-one → 20-1".
pub fn mark_number_runs(tokens: &mut [AnnotatedToken]) -> Vec<SpanTag> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        if !is_number_token(&tokens[i].normalized) {
            i += 1;
            continue;
        }

        let start = i;
        while i < tokens.len() && is_number_token(&tokens[i].normalized) {
            i += 1;
        }

        let run = &tokens[start..i];
        let phrase: Vec<String> = run.iter().map(|t| clean_word(&t.text).to_string()).collect();
        let values: Vec<String> = run
            .iter()
            .map(|t| number_token_value(&t.normalized))
            .collect();

        let span = SpanTag {
            low: run[0].index,
            high: run[run.len() - 1].index,
            category: SpanCategory::ProminentNumber,
            tooltip: format!("{} → {}", phrase.join(" "), values.join(" ")),
        };
        for token in &mut tokens[start..i] {
            token.category = Some(SpanCategory::ProminentNumber);
        }
        spans.push(span);
    }

    spans
}

// ---------------------------------------------------------------------------
// Agent phrases
// ---------------------------------------------------------------------------

/// A single-word company agent whose name is itself a ranked lexicon word is
/// excluded from matching: "Apple" the company would otherwise light up
/// every apple in a recipe.
fn is_skippable(agent: &Agent, name_words: &[String], lexicon: &LexiconIndex) -> bool {
    agent.kind == AgentKind::Company
        && name_words.len() == 1
        && lexicon.rank_of(&name_words[0]) != UNRANKED
}

/// Slide each agent's name over the token sequence and tag exact word-for-
/// word matches `prominent-agent`.
///
/// Matched spans never overlap for one agent (the scan advances past each
/// match), but agents are processed in registration order and a later
/// agent's match freely re-stamps earlier tokens: last write wins.
pub fn mark_agent_phrases(
    tokens: &mut [AnnotatedToken],
    agents: &[Agent],
    lexicon: &LexiconIndex,
) -> Vec<SpanTag> {
    let mut spans = Vec::new();

    for agent in agents {
        let words = agent.name_words();
        if words.is_empty() || is_skippable(agent, &words, lexicon) {
            continue;
        }

        let window = words.len();
        let mut i = 0;
        while i + window <= tokens.len() {
            let matched = (0..window).all(|k| tokens[i + k].normalized == words[k]);
            if !matched {
                i += 1;
                continue;
            }

            let category = SpanCategory::ProminentAgent { agent_id: agent.id };
            spans.push(SpanTag {
                low: tokens[i].index,
                high: tokens[i + window - 1].index,
                category,
                tooltip: format!("{} ({})", agent.name, agent.kind),
            });
            for token in &mut tokens[i..i + window] {
                token.category = Some(category);
            }
            i += window;
        }
    }

    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Segment;
    use crate::tokenize::safe_name;
    use lr_core::lexicon::WordFormEntry;

    fn token(index: usize, text: &str) -> AnnotatedToken {
        AnnotatedToken {
            index,
            text: text.into(),
            normalized: clean_word(text).to_lowercase(),
            safe_name: safe_name(text),
            segment: Segment::Body,
            sentence: 0,
            parts: vec![],
            category: None,
        }
    }

    fn tokens_for(words: &[&str]) -> Vec<AnnotatedToken> {
        words
            .iter()
            .enumerate()
            .map(|(i, w)| token(i, w))
            .collect()
    }

    fn base_lexicon() -> LexiconIndex {
        LexiconIndex::from_entries(vec![WordFormEntry {
            word: "the".into(),
            lemma: "the".into(),
            lem_rank: 1,
            part_of_speech: "a".into(),
        }])
    }

    #[test]
    fn digit_run_with_separator_commas() {
        let mut tokens = tokens_for(&["Apple", "reported", "1,000", "units."]);
        let spans = mark_digit_runs(&mut tokens);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].low, 2);
        assert_eq!(spans[0].high, 2);
        assert_eq!(spans[0].tooltip, "1000 (one thousand)");
        assert_eq!(tokens[2].category, Some(SpanCategory::ProminentDigit));
        assert_eq!(tokens[3].category, None);
    }

    #[test]
    fn adjacent_digit_tokens_form_one_run() {
        let mut tokens = tokens_for(&["1,", "000", "sold"]);
        let spans = mark_digit_runs(&mut tokens);
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].low, spans[0].high), (0, 1));
        assert_eq!(spans[0].tooltip, "1000 (one thousand)");
    }

    #[test]
    fn separate_digit_runs_stay_separate() {
        let mut tokens = tokens_for(&["10", "cats", "20", "dogs"]);
        let spans = mark_digit_runs(&mut tokens);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].tooltip, "10 (ten)");
        assert_eq!(spans[1].tooltip, "20 (twenty)");
    }

    #[test]
    fn digit_scan_is_idempotent() {
        let mut tokens = tokens_for(&["1,000", "units", "20"]);
        let first = mark_digit_runs(&mut tokens);
        let second = mark_digit_runs(&mut tokens);
        assert_eq!(first, second);
    }

    #[test]
    fn number_run_hyphenated_compound() {
        let mut tokens = tokens_for(&["Twenty-one", "people", "attended."]);
        let spans = mark_number_runs(&mut tokens);
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].low, spans[0].high), (0, 0));
        assert_eq!(spans[0].tooltip, "Twenty-one → 20-1");
        assert_eq!(tokens[0].category, Some(SpanCategory::ProminentNumber));
    }

    #[test]
    fn number_run_spans_adjacent_words() {
        let mut tokens = tokens_for(&["about", "two", "hundred", "guests"]);
        let spans = mark_number_runs(&mut tokens);
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].low, spans[0].high), (1, 2));
        assert_eq!(spans[0].tooltip, "two hundred → 2 100");
    }

    #[test]
    fn number_run_covers_plurals_and_specials() {
        let mut tokens = tokens_for(&["dozens", "of", "half", "infinity"]);
        let spans = mark_number_runs(&mut tokens);
        // "of" breaks the run: [dozens], [half infinity]
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].tooltip, "dozens → 12");
        assert_eq!(spans[1].tooltip, "half infinity → 0.5 ∞");
    }

    #[test]
    fn agent_phrase_single_word() {
        let mut tokens = tokens_for(&["Apple", "reported", "gains."]);
        let agents = vec![Agent {
            id: 1,
            name: "Apple".into(),
            kind: AgentKind::Company,
            alias_of: None,
        }];
        let spans = mark_agent_phrases(&mut tokens, &agents, &base_lexicon());
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].low, spans[0].high), (0, 0));
        assert_eq!(
            tokens[0].category,
            Some(SpanCategory::ProminentAgent { agent_id: 1 })
        );
    }

    #[test]
    fn agent_phrase_multi_word_window() {
        let mut tokens = tokens_for(&["Then", "Tim", "Cook", "spoke", "to", "Tim."]);
        let agents = vec![Agent {
            id: 2,
            name: "Tim Cook".into(),
            kind: AgentKind::Person,
            alias_of: None,
        }];
        let spans = mark_agent_phrases(&mut tokens, &agents, &base_lexicon());
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].low, spans[0].high), (1, 2));
        // Lone "Tim." is not a full-phrase match.
        assert_eq!(tokens[5].category, None);
    }

    #[test]
    fn matches_ignore_surrounding_punctuation_and_case() {
        let mut tokens = tokens_for(&["\"apple\"", "again"]);
        let agents = vec![Agent {
            id: 1,
            name: "Apple".into(),
            kind: AgentKind::Person,
            alias_of: None,
        }];
        let spans = mark_agent_phrases(&mut tokens, &agents, &base_lexicon());
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn common_word_company_is_skipped() {
        let mut tokens = tokens_for(&["the", "keynote"]);
        let agents = vec![Agent {
            id: 1,
            name: "The".into(),
            kind: AgentKind::Company,
            alias_of: None,
        }];
        // "the" is rank 1 in the lexicon, so the company is skippable.
        let spans = mark_agent_phrases(&mut tokens, &agents, &base_lexicon());
        assert!(spans.is_empty());
        assert_eq!(tokens[0].category, None);
    }

    #[test]
    fn common_word_person_is_not_skipped() {
        let mut tokens = tokens_for(&["the", "keynote"]);
        let agents = vec![Agent {
            id: 1,
            name: "The".into(),
            kind: AgentKind::Person,
            alias_of: None,
        }];
        let spans = mark_agent_phrases(&mut tokens, &agents, &base_lexicon());
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn later_agent_wins_on_overlap() {
        let mut tokens = tokens_for(&["New", "York", "Times"]);
        let agents = vec![
            Agent {
                id: 1,
                name: "New York".into(),
                kind: AgentKind::Place,
                alias_of: None,
            },
            Agent {
                id: 2,
                name: "York Times".into(),
                kind: AgentKind::Company,
                alias_of: None,
            },
        ];
        let spans = mark_agent_phrases(&mut tokens, &agents, &base_lexicon());
        assert_eq!(spans.len(), 2);
        // Tokens 1 and 2 carry the later agent's stamp; token 0 keeps the first.
        assert_eq!(
            tokens[0].category,
            Some(SpanCategory::ProminentAgent { agent_id: 1 })
        );
        assert_eq!(
            tokens[1].category,
            Some(SpanCategory::ProminentAgent { agent_id: 2 })
        );
        assert_eq!(
            tokens[2].category,
            Some(SpanCategory::ProminentAgent { agent_id: 2 })
        );
    }

    #[test]
    fn same_agent_matches_do_not_overlap() {
        let mut tokens = tokens_for(&["go", "go", "go"]);
        let agents = vec![Agent {
            id: 1,
            name: "go go".into(),
            kind: AgentKind::Person,
            alias_of: None,
        }];
        let spans = mark_agent_phrases(&mut tokens, &agents, &base_lexicon());
        // The scan advances past the first match; only one span fits.
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].low, spans[0].high), (0, 1));
    }
}
