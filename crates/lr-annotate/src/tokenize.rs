//! Sentence and word segmentation for article text.
//!
//! Segmentation rules:
//! - A sentence is a maximal run ending in `.`, `!`, or `?` followed by
//!   whitespace or end of input. A terminator glued to a non-space character
//!   (as in "3.14") does not end the sentence. Text with no terminator at
//!   all is a single sentence.
//! - Words are whitespace-separated; every input word is covered by exactly
//!   one token, so no text is lost between segmentation and rendering.
//! - `clean_word` strips surrounding punctuation but keeps embedded
//!   apostrophes and hyphens for the resolver's fallback cascade.

// ---------------------------------------------------------------------------
// Sentences
// ---------------------------------------------------------------------------

/// Split `text` into trimmed sentence strings, terminators included.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if is_terminator(chars[i]) {
            // Consume the whole terminator run ("...", "?!").
            let mut end = i + 1;
            while end < chars.len() && is_terminator(chars[end]) {
                end += 1;
            }
            // Only a run followed by whitespace (or end of input) closes the
            // sentence; "3.14" keeps going.
            if end >= chars.len() || chars[end].is_whitespace() {
                let sentence: String = chars[start..end].iter().collect();
                let sentence = sentence.trim().to_string();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = end;
            }
            i = end;
        } else {
            i += 1;
        }
    }

    // Trailing text with no terminator is still one sentence.
    if start < chars.len() {
        let rest: String = chars[start..].iter().collect();
        let rest = rest.trim().to_string();
        if !rest.is_empty() {
            sentences.push(rest);
        }
    }

    sentences
}

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

// ---------------------------------------------------------------------------
// Words
// ---------------------------------------------------------------------------

/// Split a sentence into raw word strings on whitespace.
pub fn split_words(sentence: &str) -> Vec<&str> {
    sentence.split_whitespace().collect()
}

/// Strip leading and trailing characters that are not letters, digits,
/// apostrophes, or hyphens. Internal punctuation is preserved, so
/// "mother-in-law," cleans to "mother-in-law" and "don't?" to "don't".
pub fn clean_word(word: &str) -> &str {
    word.trim_matches(|c: char| !is_word_char(c))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\'' || c == '-' || c == '\u{2019}' || c == '\u{2018}'
}

/// Map curly apostrophe variants (U+2018, U+2019) to the straight
/// apostrophe, so that contraction suffixes compare equal regardless of
/// which form the article or the lexicon uses.
pub fn normalize_apostrophes(text: &str) -> String {
    text.replace(['\u{2019}', '\u{2018}'], "'")
}

/// Collapse `text` to a stable DOM-safe identifier: alphanumerics only,
/// lowercased, whitespace removed. Not used for matching logic.
pub fn safe_name(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_sentence_terminators() {
        let sentences = split_sentences("First one. Second one! Third one?");
        assert_eq!(sentences, vec!["First one.", "Second one!", "Third one?"]);
    }

    #[test]
    fn terminator_runs_stay_with_their_sentence() {
        let sentences = split_sentences("Wait... really?! Yes.");
        assert_eq!(sentences, vec!["Wait...", "really?!", "Yes."]);
    }

    #[test]
    fn no_terminator_yields_whole_text() {
        let sentences = split_sentences("a headline with no period");
        assert_eq!(sentences, vec!["a headline with no period"]);
    }

    #[test]
    fn embedded_period_does_not_split() {
        let sentences = split_sentences("Pi is 3.14 about. Next.");
        assert_eq!(sentences, vec!["Pi is 3.14 about.", "Next."]);
    }

    #[test]
    fn trailing_unterminated_text_is_kept() {
        let sentences = split_sentences("Done here. And then");
        assert_eq!(sentences, vec!["Done here.", "And then"]);
    }

    #[test]
    fn empty_and_whitespace_input_yield_nothing() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n\t ").is_empty());
    }

    #[test]
    fn no_word_is_lost_across_sentences() {
        let text = "Apple reported 1,000 units. Twenty-one people attended.";
        let total: usize = split_sentences(text)
            .iter()
            .map(|s| split_words(s).len())
            .sum();
        assert_eq!(total, text.split_whitespace().count());
    }

    #[test]
    fn split_words_is_whitespace_based() {
        assert_eq!(split_words("a  b\tc"), vec!["a", "b", "c"]);
        assert!(split_words("   ").is_empty());
    }

    #[test]
    fn clean_word_strips_surrounding_punctuation() {
        assert_eq!(clean_word("\"units.\""), "units");
        assert_eq!(clean_word("(hello)"), "hello");
        assert_eq!(clean_word("don't?"), "don't");
    }

    #[test]
    fn clean_word_keeps_internal_punctuation() {
        assert_eq!(clean_word("mother-in-law,"), "mother-in-law");
        assert_eq!(clean_word("'tis"), "'tis");
        assert_eq!(clean_word("1,000"), "1,000");
    }

    #[test]
    fn clean_word_can_empty_out() {
        assert_eq!(clean_word("—"), "");
        assert_eq!(clean_word("..."), "");
    }

    #[test]
    fn normalize_apostrophes_maps_curly_variants() {
        assert_eq!(normalize_apostrophes("don\u{2019}t"), "don't");
        assert_eq!(normalize_apostrophes("\u{2018}tis"), "'tis");
        assert_eq!(normalize_apostrophes("plain'"), "plain'");
    }

    #[test]
    fn safe_name_is_lowercase_alphanumeric() {
        assert_eq!(safe_name("Hello, World!"), "helloworld");
        assert_eq!(safe_name("don't"), "dont");
        assert_eq!(safe_name("under_score"), "underscore");
    }
}
