//! Cleanup for extracted article text.
//!
//! Extraction output is frequently glued together: captions run into the
//! first sentence ("Executive EditorI saw…"), punctuation loses its trailing
//! space ("…time.Simon said…"), and times get split around the colon
//! ("10: 00"). These passes repair the text before segmentation.

// ---------------------------------------------------------------------------
// Passes
// ---------------------------------------------------------------------------

/// Insert a space after `.`, `!`, `?`, `,`, `;`, or `:` when the next
/// character is not whitespace.
pub fn clean_spacing(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &ch) in chars.iter().enumerate() {
        out.push(ch);
        if matches!(ch, '.' | '!' | '?' | ',' | ';' | ':') {
            if let Some(&next) = chars.get(i + 1) {
                if !next.is_whitespace() {
                    out.push(' ');
                }
            }
        }
    }
    out
}

/// Turn the whitespace after each sentence terminator into a newline, and
/// append one after a terminator at end of input.
pub fn break_after_sentences(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        out.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            match chars.get(i + 1) {
                Some(next) if next.is_whitespace() => {
                    out.push('\n');
                    i += 2;
                    continue;
                }
                None => out.push('\n'),
                _ => {}
            }
        }
        i += 1;
    }
    out
}

/// Repair glued-word artifacts left behind by article extraction.
pub fn improve_spacing(text: &str) -> String {
    let text = space_after_terminator(text);
    let text = space_at_case_transition(&text);
    let text = space_before_heading_dash(&text);
    let text = rejoin_times(&text);
    collapse_newlines(&text)
}

/// Composition of every pass, in pipeline order.
pub fn normalize_article(text: &str) -> String {
    let text = clean_spacing(text);
    let text = break_after_sentences(&text);
    improve_spacing(&text)
}

// ---------------------------------------------------------------------------
// Individual fixes
// ---------------------------------------------------------------------------

/// "…time.Simon" → "…time. Simon" (terminator glued to a capital or digit).
fn space_after_terminator(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &ch) in chars.iter().enumerate() {
        out.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            if let Some(&next) = chars.get(i + 1) {
                if next.is_ascii_uppercase() || next.is_ascii_digit() {
                    out.push(' ');
                }
            }
        }
    }
    out
}

/// "…amDeath" → "…am Death" (lowercase glued to uppercase).
fn space_at_case_transition(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &ch) in chars.iter().enumerate() {
        out.push(ch);
        if ch.is_ascii_lowercase() {
            if let Some(&next) = chars.get(i + 1) {
                if next.is_ascii_uppercase() {
                    out.push(' ');
                }
            }
        }
    }
    out
}

/// "Editor- I saw" patterns: separate a lowercase letter from a following
/// "- Capital" heading dash.
fn space_before_heading_dash(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &ch) in chars.iter().enumerate() {
        out.push(ch);
        if ch.is_ascii_lowercase()
            && chars.get(i + 1) == Some(&'-')
            && chars.get(i + 2).is_some_and(|c| c.is_whitespace())
            && chars.get(i + 3).is_some_and(|c| c.is_ascii_uppercase())
        {
            out.push(' ');
        }
    }
    out
}

/// "10: 00" → "10:00" (undo spacing inserted inside a time).
fn rejoin_times(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        out.push(ch);
        if ch.is_ascii_digit() && chars.get(i + 1) == Some(&':') {
            let mut j = i + 2;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j > i + 2 && chars.get(j).is_some_and(|c| c.is_ascii_digit()) {
                out.push(':');
                i = j;
                continue;
            }
        }
        i += 1;
    }
    out
}

/// Three or more consecutive newlines collapse to a paragraph break.
fn collapse_newlines(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '\n' {
            let mut j = i;
            while j < chars.len() && chars[j] == '\n' {
                j += 1;
            }
            out.push('\n');
            if j - i >= 2 {
                out.push('\n');
            }
            i = j;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
