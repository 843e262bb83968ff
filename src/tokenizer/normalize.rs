//! Text normalization helpers shared by the basic tokenizer.

use unicode_normalization::UnicodeNormalization;

use super::chars::{is_cjk, is_control, is_nonspacing_mark, is_punctuation, is_whitespace};

/// Drop NUL, U+FFFD and control characters; map every whitespace character
/// to a single ASCII space.
pub fn clean(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\0' || c == char::REPLACEMENT_CHARACTER || is_control(c) {
            continue;
        }
        if is_whitespace(c) {
            output.push(' ');
        } else {
            output.push(c);
        }
    }
    output
}

/// Surround every CJK ideograph with spaces so each becomes its own word.
pub fn space_cjk(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for c in text.chars() {
        if is_cjk(c) {
            output.push(' ');
            output.push(c);
            output.push(' ');
        } else {
            output.push(c);
        }
    }
    output
}

/// Split on runs of whitespace, ignoring leading and trailing whitespace.
///
/// Returns an empty vector for empty or all-whitespace input.
pub fn split_on_whitespace(text: &str) -> Vec<&str> {
    text.split(is_whitespace).filter(|s| !s.is_empty()).collect()
}

/// NFD-decompose and discard nonspacing marks (category Mn).
pub fn strip_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_nonspacing_mark(*c)).collect()
}

/// Split a word at punctuation boundaries.
///
/// Each punctuation character becomes its own piece; runs of anything else
/// are kept together.
pub fn split_on_punctuation(word: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut run_start = 0;

    for (idx, c) in word.char_indices() {
        if is_punctuation(c) {
            if run_start < idx {
                pieces.push(&word[run_start..idx]);
            }
            let end = idx + c.len_utf8();
            pieces.push(&word[idx..end]);
            run_start = end;
        }
    }

    if run_start < word.len() {
        pieces.push(&word[run_start..]);
    }

    pieces
}
