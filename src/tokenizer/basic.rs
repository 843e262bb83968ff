//! Basic (pre-WordPiece) tokenization.
//!
//! Cleans the text, isolates CJK ideographs, splits on whitespace, then
//! lower-cases, strips accents and splits on punctuation word by word.
//! Words in the never-split set bypass every per-word step and are emitted
//! exactly as written.

use std::collections::HashSet;

use super::normalize::{clean, space_cjk, split_on_punctuation, split_on_whitespace, strip_accents};
use super::Tokenizer;

#[derive(Debug, Clone)]
pub struct BasicTokenizer {
    lowercase: bool,
    strip_accents: bool,
    tokenize_chinese_chars: bool,
    never_split: HashSet<String>,
}

impl Default for BasicTokenizer {
    fn default() -> Self {
        Self::new(true, true, true, Vec::<String>::new())
    }
}

impl BasicTokenizer {
    pub fn new<I, S>(
        lowercase: bool,
        strip_accents: bool,
        tokenize_chinese_chars: bool,
        never_split: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lowercase,
            strip_accents,
            tokenize_chinese_chars,
            never_split: never_split.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_never_split(&self, word: &str) -> bool {
        self.never_split.contains(word)
    }

    fn lowercase_word(&self, word: &str) -> String {
        if self.lowercase {
            word.to_lowercase()
        } else {
            word.to_string()
        }
    }

    /// Lower-case and/or strip accents as configured.
    ///
    /// A word made only of nonspacing marks is kept unstripped, so no
    /// candidate word ever vanishes.
    fn normalize_word(&self, word: &str) -> String {
        let word = self.lowercase_word(word);
        if !self.strip_accents {
            return word;
        }
        let stripped = strip_accents(&word);
        if stripped.trim().is_empty() {
            word
        } else {
            stripped
        }
    }
}

impl Tokenizer for BasicTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut text = clean(text);
        if self.tokenize_chinese_chars {
            text = space_cjk(&text);
        }

        let mut tokens = Vec::new();
        for word in split_on_whitespace(&text) {
            if self.is_never_split(word) {
                tokens.push(word.to_string());
                continue;
            }
            let word = self.normalize_word(word);
            for part in split_on_whitespace(&word) {
                tokens.extend(split_on_punctuation(part).into_iter().map(str::to_string));
            }
        }
        tokens
    }
}
