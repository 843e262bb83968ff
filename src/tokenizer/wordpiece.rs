//! WordPiece subword segmentation.
//!
//! For each basic token, greedily take the longest prefix found in the
//! vocabulary, then continue on the remainder with the `##` continuation
//! prefix. If any position cannot be matched the whole word becomes the
//! unknown token; partial matches are never kept.
//!
//! ```text
//! "unaffable" -> ["un", "##aff", "##able"]
//! ```

use std::sync::Arc;

use tracing::trace;

use super::normalize::split_on_whitespace;
use super::vocab::Vocab;
use super::Tokenizer;

/// The continuation prefix for WordPiece subwords.
pub const CONTINUATION_PREFIX: &str = "##";

/// Segment a single word into vocabulary pieces.
///
/// `max_chars` is counted in chars; a longer word yields `[unk_token]`
/// without any matching.
pub fn segment(word: &str, vocab: &Vocab, unk_token: &str, max_chars: usize) -> Vec<String> {
    // Byte offset of every char boundary, including the end of the word.
    let bounds: Vec<usize> = word
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(word.len()))
        .collect();
    let char_len = bounds.len() - 1;

    if char_len > max_chars {
        trace!(chars = char_len, max_chars, "Word too long, emitting unknown token");
        return vec![unk_token.to_string()];
    }

    let mut pieces = Vec::new();
    let mut candidate = String::with_capacity(word.len() + CONTINUATION_PREFIX.len());
    let mut start = 0;

    while start < char_len {
        let mut end = char_len;
        let mut matched = false;

        while end > start {
            candidate.clear();
            if start > 0 {
                candidate.push_str(CONTINUATION_PREFIX);
            }
            candidate.push_str(&word[bounds[start]..bounds[end]]);

            if vocab.contains(&candidate) {
                matched = true;
                break;
            }
            end -= 1;
        }

        if !matched {
            return vec![unk_token.to_string()];
        }

        pieces.push(candidate.clone());
        start = end;
    }

    pieces
}

/// WordPiece stage bound to a shared vocabulary.
#[derive(Debug, Clone)]
pub struct WordpieceTokenizer {
    vocab: Arc<Vocab>,
    unk_token: String,
    max_input_chars_per_word: usize,
}

impl WordpieceTokenizer {
    pub fn new(
        vocab: Arc<Vocab>,
        unk_token: impl Into<String>,
        max_input_chars_per_word: usize,
    ) -> Self {
        Self {
            vocab,
            unk_token: unk_token.into(),
            max_input_chars_per_word,
        }
    }

    /// Segment one already basic-tokenized word.
    pub fn segment(&self, word: &str) -> Vec<String> {
        segment(word, &self.vocab, &self.unk_token, self.max_input_chars_per_word)
    }

    pub fn vocab(&self) -> &Arc<Vocab> {
        &self.vocab
    }

    pub fn unk_token(&self) -> &str {
        &self.unk_token
    }

    pub fn max_input_chars_per_word(&self) -> usize {
        self.max_input_chars_per_word
    }
}

impl Tokenizer for WordpieceTokenizer {
    /// Whitespace-split `text` and segment each word.
    fn tokenize(&self, text: &str) -> Vec<String> {
        split_on_whitespace(text)
            .into_iter()
            .flat_map(|word| self.segment(word))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_vocab() -> Arc<Vocab> {
        Arc::new(
            Vocab::from_tokens([
                "[UNK]", "un", "##aff", "##able", "test", "##ing", "##s", "run", "##ning", "a",
                "##a", "aa", "##b", "ab", "##bc", "你",
            ])
            .unwrap(),
        )
    }

    fn make_tokenizer() -> WordpieceTokenizer {
        WordpieceTokenizer::new(make_vocab(), "[UNK]", 100)
    }

    #[test]
    fn test_unaffable() {
        let tok = make_tokenizer();
        assert_eq!(tok.segment("unaffable"), vec!["un", "##aff", "##able"]);
    }

    #[test]
    fn test_whole_word_match() {
        let tok = make_tokenizer();
        assert_eq!(tok.segment("test"), vec!["test"]);
    }

    #[test]
    fn test_multiple_continuations() {
        let tok = make_tokenizer();
        assert_eq!(tok.segment("runnings"), vec!["run", "##ning", "##s"]);
        assert_eq!(tok.segment("testings"), vec!["test", "##ing", "##s"]);
    }

    #[test]
    fn test_prefers_longest_prefix() {
        let tok = make_tokenizer();
        // "aa" beats "a" + "##a".
        assert_eq!(tok.segment("aa"), vec!["aa"]);
        assert_eq!(tok.segment("aaa"), vec!["aa", "##a"]);
    }

    #[test]
    fn test_no_backtracking() {
        let tok = make_tokenizer();
        assert_eq!(tok.segment("aab"), vec!["aa", "##b"]);
        // "a" + "##bc" would cover the word, but greedy commits to "ab" first
        // and then fails on "##c".
        assert_eq!(tok.segment("abc"), vec!["[UNK]"]);
    }

    #[test]
    fn test_total_failure_discards_partial_progress() {
        let tok = make_tokenizer();
        // "test" matches, "##x" does not.
        assert_eq!(tok.segment("testx"), vec!["[UNK]"]);
        // Nothing matches at position 0.
        assert_eq!(tok.segment("xyz"), vec!["[UNK]"]);
    }

    #[test]
    fn test_max_chars_boundary() {
        let tok = make_tokenizer();

        let exactly_100 = "a".repeat(100);
        let pieces = tok.segment(&exactly_100);
        assert_eq!(pieces.len(), 99);
        assert_eq!(pieces[0], "aa");
        assert!(pieces[1..].iter().all(|p| p == "##a"));

        let too_long = "a".repeat(101);
        assert_eq!(tok.segment(&too_long), vec!["[UNK]"]);
    }

    #[test]
    fn test_max_chars_counts_chars_not_bytes() {
        let tok = WordpieceTokenizer::new(make_vocab(), "[UNK]", 1);
        // One char, three bytes.
        assert_eq!(tok.segment("你"), vec!["你"]);
        assert_eq!(tok.segment("ab"), vec!["[UNK]"]);
    }

    #[test]
    fn test_custom_unknown_token() {
        let vocab = Arc::new(Vocab::from_tokens(["<unk>", "hi"]).unwrap());
        let tok = WordpieceTokenizer::new(vocab, "<unk>", 100);
        assert_eq!(tok.segment("hello"), vec!["<unk>"]);
        assert_eq!(tok.segment("hi"), vec!["hi"]);
    }

    #[test]
    fn test_empty_word() {
        let tok = make_tokenizer();
        assert!(tok.segment("").is_empty());
    }

    #[test]
    fn test_tokenize_splits_on_whitespace() {
        let tok = make_tokenizer();
        assert_eq!(
            tok.tokenize("unaffable  running xyz"),
            vec!["un", "##aff", "##able", "run", "##ning", "[UNK]"]
        );
        assert!(tok.tokenize("   ").is_empty());
    }

    #[test]
    fn test_segment_free_function() {
        let vocab = make_vocab();
        assert_eq!(segment("tests", &vocab, "[UNK]", 100), vec!["test", "##s"]);
        assert_eq!(segment("tests", &vocab, "[UNK]", 4), vec!["[UNK]"]);
    }
}
