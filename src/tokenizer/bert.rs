//! BERT tokenizer: basic tokenization followed by WordPiece.
//!
//! The façade holds both stages by value and runs them in sequence; the
//! vocabulary is shared through an `Arc` so several tokenizers (and any
//! number of threads) can use one instance.
//!
//! # Construction
//!
//! [`BertTokenizer::new`] checks that the configured unknown token exists in
//! the vocabulary and fails otherwise, so a misconfigured tokenizer is never
//! observed at tokenization time.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::basic::BasicTokenizer;
use super::vocab::Vocab;
use super::wordpiece::{WordpieceTokenizer, CONTINUATION_PREFIX};
use super::Tokenizer;
use crate::config::TokenizerConfig;
use crate::error::TokenizerError;

#[derive(Debug, Clone)]
pub struct BertTokenizer {
    basic: BasicTokenizer,
    wordpiece: WordpieceTokenizer,
    config: TokenizerConfig,
}

impl BertTokenizer {
    /// Build a tokenizer over a shared vocabulary.
    ///
    /// The special tokens of `config` join its never-split set, so an input
    /// such as `"[CLS] hello"` keeps `[CLS]` intact.
    pub fn new(vocab: Arc<Vocab>, config: TokenizerConfig) -> Result<Self, TokenizerError> {
        config.validate()?;

        if !vocab.contains(&config.unk_token) {
            return Err(TokenizerError::MissingSpecialToken {
                role: "unknown",
                token: config.unk_token.clone(),
            });
        }

        let never_split = config
            .never_split
            .iter()
            .map(String::as_str)
            .chain(config.special_tokens());
        let basic = BasicTokenizer::new(
            config.do_lower_case,
            config.strips_accents(),
            config.tokenize_chinese_chars,
            never_split,
        );
        let wordpiece = WordpieceTokenizer::new(
            Arc::clone(&vocab),
            config.unk_token.clone(),
            config.max_input_chars_per_word,
        );

        debug!(
            vocab_size = vocab.len(),
            lowercase = config.do_lower_case,
            strip_accents = config.strips_accents(),
            tokenize_chinese_chars = config.tokenize_chinese_chars,
            unk_token = %config.unk_token,
            "BERT tokenizer initialized"
        );

        Ok(Self {
            basic,
            wordpiece,
            config,
        })
    }

    /// Load `vocab.txt` and build a tokenizer with the given config.
    pub fn from_vocab_file(
        path: impl AsRef<Path>,
        config: TokenizerConfig,
    ) -> Result<Self, TokenizerError> {
        let vocab = Vocab::from_file(path)?;
        Self::new(Arc::new(vocab), config)
    }

    /// Tokenize many texts in parallel; output order matches input order.
    pub fn tokenize_batch(&self, texts: &[&str]) -> Vec<Vec<String>> {
        super::tokenize_batch(self, texts)
    }

    /// Human-readable rendering: drops every `##` marker and joins with
    /// single spaces. Not a detokenizer.
    pub fn to_display_string<S: AsRef<str>>(tokens: &[S]) -> String {
        tokens
            .iter()
            .map(|t| t.as_ref().replace(CONTINUATION_PREFIX, ""))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn basic_tokenizer(&self) -> &BasicTokenizer {
        &self.basic
    }

    pub fn wordpiece_tokenizer(&self) -> &WordpieceTokenizer {
        &self.wordpiece
    }

    pub fn vocab(&self) -> &Arc<Vocab> {
        self.wordpiece.vocab()
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab().len()
    }
}

impl Tokenizer for BertTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.basic
            .tokenize(text)
            .iter()
            .flat_map(|word| self.wordpiece.segment(word))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_vocab() -> Arc<Vocab> {
        Arc::new(
            Vocab::from_tokens([
                "[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]", "hello", "world", "un", "##aff",
                "##able", ",", "!", "cafe", "你", "好", "want", "##ed", "wa", "runn", "##ing",
                "Hello",
            ])
            .unwrap(),
        )
    }

    fn make_tokenizer() -> BertTokenizer {
        BertTokenizer::new(make_vocab(), TokenizerConfig::default()).unwrap()
    }

    #[test]
    fn test_tokenize_basic() {
        let tok = make_tokenizer();
        assert_eq!(
            tok.tokenize("UNwant\u{00E9}d,running"),
            vec!["[UNK]", ",", "runn", "##ing"]
        );
        assert_eq!(tok.tokenize("Hello, World!"), vec!["hello", ",", "world", "!"]);
    }

    #[test]
    fn test_tokenize_subwords() {
        let tok = make_tokenizer();
        assert_eq!(tok.tokenize("unaffable wanted"), vec!["un", "##aff", "##able", "want", "##ed"]);
    }

    #[test]
    fn test_accents_stripped() {
        let tok = make_tokenizer();
        assert_eq!(tok.tokenize("Caf\u{00E9}"), vec!["cafe"]);
    }

    #[test]
    fn test_cjk() {
        let tok = make_tokenizer();
        assert_eq!(tok.tokenize("你好world"), vec!["你", "好", "world"]);
    }

    #[test]
    fn test_special_tokens_never_split() {
        let tok = make_tokenizer();
        assert_eq!(tok.tokenize("[CLS] hello [SEP]"), vec!["[CLS]", "hello", "[SEP]"]);
        assert_eq!(tok.tokenize("[MASK]"), vec!["[MASK]"]);
    }

    #[test]
    fn test_cased_config() {
        let config = TokenizerConfig {
            do_lower_case: false,
            ..Default::default()
        };
        let tok = BertTokenizer::new(make_vocab(), config).unwrap();
        assert_eq!(tok.tokenize("Hello hello HELLO"), vec!["Hello", "hello", "[UNK]"]);
    }

    #[test]
    fn test_empty_input() {
        let tok = make_tokenizer();
        assert!(tok.tokenize("").is_empty());
        assert!(tok.tokenize("  \t\n ").is_empty());
        assert!(tok.tokenize("\u{0000}\u{0007}").is_empty());
    }

    #[test]
    fn test_non_empty_input_never_empty() {
        let tok = make_tokenizer();
        for text in ["x", "???", "zzz zzz", "\u{1F600}", "\u{00E9}", "\u{0301}"] {
            assert!(!tok.tokenize(text).is_empty(), "empty output for {:?}", text);
        }
    }

    #[test]
    fn test_lone_combining_mark_is_unknown() {
        let tok = make_tokenizer();
        assert_eq!(tok.tokenize("\u{0301}"), vec!["[UNK]"]);
        assert_eq!(tok.tokenize("hello \u{0301} world"), vec!["hello", "[UNK]", "world"]);
    }

    #[test]
    fn test_every_token_resolvable() {
        let tok = make_tokenizer();
        let tokens = tok.tokenize("Hello, unaffable xyzzy 你好 wanted!!");
        for t in &tokens {
            assert!(tok.vocab().contains(t), "{:?} not in vocabulary", t);
        }
    }

    #[test]
    fn test_long_word_is_unknown() {
        let tok = make_tokenizer();
        let word = "hello".repeat(21); // 105 chars
        assert_eq!(tok.tokenize(&word), vec!["[UNK]"]);
    }

    #[test]
    fn test_missing_unknown_token_fails() {
        let vocab = Arc::new(Vocab::from_tokens(["hello", "world"]).unwrap());
        let err = BertTokenizer::new(vocab, TokenizerConfig::default()).unwrap_err();
        match err {
            TokenizerError::MissingSpecialToken { role, token } => {
                assert_eq!(role, "unknown");
                assert_eq!(token, "[UNK]");
            }
            other => panic!("expected MissingSpecialToken, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_config_fails() {
        let config = TokenizerConfig {
            max_input_chars_per_word: 0,
            ..Default::default()
        };
        let err = BertTokenizer::new(make_vocab(), config).unwrap_err();
        assert!(matches!(err, TokenizerError::Config(_)));
    }

    #[test]
    fn test_to_display_string() {
        let tokens = vec!["un", "##aff", "##able", ",", "world"];
        assert_eq!(BertTokenizer::to_display_string(&tokens), "un aff able , world");
        let empty: Vec<String> = Vec::new();
        assert_eq!(BertTokenizer::to_display_string(&empty), "");
    }

    #[test]
    fn test_tokenize_batch() {
        let tok = make_tokenizer();
        let results = tok.tokenize_batch(&["hello world", "", "unaffable"]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], vec!["hello", "world"]);
        assert!(results[1].is_empty());
        assert_eq!(results[2], vec!["un", "##aff", "##able"]);
    }

    #[test]
    fn test_shared_vocab() {
        let vocab = make_vocab();
        let a = BertTokenizer::new(Arc::clone(&vocab), TokenizerConfig::default()).unwrap();
        let b = BertTokenizer::new(
            Arc::clone(&vocab),
            TokenizerConfig {
                tokenize_chinese_chars: false,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(Arc::ptr_eq(a.vocab(), b.vocab()));
        assert_eq!(a.tokenize("你好"), vec!["你", "好"]);
        assert_eq!(b.tokenize("你好"), vec!["[UNK]"]);
    }

    #[test]
    fn test_concurrent_tokenize() {
        let tok = Arc::new(make_tokenizer());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tok = Arc::clone(&tok);
                std::thread::spawn(move || tok.tokenize("hello, unaffable world"))
            })
            .collect();
        for h in handles {
            assert_eq!(
                h.join().unwrap(),
                vec!["hello", ",", "un", "##aff", "##able", "world"]
            );
        }
    }

    #[test]
    fn test_from_vocab_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.txt");
        std::fs::write(&path, "[PAD]\n[UNK]\nhello\n").unwrap();

        let tok = BertTokenizer::from_vocab_file(&path, TokenizerConfig::default()).unwrap();
        assert_eq!(tok.vocab_size(), 3);
        assert_eq!(tok.tokenize("Hello there"), vec!["hello", "[UNK]"]);
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BertTokenizer>();
    }
}
