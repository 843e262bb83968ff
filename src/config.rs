//! Tokenizer configuration.
//!
//! Field names follow the HuggingFace `tokenizer_config.json` layout so an
//! existing file can be read as-is; unknown keys are ignored and every
//! missing key falls back to the BERT-uncased default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TokenizerError;

/// Words longer than this (in chars) map straight to the unknown token.
pub const DEFAULT_MAX_INPUT_CHARS_PER_WORD: usize = 100;

/// Upper bound on an encoded sequence, special tokens included.
pub const DEFAULT_MODEL_MAX_LENGTH: usize = 2048;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    pub do_lower_case: bool,
    /// `None` follows `do_lower_case`.
    pub strip_accents: Option<bool>,
    pub tokenize_chinese_chars: bool,
    pub never_split: Vec<String>,
    pub unk_token: String,
    pub sep_token: String,
    pub pad_token: String,
    pub cls_token: String,
    pub mask_token: String,
    pub max_input_chars_per_word: usize,
    pub model_max_length: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            do_lower_case: true,
            strip_accents: None,
            tokenize_chinese_chars: true,
            never_split: Vec::new(),
            unk_token: "[UNK]".to_string(),
            sep_token: "[SEP]".to_string(),
            pad_token: "[PAD]".to_string(),
            cls_token: "[CLS]".to_string(),
            mask_token: "[MASK]".to_string(),
            max_input_chars_per_word: DEFAULT_MAX_INPUT_CHARS_PER_WORD,
            model_max_length: DEFAULT_MODEL_MAX_LENGTH,
        }
    }
}

impl TokenizerConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, TokenizerError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| TokenizerError::Config(format!("failed to parse JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TokenizerError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        debug!(path = %path.display(), "Loaded tokenizer config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TokenizerError> {
        if self.max_input_chars_per_word == 0 {
            return Err(TokenizerError::Config(
                "max_input_chars_per_word must be > 0".to_string(),
            ));
        }
        // Room for [CLS] and [SEP].
        if self.model_max_length < 2 {
            return Err(TokenizerError::Config(format!(
                "model_max_length must be >= 2, got {}",
                self.model_max_length
            )));
        }
        if self.unk_token.is_empty() {
            return Err(TokenizerError::Config("unk_token must not be empty".to_string()));
        }
        Ok(())
    }

    /// Effective accent-stripping setting.
    pub fn strips_accents(&self) -> bool {
        self.strip_accents.unwrap_or(self.do_lower_case)
    }

    /// The special tokens in `[unk, sep, pad, cls, mask]` order.
    pub fn special_tokens(&self) -> [&str; 5] {
        [
            self.unk_token.as_str(),
            self.sep_token.as_str(),
            self.pad_token.as_str(),
            self.cls_token.as_str(),
            self.mask_token.as_str(),
        ]
    }
}
