//! Model input construction: token ids, segment ids and attention masks.
//!
//! [`InputBuilder`] turns text into the id layout a BERT-family encoder
//! expects:
//!
//! ```text
//! [CLS] tok tok tok [SEP] [PAD] [PAD]
//! ```
//!
//! Every sequence is capped at `model_max_length` ids (special tokens
//! included). Batches are right-padded with id `0` to the longest row,
//! with an all-zero `token_type_ids` matrix of the same shape.

use rayon::prelude::*;
use serde::Serialize;
use tracing::warn;

use crate::error::TokenizerError;
use crate::tokenizer::{BertTokenizer, Tokenizer};

/// Id written into padding positions, whatever the vocabulary's `[PAD]` id.
pub const PAD_ID: u32 = 0;

/// A single encoded sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Encoding {
    pub tokens: Vec<String>,
    pub input_ids: Vec<u32>,
    pub token_type_ids: Vec<u32>,
    pub attention_mask: Vec<u8>,
}

impl Encoding {
    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }
}

/// A rectangular batch: all rows share one length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEncoding {
    pub input_ids: Vec<Vec<u32>>,
    pub token_type_ids: Vec<Vec<u32>>,
    pub attention_mask: Vec<Vec<u8>>,
}

impl BatchEncoding {
    pub fn batch_size(&self) -> usize {
        self.input_ids.len()
    }

    /// Length of every row, or 0 for an empty batch.
    pub fn seq_len(&self) -> usize {
        self.input_ids.first().map_or(0, Vec::len)
    }
}

/// Wraps a [`BertTokenizer`] with resolved special-token ids.
#[derive(Debug, Clone)]
pub struct InputBuilder {
    tokenizer: BertTokenizer,
    cls_id: u32,
    sep_id: u32,
    max_len: usize,
}

impl InputBuilder {
    /// Resolve `[CLS]` and `[SEP]` in the tokenizer's vocabulary.
    ///
    /// Fails with [`TokenizerError::MissingSpecialToken`] if any is absent.
    pub fn new(tokenizer: BertTokenizer) -> Result<Self, TokenizerError> {
        let config = tokenizer.config();
        let vocab = tokenizer.vocab();
        let resolve = |role: &'static str, token: &str| {
            vocab
                .id_of(token)
                .ok_or_else(|| TokenizerError::MissingSpecialToken {
                    role,
                    token: token.to_string(),
                })
        };

        let cls_id = resolve("classification", &config.cls_token)?;
        let sep_id = resolve("separator", &config.sep_token)?;
        let max_len = config.model_max_length;

        Ok(Self {
            tokenizer,
            cls_id,
            sep_id,
            max_len,
        })
    }

    pub fn tokenizer(&self) -> &BertTokenizer {
        &self.tokenizer
    }

    pub fn cls_id(&self) -> u32 {
        self.cls_id
    }

    pub fn sep_id(&self) -> u32 {
        self.sep_id
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Map tokens to ids; an unknown token is an error, never id 0.
    pub fn convert_tokens_to_ids<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> Result<Vec<u32>, TokenizerError> {
        let vocab = self.tokenizer.vocab();
        tokens.iter().map(|t| vocab.token_to_id(t.as_ref())).collect()
    }

    /// Map ids back to tokens.
    pub fn convert_ids_to_tokens(&self, ids: &[u32]) -> Result<Vec<String>, TokenizerError> {
        let vocab = self.tokenizer.vocab();
        ids.iter()
            .map(|&id| vocab.id_to_token(id).map(str::to_string))
            .collect()
    }

    /// Encode one text as `[CLS] ... [SEP]`, truncating the content so the
    /// total never exceeds `model_max_length`.
    pub fn encode(&self, text: &str) -> Result<Encoding, TokenizerError> {
        let mut tokens = self.tokenizer.tokenize(text);

        let max_content_len = self.max_len - 2;
        if tokens.len() > max_content_len {
            warn!(
                tokens = tokens.len(),
                max_len = self.max_len,
                "Sequence exceeds model_max_length, truncating"
            );
            tokens.truncate(max_content_len);
        }

        let mut input_ids = Vec::with_capacity(tokens.len() + 2);
        input_ids.push(self.cls_id);
        input_ids.extend(self.convert_tokens_to_ids(&tokens)?);
        input_ids.push(self.sep_id);

        let len = input_ids.len();
        Ok(Encoding {
            tokens,
            input_ids,
            token_type_ids: vec![0; len],
            attention_mask: vec![1; len],
        })
    }

    /// Encode texts in parallel and pad them into one rectangular batch.
    pub fn encode_batch(&self, texts: &[&str]) -> Result<BatchEncoding, TokenizerError> {
        let encodings = texts
            .par_iter()
            .map(|text| self.encode(text))
            .collect::<Result<Vec<_>, _>>()?;

        let sequences: Vec<Vec<u32>> = encodings.into_iter().map(|e| e.input_ids).collect();
        let (input_ids, attention_mask) = pad_sequences(&sequences, PAD_ID);
        let token_type_ids = input_ids.iter().map(|row| vec![0; row.len()]).collect();

        Ok(BatchEncoding {
            input_ids,
            token_type_ids,
            attention_mask,
        })
    }
}

/// Pad a set of token ID sequences to equal length.
///
/// Returns a tuple of `(padded_sequences, attention_masks)`:
/// - `padded_sequences`: each inner `Vec<u32>` is padded with `pad_id` to match
///   the length of the longest sequence.
/// - `attention_masks`: each inner `Vec<u8>` has `1` for real tokens and `0` for
///   padding positions.
///
/// If `sequences` is empty, returns empty vectors.
pub fn pad_sequences(sequences: &[Vec<u32>], pad_id: u32) -> (Vec<Vec<u32>>, Vec<Vec<u8>>) {
    let max_len = sequences.iter().map(Vec::len).max().unwrap_or(0);

    sequences
        .iter()
        .map(|seq| {
            let mut padded = Vec::with_capacity(max_len);
            padded.extend_from_slice(seq);
            padded.resize(max_len, pad_id);

            let mut mask = Vec::with_capacity(max_len);
            mask.resize(seq.len(), 1u8);
            mask.resize(max_len, 0u8);

            (padded, mask)
        })
        .unzip()
}
