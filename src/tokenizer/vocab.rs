//! Immutable token <-> id vocabulary.
//!
//! A [`Vocab`] is built once from an ordered token list (id = position) and
//! exposes only read accessors, so a single instance can sit behind an `Arc`
//! and serve any number of tokenizers and threads without locking.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::error::TokenizerError;

#[derive(Debug)]
pub struct Vocab {
    /// Token string -> token ID lookup.
    token_to_id: HashMap<String, u32>,
    /// Token ID -> token string.
    id_to_token: Vec<String>,
}

impl Vocab {
    /// Build a vocabulary from tokens in id order.
    ///
    /// Fails on an empty list, or if any token occurs twice, since the id of
    /// a repeated token would be ambiguous.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, TokenizerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id_to_token: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if id_to_token.is_empty() {
            return Err(TokenizerError::EmptyVocabulary);
        }

        let mut token_to_id = HashMap::with_capacity(id_to_token.len());
        for (i, token) in id_to_token.iter().enumerate() {
            let id = i as u32;
            match token_to_id.entry(token.clone()) {
                Entry::Occupied(existing) => {
                    return Err(TokenizerError::DuplicateToken {
                        token: token.clone(),
                        first: *existing.get(),
                        second: id,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
        }

        debug!(vocab_size = id_to_token.len(), "Vocabulary built");

        Ok(Self {
            token_to_id,
            id_to_token,
        })
    }

    /// Parse `vocab.txt` content: one token per line, id = zero-based line index.
    pub fn from_vocab_text(text: &str) -> Result<Self, TokenizerError> {
        Self::from_tokens(text.lines())
    }

    /// Load a `vocab.txt` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TokenizerError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let vocab = Self::from_vocab_text(&text)?;
        debug!(path = %path.display(), vocab_size = vocab.len(), "Loaded vocabulary file");
        Ok(vocab)
    }

    pub fn id_of(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    pub fn token_of(&self, id: u32) -> Option<&str> {
        self.id_to_token.get(id as usize).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.token_to_id.contains_key(token)
    }

    /// Like [`Vocab::id_of`], but a miss is an explicit error rather than a
    /// value that could be mistaken for id 0.
    pub fn token_to_id(&self, token: &str) -> Result<u32, TokenizerError> {
        self.id_of(token).ok_or_else(|| TokenizerError::TokenNotFound(token.to_string()))
    }

    pub fn id_to_token(&self, id: u32) -> Result<&str, TokenizerError> {
        self.token_of(id).ok_or(TokenizerError::IdOutOfRange {
            id,
            size: self.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.id_to_token.len()
    }

    /// Always false for a successfully constructed vocabulary.
    pub fn is_empty(&self) -> bool {
        self.id_to_token.is_empty()
    }

    /// `(id, token)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.id_to_token
            .iter()
            .enumerate()
            .map(|(i, t)| (i as u32, t.as_str()))
    }
}
