use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Vocabulary is empty")]
    EmptyVocabulary,

    #[error("Duplicate vocabulary token {token:?} at ids {first} and {second}")]
    DuplicateToken {
        token: String,
        first: u32,
        second: u32,
    },

    #[error("Special {role} token {token:?} not found in vocabulary")]
    MissingSpecialToken { role: &'static str, token: String },

    #[error("Token not found in vocabulary: {0:?}")]
    TokenNotFound(String),

    #[error("Token id {id} out of range for vocabulary of size {size}")]
    IdOutOfRange { id: u32, size: usize },

    #[error("Invalid tokenizer config: {0}")]
    Config(String),
}
