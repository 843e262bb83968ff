pub mod cli;
pub mod config;
pub mod encoding;
pub mod error;
pub mod tokenizer;

pub use config::TokenizerConfig;
pub use encoding::{BatchEncoding, Encoding, InputBuilder};
pub use error::TokenizerError;
pub use tokenizer::{BasicTokenizer, BertTokenizer, Tokenizer, Vocab, WordpieceTokenizer};
