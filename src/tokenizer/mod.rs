//! Text → subword token pipeline.
//!
//! This module defines the [`Tokenizer`] trait implemented by each pipeline
//! stage ([`BasicTokenizer`], [`WordpieceTokenizer`]) and by the composed
//! [`BertTokenizer`], plus the shared [`Vocab`].

pub mod basic;
pub mod bert;
pub mod chars;
pub mod normalize;
pub mod vocab;
pub mod wordpiece;

pub use basic::BasicTokenizer;
pub use bert::BertTokenizer;
pub use vocab::Vocab;
pub use wordpiece::{WordpieceTokenizer, CONTINUATION_PREFIX};

/// Converts text into an ordered sequence of string tokens.
///
/// Implementations are pure: the same input always yields the same output
/// and no call observes another. They must be `Send + Sync` so one instance
/// can serve many threads.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Tokenize a batch of independent texts on the rayon thread pool.
///
/// Output order matches input order.
pub fn tokenize_batch<T: Tokenizer + ?Sized>(tokenizer: &T, texts: &[&str]) -> Vec<Vec<String>> {
    use rayon::prelude::*;

    texts.par_iter().map(|text| tokenizer.tokenize(text)).collect()
}
