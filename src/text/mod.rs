//! Text ingestion: n-gram tokenization, vocabulary, term-frequency
//! embedding.
//!
//! This layer turns raw lines of text into the dense matrix the multiply
//! engine consumes. Each document becomes a map of n-gram counts, the
//! vocabulary is the ordered union of every document's tokens, and the
//! embedding projects each document onto that shared term space.

pub mod embed;
pub mod tokenize;

pub use embed::{Vocabulary, embed};
pub use tokenize::{TokenCounts, tokenize, tokenize_file};
