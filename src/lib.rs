//! Lexical text similarity via dense matrix multiplication.
//!
//! Documents are tokenized into fixed-length character n-grams, embedded
//! as term-frequency vectors over the shared vocabulary, normalized to
//! unit length, and multiplied against their own transpose. The resulting
//! Gram matrix holds the cosine similarity of every document pair.
//!
//! The multiply engine is where the engineering lives:
//!
//! - six loop orderings ([`Ordering`]) with identical results and very
//!   different memory-access behavior
//! - a cache-blocking driver ([`multiply_blocked`]) that keeps every
//!   multiply-accumulate inside `block × block` scratch tiles
//! - a fork-join parallel reducer ([`multiply_parallel`]) with private
//!   per-worker accumulation buffers merged at the join point
//!
//! ## Usage
//!
//! ```
//! use lexsim::{Ordering, SimilarityPipeline, Vocabulary, tokenize};
//!
//! # fn main() -> lexsim::Result<()> {
//! let docs = vec![
//!     tokenize("colorless green ideas", 3, true),
//!     tokenize("colorless red ideas", 3, true),
//! ];
//! let vocabulary = Vocabulary::from_documents(&docs);
//!
//! let gram = SimilarityPipeline::new(Ordering::Ikj).gram_matrix(&docs, &vocabulary)?;
//!
//! // Unit diagonal, symmetric off-diagonal similarity.
//! assert!((gram.get(0, 0) - 1.0).abs() < 1e-5);
//! assert!((gram.get(0, 1) - gram.get(1, 0)).abs() < 1e-5);
//! # Ok(())
//! # }
//! ```
//!
//! The kernels themselves are usable standalone; they all *accumulate*
//! into their output (`C += A * B`), so zero the buffer first for a fresh
//! product.

pub mod blocked;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod pipeline;
pub mod text;
pub mod threaded;

pub use blocked::multiply_blocked;
pub use error::{Error, Result};
pub use kernel::{Ordering, multiply, multiply_into};
pub use matrix::Matrix;
pub use matrix::normalize::{magnitude, normalize_rows};
pub use matrix::transpose::transpose;
pub use pipeline::SimilarityPipeline;
pub use text::{TokenCounts, Vocabulary, embed, tokenize, tokenize_file};
pub use threaded::multiply_parallel;
