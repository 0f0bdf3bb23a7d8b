//! End-to-end similarity pipeline.
//!
//! Chains embedding, row normalization, transposition, and the multiply
//! engine: the Gram matrix of the normalized embedding holds the cosine
//! similarity of every document pair, with unit diagonal.

use tracing::debug;

use crate::blocked;
use crate::error::Result;
use crate::kernel::{self, Ordering};
use crate::matrix::{Matrix, normalize, transpose};
use crate::text::{TokenCounts, Vocabulary, embed};
use crate::threaded;

/// Configuration for a Gram-matrix computation.
///
/// A configured block size selects the block-copy driver; otherwise a
/// worker count above one selects the parallel reducer; otherwise the flat
/// kernel runs sequentially. Block size takes precedence when both are
/// set.
///
/// # Example
///
/// ```
/// use lexsim::{Ordering, SimilarityPipeline, Vocabulary, tokenize};
///
/// # fn main() -> lexsim::Result<()> {
/// let docs = vec![
///     tokenize("the quick brown fox", 3, true),
///     tokenize("the quick red fox", 3, true),
/// ];
/// let vocabulary = Vocabulary::from_documents(&docs);
///
/// let gram = SimilarityPipeline::new(Ordering::Ikj).gram_matrix(&docs, &vocabulary)?;
/// assert_eq!(gram.shape(), (2, 2));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SimilarityPipeline {
    ordering: Ordering,
    block_size: Option<usize>,
    num_threads: usize,
}

impl SimilarityPipeline {
    /// A pipeline using the given kernel ordering, unblocked and
    /// single-threaded.
    pub fn new(ordering: Ordering) -> Self {
        Self {
            ordering,
            block_size: None,
            num_threads: 1,
        }
    }

    /// Run the multiply through the block-copy driver with this tile size.
    pub fn with_block_size(mut self, block: usize) -> Self {
        self.block_size = Some(block);
        self
    }

    /// Partition the multiply across this many worker threads.
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Compute the Gram matrix of the documents' normalized term-frequency
    /// embedding.
    ///
    /// An empty document set yields an empty `0×0` matrix rather than an
    /// error.
    ///
    /// # Errors
    ///
    /// Propagates every engine error unchanged: an empty vocabulary, a
    /// document whose embedding row is all zeros, or an invalid block
    /// size.
    pub fn gram_matrix(&self, docs: &[TokenCounts], vocabulary: &Vocabulary) -> Result<Matrix> {
        if docs.is_empty() {
            return Ok(Matrix::zeros(0, 0));
        }

        let mut embedding = embed(docs, vocabulary)?;
        debug!(
            rows = embedding.rows(),
            cols = embedding.cols(),
            "embedded documents"
        );

        normalize::normalize_rows(&mut embedding)?;
        let transposed = transpose::transpose(&embedding);

        let mut result = Matrix::zeros(embedding.rows(), embedding.rows());
        match self.block_size {
            Some(block) => {
                debug!(ordering = %self.ordering, block, "blocked multiply");
                blocked::multiply_blocked(&embedding, &transposed, &mut result, self.ordering, block)?;
            }
            None if self.num_threads > 1 => {
                debug!(ordering = %self.ordering, threads = self.num_threads, "parallel multiply");
                threaded::multiply_parallel(
                    &embedding,
                    &transposed,
                    &mut result,
                    self.ordering,
                    self.num_threads,
                )?;
            }
            None => {
                debug!(ordering = %self.ordering, "sequential multiply");
                kernel::multiply_into(&embedding, &transposed, &mut result, self.ordering)?;
            }
        }
        Ok(result)
    }
}
