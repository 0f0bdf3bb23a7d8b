//! Term-frequency embedding over a shared vocabulary.

use std::collections::BTreeSet;

use super::tokenize::TokenCounts;
use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// The ordered set of distinct tokens across a document collection.
///
/// Iteration order is lexicographic and identical on every enumeration.
/// The position of a token is its column in the embedding matrix, so the
/// order must not drift between calls within a run.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    tokens: Vec<String>,
}

impl Vocabulary {
    /// The union of every document's tokens.
    pub fn from_documents(docs: &[TokenCounts]) -> Self {
        let unique: BTreeSet<&str> = docs
            .iter()
            .flat_map(|doc| doc.keys().map(String::as_str))
            .collect();
        Self {
            tokens: unique.into_iter().map(str::to_owned).collect(),
        }
    }

    /// Build from an explicit token list; sorts and deduplicates.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: BTreeSet<String> = tokens.into_iter().map(Into::into).collect();
        Self {
            tokens: unique.into_iter().collect(),
        }
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when there are no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in column order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

/// Project each document's token counts onto the vocabulary's term space.
///
/// Returns a `(docs.len(), vocabulary.len())` matrix whose column `c`
/// holds the frequency of the vocabulary's `c`-th token as a float, or
/// zero when the document does not contain it. Tokens a document has that
/// the vocabulary lacks are ignored; with a union-built vocabulary that
/// cannot happen, but the embedding does not insist on it. Pure: neither
/// input is mutated.
///
/// # Errors
///
/// Returns [`Error::EmptyVocabulary`] when there are documents to embed
/// but no tokens to embed them against.
pub fn embed(docs: &[TokenCounts], vocabulary: &Vocabulary) -> Result<Matrix> {
    if vocabulary.is_empty() && !docs.is_empty() {
        return Err(Error::EmptyVocabulary);
    }

    let mut matrix = Matrix::zeros(docs.len(), vocabulary.len());
    for (r, doc) in docs.iter().enumerate() {
        for (c, token) in vocabulary.iter().enumerate() {
            if let Some(&count) = doc.get(token) {
                matrix.set(r, c, count as f32);
            }
        }
    }
    Ok(matrix)
}
