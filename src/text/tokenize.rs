//! Fixed-length character n-gram tokenization.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

/// Token occurrence counts for a single document.
pub type TokenCounts = HashMap<String, u32>;

/// Split a line into overlapping fixed-length character n-grams and count
/// each one.
///
/// The window slides one character at a time. For `"hello world"` with
/// `ngram_len = 2` the tokens are `"he"`, `"el"`, `"ll"`, `"lo"`, `"o "`,
/// `" w"`, `"wo"`, `"or"`, `"rl"`, `"ld"`, `"d"`; positions within
/// `ngram_len` of the end yield the shorter remaining gram. With
/// `ignore_case` the line is lowercased before tokenization, so grams that
/// differ only in case collapse into one count.
///
/// Grams are built on `char` boundaries, never mid-codepoint.
pub fn tokenize(line: &str, ngram_len: usize, ignore_case: bool) -> TokenCounts {
    let folded;
    let line = if ignore_case {
        folded = line.to_lowercase();
        folded.as_str()
    } else {
        line
    };

    let chars: Vec<char> = line.chars().collect();
    let mut counts = TokenCounts::new();
    for pos in 0..chars.len() {
        let end = (pos + ngram_len).min(chars.len());
        let token: String = chars[pos..end].iter().collect();
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// Tokenize every record (line) of the given file.
///
/// Reads at most `limit` records when a limit is given; the rest of the
/// file is not touched.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if the file cannot be opened or a line
/// cannot be read.
pub fn tokenize_file(
    path: &Path,
    ngram_len: usize,
    limit: Option<usize>,
    ignore_case: bool,
) -> Result<Vec<TokenCounts>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut docs = Vec::new();
    for line in reader.lines() {
        if limit.is_some_and(|max| docs.len() >= max) {
            break;
        }
        docs.push(tokenize(&line?, ngram_len, ignore_case));
    }
    Ok(docs)
}
