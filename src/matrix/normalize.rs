//! In-place row normalization to unit L2 magnitude.

use super::Matrix;
use crate::error::{Error, Result};

/// Magnitude of a vector: the square root of the sum of squares.
pub fn magnitude(elements: &[f32]) -> f32 {
    let sum: f32 = elements.iter().map(|e| e * e).sum();
    sum.sqrt()
}

/// Scale every row of the matrix to unit magnitude, in place.
///
/// Rows are normalized independently; there is no cross-row state. After a
/// successful call every row's L2 norm is 1 within floating-point rounding.
///
/// # Errors
///
/// Returns [`Error::ZeroVector`] for the first row whose magnitude is
/// exactly zero; a zero vector has no direction to preserve. Rows before
/// the failing one have already been normalized when this happens.
pub fn normalize_rows(matrix: &mut Matrix) -> Result<()> {
    for r in 0..matrix.rows() {
        let row = matrix.row_mut(r);
        let mag = magnitude(row);
        if mag == 0.0 {
            return Err(Error::ZeroVector { row: r });
        }
        for elem in row {
            *elem /= mag;
        }
    }
    Ok(())
}
