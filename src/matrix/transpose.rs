//! Matrix transposition.

use super::Matrix;

/// Transpose a matrix: returns `M^T` as a fresh matrix.
///
/// What was column `c` of the input becomes row `c` of the output. The
/// input is left untouched and shares no storage with the result, and
/// transposing twice reproduces the original exactly.
///
/// # Example
///
/// ```
/// use lexsim::{transpose, Matrix};
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0,
///                                     4.0, 5.0, 6.0]);
/// let t = transpose(&m);
///
/// assert_eq!(t, Matrix::from_vec(3, 2, vec![1.0, 4.0,
///                                           2.0, 5.0,
///                                           3.0, 6.0]));
/// ```
pub fn transpose(matrix: &Matrix) -> Matrix {
    let (rows, cols) = matrix.shape();
    let mut out = Matrix::zeros(cols, rows);

    let src = matrix.as_slice();
    let dst = out.as_mut_slice();
    for r in 0..rows {
        for c in 0..cols {
            dst[c * rows + r] = src[r * cols + c];
        }
    }
    out
}
