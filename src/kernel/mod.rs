//! The multiply kernel: one accumulating triple loop, six index orderings.
//!
//! Every ordering computes `result(i,j) = Σ_p lhs(i,p) * rhs(p,j)`; they
//! differ only in which index runs outermost and which runs innermost, and
//! therefore in memory-access pattern. `ikj` walks both `rhs` and the output
//! with stride 1 and is the usual fast choice; `ijk` is the textbook order
//! and the correctness baseline; the `k`-outer orders turn each step into a
//! rank-1 update, which is what the parallel reducer partitions.
//!
//! All entry points *accumulate* into the output (`C += A * B`). Callers
//! that want a fresh product must zero the buffer first; [`multiply`] does
//! exactly that before delegating.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Nesting order of the three multiply loops.
///
/// The orderings are mathematically equivalent; picking one is purely a
/// performance decision. Results agree up to floating-point summation
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ordering {
    Ijk,
    Ikj,
    Jik,
    Jki,
    Kij,
    Kji,
}

impl Ordering {
    /// Every ordering, in a fixed order convenient for tests and benches.
    pub const ALL: [Ordering; 6] = [
        Ordering::Ijk,
        Ordering::Ikj,
        Ordering::Jik,
        Ordering::Jki,
        Ordering::Kij,
        Ordering::Kji,
    ];

    /// The lowercase identifier, e.g. `"ikj"`.
    pub fn name(self) -> &'static str {
        match self {
            Ordering::Ijk => "ijk",
            Ordering::Ikj => "ikj",
            Ordering::Jik => "jik",
            Ordering::Jki => "jki",
            Ordering::Kij => "kij",
            Ordering::Kji => "kji",
        }
    }

    /// Extent of this ordering's outermost loop for an `m×k · k×n` product.
    pub(crate) fn outer_extent(self, m: usize, n: usize, k: usize) -> usize {
        match self {
            Ordering::Ijk | Ordering::Ikj => m,
            Ordering::Jik | Ordering::Jki => n,
            Ordering::Kij | Ordering::Kji => k,
        }
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ordering {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ijk" => Ok(Ordering::Ijk),
            "ikj" => Ok(Ordering::Ikj),
            "jik" => Ok(Ordering::Jik),
            "jki" => Ok(Ordering::Jki),
            "kij" => Ok(Ordering::Kij),
            "kji" => Ok(Ordering::Kji),
            other => Err(format!(
                "unknown loop ordering '{other}' (expected one of ijk, ikj, jik, jki, kij, kji)"
            )),
        }
    }
}

/// Validate operand shapes, and the output shape when one is supplied.
pub(crate) fn check_shapes(lhs: &Matrix, rhs: &Matrix, out: Option<&Matrix>) -> Result<()> {
    if lhs.cols() != rhs.rows() {
        return Err(Error::ShapeMismatch {
            lhs_rows: lhs.rows(),
            lhs_cols: lhs.cols(),
            rhs_rows: rhs.rows(),
            rhs_cols: rhs.cols(),
        });
    }
    if let Some(out) = out {
        if out.shape() != (lhs.rows(), rhs.cols()) {
            return Err(Error::OutputShape {
                expected_rows: lhs.rows(),
                expected_cols: rhs.cols(),
                actual_rows: out.rows(),
                actual_cols: out.cols(),
            });
        }
    }
    Ok(())
}

/// Multiply `lhs × rhs` with the given loop ordering, returning a fresh
/// matrix.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if `lhs.cols() != rhs.rows()`.
pub fn multiply(lhs: &Matrix, rhs: &Matrix, ordering: Ordering) -> Result<Matrix> {
    check_shapes(lhs, rhs, None)?;
    let mut out = Matrix::zeros(lhs.rows(), rhs.cols());
    let (m, k) = lhs.shape();
    let n = rhs.cols();
    matmul_range(
        lhs.as_slice(),
        rhs.as_slice(),
        out.as_mut_slice(),
        m,
        n,
        k,
        ordering,
        0..ordering.outer_extent(m, n, k),
    );
    Ok(out)
}

/// Accumulating multiply: `out += lhs × rhs`.
///
/// The output is added to, never overwritten; zero it first if a fresh
/// product is wanted. The buffer must already have the product's exact
/// shape and is never resized.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] for incompatible operands and
/// [`Error::OutputShape`] when `out` is not `lhs.rows() × rhs.cols()`.
pub fn multiply_into(lhs: &Matrix, rhs: &Matrix, out: &mut Matrix, ordering: Ordering) -> Result<()> {
    check_shapes(lhs, rhs, Some(out))?;
    let (m, k) = lhs.shape();
    let n = rhs.cols();
    matmul_range(
        lhs.as_slice(),
        rhs.as_slice(),
        out.as_mut_slice(),
        m,
        n,
        k,
        ordering,
        0..ordering.outer_extent(m, n, k),
    );
    Ok(())
}

/// Slice-level accumulating kernel, restricted to `outer` iterations of the
/// ordering's outermost index.
///
/// `a` is m×k, `b` is k×n, `c` is m×n, all row-major. The sequential entry
/// points pass the full range; the parallel reducer passes sub-ranges to
/// partition the outer loop across workers. Shape checking is the caller's
/// job. This is the one place all six loop nestings live.
#[allow(clippy::too_many_arguments)]
pub(crate) fn matmul_range(
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
    m: usize,
    n: usize,
    k: usize,
    ordering: Ordering,
    outer: Range<usize>,
) {
    debug_assert_eq!(a.len(), m * k);
    debug_assert_eq!(b.len(), k * n);
    debug_assert_eq!(c.len(), m * n);
    debug_assert!(outer.end <= ordering.outer_extent(m, n, k));

    match ordering {
        Ordering::Ijk => {
            for i in outer {
                for j in 0..n {
                    for p in 0..k {
                        c[i * n + j] += a[i * k + p] * b[p * n + j];
                    }
                }
            }
        }
        Ordering::Ikj => {
            for i in outer {
                for p in 0..k {
                    for j in 0..n {
                        c[i * n + j] += a[i * k + p] * b[p * n + j];
                    }
                }
            }
        }
        Ordering::Jik => {
            for j in outer {
                for i in 0..m {
                    for p in 0..k {
                        c[i * n + j] += a[i * k + p] * b[p * n + j];
                    }
                }
            }
        }
        Ordering::Jki => {
            for j in outer {
                for p in 0..k {
                    for i in 0..m {
                        c[i * n + j] += a[i * k + p] * b[p * n + j];
                    }
                }
            }
        }
        Ordering::Kij => {
            for p in outer {
                for i in 0..m {
                    for j in 0..n {
                        c[i * n + j] += a[i * k + p] * b[p * n + j];
                    }
                }
            }
        }
        Ordering::Kji => {
            for p in outer {
                for j in 0..n {
                    for i in 0..m {
                        c[i * n + j] += a[i * k + p] * b[p * n + j];
                    }
                }
            }
        }
    }
}
