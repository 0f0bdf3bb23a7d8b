//! Fork-join parallel multiply.
//!
//! The outer loop of the chosen ordering is partitioned into contiguous
//! chunks, one per worker. Each worker accumulates its chunk into a private
//! buffer it exclusively owns; after the join the main thread sums the
//! private buffers into the shared output. No two threads ever write the
//! same memory, and the inputs are plain shared borrows; scoped threads
//! let the compiler check both facts.

use std::thread;

use crate::error::Result;
use crate::kernel::{self, Ordering};
use crate::matrix::Matrix;

/// Parallel accumulating multiply: `out += lhs × rhs` across up to
/// `num_threads` workers.
///
/// The worker count is clamped to the outer-loop extent (a 3-row multiply
/// gets at most 3 workers) and to at least one. A single worker skips the
/// private buffers entirely and accumulates straight into `out`; with no
/// parallelism the extra `N×N` allocations buy nothing.
///
/// Floating-point sums are reassociated by the partition, so results match
/// the sequential path within tolerance, not bit-for-bit.
///
/// # Errors
///
/// Shape errors are as for [`kernel::multiply_into`].
pub fn multiply_parallel(
    lhs: &Matrix,
    rhs: &Matrix,
    out: &mut Matrix,
    ordering: Ordering,
    num_threads: usize,
) -> Result<()> {
    kernel::check_shapes(lhs, rhs, Some(out))?;
    let (m, k) = lhs.shape();
    let n = rhs.cols();

    let extent = ordering.outer_extent(m, n, k);
    let workers = num_threads.max(1).min(extent.max(1));

    if workers == 1 {
        kernel::matmul_range(
            lhs.as_slice(),
            rhs.as_slice(),
            out.as_mut_slice(),
            m,
            n,
            k,
            ordering,
            0..extent,
        );
        return Ok(());
    }

    let a = lhs.as_slice();
    let b = rhs.as_slice();
    let chunk = extent.div_ceil(workers);

    let partials: Vec<Vec<f32>> = thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|w| {
                s.spawn(move || {
                    let start = (w * chunk).min(extent);
                    let end = ((w + 1) * chunk).min(extent);
                    let mut partial = vec![0.0f32; m * n];
                    kernel::matmul_range(a, b, &mut partial, m, n, k, ordering, start..end);
                    partial
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Join point: reduce the private buffers into the shared result.
    let c = out.as_mut_slice();
    for partial in &partials {
        for (acc, val) in c.iter_mut().zip(partial) {
            *acc += *val;
        }
    }
    Ok(())
}
