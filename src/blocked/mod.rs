//! Cache-blocked ("block-copy") multiply driver.
//!
//! Breaks the multiplication into square tiles, copies each tile into a
//! small contiguous scratch buffer, and runs the inner kernel entirely on
//! scratch data. The working set of every multiply-accumulate is three
//! `block × block` tiles, so it stays cache-resident no matter which loop
//! ordering the tile kernel uses.

use crate::error::{Error, Result};
use crate::kernel::{self, Ordering};
use crate::matrix::Matrix;

/// Blocked accumulating multiply: `out += lhs × rhs`, tiled.
///
/// For each output tile `(I, J)`, the current contents are read into a
/// scratch tile; every `lhs(I, K)`/`rhs(K, J)` tile pair is then copied in
/// and multiplied on top of it with the chosen ordering; finally the
/// scratch tile is written back. Reading the output tile first is what
/// preserves the accumulating-write contract of the flat kernel.
///
/// # Errors
///
/// Returns [`Error::InvalidBlockSize`] when `block` is zero or does not
/// evenly divide every operand dimension. This is validated before a
/// single element is read or written, so a bad block size never touches
/// the output. Shape errors are as for [`kernel::multiply_into`].
pub fn multiply_blocked(
    lhs: &Matrix,
    rhs: &Matrix,
    out: &mut Matrix,
    ordering: Ordering,
    block: usize,
) -> Result<()> {
    kernel::check_shapes(lhs, rhs, Some(out))?;
    let (m, k) = lhs.shape();
    let n = rhs.cols();

    if block == 0 || m % block != 0 || n % block != 0 || k % block != 0 {
        return Err(Error::InvalidBlockSize { block, m, n, k });
    }

    let a = lhs.as_slice();
    let b = rhs.as_slice();
    let c = out.as_mut_slice();

    // Scratch tiles are allocated once and reused across the whole sweep.
    let mut a_tile = vec![0.0f32; block * block];
    let mut b_tile = vec![0.0f32; block * block];
    let mut c_tile = vec![0.0f32; block * block];

    for bi in (0..m).step_by(block) {
        for bj in (0..n).step_by(block) {
            copy_tile_in(c, &mut c_tile, bi, bj, block, n);

            for bk in (0..k).step_by(block) {
                copy_tile_in(a, &mut a_tile, bi, bk, block, k);
                copy_tile_in(b, &mut b_tile, bk, bj, block, n);
                kernel::matmul_range(
                    &a_tile,
                    &b_tile,
                    &mut c_tile,
                    block,
                    block,
                    block,
                    ordering,
                    0..block,
                );
            }

            copy_tile_out(&c_tile, c, bi, bj, block, n);
        }
    }
    Ok(())
}

/// Copy a `block × block` tile whose top-left corner is `(row, col)` out of
/// a row-major matrix with `stride` columns into a contiguous scratch
/// buffer.
fn copy_tile_in(src: &[f32], tile: &mut [f32], row: usize, col: usize, block: usize, stride: usize) {
    for r in 0..block {
        let base = (row + r) * stride + col;
        tile[r * block..(r + 1) * block].copy_from_slice(&src[base..base + block]);
    }
}

/// Write a scratch tile back at `(row, col)` of the full matrix.
fn copy_tile_out(tile: &[f32], dst: &mut [f32], row: usize, col: usize, block: usize, stride: usize) {
    for r in 0..block {
        let base = (row + r) * stride + col;
        dst[base..base + block].copy_from_slice(&tile[r * block..(r + 1) * block]);
    }
}
