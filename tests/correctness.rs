use lexsim::{
    Error, Matrix, Ordering, multiply, multiply_blocked, multiply_into, multiply_parallel,
    normalize_rows, transpose,
};

fn assert_matrices_close(expected: &Matrix, actual: &Matrix, tol: f32, name: &str) {
    assert_eq!(expected.shape(), actual.shape(), "{}: shape mismatch", name);
    for r in 0..expected.rows() {
        for c in 0..expected.cols() {
            let e = expected.get(r, c);
            let a = actual.get(r, c);
            let scale = e.abs().max(a.abs()).max(1.0);
            assert!(
                (e - a).abs() <= tol * scale,
                "{}: mismatch at ({}, {}): expected {}, got {}",
                name,
                r,
                c,
                e,
                a
            );
        }
    }
}

/// Deterministic test data, cycling through small values.
fn pattern_matrix(rows: usize, cols: usize, modulus: usize) -> Matrix {
    let data: Vec<f32> = (0..rows * cols).map(|i| (i % modulus) as f32).collect();
    Matrix::from_vec(rows, cols, data)
}

/// Textbook triple loop, used as the correctness baseline for every
/// ordering and driver.
fn reference_multiply(lhs: &Matrix, rhs: &Matrix) -> Matrix {
    let (m, k) = lhs.shape();
    let n = rhs.cols();
    let mut out = Matrix::zeros(m, n);
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0f32;
            for p in 0..k {
                sum += lhs.get(i, p) * rhs.get(p, j);
            }
            out.set(i, j, sum);
        }
    }
    out
}

// ============================================================
// Loop orderings
// ============================================================

#[test]
fn test_orderings_match_reference() {
    let test_sizes = [(2, 2, 2), (3, 5, 7), (7, 3, 5), (8, 8, 8), (13, 17, 19), (16, 16, 32)];

    for (m, n, k) in test_sizes {
        let lhs = pattern_matrix(m, k, 10);
        let rhs = pattern_matrix(k, n, 7);
        let expected = reference_multiply(&lhs, &rhs);

        for ordering in Ordering::ALL {
            let actual = multiply(&lhs, &rhs, ordering).unwrap();
            assert_matrices_close(
                &expected,
                &actual,
                1e-4,
                &format!("{}x{}x{} {}", m, n, k, ordering),
            );
        }
    }
}

#[test]
fn test_known_product() {
    let lhs = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let rhs = Matrix::from_vec(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);

    for ordering in Ordering::ALL {
        let out = multiply(&lhs, &rhs, ordering).unwrap();
        assert_eq!(out, Matrix::from_vec(2, 2, vec![58.0, 64.0, 139.0, 154.0]));
    }
}

#[test]
fn test_ordering_parse() {
    for ordering in Ordering::ALL {
        assert_eq!(ordering.name().parse::<Ordering>().unwrap(), ordering);
    }
    assert!("ikk".parse::<Ordering>().is_err());
    assert!("".parse::<Ordering>().is_err());
}

#[test]
fn test_shape_mismatch_rejected() {
    let lhs = pattern_matrix(2, 3, 10);
    let rhs = pattern_matrix(2, 3, 10);

    for ordering in Ordering::ALL {
        assert!(matches!(
            multiply(&lhs, &rhs, ordering),
            Err(Error::ShapeMismatch { lhs_cols: 3, rhs_rows: 2, .. })
        ));
    }
}

#[test]
fn test_output_shape_rejected() {
    let lhs = pattern_matrix(2, 3, 10);
    let rhs = pattern_matrix(3, 4, 10);
    let mut out = Matrix::zeros(2, 3);

    assert!(matches!(
        multiply_into(&lhs, &rhs, &mut out, Ordering::Ikj),
        Err(Error::OutputShape { expected_rows: 2, expected_cols: 4, .. })
    ));
}

// ============================================================
// Accumulation contract (C += A*B, not C = A*B)
// ============================================================

#[test]
fn test_accumulation_into_zeroed_buffer() {
    let lhs = pattern_matrix(6, 4, 10);
    let rhs = pattern_matrix(4, 6, 7);

    let mut out = Matrix::zeros(6, 6);
    multiply_into(&lhs, &rhs, &mut out, Ordering::Ikj).unwrap();
    assert_matrices_close(&reference_multiply(&lhs, &rhs), &out, 1e-4, "zeroed");
}

#[test]
fn test_accumulation_on_populated_buffer() {
    let lhs = pattern_matrix(6, 4, 10);
    let rhs = pattern_matrix(4, 6, 7);

    let mut out = Matrix::from_vec(6, 6, vec![5.0; 36]);
    multiply_into(&lhs, &rhs, &mut out, Ordering::Ikj).unwrap();

    let product = reference_multiply(&lhs, &rhs);
    for r in 0..6 {
        for c in 0..6 {
            let expected = product.get(r, c) + 5.0;
            assert!(
                (out.get(r, c) - expected).abs() < 1e-4,
                "should accumulate, not overwrite"
            );
        }
    }
}

#[test]
fn test_repeated_accumulation_doubles() {
    let lhs = pattern_matrix(5, 5, 10);
    let rhs = pattern_matrix(5, 5, 7);

    let mut out = Matrix::zeros(5, 5);
    multiply_into(&lhs, &rhs, &mut out, Ordering::Kij).unwrap();
    multiply_into(&lhs, &rhs, &mut out, Ordering::Kij).unwrap();

    let product = reference_multiply(&lhs, &rhs);
    for r in 0..5 {
        for c in 0..5 {
            assert!((out.get(r, c) - 2.0 * product.get(r, c)).abs() < 1e-3);
        }
    }
}

// ============================================================
// Transpose
// ============================================================

#[test]
fn test_transpose_values() {
    let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let t = transpose(&m);
    assert_eq!(t, Matrix::from_vec(3, 2, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]));
}

#[test]
fn test_transpose_involution() {
    for (rows, cols) in [(1, 1), (1, 7), (4, 4), (5, 9), (16, 3)] {
        let m = pattern_matrix(rows, cols, 23);
        assert_eq!(transpose(&transpose(&m)), m, "{}x{}", rows, cols);
    }
}

// ============================================================
// Row normalization
// ============================================================

#[test]
fn test_normalize_unit_rows() {
    let mut m = pattern_matrix(4, 6, 9);
    // Shift off zero so no row is degenerate.
    for r in 0..4 {
        for c in 0..6 {
            m.set(r, c, m.get(r, c) + 1.0);
        }
    }
    normalize_rows(&mut m).unwrap();

    for r in 0..4 {
        let norm: f32 = m.row(r).iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "row {} has norm {}", r, norm);
    }
}

#[test]
fn test_normalize_zero_row_fails() {
    let mut m = Matrix::from_vec(3, 2, vec![1.0, 2.0, 0.0, 0.0, 3.0, 4.0]);
    assert!(matches!(
        normalize_rows(&mut m),
        Err(Error::ZeroVector { row: 1 })
    ));
}

#[test]
fn test_normalize_idempotent() {
    let mut m = Matrix::from_vec(1, 3, vec![3.0, 4.0, 12.0]);
    normalize_rows(&mut m).unwrap();
    let once = m.clone();
    normalize_rows(&mut m).unwrap();
    assert_matrices_close(&once, &m, 1e-6, "idempotent");
}

// ============================================================
// Gram matrix symmetry
// ============================================================

#[test]
fn test_gram_matrix_symmetric() {
    let mut m = pattern_matrix(5, 8, 11);
    for r in 0..5 {
        m.set(r, r, 3.0); // keep every row non-zero
    }
    normalize_rows(&mut m).unwrap();

    let gram = multiply(&m, &transpose(&m), Ordering::Ikj).unwrap();
    assert_eq!(gram.shape(), (5, 5));
    for i in 0..5 {
        assert!((gram.get(i, i) - 1.0).abs() < 1e-5, "unit diagonal");
        for j in 0..5 {
            assert!((gram.get(i, j) - gram.get(j, i)).abs() < 1e-5, "symmetry");
        }
    }
}

// ============================================================
// Block-copy driver
// ============================================================

#[test]
fn test_blocked_matches_unblocked() {
    let lhs = pattern_matrix(8, 8, 10);
    let rhs = pattern_matrix(8, 8, 7);
    let expected = reference_multiply(&lhs, &rhs);

    for block in [1, 2, 4, 8] {
        for ordering in Ordering::ALL {
            let mut out = Matrix::zeros(8, 8);
            multiply_blocked(&lhs, &rhs, &mut out, ordering, block).unwrap();
            assert_matrices_close(
                &expected,
                &out,
                1e-4,
                &format!("block {} {}", block, ordering),
            );
        }
    }
}

#[test]
fn test_blocked_non_square() {
    let lhs = pattern_matrix(12, 8, 10);
    let rhs = pattern_matrix(8, 4, 7);
    let expected = reference_multiply(&lhs, &rhs);

    let mut out = Matrix::zeros(12, 4);
    multiply_blocked(&lhs, &rhs, &mut out, Ordering::Ikj, 4).unwrap();
    assert_matrices_close(&expected, &out, 1e-4, "blocked 12x4x8");
}

#[test]
fn test_blocked_accumulates() {
    let lhs = pattern_matrix(4, 4, 10);
    let rhs = pattern_matrix(4, 4, 7);

    let mut out = Matrix::from_vec(4, 4, vec![2.0; 16]);
    multiply_blocked(&lhs, &rhs, &mut out, Ordering::Ijk, 2).unwrap();

    let product = reference_multiply(&lhs, &rhs);
    for r in 0..4 {
        for c in 0..4 {
            assert!((out.get(r, c) - (product.get(r, c) + 2.0)).abs() < 1e-4);
        }
    }
}

#[test]
fn test_blocked_invalid_block_sizes() {
    let lhs = pattern_matrix(8, 8, 10);
    let rhs = pattern_matrix(8, 8, 7);

    for block in [0, 3, 5, 7, 9] {
        let mut out = Matrix::zeros(8, 8);
        let result = multiply_blocked(&lhs, &rhs, &mut out, Ordering::Ikj, block);
        assert!(
            matches!(result, Err(Error::InvalidBlockSize { .. })),
            "block {} should be rejected",
            block
        );
        // A rejected call must not have touched the output.
        assert_eq!(out, Matrix::zeros(8, 8));
    }
}

#[test]
fn test_blocked_validates_all_dimensions() {
    // Block divides the output tiles (4x4) but not the inner dimension.
    let lhs = pattern_matrix(4, 6, 10);
    let rhs = pattern_matrix(6, 4, 7);
    let mut out = Matrix::zeros(4, 4);

    assert!(matches!(
        multiply_blocked(&lhs, &rhs, &mut out, Ordering::Ikj, 4),
        Err(Error::InvalidBlockSize { .. })
    ));
}

// ============================================================
// Parallel reducer
// ============================================================

#[test]
fn test_parallel_matches_sequential() {
    let test_sizes = [(16, 16, 16), (33, 17, 9), (64, 64, 32)];

    for (m, n, k) in test_sizes {
        let lhs = pattern_matrix(m, k, 17);
        let rhs = pattern_matrix(k, n, 13);
        let expected = reference_multiply(&lhs, &rhs);

        for threads in [2, 3, 4, 9] {
            for ordering in [Ordering::Kij, Ordering::Kji, Ordering::Ikj] {
                let mut out = Matrix::zeros(m, n);
                multiply_parallel(&lhs, &rhs, &mut out, ordering, threads).unwrap();
                assert_matrices_close(
                    &expected,
                    &out,
                    1e-4,
                    &format!("{}x{}x{} {} threads {}", m, n, k, ordering, threads),
                );
            }
        }
    }
}

#[test]
fn test_parallel_single_worker_bypass() {
    let lhs = pattern_matrix(8, 8, 10);
    let rhs = pattern_matrix(8, 8, 7);

    let mut sequential = Matrix::zeros(8, 8);
    multiply_into(&lhs, &rhs, &mut sequential, Ordering::Kij).unwrap();

    let mut parallel = Matrix::zeros(8, 8);
    multiply_parallel(&lhs, &rhs, &mut parallel, Ordering::Kij, 1).unwrap();

    assert_eq!(sequential, parallel);
}

#[test]
fn test_parallel_more_workers_than_iterations() {
    let lhs = pattern_matrix(3, 3, 5);
    let rhs = pattern_matrix(3, 3, 4);
    let expected = reference_multiply(&lhs, &rhs);

    let mut out = Matrix::zeros(3, 3);
    multiply_parallel(&lhs, &rhs, &mut out, Ordering::Kji, 16).unwrap();
    assert_matrices_close(&expected, &out, 1e-4, "overcommitted workers");
}

#[test]
fn test_parallel_accumulates() {
    let lhs = pattern_matrix(4, 4, 10);
    let rhs = pattern_matrix(4, 4, 7);

    let mut out = Matrix::from_vec(4, 4, vec![1.0; 16]);
    multiply_parallel(&lhs, &rhs, &mut out, Ordering::Kij, 2).unwrap();

    let product = reference_multiply(&lhs, &rhs);
    for r in 0..4 {
        for c in 0..4 {
            assert!((out.get(r, c) - (product.get(r, c) + 1.0)).abs() < 1e-4);
        }
    }
}

#[test]
fn test_parallel_shape_mismatch_rejected() {
    let lhs = pattern_matrix(2, 3, 10);
    let rhs = pattern_matrix(2, 3, 10);
    let mut out = Matrix::zeros(2, 3);

    assert!(matches!(
        multiply_parallel(&lhs, &rhs, &mut out, Ordering::Kij, 4),
        Err(Error::ShapeMismatch { .. })
    ));
}
