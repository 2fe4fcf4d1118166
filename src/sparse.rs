//! Sparse matrix utilities.
//!
//! Helper functions for working with nalgebra-sparse matrices.

use nalgebra::DMatrix;
use nalgebra_sparse::{CooMatrix, CscMatrix};

/// Create a CSC matrix from triplets (row, col, value).
///
/// Duplicates are summed together. Out-of-range triplets are ignored.
pub fn csc_from_triplets(
    nrows: usize,
    ncols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    vals: Vec<f64>,
) -> CscMatrix<f64> {
    if rows.is_empty() {
        return CscMatrix::zeros(nrows, ncols);
    }

    let mut coo = CooMatrix::new(nrows, ncols);
    for ((row, col), val) in rows.into_iter().zip(cols).zip(vals) {
        if row < nrows && col < ncols {
            coo.push(row, col, val);
        }
    }

    CscMatrix::from(&coo)
}

/// Create a CSC identity matrix.
pub fn csc_identity(n: usize) -> CscMatrix<f64> {
    CscMatrix::identity(n)
}

/// Convert CSC to dense matrix.
pub fn csc_to_dense(sparse: &CscMatrix<f64>) -> DMatrix<f64> {
    let mut dense = DMatrix::zeros(sparse.nrows(), sparse.ncols());
    for (row, col, val) in sparse.triplet_iter() {
        dense[(row, col)] += *val;
    }
    dense
}

/// Move every stored row `r` of `m` to row `map(r)` of a matrix with
/// `nrows` rows. Rows mapped to `None` are dropped, and so are entries whose
/// magnitude is at or below `prune_tol`.
pub fn csc_scatter_rows(
    m: &CscMatrix<f64>,
    nrows: usize,
    prune_tol: f64,
    map: impl Fn(usize) -> Option<usize>,
) -> CscMatrix<f64> {
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    let mut vals = Vec::new();

    for (r, c, v) in m.triplet_iter() {
        if v.abs() <= prune_tol {
            continue;
        }
        if let Some(new_row) = map(r) {
            rows.push(new_row);
            cols.push(c);
            vals.push(*v);
        }
    }

    csc_from_triplets(nrows, m.ncols(), rows, cols, vals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csc_from_triplets() {
        let m = csc_from_triplets(3, 3, vec![0, 1, 2], vec![0, 1, 2], vec![1.0, 2.0, 3.0]);
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.ncols(), 3);
        assert_eq!(m.nnz(), 3);
    }

    #[test]
    fn test_csc_from_triplets_sums_duplicates() {
        let m = csc_from_triplets(2, 2, vec![0, 0], vec![1, 1], vec![1.5, 2.5]);
        assert_eq!(csc_to_dense(&m)[(0, 1)], 4.0);
    }

    #[test]
    fn test_csc_identity() {
        let dense = csc_to_dense(&csc_identity(3));
        assert_eq!(dense, DMatrix::identity(3, 3));
    }

    #[test]
    fn test_scatter_rows() {
        // Rows 0 and 1 of a 2x2 identity go to rows 0 and 3 of a 4x2 matrix.
        let m = csc_scatter_rows(&csc_identity(2), 4, 0.0, |r| Some(r * 3));
        let dense = csc_to_dense(&m);
        assert_eq!(dense.shape(), (4, 2));
        assert_eq!(dense[(0, 0)], 1.0);
        assert_eq!(dense[(3, 1)], 1.0);
        assert_eq!(m.nnz(), 2);
    }

    #[test]
    fn test_scatter_rows_drops_and_prunes() {
        let m = csc_from_triplets(3, 1, vec![0, 1, 2], vec![0, 0, 0], vec![1.0, 1e-20, 2.0]);
        let gathered = csc_scatter_rows(&m, 2, 1e-15, |r| (r != 2).then_some(r));
        assert_eq!(gathered.nnz(), 1);
        assert_eq!(csc_to_dense(&gathered)[(0, 0)], 1.0);
    }
}
