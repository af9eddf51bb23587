use alloc::vec;

use crs_scalar::Scalar;
use tracing::instrument;

use crate::sparse::CsrMatrix;

impl<T: Scalar> CsrMatrix<T> {
    /// The transpose, computed with a counting sort over the column indices.
    ///
    /// Runs in `O(nnz + height + width)`. Old rows are scattered in ascending order, so each new
    /// row receives its columns already sorted.
    #[must_use]
    #[instrument(level = "debug", skip_all, fields(dims = %self.dim(), nnz = self.nnz()))]
    pub fn transpose(&self) -> Self {
        if self.is_empty() {
            return Self::default();
        }
        let (height, width, nnz) = (self.rows(), self.cols(), self.nnz());

        // Histogram: new row `c` gets one entry per stored entry in old column `c`.
        let mut row_ptr = vec![0; width + 1];
        for &c in self.col_indices() {
            row_ptr[c + 1] += 1;
        }
        for c in 0..width {
            row_ptr[c + 1] += row_ptr[c];
        }
        debug_assert_eq!(row_ptr[width], nnz);

        let mut next_free = row_ptr[..width].to_vec();
        let mut col_indices = vec![0; nnz];
        let mut values = vec![T::ZERO; nnz];

        for r in 0..height {
            for (c, &v) in self.sparse_row(r) {
                let slot = next_free[c];
                col_indices[slot] = r;
                values[slot] = v;
                next_free[c] += 1;
            }
        }
        debug_assert!(next_free.iter().zip(&row_ptr[1..]).all(|(a, b)| a == b));

        Self::from_parts_unchecked(width, height, row_ptr, col_indices, values)
    }

    /// Replace `self` with its transpose.
    pub fn transpose_in_place(&mut self) {
        *self = self.transpose();
    }
}
