use alloc::vec::Vec;
use core::ops::Mul;

use crs_scalar::Scalar;
use itertools::{EitherOrBoth, Itertools};
use tracing::{instrument, trace};

use crate::sparse::CsrMatrix;
use crate::{MatrixError, MatrixResult};

/// Dot product of `lhs` row `i` with `rhs_t` row `j`, where both rows are column-sorted.
fn sparse_dot<T: Scalar>(lhs: &CsrMatrix<T>, i: usize, rhs_t: &CsrMatrix<T>, j: usize) -> T {
    lhs.sparse_row(i)
        .merge_join_by(rhs_t.sparse_row(j), |(a, _), (b, _)| a.cmp(b))
        .fold(T::ZERO, |acc, entry| match entry {
            EitherOrBoth::Both((_, &a), (_, &b)) => a.mul_acc(b, acc),
            _ => acc,
        })
}

/// The stored entries of row `i` of `lhs * rhs`, given `rhs_t = rhs^T`, in ascending column order.
fn product_row<'a, T: Scalar>(
    lhs: &'a CsrMatrix<T>,
    i: usize,
    rhs_t: &'a CsrMatrix<T>,
    nonempty_cols: &'a [usize],
) -> impl Iterator<Item = (usize, T)> + 'a {
    let cols = if lhs.row_nnz(i) == 0 {
        &[][..]
    } else {
        nonempty_cols
    };
    cols.iter().filter_map(move |&j| {
        let v = sparse_dot(lhs, i, rhs_t, j);
        (!v.is_zero()).then_some((j, v))
    })
}

impl<T: Scalar> CsrMatrix<T> {
    /// The matrix product `self * rhs`.
    ///
    /// `rhs` is transposed first so that its columns become sorted rows; every output entry is
    /// then a linear merge of two sorted rows. Rows of `self` and columns of `rhs` with no stored
    /// entries are skipped. The result is sized in a first pass and filled in a second.
    ///
    /// Fails with [`MatrixError::DimensionMismatch`] unless `self.cols() == rhs.rows()`.
    #[instrument(level = "debug", skip_all, fields(lhs = %self.dim(), rhs = %rhs.dim()))]
    pub fn matmul(&self, rhs: &Self) -> MatrixResult<Self> {
        if self.cols() != rhs.rows() {
            return Err(MatrixError::mismatch("mul", self.dim(), rhs.dim()));
        }
        if self.is_empty() && rhs.is_empty() {
            return Ok(Self::default());
        }
        let height = self.rows();
        let rhs_t = rhs.transpose();
        let nonempty_cols: Vec<usize> = (0..rhs_t.rows())
            .filter(|&j| rhs_t.row_nnz(j) > 0)
            .collect();

        let mut row_ptr = Vec::with_capacity(height + 1);
        row_ptr.push(0);
        for i in 0..height {
            let row_nnz = product_row(self, i, &rhs_t, &nonempty_cols).count();
            row_ptr.push(row_ptr[i] + row_nnz);
        }
        let nnz = row_ptr[height];
        trace!(nnz, "sized product");

        let mut col_indices = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);
        for i in 0..height {
            for (j, v) in product_row(self, i, &rhs_t, &nonempty_cols) {
                col_indices.push(j);
                values.push(v);
            }
            debug_assert_eq!(values.len(), row_ptr[i + 1]);
        }

        Ok(Self::from_parts_unchecked(
            height,
            rhs.cols(),
            row_ptr,
            col_indices,
            values,
        ))
    }
}

impl<T: Scalar> Mul for &CsrMatrix<T> {
    type Output = CsrMatrix<T>;

    /// # Panics
    /// Panics if `self.cols() != rhs.rows()`; see [`CsrMatrix::matmul`].
    fn mul(self, rhs: Self) -> CsrMatrix<T> {
        match self.matmul(rhs) {
            Ok(product) => product,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: Scalar> Mul for CsrMatrix<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}
