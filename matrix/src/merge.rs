//! Addition, subtraction and negation.
//!
//! Sums are computed row by row as a merge of two column-sorted rows. Each operation makes two
//! passes over the operands: the first sizes every output row, the second fills buffers that were
//! allocated once at the exact total.

use alloc::vec::Vec;
use core::ops::{Add, Neg, Sub};

use crs_scalar::Scalar;
use itertools::{EitherOrBoth, Itertools};
use tracing::{instrument, trace};

use crate::sparse::CsrMatrix;
use crate::{MatrixError, MatrixResult};

/// The stored entries of `lhs[r] + rhs[r]`, in ascending column order.
///
/// Columns present in only one operand pass through unchanged; they are non-zero already. Columns
/// present in both are summed, and dropped if the sum cancels.
fn merged_row<'a, T: Scalar>(
    lhs: &'a CsrMatrix<T>,
    rhs: &'a CsrMatrix<T>,
    r: usize,
) -> impl Iterator<Item = (usize, T)> + 'a {
    lhs.sparse_row(r)
        .merge_join_by(rhs.sparse_row(r), |(a, _), (b, _)| a.cmp(b))
        .filter_map(|entry| match entry {
            EitherOrBoth::Both((c, &a), (_, &b)) => {
                let sum = a + b;
                (!sum.is_zero()).then_some((c, sum))
            }
            EitherOrBoth::Left((c, &v)) | EitherOrBoth::Right((c, &v)) => Some((c, v)),
        })
}

impl<T: Scalar> CsrMatrix<T> {
    /// `self + rhs`.
    ///
    /// Fails with [`MatrixError::DimensionMismatch`] unless both operands have the same shape.
    #[instrument(level = "debug", skip_all, fields(dims = %self.dim()))]
    pub fn try_add(&self, rhs: &Self) -> MatrixResult<Self> {
        if !self.same_shape(rhs) {
            return Err(MatrixError::mismatch("add", self.dim(), rhs.dim()));
        }
        if self.is_empty() && rhs.is_empty() {
            return Ok(Self::default());
        }
        let height = self.rows();

        let mut row_ptr = Vec::with_capacity(height + 1);
        row_ptr.push(0);
        for r in 0..height {
            let row_nnz = merged_row(self, rhs, r).count();
            row_ptr.push(row_ptr[r] + row_nnz);
        }
        let nnz = row_ptr[height];
        trace!(nnz, "sized sum");

        let mut col_indices = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);
        for r in 0..height {
            for (c, v) in merged_row(self, rhs, r) {
                col_indices.push(c);
                values.push(v);
            }
            debug_assert_eq!(values.len(), row_ptr[r + 1]);
        }

        Ok(Self::from_parts_unchecked(
            height,
            self.cols(),
            row_ptr,
            col_indices,
            values,
        ))
    }

    /// `self - rhs`, computed as `self + (-rhs)`.
    ///
    /// Fails with [`MatrixError::DimensionMismatch`] unless both operands have the same shape.
    #[instrument(level = "debug", skip_all, fields(dims = %self.dim()))]
    pub fn try_sub(&self, rhs: &Self) -> MatrixResult<Self> {
        if !self.same_shape(rhs) {
            return Err(MatrixError::mismatch("sub", self.dim(), rhs.dim()));
        }
        self.try_add(&rhs.negate())
    }

    /// A new matrix with every stored value negated and the same structure.
    #[must_use]
    pub fn negate(&self) -> Self {
        let mut negated = self.clone();
        negated.negate_in_place();
        negated
    }

    pub fn negate_in_place(&mut self) {
        for r in 0..self.rows() {
            for v in self.row_values_mut(r) {
                *v = -*v;
            }
        }
    }
}

impl<T: Scalar> Add for &CsrMatrix<T> {
    type Output = CsrMatrix<T>;

    /// # Panics
    /// Panics if the operands have different shapes; see [`CsrMatrix::try_add`].
    fn add(self, rhs: Self) -> CsrMatrix<T> {
        match self.try_add(rhs) {
            Ok(sum) => sum,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: Scalar> Add for CsrMatrix<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl<T: Scalar> Sub for &CsrMatrix<T> {
    type Output = CsrMatrix<T>;

    /// # Panics
    /// Panics if the operands have different shapes; see [`CsrMatrix::try_sub`].
    fn sub(self, rhs: Self) -> CsrMatrix<T> {
        match self.try_sub(rhs) {
            Ok(difference) => difference,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: Scalar> Sub for CsrMatrix<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        &self - &rhs
    }
}

impl<T: Scalar> Neg for &CsrMatrix<T> {
    type Output = CsrMatrix<T>;

    fn neg(self) -> CsrMatrix<T> {
        self.negate()
    }
}

impl<T: Scalar> Neg for CsrMatrix<T> {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.negate_in_place();
        self
    }
}
