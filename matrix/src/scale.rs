use alloc::vec::Vec;
use core::ops::{Mul, MulAssign};

use crs_scalar::Scalar;

use crate::sparse::CsrMatrix;

impl<T: Scalar> CsrMatrix<T> {
    /// Multiply every element by `scalar` in place.
    ///
    /// Products that come out as zero (always, when `scalar` is zero) are removed, so the matrix
    /// stays canonical.
    pub fn scale(&mut self, scalar: T) {
        if self.is_empty() {
            return;
        }
        if scalar.is_zero() {
            *self = Self::zeros(self.rows(), self.cols());
            return;
        }
        let (height, width) = (self.rows(), self.cols());
        let (mut row_ptr, mut col_indices, mut values) = self.take().into_parts();

        // Compact surviving entries towards the front, rewriting row pointers as we go.
        let mut write = 0;
        let mut read = 0;
        for r in 0..height {
            let row_end = row_ptr[r + 1];
            while read < row_end {
                let v = values[read] * scalar;
                if !v.is_zero() {
                    values[write] = v;
                    col_indices[write] = col_indices[read];
                    write += 1;
                }
                read += 1;
            }
            row_ptr[r + 1] = write;
        }
        values.truncate(write);
        col_indices.truncate(write);

        *self = Self::from_parts_unchecked(height, width, row_ptr, col_indices, values);
    }

    /// `scalar * self` as a new matrix, sized before it is filled.
    #[must_use]
    pub fn scaled(&self, scalar: T) -> Self {
        if self.is_empty() {
            return Self::default();
        }
        let height = self.rows();
        let products = |r| {
            self.sparse_row(r)
                .map(move |(c, &v)| (c, v * scalar))
                .filter(|(_, v)| !v.is_zero())
        };

        let mut row_ptr = Vec::with_capacity(height + 1);
        row_ptr.push(0);
        for r in 0..height {
            row_ptr.push(row_ptr[r] + products(r).count());
        }
        let nnz = row_ptr[height];

        let mut col_indices = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);
        for r in 0..height {
            for (c, v) in products(r) {
                col_indices.push(c);
                values.push(v);
            }
        }

        Self::from_parts_unchecked(height, self.cols(), row_ptr, col_indices, values)
    }
}

impl<T: Scalar> Mul<T> for &CsrMatrix<T> {
    type Output = CsrMatrix<T>;

    fn mul(self, rhs: T) -> CsrMatrix<T> {
        self.scaled(rhs)
    }
}

impl<T: Scalar> Mul<T> for CsrMatrix<T> {
    type Output = Self;

    fn mul(mut self, rhs: T) -> Self {
        self.scale(rhs);
        self
    }
}

impl<T: Scalar> MulAssign<T> for CsrMatrix<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.scale(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::RowMajorMatrix;

    #[test]
    fn test_scale_by_zero_drops_everything() {
        let mut m = CsrMatrix::from_rows(&[[0, 2], [3, 0]]);
        m.scale(0);
        assert_eq!(m.nnz(), 0);
        assert_eq!((m.rows(), m.cols()), (2, 2));
        assert_eq!(m.row_ptr(), &[0, 0, 0]);

        let m = CsrMatrix::from_rows(&[[0, 2], [3, 0]]);
        assert!(m.scaled(0).is_zero_matrix());
        assert!((m * 0).is_zero_matrix());
    }

    #[test]
    fn test_scale() {
        let m = CsrMatrix::from_rows(&[[1, 0, -2], [0, 0, 0], [0, 4, 0]]);
        let expected = RowMajorMatrix::from_rows(&[[3, 0, -6], [0, 0, 0], [0, 12, 0]]);
        assert_eq!((&m * 3).to_dense(), expected);

        let mut in_place = m.clone();
        in_place *= 3;
        assert_eq!(in_place, &m * 3);
    }

    #[test]
    fn test_scale_compacts_underflow() {
        // Only the tiny entry underflows to zero.
        let mut m = CsrMatrix::from_rows(&[[1.0e-300f64, 1.0], [0.0, 2.0]]);
        m.scale(1.0e-300);
        assert_eq!(m.nnz(), 2);
        assert_eq!(m.col_indices(), &[1, 1]);
        assert_eq!(m.row_ptr(), &[0, 1, 2]);
        assert!(m.validate().is_ok());

        let m = CsrMatrix::from_rows(&[[1.0e-300f64, 1.0], [0.0, 2.0]]);
        assert_eq!(m.scaled(1.0e-300).row_ptr(), &[0, 1, 2]);
    }

    #[test]
    fn test_scale_empty() {
        let mut m = CsrMatrix::<i32>::default();
        m.scale(5);
        assert!(m.is_empty());
        assert!(m.scaled(5).is_empty());
    }
}
