use alloc::vec::Vec;

use crs_scalar::Scalar;

use crate::Matrix;

/// A dense matrix stored in row-major form.
///
/// This is the rectangular input accepted by [`CsrMatrix::from_dense`] and the output of
/// [`CsrMatrix::to_dense`].
///
/// [`CsrMatrix::from_dense`]: crate::sparse::CsrMatrix::from_dense
/// [`CsrMatrix::to_dense`]: crate::sparse::CsrMatrix::to_dense
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowMajorMatrix<T> {
    /// All values, stored in row-major order.
    pub values: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> RowMajorMatrix<T> {
    /// # Panics
    /// Panics if `values.len()` is not a multiple of a non-zero `width`, or if `width` is zero and
    /// `values` is not empty.
    #[must_use]
    pub fn new(values: Vec<T>, width: usize) -> Self {
        let height = if width == 0 {
            assert!(values.is_empty(), "zero-width matrix with values");
            0
        } else {
            assert_eq!(values.len() % width, 0, "ragged row-major values");
            values.len() / width
        };
        Self {
            values,
            width,
            height,
        }
    }

    /// Like [`RowMajorMatrix::new`], but with an explicit height, so that `height x 0` shapes are
    /// representable.
    ///
    /// # Panics
    /// Panics if `values.len() != height * width`.
    #[must_use]
    pub fn with_dimensions(values: Vec<T>, height: usize, width: usize) -> Self {
        assert_eq!(values.len(), height * width, "values do not fill {height}x{width}");
        Self {
            values,
            width,
            height,
        }
    }

    /// Build from fixed-width row arrays, e.g. `&[[1, 0], [0, 2]]`.
    #[must_use]
    pub fn from_rows<const C: usize>(rows: &[[T; C]]) -> Self
    where
        T: Clone,
    {
        let values = rows.iter().flat_map(|row| row.iter().cloned()).collect();
        Self::with_dimensions(values, rows.len(), C)
    }

    pub fn row_slice(&self, r: usize) -> &[T] {
        debug_assert!(r < self.height);
        &self.values[r * self.width..(r + 1) * self.width]
    }

    /// Iterate over the rows as slices. Yields `height` (possibly empty) slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        (0..self.height).map(move |r| self.row_slice(r))
    }

    pub fn map<U, F: Fn(T) -> U>(&self, f: F) -> RowMajorMatrix<U>
    where
        T: Clone,
    {
        RowMajorMatrix {
            values: self.values.iter().map(|v| f(v.clone())).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Number of entries that are not the additive identity.
    #[must_use]
    pub fn count_nonzero(&self) -> usize
    where
        T: Scalar,
    {
        self.values.iter().filter(|v| !v.is_zero()).count()
    }

    /// The plain transpose, used as a reference for the sparse one.
    #[must_use]
    pub fn transpose(&self) -> Self
    where
        T: Clone,
    {
        let values = (0..self.width)
            .flat_map(|c| (0..self.height).map(move |r| self.values[r * self.width + c].clone()))
            .collect();
        Self::with_dimensions(values, self.width, self.height)
    }

    /// The schoolbook product `self * rhs`, used as a reference for the sparse one.
    ///
    /// # Panics
    /// Panics if `self.width() != rhs.height()`.
    #[must_use]
    pub fn matmul(&self, rhs: &Self) -> Self
    where
        T: Scalar,
    {
        assert_eq!(self.width, rhs.height, "A, B dimensions don't match");
        let mut values = alloc::vec![T::ZERO; self.height * rhs.width];
        for (out_row, a_row) in values.chunks_exact_mut(rhs.width.max(1)).zip(self.rows()) {
            for (&a, b_row) in a_row.iter().zip(rhs.rows()) {
                for (out, &b) in out_row.iter_mut().zip(b_row) {
                    *out = a.mul_acc(b, *out);
                }
            }
        }
        Self::with_dimensions(values, self.height, rhs.width)
    }
}

impl<T: Clone> Matrix<T> for RowMajorMatrix<T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn get(&self, r: usize, c: usize) -> T {
        debug_assert!(c < self.width);
        self.values[r * self.width + c].clone()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn test_new_infers_height() {
        let m = RowMajorMatrix::new(vec![1, 2, 3, 4, 5, 6], 3);
        assert_eq!(m.dimensions().height, 2);
        assert_eq!(m.row_slice(1), &[4, 5, 6]);
        assert_eq!(m.get(1, 0), 4);
    }

    #[test]
    fn test_zero_width_keeps_height() {
        let m = RowMajorMatrix::<i32>::with_dimensions(vec![], 3, 0);
        assert_eq!(m.height(), 3);
        assert_eq!(m.rows().count(), 3);
        assert!(m.rows().all(<[i32]>::is_empty));
    }

    #[test]
    fn test_transpose() {
        let m = RowMajorMatrix::from_rows(&[[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m.transpose(), RowMajorMatrix::from_rows(&[[1, 4], [2, 5], [3, 6]]));
    }

    #[test]
    fn test_mul() {
        let a = RowMajorMatrix::from_rows(&[[1, 0], [0, 2]]);
        let b = RowMajorMatrix::from_rows(&[[3, 4], [5, 6]]);
        assert_eq!(a.matmul(&b), RowMajorMatrix::from_rows(&[[3, 4], [10, 12]]));
    }

    #[test]
    fn test_mul_into_zero_width() {
        let a = RowMajorMatrix::from_rows(&[[1, 2], [3, 4]]);
        let b = RowMajorMatrix::<i32>::with_dimensions(vec![], 2, 0);
        let c = a.matmul(&b);
        assert_eq!(c.dimensions(), crate::Dimensions::new(2, 0));
    }

    #[test]
    #[should_panic]
    fn test_ragged_values() {
        let _ = RowMajorMatrix::new(vec![1, 2, 3], 2);
    }
}
