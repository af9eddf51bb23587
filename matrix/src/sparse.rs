use alloc::vec;
use alloc::vec::Vec;
use core::iter;
use core::mem;
use core::ops::Range;

use crs_scalar::Scalar;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use tracing::{instrument, trace};

use crate::dense::RowMajorMatrix;
use crate::{Dimensions, Matrix, MatrixError, MatrixResult};

/// A sparse matrix stored in the compressed sparse row format.
///
/// Three buffers describe the stored entries:
/// - `values[k]` is the `k`th stored value, in row-major order,
/// - `col_indices[k]` is its column,
/// - `row_ptr[i]..row_ptr[i + 1]` is the range of `values`/`col_indices` belonging to row `i`.
///
/// Within a row the columns are strictly ascending, and no stored value is zero. Every
/// constructor and operation preserves both properties, which is what lets addition and
/// multiplication run as linear merges.
///
/// A matrix with an unallocated `row_ptr` is *empty*: no matrix has been assigned. This is the
/// [`Default`] state and differs from a valid matrix that merely has no rows or no non-zeros.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsrMatrix<T> {
    height: usize,
    width: usize,
    values: Vec<T>,
    col_indices: Vec<usize>,
    row_ptr: Vec<usize>,
}

// Written out so that the empty state does not require `T: Default`.
impl<T> Default for CsrMatrix<T> {
    fn default() -> Self {
        Self {
            height: 0,
            width: 0,
            values: Vec::new(),
            col_indices: Vec::new(),
            row_ptr: Vec::new(),
        }
    }
}

impl<T> CsrMatrix<T> {
    /// Assemble a matrix from buffers that the caller guarantees to be canonical.
    pub(crate) fn from_parts_unchecked(
        height: usize,
        width: usize,
        row_ptr: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        debug_assert_eq!(row_ptr.len(), height + 1);
        debug_assert_eq!(row_ptr.last().copied(), Some(values.len()));
        debug_assert_eq!(col_indices.len(), values.len());
        Self {
            height,
            width,
            values,
            col_indices,
            row_ptr,
        }
    }

    /// Give the three buffers back to the caller as `(row_ptr, col_indices, values)`, leaving
    /// nothing behind.
    #[must_use]
    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>, Vec<T>) {
        (self.row_ptr, self.col_indices, self.values)
    }

    /// Move the contents out of `self`, leaving `self` empty.
    ///
    /// No buffer is copied: the returned matrix owns the buffers `self` used to own.
    #[must_use]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Release all buffers and return to the empty state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> Dimensions {
        Dimensions::new(self.height, self.width)
    }

    #[inline]
    #[must_use]
    pub fn same_shape<U>(&self, other: &CsrMatrix<U>) -> bool {
        self.dim() == other.dim()
    }

    /// Whether no matrix has been assigned (see the type-level docs).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_ptr.is_empty()
    }

    /// Whether there are no stored entries, i.e. every element is zero.
    #[inline]
    #[must_use]
    pub fn is_zero_matrix(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of stored entries.
    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[must_use]
    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    #[must_use]
    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    #[inline]
    pub(crate) fn row_index_range(&self, r: usize) -> Range<usize> {
        debug_assert!(r < self.height);
        self.row_ptr[r]..self.row_ptr[r + 1]
    }

    /// Number of stored entries in row `r`.
    #[inline]
    #[must_use]
    pub fn row_nnz(&self, r: usize) -> usize {
        self.row_index_range(r).len()
    }

    #[must_use]
    pub fn row_col_indices(&self, r: usize) -> &[usize] {
        &self.col_indices[self.row_index_range(r)]
    }

    #[must_use]
    pub fn row_values(&self, r: usize) -> &[T] {
        &self.values[self.row_index_range(r)]
    }

    /// Callers must not store zeros through this.
    pub(crate) fn row_values_mut(&mut self, r: usize) -> &mut [T] {
        let range = self.row_index_range(r);
        &mut self.values[range]
    }

    /// The stored `(col, value)` pairs of row `r`, in ascending column order.
    pub fn sparse_row(&self, r: usize) -> impl Iterator<Item = (usize, &T)> {
        let range = self.row_index_range(r);
        self.col_indices[range.clone()]
            .iter()
            .copied()
            .zip(&self.values[range])
    }

    /// Check every structural invariant, reporting the first one violated.
    pub fn validate(&self) -> MatrixResult<()>
    where
        T: Scalar,
    {
        if self.is_empty() {
            return if self.height == 0 && self.width == 0 && self.values.is_empty() {
                Ok(())
            } else {
                Err(MatrixError::InvalidLayout {
                    reason: "empty matrix with non-zero shape or stored values",
                })
            };
        }
        validate_layout(
            self.height,
            self.width,
            &self.row_ptr,
            &self.col_indices,
            &self.values,
        )
    }
}

impl<T: Scalar> CsrMatrix<T> {
    /// A valid `height x width` matrix with no stored entries.
    #[must_use]
    pub fn zeros(height: usize, width: usize) -> Self {
        Self::from_parts_unchecked(height, width, vec![0; height + 1], Vec::new(), Vec::new())
    }

    /// The `n x n` identity.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        Self::from_parts_unchecked(n, n, (0..=n).collect(), (0..n).collect(), vec![T::ONE; n])
    }

    /// Build a matrix from raw buffers, checking that they describe a canonical CSR layout.
    pub fn from_parts(
        height: usize,
        width: usize,
        row_ptr: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
    ) -> MatrixResult<Self> {
        validate_layout(height, width, &row_ptr, &col_indices, &values)?;
        Ok(Self::from_parts_unchecked(
            height,
            width,
            row_ptr,
            col_indices,
            values,
        ))
    }

    /// Convert a dense matrix, keeping exactly its non-zero cells.
    #[instrument(level = "debug", skip_all, fields(dims = %dense.dimensions()))]
    pub fn from_dense(dense: &RowMajorMatrix<T>) -> Self {
        let nnz = dense.count_nonzero();
        trace!(nnz, "sized dense conversion");

        let mut values = Vec::with_capacity(nnz);
        let mut col_indices = Vec::with_capacity(nnz);
        let mut row_ptr = Vec::with_capacity(dense.height() + 1);
        row_ptr.push(0);

        for row in dense.rows() {
            for (c, &v) in row.iter().enumerate() {
                if !v.is_zero() {
                    values.push(v);
                    col_indices.push(c);
                }
            }
            row_ptr.push(values.len());
        }
        debug_assert_eq!(values.len(), nnz);

        Self::from_parts_unchecked(dense.height(), dense.width(), row_ptr, col_indices, values)
    }

    /// Convert fixed-width row arrays, e.g. `&[[0, 0], [5, 0]]`.
    #[must_use]
    pub fn from_rows<const C: usize>(rows: &[[T; C]]) -> Self {
        Self::from_dense(&RowMajorMatrix::from_rows(rows))
    }

    /// Reconstruct the zero-filled dense matrix.
    #[must_use]
    pub fn to_dense(&self) -> RowMajorMatrix<T> {
        let values = (0..self.height).flat_map(|r| self.dense_row(r)).collect();
        RowMajorMatrix::with_dimensions(values, self.height, self.width)
    }

    /// Row `r` with the implicit zeros filled in.
    ///
    /// Walks columns `0..width` with a cursor over the stored entries; once the cursor reaches the
    /// end of the row, every remaining column is zero.
    pub fn dense_row(&self, r: usize) -> impl Iterator<Item = T> + '_ {
        let mut stored = self.sparse_row(r).peekable();
        (0..self.width).map(move |c| match stored.next_if(|&(col, _)| col == c) {
            Some((_, &v)) => v,
            None => T::ZERO,
        })
    }

    /// A random canonical matrix with at most `row_weight` stored entries per row.
    ///
    /// Columns drawn twice and values drawn as zero are dropped, so rows may be lighter. A
    /// `row_weight` above `width` is treated as `width`.
    pub fn rand<R: Rng>(rng: &mut R, height: usize, width: usize, row_weight: usize) -> Self
    where
        StandardUniform: Distribution<T>,
    {
        if width == 0 {
            return Self::zeros(height, width);
        }
        let row_weight = row_weight.min(width);
        let mut row_ptr = Vec::with_capacity(height + 1);
        let capacity = height.saturating_mul(row_weight);
        let mut col_indices = Vec::with_capacity(capacity);
        let mut values = Vec::with_capacity(capacity);
        row_ptr.push(0);

        for _ in 0..height {
            let mut cols: Vec<usize> = iter::repeat_with(|| rng.random_range(0..width))
                .take(row_weight)
                .collect();
            cols.sort_unstable();
            cols.dedup();
            for c in cols {
                let v: T = rng.random();
                if !v.is_zero() {
                    col_indices.push(c);
                    values.push(v);
                }
            }
            row_ptr.push(values.len());
        }

        Self::from_parts_unchecked(height, width, row_ptr, col_indices, values)
    }
}

impl<T: Scalar> From<&RowMajorMatrix<T>> for CsrMatrix<T> {
    fn from(dense: &RowMajorMatrix<T>) -> Self {
        Self::from_dense(dense)
    }
}

impl<T: Scalar> From<RowMajorMatrix<T>> for CsrMatrix<T> {
    fn from(dense: RowMajorMatrix<T>) -> Self {
        Self::from_dense(&dense)
    }
}

impl<T: Scalar> From<&CsrMatrix<T>> for RowMajorMatrix<T> {
    fn from(sparse: &CsrMatrix<T>) -> Self {
        sparse.to_dense()
    }
}

impl<T: Scalar> Matrix<T> for CsrMatrix<T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get(&self, r: usize, c: usize) -> T {
        assert!(c < self.width, "column {c} out of bounds for width {}", self.width);
        let range = self.row_index_range(r);
        match self.col_indices[range.clone()].binary_search(&c) {
            Ok(k) => self.values[range.start + k],
            Err(_) => T::ZERO,
        }
    }
}

fn validate_layout<T: Scalar>(
    height: usize,
    width: usize,
    row_ptr: &[usize],
    col_indices: &[usize],
    values: &[T],
) -> MatrixResult<()> {
    let invalid = |reason| Err(MatrixError::InvalidLayout { reason });

    if row_ptr.len() != height + 1 {
        return invalid("row pointer length must be height + 1");
    }
    if col_indices.len() != values.len() {
        return invalid("column indices and values must have equal length");
    }
    if row_ptr[0] != 0 {
        return invalid("first row pointer must be 0");
    }
    if row_ptr[height] != values.len() {
        return invalid("last row pointer must equal the number of stored entries");
    }
    if row_ptr.windows(2).any(|w| w[0] > w[1]) {
        return invalid("row pointers must be non-decreasing");
    }
    for w in row_ptr.windows(2) {
        let cols = &col_indices[w[0]..w[1]];
        if cols.windows(2).any(|p| p[0] >= p[1]) {
            return invalid("column indices must be strictly ascending within each row");
        }
        if cols.last().is_some_and(|&c| c >= width) {
            return invalid("column index out of bounds");
        }
    }
    if values.iter().any(Scalar::is_zero) {
        return invalid("stored values must be non-zero");
    }
    Ok(())
}
