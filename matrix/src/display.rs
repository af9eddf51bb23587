use core::fmt::{self, Display, Formatter};

use crs_scalar::Scalar;

use crate::sparse::CsrMatrix;

/// Prints the three backing buffers of a [`CsrMatrix`], for debugging.
///
/// ```text
/// V = [ 5, 8, 3, 6, ]
/// COL_INDEX = [ 0, 1, 2, 1, ]
/// ROW_INDEX = [ 0, 0, 2, 3, 4, ]
/// ```
pub struct RawDump<'a, T>(&'a CsrMatrix<T>);

fn write_buffer<V: Display>(f: &mut Formatter<'_>, name: &str, buffer: &[V]) -> fmt::Result {
    write!(f, "{name} = [ ")?;
    for v in buffer {
        write!(f, "{v}, ")?;
    }
    writeln!(f, "]")
}

impl<T: Display> Display for RawDump<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_buffer(f, "V", self.0.values())?;
        write_buffer(f, "COL_INDEX", self.0.col_indices())?;
        write_buffer(f, "ROW_INDEX", self.0.row_ptr())
    }
}

impl<T> CsrMatrix<T> {
    #[must_use]
    pub fn raw_dump(&self) -> RawDump<'_, T> {
        RawDump(self)
    }
}

/// The dense grid, one line per row, zeros filled in.
impl<T: Scalar> Display for CsrMatrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows() {
            for (c, v) in self.dense_row(r).enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{v}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
