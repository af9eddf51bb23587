//! Compressed sparse-row matrices.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

use core::fmt::{Display, Formatter};

pub mod dense;
mod display;
mod error;
mod merge;
mod mul;
mod scale;
pub mod sparse;
mod transpose;

pub use display::RawDump;
pub use error::{MatrixError, MatrixResult};

/// The shape of a matrix: `height` rows by `width` columns.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub height: usize,
    pub width: usize,
}

impl Dimensions {
    #[must_use]
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

pub trait Matrix<T> {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn dimensions(&self) -> Dimensions {
        Dimensions {
            height: self.height(),
            width: self.width(),
        }
    }

    /// The element at row `r`, column `c`.
    ///
    /// # Panics
    /// May panic if `r` or `c` is out of bounds.
    fn get(&self, r: usize, c: usize) -> T;
}
