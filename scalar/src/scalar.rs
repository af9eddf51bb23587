use core::fmt::{Debug, Display};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

/// An element of a sparse matrix.
///
/// The sparse algorithms only need a commutative additive group with a multiplication, plus a way
/// to recognise the additive identity: entries equal to [`Scalar::ZERO`] are never stored.
pub trait Scalar:
    'static
    + Copy
    + Default
    + Debug
    + Display
    + PartialEq
    + Send
    + Sync
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + Mul<Output = Self>
    + MulAssign
    + Neg<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;

    /// Whether this is the additive identity.
    #[inline]
    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// `self * y + acc`, the inner step of every sparse dot product.
    #[inline]
    #[must_use]
    fn mul_acc(self, y: Self, acc: Self) -> Self {
        self * y + acc
    }
}

macro_rules! impl_scalar_for_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                const ZERO: Self = 0;
                const ONE: Self = 1;
            }
        )*
    };
}

macro_rules! impl_scalar_for_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;

                // `-0.0 == 0.0`, so negative zero is never stored either.
                #[inline]
                fn is_zero(&self) -> bool {
                    *self == 0.0
                }
            }
        )*
    };
}

impl_scalar_for_int!(i8, i16, i32, i64, i128, isize);
impl_scalar_for_float!(f32, f64);
