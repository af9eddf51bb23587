//! Scalar element types for sparse matrices.

#![no_std]

#[cfg(test)]
extern crate std;

mod scalar;

pub use scalar::*;
