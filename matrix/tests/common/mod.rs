#![allow(dead_code)]

use crs_matrix::dense::RowMajorMatrix;
use crs_matrix::sparse::CsrMatrix;
use proptest::prelude::*;
use tracing_forest::ForestLayer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Install a forest-style subscriber; `RUST_LOG=debug` shows the operation spans.
pub fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    // Several tests in one binary race to install it; the first one wins.
    let _ = Registry::default()
        .with(env_filter)
        .with(ForestLayer::default())
        .try_init();
}

/// Mostly-zero dense matrices with small entries, so sums and products never overflow.
pub fn dense(height: usize, width: usize) -> impl Strategy<Value = RowMajorMatrix<i64>> {
    prop::collection::vec(prop_oneof![3 => Just(0i64), 2 => -4i64..=4], height * width)
        .prop_map(move |values| RowMajorMatrix::with_dimensions(values, height, width))
}

pub fn sparse(height: usize, width: usize) -> impl Strategy<Value = CsrMatrix<i64>> {
    dense(height, width).prop_map(|d| CsrMatrix::from_dense(&d))
}

/// The structural invariants every matrix must satisfy.
pub fn assert_canonical(m: &CsrMatrix<i64>) {
    if m.is_empty() {
        assert_eq!((m.rows(), m.cols(), m.nnz()), (0, 0, 0));
        return;
    }
    assert_eq!(m.row_ptr().len(), m.rows() + 1);
    assert_eq!(m.row_ptr()[0], 0);
    assert_eq!(m.row_ptr()[m.rows()], m.nnz());
    assert_eq!(m.values().len(), m.nnz());
    assert_eq!(m.col_indices().len(), m.nnz());
    for r in 0..m.rows() {
        let cols = m.row_col_indices(r);
        assert!(cols.windows(2).all(|w| w[0] < w[1]), "row {r} not strictly ascending");
        assert!(cols.iter().all(|&c| c < m.cols()));
    }
    assert!(m.values().iter().all(|&v| v != 0), "explicit zero stored");
    assert!(m.validate().is_ok());
}
