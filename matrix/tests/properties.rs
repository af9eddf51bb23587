mod common;

use crs_matrix::sparse::CsrMatrix;
use proptest::prelude::*;

use crate::common::{assert_canonical, dense, sparse};

fn same_shape_pair() -> impl Strategy<Value = (CsrMatrix<i64>, CsrMatrix<i64>)> {
    (0usize..7, 0usize..7).prop_flat_map(|(h, w)| (sparse(h, w), sparse(h, w)))
}

fn same_shape_triple() -> impl Strategy<Value = (CsrMatrix<i64>, CsrMatrix<i64>, CsrMatrix<i64>)> {
    (0usize..6, 0usize..6).prop_flat_map(|(h, w)| (sparse(h, w), sparse(h, w), sparse(h, w)))
}

fn chained_pair() -> impl Strategy<Value = (CsrMatrix<i64>, CsrMatrix<i64>)> {
    (0usize..7, 0usize..7, 0usize..7).prop_flat_map(|(n, k, m)| (sparse(n, k), sparse(k, m)))
}

proptest! {
    #[test]
    fn prop_dense_round_trip(d in (0usize..8, 0usize..8).prop_flat_map(|(h, w)| dense(h, w))) {
        let m = CsrMatrix::from_dense(&d);
        assert_canonical(&m);
        prop_assert_eq!(m.nnz(), d.count_nonzero());
        prop_assert_eq!(m.to_dense(), d);
    }

    #[test]
    fn prop_add_zero_is_identity((a, _) in same_shape_pair()) {
        let zero = CsrMatrix::zeros(a.rows(), a.cols());
        prop_assert_eq!(&a + &zero, a);
    }

    #[test]
    fn prop_sub_self_is_zero((a, _) in same_shape_pair()) {
        let diff = &a - &a;
        assert_canonical(&diff);
        prop_assert!(diff.is_zero_matrix());
        prop_assert_eq!(diff.dim(), a.dim());
    }

    #[test]
    fn prop_add_commutes((a, b) in same_shape_pair()) {
        let ab = &a + &b;
        assert_canonical(&ab);
        prop_assert_eq!(ab, &b + &a);
    }

    #[test]
    fn prop_add_associates((a, b, c) in same_shape_triple()) {
        prop_assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
    }

    #[test]
    fn prop_sub_is_add_neg((a, b) in same_shape_pair()) {
        let diff = &a - &b;
        assert_canonical(&diff);
        prop_assert_eq!(&diff + &b, a.clone());
        prop_assert_eq!(diff, &a + &(-&b));
    }

    #[test]
    fn prop_transpose_involution(a in (0usize..8, 0usize..8).prop_flat_map(|(h, w)| sparse(h, w))) {
        let t = a.transpose();
        assert_canonical(&t);
        prop_assert_eq!(t.to_dense(), a.to_dense().transpose());
        prop_assert_eq!(t.transpose(), a);
    }

    #[test]
    fn prop_mul_matches_dense((a, b) in chained_pair()) {
        let c = a.matmul(&b).unwrap();
        assert_canonical(&c);
        prop_assert_eq!(c.to_dense(), a.to_dense().matmul(&b.to_dense()));
    }

    #[test]
    fn prop_mul_transpose_reverses((a, b) in chained_pair()) {
        let lhs = (&a * &b).transpose();
        let rhs = &b.transpose() * &a.transpose();
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn prop_scale_distributes((a, b) in same_shape_pair(), s in -3i64..=3) {
        let scaled = &(&a + &b) * s;
        assert_canonical(&scaled);
        prop_assert_eq!(scaled, &(&a * s) + &(&b * s));
    }
}
