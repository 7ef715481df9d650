use approx::assert_relative_eq;

use crate::{explain, Entry, Error, ErrorKind, Options};

use super::*;

#[test]
fn test_two_by_two() {
    let a = dmatrix![
        4.0, 3.0;
        6.0, 3.0;
    ];
    let ex = explain(&a, None, &Options::default()).unwrap();

    assert_eq!(ex.l, dmatrix![1.0, 0.0; 1.5, 1.0]);
    assert_eq!(ex.u, dmatrix![4.0, 3.0; 0.0, -1.5]);
    assert_eq!(ex.reference, Some(dvector![1.0, 1.0]));
    assert_eq!(ex.b, dvector![7.0, 9.0]);
    assert_eq!(ex.y, dvector![7.0, -1.5]);
    assert_eq!(ex.x, dvector![1.0, 1.0]);
}

#[test]
fn test_singular_pivot() {
    let a = dmatrix![
        2.0, 1.0;
        4.0, 2.0;
    ];
    let err = explain(&a, None, &Options::default()).unwrap_err();
    assert_eq!(err, Error::Linear(linear::Error::SingularMatrix { index: 1 }));
    assert_eq!(err.kind(), ErrorKind::SingularMatrix);
}

#[test_log::test]
fn test_supplied_rhs() {
    let a = dmatrix![
        1.0, 2.0, 3.0;
        4.0, 5.0, 6.0;
        7.0, 8.0, 10.0;
    ];
    let b = dvector![6.0, 15.0, 25.0];
    let ex = explain(&a, Some(&b), &Options::default()).unwrap();

    assert_relative_eq!(ex.x, dvector![1.0, 1.0, 1.0], epsilon = 1e-6);
    assert_eq!(ex.reference, None);
    assert_eq!(ex.rendered.reference, None);
    assert_eq!(ex.b, b);
}

#[test]
fn test_not_square() {
    let a = dmatrix![
        1.0, 2.0, 3.0;
        4.0, 5.0, 6.0;
    ];
    let err = explain(&a, None, &Options::default()).unwrap_err();
    assert_eq!(err, Error::Linear(linear::Error::NotSquare { nrows: 2, ncols: 3 }));
    assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
}

#[test]
fn test_rhs_length() {
    // Reported even though this matrix would also fail to factor.
    let a = dmatrix![
        2.0, 1.0;
        4.0, 2.0;
    ];
    let err = explain(&a, Some(&dvector![1.0, 2.0, 3.0]), &Options::default()).unwrap_err();
    assert_eq!(
        err,
        Error::Linear(linear::Error::RhsLength {
            expected: 2,
            got: 3
        })
    );
}

#[test]
fn test_factors_reproduce_matrix() {
    for n in 1..=8 {
        let a = dominant(n);
        let ex = explain(&a, None, &Options::default()).unwrap();

        for i in 0..n {
            assert_eq!(ex.l[(i, i)], 1.0);
            for j in (i + 1)..n {
                assert_eq!(ex.l[(i, j)], 0.0);
                assert_eq!(ex.u[(j, i)], 0.0);
            }
        }
        assert_relative_eq!(&ex.l * &ex.u, a, epsilon = 1e-10);
    }
}

#[test]
fn test_recovers_reference_solution() {
    for n in 1..=8 {
        let ex = explain(&dominant(n), None, &Options::default()).unwrap();
        let reference = ex.reference.clone().unwrap();
        assert_eq!(reference, DVector::from_element(n, 1.0));
        assert_relative_eq!(ex.x, reference, epsilon = 1e-9);
    }
}

#[test]
fn test_record_counts_and_order() {
    let n = 4;
    let ex = explain(&dominant(n), None, &Options::default()).unwrap();

    assert_eq!(ex.u_steps.len(), n * (n + 1) / 2);
    assert_eq!(ex.l_steps.len(), n * (n + 1) / 2);
    assert_eq!(ex.y_steps.len(), n);
    assert_eq!(ex.x_steps.len(), n);
    assert_eq!(ex.records().count(), n * (n + 1) + 2 * n);

    let y_entries = ex.y_steps.iter().map(|r| r.entry()).collect::<Vec<_>>();
    assert_eq!(y_entries, (0..n).map(Entry::Y).collect::<Vec<_>>());
    let x_entries = ex.x_steps.iter().map(|r| r.entry()).collect::<Vec<_>>();
    assert_eq!(x_entries, (0..n).rev().map(Entry::X).collect::<Vec<_>>());

    let first = ex.records().next().unwrap();
    assert_eq!(first.entry(), Entry::U(0, 0));
    let last = ex.records().last().unwrap();
    assert_eq!(last.entry(), Entry::X(0));
}
