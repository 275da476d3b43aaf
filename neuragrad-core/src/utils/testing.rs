//! Assertion helpers shared by unit and integration tests.

use crate::mat::Dense;
use approx::abs_diff_eq;

/// Checks that `actual` has shape `expected_dims` and that every element is
/// within `tolerance` of `expected_data`.
/// Panics with the first offending index otherwise.
pub fn check_matrix_near(
    actual: &Dense,
    expected_dims: (usize, usize),
    expected_data: &[f64],
    tolerance: f64,
) {
    assert_eq!(actual.dims(), expected_dims, "Shape mismatch");
    check_data_near(actual.data(), expected_data, tolerance);
}

/// Element-wise comparison of two slices with an absolute tolerance.
pub fn check_data_near(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "Data length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        if !abs_diff_eq!(*a, *e, epsilon = tolerance) {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i,
                a,
                e,
                (a - e).abs(),
                tolerance
            );
        }
    }
}

/// Column vector shorthand for tests.
pub fn vec_of(data: &[f64]) -> Dense {
    Dense::new_vec(data.to_vec())
}
