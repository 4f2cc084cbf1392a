//! Leaf transforms for the trapezoidal rule.
//!
//! These are the three elementwise passes the cumulative integrator is built
//! from. They are crate-private: callers go through
//! [`cumulative_trapezoid`](crate::trapezoid::cumulative_trapezoid) or the
//! block integrator.

use ndarray::{Array1, ArrayView1, NdFloat};

/// Consecutive differences: `out[i] = a[i + 1] - a[i]`.
///
/// Returns an empty array for inputs shorter than two samples. Monotonicity
/// is not checked; a decreasing input yields negative widths.
#[inline]
pub(crate) fn diff<T: NdFloat>(a: ArrayView1<'_, T>) -> Array1<T> {
    let n = a.len().saturating_sub(1);
    (0..n).map(|i| a[i + 1] - a[i]).collect()
}

/// Consecutive sums: `out[i] = a[i + 1] + a[i]`.
///
/// Twice the mean trapezoid height; the half is applied by the caller.
#[inline]
pub(crate) fn pair_sum<T: NdFloat>(a: ArrayView1<'_, T>) -> Array1<T> {
    let n = a.len().saturating_sub(1);
    (0..n).map(|i| a[i + 1] + a[i]).collect()
}

/// Inclusive running sum.
///
/// # Panics
/// Panics if `a` is empty.
#[inline]
pub(crate) fn prefix_sum<T: NdFloat>(a: ArrayView1<'_, T>) -> Array1<T> {
    assert!(!a.is_empty(), "prefix sum requires a non-empty input");
    let mut out = Array1::from_elem(a.len(), a[0]);
    for i in 1..a.len() {
        out[i] = out[i - 1] + a[i];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn diff_of_grid() {
        let x = array![0.0, 1.0, 3.0, 6.0];
        assert_eq!(diff(x.view()), array![1.0, 2.0, 3.0]);
    }

    #[test]
    fn diff_keeps_sign_of_decreasing_input() {
        let x = array![2.0, 1.0, 1.0];
        assert_eq!(diff(x.view()), array![-1.0, 0.0]);
    }

    #[test]
    fn short_inputs_give_empty_outputs() {
        let one = array![4.0f64];
        assert!(diff(one.view()).is_empty());
        assert!(pair_sum(one.view()).is_empty());
        let none = Array1::<f64>::zeros(0);
        assert!(diff(none.view()).is_empty());
    }

    #[test]
    fn pair_sum_of_values() {
        let f = array![1.0f32, 2.0, 4.0];
        assert_eq!(pair_sum(f.view()), array![3.0f32, 6.0]);
    }

    #[test]
    fn prefix_sum_is_inclusive() {
        let a = array![1.0, 1.0, 2.0, 0.5];
        assert_eq!(prefix_sum(a.view()), array![1.0, 2.0, 4.0, 4.5]);
        assert_eq!(prefix_sum(array![7.0].view()), array![7.0]);
    }

    #[test]
    fn prefix_sum_works_on_strided_views() {
        let a = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]];
        assert_eq!(prefix_sum(a.column(1)), array![10.0, 30.0, 60.0]);
    }

    #[test]
    #[should_panic(expected = "non-empty")]
    fn prefix_sum_panics_on_empty() {
        let none = Array1::<f64>::zeros(0);
        let _ = prefix_sum(none.view());
    }
}
