//! Normalized cumulative trapezoidal integration of a single segment.
//!
//! For samples `f` on coordinates `x` (both of length n ≥ 2) the composite
//! trapezoidal rule gives n − 1 partial areas
//!
//! ```text
//! area[i] = (x[i+1] - x[i]) * (f[i+1] + f[i]) / 2
//! ```
//!
//! whose running sum, divided by the total, is the CDF at `x[1..n]`. The CDF
//! at `x[0]` is zero by construction and is not part of the output.

use ndarray::{Array1, ArrayView1, ArrayViewMut1, NdFloat};

use crate::error::{IntegrationError, Result};
use crate::kernels::{diff, pair_sum, prefix_sum};
use crate::policy::Degeneracy;

/// Outcome of integrating one segment into an output slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment {
    /// The output holds a CDF ending at exactly one.
    Normalized,
    /// The total area was zero or not finite; the output was handled
    /// according to the degeneracy policy.
    Degenerate,
}

/// Integrate `f` over `x` and write the normalized CDF into `out`.
///
/// `out` must have length `n - 1`. Under [`Degeneracy::Propagate`] the
/// division by the total always happens; under the other policies a
/// degenerate segment leaves `out` all zero.
pub(crate) fn integrate_segment_into<T: NdFloat>(
    f: ArrayView1<'_, T>,
    x: ArrayView1<'_, T>,
    mut out: ArrayViewMut1<'_, T>,
    policy: Degeneracy,
) -> Segment {
    debug_assert_eq!(f.len(), x.len());
    debug_assert_eq!(out.len() + 1, f.len());

    let two = T::one() + T::one();
    let widths = diff(x);
    let heights = pair_sum(f);
    let areas: Array1<T> = widths
        .iter()
        .zip(heights.iter())
        .map(|(&w, &h)| w * h / two)
        .collect();
    let cumulative = prefix_sum(areas.view());
    let total = cumulative[cumulative.len() - 1];

    let degenerate = total == T::zero() || !total.is_finite();
    if degenerate && policy != Degeneracy::Propagate {
        out.fill(T::zero());
        return Segment::Degenerate;
    }
    for (dst, &partial) in out.iter_mut().zip(cumulative.iter()) {
        *dst = partial / total;
    }
    if degenerate {
        Segment::Degenerate
    } else {
        Segment::Normalized
    }
}

fn check_segment<T>(f: &ArrayView1<'_, T>, x: &ArrayView1<'_, T>) {
    assert_eq!(
        f.len(),
        x.len(),
        "values and coordinates must have the same length"
    );
    assert!(
        f.len() >= 2,
        "a segment needs at least two samples to form a trapezoid"
    );
}

/// Cumulatively integrate `f(x)` with the composite trapezoidal rule and
/// normalize so the last value is one.
///
/// Returns n − 1 values: the CDF at `x[1]`, ..., `x[n-1]`. A segment with
/// zero or non-finite total area yields all zeros ([`Degeneracy::ZeroFill`]).
///
/// ```
/// use ndarray::array;
/// use trapz_blocks::cumulative_trapezoid;
///
/// let x = array![0.0, 1.0, 2.0, 3.0];
/// let f = array![1.0, 1.0, 1.0, 1.0];
/// let cdf = cumulative_trapezoid(f.view(), x.view());
/// assert_eq!(cdf.len(), 3);
/// assert_eq!(cdf[2], 1.0);
/// ```
///
/// # Panics
/// Panics if `f` and `x` differ in length or hold fewer than two samples.
pub fn cumulative_trapezoid<T: NdFloat>(
    f: ArrayView1<'_, T>,
    x: ArrayView1<'_, T>,
) -> Array1<T> {
    check_segment(&f, &x);
    let mut out = Array1::from_elem(f.len() - 1, T::zero());
    integrate_segment_into(f, x, out.view_mut(), Degeneracy::ZeroFill);
    out
}

/// [`cumulative_trapezoid`] with an explicit degeneracy policy.
///
/// Under [`Degeneracy::Reject`] a degenerate segment is reported as
/// [`IntegrationError::DegenerateBlock`] with block and column zero.
///
/// # Panics
/// Panics if `f` and `x` differ in length or hold fewer than two samples.
pub fn cumulative_trapezoid_with<T: NdFloat>(
    f: ArrayView1<'_, T>,
    x: ArrayView1<'_, T>,
    policy: Degeneracy,
) -> Result<Array1<T>> {
    check_segment(&f, &x);
    let mut out = Array1::from_elem(f.len() - 1, T::zero());
    match integrate_segment_into(f, x, out.view_mut(), policy) {
        Segment::Degenerate if policy == Degeneracy::Reject => {
            Err(IntegrationError::DegenerateBlock {
                block: 0,
                column: 0,
            })
        }
        _ => Ok(out),
    }
}
