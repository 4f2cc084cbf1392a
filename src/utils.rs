//! Assorted utilities and helpers.

use ndarray::{ArrayView1, NdFloat};

use crate::policy::Schedule;

/// Pick a schedule for a table with `columns` columns split into `blocks`
/// blocks.
///
/// Used by [`crate::integrator::BlockIntegrator`] when no schedule was
/// configured. Columns are the coarser, better-balanced unit of work, so
/// blocks are only fanned out when there are more blocks than columns.
#[inline]
pub fn default_schedule(columns: usize, blocks: usize) -> Schedule {
    if columns.saturating_mul(blocks) <= 1 {
        Schedule::Serial
    } else if blocks > columns {
        Schedule::ColumnsAndBlocks
    } else {
        Schedule::Columns
    }
}

/// Index of the first sample that does not exceed its predecessor, if any.
///
/// NaN compares as not increasing.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn first_non_increasing<T: NdFloat>(x: ArrayView1<'_, T>) -> Option<usize> {
    (1..x.len()).find(|&i| !(x[i] > x[i - 1]))
}
