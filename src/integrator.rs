//! Blockwise cumulative integration of a 2-D table.
//!
//! The table `f` has shape (N, M): N samples along the integration axis and
//! M independent columns. A [`BlockPartition`] splits the axis into
//! contiguous blocks, and every (block, column) cell is integrated and
//! normalized on its own. Cells never share output memory: each column view
//! is carved with `split_at` into one slice per block, so the cells can run
//! on any thread without locks.

use ndarray::{s, Array2, ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2, Axis, NdFloat};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::blocks::{BlockPartition, BlockRange};
use crate::builder::BlockIntegratorBuilder;
use crate::error::{IntegrationError, Result};
use crate::policy::{Degeneracy, Schedule};
use crate::trapezoid::{integrate_segment_into, Segment};
use crate::utils::{default_schedule, first_non_increasing};

/// Cumulatively integrate every column of `f` over the blocks delimited by
/// `block_references`, using the default [`BlockIntegrator`].
///
/// Row `start` of each block stays zero and rows `start + 1 .. stop` hold the
/// block's CDF, ending at exactly one. Rows outside every block stay zero.
///
/// ```
/// use ndarray::{array, Array2};
/// use trapz_blocks::integrate_by_blocks;
///
/// let x = array![0.0, 1.0, 2.0, 3.0];
/// let f = Array2::from_elem((4, 1), 1.0);
/// let integrated = integrate_by_blocks(f.view(), x.view(), &[0, 4]);
/// assert_eq!(integrated[[0, 0]], 0.0);
/// assert_eq!(integrated[[3, 0]], 1.0);
/// ```
///
/// # Panics
/// Panics if `x` does not have one entry per row of `f`, or if
/// `block_references` is unsorted, out of bounds, or describes a block with
/// fewer than two samples. Use [`BlockIntegrator::integrate`] to get these as
/// errors instead.
pub fn integrate_by_blocks<T: NdFloat>(
    f: ArrayView2<'_, T>,
    x: ArrayView1<'_, T>,
    block_references: &[usize],
) -> Array2<T> {
    match BlockIntegrator::new().integrate(f, x, block_references) {
        Ok(integrated) => integrated,
        Err(err) => panic!("integrate_by_blocks: {err}"),
    }
}

/// Configurable blockwise integrator.
///
/// The integrator holds configuration only; every call is independent.
///
/// ```
/// use ndarray::{array, Array2};
/// use trapz_blocks::{BlockIntegrator, Degeneracy, IntegrationError};
///
/// let integrator = BlockIntegrator::builder()
///     .with_degeneracy(Degeneracy::Reject)
///     .build();
/// let x = array![0.0, 1.0, 2.0];
/// let f = Array2::<f64>::from_elem((3, 2), 0.0);
/// let err = integrator.integrate(f.view(), x.view(), &[0, 3]).unwrap_err();
/// assert!(matches!(err, IntegrationError::DegenerateBlock { block: 0, .. }));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BlockIntegrator {
    degeneracy: Degeneracy,
    schedule: Option<Schedule>,
    check_coordinates: bool,
}

impl BlockIntegrator {
    /// Integrator with the default policy and an automatic schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start configuring an integrator.
    pub fn builder() -> BlockIntegratorBuilder {
        BlockIntegratorBuilder::new()
    }

    pub(crate) fn from_parts(
        degeneracy: Degeneracy,
        schedule: Option<Schedule>,
        check_coordinates: bool,
    ) -> Self {
        Self {
            degeneracy,
            schedule,
            check_coordinates,
        }
    }

    /// Policy applied to blocks with zero or non-finite total area.
    pub fn degeneracy(&self) -> Degeneracy {
        self.degeneracy
    }

    /// Configured schedule; `None` means [`default_schedule`] per call.
    pub fn schedule(&self) -> Option<Schedule> {
        self.schedule
    }

    /// Whether coordinates are checked for strict increase inside blocks.
    pub fn checks_coordinates(&self) -> bool {
        self.check_coordinates
    }

    /// Integrate `f` over the blocks in `block_references` into a fresh,
    /// zero-filled table of the same shape.
    ///
    /// Under [`Degeneracy::Reject`] the reported cell is the degenerate one
    /// with the lowest column, then the lowest block, whatever the schedule.
    pub fn integrate<T: NdFloat>(
        &self,
        f: ArrayView2<'_, T>,
        x: ArrayView1<'_, T>,
        block_references: &[usize],
    ) -> Result<Array2<T>> {
        let partition = BlockPartition::new(block_references, f.nrows())?;
        self.integrate_partition(f, x, &partition)
    }

    /// Like [`integrate`](Self::integrate) with a partition validated
    /// beforehand, for callers integrating several tables over the same
    /// blocks.
    pub fn integrate_partition<T: NdFloat>(
        &self,
        f: ArrayView2<'_, T>,
        x: ArrayView1<'_, T>,
        partition: &BlockPartition,
    ) -> Result<Array2<T>> {
        if partition.rows() != f.nrows() {
            return Err(IntegrationError::PartitionMismatch {
                partition_rows: partition.rows(),
                rows: f.nrows(),
            });
        }
        self.validate(f, x, partition)?;
        let mut integrated = Array2::from_elem(f.dim(), T::zero());
        self.write_partition(f, x, partition, integrated.view_mut())?;
        Ok(integrated)
    }

    /// Integrate into a caller-owned table of the same shape as `f`.
    ///
    /// On success `out` matches [`integrate`](Self::integrate) regardless of
    /// its previous contents. On error `out` is left untouched.
    pub fn integrate_into<T: NdFloat>(
        &self,
        f: ArrayView2<'_, T>,
        x: ArrayView1<'_, T>,
        block_references: &[usize],
        mut out: ArrayViewMut2<'_, T>,
    ) -> Result<()> {
        if out.dim() != f.dim() {
            return Err(IntegrationError::OutputShapeMismatch {
                expected: f.dim(),
                actual: out.dim(),
            });
        }
        let partition = BlockPartition::new(block_references, f.nrows())?;
        self.validate(f, x, &partition)?;
        if self.degeneracy == Degeneracy::Reject {
            // A rejected block is only found mid-write; stage the result.
            let mut staged = Array2::from_elem(f.dim(), T::zero());
            self.write_partition(f, x, &partition, staged.view_mut())?;
            out.assign(&staged);
            return Ok(());
        }
        out.fill(T::zero());
        self.write_partition(f, x, &partition, out)
    }

    /// Checks that must pass before any output is written.
    fn validate<T: NdFloat>(
        &self,
        f: ArrayView2<'_, T>,
        x: ArrayView1<'_, T>,
        partition: &BlockPartition,
    ) -> Result<()> {
        let rows = f.nrows();
        if x.len() != rows {
            return Err(IntegrationError::ShapeMismatch {
                rows,
                coordinates: x.len(),
            });
        }
        if self.check_coordinates {
            check_coordinates(x, partition)?;
        }
        Ok(())
    }

    fn write_partition<T: NdFloat>(
        &self,
        f: ArrayView2<'_, T>,
        x: ArrayView1<'_, T>,
        partition: &BlockPartition,
        mut out: ArrayViewMut2<'_, T>,
    ) -> Result<()> {
        let columns = f.ncols();
        let schedule = self
            .schedule
            .unwrap_or_else(|| default_schedule(columns, partition.len()));
        let policy = self.degeneracy;

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "integrate_by_blocks",
            rows = f.nrows(),
            columns,
            blocks = partition.len(),
            ?schedule
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();
        #[cfg(feature = "tracing")]
        let parent = tracing::Span::current();

        let tasks: Vec<_> = out
            .axis_iter_mut(Axis(1))
            .zip(f.axis_iter(Axis(1)))
            .enumerate()
            .collect();

        let rejected = lowest_rejected_cell(
            tasks,
            schedule.parallel_columns(),
            |(column, (out_column, f_column))| {
                #[cfg(feature = "tracing")]
                let _guard =
                    tracing::trace_span!(parent: &parent, "integrate_column", column).entered();
                integrate_column(
                    column,
                    f_column,
                    x,
                    out_column,
                    partition,
                    policy,
                    schedule.parallel_blocks(),
                )
            },
        );
        match rejected {
            Some((column, block)) => Err(IntegrationError::DegenerateBlock { block, column }),
            None => Ok(()),
        }
    }
}

fn check_coordinates<T: NdFloat>(x: ArrayView1<'_, T>, partition: &BlockPartition) -> Result<()> {
    for (block, range) in partition.iter().enumerate() {
        if let Some(offset) = first_non_increasing(x.slice(s![range.start..range.end])) {
            return Err(IntegrationError::NonMonotonicCoordinates {
                block,
                row: range.start + offset,
            });
        }
    }
    Ok(())
}

/// Split one output column into the disjoint slices [start + 1, end) of
/// every block.
fn carve_column<'a, T>(
    column: ArrayViewMut1<'a, T>,
    partition: &BlockPartition,
) -> Vec<(usize, BlockRange, ArrayViewMut1<'a, T>)> {
    let mut cells = Vec::with_capacity(partition.len());
    let mut rest = column;
    let mut consumed = 0;
    for (index, block) in partition.iter().enumerate() {
        let rows = block.output_range();
        let (_, tail) = rest.split_at(Axis(0), rows.start - consumed);
        let (cell, tail) = tail.split_at(Axis(0), rows.len());
        cells.push((index, block, cell));
        rest = tail;
        consumed = rows.end;
    }
    cells
}

/// Integrate every block of one column. Returns the rejected
/// `(column, block)` with the lowest block index, if any.
fn integrate_column<T: NdFloat>(
    column: usize,
    f: ArrayView1<'_, T>,
    x: ArrayView1<'_, T>,
    out: ArrayViewMut1<'_, T>,
    partition: &BlockPartition,
    policy: Degeneracy,
    parallel_blocks: bool,
) -> Option<(usize, usize)> {
    let cells = carve_column(out, partition);
    lowest_rejected_cell(cells, parallel_blocks, |(block, range, cell)| {
        let outcome = integrate_segment_into(
            f.slice(s![range.start..range.end]),
            x.slice(s![range.start..range.end]),
            cell,
            policy,
        );
        match outcome {
            Segment::Normalized => None,
            Segment::Degenerate if policy == Degeneracy::Reject => Some((column, block)),
            Segment::Degenerate => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    block,
                    column,
                    start = range.start,
                    end = range.end,
                    ?policy,
                    "degenerate block"
                );
                None
            }
        }
    })
}

/// Run every task and keep the smallest `(column, block)` any of them
/// rejected. All tasks run to completion so the answer does not depend on
/// thread timing.
#[cfg(feature = "parallel")]
fn lowest_rejected_cell<I, F>(tasks: Vec<I>, parallel: bool, task: F) -> Option<(usize, usize)>
where
    I: Send,
    F: Fn(I) -> Option<(usize, usize)> + Send + Sync,
{
    if parallel {
        tasks.into_par_iter().filter_map(task).min()
    } else {
        tasks.into_iter().filter_map(task).min()
    }
}

#[cfg(not(feature = "parallel"))]
fn lowest_rejected_cell<I, F>(tasks: Vec<I>, _parallel: bool, task: F) -> Option<(usize, usize)>
where
    F: Fn(I) -> Option<(usize, usize)>,
{
    tasks.into_iter().filter_map(task).min()
}
