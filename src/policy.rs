//! Knobs that change how the integrator treats edge cases and threads.

/// What to do with a block whose total trapezoidal area is zero or not
/// finite (for example a constant-zero function, or a NaN sample).
///
/// Normalizing such a block divides by zero. The policy decides whether
/// that division happens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Degeneracy {
    /// Leave the block's output entries at zero.
    ///
    /// The sampler downstream sees a flat curve and never selects a value
    /// inside the block, which is what a zero-emissivity segment means.
    #[default]
    ZeroFill,
    /// Divide anyway and write whatever non-finite values come out.
    Propagate,
    /// Stop and report
    /// [`IntegrationError::DegenerateBlock`](crate::error::IntegrationError::DegenerateBlock).
    Reject,
}

/// How the (block, column) cells are distributed over threads.
///
/// Every schedule produces bit-identical output. Without the `parallel`
/// feature all schedules run on the calling thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Schedule {
    /// Everything on the calling thread.
    Serial,
    /// One task per column; blocks inside a column run in order.
    Columns,
    /// One task per column, each fanning out over its blocks.
    ColumnsAndBlocks,
}

impl Schedule {
    /// True if the schedule splits work across columns.
    pub fn parallel_columns(self) -> bool {
        !matches!(self, Schedule::Serial)
    }

    /// True if the schedule splits work across blocks inside a column.
    pub fn parallel_blocks(self) -> bool {
        matches!(self, Schedule::ColumnsAndBlocks)
    }
}
