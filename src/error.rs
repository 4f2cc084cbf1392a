use thiserror::Error;

/// Errors reported by the checked integration entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrationError {
    /// The coordinate array and the value table disagree on the sample count.
    #[error("coordinate array has {coordinates} samples but the table has {rows} rows")]
    ShapeMismatch { rows: usize, coordinates: usize },
    /// A pre-validated partition was built for an axis of another length.
    #[error("partition was validated for {partition_rows} rows but the table has {rows} rows")]
    PartitionMismatch { partition_rows: usize, rows: usize },
    /// A caller-supplied output table has the wrong shape.
    #[error("output table is {actual:?}, expected {expected:?}")]
    OutputShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// Block references are not strictly increasing.
    #[error(
        "block references must be strictly increasing: \
         {previous} is followed by {next} at position {position}"
    )]
    UnsortedReferences {
        position: usize,
        previous: usize,
        next: usize,
    },
    /// A block reference points past the end of the sample axis.
    #[error("block reference {reference} at position {position} exceeds the {rows} table rows")]
    ReferenceOutOfBounds {
        position: usize,
        reference: usize,
        rows: usize,
    },
    /// A block has fewer than the two samples a trapezoid needs.
    #[error("block {block} starting at row {start} has {len} sample(s); at least 2 are required")]
    BlockTooShort {
        block: usize,
        start: usize,
        len: usize,
    },
    /// Coordinates are not strictly increasing inside a block.
    #[error("coordinates are not strictly increasing in block {block} at row {row}")]
    NonMonotonicCoordinates { block: usize, row: usize },
    /// A block integrates to zero or a non-finite total under
    /// [`Degeneracy::Reject`](crate::policy::Degeneracy::Reject).
    #[error("block {block} in column {column} has a zero or non-finite total area")]
    DegenerateBlock { block: usize, column: usize },
}

pub type Result<T, E = IntegrationError> = std::result::Result<T, E>;
