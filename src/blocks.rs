//! Block-level data structures used by the integrator.
//!
//! A `BlockRange` is one half-open interval [start, end) of the sample axis.
//! A `BlockPartition` is a validated, strictly increasing list of block
//! references that splits part of the axis into contiguous blocks.

use std::ops::Range;

use crate::error::{IntegrationError, Result};

/// One block of the sample axis, [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockRange {
    /// Inclusive first sample of the block.
    pub start: usize,
    /// Exclusive end; the block covers samples [start, end).
    pub end: usize,
}

impl BlockRange {
    /// Number of samples in the block.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the block is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows of the output table written for this block.
    ///
    /// The CDF is pinned at zero on the first sample, so only
    /// [start + 1, end) receives values.
    #[inline]
    pub fn output_range(&self) -> Range<usize> {
        (self.start + 1).min(self.end)..self.end
    }
}

/// Validated block references for a sample axis of known length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPartition {
    references: Vec<usize>,
    rows: usize,
}

impl BlockPartition {
    /// Validate `references` against an axis of `rows` samples.
    ///
    /// Fewer than two references describe zero blocks. Otherwise the
    /// references must be strictly increasing, the last one must not exceed
    /// `rows`, and every block must hold at least two samples.
    pub fn new(references: &[usize], rows: usize) -> Result<Self> {
        for (position, &reference) in references.iter().enumerate() {
            if reference > rows {
                return Err(IntegrationError::ReferenceOutOfBounds {
                    position,
                    reference,
                    rows,
                });
            }
        }
        for (block, pair) in references.windows(2).enumerate() {
            let (start, end) = (pair[0], pair[1]);
            if end <= start {
                return Err(IntegrationError::UnsortedReferences {
                    position: block + 1,
                    previous: start,
                    next: end,
                });
            }
            if end - start < 2 {
                return Err(IntegrationError::BlockTooShort {
                    block,
                    start,
                    len: end - start,
                });
            }
        }
        Ok(Self {
            references: references.to_vec(),
            rows,
        })
    }

    /// Build a partition from consecutive block lengths, the first block
    /// starting at `offset`.
    pub fn from_lengths(offset: usize, lengths: &[usize], rows: usize) -> Result<Self> {
        let mut references = Vec::with_capacity(lengths.len() + 1);
        let mut cursor = offset;
        references.push(cursor);
        for &len in lengths {
            cursor += len;
            references.push(cursor);
        }
        if lengths.is_empty() {
            references.clear();
        }
        Self::new(&references, rows)
    }

    /// Number of blocks.
    #[inline]
    pub fn len(&self) -> usize {
        self.references.len().saturating_sub(1)
    }

    /// Returns true if the partition has no blocks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the sample axis the partition was validated against.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The raw references, length `len() + 1` (or empty).
    pub fn references(&self) -> &[usize] {
        &self.references
    }

    /// Block `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<BlockRange> {
        let start = *self.references.get(index)?;
        let end = *self.references.get(index + 1)?;
        Some(BlockRange { start, end })
    }

    /// Blocks in axis order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = BlockRange> + '_ {
        self.references
            .windows(2)
            .map(|pair| BlockRange {
                start: pair[0],
                end: pair[1],
            })
    }
}
