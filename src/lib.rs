//! Blockwise normalized cumulative trapezoidal integration.
//!
//! This crate turns a tabulated non-negative function into per-block
//! cumulative distribution functions, the tables a Monte Carlo transport code
//! inverts to sample frequencies (or any other tabulated quantity).
//!
//! ## Core idea
//! 1. Lay the samples out as an (N, M) table: N points along a shared
//!    coordinate grid `x`, M independent columns (shells, zones).
//! 2. Split the grid into contiguous blocks with a list of block references.
//! 3. Integrate every (block, column) cell with the composite trapezoidal
//!    rule and divide by the block total, so each block's CDF starts at zero
//!    and ends at exactly one.
//!
//! The cells are independent and write disjoint regions of the output, so
//! with the `parallel` feature (on by default) they run on the rayon pool
//! without any locking.
//!
//! ## Quick start
//! ```
//! use ndarray::{array, Array2};
//! use trapz_blocks::integrate_by_blocks;
//!
//! let x = array![0.0, 1.0, 2.0, 0.0, 2.0, 4.0];
//! let f = Array2::from_elem((6, 2), 1.0);
//! let cdf = integrate_by_blocks(f.view(), x.view(), &[0, 3, 6]);
//! assert_eq!(cdf.column(0).to_vec(), vec![0.0, 0.5, 1.0, 0.0, 0.5, 1.0]);
//! ```
//!
//! ## Degenerate blocks
//! A block whose total area is zero (a constant-zero function, a zero-width
//! grid) or not finite cannot be normalized. [`Degeneracy`] selects what
//! happens: the default zero-fills the block; `Propagate` writes the
//! non-finite quotients; `Reject` returns an error from
//! [`BlockIntegrator::integrate`].
//!
//! ## Cargo features
//! - `parallel` (default): run cells on the rayon thread pool.
//! - `tracing`: emit `tracing` spans per call and per column.
//! - `heavy`: enable long-running stress tests.

pub mod blocks;
pub mod builder;
pub mod error;
pub mod integrator;
mod kernels;
pub mod policy;
pub mod trapezoid;
pub mod utils;

pub use crate::blocks::{BlockPartition, BlockRange};
pub use crate::builder::BlockIntegratorBuilder;
pub use crate::error::IntegrationError;
pub use crate::integrator::{integrate_by_blocks, BlockIntegrator};
pub use crate::policy::{Degeneracy, Schedule};
pub use crate::trapezoid::{cumulative_trapezoid, cumulative_trapezoid_with};
