//! Optimal partitioning of ordered sequences.
//!
//! Splits a sequence of N elements into contiguous partitions so that the
//! sum of a caller-supplied fitness over the partitions is maximal (or
//! minimal). The search is an exact O(N^2) dynamic program over prefix
//! lengths followed by a backtracking pass; ties resolve to the earliest
//! partition start, which keeps results reproducible.
//!
//! Partitions are half-open ranges `[from, to)`. A result lists the start
//! of every partition; the last one ends at N.
//!
//! # References
//!
//! - Jackson, B. et al. (2005). "An Algorithm for Optimal Partitioning of Data
//!   on an Interval", *IEEE Signal Processing Letters* 12(2), 105-108.
//! - Scargle, J. et al. (2013). "Studies in Astronomical Time Series
//!   Analysis. VI. Bayesian Block Representations", *ApJ* 764(2), 167.

mod config;
mod entry;
mod runner;
mod types;

pub use config::{Objective, PartitionConfig};
pub use entry::{
    partition, partition_dyn, partition_with_context, partition_with_result, try_partition,
};
pub use runner::{PartitionResult, PartitionRunner};
pub use types::{FitnessFn, FnProblem, PartitionProblem, TryFnProblem};
