//! Exact optimal partitioning of ordered sequences.
//!
//! Given a sequence of N elements and a fitness function scoring any
//! contiguous sub-range `[from, to)`, finds the split into partitions whose
//! summed fitness is globally optimal (maximal or minimal):
//!
//! - **Partitioning engine** ([`partition`]): O(N^2) dynamic program with
//!   backtracking, deterministic earliest-start tie-breaking, optional
//!   segment length bound and cooperative cancellation.
//! - **Segmentation** ([`segmentation`]): penalized least-squares
//!   change-point detection built on the engine.
//!
//! # Quick start
//!
//! ```
//! use u_partition::partition::{partition, Objective};
//!
//! let data = [1.0, 1.1, 0.9, 7.0, 7.2, 6.8];
//! // Cost: spread of the partition plus a fixed charge per partition.
//! let boundaries = partition(&data, |d, from, to| {
//!     let seg = &d[from..to];
//!     let max = seg.iter().cloned().fold(f64::MIN, f64::max);
//!     let min = seg.iter().cloned().fold(f64::MAX, f64::min);
//!     (max - min) + 1.0
//! }, Objective::Minimize).unwrap();
//!
//! assert_eq!(boundaries, vec![0, 3]);
//! ```
//!
//! # Architecture
//!
//! Problems plug into the engine through the
//! [`PartitionProblem`](partition::PartitionProblem) trait; closures are
//! adapted automatically by the free functions in [`partition`]. The
//! engine holds no state between calls, so it is safe to call concurrently.

mod error;
pub mod partition;
pub mod segmentation;

pub use error::PartitionError;
