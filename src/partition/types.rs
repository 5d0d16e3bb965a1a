//! Core trait for partitioning problems, plus closure adapters.

use std::convert::Infallible;
use std::error::Error;
use std::fmt;

/// Type-erased fitness callback: `(sequence, from, to, context) -> score`.
///
/// Used where the fitness function is chosen at runtime and may be absent,
/// see [`partition_dyn`](crate::partition::partition_dyn).
pub type FitnessFn<'a, T, C> = dyn Fn(&[T], usize, usize, &C) -> f64 + 'a;

/// Defines an optimal partitioning problem over an ordered sequence.
///
/// The engine asks for the fitness of candidate partitions `[from, to)`
/// with `0 <= from < to <= len()` and combines them additively. The
/// implementation owns (or borrows) the sequence; the engine never sees it.
///
/// # Contract
///
/// - `fitness` must be deterministic for a given `(from, to)`.
/// - NaN is a precondition violation and aborts the run with
///   [`PartitionError::NanScore`](crate::PartitionError::NanScore).
/// - Infinite scores are allowed and can be used to forbid partitions.
///
/// # Examples
///
/// ```
/// use std::convert::Infallible;
/// use u_partition::partition::{PartitionConfig, PartitionProblem, PartitionRunner};
///
/// /// Rewards runs of equal letters.
/// struct Runs<'a>(&'a [u8]);
///
/// impl PartitionProblem for Runs<'_> {
///     type Error = Infallible;
///
///     fn len(&self) -> usize {
///         self.0.len()
///     }
///
///     fn fitness(&self, from: usize, to: usize) -> Result<f64, Infallible> {
///         let run = &self.0[from..to];
///         Ok(if run.iter().all(|&b| b == run[0]) { 1.0 } else { -10.0 })
///     }
/// }
///
/// let result = PartitionRunner::run(&Runs(b"aabbbc"), &PartitionConfig::default()).unwrap();
/// assert_eq!(result.boundaries, vec![0, 1, 2, 3, 4, 5]);
/// ```
pub trait PartitionProblem {
    /// Error a fallible fitness function can report.
    type Error: Error + Send + Sync + 'static;

    /// Number of elements in the sequence.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scores the candidate partition `[from, to)`.
    fn fitness(&self, from: usize, to: usize) -> Result<f64, Self::Error>;
}

/// Adapts an infallible closure over a borrowed slice and context.
pub struct FnProblem<'a, T, C, F> {
    sequence: &'a [T],
    context: &'a C,
    fitness: F,
}

impl<'a, T, F> FnProblem<'a, T, (), F>
where
    F: Fn(&[T], usize, usize, &()) -> f64,
{
    /// Wraps `fitness(sequence, from, to, &())`.
    pub fn new(sequence: &'a [T], fitness: F) -> Self {
        Self {
            sequence,
            context: &(),
            fitness,
        }
    }
}

impl<'a, T, C, F> FnProblem<'a, T, C, F>
where
    F: Fn(&[T], usize, usize, &C) -> f64,
{
    /// Wraps `fitness(sequence, from, to, context)`.
    pub fn with_context(sequence: &'a [T], context: &'a C, fitness: F) -> Self {
        Self {
            sequence,
            context,
            fitness,
        }
    }
}

impl<T, C, F> PartitionProblem for FnProblem<'_, T, C, F>
where
    F: Fn(&[T], usize, usize, &C) -> f64,
{
    type Error = Infallible;

    fn len(&self) -> usize {
        self.sequence.len()
    }

    fn fitness(&self, from: usize, to: usize) -> Result<f64, Infallible> {
        Ok((self.fitness)(self.sequence, from, to, self.context))
    }
}

impl<T, C, F> fmt::Debug for FnProblem<'_, T, C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProblem")
            .field("len", &self.sequence.len())
            .finish_non_exhaustive()
    }
}

/// Adapts a fallible closure over a borrowed slice and context.
///
/// The first error aborts the run and is returned as
/// [`PartitionError::Fitness`](crate::PartitionError::Fitness).
pub struct TryFnProblem<'a, T, C, F> {
    sequence: &'a [T],
    context: &'a C,
    fitness: F,
}

impl<'a, T, F> TryFnProblem<'a, T, (), F> {
    /// Wraps `fitness(sequence, from, to, &())`.
    pub fn new<E>(sequence: &'a [T], fitness: F) -> Self
    where
        F: Fn(&[T], usize, usize, &()) -> Result<f64, E>,
    {
        Self {
            sequence,
            context: &(),
            fitness,
        }
    }
}

impl<'a, T, C, F> TryFnProblem<'a, T, C, F> {
    /// Wraps `fitness(sequence, from, to, context)`.
    pub fn with_context<E>(sequence: &'a [T], context: &'a C, fitness: F) -> Self
    where
        F: Fn(&[T], usize, usize, &C) -> Result<f64, E>,
    {
        Self {
            sequence,
            context,
            fitness,
        }
    }
}

impl<T, C, F, E> PartitionProblem for TryFnProblem<'_, T, C, F>
where
    F: Fn(&[T], usize, usize, &C) -> Result<f64, E>,
    E: Error + Send + Sync + 'static,
{
    type Error = E;

    fn len(&self) -> usize {
        self.sequence.len()
    }

    fn fitness(&self, from: usize, to: usize) -> Result<f64, E> {
        (self.fitness)(self.sequence, from, to, self.context)
    }
}

impl<T, C, F> fmt::Debug for TryFnProblem<'_, T, C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryFnProblem")
            .field("len", &self.sequence.len())
            .finish_non_exhaustive()
    }
}
