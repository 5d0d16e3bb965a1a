//! Optimal partitioning engine.
//!
//! # Algorithm
//!
//! 1. `opt[0] = 0` (the empty prefix scores nothing)
//! 2. For each prefix length `i` in `1..=N`:
//!    a. Score every candidate last partition `[j, i)`: `opt[j] + fitness(j, i)`
//!    b. Keep the best; on ties the earliest `j` wins
//!    c. Record it as `lastchange[i]`
//! 3. Walk `lastchange` back from `N` to `0` and reverse
//!
//! O(N^2) fitness evaluations, O(N) extra space.
//!
//! # Reference
//!
//! Jackson, B. et al. (2005). "An Algorithm for Optimal Partitioning of Data
//! on an Interval", *IEEE Signal Processing Letters* 12(2), 105-108.

use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::config::{Objective, PartitionConfig};
use super::types::PartitionProblem;
use crate::PartitionError;

/// Result of an optimal partitioning run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartitionResult {
    /// Start index of every partition, ascending, beginning at 0.
    ///
    /// Empty iff the sequence is empty. The last partition ends at `len`.
    pub boundaries: Vec<usize>,

    /// Summed fitness of the chosen partitions (`opt[N]`).
    pub score: f64,

    /// Length of the partitioned sequence.
    pub len: usize,

    /// Number of fitness evaluations performed.
    pub evaluations: usize,
}

impl PartitionResult {
    /// Number of partitions chosen.
    pub fn num_partitions(&self) -> usize {
        self.boundaries.len()
    }

    /// Half-open ranges of the chosen partitions, in order.
    ///
    /// ```
    /// use u_partition::partition::{partition_with_result, PartitionConfig};
    ///
    /// // One point per partition is the best a uniform-run reward can do.
    /// let data = [1, 1, 5, 5, 5];
    /// let result = partition_with_result(&data, |d, from, to| {
    ///     if d[from..to].iter().all(|&x| x == d[from]) { 1.0 } else { -1.0 }
    /// }, &PartitionConfig::default()).unwrap();
    ///
    /// let segments: Vec<_> = result.segments().collect();
    /// assert_eq!(segments, vec![0..1, 1..2, 2..3, 3..4, 4..5]);
    /// ```
    pub fn segments(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        let ends = self
            .boundaries
            .iter()
            .skip(1)
            .copied()
            .chain(std::iter::once(self.len));
        self.boundaries
            .iter()
            .copied()
            .zip(ends)
            .map(|(from, to)| from..to)
    }

    /// Consumes the result, returning only the boundaries.
    pub fn into_boundaries(self) -> Vec<usize> {
        self.boundaries
    }
}

/// Executes the optimal partitioning dynamic program.
pub struct PartitionRunner;

impl PartitionRunner {
    /// Computes the optimal partition of `problem` under `config`.
    pub fn run<P>(problem: &P, config: &PartitionConfig) -> Result<PartitionResult, PartitionError>
    where
        P: PartitionProblem + ?Sized,
    {
        Self::run_with_cancel(problem, config, None)
    }

    /// Computes the optimal partition with an optional cancellation flag.
    ///
    /// The flag is polled before each prefix length. Once it is observed,
    /// the run stops with [`PartitionError::Cancelled`].
    pub fn run_with_cancel<P>(
        problem: &P,
        config: &PartitionConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<PartitionResult, PartitionError>
    where
        P: PartitionProblem + ?Sized,
    {
        config.validate()?;

        let n = problem.len();
        let objective = config.objective;

        debug!(
            event = "partition_start",
            len = n,
            objective = ?objective,
            max_segment_len = ?config.max_segment_len,
        );

        if n == 0 {
            return Ok(PartitionResult {
                boundaries: Vec::new(),
                score: 0.0,
                len: 0,
                evaluations: 0,
            });
        }

        let mut opt = vec![0.0_f64; n + 1];
        let mut lastchange = vec![0usize; n + 1];
        let mut evaluations = 0usize;

        for i in 1..=n {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    warn!(event = "partition_cancelled", completed = i - 1, len = n);
                    return Err(PartitionError::Cancelled {
                        completed: i - 1,
                        len: n,
                    });
                }
            }

            let start = config.first_candidate(i);
            let mut best_j = start;
            let mut best_cost = candidate_cost(problem, objective, &opt, start, i)?;

            for j in (start + 1)..i {
                let cost = candidate_cost(problem, objective, &opt, j, i)?;
                if objective.is_better(cost, best_cost) {
                    best_cost = cost;
                    best_j = j;
                }
            }

            evaluations += i - start;
            opt[i] = best_cost;
            lastchange[i] = best_j;

            trace!(event = "prefix", prefix = i, last_start = best_j, cost = best_cost);
        }

        let boundaries = backtrack(&lastchange);

        debug!(
            event = "partition_end",
            len = n,
            evaluations,
            partitions = boundaries.len(),
            score = opt[n],
        );

        Ok(PartitionResult {
            boundaries,
            score: opt[n],
            len: n,
            evaluations,
        })
    }

    /// Sums the fitness of an arbitrary partitioning of `problem`.
    ///
    /// `boundaries` must be empty for an empty sequence, and otherwise start
    /// at 0, increase strictly and stay below `problem.len()`.
    ///
    /// The total is a plain sum: partitions scored `+inf` and `-inf` in the
    /// same partitioning add up to NaN, which is returned as is.
    ///
    /// ```
    /// use u_partition::partition::{FnProblem, PartitionRunner};
    ///
    /// let data = [3.0_f64, 4.0, 5.0];
    /// let problem = FnProblem::new(&data, |d, from, to, _| d[from..to].iter().sum::<f64>());
    /// assert_eq!(PartitionRunner::score_boundaries(&problem, &[0, 2]).unwrap(), 12.0);
    /// assert!(PartitionRunner::score_boundaries(&problem, &[1]).is_err());
    /// ```
    pub fn score_boundaries<P>(problem: &P, boundaries: &[usize]) -> Result<f64, PartitionError>
    where
        P: PartitionProblem + ?Sized,
    {
        let n = problem.len();
        check_boundaries(boundaries, n)?;

        let mut total = 0.0;
        for (k, &from) in boundaries.iter().enumerate() {
            let to = boundaries.get(k + 1).copied().unwrap_or(n);
            total += evaluate(problem, from, to)?;
        }
        Ok(total)
    }
}

/// Scores `[j, i)` on top of the best prefix ending at `j`.
///
/// A NaN total (e.g. `+inf + -inf`) ranks as the worst value.
#[inline]
fn candidate_cost<P>(
    problem: &P,
    objective: Objective,
    opt: &[f64],
    j: usize,
    i: usize,
) -> Result<f64, PartitionError>
where
    P: PartitionProblem + ?Sized,
{
    let cost = opt[j] + evaluate(problem, j, i)?;
    Ok(if cost.is_nan() { objective.worst() } else { cost })
}

fn evaluate<P>(problem: &P, from: usize, to: usize) -> Result<f64, PartitionError>
where
    P: PartitionProblem + ?Sized,
{
    let score = problem
        .fitness(from, to)
        .map_err(|e| PartitionError::Fitness {
            from,
            to,
            source: Box::new(e),
        })?;
    if score.is_nan() {
        return Err(PartitionError::NanScore { from, to });
    }
    Ok(score)
}

/// Rebuilds ascending partition starts from the backpointer table.
///
/// `lastchange[i] < i` for every `i >= 1`, so the walk reaches 0.
fn backtrack(lastchange: &[usize]) -> Vec<usize> {
    let mut boundaries = Vec::new();
    let mut p = lastchange.len() - 1;
    loop {
        p = lastchange[p];
        boundaries.push(p);
        if p == 0 {
            break;
        }
    }
    boundaries.reverse();
    boundaries
}

fn check_boundaries(boundaries: &[usize], n: usize) -> Result<(), PartitionError> {
    if n == 0 {
        if boundaries.is_empty() {
            return Ok(());
        }
        return Err(PartitionError::invalid(
            "an empty sequence has no partition boundaries",
        ));
    }
    match boundaries.first() {
        Some(0) => {}
        Some(&first) => {
            return Err(PartitionError::invalid(format!(
                "first boundary must be 0, got {first}"
            )))
        }
        None => return Err(PartitionError::invalid("boundaries are empty")),
    }
    if let Some(w) = boundaries.windows(2).find(|w| w[0] >= w[1]) {
        return Err(PartitionError::invalid(format!(
            "boundaries must increase strictly: {} then {}",
            w[0], w[1]
        )));
    }
    if let Some(&last) = boundaries.last() {
        if last >= n {
            return Err(PartitionError::invalid(format!(
                "boundary {last} out of range for length {n}"
            )));
        }
    }
    Ok(())
}
