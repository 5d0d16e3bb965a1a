//! Closure-based entry points.
//!
//! Thin wrappers that adapt a fitness closure into a [`PartitionProblem`]
//! and hand it to [`PartitionRunner`]. The half-open convention holds
//! everywhere: the closure receives `(sequence, from, to)` and scores
//! `sequence[from..to]`.

use std::error::Error;

use super::config::{Objective, PartitionConfig};
use super::runner::{PartitionResult, PartitionRunner};
use super::types::{FitnessFn, FnProblem, TryFnProblem};
use crate::PartitionError;

/// Returns the optimal partition start indices of `sequence`.
///
/// # Examples
///
/// ```
/// use u_partition::partition::{partition, Objective};
///
/// // Reward partitions of exactly one element.
/// let data = [4, 8, 15, 16, 23];
/// let boundaries = partition(&data, |_, from, to| {
///     let extra = (to - from - 1) as f64;
///     -(extra * extra)
/// }, Objective::Maximize).unwrap();
/// assert_eq!(boundaries, vec![0, 1, 2, 3, 4]);
/// ```
pub fn partition<T, F>(
    sequence: &[T],
    fitness: F,
    objective: Objective,
) -> Result<Vec<usize>, PartitionError>
where
    F: Fn(&[T], usize, usize) -> f64,
{
    let config = PartitionConfig::default().with_objective(objective);
    partition_with_result(sequence, fitness, &config).map(PartitionResult::into_boundaries)
}

/// Like [`partition`], with a full config and the complete result.
pub fn partition_with_result<T, F>(
    sequence: &[T],
    fitness: F,
    config: &PartitionConfig,
) -> Result<PartitionResult, PartitionError>
where
    F: Fn(&[T], usize, usize) -> f64,
{
    let problem = FnProblem::new(sequence, |s, from, to, _| fitness(s, from, to));
    PartitionRunner::run(&problem, config)
}

/// Like [`partition`], forwarding `context` to every fitness call.
///
/// ```
/// use u_partition::partition::{partition_with_context, Objective};
///
/// struct Penalty(f64);
///
/// let data = [1.0, 1.0, 1.0];
/// let boundaries = partition_with_context(
///     &data,
///     |_, _, _, p: &Penalty| p.0,
///     Objective::Minimize,
///     &Penalty(2.0),
/// )
/// .unwrap();
/// assert_eq!(boundaries, vec![0]);
/// ```
pub fn partition_with_context<T, C, F>(
    sequence: &[T],
    fitness: F,
    objective: Objective,
    context: &C,
) -> Result<Vec<usize>, PartitionError>
where
    F: Fn(&[T], usize, usize, &C) -> f64,
{
    let problem = FnProblem::with_context(sequence, context, fitness);
    let config = PartitionConfig::default().with_objective(objective);
    PartitionRunner::run(&problem, &config).map(PartitionResult::into_boundaries)
}

/// Like [`partition`] for a fitness function that can fail.
///
/// The first error stops the run and comes back as
/// [`PartitionError::Fitness`].
pub fn try_partition<T, F, E>(
    sequence: &[T],
    fitness: F,
    objective: Objective,
) -> Result<Vec<usize>, PartitionError>
where
    F: Fn(&[T], usize, usize) -> Result<f64, E>,
    E: Error + Send + Sync + 'static,
{
    let problem = TryFnProblem::new(sequence, |s, from, to, _| fitness(s, from, to));
    let config = PartitionConfig::default().with_objective(objective);
    PartitionRunner::run(&problem, &config).map(PartitionResult::into_boundaries)
}

/// Partitions with a fitness function selected at runtime.
///
/// A missing fitness function is rejected with
/// [`PartitionError::InvalidArgument`], even for an empty sequence.
///
/// ```
/// use u_partition::partition::{partition_dyn, FitnessFn, Objective};
///
/// let unit: &FitnessFn<'_, u8, ()> = &|_, from, to, _| if to - from == 1 { 1.0 } else { 0.0 };
/// assert_eq!(partition_dyn(b"abc", Some(unit), Objective::Maximize, &()).unwrap(), vec![0, 1, 2]);
///
/// let err = partition_dyn::<u8, ()>(b"abc", None, Objective::Maximize, &()).unwrap_err();
/// assert!(err.is_invalid_argument());
/// ```
pub fn partition_dyn<T, C>(
    sequence: &[T],
    fitness: Option<&FitnessFn<'_, T, C>>,
    objective: Objective,
    context: &C,
) -> Result<Vec<usize>, PartitionError> {
    let fitness = fitness.ok_or_else(|| PartitionError::invalid("fitness function is required"))?;
    partition_with_context(sequence, fitness, objective, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, thiserror::Error)]
    #[error("negative sample")]
    struct NegativeSample;

    #[test]
    fn test_partition_empty() {
        let data: Vec<f64> = Vec::new();
        let calls = Cell::new(0);
        let boundaries = partition(
            &data,
            |_, _, _| {
                calls.set(calls.get() + 1);
                0.0
            },
            Objective::Maximize,
        )
        .unwrap();
        assert!(boundaries.is_empty());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_partition_minimize_flag() {
        // Every partition costs its length squared; minimizing splits fully.
        let data = [0u8; 4];
        let square = |_: &[u8], from: usize, to: usize| ((to - from) * (to - from)) as f64;

        let min = partition(&data, square, Objective::from_minimize(true)).unwrap();
        let max = partition(&data, square, Objective::from_minimize(false)).unwrap();

        assert_eq!(min, vec![0, 1, 2, 3]);
        assert_eq!(max, vec![0]);
    }

    #[test]
    fn test_partition_with_result_reports_score() {
        let data = [2.0_f64, 2.0, 7.0, 7.0, 7.0];
        let result = partition_with_result(
            &data,
            |d, from, to| {
                let seg = &d[from..to];
                if seg.iter().all(|&x| x == seg[0]) {
                    seg.len() as f64 * seg.len() as f64
                } else {
                    0.0
                }
            },
            &PartitionConfig::default(),
        )
        .unwrap();

        assert_eq!(result.boundaries, vec![0, 2]);
        assert_eq!(result.score, 4.0 + 9.0);
        assert_eq!(result.num_partitions(), 2);
        assert_eq!(result.evaluations, 15);
    }

    #[test]
    fn test_context_not_mutated() {
        let threshold = 5;
        let data = [1, 9, 2, 8];
        let boundaries = partition_with_context(
            &data,
            |d, from, to, t: &i32| {
                let high = d[from..to].iter().filter(|&&x| x > *t).count();
                let low = (to - from) - high;
                if high == 0 || low == 0 {
                    1.0
                } else {
                    -1.0
                }
            },
            Objective::Maximize,
            &threshold,
        )
        .unwrap();
        assert_eq!(boundaries, vec![0, 1, 2, 3]);
        assert_eq!(threshold, 5);
    }

    #[test]
    fn test_try_partition_ok_and_err() {
        let clean = [1.0, 2.0, 3.0];
        let ok = try_partition(
            &clean,
            |d: &[f64], from, to| {
                if d[from..to].iter().any(|&x| x < 0.0) {
                    Err(NegativeSample)
                } else {
                    Ok(-1.0)
                }
            },
            Objective::Maximize,
        )
        .unwrap();
        assert_eq!(ok, vec![0]);

        let dirty = [1.0, -2.0, 3.0];
        let err = try_partition(
            &dirty,
            |d: &[f64], from, to| {
                if d[from..to].iter().any(|&x| x < 0.0) {
                    Err(NegativeSample)
                } else {
                    Ok(-1.0)
                }
            },
            Objective::Maximize,
        )
        .unwrap_err();
        assert!(matches!(err, PartitionError::Fitness { from: 0, to: 2, .. }));
    }

    #[test]
    fn test_partition_dyn_requires_fitness() {
        let empty: [u8; 0] = [];
        let err = partition_dyn::<u8, ()>(&empty, None, Objective::Minimize, &()).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_partition_dyn_selects_by_name() {
        let unit: &FitnessFn<'_, i32, ()> = &|_, _, _, _| -1.0;
        let split: &FitnessFn<'_, i32, ()> = &|_, _, _, _| 1.0;
        let lookup = |name: &str| match name {
            "unit" => Some(unit),
            "split" => Some(split),
            _ => None,
        };

        let data = [1, 2, 3];
        assert_eq!(
            partition_dyn(&data, lookup("unit"), Objective::Maximize, &()).unwrap(),
            vec![0]
        );
        assert_eq!(
            partition_dyn(&data, lookup("split"), Objective::Maximize, &()).unwrap(),
            vec![0, 1, 2]
        );
        assert!(partition_dyn(&data, lookup("other"), Objective::Maximize, &()).is_err());
    }
}
