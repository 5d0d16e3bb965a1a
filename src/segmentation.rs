//! Penalized least-squares segmentation.
//!
//! Fits a piecewise-constant model to a numeric series: every partition is
//! charged its sum of squared deviations from its own mean plus a fixed
//! penalty. Minimizing the total with the partitioning engine yields the
//! optimal change points for that penalty; a larger penalty gives fewer
//! segments.
//!
//! Segment costs come from prefix sums, so each fitness call is O(1) and a
//! full run is O(N^2).

use std::convert::Infallible;

use crate::partition::{PartitionConfig, PartitionProblem, PartitionResult, PartitionRunner};
use crate::PartitionError;

/// Piecewise-constant L2 segmentation problem.
///
/// # Examples
///
/// ```
/// use u_partition::segmentation::L2Segmentation;
///
/// let series = [0.0, 0.1, -0.1, 4.0, 4.1, 3.9];
/// let problem = L2Segmentation::new(&series, 1.0).unwrap();
/// let result = problem.segment().unwrap();
/// assert_eq!(result.boundaries, vec![0, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct L2Segmentation {
    /// `sums[i]` = sum of the first `i` values.
    sums: Vec<f64>,
    /// `squares[i]` = sum of squares of the first `i` values.
    squares: Vec<f64>,
    /// Series mean, subtracted from every value before accumulating.
    shift: f64,
    penalty: f64,
}

impl L2Segmentation {
    /// Builds the problem over `values` with a per-segment `penalty`.
    ///
    /// Fails with [`PartitionError::InvalidArgument`] if the penalty is
    /// negative or not finite, or if any value is not finite.
    pub fn new(values: &[f64], penalty: f64) -> Result<Self, PartitionError> {
        if !penalty.is_finite() || penalty < 0.0 {
            return Err(PartitionError::invalid(format!(
                "penalty must be finite and non-negative, got {penalty}"
            )));
        }
        if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
            return Err(PartitionError::invalid(format!(
                "value at index {idx} is not finite"
            )));
        }

        // SSE is shift-invariant; centring keeps `sq - sum^2 / n` from
        // cancelling to zero on series with a large common offset.
        let shift = if values.is_empty() {
            0.0
        } else {
            let n = values.len() as f64;
            values.iter().map(|v| v / n).sum()
        };

        let mut sums = Vec::with_capacity(values.len() + 1);
        let mut squares = Vec::with_capacity(values.len() + 1);
        sums.push(0.0);
        squares.push(0.0);
        for (i, &v) in values.iter().enumerate() {
            let c = v - shift;
            sums.push(sums[i] + c);
            squares.push(squares[i] + c * c);
        }

        Ok(Self {
            sums,
            squares,
            shift,
            penalty,
        })
    }

    /// Per-segment penalty.
    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    /// Mean of `values[from..to]`. Zero for an empty range.
    pub fn mean(&self, from: usize, to: usize) -> f64 {
        if to <= from {
            return 0.0;
        }
        (self.sums[to] - self.sums[from]) / (to - from) as f64 + self.shift
    }

    /// Sum of squared deviations from the mean over `values[from..to]`.
    pub fn squared_error(&self, from: usize, to: usize) -> f64 {
        if to <= from {
            return 0.0;
        }
        let n = (to - from) as f64;
        let sum = self.sums[to] - self.sums[from];
        let sq = self.squares[to] - self.squares[from];
        // Cancellation can leave a tiny negative residue.
        (sq - sum * sum / n).max(0.0)
    }

    /// Configuration this problem is meant to be solved with.
    pub fn config(&self) -> PartitionConfig {
        PartitionConfig::default().minimize()
    }

    /// Runs the partitioning engine with [`config`](Self::config).
    pub fn segment(&self) -> Result<PartitionResult, PartitionError> {
        PartitionRunner::run(self, &self.config())
    }

    /// Segment means for a result produced over this series.
    pub fn segment_means(&self, result: &PartitionResult) -> Vec<f64> {
        result.segments().map(|r| self.mean(r.start, r.end)).collect()
    }
}

impl PartitionProblem for L2Segmentation {
    type Error = Infallible;

    fn len(&self) -> usize {
        self.sums.len() - 1
    }

    fn fitness(&self, from: usize, to: usize) -> Result<f64, Infallible> {
        Ok(self.squared_error(from, to) + self.penalty)
    }
}
