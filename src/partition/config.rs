//! Partitioning configuration.

use crate::PartitionError;

/// Direction of the search over the additive objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Objective {
    /// Maximize the summed fitness.
    #[default]
    Maximize,
    /// Minimize the summed fitness (cost).
    Minimize,
}

impl Objective {
    /// Builds the objective from a `minimize` flag.
    pub fn from_minimize(minimize: bool) -> Self {
        if minimize {
            Objective::Minimize
        } else {
            Objective::Maximize
        }
    }

    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    ///
    /// Equal values are never better, so the first candidate reaching the
    /// optimum keeps its place.
    #[inline]
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Objective::Maximize => candidate > incumbent,
            Objective::Minimize => candidate < incumbent,
        }
    }

    /// The value every finite score improves on.
    #[inline]
    pub fn worst(self) -> f64 {
        match self {
            Objective::Maximize => f64::NEG_INFINITY,
            Objective::Minimize => f64::INFINITY,
        }
    }
}

/// Configuration for [`PartitionRunner`](super::PartitionRunner).
///
/// # Examples
///
/// ```
/// use u_partition::partition::{Objective, PartitionConfig};
///
/// let config = PartitionConfig::default()
///     .with_objective(Objective::Minimize)
///     .with_max_segment_len(16);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_segment_len, Some(16));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "snake_case"))]
pub struct PartitionConfig {
    /// Whether the summed fitness is maximized or minimized.
    pub objective: Objective,

    /// Upper bound on the length of a single partition. `None` = unbounded.
    ///
    /// Candidates `[j, i)` with `i - j` above the bound are never evaluated.
    pub max_segment_len: Option<usize>,
}

impl PartitionConfig {
    /// Sets the objective.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Shorthand for `with_objective(Objective::Minimize)`.
    pub fn minimize(self) -> Self {
        self.with_objective(Objective::Minimize)
    }

    /// Limits the length of any single partition.
    pub fn with_max_segment_len(mut self, len: usize) -> Self {
        self.max_segment_len = Some(len);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), PartitionError> {
        if self.max_segment_len == Some(0) {
            return Err(PartitionError::invalid(
                "max_segment_len must be at least 1",
            ));
        }
        Ok(())
    }

    /// Parses a configuration from TOML.
    ///
    /// Missing keys keep their defaults.
    ///
    /// ```
    /// use u_partition::partition::{Objective, PartitionConfig};
    ///
    /// let config = PartitionConfig::from_toml_str(r#"
    ///     objective = "minimize"
    ///     max_segment_len = 32
    /// "#).unwrap();
    /// assert_eq!(config.objective, Objective::Minimize);
    /// assert_eq!(config.max_segment_len, Some(32));
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_toml_str(s: &str) -> Result<Self, PartitionError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// First candidate start `j` admitted for prefix length `i`.
    #[inline]
    pub(crate) fn first_candidate(&self, i: usize) -> usize {
        match self.max_segment_len {
            Some(max) => i.saturating_sub(max),
            None => 0,
        }
    }
}
