//! Error types for the partitioning engine.

use std::error::Error;

/// Errors that can occur while computing an optimal partition.
#[derive(Debug, thiserror::Error)]
pub enum PartitionError {
    /// A required argument is missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The fitness function returned NaN for a candidate partition.
    #[error("fitness of partition [{from}, {to}) is NaN")]
    NanScore { from: usize, to: usize },

    /// A fallible fitness function reported an error.
    #[error("fitness of partition [{from}, {to}) failed: {source}")]
    Fitness {
        from: usize,
        to: usize,
        #[source]
        source: Box<dyn Error + Send + Sync + 'static>,
    },

    /// The run was cancelled through its cancellation flag.
    #[error("partitioning cancelled after {completed} of {len} prefixes")]
    Cancelled { completed: usize, len: usize },

    /// A configuration document could not be parsed.
    #[cfg(feature = "serde")]
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

impl PartitionError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        PartitionError::InvalidArgument(msg.into())
    }

    /// Returns `true` for [`PartitionError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PartitionError::InvalidArgument(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("sensor offline")]
    struct SensorOffline;

    #[test]
    fn test_display_messages() {
        let err = PartitionError::NanScore { from: 2, to: 5 };
        assert_eq!(err.to_string(), "fitness of partition [2, 5) is NaN");

        let err = PartitionError::Cancelled {
            completed: 3,
            len: 10,
        };
        assert_eq!(
            err.to_string(),
            "partitioning cancelled after 3 of 10 prefixes"
        );
    }

    #[test]
    fn test_fitness_error_keeps_source() {
        let err = PartitionError::Fitness {
            from: 0,
            to: 1,
            source: Box::new(SensorOffline),
        };
        assert!(err.to_string().ends_with("sensor offline"));
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("sensor offline"));
    }

    #[test]
    fn test_invalid_argument_kind() {
        assert!(PartitionError::invalid("missing fitness").is_invalid_argument());
        assert!(!PartitionError::NanScore { from: 0, to: 1 }.is_invalid_argument());
    }
}
