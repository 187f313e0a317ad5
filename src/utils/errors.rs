use thiserror::Error;

/// Rejected workload or scheduler parameters.
///
/// Raised once, when a workload, quantum or stepper is built. Nothing is
/// constructed when validation fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("process '{id}': burst must be positive, got {burst}")]
    NonPositiveBurst { id: String, burst: i64 },

    #[error("process '{id}': arrival must not be negative, got {arrival}")]
    NegativeArrival { id: String, arrival: i64 },

    #[error("process '{id}': id is used more than once in the workload")]
    DuplicateId { id: String },

    #[error("process at position {position}: id must not be empty")]
    EmptyId { position: usize },

    #[error("quantum must be positive, got {quantum}")]
    NonPositiveQuantum { quantum: i64 },
}

impl ValidationError {
    /// Id of the offending process, when the error is about one.
    pub fn process_id(&self) -> Option<&str> {
        match self {
            ValidationError::NonPositiveBurst { id, .. }
            | ValidationError::NegativeArrival { id, .. }
            | ValidationError::DuplicateId { id } => Some(id),
            ValidationError::EmptyId { .. } | ValidationError::NonPositiveQuantum { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm '{0}', expected one of fcfs, sjf, priority, rr, mlfq")]
pub struct UnknownAlgorithm(pub String);

/// Failure to turn command-line input into a simulation.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read workload file: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid workload: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    UnknownAlgorithm(#[from] UnknownAlgorithm),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_id_is_reported() {
        let err = ValidationError::NonPositiveBurst { id: "P3".into(), burst: 0 };
        assert_eq!(err.process_id(), Some("P3"));
        assert_eq!(err.to_string(), "process 'P3': burst must be positive, got 0");

        let err = ValidationError::NonPositiveQuantum { quantum: -1 };
        assert_eq!(err.process_id(), None);
    }

    #[test]
    fn test_load_error_wraps_validation() {
        let err: LoadError = ValidationError::DuplicateId { id: "P1".into() }.into();
        assert!(err.to_string().contains("'P1'"));
    }
}
