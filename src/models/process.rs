use serde::Deserialize;

use super::{ProcessId, TimeStep};
use crate::ValidationError;

/// One row of a workload as supplied by the caller, before validation.
///
/// Numbers are signed so that out-of-range input reaches validation and is
/// reported against its process id instead of failing to parse.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ProcessDescriptor {
    pub id: ProcessId,
    pub burst: i64,
    #[serde(default)]
    pub arrival: Option<i64>,
}

impl ProcessDescriptor {
    pub fn new(id: impl Into<ProcessId>, burst: i64) -> Self {
        Self {
            id: id.into(),
            burst,
            arrival: None,
        }
    }

    pub fn with_arrival(id: impl Into<ProcessId>, burst: i64, arrival: i64) -> Self {
        Self {
            id: id.into(),
            burst,
            arrival: Some(arrival),
        }
    }

    /// Checks a single descriptor. `position` is its index in the workload.
    pub fn validate(self, position: usize) -> Result<Process, ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId { position });
        }
        if self.burst <= 0 {
            return Err(ValidationError::NonPositiveBurst {
                id: self.id,
                burst: self.burst,
            });
        }
        let arrival = self.arrival.unwrap_or(0);
        if arrival < 0 {
            return Err(ValidationError::NegativeArrival { id: self.id, arrival });
        }

        Ok(Process::new(self.id, self.burst as TimeStep, arrival as TimeStep))
    }
}

/// A validated process: non-empty id, positive burst.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Process {
    id: ProcessId,
    burst: TimeStep,   // Total CPU time required.
    arrival: TimeStep, // Time at which it becomes schedulable.
}

impl Process {
    fn new(id: ProcessId, burst: TimeStep, arrival: TimeStep) -> Self {
        Self { id, burst, arrival }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn burst(&self) -> TimeStep {
        self.burst
    }

    pub fn arrival(&self) -> TimeStep {
        self.arrival
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_defaults_arrival_to_zero() {
        let process = ProcessDescriptor::new("P1", 6).validate(0).unwrap();
        assert_eq!(process.id(), "P1");
        assert_eq!(process.burst(), 6);
        assert_eq!(process.arrival(), 0);
    }

    #[test]
    fn test_validate_rejects_zero_and_negative_burst() {
        for burst in [0, -3] {
            let err = ProcessDescriptor::new("P2", burst).validate(1).unwrap_err();
            assert_eq!(err, ValidationError::NonPositiveBurst { id: "P2".into(), burst });
        }
    }

    #[test]
    fn test_validate_rejects_negative_arrival() {
        let err = ProcessDescriptor::with_arrival("P1", 2, -1).validate(0).unwrap_err();
        assert_eq!(err.process_id(), Some("P1"));
    }

    #[test]
    fn test_validate_rejects_blank_id() {
        let err = ProcessDescriptor::new("  ", 2).validate(4).unwrap_err();
        assert_eq!(err, ValidationError::EmptyId { position: 4 });
    }
}
