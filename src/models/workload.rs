use std::collections::HashSet;

use super::{Process, ProcessDescriptor, TimeStep};
use crate::ValidationError;

/// An ordered, validated list of processes sharing one CPU.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Workload {
    processes: Vec<Process>,
}

impl Workload {
    /// Validates every descriptor, in order, and fails on the first bad one.
    pub fn new(descriptors: Vec<ProcessDescriptor>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(descriptors.len());
        let mut processes = Vec::with_capacity(descriptors.len());

        for (position, descriptor) in descriptors.into_iter().enumerate() {
            let process = descriptor.validate(position)?;
            if !seen.insert(process.id().to_string()) {
                return Err(ValidationError::DuplicateId {
                    id: process.id().to_string(),
                });
            }
            processes.push(process);
        }

        Ok(Self { processes })
    }

    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn get(&self, index: usize) -> Option<&Process> {
        self.processes.get(index)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Sum of all bursts, i.e. the length of any gap-free timeline.
    pub fn total_burst(&self) -> TimeStep {
        self.processes.iter().map(|p| p.burst()).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Process> {
        self.processes.iter()
    }
}

impl<'a> IntoIterator for &'a Workload {
    type Item = &'a Process;
    type IntoIter = std::slice::Iter<'a, Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_input_order() {
        let workload = Workload::new(vec![
            ProcessDescriptor::new("P2", 4),
            ProcessDescriptor::new("P1", 6),
        ])
        .unwrap();

        let ids: Vec<_> = workload.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["P2", "P1"]);
        assert_eq!(workload.total_burst(), 10);
        assert_eq!(workload.get(1).map(|p| p.burst()), Some(6));
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let err = Workload::new(vec![
            ProcessDescriptor::new("P1", 4),
            ProcessDescriptor::new("P2", 1),
            ProcessDescriptor::new("P1", 6),
        ])
        .unwrap_err();

        assert_eq!(err, ValidationError::DuplicateId { id: "P1".into() });
    }

    #[test]
    fn test_new_reports_first_invalid_process() {
        let err = Workload::new(vec![
            ProcessDescriptor::new("P1", 4),
            ProcessDescriptor::new("P2", 0),
            ProcessDescriptor::new("P3", -1),
        ])
        .unwrap_err();

        assert_eq!(err.process_id(), Some("P2"));
    }

    #[test]
    fn test_empty_workload() {
        let workload = Workload::new(Vec::new()).unwrap();
        assert!(workload.is_empty());
        assert_eq!(workload, Workload::new_empty());
        assert_eq!(workload.total_burst(), 0);
    }
}
