use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::models::scheduler::{
    FirstComeFirstServed, MultiLevelFeedbackApprox, PriorityByBurst, Quantum, RoundRobin,
    Scheduler, ShortestJobFirst,
};
use crate::utils::errors::UnknownAlgorithm;
use crate::ProcessDescriptor;

/// Quantum used by the Round Robin demonstration.
pub const DEFAULT_RR_QUANTUM: usize = 3;

/// Fixed quantum of the first MLFQ phase.
pub const MLFQ_QUANTUM: usize = 4;

/// Number of events the stepper keeps before dropping the oldest.
pub const EVENT_LOG_CAPACITY: usize = 8;

/// Period between two automatic stepper advances.
pub const AUTO_ADVANCE_INTERVAL: Duration = Duration::from_millis(850);

/// Period between two automatic steps of the deadlock scenario.
pub const DEADLOCK_STEP_INTERVAL: Duration = Duration::from_millis(1200);

/// Ticks a process may stay on the CPU before being preempted.
pub const LIFECYCLE_QUANTUM: usize = 5;
/// Instructions to execute before the process terminates.
pub const LIFECYCLE_INSTRUCTIONS: usize = 20;
/// Ticks an I/O request keeps the process waiting.
pub const LIFECYCLE_IO_WAIT: usize = 4;

/// Color of the executed part of a process in the live progress timeline.
pub const EXECUTED_COLOR: &str = "#16a34a";
/// Color of the part still to run.
pub const PENDING_COLOR: &str = "#64748b";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Fcfs,
    Sjf,
    Priority,
    RoundRobin,
    Mlfq,
}

impl Algorithm {
    /// Catalog order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Priority,
        Algorithm::RoundRobin,
        Algorithm::Mlfq,
    ];

    /// Short identifier accepted on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::Sjf => "sjf",
            Algorithm::Priority => "priority",
            Algorithm::RoundRobin => "rr",
            Algorithm::Mlfq => "mlfq",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::Priority => "Priority",
            Algorithm::RoundRobin => "Round Robin",
            Algorithm::Mlfq => "MLFQ",
        }
    }

    /// Color tag stamped on every interval the algorithm emits.
    pub fn color(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "#0284c7",
            Algorithm::Sjf => "#10b981",
            Algorithm::Priority => "#fbbf24",
            Algorithm::RoundRobin => "#ef4444",
            Algorithm::Mlfq => "#64748b",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "First-Come, First-Served: no preemption, in arrival order.",
            Algorithm::Sjf => "Shortest Job First: pick the smallest next burst.",
            Algorithm::Priority => "Priority Scheduling: highest-priority first.",
            Algorithm::RoundRobin => "Round Robin: time-quantum sharing.",
            Algorithm::Mlfq => "Multi-Level Feedback Queue: adapt by aging.",
        }
    }

    /// Whether the algorithm can interrupt a process before its burst is done.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Algorithm::RoundRobin | Algorithm::Mlfq)
    }

    /// Builds the scheduler for this algorithm.
    ///
    /// `quantum` is only read by Round Robin; the MLFQ approximation always
    /// uses [`MLFQ_QUANTUM`].
    pub fn scheduler(&self, quantum: Quantum) -> Box<dyn Scheduler> {
        match self {
            Algorithm::Fcfs => Box::new(FirstComeFirstServed),
            Algorithm::Sjf => Box::new(ShortestJobFirst),
            Algorithm::Priority => Box::new(PriorityByBurst),
            Algorithm::RoundRobin => Box::new(RoundRobin::new(quantum)),
            Algorithm::Mlfq => Box::new(MultiLevelFeedbackApprox::default()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.id() == needle)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Workload of the live FCFS stepper and the Round Robin visualizer.
pub fn stepper_demo_workload() -> Vec<ProcessDescriptor> {
    vec![
        ProcessDescriptor::new("P1", 6),
        ProcessDescriptor::new("P2", 4),
        ProcessDescriptor::new("P3", 5),
    ]
}

/// Workload of the algorithm comparison page.
pub fn scheduling_demo_workload() -> Vec<ProcessDescriptor> {
    vec![
        ProcessDescriptor::with_arrival("P1", 7, 0),
        ProcessDescriptor::with_arrival("P2", 4, 1),
        ProcessDescriptor::with_arrival("P3", 5, 2),
        ProcessDescriptor::with_arrival("P4", 3, 3),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_algorithm_ids() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.id().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!(" RR ".parse::<Algorithm>(), Ok(Algorithm::RoundRobin));
    }

    #[test]
    fn test_parse_unknown_algorithm() {
        let err = "edf".parse::<Algorithm>().unwrap_err();
        assert_eq!(err, UnknownAlgorithm("edf".to_string()));
        assert!(err.to_string().contains("edf"));
    }

    #[test]
    fn test_preemptive_algorithms() {
        let preemptive: Vec<_> = Algorithm::ALL.into_iter().filter(|a| a.is_preemptive()).collect();
        assert_eq!(preemptive, vec![Algorithm::RoundRobin, Algorithm::Mlfq]);
    }

    #[test]
    fn test_scheduler_reports_its_algorithm() {
        let quantum = Quantum::new(DEFAULT_RR_QUANTUM as i64).unwrap();
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.scheduler(quantum).algorithm(), algorithm);
        }
    }
}
