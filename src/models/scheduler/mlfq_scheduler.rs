use std::collections::VecDeque;

use log::debug;

use super::{core::Cpu, rr_scheduler::Quantum, scheduler::Scheduler};
use crate::utils::constants::MLFQ_QUANTUM;
use crate::{Algorithm, Process, Timeline, TimeStep, Workload};

/// Two-level feedback queue without aging.
///
/// Every process first gets one slice of at most `quantum` in the top level,
/// in input order. A process that does not finish there is demoted to the
/// bottom level, which runs first-come first-served to completion in input
/// order once the top level is empty.
#[derive(Debug, Clone, Copy)]
pub struct MultiLevelFeedbackApprox {
    quantum: Quantum,
}

impl MultiLevelFeedbackApprox {
    pub fn new(quantum: Quantum) -> Self {
        Self { quantum }
    }

    pub fn quantum(&self) -> Quantum {
        self.quantum
    }
}

impl Default for MultiLevelFeedbackApprox {
    fn default() -> Self {
        Self::new(Quantum(MLFQ_QUANTUM))
    }
}

impl Scheduler for MultiLevelFeedbackApprox {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Mlfq
    }

    fn simulate(&self, workload: &Workload) -> Timeline {
        let mut cpu = Cpu::new(self.algorithm().color());
        let mut top: VecDeque<&Process> = workload.iter().collect();
        let mut demoted: Vec<(&Process, TimeStep)> = Vec::new();

        while let Some(process) = top.pop_front() {
            let slice = process.burst().min(self.quantum.get());
            cpu.dispatch(process, slice);

            if process.burst() > slice {
                debug!("demote {} with {} left", process.id(), process.burst() - slice);
                demoted.push((process, process.burst() - slice));
            }
        }

        for (process, remaining) in demoted {
            cpu.dispatch(process, remaining);
        }

        cpu.into_timeline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::scheduling_demo_workload;
    use crate::ProcessDescriptor;
    use pretty_assertions::assert_eq;

    fn bars(timeline: &Timeline) -> Vec<(&str, usize, usize)> {
        timeline.iter().map(|i| (i.process_id(), i.start(), i.duration())).collect()
    }

    #[test]
    fn test_demo_workload() {
        let workload = Workload::new(scheduling_demo_workload()).unwrap();
        let timeline = MultiLevelFeedbackApprox::default().simulate(&workload);

        assert_eq!(
            bars(&timeline),
            vec![
                ("P1", 0, 4),
                ("P2", 4, 4),
                ("P3", 8, 4),
                ("P4", 12, 3),
                ("P1", 15, 3),
                ("P3", 18, 1),
            ]
        );
        assert_eq!(timeline.executed("P1"), 7);
        assert!(timeline.is_contiguous());
    }

    #[test]
    fn test_short_processes_never_demoted() {
        let workload = Workload::new(vec![
            ProcessDescriptor::new("P1", 1),
            ProcessDescriptor::new("P2", 4),
        ])
        .unwrap();
        let timeline = MultiLevelFeedbackApprox::default().simulate(&workload);
        assert_eq!(bars(&timeline), vec![("P1", 0, 1), ("P2", 1, 4)]);
    }

    #[test]
    fn test_custom_quantum() {
        let workload = Workload::new(vec![
            ProcessDescriptor::new("P1", 5),
            ProcessDescriptor::new("P2", 2),
        ])
        .unwrap();
        let timeline = MultiLevelFeedbackApprox::new(Quantum::new(1).unwrap()).simulate(&workload);
        assert_eq!(bars(&timeline), vec![("P1", 0, 1), ("P2", 1, 1), ("P1", 2, 4), ("P2", 6, 1)]);
    }
}
