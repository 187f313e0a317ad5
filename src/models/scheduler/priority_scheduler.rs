use std::cmp::Reverse;

use super::{core::Cpu, scheduler::Scheduler};
use crate::{Algorithm, Process, Timeline, Workload};

/// Non-preemptive priority scheduling where the burst length doubles as the
/// priority: the longest burst runs first. Ties keep input order.
#[derive(Debug, Default, Clone, Copy)]
pub struct PriorityByBurst;

impl Scheduler for PriorityByBurst {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Priority
    }

    fn simulate(&self, workload: &Workload) -> Timeline {
        let mut order: Vec<&Process> = workload.iter().collect();
        order.sort_by_key(|p| Reverse(p.burst()));

        let mut cpu = Cpu::new(self.algorithm().color());
        cpu.run_to_completion(order);
        cpu.into_timeline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProcessDescriptor;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_longest_burst_first() {
        let workload = Workload::new(crate::utils::constants::scheduling_demo_workload()).unwrap();

        let timeline = PriorityByBurst.simulate(&workload);
        let bars: Vec<_> = timeline.iter().map(|i| (i.process_id(), i.start(), i.duration())).collect();
        assert_eq!(bars, vec![("P1", 0, 7), ("P3", 7, 5), ("P2", 12, 4), ("P4", 16, 3)]);
        assert!(timeline.iter().all(|i| i.color() == Algorithm::Priority.color()));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let workload = Workload::new(vec![
            ProcessDescriptor::new("X", 5),
            ProcessDescriptor::new("Y", 5),
        ])
        .unwrap();

        let ids: Vec<_> = PriorityByBurst
            .simulate(&workload)
            .iter()
            .map(|i| i.process_id().to_string())
            .collect();
        assert_eq!(ids, vec!["X", "Y"]);
    }
}
