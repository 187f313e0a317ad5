use super::{core::Cpu, scheduler::Scheduler};
use crate::{Algorithm, Process, Timeline, Workload};

/// Non-preemptive Shortest Job First. Ties keep input order.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortestJobFirst;

impl Scheduler for ShortestJobFirst {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sjf
    }

    fn simulate(&self, workload: &Workload) -> Timeline {
        let mut order: Vec<&Process> = workload.iter().collect();
        order.sort_by_key(|p| p.burst());

        let mut cpu = Cpu::new(self.algorithm().color());
        cpu.run_to_completion(order);
        cpu.into_timeline()
    }
}
