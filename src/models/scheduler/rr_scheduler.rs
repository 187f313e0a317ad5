use std::collections::VecDeque;

use super::{core::Cpu, scheduler::Scheduler};
use crate::{Algorithm, Process, Timeline, TimeStep, ValidationError, Workload};

/// Maximum contiguous time units granted per dispatch. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantum(pub(super) TimeStep);

impl Quantum {
    pub fn new(quantum: i64) -> Result<Self, ValidationError> {
        if quantum <= 0 {
            return Err(ValidationError::NonPositiveQuantum { quantum });
        }
        Ok(Self(quantum as TimeStep))
    }

    pub fn get(&self) -> TimeStep {
        self.0
    }
}

/// Round Robin over a FIFO ready queue seeded in input order.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: Quantum,
}

impl RoundRobin {
    pub fn new(quantum: Quantum) -> Self {
        Self { quantum }
    }

    pub fn quantum(&self) -> Quantum {
        self.quantum
    }
}

/// Drains `queue` round-robin on `cpu`: the head runs for at most one
/// quantum and goes back to the tail while it still has work.
fn round_robin<'a>(
    cpu: &mut Cpu,
    queue: &mut VecDeque<(&'a Process, TimeStep)>,
    quantum: Quantum,
) {
    while let Some((process, remaining)) = queue.pop_front() {
        let slice = remaining.min(quantum.get());
        cpu.dispatch(process, slice);

        let remaining = remaining - slice;
        if remaining > 0 {
            queue.push_back((process, remaining));
        }
    }
}

impl Scheduler for RoundRobin {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RoundRobin
    }

    fn simulate(&self, workload: &Workload) -> Timeline {
        let mut queue: VecDeque<(&Process, TimeStep)> =
            workload.iter().map(|p| (p, p.burst())).collect();

        let mut cpu = Cpu::new(self.algorithm().color());
        round_robin(&mut cpu, &mut queue, self.quantum);
        cpu.into_timeline()
    }
}
