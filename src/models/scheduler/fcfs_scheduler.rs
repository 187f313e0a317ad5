use super::{core::Cpu, scheduler::Scheduler};
use crate::{Algorithm, Process, Timeline, Workload};

/// First-Come, First-Served: arrival order, no preemption.
///
/// Arrival only decides the order; the CPU never idles waiting for a late
/// arrival.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstComeFirstServed;

impl Scheduler for FirstComeFirstServed {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Fcfs
    }

    fn simulate(&self, workload: &Workload) -> Timeline {
        let mut order: Vec<&Process> = workload.iter().collect();
        // Stable: equal arrivals keep input order.
        order.sort_by_key(|p| p.arrival());

        let mut cpu = Cpu::new(self.algorithm().color());
        cpu.run_to_completion(order);
        cpu.into_timeline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExecutionInterval, ProcessDescriptor};
    use pretty_assertions::assert_eq;

    fn bars(timeline: &Timeline) -> Vec<(&str, usize, usize)> {
        timeline.iter().map(|i| (i.process_id(), i.start(), i.duration())).collect()
    }

    #[test]
    fn test_single_process() {
        let workload = Workload::new(vec![ProcessDescriptor::new("P1", 6)]).unwrap();
        let timeline = FirstComeFirstServed.simulate(&workload);

        assert_eq!(
            timeline.intervals(),
            &[ExecutionInterval::new("P1", 0, 6, Algorithm::Fcfs.color())]
        );
    }

    #[test]
    fn test_orders_by_arrival_then_input() {
        let workload = Workload::new(vec![
            ProcessDescriptor::with_arrival("P1", 2, 5),
            ProcessDescriptor::with_arrival("P2", 3, 0),
            ProcessDescriptor::with_arrival("P3", 1, 5),
            ProcessDescriptor::new("P4", 4),
        ])
        .unwrap();

        let timeline = FirstComeFirstServed.simulate(&workload);
        assert_eq!(
            bars(&timeline),
            vec![("P2", 0, 3), ("P4", 3, 4), ("P1", 7, 2), ("P3", 9, 1)]
        );
    }

    #[test]
    fn test_demo_workload() {
        let workload = Workload::new(crate::utils::constants::scheduling_demo_workload()).unwrap();
        let timeline = FirstComeFirstServed.simulate(&workload);
        assert_eq!(
            bars(&timeline),
            vec![("P1", 0, 7), ("P2", 7, 4), ("P3", 11, 5), ("P4", 16, 3)]
        );
    }

    #[test]
    fn test_empty_workload() {
        assert!(FirstComeFirstServed.simulate(&Workload::new_empty()).is_empty());
    }
}
