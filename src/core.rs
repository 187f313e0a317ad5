use log::info;

use crate::scheduler::{
    FirstComeFirstServed, MultiLevelFeedbackApprox, PriorityByBurst, Quantum, RoundRobin,
    Scheduler, ShortestJobFirst,
};
use crate::{Algorithm, ProcessDescriptor, Timeline, ValidationError, Workload};

/// Runs `algorithm` over an already validated workload.
pub fn simulation(algorithm: Algorithm, workload: &Workload, quantum: Quantum) -> Timeline {
    let scheduler = algorithm.scheduler(quantum);
    let timeline = scheduler.simulate(workload);
    info!(
        "{} scheduled {} processes into {} slices, makespan {}",
        algorithm,
        workload.len(),
        timeline.len(),
        timeline.makespan()
    );
    timeline
}

/// Validates `descriptors` and runs `algorithm` over them.
pub fn simulate(
    algorithm: Algorithm,
    descriptors: &[ProcessDescriptor],
    quantum: i64,
) -> Result<Timeline, ValidationError> {
    let quantum = Quantum::new(quantum)?;
    let workload = Workload::new(descriptors.to_vec())?;
    Ok(simulation(algorithm, &workload, quantum))
}

fn run(scheduler: impl Scheduler, descriptors: &[ProcessDescriptor]) -> Result<Timeline, ValidationError> {
    let workload = Workload::new(descriptors.to_vec())?;
    Ok(scheduler.simulate(&workload))
}

pub fn simulate_fcfs(descriptors: &[ProcessDescriptor]) -> Result<Timeline, ValidationError> {
    run(FirstComeFirstServed, descriptors)
}

pub fn simulate_sjf(descriptors: &[ProcessDescriptor]) -> Result<Timeline, ValidationError> {
    run(ShortestJobFirst, descriptors)
}

pub fn simulate_priority_by_burst(descriptors: &[ProcessDescriptor]) -> Result<Timeline, ValidationError> {
    run(PriorityByBurst, descriptors)
}

pub fn simulate_round_robin(
    descriptors: &[ProcessDescriptor],
    quantum: i64,
) -> Result<Timeline, ValidationError> {
    run(RoundRobin::new(Quantum::new(quantum)?), descriptors)
}

pub fn simulate_mlfq_approx(descriptors: &[ProcessDescriptor]) -> Result<Timeline, ValidationError> {
    run(MultiLevelFeedbackApprox::default(), descriptors)
}
