//! CPU scheduling simulations for teaching.
//!
//! Batch schedulers turn a small workload into a Gantt timeline; the
//! [`Stepper`] replays FCFS one time unit at a time for live views.

mod core;
pub mod models;
pub mod utils;

pub use crate::core::{
    simulate, simulate_fcfs, simulate_mlfq_approx, simulate_priority_by_burst,
    simulate_round_robin, simulate_sjf, simulation,
};
pub use models::{
    scheduler, Advance, AutoAdvance, DeadlockScenario, DeadlockSnapshot, ExecutionInterval,
    Process, ProcessDescriptor, ProcessId, Stepper, StepperPhase, StepperSnapshot, TimeStep,
    Timeline, Workload,
};
pub use utils::{constants, Algorithm, LoadError, UnknownAlgorithm, ValidationError};
