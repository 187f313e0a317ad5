mod process;
mod workload;
mod interval;
pub mod scheduler;
pub mod stepper;
pub mod ticker;
pub mod lifecycle;
pub mod deadlock;

pub use process::{Process, ProcessDescriptor};
pub use workload::Workload;
pub use interval::{ExecutionInterval, Timeline};
pub use stepper::{Stepper, StepperPhase, StepperSnapshot};
pub use ticker::{Advance, AutoAdvance};
pub use deadlock::{DeadlockScenario, DeadlockSnapshot};

/// Simulated time, in whole units.
pub type TimeStep = usize;

pub type ProcessId = String;
