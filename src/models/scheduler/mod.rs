pub mod core;
pub mod scheduler;
pub mod fcfs_scheduler;
pub mod sjf_scheduler;
pub mod priority_scheduler;
pub mod rr_scheduler;
pub mod mlfq_scheduler;

pub use self::core::Cpu;
pub use scheduler::Scheduler;
pub use fcfs_scheduler::FirstComeFirstServed;
pub use sjf_scheduler::ShortestJobFirst;
pub use priority_scheduler::PriorityByBurst;
pub use rr_scheduler::{Quantum, RoundRobin};
pub use mlfq_scheduler::MultiLevelFeedbackApprox;
