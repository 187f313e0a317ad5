use std::collections::VecDeque;
use std::fmt;

use log::debug;

use super::{Process, ProcessDescriptor, ProcessId, TimeStep, Workload};
use crate::utils::constants::{EVENT_LOG_CAPACITY, EXECUTED_COLOR, PENDING_COLOR};
use crate::{ExecutionInterval, Timeline, ValidationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Started,
    Completed,
}

/// Something that happened to a process during a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepEvent {
    time: TimeStep,
    process_id: ProcessId,
    kind: EventKind,
}

impl StepEvent {
    pub fn new(time: TimeStep, process_id: impl Into<ProcessId>, kind: EventKind) -> Self {
        Self {
            time,
            process_id: process_id.into(),
            kind,
        }
    }

    pub fn time(&self) -> TimeStep {
        self.time
    }

    pub fn process_id(&self) -> &str {
        &self.process_id
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

impl fmt::Display for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EventKind::Started => write!(f, "t={}s ▶ {} starts", self.time, self.process_id),
            EventKind::Completed => write!(f, "t={}s ✓ {} done", self.time, self.process_id),
        }
    }
}

/// Fixed-capacity event history. The oldest entry is dropped when full.
#[derive(Clone, Debug)]
pub struct EventLog {
    entries: VecDeque<StepEvent>,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, event: StepEvent) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(event);
    }

    /// Empties the log. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepEvent> {
        self.entries.iter()
    }
}

/// A process together with the CPU time it still needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessProgress {
    process: Process,
    remaining: TimeStep,
}

impl ProcessProgress {
    fn new(process: Process) -> Self {
        let remaining = process.burst();
        Self { process, remaining }
    }

    pub fn id(&self) -> &str {
        self.process.id()
    }

    pub fn burst(&self) -> TimeStep {
        self.process.burst()
    }

    pub fn remaining(&self) -> TimeStep {
        self.remaining
    }

    pub fn executed(&self) -> TimeStep {
        self.burst() - self.remaining
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepperPhase {
    /// No tick yet.
    Idle,
    /// The process at this index holds the CPU.
    Running(usize),
    /// Every process is done. Terminal.
    AllComplete,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessSnapshot {
    pub id: ProcessId,
    pub remaining: TimeStep,
}

/// Read-only view handed to whoever renders the stepper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepperSnapshot {
    pub processes: Vec<ProcessSnapshot>,
    pub current_index: usize,
    pub elapsed_time: TimeStep,
    pub event_log: Vec<String>,
    pub is_complete: bool,
}

/// Tick-by-tick, non-preemptive FCFS over one CPU.
///
/// Arrival times are ignored: every process is present at t=0 and runs in
/// workload order. `current_index` never moves backwards.
#[derive(Clone, Debug)]
pub struct Stepper {
    workload: Workload,
    processes: Vec<ProcessProgress>,
    current_index: usize,
    elapsed_time: TimeStep,
    event_log: EventLog,
}

impl Stepper {
    /// Validates `descriptors` and builds an idle stepper over them.
    pub fn new(descriptors: Vec<ProcessDescriptor>) -> Result<Self, ValidationError> {
        Ok(Self::from_workload(Workload::new(descriptors)?))
    }

    pub fn from_workload(workload: Workload) -> Self {
        Self::with_log_capacity(workload, EVENT_LOG_CAPACITY)
    }

    pub fn with_log_capacity(workload: Workload, capacity: usize) -> Self {
        Self {
            processes: Self::fresh(&workload),
            workload,
            current_index: 0,
            elapsed_time: 0,
            event_log: EventLog::new(capacity),
        }
    }

    fn fresh(workload: &Workload) -> Vec<ProcessProgress> {
        workload.iter().cloned().map(ProcessProgress::new).collect()
    }

    pub fn processes(&self) -> &[ProcessProgress] {
        &self.processes
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn elapsed_time(&self) -> TimeStep {
        self.elapsed_time
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn is_complete(&self) -> bool {
        self.processes.iter().all(|p| p.is_complete())
    }

    pub fn phase(&self) -> StepperPhase {
        if self.is_complete() {
            StepperPhase::AllComplete
        } else if self.elapsed_time == 0 {
            StepperPhase::Idle
        } else {
            StepperPhase::Running(self.current_index)
        }
    }

    /// Gives the current process one unit of CPU.
    ///
    /// Returns `false`, leaving the state untouched, once every process is
    /// complete.
    pub fn advance_one_time_unit(&mut self) -> bool {
        let t = self.elapsed_time;
        let Some(process) = self.processes.get_mut(self.current_index) else {
            return false;
        };
        if process.is_complete() {
            return false;
        }

        process.remaining -= 1;
        if process.remaining + 1 == process.burst() {
            let event = StepEvent::new(t, process.id(), EventKind::Started);
            debug!("{}", event);
            self.event_log.push(event);
        }
        let completed = process.is_complete();
        if completed {
            let event = StepEvent::new(t + 1, process.id(), EventKind::Completed);
            debug!("{}", event);
            self.event_log.push(event);
        }

        self.elapsed_time += 1;
        if completed && self.current_index + 1 < self.processes.len() {
            self.current_index += 1;
        }
        true
    }

    /// Back to `Idle` with the original workload and an empty log.
    pub fn reset(&mut self) {
        self.processes = Self::fresh(&self.workload);
        self.current_index = 0;
        self.elapsed_time = 0;
        self.event_log.clear();
    }

    pub fn snapshot(&self) -> StepperSnapshot {
        StepperSnapshot {
            processes: self
                .processes
                .iter()
                .map(|p| ProcessSnapshot {
                    id: p.id().to_string(),
                    remaining: p.remaining(),
                })
                .collect(),
            current_index: self.current_index,
            elapsed_time: self.elapsed_time,
            event_log: self.event_log.iter().map(|e| e.to_string()).collect(),
            is_complete: self.is_complete(),
        }
    }

    /// The process on the CPU, if it still has work.
    pub fn running(&self) -> Option<&ProcessProgress> {
        self.processes
            .get(self.current_index)
            .filter(|p| !p.is_complete())
    }

    /// Processes waiting for the CPU, in the order they will get it.
    pub fn ready(&self) -> Vec<&ProcessProgress> {
        let skip = self.current_index + usize::from(self.running().is_some());
        self.processes
            .iter()
            .skip(skip)
            .filter(|p| !p.is_complete())
            .collect()
    }

    pub fn done(&self) -> Vec<&ProcessProgress> {
        self.processes.iter().filter(|p| p.is_complete()).collect()
    }

    /// Live Gantt view: each process laid out over its full burst, split into
    /// an executed segment and a pending segment.
    pub fn progress_timeline(&self) -> Timeline {
        let mut intervals = Vec::new();
        let mut cursor = 0;

        for process in &self.processes {
            let executed = process.executed();
            if executed > 0 {
                intervals.push(ExecutionInterval::new(process.id(), cursor, executed, EXECUTED_COLOR));
            }
            if process.remaining() > 0 {
                intervals.push(ExecutionInterval::new(
                    process.id(),
                    cursor + executed,
                    process.remaining(),
                    PENDING_COLOR,
                ));
            }
            cursor += process.burst();
        }

        Timeline::new(intervals)
    }
}
