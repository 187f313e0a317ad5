use log::debug;

use crate::{ExecutionInterval, Process, Timeline, TimeStep};

/// The single simulated CPU.
///
/// Slices are appended back to back, so a timeline built through `Cpu` is
/// gap-free and non-overlapping by construction. Dispatching the process that
/// already holds the CPU extends its current slice instead of opening a new
/// one.
#[derive(Debug)]
pub struct Cpu {
    current_time: TimeStep,
    intervals: Vec<ExecutionInterval>,
    color: &'static str,
}

impl Cpu {
    /// Creates an idle CPU at time 0 whose slices carry `color`.
    pub fn new(color: &'static str) -> Self {
        Self {
            current_time: 0,
            intervals: Vec::new(),
            color,
        }
    }

    pub fn current_time(&self) -> TimeStep {
        self.current_time
    }

    /// Gives `process` the CPU for `duration` units starting now.
    ///
    /// A zero-length dispatch emits nothing.
    pub fn dispatch(&mut self, process: &Process, duration: TimeStep) {
        if duration == 0 {
            return;
        }

        debug!(
            "dispatch {} at t={} for {}",
            process.id(),
            self.current_time,
            duration
        );
        match self.intervals.last_mut() {
            Some(last) if last.process_id() == process.id() => last.extend(duration),
            _ => self.intervals.push(ExecutionInterval::new(
                process.id(),
                self.current_time,
                duration,
                self.color,
            )),
        }
        self.current_time += duration;
    }

    /// Runs each process for its whole burst, in the given order.
    pub fn run_to_completion<'a, I>(&mut self, processes: I)
    where
        I: IntoIterator<Item = &'a Process>,
    {
        for process in processes {
            self.dispatch(process, process.burst());
        }
    }

    pub fn into_timeline(self) -> Timeline {
        Timeline::new(self.intervals)
    }
}
