use std::fmt;

use log::debug;

use super::TimeStep;
use crate::utils::constants::{LIFECYCLE_INSTRUCTIONS, LIFECYCLE_IO_WAIT, LIFECYCLE_QUANTUM};

const INSTRUCTION_SCORE: i64 = 10;
const IO_PENALTY: i64 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessState {
    New,
    Ready,
    Running,
    Waiting,
    Terminated,
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessState::New => "NEW",
            ProcessState::Ready => "READY",
            ProcessState::Running => "RUNNING",
            ProcessState::Waiting => "WAITING",
            ProcessState::Terminated => "TERMINATED",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Admit,
    Schedule,
    Execute,
    RequestIo,
    IoComplete,
    Preempt,
    Tick,
    Reset,
}

/// Decides, on each tick, whether a ready process gets the CPU.
pub trait Dispatcher {
    fn should_dispatch(&mut self, game_time: TimeStep) -> bool;
}

impl<F: FnMut(TimeStep) -> bool> Dispatcher for F {
    fn should_dispatch(&mut self, game_time: TimeStep) -> bool {
        self(game_time)
    }
}

/// Dispatches on every tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysDispatch;

impl Dispatcher for AlwaysDispatch {
    fn should_dispatch(&mut self, _: TimeStep) -> bool {
        true
    }
}

/// Dispatches on ticks whose game time is a multiple of `n`.
#[derive(Debug, Clone, Copy)]
pub struct EveryNthTick(pub TimeStep);

impl Dispatcher for EveryNthTick {
    fn should_dispatch(&mut self, game_time: TimeStep) -> bool {
        self.0 != 0 && game_time % self.0 == 0
    }
}

/// A single process walked through its states by user actions and ticks.
#[derive(Debug)]
pub struct ProcessLifecycle<D> {
    state: ProcessState,
    instructions_completed: usize,
    cpu_time_used: TimeStep, // Ticks spent running in the current quantum.
    io_timer: TimeStep,
    game_time: TimeStep,
    score: i64,
    message: String,
    preempted: bool,
    dispatcher: D,
}

impl<D: Dispatcher> ProcessLifecycle<D> {
    pub fn new(dispatcher: D) -> Self {
        Self {
            state: ProcessState::New,
            instructions_completed: 0,
            cpu_time_used: 0,
            io_timer: 0,
            game_time: 0,
            score: 0,
            message: "Game Started: Click 'Admit'!".to_string(),
            preempted: false,
            dispatcher,
        }
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn instructions_completed(&self) -> usize {
        self.instructions_completed
    }

    pub fn cpu_time_used(&self) -> TimeStep {
        self.cpu_time_used
    }

    pub fn io_timer(&self) -> TimeStep {
        self.io_timer
    }

    pub fn game_time(&self) -> TimeStep {
        self.game_time
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn was_preempted(&self) -> bool {
        self.preempted
    }

    pub fn is_game_over(&self) -> bool {
        self.state == ProcessState::Terminated
    }

    /// Applies `action`. Actions that make no sense in the current state are
    /// ignored.
    pub fn apply(&mut self, action: Action) {
        let before = self.state;
        match action {
            Action::Admit => self.admit(),
            Action::Schedule => self.schedule(),
            Action::Execute => self.execute(),
            Action::RequestIo => self.request_io(),
            Action::IoComplete => self.io_complete(),
            Action::Preempt => self.preempt(),
            Action::Tick => self.tick(),
            Action::Reset => self.reset(),
        }
        if before != self.state {
            debug!("{:?}: {} -> {}", action, before, self.state);
        }
    }

    fn admit(&mut self) {
        if self.state == ProcessState::New {
            self.state = ProcessState::Ready;
            self.message = "Process Ready! Waiting for scheduler...".to_string();
        }
    }

    fn schedule(&mut self) {
        if self.state == ProcessState::Ready {
            self.state = ProcessState::Running;
            self.cpu_time_used = 0;
            self.preempted = false;
            self.message = "Running on CPU!".to_string();
        }
    }

    fn execute(&mut self) {
        if self.state != ProcessState::Running || self.instructions_completed >= LIFECYCLE_INSTRUCTIONS {
            return;
        }

        self.instructions_completed += 1;
        self.score += INSTRUCTION_SCORE;
        if self.instructions_completed >= LIFECYCLE_INSTRUCTIONS {
            self.state = ProcessState::Terminated;
            self.message = "All Instructions Executed!".to_string();
        } else {
            self.message = format!(
                "Executed instruction {}/{}",
                self.instructions_completed, LIFECYCLE_INSTRUCTIONS
            );
        }
    }

    fn request_io(&mut self) {
        if self.state == ProcessState::Running {
            self.state = ProcessState::Waiting;
            self.io_timer = LIFECYCLE_IO_WAIT;
            self.score -= IO_PENALTY;
            self.message = format!("Waiting for I/O ({}s)...", LIFECYCLE_IO_WAIT);
        }
    }

    fn io_complete(&mut self) {
        if self.state == ProcessState::Waiting {
            self.state = ProcessState::Ready;
            self.message = "I/O Complete. Ready for CPU.".to_string();
        }
    }

    fn preempt(&mut self) {
        if self.state == ProcessState::Running {
            self.state = ProcessState::Ready;
            self.preempted = true;
            self.message = "Quantum Expired! Back to Ready queue.".to_string();
        }
    }

    fn tick(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.game_time += 1;

        match self.state {
            ProcessState::Waiting if self.io_timer > 0 => {
                self.io_timer -= 1;
                if self.io_timer == 0 {
                    self.io_complete();
                } else {
                    self.message = format!("Waiting for I/O ({}s left)...", self.io_timer);
                }
            }
            ProcessState::Running => {
                self.cpu_time_used += 1;
                if self.cpu_time_used >= LIFECYCLE_QUANTUM {
                    self.preempt();
                }
            }
            ProcessState::Ready => {
                if self.dispatcher.should_dispatch(self.game_time) {
                    self.schedule();
                }
            }
            _ => {}
        }
    }

    fn reset(&mut self) {
        self.state = ProcessState::New;
        self.instructions_completed = 0;
        self.cpu_time_used = 0;
        self.io_timer = 0;
        self.game_time = 0;
        self.score = 0;
        self.preempted = false;
        self.message = "Game Reset. Click 'Admit'!".to_string();
    }
}
