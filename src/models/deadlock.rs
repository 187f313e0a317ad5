use std::fmt;

use log::debug;

use super::ticker::Advance;

/// The four requests that lead two processes into a deadlock, in order.
const STEPS: [&str; 4] = [
    "P1 requests R1 and obtains it",
    "P2 requests R2 and obtains it",
    "P1 now requests R2 (held by P2); P1 blocks",
    "P2 requests R1 (held by P1); P2 blocks",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contender {
    P1,
    P2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    R1,
    R2,
}

impl fmt::Display for Contender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Contender::P1 => "P1",
            Contender::P2 => "P2",
        })
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::R1 => "R1",
            Resource::R2 => "R2",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContenderStatus {
    Idle,
    Running,
    Blocked,
}

/// Coffman conditions; a deadlock needs all four at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoffmanConditions {
    pub mutual_exclusion: bool,
    pub hold_and_wait: bool,
    pub no_preemption: bool,
    pub circular_wait: bool,
}

impl CoffmanConditions {
    pub fn all_met(&self) -> bool {
        self.mutual_exclusion && self.hold_and_wait && self.no_preemption && self.circular_wait
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeadlockSnapshot {
    pub step: usize,
    pub description: Option<&'static str>,
    pub p1: ContenderStatus,
    pub p2: ContenderStatus,
    pub r1_holder: Option<Contender>,
    pub r2_holder: Option<Contender>,
    pub conditions: CoffmanConditions,
    pub is_deadlocked: bool,
}

/// Two processes and two non-shareable resources walked, one request per
/// step, into a circular wait.
///
/// Step 0 is the initial state. Resources are never taken back, so the
/// scenario ends deadlocked after the last step and stays there until reset.
#[derive(Clone, Debug, Default)]
pub struct DeadlockScenario {
    step: usize,
}

impl DeadlockScenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn step_count() -> usize {
        STEPS.len()
    }

    /// Text of the last request made, `None` before the first one.
    pub fn description(&self) -> Option<&'static str> {
        self.step.checked_sub(1).map(|i| STEPS[i])
    }

    pub fn is_deadlocked(&self) -> bool {
        self.step == STEPS.len()
    }

    /// Makes the next request. Returns `false` once deadlocked.
    pub fn step_forward(&mut self) -> bool {
        if self.is_deadlocked() {
            return false;
        }
        self.step += 1;
        debug!("deadlock step {}: {}", self.step, STEPS[self.step - 1]);
        true
    }

    pub fn reset(&mut self) {
        self.step = 0;
    }

    pub fn holder(&self, resource: Resource) -> Option<Contender> {
        match resource {
            Resource::R1 if self.step >= 1 => Some(Contender::P1),
            Resource::R2 if self.step >= 2 => Some(Contender::P2),
            _ => None,
        }
    }

    /// Resource the process is blocked on.
    pub fn waiting_for(&self, contender: Contender) -> Option<Resource> {
        match contender {
            Contender::P1 if self.step >= 3 => Some(Resource::R2),
            Contender::P2 if self.step >= 4 => Some(Resource::R1),
            _ => None,
        }
    }

    fn holds_any(&self, contender: Contender) -> bool {
        [Resource::R1, Resource::R2]
            .into_iter()
            .any(|r| self.holder(r) == Some(contender))
    }

    pub fn status(&self, contender: Contender) -> ContenderStatus {
        if self.waiting_for(contender).is_some() {
            ContenderStatus::Blocked
        } else if self.holds_any(contender) {
            ContenderStatus::Running
        } else {
            ContenderStatus::Idle
        }
    }

    /// Follows wait-for edges from `start`; true when they lead back to it.
    fn in_cycle(&self, start: Contender) -> bool {
        let mut current = start;
        for _ in 0..2 {
            match self.waiting_for(current).and_then(|r| self.holder(r)) {
                Some(next) if next == start => return true,
                Some(next) => current = next,
                None => return false,
            }
        }
        false
    }

    pub fn conditions(&self) -> CoffmanConditions {
        let contenders = [Contender::P1, Contender::P2];
        CoffmanConditions {
            mutual_exclusion: self.holder(Resource::R1).is_some() || self.holder(Resource::R2).is_some(),
            hold_and_wait: contenders
                .into_iter()
                .any(|c| self.holds_any(c) && self.waiting_for(c).is_some()),
            no_preemption: true,
            circular_wait: contenders.into_iter().any(|c| self.in_cycle(c)),
        }
    }

    pub fn snapshot(&self) -> DeadlockSnapshot {
        DeadlockSnapshot {
            step: self.step,
            description: self.description(),
            p1: self.status(Contender::P1),
            p2: self.status(Contender::P2),
            r1_holder: self.holder(Resource::R1),
            r2_holder: self.holder(Resource::R2),
            conditions: self.conditions(),
            is_deadlocked: self.is_deadlocked(),
        }
    }
}

impl Advance for DeadlockScenario {
    type Snapshot = DeadlockSnapshot;

    fn advance(&mut self) -> bool {
        self.step_forward()
    }

    fn is_complete(&self) -> bool {
        self.is_deadlocked()
    }

    fn snapshot(&self) -> DeadlockSnapshot {
        DeadlockScenario::snapshot(self)
    }

    fn reset(&mut self) {
        DeadlockScenario::reset(self)
    }
}
