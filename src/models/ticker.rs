use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info};

use super::stepper::{Stepper, StepperSnapshot};

/// A state machine that moves forward one tick at a time until it is complete.
pub trait Advance: Send + 'static {
    type Snapshot;

    /// Moves one tick forward. Returns `false` when nothing changed.
    fn advance(&mut self) -> bool;
    fn is_complete(&self) -> bool;
    fn snapshot(&self) -> Self::Snapshot;
    fn reset(&mut self);
}

impl Advance for Stepper {
    type Snapshot = StepperSnapshot;

    fn advance(&mut self) -> bool {
        self.advance_one_time_unit()
    }

    fn is_complete(&self) -> bool {
        Stepper::is_complete(self)
    }

    fn snapshot(&self) -> StepperSnapshot {
        Stepper::snapshot(self)
    }

    fn reset(&mut self) {
        Stepper::reset(self)
    }
}

pub type Shared<T> = Arc<Mutex<T>>;
pub type SharedStepper = Shared<Stepper>;

/// Called with the driven state after every automatic advance.
pub type Observer<S> = Arc<dyn Fn(&S) + Send + Sync>;

fn lock<T>(shared: &Shared<T>) -> MutexGuard<'_, T> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct Ticker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

/// Periodic driver for a shared [`Advance`] state machine, a [`Stepper`] by
/// default.
///
/// Advances happen under the mutex, so they never interleave with each other
/// or with a manual advance made through the same mutex. The observer runs
/// after the lock is released and may lock the shared state itself. The
/// ticker stops by itself once the state machine is complete.
pub struct AutoAdvance<T: Advance = Stepper> {
    target: Shared<T>,
    observer: Option<Observer<T::Snapshot>>,
    ticker: Option<Ticker>,
}

impl<T: Advance> AutoAdvance<T> {
    pub fn new(target: Shared<T>) -> Self {
        Self {
            target,
            observer: None,
            ticker: None,
        }
    }

    pub fn with_observer(target: Shared<T>, observer: Observer<T::Snapshot>) -> Self {
        Self {
            target,
            observer: Some(observer),
            ticker: None,
        }
    }

    pub fn target(&self) -> &Shared<T> {
        &self.target
    }

    /// True while a ticker thread is scheduled to advance the target.
    pub fn is_active(&self) -> bool {
        self.ticker
            .as_ref()
            .map_or(false, |ticker| !ticker.handle.is_finished())
    }

    /// Starts advancing every `interval`.
    ///
    /// Returns `false` and does nothing when a ticker is already running or
    /// the target is already complete.
    pub fn request_auto_advance(&mut self, interval: Duration) -> bool {
        if self.is_active() {
            return false;
        }
        // Reap a ticker that stopped on its own.
        self.cancel_auto_advance();

        if lock(&self.target).is_complete() {
            return false;
        }

        let (stop, stopped) = mpsc::channel::<()>();
        let target = Arc::clone(&self.target);
        let observer = self.observer.clone();

        info!("auto-advance every {:?}", interval);
        let handle = thread::spawn(move || loop {
            match stopped.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {}
                // Stop requested or owner gone.
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }

            let mut guard = lock(&target);
            guard.advance();
            let snapshot = observer.as_ref().map(|_| guard.snapshot());
            let complete = guard.is_complete();
            drop(guard);
            if let (Some(observer), Some(snapshot)) = (&observer, snapshot) {
                observer(&snapshot);
            }
            if complete {
                debug!("target complete, auto-advance stops");
                break;
            }
        });

        self.ticker = Some(Ticker { stop, handle });
        true
    }

    /// Stops the ticker. No advance happens after this returns.
    pub fn cancel_auto_advance(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            // The thread may already be gone; a failed send is fine.
            let _ = ticker.stop.send(());
            if ticker.handle.join().is_err() {
                debug!("auto-advance thread panicked");
            }
            info!("auto-advance cancelled");
        }
    }

    /// Blocks until the running ticker stops by itself.
    pub fn wait(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            if ticker.handle.join().is_err() {
                debug!("auto-advance thread panicked");
            }
        }
    }

    /// Cancels any ticker, then resets the target.
    pub fn reset(&mut self) {
        self.cancel_auto_advance();
        lock(&self.target).reset();
    }
}

impl<T: Advance> Drop for AutoAdvance<T> {
    fn drop(&mut self) {
        self.cancel_auto_advance();
    }
}
