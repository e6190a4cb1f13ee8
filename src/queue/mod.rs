//! Serial animation queue.
//!
//! Every visual transition of the bar is a step pushed onto a [`TaskQueue`].
//! Steps are futures: a step holds the queue until it completes, and only then
//! does the next one start. Steps therefore run strictly in FIFO order and
//! never overlap, which keeps CSS transitions on the bar from fighting each
//! other. A step that never completes stalls every later step.
//!
//! Steps are drained by a Tokio task spawned on the runtime of the push (or
//! [`TaskQueue::idle`] call) that finds the queue without one. The task exits
//! once the queue is empty. If its runtime shuts down mid-drain, the step in
//! flight is lost but the remaining steps stay queued for the next runtime.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use parking_lot::Mutex;
//! use jprogress::queue::TaskQueue;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> jprogress::Result<()> {
//! let queue = TaskQueue::new();
//! let log = Arc::new(Mutex::new(Vec::new()));
//!
//! let a = log.clone();
//! queue.push(async move {
//!     tokio::time::sleep(Duration::from_millis(20)).await;
//!     a.lock().push("a");
//! })?;
//! let b = log.clone();
//! queue.push(async move { b.lock().push("b") })?;
//!
//! queue.idle().await;
//! assert_eq!(*log.lock(), vec!["a", "b"]);
//! # Ok(())
//! # }
//! ```

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::{Mutex, MutexGuard};
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// A queued animation step. Completing the future releases the queue.
pub type Step = BoxFuture<'static, ()>;

/// FIFO queue running one [`Step`] at a time.
pub struct TaskQueue {
    shared: Arc<QueueShared>,
}

struct QueueShared {
    state: Mutex<QueueState>,
    idle: Notify,
}

#[derive(Default)]
struct QueueState {
    steps: VecDeque<Step>,
    /// A step has been taken off `steps` and is being awaited.
    running: bool,
    /// A drain task owns the queue.
    draining: bool,
    /// Identifies the current drain task.
    epoch: u64,
}

impl QueueState {
    fn pending(&self) -> usize {
        self.steps.len() + usize::from(self.running)
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskQueue {
    /// Creates an empty queue. No task is spawned until the first push.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(QueueShared {
                state: Mutex::new(QueueState::default()),
                idle: Notify::new(),
            }),
        }
    }

    /// Appends `step` at the tail.
    ///
    /// If the queue was idle the step starts right away on a drain task;
    /// otherwise it waits for every earlier step to complete.
    ///
    /// Outside of a Tokio runtime this returns [`Error::NoRuntime`]. The step
    /// is still queued and runs after the next push or [`idle`](Self::idle)
    /// made from inside a runtime.
    pub fn push<F>(&self, step: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut state = self.shared.state.lock();
        state.steps.push_back(step.boxed());
        trace!("Queued animation step ({} pending)", state.pending());
        self.ensure_draining(state)
    }

    /// Number of steps queued or running.
    pub fn pending(&self) -> usize {
        self.shared.state.lock().pending()
    }

    /// Returns `true` when no step is queued or running.
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Waits until every step pushed so far has completed.
    ///
    /// Steps left behind by a push made outside a runtime, or by a runtime that
    /// shut down, are drained on the current runtime.
    pub async fn idle(&self) {
        if let Err(e) = self.ensure_draining(self.shared.state.lock()) {
            debug!("{e}");
        }
        loop {
            let notified = self.shared.idle.notified();
            if self.is_idle() {
                return;
            }
            notified.await;
        }
    }

    fn ensure_draining(&self, mut state: MutexGuard<'_, QueueState>) -> Result<()> {
        if state.draining || state.steps.is_empty() {
            return Ok(());
        }
        let handle = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        state.draining = true;
        state.epoch += 1;
        let guard = DrainGuard {
            shared: self.shared.clone(),
            epoch: state.epoch,
        };
        drop(state);

        trace!("Spawning animation queue drain #{}", guard.epoch);
        handle.spawn(drain(guard));
        Ok(())
    }
}

/// Releases the queue when its drain task ends, including when the task is
/// dropped by a runtime shutting down.
struct DrainGuard {
    shared: Arc<QueueShared>,
    epoch: u64,
}

impl Drop for DrainGuard {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        if state.draining && state.epoch == self.epoch {
            state.draining = false;
            state.running = false;
            if !state.steps.is_empty() {
                debug!(
                    "Animation queue drain stopped early, {} steps kept",
                    state.steps.len()
                );
            }
        }
        let idle = state.pending() == 0;
        drop(state);
        if idle {
            self.shared.idle.notify_waiters();
        }
    }
}

async fn drain(guard: DrainGuard) {
    loop {
        let step = {
            let mut state = guard.shared.state.lock();
            match state.steps.pop_front() {
                Some(step) => {
                    state.running = true;
                    step
                }
                None => {
                    state.draining = false;
                    state.running = false;
                    break;
                }
            }
        };
        step.await;
        guard.shared.state.lock().running = false;
    }
    trace!("Animation queue drained");
}
