//! Terminal mirror of a progress controller.
//!
//! [`TerminalView`] follows a controller's status through
//! [`ProgressController::subscribe`] and draws it on an indicatif bar, which
//! makes the widget usable from command line tools and handy while debugging
//! a document-backed run.
//!
//! # Examples
//!
//! ```rust
//! use jprogress::progress::{BarStyle, TerminalView};
//! use jprogress::{Options, ProgressController, VirtualDocument};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let progress = ProgressController::with_options(VirtualDocument::new(), Options::new().trickle(false));
//! let view = TerminalView::spawn(&progress, BarStyle::hidden());
//!
//! progress.start().set(0.5);
//! progress.done(false);
//!
//! let bar = view.join().await;
//! assert!(bar.is_finished());
//! # }
//! ```

use indicatif::ProgressBar;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::controller::ProgressController;
use crate::dom::Document;
use crate::progress::BarStyle;

/// Resolution of the terminal bar: a status of 1 maps to this many ticks.
pub const TICKS: u64 = 1000;

/// A terminal bar following one run of a controller.
///
/// The view ends when the run it observed completes (the status returns to
/// `None`), or when the controller is dropped. A run that completed before the
/// view task was first polled still finishes the bar.
pub struct TerminalView {
    bar: ProgressBar,
    task: JoinHandle<()>,
}

impl TerminalView {
    /// Spawns the view on the current Tokio runtime.
    pub fn spawn<D: Document>(controller: &ProgressController<D>, style: BarStyle) -> Self {
        let mut status = controller.subscribe();
        let bar = style.to_progress_bar(TICKS);
        let clear = style.clears();

        let task_bar = bar.clone();
        let task = tokio::spawn(async move {
            let mut observed_run = false;
            loop {
                let (current, fresh) = {
                    let seen = status.borrow_and_update();
                    (*seen, seen.has_changed())
                };
                match current {
                    Some(n) => {
                        observed_run = true;
                        task_bar.set_position(to_ticks(n));
                        trace!("Terminal bar at {n}");
                    }
                    None if observed_run || fresh => {
                        task_bar.set_position(TICKS);
                        if clear {
                            task_bar.finish_and_clear();
                        } else {
                            task_bar.finish();
                        }
                        debug!("Terminal bar finished");
                        return;
                    }
                    None => {}
                }
                if status.changed().await.is_err() {
                    task_bar.abandon();
                    return;
                }
            }
        });

        Self { bar, task }
    }

    /// The underlying indicatif bar.
    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    /// Waits for the observed run to complete and returns the bar.
    pub async fn join(self) -> ProgressBar {
        if let Err(e) = self.task.await {
            debug!("Terminal view task ended abnormally: {e}");
        }
        self.bar
    }

    /// Stops following the controller, leaving the bar as drawn.
    pub fn abort(&self) {
        self.task.abort();
    }
}

fn to_ticks(status: f64) -> u64 {
    (status.clamp(0.0, 1.0) * TICKS as f64).round() as u64
}
