//! Core progress controller.
//!
//! This module contains [`ProgressController`], which owns the settings, the
//! current status, the injected [`Document`] and the animation queue. Status
//! changes are applied to the document immediately (mounting the progress
//! element when needed) while the visual transition itself is queued, so
//! consecutive updates animate one after the other.
//!
//! # Examples
//!
//! ## Manual Control
//!
//! ```rust
//! use jprogress::{Options, ProgressController, VirtualDocument};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let progress = ProgressController::with_options(
//!     VirtualDocument::new(),
//!     Options::new().trickle(false),
//! );
//!
//! progress.start().set(0.4).inc(None);
//! assert!(progress.is_rendered());
//!
//! progress.done(false);
//! assert_eq!(progress.status(), None);
//!
//! progress.idle().await;
//! assert!(!progress.is_rendered());
//! # }
//! ```
//!
//! ## Tracking a Future
//!
//! ```rust
//! use jprogress::{ProgressController, VirtualDocument};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let progress = ProgressController::new(VirtualDocument::new());
//! let answer = progress.track(async { 42 }).await;
//! assert_eq!(answer, 42);
//! assert!(!progress.is_started());
//! # }
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};
use rand::Rng;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, trace, warn};

use super::config::{Parent, Settings, BUSY_CLASS, CUSTOM_PARENT_CLASS, PROGRESS_ID};
use super::options::Options;
use crate::css::{self, bar_position_css, PositionUsing};
use crate::dom::{add_class, remove_class, Document, NodeId, VirtualDocument};
use crate::queue::TaskQueue;
use crate::utils::{clamp, to_bar_perc, trickle_amount, INC_CEILING};

/// Represents the progress bar controller.
///
/// Cloning is cheap and every clone drives the same bar. Operations that need
/// timers (the animation queue and the trickle loop) must be called from
/// inside a Tokio runtime; outside of one, document updates still happen but
/// animations wait for the next call made from a runtime.
pub struct ProgressController<D: Document = VirtualDocument> {
    shared: Arc<Shared<D>>,
}

struct Shared<D> {
    /// Locked before `document` whenever both are needed.
    state: Mutex<State>,
    document: Mutex<D>,
    queue: TaskQueue,
    status: watch::Sender<Option<f64>>,
}

struct State {
    settings: Settings,
    status: Option<f64>,
    mounted: Option<NodeId>,
    /// The trickle loop currently running, if any.
    trickling: Option<u64>,
    trickle_runs: u64,
}

/// A run is active while the status is a non-zero number.
fn is_running(status: Option<f64>) -> bool {
    matches!(status, Some(n) if n != 0.0)
}

impl<D: Document> Clone for ProgressController<D> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<D: Document> fmt::Debug for ProgressController<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("ProgressController")
            .field("settings", &state.settings)
            .field("status", &state.status)
            .field("mounted", &state.mounted)
            .field("pending_steps", &self.shared.queue.pending())
            .finish()
    }
}

impl Default for ProgressController<VirtualDocument> {
    fn default() -> Self {
        Self::new(VirtualDocument::new())
    }
}

impl<D: Document> ProgressController<D> {
    /// Creates a controller with the default settings.
    pub fn new(document: D) -> Self {
        Self::with_options(document, Options::default())
    }

    /// Creates a controller, overriding the defaults with `options`.
    pub fn with_options(document: D, options: Options) -> Self {
        let settings = options.into_settings();
        debug!("Creating progress controller with {:?}", settings);
        let (status, _) = watch::channel(None);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    settings,
                    status: None,
                    mounted: None,
                    trickling: None,
                    trickle_runs: 0,
                }),
                document: Mutex::new(document),
                queue: TaskQueue::new(),
                status,
            }),
        }
    }

    /// Merges `options` into the current settings.
    pub fn configure(&self, options: Options) -> &Self {
        let mut state = self.shared.state.lock();
        options.merge_into(&mut state.settings);
        debug!("Reconfigured progress controller: {:?}", state.settings);
        self
    }

    /// Returns a copy of the current settings.
    pub fn settings(&self) -> Settings {
        self.shared.state.lock().settings.clone()
    }

    /// Current status: `Some` while a run is in progress, `None` otherwise.
    pub fn status(&self) -> Option<f64> {
        self.shared.state.lock().status
    }

    /// Whether the status is a number.
    pub fn is_started(&self) -> bool {
        self.status().is_some()
    }

    /// Whether the progress element is present in the document.
    pub fn is_rendered(&self) -> bool {
        self.shared.document.lock().element_by_id(PROGRESS_ID).is_some()
    }

    /// Observes status changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<f64>> {
        self.shared.status.subscribe()
    }

    /// Locks the document for inspection.
    ///
    /// Do not call controller methods while holding the guard: they lock the
    /// document too.
    pub fn document(&self) -> MutexGuard<'_, D> {
        self.shared.document.lock()
    }

    /// Number of animation steps queued or running.
    pub fn pending_steps(&self) -> usize {
        self.shared.queue.pending()
    }

    /// Waits until every queued animation step has finished.
    pub async fn idle(&self) {
        self.shared.queue.idle().await
    }

    /// Shows the bar at 0 and, if enabled, starts trickling.
    ///
    /// Calling `start` during a run does not reset the bar. Only one trickle
    /// loop runs at a time, however often `start` is called.
    pub fn start(&self) -> &Self {
        if !is_running(self.status()) {
            self.set(0.0);
        }
        self.ensure_trickle();
        self
    }

    /// Completes the bar: a random jump forward, then 100% and fade out.
    ///
    /// Without `force` this does nothing unless a run is active.
    pub fn done(&self, force: bool) -> &Self {
        if !force && !is_running(self.status()) {
            return self;
        }
        let jump = rand::rng().random_range(0.3..0.8);
        self.inc(Some(jump)).set(1.0)
    }

    /// Moves the bar to `n`, clamped to `[minimum, 1]`.
    ///
    /// Reaching 1 ends the run: the status becomes `None` and the element fades
    /// out and is removed once the queued animations have played.
    pub fn set(&self, n: f64) -> &Self {
        let (n, status, speed, easing, progress, bar) = {
            let mut state = self.shared.state.lock();
            let started = state.status.is_some();
            let n = clamp(n, state.settings.minimum, 1.0);
            state.status = if n == 1.0 { None } else { Some(n) };

            let mut document = self.shared.document.lock();
            let progress = render_into(&mut state, &mut *document, !started);
            let bar = find(&*document, progress, &state.settings.bar_selector);
            (
                n,
                state.status,
                state.settings.speed,
                state.settings.easing.clone(),
                progress,
                bar,
            )
        };

        self.shared.status.send_replace(status);
        debug!("Progress set to {n}");

        let this = self.clone();
        if let Err(e) = self
            .shared
            .queue
            .push(this.animate(n, speed, easing, progress, bar))
        {
            debug!("Animation step deferred: {e}");
        }
        self
    }

    /// Advances the bar by `amount`, or by an automatic step when `None`.
    ///
    /// Starts a run if none is active. Automatic increments stop at 0.99 and no
    /// increment goes past 0.994.
    pub fn inc(&self, amount: Option<f64>) -> &Self {
        let Some(n) = self.status().filter(|n| *n != 0.0) else {
            return self.start();
        };
        if n > 1.0 {
            return self;
        }
        let amount = amount.unwrap_or_else(|| trickle_amount(n));
        self.set(clamp(n + amount, 0.0, INC_CEILING))
    }

    /// Returns the progress element, mounting it if needed.
    ///
    /// With `from_start` a newly created bar is placed fully off-screen;
    /// otherwise it is placed at the current status.
    pub fn render(&self, from_start: bool) -> NodeId {
        let mut state = self.shared.state.lock();
        let mut document = self.shared.document.lock();
        render_into(&mut state, &mut *document, from_start)
    }

    /// Unmounts the bar and clears the marker classes.
    pub fn remove(&self) {
        let mut state = self.shared.state.lock();
        let mut document = self.shared.document.lock();
        remove_from(&mut state, &mut *document);
    }

    /// Runs `future` with the bar going, then completes it.
    pub async fn track<F: Future>(&self, future: F) -> F::Output {
        self.start();
        let output = future.await;
        self.done(false);
        output
    }

    /// The positioning strategy, probed from the document on first use.
    fn position_using(&self) -> PositionUsing {
        let mut state = self.shared.state.lock();
        if let Some(position) = state.settings.position_using {
            return position;
        }
        let position = PositionUsing::probe(&*self.shared.document.lock());
        debug!("Detected positioning strategy: {position}");
        state.settings.position_using = Some(position);
        position
    }

    /// One queued animation step.
    async fn animate(
        self,
        n: f64,
        speed: Duration,
        easing: String,
        progress: NodeId,
        bar: Option<NodeId>,
    ) {
        let position = self.position_using();
        {
            let mut document = self.shared.document.lock();
            css::apply(
                &mut *document,
                bar,
                &bar_position_css(n, speed, &easing, position),
            );
            if n == 1.0 {
                css::apply(
                    &mut *document,
                    Some(progress),
                    &[
                        ("transition", "none".to_string()),
                        ("opacity", "1".to_string()),
                    ],
                );
            }
        }
        sleep(speed).await;
        if n < 1.0 {
            return;
        }

        {
            let mut document = self.shared.document.lock();
            css::apply(
                &mut *document,
                Some(progress),
                &[
                    ("transition", format!("all {}ms linear", speed.as_millis())),
                    ("opacity", "0".to_string()),
                ],
            );
        }
        sleep(speed).await;
        self.remove();
    }

    fn ensure_trickle(&self) {
        let mut state = self.shared.state.lock();
        if !state.settings.trickle || state.trickling.is_some() {
            return;
        }
        let Ok(handle) = Handle::try_current() else {
            warn!("No Tokio runtime available, trickle disabled for this run");
            return;
        };
        state.trickle_runs += 1;
        state.trickling = Some(state.trickle_runs);
        let guard = TrickleGuard {
            controller: self.clone(),
            run: state.trickle_runs,
        };
        drop(state);

        handle.spawn(trickle(guard));
    }
}

/// Frees the trickle slot when its loop ends, including when the loop is
/// dropped by a runtime shutting down.
struct TrickleGuard<D: Document> {
    controller: ProgressController<D>,
    run: u64,
}

impl<D: Document> Drop for TrickleGuard<D> {
    fn drop(&mut self) {
        let mut state = self.controller.shared.state.lock();
        if state.trickling == Some(self.run) {
            state.trickling = None;
        }
    }
}

async fn trickle<D: Document>(guard: TrickleGuard<D>) {
    trace!("Trickle loop #{} started", guard.run);
    let progress = &guard.controller;
    loop {
        let interval = progress.shared.state.lock().settings.trickle_speed;
        sleep(interval).await;
        {
            let mut state = progress.shared.state.lock();
            if !is_running(state.status) {
                state.trickling = None;
                break;
            }
        }
        progress.inc(None);
    }
    trace!("Trickle loop #{} stopped", guard.run);
}

fn find<D: Document>(document: &D, scope: NodeId, selector: &str) -> Option<NodeId> {
    match document.query_selector(Some(scope), selector) {
        Ok(node) => node,
        Err(e) => {
            debug!("Selector {selector:?} matched nothing: {e}");
            None
        }
    }
}

fn resolve_parent<D: Document>(document: &D, parent: &Parent) -> Option<NodeId> {
    match parent {
        Parent::Selector(selector) => document
            .query_selector(None, selector)
            .unwrap_or_else(|e| {
                debug!("Cannot resolve parent {selector:?}: {e}");
                None
            }),
        Parent::Element(node) => Some(*node),
    }
}

fn render_into<D: Document>(state: &mut State, document: &mut D, from_start: bool) -> NodeId {
    if let Some(node) = state.mounted.filter(|node| document.is_attached(*node)) {
        return node;
    }
    if let Some(node) = document.element_by_id(PROGRESS_ID) {
        trace!("Reusing progress element {node:?} found in the document");
        state.mounted = Some(node);
        return node;
    }

    let settings = &state.settings;
    let root = document.document_element();
    add_class(document, Some(root), BUSY_CLASS);

    let progress = document.create_element("div");
    if let Err(e) = document.set_attribute(progress, "id", PROGRESS_ID) {
        warn!("Could not set progress element id: {e}");
    }
    if let Err(e) = document.set_inner_html(progress, &settings.template) {
        warn!("Invalid progress template: {e}");
    }

    let bar = find(&*document, progress, &settings.bar_selector);
    let perc = if from_start {
        "-100".to_string()
    } else {
        to_bar_perc(state.status.unwrap_or(0.0))
    };
    css::apply(
        document,
        bar,
        &[
            ("transition", "all 0 linear".to_string()),
            ("transform", format!("translate3d({perc}%,0,0)")),
        ],
    );

    if !settings.show_spinner {
        if let Some(spinner) = find(&*document, progress, &settings.spinner_selector) {
            document.remove_node(spinner);
        }
    }

    let body = document.body();
    let parent = resolve_parent(&*document, &settings.parent).unwrap_or(body);
    if parent != body {
        add_class(document, Some(parent), CUSTOM_PARENT_CLASS);
    }
    if let Err(e) = document.append_child(parent, progress) {
        warn!("Could not mount progress element under {parent:?}: {e}");
        if let Err(e) = document.append_child(body, progress) {
            warn!("Could not mount progress element under the body: {e}");
        }
    }

    debug!("Mounted progress element {progress:?} under {parent:?}");
    state.mounted = Some(progress);
    progress
}

fn remove_from<D: Document>(state: &mut State, document: &mut D) {
    let root = document.document_element();
    remove_class(document, Some(root), BUSY_CLASS);

    let body = document.body();
    if let Some(parent) = resolve_parent(&*document, &state.settings.parent).filter(|p| *p != body) {
        remove_class(document, Some(parent), CUSTOM_PARENT_CLASS);
    }

    let progress = state
        .mounted
        .take()
        .filter(|node| document.is_attached(*node))
        .or_else(|| document.element_by_id(PROGRESS_ID));
    if let Some(progress) = progress {
        document.remove_node(progress);
        debug!("Removed progress element {progress:?}");
    }
}
