//! jprogress is a slim page-load progress bar: a thin controller that animates a
//! document element to simulate loading progress, with an optional spinner and
//! automatic "trickle" increments.
//!
//! # Quick Start
//!
//! ```rust
//! use jprogress::{ProgressController, VirtualDocument};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let progress = ProgressController::new(VirtualDocument::new());
//!
//! progress.start();
//! // ... load things ...
//! progress.inc(Some(0.2));
//! progress.done(false);
//!
//! progress.idle().await;
//! assert!(!progress.is_rendered());
//! # }
//! ```
//!
//! # Module Organization
//!
//! The jprogress crate is organized into several modules:
//!
//! - [`controller`] - The `ProgressController`, its `Settings` and `Options`
//! - [`dom`] - The `Document` capability and the in-memory `VirtualDocument`
//! - [`queue`] - The serial animation `TaskQueue`
//! - [`css`] - Positioning strategies and bar CSS
//! - [`progress`] - Terminal mirroring of a controller with indicatif
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`utils`] - Shared numeric helpers

pub mod controller;
pub mod css;
pub mod dom;
pub mod error;
pub mod progress;
pub mod queue;
pub mod utils;

pub use controller::{Options, Parent, ProgressController, Settings};
pub use css::PositionUsing;
pub use dom::{Document, NodeId, VirtualDocument};
pub use error::{Error, Result};
pub use progress::{BarStyle, TerminalView};
pub use queue::TaskQueue;
