//! Controller module containing the progress bar state machine, its settings and
//! the partial options used to build and reconfigure it.
//!
//! # Overview
//!
//! The controller module is organized into three main components:
//!
//! - `controller` - Core [`ProgressController`] with status, rendering and animation logic
//! - `options` - [`Options`] for flexible configuration using the builder pattern
//! - `config` - [`Settings`], defaults and the DOM contract constants
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```rust
//! use jprogress::controller::ProgressController;
//! use jprogress::dom::VirtualDocument;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let progress = ProgressController::new(VirtualDocument::new());
//! progress.start();
//! assert_eq!(progress.status(), Some(0.08));
//! progress.done(false);
//! # }
//! ```
//!
//! ## Mounting Into a Custom Parent
//!
//! ```rust
//! use std::time::Duration;
//! use jprogress::controller::{Options, ProgressController, CUSTOM_PARENT_CLASS};
//! use jprogress::dom::{has_class, Document, VirtualDocument};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut document = VirtualDocument::new();
//! let body = document.body();
//! document.set_inner_html(body, r#"<main id="app"></main>"#).unwrap();
//!
//! let progress = ProgressController::with_options(
//!     document,
//!     Options::new().parent("#app").speed(Duration::from_millis(50)),
//! );
//! progress.start();
//!
//! let document = progress.document();
//! let app = document.element_by_id("app");
//! assert!(has_class(&*document, app, CUSTOM_PARENT_CLASS));
//! # }
//! ```

pub mod controller;
pub mod config;
pub mod options;

pub use config::{
    Parent, Settings, BUSY_CLASS, CUSTOM_PARENT_CLASS, DEFAULT_TEMPLATE, PROGRESS_ID,
};
pub use controller::ProgressController;
pub use options::Options;
