//! Progress module containing the terminal rendering of a controller.
//!
//! A [`ProgressController`](crate::ProgressController) draws into a document.
//! This module provides a second, optional output: an indicatif bar in the
//! terminal that mirrors the controller's status.
//!
//! # Overview
//!
//! The progress module is organized into two main components:
//!
//! - `style` - Terminal bar styling options and templates
//! - `display` - The [`TerminalView`] that follows a controller
//!
//! # Examples
//!
//! ## Hidden Terminal Bar
//!
//! ```rust
//! use jprogress::progress::BarStyle;
//!
//! let hidden = BarStyle::hidden();
//! assert!(!hidden.is_enabled());
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use display::{TerminalView, TICKS};
pub use style::BarStyle;
