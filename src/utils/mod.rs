//! Shared utility functions.
//!
//! This module contains the small numeric helpers the controller builds on:
//! clamping, converting a status into a bar offset, and picking the automatic
//! increment for a given status.
//!
//! # Overview
//!
//! The utils module currently contains:
//!
//! - [`numeric`] - Clamping, bar offsets and trickle brackets
//!
//! # Examples
//!
//! ## Converting Progress to a Bar Offset
//!
//! ```rust
//! use jprogress::utils::{clamp, to_bar_perc};
//!
//! let n = clamp(1.7, 0.08, 1.0);
//! assert_eq!(to_bar_perc(n), "0");
//! assert_eq!(to_bar_perc(0.0), "-100");
//! ```

pub mod numeric;

// Re-export commonly used utilities
pub use numeric::{clamp, to_bar_perc, trickle_amount, INC_CEILING};
