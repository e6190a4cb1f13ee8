//! Terminal bar styling and configuration options.
//!
//! [`BarStyle`] describes how a [`TerminalView`](super::TerminalView) draws the
//! controller's status with indicatif.
//!
//! # Examples
//!
//! ## Default Styling
//!
//! ```rust
//! use jprogress::progress::BarStyle;
//!
//! // A thin line with a spinner, cleared once the run completes.
//! let style = BarStyle::default();
//! assert!(style.is_enabled());
//! ```
//!
//! ## Custom Styling
//!
//! ```rust
//! use jprogress::progress::BarStyle;
//!
//! let style = BarStyle::new(
//!     Some("[{bar:40.cyan/blue}] {percent}%".to_string()),
//!     Some(BarStyle::CHARS_FINE.to_string()),
//!     true,
//!     false,
//! );
//! ```

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::warn;

/// Define the options for the terminal bar.
#[derive(Debug, Clone)]
pub struct BarStyle {
    /// Progress bar template string.
    template: Option<String>,
    /// Progression characters set.
    ///
    /// There must be at least 3 characters for the following states:
    /// "filled", "current", and "to do".
    progress_chars: Option<String>,
    /// Enable or disable the bar.
    pub(crate) enabled: bool,
    /// Clear the bar once the run completes.
    pub(crate) clear: bool,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            template: Some(BarStyle::TEMPLATE_PAGE_LOAD.into()),
            progress_chars: Some(BarStyle::CHARS_LINE.into()),
            enabled: true,
            clear: true,
        }
    }
}

impl BarStyle {
    /// Template with a spinner, a slim bar and the percentage.
    ///
    /// `⠙ ━━━━━━━━━━━━━━━━━━━━━━━━━╾────────────── 62%`
    pub const TEMPLATE_PAGE_LOAD: &'static str = "{spinner:.blue} {bar:40.blue/black} {percent:>3}%";
    /// Template with only the bar.
    pub const TEMPLATE_BAR_ONLY: &'static str = "{bar:40.blue/black}";
    /// Use fine blocks as progress characters: `"█▉▊▋▌▍▎▏  "`.
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";
    /// Use a line as progress characters: `"━╾╴─"`.
    pub const CHARS_LINE: &'static str = "━╾╴─";
    /// Use rough blocks as progress characters: `"█  "`.
    pub const CHARS_ROUGH: &'static str = "█  ";

    /// Interval between spinner frames.
    const SPINNER_TICK: Duration = Duration::from_millis(100);

    /// Create a new [`BarStyle`].
    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// Create a style which draws nothing.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..BarStyle::default()
        }
    }

    /// Set to `true` to clear the bar upon completion.
    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// Return `false` if the bar is hidden.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the bar is cleared upon completion.
    pub fn clears(&self) -> bool {
        self.clear
    }

    /// Create a [`ProgressStyle`] based on the provided options.
    ///
    /// An invalid template is logged and replaced by indicatif's default bar.
    pub fn to_progress_style(&self) -> ProgressStyle {
        let mut style = ProgressStyle::default_bar();
        if let Some(template) = &self.template {
            match ProgressStyle::default_bar().template(template) {
                Ok(templated) => style = templated,
                Err(e) => warn!("Invalid bar template {template:?}: {e}"),
            }
        }
        if let Some(progress_chars) = &self.progress_chars {
            style = style.progress_chars(progress_chars);
        }
        style
    }

    /// Create a [`ProgressBar`] of length `len` based on the provided options.
    pub fn to_progress_bar(&self, len: u64) -> ProgressBar {
        // Return a hidden bar if we disabled it.
        if !self.enabled {
            return ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::hidden());
        }

        let bar = ProgressBar::new(len).with_style(self.to_progress_style());
        bar.enable_steady_tick(Self::SPINNER_TICK);
        bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_style_builds_hidden_bar() {
        let style = BarStyle::hidden();
        assert!(!style.is_enabled());
        let bar = style.to_progress_bar(1000);
        assert!(bar.is_hidden());
        assert_eq!(bar.length(), Some(1000));
    }

    #[test]
    fn test_invalid_template_falls_back() {
        let style = BarStyle::new(Some("{bar:40.blue".to_string()), None, true, true);
        // Building the style must not panic.
        let _ = style.to_progress_style();
    }
}
