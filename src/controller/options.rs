//! Partial settings for construction and reconfiguration.
//!
//! [`Options`] mirrors [`Settings`] with every field optional. Applying options
//! merges key by key: fields left as `None` keep their current value.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use jprogress::controller::{Options, Settings};
//!
//! let mut settings = Settings::default();
//! Options::new()
//!     .speed(Duration::from_millis(500))
//!     .show_spinner(false)
//!     .merge_into(&mut settings);
//!
//! assert_eq!(settings.speed, Duration::from_millis(500));
//! assert!(!settings.show_spinner);
//! assert_eq!(settings.easing, "linear");
//! ```

use std::time::Duration;

use super::config::{Parent, Settings};
use crate::css::PositionUsing;

/// A partial [`Settings`] record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    /// See [`Settings::minimum`].
    pub minimum: Option<f64>,
    /// See [`Settings::easing`].
    pub easing: Option<String>,
    /// See [`Settings::position_using`].
    pub position_using: Option<PositionUsing>,
    /// See [`Settings::speed`].
    pub speed: Option<Duration>,
    /// See [`Settings::trickle`].
    pub trickle: Option<bool>,
    /// See [`Settings::trickle_speed`].
    pub trickle_speed: Option<Duration>,
    /// See [`Settings::show_spinner`].
    pub show_spinner: Option<bool>,
    /// See [`Settings::bar_selector`].
    pub bar_selector: Option<String>,
    /// See [`Settings::spinner_selector`].
    pub spinner_selector: Option<String>,
    /// See [`Settings::parent`].
    pub parent: Option<Parent>,
    /// See [`Settings::template`].
    pub template: Option<String>,
}

impl Options {
    /// Creates empty options.
    pub fn new() -> Self {
        Options::default()
    }

    /// Set the minimum status.
    pub fn minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Set the CSS easing function.
    pub fn easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = Some(easing.into());
        self
    }

    /// Force a positioning strategy instead of probing for one.
    pub fn position_using(mut self, position_using: PositionUsing) -> Self {
        self.position_using = Some(position_using);
        self
    }

    /// Set the animation speed.
    pub fn speed(mut self, speed: Duration) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Enable or disable automatic increments.
    pub fn trickle(mut self, trickle: bool) -> Self {
        self.trickle = Some(trickle);
        self
    }

    /// Set the interval between automatic increments.
    pub fn trickle_speed(mut self, trickle_speed: Duration) -> Self {
        self.trickle_speed = Some(trickle_speed);
        self
    }

    /// Show or hide the spinner.
    pub fn show_spinner(mut self, show_spinner: bool) -> Self {
        self.show_spinner = Some(show_spinner);
        self
    }

    /// Set the bar selector.
    pub fn bar_selector(mut self, selector: impl Into<String>) -> Self {
        self.bar_selector = Some(selector.into());
        self
    }

    /// Set the spinner selector.
    pub fn spinner_selector(mut self, selector: impl Into<String>) -> Self {
        self.spinner_selector = Some(selector.into());
        self
    }

    /// Set the mount parent, either a selector or an element.
    pub fn parent(mut self, parent: impl Into<Parent>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the template markup.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Writes every provided field into `settings`.
    pub fn merge_into(self, settings: &mut Settings) {
        if let Some(minimum) = self.minimum {
            settings.minimum = minimum;
        }
        if let Some(easing) = self.easing {
            settings.easing = easing;
        }
        if let Some(position_using) = self.position_using {
            settings.position_using = Some(position_using);
        }
        if let Some(speed) = self.speed {
            settings.speed = speed;
        }
        if let Some(trickle) = self.trickle {
            settings.trickle = trickle;
        }
        if let Some(trickle_speed) = self.trickle_speed {
            settings.trickle_speed = trickle_speed;
        }
        if let Some(show_spinner) = self.show_spinner {
            settings.show_spinner = show_spinner;
        }
        if let Some(bar_selector) = self.bar_selector {
            settings.bar_selector = bar_selector;
        }
        if let Some(spinner_selector) = self.spinner_selector {
            settings.spinner_selector = spinner_selector;
        }
        if let Some(parent) = self.parent {
            settings.parent = parent;
        }
        if let Some(template) = self.template {
            settings.template = template;
        }
    }

    /// Consumes the options into a full [`Settings`] based on the defaults.
    pub fn into_settings(self) -> Settings {
        let mut settings = Settings::default();
        self.merge_into(&mut settings);
        settings
    }
}
