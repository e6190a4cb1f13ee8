//! Configuration structures and defaults for the progress controller.
//!
//! This module defines [`Settings`], the full configuration record a
//! [`ProgressController`](crate::ProgressController) runs with, along with the
//! DOM contract constants (element id and marker classes) external stylesheets
//! rely on.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use jprogress::controller::{Parent, Settings};
//!
//! let settings = Settings::default();
//! assert_eq!(settings.minimum, 0.08);
//! assert_eq!(settings.speed, Duration::from_millis(200));
//! assert_eq!(settings.parent, Parent::Selector("body".into()));
//! ```

use std::time::Duration;

use crate::css::PositionUsing;
use crate::dom::NodeId;

/// Id of the mounted progress element.
pub const PROGRESS_ID: &str = "Jprogress";

/// Class added to the document root while the bar is mounted.
pub const BUSY_CLASS: &str = "Jprogress-busy";

/// Class added to a mount parent other than the body.
pub const CUSTOM_PARENT_CLASS: &str = "Jprogress-custom-parent";

/// Default markup: a bar with its peg, and a spinner with its icon.
pub const DEFAULT_TEMPLATE: &str = concat!(
    r#"<div class="bar" role="bar">"#,
    r#"<div class="peg"></div>"#,
    "</div>",
    r#"<div class="spinner" role="spinner">"#,
    r#"<div class="spinner-icon"></div>"#,
    "</div>",
);

/// Where the progress element is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parent {
    /// The first element matching a selector, resolved on every render.
    ///
    /// Only the selector forms [`Selector`](crate::dom::Selector) understands
    /// are accepted: type, `*`, `#id`, `.class`, `[attr]` and `[attr=value]`,
    /// compounds of those, and the descendant combinator. A selector using
    /// anything else (`>`, `+`, `~`, pseudo-classes) or matching nothing makes
    /// the bar mount under the body.
    Selector(String),
    /// A specific element.
    Element(NodeId),
}

impl Default for Parent {
    fn default() -> Self {
        Parent::Selector("body".to_string())
    }
}

impl From<&str> for Parent {
    fn from(selector: &str) -> Self {
        Parent::Selector(selector.to_string())
    }
}

impl From<String> for Parent {
    fn from(selector: String) -> Self {
        Parent::Selector(selector)
    }
}

impl From<NodeId> for Parent {
    fn from(node: NodeId) -> Self {
        Parent::Element(node)
    }
}

/// Configuration of a progress controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Lowest status `set` accepts; smaller values are raised to it.
    pub minimum: f64,
    /// CSS easing function for bar movement.
    pub easing: String,
    /// Positioning strategy; probed from the document on first use when `None`.
    pub position_using: Option<PositionUsing>,
    /// Duration of each bar animation.
    pub speed: Duration,
    /// Whether `start` launches the automatic increment loop.
    pub trickle: bool,
    /// Interval between automatic increments.
    pub trickle_speed: Duration,
    /// Whether the spinner element is kept.
    pub show_spinner: bool,
    /// Selector of the bar inside the template.
    pub bar_selector: String,
    /// Selector of the spinner inside the template.
    pub spinner_selector: String,
    /// Mount parent.
    pub parent: Parent,
    /// Markup of the progress element's children.
    pub template: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            minimum: 0.08,
            easing: "linear".to_string(),
            position_using: None,
            speed: Duration::from_millis(200),
            trickle: true,
            trickle_speed: Duration::from_millis(200),
            show_spinner: true,
            bar_selector: r#"[role="bar"]"#.to_string(),
            spinner_selector: r#"[role="spinner"]"#.to_string(),
            parent: Parent::default(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}
