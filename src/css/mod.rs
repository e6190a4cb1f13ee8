//! CSS generation for the bar.
//!
//! The bar is moved with one of three [`PositionUsing`] strategies. The best one
//! the host supports is probed once through [`Document::supports_style`] and
//! cached by the controller for the rest of its life.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use jprogress::css::{bar_position_css, PositionUsing};
//!
//! let css = bar_position_css(0.5, Duration::from_millis(200), "ease", PositionUsing::Translate);
//! assert_eq!(css[0], ("transition", "all 200ms ease".to_string()));
//! assert_eq!(css[1], ("transform", "translate(-50%,0)".to_string()));
//! ```

pub mod positioning;

pub use positioning::PositionUsing;

use std::time::Duration;

use tracing::trace;

use crate::dom::{Document, NodeId};
use crate::utils::to_bar_perc;

/// A list of `(property, value)` pairs, applied in order.
pub type StyleList = Vec<(&'static str, String)>;

/// The declarations that move the bar to `n` over `speed` with `easing`.
pub fn bar_position_css(n: f64, speed: Duration, easing: &str, position: PositionUsing) -> StyleList {
    let perc = to_bar_perc(n);
    let transition = ("transition", format!("all {}ms {easing}", speed.as_millis()));
    match position {
        PositionUsing::Translate3d => vec![
            transition,
            ("transform", format!("translate3d({perc}%,0,0)")),
        ],
        PositionUsing::Translate => vec![transition, ("transform", format!("translate({perc}%,0)"))],
        PositionUsing::Margin => vec![transition, ("margin-left", format!("{perc}%"))],
    }
}

/// Applies `properties` to `node`; a missing node is skipped silently.
pub fn apply<D: Document + ?Sized>(document: &mut D, node: Option<NodeId>, properties: &[(&str, String)]) {
    let Some(node) = node else {
        return;
    };
    for (property, value) in properties {
        if let Err(e) = document.set_style(node, property, value) {
            trace!("Skipping {property} on {node:?}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::VirtualDocument;

    #[test]
    fn test_bar_position_css_per_strategy() {
        let speed = Duration::from_millis(350);
        assert_eq!(
            bar_position_css(0.0, speed, "linear", PositionUsing::Translate3d),
            vec![
                ("transition", "all 350ms linear".to_string()),
                ("transform", "translate3d(-100%,0,0)".to_string()),
            ]
        );
        assert_eq!(
            bar_position_css(1.0, speed, "ease", PositionUsing::Margin),
            vec![
                ("transition", "all 350ms ease".to_string()),
                ("margin-left", "0%".to_string()),
            ]
        );
    }

    #[test]
    fn test_apply_skips_missing_node() {
        let mut document = VirtualDocument::new();
        apply(&mut document, None, &[("opacity", "1".to_string())]);

        let body = document.body();
        apply(&mut document, Some(body), &[("opacity", "1".to_string())]);
        assert_eq!(document.style(body, "opacity").as_deref(), Some("1"));
    }
}
