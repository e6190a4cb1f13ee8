//! Positioning strategy detection.

use std::fmt;
use std::str::FromStr;

use crate::dom::Document;

/// Vendor prefixes probed, in order, before falling back to unprefixed names.
const VENDOR_PREFIXES: &[&str] = &["Webkit", "Moz", "ms", "O"];

/// How the bar is moved across the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionUsing {
    /// `transform: translate3d(x%,0,0)`, hardware accelerated.
    Translate3d,
    /// `transform: translate(x%,0)`.
    Translate,
    /// `margin-left: x%`, for engines without transforms.
    Margin,
}

impl PositionUsing {
    /// The CSS keyword for this strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionUsing::Translate3d => "translate3d",
            PositionUsing::Translate => "translate",
            PositionUsing::Margin => "margin",
        }
    }

    /// Picks the best strategy the document's engine supports.
    ///
    /// The first vendor prefix whose `Transform` property exists wins; the
    /// matching `Perspective` property then decides between 3-D and 2-D. An
    /// engine with no prefixed transform is checked with the standard
    /// `transform`/`perspective` names.
    pub fn probe<D: Document + ?Sized>(document: &D) -> Self {
        let prefix = VENDOR_PREFIXES
            .iter()
            .copied()
            .find(|prefix| document.supports_style(&format!("{prefix}Transform")));

        let (perspective, transform) = match prefix {
            Some(prefix) => (format!("{prefix}Perspective"), format!("{prefix}Transform")),
            None => ("perspective".to_string(), "transform".to_string()),
        };

        if document.supports_style(&perspective) {
            PositionUsing::Translate3d
        } else if document.supports_style(&transform) {
            PositionUsing::Translate
        } else {
            PositionUsing::Margin
        }
    }
}

impl fmt::Display for PositionUsing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PositionUsing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "translate3d" => Ok(PositionUsing::Translate3d),
            "translate" => Ok(PositionUsing::Translate),
            "margin" => Ok(PositionUsing::Margin),
            other => Err(format!("unknown positioning strategy: {other}")),
        }
    }
}
