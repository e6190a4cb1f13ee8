//! HTML fragment parsing for bar templates.
//!
//! Templates go through html5ever (via `scraper`) with a `<body>` context, the
//! same algorithm a browser runs for `innerHTML`. Malformed markup is repaired
//! rather than rejected: stray closing tags are dropped and elements left open
//! are closed at the end of input.

use scraper::{ElementRef, Html, Node};

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A node produced by [`parse_fragment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedNode {
    /// An element with its attributes.
    Element {
        /// Lower-cased tag name.
        tag: String,
        /// Attribute name/value pairs, ordered by name.
        attributes: Vec<(String, String)>,
        /// Child nodes.
        children: Vec<ParsedNode>,
    },
    /// Decoded text content.
    Text(String),
    /// Comment body, without the delimiters.
    Comment(String),
}

/// Returns `true` for tags that are serialized without a closing tag.
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Parses an HTML fragment into a list of top-level nodes.
pub fn parse_fragment(html: &str) -> Vec<ParsedNode> {
    let fragment = Html::parse_fragment(html);
    convert_children(fragment.root_element())
}

fn convert_children(parent: ElementRef<'_>) -> Vec<ParsedNode> {
    parent
        .children()
        .filter_map(|child| match child.value() {
            Node::Element(element) => {
                let mut attributes: Vec<(String, String)> = element
                    .attrs()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect();
                attributes.sort_by(|a, b| a.0.cmp(&b.0));
                Some(ParsedNode::Element {
                    tag: element.name().to_string(),
                    attributes,
                    children: ElementRef::wrap(child)
                        .map(convert_children)
                        .unwrap_or_default(),
                })
            }
            Node::Text(text) => Some(ParsedNode::Text(text.to_string())),
            Node::Comment(comment) => Some(ParsedNode::Comment(comment.to_string())),
            _ => None,
        })
        .collect()
}
