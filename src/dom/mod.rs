//! Document abstraction the progress bar is mounted into.
//!
//! The controller never talks to a global document registry. It owns a value
//! implementing [`Document`], which exposes the handful of operations the bar
//! needs: element lookup by id, element creation, template injection, selector
//! queries, inline styles, class lists and a style-support probe.
//!
//! The crate ships [`VirtualDocument`], an in-memory document that models those
//! operations faithfully enough to drive and inspect the bar without a browser.
//!
//! # Overview
//!
//! - `virtual_dom` - The arena-backed [`VirtualDocument`]
//! - `template` - HTML fragment parsing for templates
//! - `selector` - Simple CSS selector parsing and matching
//! - `class_list` - Null-tolerant class list helpers
//!
//! # Examples
//!
//! ```rust
//! use jprogress::dom::{Document, VirtualDocument};
//!
//! let mut document = VirtualDocument::new();
//! let body = document.body();
//! let node = document.create_element("div");
//! document.set_attribute(node, "id", "hello").unwrap();
//! document.append_child(body, node).unwrap();
//!
//! assert_eq!(document.element_by_id("hello"), Some(node));
//! ```

pub mod class_list;
pub mod selector;
pub mod template;
pub mod virtual_dom;

pub use class_list::{add_class, has_class, remove_class};
pub use selector::Selector;
pub use virtual_dom::VirtualDocument;

use crate::error::Result;

/// Opaque handle to a node owned by a [`Document`].
///
/// The generation makes a handle to a destroyed node stale instead of letting
/// it alias whichever node later reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

/// The document capability a progress controller drives.
///
/// Implementations own their nodes; the controller only holds [`NodeId`]
/// handles. Every method must tolerate detached and stale handles.
pub trait Document: Send + 'static {
    /// The root element (`<html>`).
    fn document_element(&self) -> NodeId;

    /// The `<body>` element, the default mount parent.
    fn body(&self) -> NodeId;

    /// Finds an attached element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Creates a detached element.
    fn create_element(&mut self, tag: &str) -> NodeId;

    /// Reads an attribute.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Writes an attribute.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()>;

    /// Replaces the children of `node` with the parsed `html` fragment.
    ///
    /// Malformed markup is repaired the way a browser's `innerHTML` would. The
    /// previous children are destroyed.
    fn set_inner_html(&mut self, node: NodeId, html: &str) -> Result<()>;

    /// Returns the first element matching `selector`.
    ///
    /// With a `scope`, only descendants of that node are searched. Without one
    /// the whole document is searched, root included.
    fn query_selector(&self, scope: Option<NodeId>, selector: &str) -> Result<Option<NodeId>>;

    /// Reads an inline style property (kebab-case CSS name).
    fn style(&self, node: NodeId, property: &str) -> Option<String>;

    /// Writes an inline style property. An empty value removes the property.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> Result<()>;

    /// Moves `child` to the end of `parent`'s children.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()>;

    /// Detaches `node` and destroys it along with its subtree.
    ///
    /// Handles to destroyed nodes become stale. No-op for unknown nodes and for
    /// the root and body elements.
    fn remove_node(&mut self, node: NodeId);

    /// Whether `node` is reachable from the document root.
    fn is_attached(&self, node: NodeId) -> bool;

    /// Whether the body's style declaration exposes `property`
    /// (DOM camelCase name, e.g. `WebkitTransform`).
    fn supports_style(&self, property: &str) -> bool;

    /// The element's `class` attribute, empty when absent.
    fn class_name(&self, node: NodeId) -> String {
        self.attribute(node, "class").unwrap_or_default()
    }

    /// Overwrites the element's `class` attribute.
    fn set_class_name(&mut self, node: NodeId, value: &str) -> Result<()> {
        self.set_attribute(node, "class", value)
    }
}
