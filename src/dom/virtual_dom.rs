//! In-memory document.
//!
//! [`VirtualDocument`] keeps every node in an arena indexed by [`NodeId`].
//! Moving a node around only relinks it. Removing a node destroys its whole
//! subtree and puts the slots on a free list; the slot generation is bumped so
//! old handles go stale rather than pointing at the next occupant.

use std::collections::HashSet;
use std::fmt::Write as _;

use tracing::trace;

use super::selector::{ElementView, Selector};
use super::template::{is_void_element, parse_fragment, ParsedNode};
use super::{Document, NodeId};
use crate::error::{Error, Result};

/// Style properties exposed by a WebKit-flavoured engine.
const WEBKIT_STYLE_SUPPORT: &[&str] = &[
    "transform",
    "perspective",
    "transition",
    "opacity",
    "WebkitTransform",
    "WebkitPerspective",
    "WebkitTransition",
];

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element(ElementData),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    attributes: Vec<(String, String)>,
    style: Vec<(String, String)>,
}

/// An in-memory document with an `<html>` root and a `<body>`.
#[derive(Debug, Clone)]
pub struct VirtualDocument {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
    body: NodeId,
    style_support: HashSet<String>,
}

impl Default for VirtualDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualDocument {
    /// Creates an empty document that reports WebKit style support.
    pub fn new() -> Self {
        Self::with_style_support(WEBKIT_STYLE_SUPPORT.iter().copied())
    }

    /// Creates an empty document whose body style exposes exactly `properties`.
    ///
    /// This controls which positioning strategy the controller detects.
    pub fn with_style_support<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let placeholder = NodeId {
            index: 0,
            generation: 0,
        };
        let mut document = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: placeholder,
            body: placeholder,
            style_support: properties.into_iter().map(Into::into).collect(),
        };
        document.root = document.create_element("html");
        document.body = document.create_element("body");
        document.link(document.root, document.body);
        document
    }

    /// Tag name of an element.
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.get(node)?.kind {
            NodeKind::Element(element) => Some(&element.tag),
            _ => None,
        }
    }

    /// Parent of a node.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.parent
    }

    /// Children of a node, in order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Number of live nodes, attached or not.
    pub fn node_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Concatenated text of a node and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut text = String::new();
        for id in std::iter::once(node).chain(self.descendants(node)) {
            if let Some(NodeKind::Text(t)) = self.get(id).map(|n| &n.kind) {
                text.push_str(t);
            }
        }
        text
    }

    /// Every element matching `selector`, in document order.
    pub fn query_selector_all(&self, scope: Option<NodeId>, selector: &str) -> Result<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .candidates(scope)
            .into_iter()
            .filter(|id| selector.matches(self, *id))
            .collect())
    }

    /// Serializes a node and its subtree.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    /// Serializes the children of a node.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(node) {
            self.write_html(*child, &mut out);
        }
        out
    }

    fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)?
            .node
            .as_ref()
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)?
            .node
            .as_mut()
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or(Error::UnknownNode(id))
    }

    fn element(&self, id: NodeId) -> Result<&ElementData> {
        match &self.node(id)?.kind {
            NodeKind::Element(element) => Ok(element),
            _ => Err(Error::NotAnElement(id)),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData> {
        match &mut self.get_mut(id).ok_or(Error::UnknownNode(id))?.kind {
            NodeKind::Element(element) => Ok(element),
            _ => Err(Error::NotAnElement(id)),
        }
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let node = Node {
            parent: None,
            children: Vec::new(),
            kind,
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.get(node).and_then(|n| n.parent) else {
            return;
        };
        if let Some(parent) = self.get_mut(parent) {
            parent.children.retain(|child| *child != node);
        }
        if let Some(node) = self.get_mut(node) {
            node.parent = None;
        }
    }

    /// Detaches `node` and frees it together with its descendants.
    fn destroy(&mut self, node: NodeId) {
        if self.get(node).is_none() {
            return;
        }
        self.detach(node);
        let doomed: Vec<NodeId> = std::iter::once(node).chain(self.descendants(node)).collect();
        for id in &doomed {
            let slot = &mut self.slots[id.index];
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(id.index);
        }
        trace!("Destroyed {} nodes under {node:?}", doomed.len());
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    fn candidates(&self, scope: Option<NodeId>) -> Vec<NodeId> {
        match scope {
            Some(scope) => self.descendants(scope),
            None => std::iter::once(self.root)
                .chain(self.descendants(self.root))
                .collect(),
        }
    }

    fn insert_parsed(&mut self, parent: NodeId, parsed: Vec<ParsedNode>) {
        for node in parsed {
            let (kind, children) = match node {
                ParsedNode::Element {
                    tag,
                    attributes,
                    children,
                } => {
                    let (style, attributes): (Vec<_>, Vec<_>) =
                        attributes.into_iter().partition(|(name, _)| name == "style");
                    let style = style
                        .first()
                        .map(|(_, value)| parse_style(value))
                        .unwrap_or_default();
                    (
                        NodeKind::Element(ElementData {
                            tag,
                            attributes,
                            style,
                        }),
                        children,
                    )
                }
                ParsedNode::Text(text) => (NodeKind::Text(text), Vec::new()),
                ParsedNode::Comment(text) => (NodeKind::Comment(text), Vec::new()),
            };
            let id = self.push_node(kind);
            self.link(parent, id);
            self.insert_parsed(id, children);
        }
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(entry) = self.get(node) else {
            return;
        };
        match &entry.kind {
            NodeKind::Text(text) => out.push_str(&escape(text, false)),
            NodeKind::Comment(text) => {
                let _ = write!(out, "<!--{text}-->");
            }
            NodeKind::Element(element) => {
                let _ = write!(out, "<{}", element.tag);
                for (name, value) in &element.attributes {
                    let _ = write!(out, " {name}=\"{}\"", escape(value, true));
                }
                if !element.style.is_empty() {
                    let _ = write!(out, " style=\"{}\"", escape(&serialize_style(&element.style), true));
                }
                out.push('>');
                if is_void_element(&element.tag) {
                    return;
                }
                for child in &entry.children {
                    self.write_html(*child, out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }
}

impl ElementView for VirtualDocument {
    fn tag_name(&self, node: NodeId) -> Option<&str> {
        VirtualDocument::tag_name(self, node)
    }

    fn attribute_value(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)
            .ok()?
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node)
    }
}

impl Document for VirtualDocument {
    fn document_element(&self) -> NodeId {
        self.root
    }

    fn body(&self) -> NodeId {
        self.body
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.candidates(None)
            .into_iter()
            .find(|node| self.attribute_value(*node, "id") == Some(id))
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(NodeKind::Element(ElementData {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            style: Vec::new(),
        }))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        if name == "style" {
            let element = self.element(node).ok()?;
            return (!element.style.is_empty()).then(|| serialize_style(&element.style));
        }
        self.attribute_value(node, name).map(str::to_string)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        let element = self.element_mut(node)?;
        let name = name.to_ascii_lowercase();
        if name == "style" {
            element.style = parse_style(value);
            return Ok(());
        }
        match element.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => element.attributes.push((name, value.to_string())),
        }
        Ok(())
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) -> Result<()> {
        self.element(node)?;
        let parsed = parse_fragment(html);
        for child in self.children(node).to_vec() {
            self.destroy(child);
        }
        self.insert_parsed(node, parsed);
        Ok(())
    }

    fn query_selector(&self, scope: Option<NodeId>, selector: &str) -> Result<Option<NodeId>> {
        if let Some(scope) = scope {
            self.node(scope)?;
        }
        let selector = Selector::parse(selector)?;
        Ok(self
            .candidates(scope)
            .into_iter()
            .find(|id| selector.matches(self, *id)))
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.element(node)
            .ok()?
            .style
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value.clone())
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> Result<()> {
        let style = &mut self.element_mut(node)?.style;
        if value.is_empty() {
            style.retain(|(key, _)| key != property);
            return Ok(());
        }
        match style.iter_mut().find(|(key, _)| key == property) {
            Some(entry) => entry.1 = value.to_string(),
            None => style.push((property.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.element(parent)?;
        self.node(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(Error::InvalidHierarchy { parent, child });
        }
        self.detach(child);
        self.link(parent, child);
        Ok(())
    }

    fn remove_node(&mut self, node: NodeId) {
        if node == self.root || node == self.body {
            trace!("Refusing to remove {node:?}");
            return;
        }
        self.destroy(node);
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.get(node).is_some() && self.is_ancestor_or_self(self.root, node)
    }

    fn supports_style(&self, property: &str) -> bool {
        self.style_support.contains(property)
    }
}

fn parse_style(value: &str) -> Vec<(String, String)> {
    value
        .split(';')
        .filter_map(|declaration| {
            let (name, value) = declaration.split_once(':')?;
            let (name, value) = (name.trim(), value.trim());
            (!name.is_empty() && !value.is_empty()).then(|| (name.to_string(), value.to_string()))
        })
        .collect()
}

fn serialize_style(style: &[(String, String)]) -> String {
    style
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
