//! Class list helpers.
//!
//! These operate on the space separated `class` attribute and accept an
//! optional element: passing `None` is a silent no-op, which is how the
//! controller copes with selectors that match nothing.

use tracing::trace;

use super::{Document, NodeId};

/// Returns `true` if the element carries `class_name`.
pub fn has_class<D: Document + ?Sized>(document: &D, node: Option<NodeId>, class_name: &str) -> bool {
    let Some(node) = node else {
        return false;
    };
    document
        .class_name(node)
        .split_whitespace()
        .any(|class| class == class_name)
}

/// Adds `class_name` unless the element already has it.
pub fn add_class<D: Document + ?Sized>(document: &mut D, node: Option<NodeId>, class_name: &str) {
    let Some(node) = node else {
        return;
    };
    if has_class(document, Some(node), class_name) {
        return;
    }
    let updated = format!("{} {}", document.class_name(node), class_name);
    if let Err(e) = document.set_class_name(node, updated.trim()) {
        trace!("Could not add class {class_name}: {e}");
    }
}

/// Removes every occurrence of `class_name`.
pub fn remove_class<D: Document + ?Sized>(document: &mut D, node: Option<NodeId>, class_name: &str) {
    let Some(node) = node else {
        return;
    };
    let current = document.class_name(node);
    let updated = current
        .split_whitespace()
        .filter(|class| *class != class_name)
        .collect::<Vec<_>>()
        .join(" ");
    if updated == current {
        return;
    }
    if let Err(e) = document.set_class_name(node, &updated) {
        trace!("Could not remove class {class_name}: {e}");
    }
}
