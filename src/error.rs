//! Error handling for the jprogress library.
//!
//! The controller's public operations never fail: a missing element or a bad
//! selector degrades to a no-op. The document layer underneath does report what
//! went wrong, through the [`Error`] enum below, so the controller can log it
//! and carry on.

use thiserror::Error;

use crate::dom::NodeId;

/// Errors that can happen while driving a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The selector uses syntax the document does not understand.
    #[error("Unsupported selector: {0}")]
    UnsupportedSelector(String),

    /// A node id does not belong to this document, or its node was destroyed.
    #[error("Unknown node: {0:?}")]
    UnknownNode(NodeId),

    /// The node exists but is not an element (text, comment).
    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    /// Appending would make a node its own ancestor.
    #[error("Cannot append {child:?} under {parent:?}")]
    InvalidHierarchy {
        /// Requested parent.
        parent: NodeId,
        /// Node being appended.
        child: NodeId,
    },

    /// A queue step was pushed outside of a Tokio runtime.
    ///
    /// Returned by [`TaskQueue::push`](crate::queue::TaskQueue::push). The step
    /// is kept and runs once a later push is made from inside a runtime.
    #[error("No Tokio runtime available to drain the animation queue")]
    NoRuntime,
}

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, Error>;
