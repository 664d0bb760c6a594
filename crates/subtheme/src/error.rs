//! Error types for theme resolution.
//!
//! Almost nothing in this crate is a hard error. A missing override, an
//! unregistered helper, or a page with no theme anywhere on its ancestor
//! chain all degrade to "behave as if this layer were absent" and surface
//! as `None`, never as an `Err`. The variants below cover the one situation
//! that genuinely cannot be recovered from: a malformed parent chain.

use thiserror::Error;

use crate::node::NodeId;

/// Error type for theme resolution operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// Walking the ancestor chain visited more nodes than any real page tree
    /// contains. The parent chain almost certainly contains a cycle.
    #[error(
        "ancestor chain starting at node {start} exceeded {max} nodes; \
         the parent chain likely contains a cycle"
    )]
    AncestryDepthExceeded {
        /// The node the walk started from.
        start: NodeId,
        /// The depth limit that was hit.
        max: usize,
    },
}
