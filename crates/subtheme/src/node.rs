//! Content-node data model and the node-store seam.
//!
//! The page tree itself is owned by the host CMS; this crate only reads it.
//! [`NodeStore`] is the seam the host implements (usually a thin adapter over
//! its own page table), and [`InMemoryNodeStore`] is the reference
//! implementation used by tests and small hosts.
//!
//! # Theme fields
//!
//! Each node carries up to three optional theme fields:
//!
//! - `applied_theme`: a full theme name. Governs the base template set.
//! - `partial_theme`: a partial theme name, or the literal sentinel `"none"`
//!   (see [`PARTIAL_NONE`](crate::resolve::PARTIAL_NONE)) which stops
//!   partial-theme inheritance at this node.
//! - `entity_theme`: a compatibility field for deployments that key a single
//!   theme on an owning entity (a whole site) rather than per page.
//!
//! Setting both an applied and a partial theme on the same node is not
//! rejected: both resolve independently and both apply. The settings UI
//! warns against it (see [`crate::settings`]), but the resolver stays
//! tolerant.
//!
//! # Capability checks
//!
//! Objects that can answer "which theme governs you?" implement
//! [`ThemeAware`]. Callers that may be handed a non-page subject (a system
//! controller, say) branch on whether the capability is present rather than
//! probing for methods at runtime.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::resolve;

/// Identifier for a node in the host's page tree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A page-tree entity with optional theme tags.
///
/// Theme fields never hold `Some("")`: the builder methods normalize empty
/// strings to `None`, so "unset" has exactly one representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentNode {
    /// Unique identifier within the store.
    pub id: NodeId,
    /// Parent node, or `None` for a tree root.
    pub parent_id: Option<NodeId>,
    /// Full theme name applied at this node.
    pub applied_theme: Option<String>,
    /// Partial theme name, or the `"none"` sentinel.
    pub partial_theme: Option<String>,
    /// Legacy single-theme field keyed on the owning entity.
    pub entity_theme: Option<String>,
}

impl ContentNode {
    /// Creates a root node with no theme fields set.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            parent_id: None,
            applied_theme: None,
            partial_theme: None,
            entity_theme: None,
        }
    }

    /// Sets the parent node.
    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// Sets the applied (full) theme. An empty string clears the field.
    pub fn with_applied_theme(mut self, theme: impl Into<String>) -> Self {
        self.applied_theme = non_empty(theme.into());
        self
    }

    /// Sets the partial theme. An empty string clears the field; the literal
    /// `"none"` is kept as-is and acts as the inheritance-stop sentinel.
    pub fn with_partial_theme(mut self, theme: impl Into<String>) -> Self {
        self.partial_theme = non_empty(theme.into());
        self
    }

    /// Sets the legacy entity-level theme. An empty string clears the field.
    pub fn with_entity_theme(mut self, theme: impl Into<String>) -> Self {
        self.entity_theme = non_empty(theme.into());
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Read-only access to the host's page tree.
///
/// Implementations must present a tree: the `parent` relation is expected to
/// be acyclic. The resolver bounds its walks regardless, so a cyclic chain
/// surfaces as [`ThemeError::AncestryDepthExceeded`] rather than a hang, but
/// a store that produces cycles is a host-side defect.
pub trait NodeStore {
    /// Looks up a node by id.
    fn node(&self, id: NodeId) -> Option<&ContentNode>;

    /// Returns the parent of `id`, if the node exists and has one.
    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent_id)
    }
}

/// Map-backed [`NodeStore`] for tests and small hosts.
#[derive(Debug, Default)]
pub struct InMemoryNodeStore {
    nodes: HashMap<NodeId, ContentNode>,
}

impl InMemoryNodeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, replacing any existing node with the same id.
    pub fn insert(&mut self, node: ContentNode) {
        self.nodes.insert(node.id, node);
    }

    /// Returns the number of nodes in the store.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl NodeStore for InMemoryNodeStore {
    fn node(&self, id: NodeId) -> Option<&ContentNode> {
        self.nodes.get(&id)
    }
}

/// Capability interface for subjects that support theme resolution.
///
/// This replaces runtime "does it have that method?" probing: callers hold
/// an `Option<&dyn ThemeAware>` and treat an absent capability as "no theme
/// anywhere" (see [`crate::helper::HelperRegistry::before_init`]).
pub trait ThemeAware {
    /// The effective full theme governing this subject.
    fn applied_theme(&self) -> Result<Option<String>, ThemeError>;

    /// The effective partial theme governing this subject.
    fn applied_partial_theme(&self) -> Result<Option<String>, ThemeError>;
}

/// A (store, node) pair viewed through the [`ThemeAware`] capability.
///
/// Resolution is recomputed on every call; parent themes may change between
/// requests, so nothing is cached here.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    store: &'a dyn NodeStore,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// Creates a theme-aware view of `id` within `store`.
    pub fn new(store: &'a dyn NodeStore, id: NodeId) -> Self {
        Self { store, id }
    }

    /// The node this view points at.
    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl ThemeAware for NodeRef<'_> {
    fn applied_theme(&self) -> Result<Option<String>, ThemeError> {
        resolve::resolve_theme(self.store, self.id)
    }

    fn applied_partial_theme(&self) -> Result<Option<String>, ThemeError> {
        resolve::resolve_partial(self.store, self.id)
    }
}
