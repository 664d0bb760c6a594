//! Effective-theme resolution over the ancestor chain.
//!
//! A node with no theme of its own inherits from its nearest ancestor that
//! has one. The two theme kinds resolve independently and by slightly
//! different rules:
//!
//! - **Full theme** ([`resolve_theme`]): first non-empty `applied_theme`
//!   walking towards the root, with the legacy `entity_theme` field checked
//!   at each node as a fallback before moving up. Empty at the root means
//!   "defer to the site default", which is outside this crate.
//! - **Partial theme** ([`resolve_partial`]): first non-empty
//!   `partial_theme`, except that the literal sentinel [`PARTIAL_NONE`]
//!   terminates inheritance immediately. This is the one case where the
//!   presence of a value suppresses a result instead of producing one: a
//!   section can opt out of a partial theme its ancestors set.
//!
//! Both walks are iterative and bounded by [`MAX_ANCESTOR_DEPTH`], so an
//! accidental parent cycle surfaces as a detected error rather than
//! unbounded recursion. A `parent_id` the store does not recognize ends the
//! walk silently; a dangling reference degrades the same way a root does.
//!
//! Results are computed per request and never cached: parent themes can
//! change between requests.

use serde::Serialize;
use tracing::trace;

use crate::error::ThemeError;
use crate::node::{NodeId, NodeStore, ThemeAware};

/// Upper bound on ancestor-chain length during resolution.
///
/// Deep enough for any real page tree; small enough that a two-node parent
/// cycle is detected almost immediately.
pub const MAX_ANCESTOR_DEPTH: usize = 64;

/// Sentinel `partial_theme` value that stops inheritance at a node.
pub const PARTIAL_NONE: &str = "none";

/// The themes governing one render request.
///
/// Computed per request via [`resolve`]; not persisted, not cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedTheme {
    /// Effective full theme, or `None` for the site default.
    pub theme: Option<String>,
    /// Effective partial theme, or `None` when no overrides apply.
    pub partial: Option<String>,
}

/// Resolves the effective full theme for `id`.
///
/// Checks, per node from `id` towards the root: `applied_theme`, then the
/// legacy `entity_theme` compatibility field, then the parent. `Ok(None)`
/// means "use the site default theme".
///
/// # Errors
///
/// [`ThemeError::AncestryDepthExceeded`] when the walk visits more than
/// [`MAX_ANCESTOR_DEPTH`] nodes, which indicates a parent cycle.
pub fn resolve_theme(store: &dyn NodeStore, id: NodeId) -> Result<Option<String>, ThemeError> {
    let mut current = id;
    for _ in 0..MAX_ANCESTOR_DEPTH {
        let Some(node) = store.node(current) else {
            // Dangling parent reference; ends the chain like a root does.
            return Ok(None);
        };
        if let Some(theme) = &node.applied_theme {
            trace!(node = %current, %theme, "full theme resolved from applied_theme");
            return Ok(Some(theme.clone()));
        }
        if let Some(theme) = &node.entity_theme {
            trace!(node = %current, %theme, "full theme resolved from entity_theme");
            return Ok(Some(theme.clone()));
        }
        match node.parent_id {
            Some(parent) => current = parent,
            None => return Ok(None),
        }
    }
    Err(ThemeError::AncestryDepthExceeded {
        start: id,
        max: MAX_ANCESTOR_DEPTH,
    })
}

/// Resolves the effective partial theme for `id`.
///
/// The first node on the path to the root with a non-empty `partial_theme`
/// decides the result: the sentinel [`PARTIAL_NONE`] yields `Ok(None)` even
/// when an ancestor carries a real value, any other value is returned as-is.
///
/// # Errors
///
/// [`ThemeError::AncestryDepthExceeded`] when the walk visits more than
/// [`MAX_ANCESTOR_DEPTH`] nodes.
pub fn resolve_partial(store: &dyn NodeStore, id: NodeId) -> Result<Option<String>, ThemeError> {
    let mut current = id;
    for _ in 0..MAX_ANCESTOR_DEPTH {
        let Some(node) = store.node(current) else {
            return Ok(None);
        };
        match node.partial_theme.as_deref() {
            Some(PARTIAL_NONE) => {
                trace!(node = %current, "partial-theme inheritance stopped by sentinel");
                return Ok(None);
            }
            Some(theme) => {
                trace!(node = %current, theme, "partial theme resolved");
                return Ok(Some(theme.to_string()));
            }
            None => {}
        }
        match node.parent_id {
            Some(parent) => current = parent,
            None => return Ok(None),
        }
    }
    Err(ThemeError::AncestryDepthExceeded {
        start: id,
        max: MAX_ANCESTOR_DEPTH,
    })
}

/// Resolves both theme kinds for `id` in one call.
pub fn resolve(store: &dyn NodeStore, id: NodeId) -> Result<ResolvedTheme, ThemeError> {
    Ok(ResolvedTheme {
        theme: resolve_theme(store, id)?,
        partial: resolve_partial(store, id)?,
    })
}

/// Builds the space-separated `"<name>-theme"` CSS class string for a
/// subject, for use as a styling hook by the rendering layer.
///
/// Empty theme segments are omitted, so the result is `""`, `"main-theme"`,
/// `"minimal-theme"`, or `"main-theme minimal-theme"`.
pub fn theme_hierarchy_classes(aware: &dyn ThemeAware) -> Result<String, ThemeError> {
    let mut classes = String::new();
    if let Some(theme) = aware.applied_theme()? {
        classes.push_str(&theme);
        classes.push_str("-theme");
    }
    if let Some(partial) = aware.applied_partial_theme()? {
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(&partial);
        classes.push_str("-theme");
    }
    Ok(classes)
}
