//! # Subtheme - Hierarchical Template-Override Resolution
//!
//! `subtheme` decides which theme governs a page in a tree of content nodes,
//! which theme-local template files satisfy the page's view slots, and which
//! per-theme helper objects receive lifecycle hooks around the request.
//!
//! A *partial theme* defines only certain templates, which override those of
//! the full theme currently applied to the site. A subsection of a site can
//! restyle a handful of views without copying large chunks of the main
//! theme (the master page template, most of all).
//!
//! This crate is the resolution core, not a CMS: the page tree, the theme
//! field editing UI, and the rendering engine are external collaborators
//! reached through traits. It also is not a templating language — it never
//! parses or executes a template, it only decides *which* file satisfies a
//! named slot.
//!
//! ## Core Concepts
//!
//! - [`NodeStore`]: read-only seam over the host's page tree
//! - [`resolve_theme`] / [`resolve_partial`]: effective-theme resolution up
//!   the ancestor chain, honoring the `"none"` inheritance stop
//! - [`ThemeCatalog`]: classifies configured themes into full vs partial
//! - [`find_overrides`]: theme-exact template lookup with fallback filtering
//! - [`apply_overrides`]: rebinds a view's slots to located overrides
//! - [`HelperRegistry`]: per-theme lifecycle hooks around request handling
//! - [`RenderContext`]: explicit per-request carrier of the resolved themes
//!
//! ## Quick Start
//!
//! ```rust
//! use subtheme::{
//!     resolve, ContentNode, DirectoryTemplateLoader, HandlerChain, HelperRegistry,
//!     InMemoryNodeStore, NodeId, NodeRef, RenderContext, SlotView,
//! };
//!
//! // The host's page tree: a section tagged with a partial theme.
//! let mut store = InMemoryNodeStore::new();
//! store.insert(ContentNode::new(NodeId(1)).with_applied_theme("main"));
//! store.insert(
//!     ContentNode::new(NodeId(2))
//!         .with_parent(NodeId(1))
//!         .with_partial_theme("minimal"),
//! );
//!
//! // Request start: resolve themes into the render context.
//! let registry = HelperRegistry::new();
//! let mut ctx = RenderContext::new();
//! let node = NodeRef::new(&store, NodeId(2));
//! registry.before_init(Some(&node), &mut ctx).unwrap();
//! assert_eq!(ctx.partial_theme(), Some("minimal"));
//!
//! // Rendering: rebind view slots to whatever "minimal" overrides.
//! let loader = DirectoryTemplateLoader::new("themes").with_search_order(["main"]);
//! let chain = HandlerChain::new(["Page_Controller"]);
//! let mut view = SlotView::new();
//! subtheme::apply_overrides(&mut view, &ctx, &loader, &chain, &[], None);
//! ```
//!
//! ## Failure Model
//!
//! Nothing here surfaces a user-visible error from a normal request: a
//! missing override, an unregistered helper, or an unthemed page all
//! degrade to "behave as if this layer were absent". The one hard error is
//! [`ThemeError::AncestryDepthExceeded`], raised when an ancestor walk runs
//! long enough that the parent chain must contain a cycle.
//!
//! ## Concurrency
//!
//! One resolution pass runs synchronously within one request. The only
//! mutable state is the [`HelperRegistry`] cache, which is scoped to a
//! single request-handler instance; concurrent requests get independent
//! registries and contexts, so there is no locking anywhere.

pub mod apply;
pub mod candidates;
pub mod catalog;
pub mod context;
pub mod error;
pub mod helper;
pub mod locate;
pub mod node;
pub mod resolve;
pub mod settings;

pub use apply::{apply_overrides, probe_override, SlotView, View};
pub use candidates::{derive_candidates, HandlerChain, DEFAULT_ACTION};
pub use catalog::{
    FsThemeSource, ThemeCatalog, ThemeSource, MASTER_TEMPLATE, PARTIAL_NONE_LABEL,
};
pub use context::RenderContext;
pub use error::ThemeError;
pub use helper::{HelperRegistry, ThemeHelper};
pub use locate::{
    find_overrides, DirectoryTemplateLoader, TemplateLoader, TemplateSlot, TEMPLATE_EXTENSIONS,
};
pub use node::{ContentNode, InMemoryNodeStore, NodeId, NodeRef, NodeStore, ThemeAware};
pub use resolve::{
    resolve, resolve_partial, resolve_theme, theme_hierarchy_classes, ResolvedTheme,
    MAX_ANCESTOR_DEPTH, PARTIAL_NONE,
};
pub use settings::{
    settings_fields, DropdownField, APPLIED_THEME_FIELD, PARTIAL_THEME_FIELD,
};
