//! Binding located overrides into a view.
//!
//! [`apply_overrides`] is the step between "the locator found theme-local
//! template files" and "the rendering engine executes the view": it rewrites
//! the view's slot-to-file bindings in place. Views are reached through the
//! [`View`] trait; hosts adapt their engine's view object, and [`SlotView`]
//! is the crate's plain map-backed implementation, also used as the probe
//! vehicle by [`probe_override`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::debug;

use crate::candidates::HandlerChain;
use crate::context::RenderContext;
use crate::locate::{find_overrides, TemplateLoader, TemplateSlot};

/// A view object whose slots can be rebound to template files.
pub trait View {
    /// Binds `slot` to `path`, or clears the binding on `None`.
    fn set_template(&mut self, slot: TemplateSlot, path: Option<PathBuf>);

    /// The file currently bound to `slot`, if any.
    fn template(&self, slot: TemplateSlot) -> Option<PathBuf>;
}

/// Map-backed [`View`] implementation.
///
/// A `SlotView` may legitimately hold no bindings at all: it is the view
/// constructed solely to probe whether an override exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotView {
    slots: BTreeMap<TemplateSlot, PathBuf>,
}

impl SlotView {
    /// Creates a view with no slot bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-binds a slot.
    pub fn with_template(mut self, slot: TemplateSlot, path: impl Into<PathBuf>) -> Self {
        self.slots.insert(slot, path.into());
        self
    }

    /// All current slot bindings.
    pub fn templates(&self) -> &BTreeMap<TemplateSlot, PathBuf> {
        &self.slots
    }
}

impl View for SlotView {
    fn set_template(&mut self, slot: TemplateSlot, path: Option<PathBuf>) {
        match path {
            Some(path) => {
                self.slots.insert(slot, path);
            }
            None => {
                self.slots.remove(&slot);
            }
        }
    }

    fn template(&self, slot: TemplateSlot) -> Option<PathBuf> {
        self.slots.get(&slot).cloned()
    }
}

/// Rebinds a view's slots to the partial theme's override templates.
///
/// The partial theme comes from `ctx`, not from a parameter the caller
/// threads manually; with no partial theme in effect the view is returned
/// untouched. When `candidates` is empty they are derived from `chain` and
/// `action`. Returns whether any slot was rebound.
///
/// A `Layout` match rebinds the `Layout` slot and a `Main` match the `Main`
/// slot. An `Includes` match is **also bound onto the `Main` slot**,
/// replacing any `Main` match. This single-slot collapse is long-standing
/// behavior that downstream themes depend on, even though it reads like a
/// duplicate slot assignment; confirm with the product owner before
/// changing it.
pub fn apply_overrides(
    view: &mut dyn View,
    ctx: &RenderContext,
    loader: &dyn TemplateLoader,
    chain: &HandlerChain,
    candidates: &[String],
    action: Option<&str>,
) -> bool {
    let Some(partial) = ctx.partial_theme() else {
        return false;
    };
    let Some(overrides) = find_overrides(loader, partial, candidates, chain, action) else {
        return false;
    };

    let mut rebound = false;
    if let Some(path) = overrides.get(&TemplateSlot::Layout) {
        view.set_template(TemplateSlot::Layout, Some(path.clone()));
        rebound = true;
    }
    if let Some(path) = overrides.get(&TemplateSlot::Main) {
        view.set_template(TemplateSlot::Main, Some(path.clone()));
        rebound = true;
    }
    if let Some(path) = overrides.get(&TemplateSlot::Includes) {
        view.set_template(TemplateSlot::Main, Some(path.clone()));
        rebound = true;
    }
    if rebound {
        debug!(theme = partial, "view slots rebound to partial-theme overrides");
    }
    rebound
}

/// Probes whether the request's partial theme overrides a single template.
///
/// Builds an empty [`SlotView`], applies overrides for `name`, and returns
/// the resulting `Main` binding. `None` means "no override found" and the
/// caller renders empty output; that is normal behavior, not an error, since
/// the template may exist only in the override theme or not at all.
pub fn probe_override(
    ctx: &RenderContext,
    loader: &dyn TemplateLoader,
    name: &str,
) -> Option<PathBuf> {
    let mut view = SlotView::new();
    let candidates = vec![name.to_string()];
    apply_overrides(
        &mut view,
        ctx,
        loader,
        &HandlerChain::default(),
        &candidates,
        None,
    );
    view.template(TemplateSlot::Main)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    /// Loader seeded with fixed per-slot matches, all inside `minimal`.
    struct MinimalLoader(BTreeMap<TemplateSlot, PathBuf>);

    impl MinimalLoader {
        fn with(entries: &[(TemplateSlot, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(slot, rel)| (*slot, Path::new("themes/minimal").join(rel)))
                    .collect(),
            )
        }
    }

    impl TemplateLoader for MinimalLoader {
        fn find_templates(&self, _: &[String], _: &str) -> BTreeMap<TemplateSlot, PathBuf> {
            self.0.clone()
        }
    }

    fn minimal_ctx() -> RenderContext {
        RenderContext::new().with_partial_theme("minimal")
    }

    fn page() -> Vec<String> {
        vec!["Page".to_string()]
    }

    #[test]
    fn test_no_partial_theme_leaves_view_untouched() {
        let loader = MinimalLoader::with(&[(TemplateSlot::Main, "templates/Page.jinja")]);
        let mut view = SlotView::new().with_template(TemplateSlot::Main, "original.jinja");
        let before = view.clone();

        let rebound = apply_overrides(
            &mut view,
            &RenderContext::new(),
            &loader,
            &HandlerChain::default(),
            &page(),
            None,
        );

        assert!(!rebound);
        assert_eq!(view, before);
    }

    #[test]
    fn test_layout_and_main_rebound() {
        let loader = MinimalLoader::with(&[
            (TemplateSlot::Main, "templates/Page.jinja"),
            (TemplateSlot::Layout, "templates/Layout/Page.jinja"),
        ]);
        let mut view = SlotView::new()
            .with_template(TemplateSlot::Main, "base/Page.jinja")
            .with_template(TemplateSlot::Layout, "base/Layout/Page.jinja");

        let rebound = apply_overrides(
            &mut view,
            &minimal_ctx(),
            &loader,
            &HandlerChain::default(),
            &page(),
            None,
        );

        assert!(rebound);
        assert_eq!(
            view.template(TemplateSlot::Main).unwrap(),
            Path::new("themes/minimal/templates/Page.jinja")
        );
        assert_eq!(
            view.template(TemplateSlot::Layout).unwrap(),
            Path::new("themes/minimal/templates/Layout/Page.jinja")
        );
    }

    #[test]
    fn test_includes_match_collapses_onto_main_slot() {
        let loader = MinimalLoader::with(&[
            (TemplateSlot::Main, "templates/Page.jinja"),
            (TemplateSlot::Includes, "templates/Includes/Page.jinja"),
        ]);
        let mut view = SlotView::new();

        apply_overrides(
            &mut view,
            &minimal_ctx(),
            &loader,
            &HandlerChain::default(),
            &page(),
            None,
        );

        // The Includes match lands on Main, replacing the Main match.
        assert_eq!(
            view.template(TemplateSlot::Main).unwrap(),
            Path::new("themes/minimal/templates/Includes/Page.jinja")
        );
        assert_eq!(view.template(TemplateSlot::Includes), None);
    }

    #[test]
    fn test_no_matches_reports_false() {
        let loader = MinimalLoader::with(&[]);
        let mut view = SlotView::new();

        let rebound = apply_overrides(
            &mut view,
            &minimal_ctx(),
            &loader,
            &HandlerChain::default(),
            &page(),
            None,
        );

        assert!(!rebound);
        assert!(view.templates().is_empty());
    }

    #[test]
    fn test_probe_override_distinguishes_hit_from_miss() {
        let hit = MinimalLoader::with(&[(TemplateSlot::Main, "templates/Banner.jinja")]);
        let miss = MinimalLoader::with(&[]);
        let ctx = minimal_ctx();

        assert_eq!(
            probe_override(&ctx, &hit, "Banner").unwrap(),
            Path::new("themes/minimal/templates/Banner.jinja")
        );
        assert_eq!(probe_override(&ctx, &miss, "Banner"), None);
        // No partial theme in context: probing finds nothing either.
        assert_eq!(probe_override(&RenderContext::new(), &hit, "Banner"), None);
    }
}
