//! Per-theme helper objects and request lifecycle hooks.
//!
//! A theme can ship a helper: an object that receives `before_init` and
//! `after_init` hooks around each request the theme governs. Helpers are
//! registered explicitly in a [`HelperRegistry`] at process start, one
//! factory per theme module; lookup is a plain table probe, with both the
//! positive and the "no helper registered" outcome cached per theme name so
//! repeated lookups never repeat the probe.
//!
//! The registry is scoped to one request handler instance. Concurrent
//! requests each get their own registry, so the cache needs no locking.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::context::RenderContext;
use crate::error::ThemeError;
use crate::node::ThemeAware;

/// Lifecycle hooks a theme's helper receives around request handling.
///
/// Both hooks default to no-ops so helpers implement only what they need.
pub trait ThemeHelper {
    /// Invoked before request initialization, after the render context has
    /// been populated with the resolved themes.
    fn before_init(&self, ctx: &RenderContext) {
        let _ = ctx;
    }

    /// Invoked after request initialization.
    fn after_init(&self, ctx: &RenderContext) {
        let _ = ctx;
    }
}

type HelperFactory = Box<dyn Fn() -> Rc<dyn ThemeHelper>>;

/// Registration table and per-request cache of theme helpers.
#[derive(Default)]
pub struct HelperRegistry {
    /// Factories keyed by sanitized theme name.
    factories: HashMap<String, HelperFactory>,
    /// Lookup outcomes keyed by the unsanitized theme name, including
    /// negative outcomes.
    cache: RefCell<HashMap<String, Option<Rc<dyn ThemeHelper>>>>,
}

impl HelperRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a helper factory for `theme`. The name is sanitized before
    /// keying, so `news-site` and `newssite` register the same slot.
    pub fn register<F, H>(&mut self, theme: &str, factory: F)
    where
        F: Fn() -> H + 'static,
        H: ThemeHelper + 'static,
    {
        self.factories.insert(
            sanitize(theme),
            Box::new(move || Rc::new(factory()) as Rc<dyn ThemeHelper>),
        );
    }

    /// Returns the helper for `theme`, constructing it on first need.
    ///
    /// Idempotent per theme name for the life of the registry: the same
    /// cached instance (or the same cached `None`) is returned every time.
    pub fn helper(&self, theme: &str) -> Option<Rc<dyn ThemeHelper>> {
        if let Some(cached) = self.cache.borrow().get(theme) {
            return cached.clone();
        }

        let built = self.factories.get(&sanitize(theme)).map(|factory| factory());
        if built.is_none() {
            debug!(theme, "no helper registered; caching the miss");
        }
        self.cache
            .borrow_mut()
            .insert(theme.to_string(), built.clone());
        built
    }

    /// Fires the before-init hooks for a request.
    ///
    /// Resolves the subject's themes (an absent [`ThemeAware`] capability
    /// counts as "neither theme"), stores them into `ctx` — setting the
    /// active rendering theme exactly once, before any template resolution
    /// for the request — and then invokes `before_init` on the full-theme
    /// helper followed by the partial-theme helper.
    pub fn before_init(
        &self,
        aware: Option<&dyn ThemeAware>,
        ctx: &mut RenderContext,
    ) -> Result<(), ThemeError> {
        let (applied, partial) = resolved_pair(aware)?;
        ctx.set_active_theme(applied.clone());
        ctx.set_partial_theme(partial.clone());

        for theme in [&applied, &partial].into_iter().flatten() {
            if let Some(helper) = self.helper(theme) {
                helper.before_init(ctx);
            }
        }
        Ok(())
    }

    /// Fires the after-init hooks for a request, full-theme helper first,
    /// without touching the context.
    pub fn after_init(
        &self,
        aware: Option<&dyn ThemeAware>,
        ctx: &RenderContext,
    ) -> Result<(), ThemeError> {
        let (applied, partial) = resolved_pair(aware)?;
        for theme in [&applied, &partial].into_iter().flatten() {
            if let Some(helper) = self.helper(theme) {
                helper.after_init(ctx);
            }
        }
        Ok(())
    }
}

fn resolved_pair(
    aware: Option<&dyn ThemeAware>,
) -> Result<(Option<String>, Option<String>), ThemeError> {
    match aware {
        Some(aware) => Ok((aware.applied_theme()?, aware.applied_partial_theme()?)),
        None => Ok((None, None)),
    }
}

/// Helper names drop hyphens: the theme `news-site` maps to the helper
/// registered under `newssite`.
fn sanitize(theme: &str) -> String {
    theme.chars().filter(|c| *c != '-').collect()
}
