//! Per-request render context.
//!
//! The active rendering theme used to be process-global state on the
//! rendering engine. Here it is an explicit value threaded through the
//! request instead, so concurrent request handling (if ever introduced)
//! cannot race on shared mutable state. One context is populated per
//! request by [`HelperRegistry::before_init`](crate::helper::HelperRegistry::before_init)
//! and read by everything downstream, template override application
//! included.

/// The resolved theme state for one render request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    active_theme: Option<String>,
    partial_theme: Option<String>,
}

impl RenderContext {
    /// Creates an empty context; themes are filled in at request start.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active full theme the rendering engine should search first.
    pub fn active_theme(&self) -> Option<&str> {
        self.active_theme.as_deref()
    }

    /// The partial theme whose overrides apply to this request.
    pub fn partial_theme(&self) -> Option<&str> {
        self.partial_theme.as_deref()
    }

    /// Sets the active rendering theme. Must happen before any template
    /// resolution for the request; override filtering depends on the
    /// loader searching the correct theme's path.
    pub fn set_active_theme(&mut self, theme: Option<String>) {
        self.active_theme = theme;
    }

    /// Sets the partial theme for the request.
    pub fn set_partial_theme(&mut self, theme: Option<String>) {
        self.partial_theme = theme;
    }

    /// Builder form of [`set_partial_theme`](Self::set_partial_theme), for
    /// hosts that assemble a context directly.
    pub fn with_partial_theme(mut self, theme: impl Into<String>) -> Self {
        self.partial_theme = Some(theme.into());
        self
    }

    /// Builder form of [`set_active_theme`](Self::set_active_theme).
    pub fn with_active_theme(mut self, theme: impl Into<String>) -> Self {
        self.active_theme = Some(theme.into());
        self
    }
}
