//! Candidate template base-name derivation.
//!
//! When a caller asks for overrides without naming templates explicitly, the
//! candidate list is derived from the requesting handler's type hierarchy,
//! most specific first, mirroring the naming convention the rendering engine
//! uses for its own default template lookup. Overrides therefore only kick
//! in for names the engine would otherwise have tried.
//!
//! There is no runtime type reflection here: hosts describe the hierarchy
//! explicitly as a [`HandlerChain`] when they register a handler.

use std::collections::BTreeSet;

/// The action name that never produces action-specific candidates.
pub const DEFAULT_ACTION: &str = "index";

/// A handler's type names, most specific first.
///
/// `content_types` holds the application-side names up to, but excluding,
/// the framework's content-handler boundary. `framework_types` holds the
/// names between that boundary and the root handler type; those participate
/// in action-specific candidates only, which keeps plain lookups from ever
/// matching a framework-level template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerChain {
    content_types: Vec<String>,
    framework_types: Vec<String>,
}

impl HandlerChain {
    /// Creates a chain from the application-side type names, most specific
    /// first.
    pub fn new<I, S>(content_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            content_types: content_types.into_iter().map(Into::into).collect(),
            framework_types: Vec::new(),
        }
    }

    /// Adds the framework-side names above the content boundary.
    pub fn with_framework_types<I, S>(mut self, framework_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.framework_types = framework_types.into_iter().map(Into::into).collect();
        self
    }

    /// Application-side type names, most specific first.
    pub fn content_types(&self) -> &[String] {
        &self.content_types
    }

    /// Returns true if the chain names no types at all.
    pub fn is_empty(&self) -> bool {
        self.content_types.is_empty() && self.framework_types.is_empty()
    }
}

/// The template base name for a type: everything before the first `_`.
///
/// `NewsPage_Controller` and `NewsPage` both map to the `NewsPage` template.
fn base_token(type_name: &str) -> &str {
    type_name.split('_').next().unwrap_or(type_name)
}

/// Derives candidate template base names for a handler chain.
///
/// When `action` is set and is not [`DEFAULT_ACTION`], action-suffixed names
/// (`<Token>_<action>`) come first, drawn from the full chain including the
/// framework-side names. Plain names follow, drawn from the content-side
/// names only. Duplicates are removed, preserving first-seen order.
pub fn derive_candidates(chain: &HandlerChain, action: Option<&str>) -> Vec<String> {
    let mut names = Vec::new();

    if let Some(action) = action.filter(|a| !a.is_empty() && *a != DEFAULT_ACTION) {
        for type_name in chain.content_types.iter().chain(&chain.framework_types) {
            names.push(format!("{}_{}", base_token(type_name), action));
        }
    }
    for type_name in &chain.content_types {
        names.push(base_token(type_name).to_string());
    }

    dedupe_preserving_order(names)
}

fn dedupe_preserving_order(names: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn news_chain() -> HandlerChain {
        HandlerChain::new(["NewsPage_Controller", "Page_Controller"])
            .with_framework_types(["ContentController", "Controller"])
    }

    #[test]
    fn test_plain_candidates_use_content_types_only() {
        assert_eq!(
            derive_candidates(&news_chain(), None),
            vec!["NewsPage", "Page"]
        );
    }

    #[test]
    fn test_default_action_adds_nothing() {
        assert_eq!(
            derive_candidates(&news_chain(), Some("index")),
            derive_candidates(&news_chain(), None)
        );
        assert_eq!(
            derive_candidates(&news_chain(), Some("")),
            derive_candidates(&news_chain(), None)
        );
    }

    #[test]
    fn test_action_candidates_span_full_chain_and_come_first() {
        assert_eq!(
            derive_candidates(&news_chain(), Some("archive")),
            vec![
                "NewsPage_archive",
                "Page_archive",
                "ContentController_archive",
                "Controller_archive",
                "NewsPage",
                "Page",
            ]
        );
    }

    #[test]
    fn test_base_token_strips_controller_suffix() {
        assert_eq!(base_token("NewsPage_Controller"), "NewsPage");
        assert_eq!(base_token("NewsPage"), "NewsPage");
    }

    #[test]
    fn test_duplicates_removed_preserving_order() {
        // Two types sharing a base token collapse to one candidate.
        let chain = HandlerChain::new(["Page_Controller", "Page"]);
        assert_eq!(derive_candidates(&chain, None), vec!["Page"]);
    }

    #[test]
    fn test_empty_chain_yields_no_candidates() {
        assert!(derive_candidates(&HandlerChain::default(), Some("show")).is_empty());
    }
}
