//! Template override lookup inside a partial theme.
//!
//! Given a partial theme and a list of candidate template base names,
//! [`find_overrides`] asks the template loader for matches scoped to that
//! theme, then discards every path that does not actually live inside the
//! theme's directory. The loader is allowed (and, for directory-backed
//! loaders, expected) to fall back to other themes in its search order, so
//! without this filter "no override exists for this theme" would silently
//! receive a wrong-theme match instead of failing to match. The filter is
//! the correctness-critical step of the whole lookup.
//!
//! # Slots
//!
//! Matches are keyed by [`TemplateSlot`], the named regions of a view:
//!
//! | Slot | Directory convention |
//! |------|----------------------|
//! | `Main` | `<theme>/templates/<Name>.<ext>` |
//! | `Layout` | `<theme>/templates/Layout/<Name>.<ext>` |
//! | `Includes` | `<theme>/templates/Includes/<Name>.<ext>` |

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::candidates::{derive_candidates, HandlerChain};

/// Recognized template file extensions in priority order.
///
/// When a candidate name matches files with several extensions, the
/// extension appearing earlier in this list wins.
pub const TEMPLATE_EXTENSIONS: &[&str] = &[".jinja", ".jinja2", ".j2", ".txt"];

/// A named region of a view bound to a specific template file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TemplateSlot {
    /// The view's primary template.
    Main,
    /// The surrounding layout template.
    Layout,
    /// Included fragment templates.
    Includes,
}

impl TemplateSlot {
    /// All slots, in binding order.
    pub const ALL: [TemplateSlot; 3] =
        [TemplateSlot::Main, TemplateSlot::Layout, TemplateSlot::Includes];

    /// The subdirectory a slot's templates live in, if any.
    fn subdir(self) -> Option<&'static str> {
        match self {
            TemplateSlot::Main => None,
            TemplateSlot::Layout => Some("Layout"),
            TemplateSlot::Includes => Some("Includes"),
        }
    }
}

/// The external template store's lookup interface.
///
/// `theme` scopes the search, but implementations may fall back to other
/// themes; callers that need theme-exact results go through
/// [`find_overrides`], which filters fallback matches out.
pub trait TemplateLoader {
    /// Finds template files matching any candidate name, preferring the
    /// named theme, keyed by the slot each match belongs to.
    fn find_templates(
        &self,
        candidates: &[String],
        theme: &str,
    ) -> BTreeMap<TemplateSlot, PathBuf>;
}

/// [`TemplateLoader`] over a `themes/`-style directory tree.
///
/// Lookup prefers the scoped theme, then falls back through the configured
/// search order, which is exactly the fallback behavior
/// [`find_overrides`]'s filter exists to contain. A more specific candidate
/// name beats a closer theme: candidates are tried outermost.
#[derive(Debug, Clone)]
pub struct DirectoryTemplateLoader {
    root: PathBuf,
    search_order: Vec<String>,
}

impl DirectoryTemplateLoader {
    /// Creates a loader rooted at the directory holding the theme folders.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            search_order: Vec::new(),
        }
    }

    /// Sets the fallback theme search order, usually the site's active
    /// theme followed by its parents.
    pub fn with_search_order<I, S>(mut self, themes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_order = themes.into_iter().map(Into::into).collect();
        self
    }

    fn probe(&self, theme: &str, slot: TemplateSlot, name: &str) -> Option<PathBuf> {
        let mut dir = self.root.join(theme).join("templates");
        if let Some(sub) = slot.subdir() {
            dir = dir.join(sub);
        }
        TEMPLATE_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{name}{ext}")))
            .find(|path| path.is_file())
    }
}

impl TemplateLoader for DirectoryTemplateLoader {
    fn find_templates(
        &self,
        candidates: &[String],
        theme: &str,
    ) -> BTreeMap<TemplateSlot, PathBuf> {
        let mut order: Vec<&str> = Vec::with_capacity(self.search_order.len() + 1);
        order.push(theme);
        order.extend(
            self.search_order
                .iter()
                .map(String::as_str)
                .filter(|t| *t != theme),
        );

        let mut found = BTreeMap::new();
        for slot in TemplateSlot::ALL {
            'candidates: for name in candidates {
                for searched in &order {
                    if let Some(path) = self.probe(searched, slot, name) {
                        trace!(
                            ?slot,
                            %name,
                            theme = *searched,
                            path = %path.display(),
                            "template located"
                        );
                        found.insert(slot, path);
                        break 'candidates;
                    }
                }
            }
        }
        found
    }
}

/// Finds theme-exact template overrides for the given candidates.
///
/// When `candidates` is empty, they are derived from `chain` and `action`
/// (see [`derive_candidates`]). Loader matches whose path does not contain
/// the partial theme's directory segment are discarded; `None` means no
/// override exists and the caller renders as if this layer were absent.
pub fn find_overrides(
    loader: &dyn TemplateLoader,
    partial_theme: &str,
    candidates: &[String],
    chain: &HandlerChain,
    action: Option<&str>,
) -> Option<BTreeMap<TemplateSlot, PathBuf>> {
    if partial_theme.is_empty() {
        return None;
    }

    let derived;
    let names: &[String] = if candidates.is_empty() {
        derived = derive_candidates(chain, action);
        &derived
    } else {
        candidates
    };
    if names.is_empty() {
        return None;
    }

    let mut found = loader.find_templates(names, partial_theme);
    found.retain(|slot, path| {
        let keep = path_in_theme(path, partial_theme);
        if !keep {
            debug!(
                ?slot,
                path = %path.display(),
                theme = partial_theme,
                "discarding fallback match outside the scoped theme"
            );
        }
        keep
    });

    if found.is_empty() {
        None
    } else {
        Some(found)
    }
}

/// A path belongs to a theme when one of its directory components is the
/// theme name. Checked structurally rather than by substring so a theme
/// named `min` does not claim paths under `minimal/`.
fn path_in_theme(path: &Path, theme: &str) -> bool {
    let wanted = OsStr::new(theme);
    let mut components: Vec<_> = path.components().collect();
    // The final component is the file itself, not a directory.
    components.pop();
    components
        .iter()
        .any(|component| component.as_os_str() == wanted)
}
