//! Classification of configured theme names into full and partial themes.
//!
//! A *full* theme ships a complete template set, identified by the presence
//! of the canonical master page template ([`MASTER_TEMPLATE`]) in its
//! `templates/` directory. A *partial* theme ships only override templates
//! and is layered on top of whichever full theme is in effect.
//!
//! [`ThemeCatalog::classify`] partitions the site's configured theme names
//! into the two choice sets the settings UI offers. It is pure over the
//! state [`ThemeSource`] exposes and runs when the settings UI is built,
//! not per render.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::locate::TEMPLATE_EXTENSIONS;
use crate::resolve::PARTIAL_NONE;

/// Base name of the canonical master page template that marks a full theme.
pub const MASTER_TEMPLATE: &str = "Page";

/// Human-readable label for the `"none"` partial-theme choice.
pub const PARTIAL_NONE_LABEL: &str = "(none)";

/// Answers "does this theme ship a master page template?".
///
/// Queries are synchronous, idempotent reads; retries (if any) belong to
/// the implementation, not to the catalog.
pub trait ThemeSource {
    /// Returns true if the named theme contains the canonical master
    /// template and therefore counts as a full theme.
    fn has_master_template(&self, theme: &str) -> bool;
}

/// [`ThemeSource`] over a `themes/`-style directory on disk.
///
/// A theme named `main` counts as full when
/// `<root>/main/templates/Page.<ext>` exists for any recognized template
/// extension (see [`TEMPLATE_EXTENSIONS`]).
#[derive(Debug, Clone)]
pub struct FsThemeSource {
    root: PathBuf,
}

impl FsThemeSource {
    /// Creates a source rooted at the directory holding the theme folders.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ThemeSource for FsThemeSource {
    fn has_master_template(&self, theme: &str) -> bool {
        let templates = self.root.join(theme).join("templates");
        TEMPLATE_EXTENSIONS
            .iter()
            .any(|ext| templates.join(format!("{MASTER_TEMPLATE}{ext}")).is_file())
    }
}

/// The two theme choice sets, keyed by stored value, mapping to labels.
///
/// Both maps carry a synthetic `"" => ""` entry meaning "no selection"; the
/// partial map additionally carries `"none" => "(none)"`, the explicit
/// inheritance stop (see [`PARTIAL_NONE`]). Every configured theme name
/// lands in exactly one of the two maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeCatalog {
    /// Themes with a master page template.
    pub full: BTreeMap<String, String>,
    /// Themes without one; override-only.
    pub partial: BTreeMap<String, String>,
}

impl ThemeCatalog {
    /// Partitions `names` into full and partial themes via `source`.
    ///
    /// An empty input yields the two seeded-only maps; there are no error
    /// conditions.
    pub fn classify<I, S>(names: I, source: &dyn ThemeSource) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut full = BTreeMap::from([(String::new(), String::new())]);
        let mut partial = BTreeMap::from([
            (String::new(), String::new()),
            (PARTIAL_NONE.to_string(), PARTIAL_NONE_LABEL.to_string()),
        ]);

        for name in names {
            let name = name.into();
            if source.has_master_template(&name) {
                full.insert(name.clone(), name);
            } else {
                partial.insert(name.clone(), name);
            }
        }

        Self { full, partial }
    }

    /// Returns true if `name` classified as a full theme.
    pub fn is_full(&self, name: &str) -> bool {
        !name.is_empty() && self.full.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;

    /// Stub source: full themes are exactly the listed names.
    struct FixedSource(BTreeSet<String>);

    impl FixedSource {
        fn new(full: &[&str]) -> Self {
            Self(full.iter().map(|s| s.to_string()).collect())
        }
    }

    impl ThemeSource for FixedSource {
        fn has_master_template(&self, theme: &str) -> bool {
            self.0.contains(theme)
        }
    }

    // =========================================================================
    // Classification
    // =========================================================================

    #[test]
    fn test_classify_partitions_by_master_template() {
        let source = FixedSource::new(&["main"]);
        let catalog = ThemeCatalog::classify(["main", "minimal"], &source);

        let expected_full =
            BTreeMap::from([(String::new(), String::new()), ("main".into(), "main".into())]);
        let expected_partial = BTreeMap::from([
            (String::new(), String::new()),
            ("none".to_string(), "(none)".to_string()),
            ("minimal".to_string(), "minimal".to_string()),
        ]);

        assert_eq!(catalog.full, expected_full);
        assert_eq!(catalog.partial, expected_partial);
    }

    #[test]
    fn test_classify_union_of_keys_equals_input() {
        let source = FixedSource::new(&["a", "c"]);
        let input = ["a", "b", "c", "d"];
        let catalog = ThemeCatalog::classify(input, &source);

        let mut keys: BTreeSet<&str> = catalog
            .full
            .keys()
            .chain(catalog.partial.keys())
            .map(String::as_str)
            .filter(|k| !k.is_empty() && *k != PARTIAL_NONE)
            .collect();
        let input_set: BTreeSet<&str> = input.iter().copied().collect();

        assert_eq!(keys, input_set);
        // Each name lands in exactly one map.
        keys.retain(|k| catalog.full.contains_key(*k) && catalog.partial.contains_key(*k));
        assert!(keys.is_empty());
    }

    #[test]
    fn test_empty_catalog_keeps_seed_entries() {
        let source = FixedSource::new(&[]);
        let catalog = ThemeCatalog::classify(Vec::<String>::new(), &source);

        assert_eq!(catalog.full.len(), 1);
        assert_eq!(catalog.partial.len(), 2);
        assert_eq!(catalog.partial.get(PARTIAL_NONE).unwrap(), "(none)");
    }

    #[test]
    fn test_is_full_ignores_seed_entry() {
        let source = FixedSource::new(&["main"]);
        let catalog = ThemeCatalog::classify(["main"], &source);

        assert!(catalog.is_full("main"));
        assert!(!catalog.is_full(""));
        assert!(!catalog.is_full("minimal"));
    }

    // =========================================================================
    // Filesystem source
    // =========================================================================

    #[test]
    fn test_fs_source_detects_master_template() {
        let dir = tempfile::tempdir().unwrap();
        let main = dir.path().join("main/templates");
        let minimal = dir.path().join("minimal/templates/Layout");
        fs::create_dir_all(&main).unwrap();
        fs::create_dir_all(&minimal).unwrap();
        fs::write(main.join("Page.jinja"), "{% block content %}{% endblock %}").unwrap();
        fs::write(minimal.join("Page.jinja"), "override").unwrap();

        let source = FsThemeSource::new(dir.path());
        assert!(source.has_master_template("main"));
        // A Layout-only override does not make the theme full.
        assert!(!source.has_master_template("minimal"));
        assert!(!source.has_master_template("missing"));
    }

    #[test]
    fn test_fs_source_accepts_any_recognized_extension() {
        let dir = tempfile::tempdir().unwrap();
        let templates = dir.path().join("legacy/templates");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("Page.txt"), "plain master").unwrap();

        let source = FsThemeSource::new(dir.path());
        assert!(source.has_master_template("legacy"));
    }
}
