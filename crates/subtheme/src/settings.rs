//! Descriptors for the theme settings UI.
//!
//! The host CMS owns form generation; this module only produces the data
//! the two theme dropdowns are built from, once, when the settings UI is
//! constructed. The descriptors are serializable so hosts can ship them to
//! an admin frontend as-is.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::ThemeCatalog;
use crate::resolve::ResolvedTheme;

/// Stored field name for the full-theme selection.
pub const APPLIED_THEME_FIELD: &str = "AppliedTheme";

/// Stored field name for the partial-theme selection.
pub const PARTIAL_THEME_FIELD: &str = "PartialTheme";

/// A selectable dropdown in the settings UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownField {
    /// Stored field name.
    pub name: String,
    /// Human-readable field title.
    pub title: String,
    /// Choices, keyed by stored value, mapping to display labels.
    pub options: BTreeMap<String, String>,
    /// Status text shown next to the field.
    pub hint: String,
}

/// Builds the applied-theme and partial-theme dropdown descriptors.
///
/// The hints reflect the node's currently effective themes so editors see
/// what inheritance produces before they change anything. A node with both
/// fields in effect gets no special treatment here beyond the standing
/// reminder in the partial-theme hint.
pub fn settings_fields(catalog: &ThemeCatalog, resolved: &ResolvedTheme) -> Vec<DropdownField> {
    let applied_hint = match &resolved.theme {
        Some(theme) => format!("Current effective theme: {theme}"),
        None => "Using default site theme".to_string(),
    };
    let partial_hint = match &resolved.partial {
        Some(theme) => format!("Current effective partial theme: {theme}"),
        None => {
            "Please only use a specific applied theme OR a partial theme, not both!".to_string()
        }
    };

    vec![
        DropdownField {
            name: APPLIED_THEME_FIELD.to_string(),
            title: "Applied Theme".to_string(),
            options: catalog.full.clone(),
            hint: applied_hint,
        },
        DropdownField {
            name: PARTIAL_THEME_FIELD.to_string(),
            title: "Partial Theme".to_string(),
            options: catalog.partial.clone(),
            hint: partial_hint,
        },
    ]
}
