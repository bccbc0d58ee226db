use serde::{Deserialize, Serialize};

/// The id of the built-in section every store starts with.
pub const DEFAULT_SECTION_ID: &str = "default-section";

/// A section grouping top-level tasks. Exactly one section is the default;
/// it cannot be deleted or renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
    /// Expanded/collapsed state, persisted as part of the section.
    pub is_expanded: bool,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    #[serde(default)]
    pub is_default: bool,
}

impl Section {
    pub fn new(id: String, name: String, created_at: String) -> Self {
        Section {
            id,
            name,
            icon: None,
            icon_color: None,
            is_expanded: true,
            created_at,
            is_default: false,
        }
    }

    /// The default section seeded into a fresh store.
    pub fn default_section(name: &str, created_at: String) -> Self {
        Section {
            id: DEFAULT_SECTION_ID.to_string(),
            name: name.to_string(),
            icon: None,
            icon_color: None,
            is_expanded: true,
            created_at,
            is_default: true,
        }
    }
}
