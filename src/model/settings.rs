use serde::{Deserialize, Serialize};

/// Which of the task views a list is derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Drafts,
    Total,
    Completed,
    Pending,
    Deleted,
}

impl ViewMode {
    pub fn from_name(name: &str) -> Option<ViewMode> {
        match name {
            "drafts" => Some(ViewMode::Drafts),
            "total" => Some(ViewMode::Total),
            "completed" => Some(ViewMode::Completed),
            "pending" => Some(ViewMode::Pending),
            "deleted" => Some(ViewMode::Deleted),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Drafts => "drafts",
            ViewMode::Total => "total",
            ViewMode::Completed => "completed",
            ViewMode::Pending => "pending",
            ViewMode::Deleted => "deleted",
        }
    }
}

/// Which filter categories are active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSettings {
    pub date: bool,
    pub priority: bool,
    pub label: bool,
}

/// Which sort keys are active. `pages` and `chats` are carried for blob
/// compatibility; task views only consult the first two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortSettings {
    pub completion_status: bool,
    pub creation_date: bool,
    pub pages: bool,
    pub chats: bool,
}

impl Default for SortSettings {
    fn default() -> Self {
        SortSettings {
            completion_status: false,
            creation_date: true,
            pages: false,
            chats: false,
        }
    }
}

/// The selected values for each filter category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterValues {
    /// A date preset name (`Today`, `This week`, ...) or empty/`All` for none.
    pub date: String,
    pub priorities: Vec<String>,
    pub labels: Vec<String>,
}

/// A user-defined priority with a display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPriority {
    pub name: String,
    pub color: String,
}

/// A user-defined label with a display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLabel {
    pub name: String,
    pub color: String,
}
