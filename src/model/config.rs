use serde::{Deserialize, Serialize};

/// Configuration from kario/config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub project: ProjectInfo,
    #[serde(default)]
    pub trash: TrashConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[serde(default = "default_project_name")]
    pub name: String,
    /// Name given to the default section in a fresh store.
    #[serde(default = "default_section_name")]
    pub default_section_name: String,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        ProjectInfo {
            name: default_project_name(),
            default_section_name: default_section_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrashConfig {
    /// How long deleted tasks are kept before `ka clean` may purge them.
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
}

impl Default for TrashConfig {
    fn default() -> Self {
        TrashConfig {
            retention_days: default_retention_days(),
        }
    }
}

fn default_project_name() -> String {
    "Tasks".to_string()
}

fn default_section_name() -> String {
    "Tasks".to_string()
}

fn default_retention_days() -> i64 {
    7
}
