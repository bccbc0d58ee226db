use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::config::AppConfig;
use crate::model::section::{DEFAULT_SECTION_ID, Section};
use crate::model::settings::{
    CustomLabel, CustomPriority, FilterSettings, FilterValues, SortSettings,
};
use crate::model::task::{DeletedTask, Task};

/// Blob file names inside the kario/ directory. One independent JSON blob
/// per concern, mirroring the local-storage keys of the original app.
pub const TASKS_BLOB: &str = "tasks.json";
pub const TRASH_BLOB: &str = "deleted-tasks.json";
pub const SECTIONS_BLOB: &str = "sections.json";
pub const FILTER_SETTINGS_BLOB: &str = "filter-settings.json";
pub const SORT_SETTINGS_BLOB: &str = "sort-settings.json";
pub const FILTER_VALUES_BLOB: &str = "filter-values.json";
pub const CUSTOM_PRIORITIES_BLOB: &str = "custom-priorities.json";
pub const CUSTOM_LABELS_BLOB: &str = "custom-labels.json";

pub const CONFIG_FILE: &str = "config.toml";
pub const STORE_DIR: &str = "kario";

/// Error type for store I/O operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not a kario store: no kario/ directory found")]
    NotAStore,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not serialize {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The loaded store: every persisted blob plus where it came from.
///
/// Mutations follow a read-modify-write cycle: load, compute a new list
/// with the ops functions, assign it here, save the touched blob. Single
/// writer; whoever writes last wins.
#[derive(Debug)]
pub struct Store {
    pub root: PathBuf,
    pub dir: PathBuf,
    pub config: AppConfig,
    pub tasks: Vec<Task>,
    pub trash: Vec<DeletedTask>,
    pub sections: Vec<Section>,
    pub filter_settings: FilterSettings,
    pub sort_settings: SortSettings,
    pub filter_values: FilterValues,
    pub custom_priorities: Vec<CustomPriority>,
    pub custom_labels: Vec<CustomLabel>,
}

/// Discover the store by walking up from the given directory, looking for a
/// `kario/` subdirectory with a config.toml.
pub fn discover_store(start: &Path) -> Result<PathBuf, StoreError> {
    let mut current = start.to_path_buf();
    loop {
        let dir = current.join(STORE_DIR);
        if dir.is_dir() && dir.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(StoreError::NotAStore);
        }
    }
}

/// Load the complete store from the given root directory.
///
/// A missing blob yields its default state; a malformed blob is fatal only
/// to that blob's load and also falls back to the default (with a warning).
/// Legacy tasks without a section and an empty section list are migrated
/// and written back immediately.
pub fn load_store(root: &Path) -> Result<Store, StoreError> {
    let dir = root.join(STORE_DIR);
    if !dir.is_dir() {
        return Err(StoreError::NotAStore);
    }

    let config_path = dir.join(CONFIG_FILE);
    let config_text = fs::read_to_string(&config_path).map_err(|e| StoreError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: AppConfig = toml::from_str(&config_text)?;

    let mut store = Store {
        root: root.to_path_buf(),
        dir: dir.clone(),
        config,
        tasks: read_blob(&dir, TASKS_BLOB),
        trash: read_blob(&dir, TRASH_BLOB),
        sections: read_blob(&dir, SECTIONS_BLOB),
        filter_settings: read_blob(&dir, FILTER_SETTINGS_BLOB),
        sort_settings: read_blob(&dir, SORT_SETTINGS_BLOB),
        filter_values: read_blob(&dir, FILTER_VALUES_BLOB),
        custom_priorities: read_blob(&dir, CUSTOM_PRIORITIES_BLOB),
        custom_labels: read_blob(&dir, CUSTOM_LABELS_BLOB),
    };

    // Seed the default section on first load.
    if store.sections.is_empty() {
        store.sections = vec![Section::default_section(
            &store.config.project.default_section_name,
            chrono::Utc::now().to_rfc3339(),
        )];
        save_sections(&store)?;
    }

    // Migrate tasks persisted before sections existed.
    let mut migrated = false;
    for task in &mut store.tasks {
        if task.section_id.is_empty() {
            task.section_id = DEFAULT_SECTION_ID.to_string();
            migrated = true;
        }
    }
    if migrated {
        save_tasks(&store)?;
    }

    Ok(store)
}

fn read_blob<T: DeserializeOwned + Default>(dir: &Path, name: &str) -> T {
    let path = dir.join(name);
    let Ok(content) = fs::read_to_string(&path) else {
        return T::default();
    };
    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            eprintln!(
                "warning: {} is corrupted ({}), starting from defaults",
                path.display(),
                e
            );
            T::default()
        }
    }
}

/// Write a blob atomically: serialize to a temp file in the same directory,
/// then rename over the target.
fn write_blob<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(value)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(dir.join(name)).map_err(|e| e.error)?;
    Ok(())
}

pub fn save_tasks(store: &Store) -> Result<(), StoreError> {
    write_blob(&store.dir, TASKS_BLOB, &store.tasks)
}

pub fn save_trash(store: &Store) -> Result<(), StoreError> {
    write_blob(&store.dir, TRASH_BLOB, &store.trash)
}

pub fn save_sections(store: &Store) -> Result<(), StoreError> {
    write_blob(&store.dir, SECTIONS_BLOB, &store.sections)
}

pub fn save_filter_settings(store: &Store) -> Result<(), StoreError> {
    write_blob(&store.dir, FILTER_SETTINGS_BLOB, &store.filter_settings)
}

pub fn save_sort_settings(store: &Store) -> Result<(), StoreError> {
    write_blob(&store.dir, SORT_SETTINGS_BLOB, &store.sort_settings)
}

pub fn save_filter_values(store: &Store) -> Result<(), StoreError> {
    write_blob(&store.dir, FILTER_VALUES_BLOB, &store.filter_values)
}

pub fn save_custom_priorities(store: &Store) -> Result<(), StoreError> {
    write_blob(&store.dir, CUSTOM_PRIORITIES_BLOB, &store.custom_priorities)
}

pub fn save_custom_labels(store: &Store) -> Result<(), StoreError> {
    write_blob(&store.dir, CUSTOM_LABELS_BLOB, &store.custom_labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn init_store(root: &Path) {
        let dir = root.join(STORE_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONFIG_FILE), "[project]\nname = \"Test\"\n").unwrap();
    }

    #[test]
    fn fresh_store_seeds_the_default_section() {
        let tmp = TempDir::new().unwrap();
        init_store(tmp.path());

        let store = load_store(tmp.path()).unwrap();
        assert!(store.tasks.is_empty());
        assert_eq!(store.sections.len(), 1);
        assert!(store.sections[0].is_default);
        assert_eq!(store.sections[0].id, DEFAULT_SECTION_ID);
        // The seeded section was written back.
        assert!(tmp.path().join(STORE_DIR).join(SECTIONS_BLOB).exists());
    }

    #[test]
    fn missing_directory_is_not_a_store() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(load_store(tmp.path()), Err(StoreError::NotAStore)));
    }

    #[test]
    fn discover_walks_up_to_the_store_root() {
        let tmp = TempDir::new().unwrap();
        init_store(tmp.path());
        let nested = tmp.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();
        let found = discover_store(&nested).unwrap();
        assert_eq!(found.canonicalize().unwrap(), tmp.path().canonicalize().unwrap());
    }

    #[test]
    fn corrupted_blob_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        init_store(tmp.path());
        fs::write(tmp.path().join(STORE_DIR).join(TASKS_BLOB), "not json {{{").unwrap();

        let store = load_store(tmp.path()).unwrap();
        assert!(store.tasks.is_empty());
    }

    #[test]
    fn tasks_round_trip_through_save_and_load() {
        let tmp = TempDir::new().unwrap();
        init_store(tmp.path());

        let mut store = load_store(tmp.path()).unwrap();
        let mut task = Task::new(
            "1".into(),
            "persist me".into(),
            "01/06/2025".into(),
            DEFAULT_SECTION_ID.into(),
        );
        task.subtasks.push(Task::new(
            "2".into(),
            "nested".into(),
            "01/06/2025".into(),
            String::new(),
        ));
        store.tasks = vec![task];
        save_tasks(&store).unwrap();

        let reloaded = load_store(tmp.path()).unwrap();
        assert_eq!(reloaded.tasks.len(), 1);
        assert_eq!(reloaded.tasks[0].subtasks[0].id, "2");
    }

    #[test]
    fn sectionless_tasks_are_migrated_to_the_default_section() {
        let tmp = TempDir::new().unwrap();
        init_store(tmp.path());
        fs::write(
            tmp.path().join(STORE_DIR).join(TASKS_BLOB),
            r#"[{"id":"1","title":"legacy","completed":false,"creationDate":"01/01/2024"}]"#,
        )
        .unwrap();

        let store = load_store(tmp.path()).unwrap();
        assert_eq!(store.tasks[0].section_id, DEFAULT_SECTION_ID);

        // The migration persisted.
        let raw =
            fs::read_to_string(tmp.path().join(STORE_DIR).join(TASKS_BLOB)).unwrap();
        assert!(raw.contains(DEFAULT_SECTION_ID));
    }

    #[test]
    fn settings_blobs_round_trip() {
        let tmp = TempDir::new().unwrap();
        init_store(tmp.path());

        let mut store = load_store(tmp.path()).unwrap();
        store.filter_settings.date = true;
        store.filter_values.date = "Today".into();
        store.sort_settings.completion_status = true;
        save_filter_settings(&store).unwrap();
        save_filter_values(&store).unwrap();
        save_sort_settings(&store).unwrap();

        let reloaded = load_store(tmp.path()).unwrap();
        assert!(reloaded.filter_settings.date);
        assert_eq!(reloaded.filter_values.date, "Today");
        assert!(reloaded.sort_settings.completion_status);
    }
}
