use serde::{Deserialize, Serialize};

/// A task, also used recursively as a subtask.
///
/// Serialized field names are camelCase to stay compatible with the JSON
/// blobs written by earlier versions of the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique identifier, assigned at creation and never reused.
    pub id: String,
    /// Display title. Non-empty; enforced at the creation/edit boundary
    /// and again by the engine.
    pub title: String,
    pub completed: bool,
    /// `DD/MM/YYYY` string captured at creation; display and grouping only.
    pub creation_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Built-in level (`Priority 1`..`Priority 6`) or a custom priority name.
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<String>,
    /// Labels. Order is not significant and duplicates are not deduplicated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<String>,
    /// Drafts are excluded from the total/pending/completed views.
    #[serde(default)]
    pub is_draft: bool,
    /// Subtasks (recursive, unbounded depth).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Task>,
    /// Owning section. Meaningful on top-level tasks.
    #[serde(default)]
    pub section_id: String,
}

impl Task {
    /// Create a bare task with the given identity fields; everything else empty.
    pub fn new(id: String, title: String, creation_date: String, section_id: String) -> Self {
        Task {
            id,
            title,
            completed: false,
            creation_date,
            due_date: None,
            time: None,
            priority: String::new(),
            description: String::new(),
            reminder: None,
            labels: Vec::new(),
            repeat: None,
            is_draft: false,
            subtasks: Vec::new(),
            section_id,
        }
    }
}

/// A soft-deleted task. Lives in the trash list, outside the live forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedTask {
    #[serde(flatten)]
    pub task: Task,
    /// RFC 3339 timestamp of the deletion.
    pub deleted_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_camel_case_keys() {
        let mut task = Task::new(
            "1700000000000".into(),
            "Write report".into(),
            "14/05/2025".into(),
            "default-section".into(),
        );
        task.due_date = Some("20/05/2025".into());
        task.is_draft = true;

        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"creationDate\":\"14/05/2025\""));
        assert!(json.contains("\"dueDate\":\"20/05/2025\""));
        assert!(json.contains("\"isDraft\":true"));
        assert!(json.contains("\"sectionId\":\"default-section\""));
    }

    #[test]
    fn deserializes_minimal_legacy_object() {
        // Blobs written before drafts and sections existed carry only the
        // original four fields.
        let task: Task = serde_json::from_str(
            r#"{"id":"1","title":"old","completed":false,"creationDate":"01/01/2024"}"#,
        )
        .unwrap();
        assert_eq!(task.id, "1");
        assert!(!task.is_draft);
        assert!(task.subtasks.is_empty());
        assert_eq!(task.section_id, "");
    }

    #[test]
    fn deleted_task_flattens_into_one_object() {
        let task = Task::new("9".into(), "gone".into(), "01/01/2024".into(), "s".into());
        let deleted = DeletedTask {
            task,
            deleted_at: "2024-01-02T00:00:00Z".into(),
        };
        let json = serde_json::to_string(&deleted).unwrap();
        assert!(json.contains("\"id\":\"9\""));
        assert!(json.contains("\"deletedAt\":\"2024-01-02T00:00:00Z\""));

        let back: DeletedTask = serde_json::from_str(&json).unwrap();
        assert_eq!(back.task.id, "9");
    }
}
