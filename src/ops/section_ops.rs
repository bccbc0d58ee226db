use chrono::{DateTime, Utc};

use crate::model::section::Section;
use crate::model::task::{DeletedTask, Task};
use crate::util::id::next_section_id;

/// Error type for section operations
#[derive(Debug, thiserror::Error)]
pub enum SectionError {
    #[error("section not found: {0}")]
    NotFound(String),
    #[error("section name cannot be empty")]
    EmptyName,
    #[error("the default section cannot be renamed")]
    RenameDefault,
    #[error("the default section cannot be deleted")]
    DeleteDefault,
}

/// Append a new section. Returns the new list and the assigned id.
pub fn add_section(
    sections: &[Section],
    name: &str,
    now: DateTime<Utc>,
) -> Result<(Vec<Section>, String), SectionError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SectionError::EmptyName);
    }
    let id = next_section_id();
    let mut sections = sections.to_vec();
    sections.push(Section::new(id.clone(), name.to_string(), now.to_rfc3339()));
    Ok((sections, id))
}

pub fn rename_section(
    sections: &[Section],
    id: &str,
    name: &str,
) -> Result<Vec<Section>, SectionError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SectionError::EmptyName);
    }
    let section = sections
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| SectionError::NotFound(id.to_string()))?;
    if section.is_default {
        return Err(SectionError::RenameDefault);
    }
    Ok(sections
        .iter()
        .map(|s| {
            if s.id == id {
                let mut updated = s.clone();
                updated.name = name.to_string();
                updated
            } else {
                s.clone()
            }
        })
        .collect())
}

/// Flip the persisted expanded/collapsed state.
pub fn toggle_expanded(sections: &[Section], id: &str) -> (Vec<Section>, bool) {
    let mut found = false;
    let updated = sections
        .iter()
        .map(|s| {
            if s.id == id {
                found = true;
                let mut updated = s.clone();
                updated.is_expanded = !s.is_expanded;
                updated
            } else {
                s.clone()
            }
        })
        .collect();
    (updated, found)
}

pub fn set_icon(
    sections: &[Section],
    id: &str,
    icon: &str,
    color: &str,
) -> Result<Vec<Section>, SectionError> {
    if !sections.iter().any(|s| s.id == id) {
        return Err(SectionError::NotFound(id.to_string()));
    }
    Ok(sections
        .iter()
        .map(|s| {
            if s.id == id {
                let mut updated = s.clone();
                updated.icon = Some(icon.to_string());
                updated.icon_color = Some(color.to_string());
                updated
            } else {
                s.clone()
            }
        })
        .collect())
}

/// The result of deleting a section: the surviving sections, the surviving
/// live forest, and the trash with the section's tasks appended.
#[derive(Debug)]
pub struct SectionDeletion {
    pub sections: Vec<Section>,
    pub tasks: Vec<Task>,
    pub trash: Vec<DeletedTask>,
    /// How many top-level tasks were moved to the trash.
    pub tasks_deleted: usize,
}

/// Delete a non-default section. Its top-level tasks (with their subtrees)
/// are soft-deleted into the trash rather than dropped outright.
pub fn delete_section(
    sections: &[Section],
    tasks: &[Task],
    trash: &[DeletedTask],
    id: &str,
    now: DateTime<Utc>,
) -> Result<SectionDeletion, SectionError> {
    let section = sections
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| SectionError::NotFound(id.to_string()))?;
    if section.is_default {
        return Err(SectionError::DeleteDefault);
    }

    let (orphaned, remaining): (Vec<Task>, Vec<Task>) =
        tasks.iter().cloned().partition(|t| t.section_id == id);
    let tasks_deleted = orphaned.len();
    let deleted_at = now.to_rfc3339();
    let mut trash = trash.to_vec();
    trash.extend(orphaned.into_iter().map(|task| DeletedTask {
        task,
        deleted_at: deleted_at.clone(),
    }));

    Ok(SectionDeletion {
        sections: sections.iter().filter(|s| s.id != id).cloned().collect(),
        tasks: remaining,
        trash,
        tasks_deleted,
    })
}

/// The top-level tasks owned by a section, in stored order.
pub fn section_tasks<'a>(tasks: &'a [Task], section_id: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.section_id == section_id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::section::DEFAULT_SECTION_ID;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 18, 12, 0, 0).unwrap()
    }

    fn base_sections() -> Vec<Section> {
        vec![
            Section::default_section("Tasks", now().to_rfc3339()),
            Section::new("section-2".into(), "Work".into(), now().to_rfc3339()),
        ]
    }

    fn task_in(id: &str, section_id: &str) -> Task {
        Task::new(id.into(), id.into(), "01/06/2025".into(), section_id.into())
    }

    #[test]
    fn add_rejects_empty_names() {
        assert!(matches!(
            add_section(&base_sections(), "  ", now()),
            Err(SectionError::EmptyName)
        ));
    }

    #[test]
    fn add_appends_with_generated_id() {
        let (sections, id) = add_section(&base_sections(), "Errands", now()).unwrap();
        assert_eq!(sections.len(), 3);
        assert!(id.starts_with("section-"));
        assert_eq!(sections[2].name, "Errands");
        assert!(!sections[2].is_default);
    }

    #[test]
    fn rename_protects_the_default_section() {
        assert!(matches!(
            rename_section(&base_sections(), DEFAULT_SECTION_ID, "Other"),
            Err(SectionError::RenameDefault)
        ));
        let renamed = rename_section(&base_sections(), "section-2", "Office").unwrap();
        assert_eq!(renamed[1].name, "Office");
    }

    #[test]
    fn delete_protects_the_default_section() {
        let tasks = vec![task_in("1", DEFAULT_SECTION_ID)];
        assert!(matches!(
            delete_section(&base_sections(), &tasks, &[], DEFAULT_SECTION_ID, now()),
            Err(SectionError::DeleteDefault)
        ));
    }

    #[test]
    fn delete_soft_deletes_owned_tasks() {
        let tasks = vec![
            task_in("1", DEFAULT_SECTION_ID),
            task_in("2", "section-2"),
            task_in("3", "section-2"),
        ];
        let result = delete_section(&base_sections(), &tasks, &[], "section-2", now()).unwrap();
        assert_eq!(result.sections.len(), 1);
        assert_eq!(result.tasks.len(), 1);
        assert_eq!(result.tasks[0].id, "1");
        assert_eq!(result.tasks_deleted, 2);
        assert_eq!(result.trash.len(), 2);
        assert!(result.trash.iter().all(|d| !d.deleted_at.is_empty()));
    }

    #[test]
    fn toggle_expanded_flips_state() {
        let (sections, found) = toggle_expanded(&base_sections(), "section-2");
        assert!(found);
        assert!(!sections[1].is_expanded);
        let (_, found) = toggle_expanded(&sections, "missing");
        assert!(!found);
    }

    #[test]
    fn section_tasks_filters_roots() {
        let tasks = vec![task_in("1", "a"), task_in("2", "b"), task_in("3", "a")];
        let in_a = section_tasks(&tasks, "a");
        let ids: Vec<&str> = in_a.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }
}
