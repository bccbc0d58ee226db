use chrono::{DateTime, Duration, Utc};

use crate::model::task::{DeletedTask, Task};
use crate::ops::task_ops::remove_task;

/// Soft-delete the task with `id`: detach it from the live forest and append
/// it to the trash with a deletion timestamp. Returns the new forest, the
/// new trash, and whether the task was found.
pub fn delete_task(
    tasks: &[Task],
    trash: &[DeletedTask],
    id: &str,
    now: DateTime<Utc>,
) -> (Vec<Task>, Vec<DeletedTask>, bool) {
    let (remaining, removed) = remove_task(tasks, id);
    match removed {
        Some(task) => {
            let mut trash = trash.to_vec();
            trash.push(DeletedTask {
                task,
                deleted_at: now.to_rfc3339(),
            });
            (remaining, trash, true)
        }
        None => (tasks.to_vec(), trash.to_vec(), false),
    }
}

/// Restore a trashed task to the end of the live top-level list, stripping
/// its deletion timestamp.
pub fn restore_task(
    tasks: &[Task],
    trash: &[DeletedTask],
    id: &str,
) -> (Vec<Task>, Vec<DeletedTask>, bool) {
    restore_with(tasks, trash, id, |task| task)
}

/// Restore a trashed task as a draft.
pub fn restore_to_drafts(
    tasks: &[Task],
    trash: &[DeletedTask],
    id: &str,
) -> (Vec<Task>, Vec<DeletedTask>, bool) {
    restore_with(tasks, trash, id, |mut task| {
        task.is_draft = true;
        task
    })
}

fn restore_with(
    tasks: &[Task],
    trash: &[DeletedTask],
    id: &str,
    adjust: impl Fn(Task) -> Task,
) -> (Vec<Task>, Vec<DeletedTask>, bool) {
    let Some(entry) = trash.iter().find(|d| d.task.id == id) else {
        return (tasks.to_vec(), trash.to_vec(), false);
    };
    let mut tasks = tasks.to_vec();
    tasks.push(adjust(entry.task.clone()));
    let trash = trash.iter().filter(|d| d.task.id != id).cloned().collect();
    (tasks, trash, true)
}

/// Drop trash entries deleted more than `retention_days` ago. Entries whose
/// timestamp does not parse are kept. Returns the surviving trash and the
/// number purged. Runs only from the explicit `clean` command.
pub fn purge_expired(
    trash: &[DeletedTask],
    now: DateTime<Utc>,
    retention_days: i64,
) -> (Vec<DeletedTask>, usize) {
    let cutoff = now - Duration::days(retention_days);
    let kept: Vec<DeletedTask> = trash
        .iter()
        .filter(|d| match DateTime::parse_from_rfc3339(&d.deleted_at) {
            Ok(deleted_at) => deleted_at.with_timezone(&Utc) >= cutoff,
            Err(_) => true,
        })
        .cloned()
        .collect();
    let purged = trash.len() - kept.len();
    (kept, purged)
}
