use crate::model::task::Task;
use crate::util::date::today_string;
use crate::util::id::next_id;

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("task title cannot be empty")]
    EmptyTitle,
    #[error("task not found: {0}")]
    NotFound(String),
}

/// Error type for sibling reordering
#[derive(Debug, thiserror::Error)]
pub enum ReorderError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("moving tasks between different lists is not supported")]
    DifferentParents,
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Create a new top-level task. Rejects blank titles; the UI boundary does
/// too, but the engine must be safe against direct calls.
pub fn create_task(title: &str, section_id: &str, draft: bool) -> Result<Task, TaskError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    let mut task = Task::new(
        next_id(),
        title.to_string(),
        today_string(),
        section_id.to_string(),
    );
    task.is_draft = draft;
    Ok(task)
}

/// Attach a subtask to the task with `parent_id`, anywhere in the forest.
/// Returns the new forest and whether the parent was found.
pub fn add_subtask(tasks: &[Task], parent_id: &str, subtask: Task) -> (Vec<Task>, bool) {
    update_task(tasks, parent_id, |parent| {
        let mut updated = parent.clone();
        updated.subtasks.push(subtask.clone());
        updated
    })
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Find a task by id anywhere in the forest, including nested subtasks.
/// Pre-order depth-first; with duplicate ids the first one encountered wins.
pub fn find_task<'a>(tasks: &'a [Task], id: &str) -> Option<&'a Task> {
    for task in tasks {
        if task.id == id {
            return Some(task);
        }
        if let Some(found) = find_task(&task.subtasks, id) {
            return Some(found);
        }
    }
    None
}

/// The parent of a task: `Some(None)` for a top-level task, `Some(Some(id))`
/// for a subtask, `None` when the id is absent.
pub fn parent_of<'a>(tasks: &'a [Task], id: &str) -> Option<Option<&'a str>> {
    for task in tasks {
        if task.id == id {
            return Some(None);
        }
        if let Some(parent) = parent_in(task, id) {
            return Some(Some(parent));
        }
    }
    None
}

fn parent_in<'a>(task: &'a Task, id: &str) -> Option<&'a str> {
    for sub in &task.subtasks {
        if sub.id == id {
            return Some(task.id.as_str());
        }
        if let Some(parent) = parent_in(sub, id) {
            return Some(parent);
        }
    }
    None
}

/// Iterate over every task in the forest, pre-order.
pub fn for_each_task(tasks: &[Task], f: &mut dyn FnMut(&Task)) {
    for task in tasks {
        f(task);
        for_each_task(&task.subtasks, f);
    }
}

// ---------------------------------------------------------------------------
// Mutation (copy-on-write; the input forest is never touched)
// ---------------------------------------------------------------------------

/// Replace the task with `id` by `update_fn(task)`, recreating the ancestors
/// on the path to it. Returns the new forest and whether the id was found;
/// callers that ignore a `false` get the silent no-op the UI relies on.
pub fn update_task<F>(tasks: &[Task], id: &str, update_fn: F) -> (Vec<Task>, bool)
where
    F: Fn(&Task) -> Task,
{
    update_task_inner(tasks, id, &update_fn)
}

fn update_task_inner(
    tasks: &[Task],
    id: &str,
    update_fn: &dyn Fn(&Task) -> Task,
) -> (Vec<Task>, bool) {
    let mut found = false;
    let updated = tasks
        .iter()
        .map(|task| {
            if !found && task.id == id {
                found = true;
                return update_fn(task);
            }
            if !found && !task.subtasks.is_empty() {
                let (subtasks, hit) = update_task_inner(&task.subtasks, id, update_fn);
                if hit {
                    found = true;
                    let mut updated = task.clone();
                    updated.subtasks = subtasks;
                    return updated;
                }
            }
            task.clone()
        })
        .collect();
    (updated, found)
}

/// Flip `completed` on the target task and cascade the new value down to
/// every descendant unconditionally. Parents and siblings are untouched;
/// this is a cascade-down, never a bubble-up.
pub fn toggle_completion(tasks: &[Task], id: &str) -> Vec<Task> {
    let (updated, _) = update_task(tasks, id, |task| set_completed_deep(task, !task.completed));
    updated
}

fn set_completed_deep(task: &Task, completed: bool) -> Task {
    let mut updated = task.clone();
    updated.completed = completed;
    updated.subtasks = task
        .subtasks
        .iter()
        .map(|sub| set_completed_deep(sub, completed))
        .collect();
    updated
}

/// Detach the task with `id` wherever it lives in the forest, preserving the
/// shape of every untouched branch. Returns the new forest and the detached
/// subtree so the caller can archive it.
pub fn remove_task(tasks: &[Task], id: &str) -> (Vec<Task>, Option<Task>) {
    let mut removed = None;
    let mut remaining = Vec::with_capacity(tasks.len());
    for task in tasks {
        if removed.is_none() && task.id == id {
            removed = Some(task.clone());
            continue;
        }
        let mut kept = task.clone();
        if removed.is_none() && !task.subtasks.is_empty() {
            let (subtasks, hit) = remove_task(&task.subtasks, id);
            if hit.is_some() {
                removed = hit;
                kept.subtasks = subtasks;
            }
        }
        remaining.push(kept);
    }
    (remaining, removed)
}

/// Splice `dragged_id` out of its sibling list and reinsert it at the index
/// `target_id` occupied before the removal. Both tasks must share the given
/// parent (`None` for the top level); a cross-parent move is rejected and
/// leaves the forest unchanged.
pub fn reorder_siblings(
    tasks: &[Task],
    parent_id: Option<&str>,
    dragged_id: &str,
    target_id: &str,
) -> Result<Vec<Task>, ReorderError> {
    let dragged_parent = parent_of(tasks, dragged_id)
        .ok_or_else(|| ReorderError::NotFound(dragged_id.to_string()))?;
    let target_parent =
        parent_of(tasks, target_id).ok_or_else(|| ReorderError::NotFound(target_id.to_string()))?;
    if dragged_parent != parent_id || target_parent != parent_id {
        return Err(ReorderError::DifferentParents);
    }

    match parent_id {
        None => splice(tasks, dragged_id, target_id),
        Some(pid) => {
            let parent =
                find_task(tasks, pid).ok_or_else(|| ReorderError::NotFound(pid.to_string()))?;
            let spliced = splice(&parent.subtasks, dragged_id, target_id)?;
            let (updated, _) = update_task(tasks, pid, |parent| {
                let mut updated = parent.clone();
                updated.subtasks = spliced.clone();
                updated
            });
            Ok(updated)
        }
    }
}

fn splice(list: &[Task], dragged_id: &str, target_id: &str) -> Result<Vec<Task>, ReorderError> {
    let from = list
        .iter()
        .position(|t| t.id == dragged_id)
        .ok_or_else(|| ReorderError::NotFound(dragged_id.to_string()))?;
    // Target index is taken before the removal; inserting before vs. after
    // the target falls out of the index arithmetic.
    let to = list
        .iter()
        .position(|t| t.id == target_id)
        .ok_or_else(|| ReorderError::NotFound(target_id.to_string()))?;
    let mut reordered: Vec<Task> = list.to_vec();
    let dragged = reordered.remove(from);
    reordered.insert(to, dragged);
    Ok(reordered)
}

/// Set or clear the draft flag on a task.
pub fn set_draft(tasks: &[Task], id: &str, draft: bool) -> (Vec<Task>, bool) {
    update_task(tasks, id, |task| {
        let mut updated = task.clone();
        updated.is_draft = draft;
        updated
    })
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Top-level task counts shown in the header and `stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub drafts: usize,
}

/// Counts over the top-level task list only, matching the header tallies.
pub fn task_stats(tasks: &[Task]) -> TaskStats {
    TaskStats {
        total: tasks.iter().filter(|t| !t.is_draft).count(),
        completed: tasks.iter().filter(|t| t.completed && !t.is_draft).count(),
        pending: tasks.iter().filter(|t| !t.completed && !t.is_draft).count(),
        drafts: tasks.iter().filter(|t| t.is_draft).count(),
    }
}
