use crate::model::task::Task;

/// The three kanban columns derived from the top-level task list.
#[derive(Debug, Clone, Default)]
pub struct BoardColumns {
    pub drafts: Vec<Task>,
    pub pending: Vec<Task>,
    pub completed: Vec<Task>,
}

/// Partition tasks into board columns. Drafts go to their own column;
/// everything else splits on completion.
pub fn board_columns(tasks: &[Task]) -> BoardColumns {
    let mut columns = BoardColumns::default();
    for task in tasks {
        if task.is_draft {
            columns.drafts.push(task.clone());
        } else if task.completed {
            columns.completed.push(task.clone());
        } else {
            columns.pending.push(task.clone());
        }
    }
    columns
}
