use serde::Serialize;

use crate::model::section::Section;
use crate::model::task::{DeletedTask, Task};
use crate::ops::task_ops::TaskStats;
use crate::view::DateGroup;
use crate::view::board::BoardColumns;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct StatsJson {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub drafts: usize,
    pub deleted: usize,
}

#[derive(Serialize)]
pub struct GroupJson<'a> {
    pub date: &'a str,
    pub tasks: &'a [Task],
}

#[derive(Serialize)]
pub struct BoardJson<'a> {
    pub drafts: &'a [Task],
    pub pending: &'a [Task],
    pub completed: &'a [Task],
}

pub fn stats_json(stats: &TaskStats, deleted: usize) -> StatsJson {
    StatsJson {
        total: stats.total,
        completed: stats.completed,
        pending: stats.pending,
        drafts: stats.drafts,
        deleted,
    }
}

pub fn groups_json(groups: &[DateGroup]) -> Vec<GroupJson<'_>> {
    groups
        .iter()
        .map(|g| GroupJson {
            date: &g.date,
            tasks: &g.tasks,
        })
        .collect()
}

pub fn board_json(columns: &BoardColumns) -> BoardJson<'_> {
    BoardJson {
        drafts: &columns.drafts,
        pending: &columns.pending,
        completed: &columns.completed,
    }
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// One task line: checkbox, id, title, then the optional decorations.
pub fn task_line(task: &Task) -> String {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    let mut line = format!("{} {}  {}", checkbox, task.id, task.title);
    if task.is_draft {
        line.push_str("  (draft)");
    }
    if let Some(due) = &task.due_date {
        line.push_str(&format!("  due:{}", due));
    }
    if !task.priority.is_empty() {
        line.push_str(&format!("  !{}", task.priority));
    }
    for label in &task.labels {
        line.push(' ');
        line.push_str(label);
    }
    line
}

/// Print a task and its subtree, indented two spaces per level.
pub fn print_task_tree(task: &Task, depth: usize) {
    println!("{}{}", "  ".repeat(depth), task_line(task));
    for sub in &task.subtasks {
        print_task_tree(sub, depth + 1);
    }
}

pub fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("(no tasks)");
        return;
    }
    for task in tasks {
        print_task_tree(task, 0);
    }
}

pub fn print_groups(groups: &[DateGroup]) {
    if groups.is_empty() {
        println!("(no tasks)");
        return;
    }
    for group in groups {
        println!("{}", group.date);
        for task in &group.tasks {
            print_task_tree(task, 1);
        }
    }
}

pub fn print_board(columns: &BoardColumns) {
    for (title, tasks) in [
        ("Drafts", &columns.drafts),
        ("Pending", &columns.pending),
        ("Completed", &columns.completed),
    ] {
        println!("{} ({})", title, tasks.len());
        for task in tasks {
            println!("  {}", task_line(task));
        }
    }
}

pub fn print_trash(trash: &[DeletedTask]) {
    if trash.is_empty() {
        println!("(trash is empty)");
        return;
    }
    for entry in trash {
        println!("{}  deleted:{}", task_line(&entry.task), entry.deleted_at);
    }
}

pub fn print_sections(sections: &[Section]) {
    for section in sections {
        let marker = if section.is_expanded { "v" } else { ">" };
        let default = if section.is_default { " (default)" } else { "" };
        println!("{} {}  {}{}", marker, section.id, section.name, default);
    }
}
