mod init;
pub use init::cmd_init;

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;

/// Global override for the store directory (set by -C flag)
static STORE_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

use crate::cli::commands::*;
use crate::cli::output;
use crate::io::store::{self, Store, StoreError};
use crate::model::section::{DEFAULT_SECTION_ID, Section};
use crate::model::settings::{CustomLabel, CustomPriority, ViewMode};
use crate::model::task::Task;
use crate::ops::{section_ops, task_ops, trash_ops};
use crate::util::date::DatePreset;
use crate::view;
use crate::view::palette;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    // Store -C override for load_store_cwd()
    if let Some(ref dir) = cli.store_dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        if let Ok(mut guard) = STORE_DIR_OVERRIDE.lock() {
            guard.replace(abs);
        }
    }

    match cli.command {
        // No subcommand: the default list view.
        None => cmd_list(
            ListArgs {
                view: "total".into(),
                section: None,
                group: false,
            },
            json,
        ),
        Some(cmd) => match cmd {
            // Init is handled in main.rs before store discovery
            Commands::Init(args) => cmd_init(args),

            // Read commands
            Commands::List(args) => cmd_list(args, json),
            Commands::Show(args) => cmd_show(args, json),
            Commands::Trash => cmd_trash(json),
            Commands::Board => cmd_board(json),
            Commands::Stats => cmd_stats(json),

            // Write commands
            Commands::Add(args) => cmd_add(args),
            Commands::Sub(args) => cmd_sub(args),
            Commands::Toggle(args) => cmd_toggle(args),
            Commands::Edit(args) => cmd_edit(args),
            Commands::Mv(args) => cmd_mv(args),
            Commands::Delete(args) => cmd_delete(args),
            Commands::Restore(args) => cmd_restore(args),

            // Store-level management
            Commands::Section(args) => cmd_section(args, json),
            Commands::Label(args) => cmd_label(args, json),
            Commands::Priority(args) => cmd_priority(args, json),
            Commands::Filter(args) => cmd_filter(args),
            Commands::Sort(args) => cmd_sort(args),
            Commands::Clean(args) => cmd_clean(args),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_store_cwd() -> Result<Store, StoreError> {
    let start = {
        let guard = STORE_DIR_OVERRIDE
            .lock()
            .map_err(|_| StoreError::NotAStore)?;
        match guard.as_ref() {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(StoreError::IoError)?,
        }
    };
    let root = store::discover_store(&start)?;
    store::load_store(&root)
}

/// Resolve a section by id or name.
fn resolve_section<'a>(sections: &'a [Section], id_or_name: &str) -> Option<&'a Section> {
    sections
        .iter()
        .find(|s| s.id == id_or_name || s.name == id_or_name)
}

fn parse_view(name: &str) -> Result<ViewMode, String> {
    ViewMode::from_name(name)
        .ok_or_else(|| format!("unknown view \"{}\" (drafts, total, completed, pending, deleted)", name))
}

fn parse_on_off(state: &str) -> Result<bool, String> {
    match state {
        "on" => Ok(true),
        "off" => Ok(false),
        other => Err(format!("expected \"on\" or \"off\", got \"{}\"", other)),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store_cwd()?;
    let view = parse_view(&args.view)?;

    let scoped: Vec<Task> = match &args.section {
        Some(wanted) => {
            let section = resolve_section(&store.sections, wanted)
                .ok_or_else(|| format!("section not found: {}", wanted))?;
            section_ops::section_tasks(&store.tasks, &section.id)
                .into_iter()
                .cloned()
                .collect()
        }
        None => store.tasks.clone(),
    };

    let derived = view::derive_view(
        &scoped,
        &store.trash,
        view,
        &store.filter_settings,
        &store.filter_values,
        &store.sort_settings,
    );

    if args.group {
        let groups = view::group_by_creation_date(&derived);
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&output::groups_json(&groups))?
            );
        } else {
            output::print_groups(&groups);
        }
    } else if json {
        println!("{}", serde_json::to_string_pretty(&derived)?);
    } else {
        output::print_task_list(&derived);
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store_cwd()?;
    match task_ops::find_task(&store.tasks, &args.id) {
        Some(task) => {
            if json {
                println!("{}", serde_json::to_string_pretty(task)?);
            } else {
                output::print_task_tree(task, 0);
                if !task.description.is_empty() {
                    println!("  {}", task.description);
                }
            }
        }
        None => println!("task not found: {}", args.id),
    }
    Ok(())
}

fn cmd_trash(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store_cwd()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&store.trash)?);
    } else {
        output::print_trash(&store.trash);
    }
    Ok(())
}

fn cmd_board(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store_cwd()?;
    let columns = view::board::board_columns(&store.tasks);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::board_json(&columns))?
        );
    } else {
        output::print_board(&columns);
    }
    Ok(())
}

fn cmd_stats(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store_cwd()?;
    let stats = task_ops::task_stats(&store.tasks);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::stats_json(&stats, store.trash.len()))?
        );
    } else {
        println!(
            "total: {}  completed: {}  pending: {}  drafts: {}  deleted: {}",
            stats.total,
            stats.completed,
            stats.pending,
            stats.drafts,
            store.trash.len()
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Task write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store_cwd()?;

    let section_id = match &args.section {
        Some(wanted) => resolve_section(&store.sections, wanted)
            .ok_or_else(|| format!("section not found: {}", wanted))?
            .id
            .clone(),
        None => DEFAULT_SECTION_ID.to_string(),
    };

    let mut task = task_ops::create_task(&args.title, &section_id, args.draft)?;
    task.due_date = args.due;
    task.time = args.time;
    task.priority = args.priority.unwrap_or_default();
    task.description = args.description.unwrap_or_default();
    task.reminder = args.reminder;
    task.repeat = args.repeat;
    task.labels = args.label;

    let id = task.id.clone();
    store.tasks.push(task);
    store::save_tasks(&store)?;

    if args.draft {
        println!("Saved draft {}", id);
    } else {
        println!("Added {}", id);
    }
    Ok(())
}

fn cmd_sub(args: SubArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store_cwd()?;

    let Some(parent) = task_ops::find_task(&store.tasks, &args.parent_id) else {
        println!("task not found: {}", args.parent_id);
        return Ok(());
    };
    let section_id = parent.section_id.clone();

    let subtask = task_ops::create_task(&args.title, &section_id, false)?;
    let id = subtask.id.clone();
    let (tasks, _) = task_ops::add_subtask(&store.tasks, &args.parent_id, subtask);
    store.tasks = tasks;
    store::save_tasks(&store)?;

    println!("Added subtask {} under {}", id, args.parent_id);
    Ok(())
}

fn cmd_toggle(args: ToggleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store_cwd()?;

    if task_ops::find_task(&store.tasks, &args.id).is_none() {
        println!("task not found: {}", args.id);
        return Ok(());
    }
    store.tasks = task_ops::toggle_completion(&store.tasks, &args.id);
    store::save_tasks(&store)?;

    // find_task just put it there
    if let Some(task) = task_ops::find_task(&store.tasks, &args.id) {
        let state = if task.completed { "completed" } else { "pending" };
        println!("{} is now {}", args.id, state);
    }
    Ok(())
}

fn cmd_edit(args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store_cwd()?;

    if let Some(title) = &args.title {
        if title.trim().is_empty() {
            return Err(Box::new(task_ops::TaskError::EmptyTitle));
        }
    }

    let (tasks, found) = task_ops::update_task(&store.tasks, &args.id, |task| {
        let mut updated = task.clone();
        if let Some(title) = &args.title {
            updated.title = title.trim().to_string();
        }
        if let Some(description) = &args.description {
            updated.description = description.clone();
        }
        if let Some(priority) = &args.priority {
            updated.priority = priority.clone();
        }
        if let Some(due) = &args.due {
            updated.due_date = Some(due.clone());
        }
        if let Some(time) = &args.time {
            updated.time = Some(time.clone());
        }
        if let Some(reminder) = &args.reminder {
            updated.reminder = Some(reminder.clone());
        }
        if let Some(repeat) = &args.repeat {
            updated.repeat = Some(repeat.clone());
        }
        if !args.label.is_empty() {
            updated.labels = args.label.clone();
        }
        if args.draft {
            updated.is_draft = true;
        }
        if args.commit {
            updated.is_draft = false;
        }
        updated
    });

    if !found {
        println!("task not found: {}", args.id);
        return Ok(());
    }
    store.tasks = tasks;
    store::save_tasks(&store)?;
    println!("Updated {}", args.id);
    Ok(())
}

fn cmd_mv(args: MvArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store_cwd()?;

    let dragged_parent = match task_ops::parent_of(&store.tasks, &args.id) {
        Some(parent) => parent.map(|p| p.to_string()),
        None => {
            println!("task not found: {}", args.id);
            return Ok(());
        }
    };
    let target_parent = match task_ops::parent_of(&store.tasks, &args.target) {
        Some(parent) => parent.map(|p| p.to_string()),
        None => {
            println!("task not found: {}", args.target);
            return Ok(());
        }
    };

    if dragged_parent != target_parent {
        eprintln!("warning: moving tasks between different lists is not supported");
        return Ok(());
    }

    store.tasks = task_ops::reorder_siblings(
        &store.tasks,
        dragged_parent.as_deref(),
        &args.id,
        &args.target,
    )?;
    store::save_tasks(&store)?;
    println!("Moved {}", args.id);
    Ok(())
}

fn cmd_delete(args: DeleteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store_cwd()?;
    let now = Utc::now();

    let mut deleted = 0;
    for id in &args.ids {
        let (tasks, trash, found) = trash_ops::delete_task(&store.tasks, &store.trash, id, now);
        if found {
            deleted += 1;
            store.tasks = tasks;
            store.trash = trash;
        } else {
            println!("task not found: {}", id);
        }
    }

    if deleted > 0 {
        store::save_tasks(&store)?;
        store::save_trash(&store)?;
        println!("Moved {} task(s) to the trash", deleted);
    }
    Ok(())
}

fn cmd_restore(args: RestoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store_cwd()?;

    let (tasks, trash, found) = if args.draft {
        trash_ops::restore_to_drafts(&store.tasks, &store.trash, &args.id)
    } else {
        trash_ops::restore_task(&store.tasks, &store.trash, &args.id)
    };

    if !found {
        println!("not in trash: {}", args.id);
        return Ok(());
    }
    store.tasks = tasks;
    store.trash = trash;
    store::save_tasks(&store)?;
    store::save_trash(&store)?;

    if args.draft {
        println!("Restored {} to drafts", args.id);
    } else {
        println!("Restored {}", args.id);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Section management
// ---------------------------------------------------------------------------

fn cmd_section(cmd: SectionCmd, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store_cwd()?;
    match cmd.action {
        SectionAction::List => {
            if json {
                println!("{}", serde_json::to_string_pretty(&store.sections)?);
            } else {
                output::print_sections(&store.sections);
            }
        }
        SectionAction::New(args) => {
            let (sections, id) = section_ops::add_section(&store.sections, &args.name, Utc::now())?;
            store.sections = sections;
            store::save_sections(&store)?;
            println!("Added section {} ({})", args.name, id);
        }
        SectionAction::Rename(args) => {
            store.sections = section_ops::rename_section(&store.sections, &args.id, &args.name)?;
            store::save_sections(&store)?;
            println!("Renamed {}", args.id);
        }
        SectionAction::Delete(args) => {
            let result = section_ops::delete_section(
                &store.sections,
                &store.tasks,
                &store.trash,
                &args.id,
                Utc::now(),
            )?;
            store.sections = result.sections;
            store.tasks = result.tasks;
            store.trash = result.trash;
            store::save_sections(&store)?;
            store::save_tasks(&store)?;
            store::save_trash(&store)?;
            println!(
                "Deleted section {} ({} task(s) moved to the trash)",
                args.id, result.tasks_deleted
            );
        }
        SectionAction::Toggle(args) => {
            let (sections, found) = section_ops::toggle_expanded(&store.sections, &args.id);
            if !found {
                println!("section not found: {}", args.id);
                return Ok(());
            }
            store.sections = sections;
            store::save_sections(&store)?;
        }
        SectionAction::Icon(args) => {
            store.sections =
                section_ops::set_icon(&store.sections, &args.id, &args.icon, &args.color)?;
            store::save_sections(&store)?;
            println!("Set icon on {}", args.id);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Custom labels and priorities
// ---------------------------------------------------------------------------

fn cmd_label(cmd: LabelCmd, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store_cwd()?;
    match cmd.action {
        LabelAction::List => {
            if json {
                println!("{}", serde_json::to_string_pretty(&store.custom_labels)?);
            } else {
                for (name, color) in palette::PRESET_LABELS {
                    println!("{}  {} (preset)", name, color);
                }
                for label in &store.custom_labels {
                    println!("{}  {}", label.name, label.color);
                }
            }
        }
        LabelAction::Add(args) => {
            // Redefining an existing label updates its color.
            store.custom_labels.retain(|l| l.name != args.name);
            store.custom_labels.push(CustomLabel {
                name: args.name.clone(),
                color: args.color,
            });
            store::save_custom_labels(&store)?;
            println!("Defined label {}", args.name);
        }
        LabelAction::Rm(args) => {
            let before = store.custom_labels.len();
            store.custom_labels.retain(|l| l.name != args.name);
            if store.custom_labels.len() == before {
                println!("label not found: {}", args.name);
                return Ok(());
            }
            store::save_custom_labels(&store)?;
            println!("Removed label {}", args.name);
        }
    }
    Ok(())
}

fn cmd_priority(cmd: PriorityCmd, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store_cwd()?;
    match cmd.action {
        PriorityAction::List => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&store.custom_priorities)?
                );
            } else {
                for n in 1..=6 {
                    let name = format!("Priority {}", n);
                    println!(
                        "{}  {} (built-in)",
                        name,
                        palette::priority_color(&name, &[])
                    );
                }
                for priority in &store.custom_priorities {
                    println!("{}  {}", priority.name, priority.color);
                }
            }
        }
        PriorityAction::Add(args) => {
            store.custom_priorities.retain(|p| p.name != args.name);
            store.custom_priorities.push(CustomPriority {
                name: args.name.clone(),
                color: args.color,
            });
            store::save_custom_priorities(&store)?;
            println!("Defined priority {}", args.name);
        }
        PriorityAction::Rm(args) => {
            let before = store.custom_priorities.len();
            store.custom_priorities.retain(|p| p.name != args.name);
            if store.custom_priorities.len() == before {
                println!("priority not found: {}", args.name);
                return Ok(());
            }
            store::save_custom_priorities(&store)?;
            println!("Removed priority {}", args.name);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Filters and sorting
// ---------------------------------------------------------------------------

fn cmd_filter(cmd: FilterCmd) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store_cwd()?;
    match cmd.action.unwrap_or(FilterAction::Show) {
        FilterAction::Show => {
            let s = &store.filter_settings;
            let v = &store.filter_values;
            println!(
                "date: {}{}",
                if s.date { "on" } else { "off" },
                if s.date && !v.date.is_empty() {
                    format!(" ({})", v.date)
                } else {
                    String::new()
                }
            );
            println!(
                "priority: {} {:?}",
                if s.priority { "on" } else { "off" },
                v.priorities
            );
            println!(
                "label: {} {:?}",
                if s.label { "on" } else { "off" },
                v.labels
            );
        }
        FilterAction::Date(args) => {
            if args.off {
                store.filter_settings.date = false;
                store.filter_values.date = String::new();
            } else {
                let preset = args.preset.ok_or("missing date preset (or --off)")?;
                if DatePreset::from_name(&preset).is_none() {
                    let names: Vec<&str> = DatePreset::ALL.iter().map(|p| p.name()).collect();
                    return Err(format!(
                        "unknown date preset \"{}\" (expected one of: {})",
                        preset,
                        names.join(", ")
                    )
                    .into());
                }
                store.filter_settings.date = true;
                store.filter_values.date = preset;
            }
            store::save_filter_settings(&store)?;
            store::save_filter_values(&store)?;
        }
        FilterAction::Priority(args) => {
            if args.off {
                store.filter_settings.priority = false;
                store.filter_values.priorities.clear();
            } else {
                store.filter_settings.priority = true;
                store.filter_values.priorities = args.values;
            }
            store::save_filter_settings(&store)?;
            store::save_filter_values(&store)?;
        }
        FilterAction::Label(args) => {
            if args.off {
                store.filter_settings.label = false;
                store.filter_values.labels.clear();
            } else {
                store.filter_settings.label = true;
                store.filter_values.labels = args.values;
            }
            store::save_filter_settings(&store)?;
            store::save_filter_values(&store)?;
        }
        FilterAction::Clear => {
            store.filter_settings = Default::default();
            store.filter_values = Default::default();
            store::save_filter_settings(&store)?;
            store::save_filter_values(&store)?;
        }
    }
    Ok(())
}

fn cmd_sort(cmd: SortCmd) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store_cwd()?;
    match cmd.action.unwrap_or(SortAction::Show) {
        SortAction::Show => {
            let s = &store.sort_settings;
            println!(
                "completion-status: {}",
                if s.completion_status { "on" } else { "off" }
            );
            println!(
                "creation-date: {}",
                if s.creation_date { "on" } else { "off" }
            );
        }
        SortAction::Completion(args) => {
            store.sort_settings.completion_status = parse_on_off(&args.state)?;
            store::save_sort_settings(&store)?;
        }
        SortAction::Created(args) => {
            store.sort_settings.creation_date = parse_on_off(&args.state)?;
            store::save_sort_settings(&store)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

fn cmd_clean(args: CleanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store_cwd()?;
    let retention = store.config.trash.retention_days;
    let (kept, purged) = trash_ops::purge_expired(&store.trash, Utc::now(), retention);

    if args.dry_run {
        println!(
            "Would purge {} task(s) older than {} day(s)",
            purged, retention
        );
        return Ok(());
    }

    store.trash = kept;
    store::save_trash(&store)?;
    println!("Purged {} task(s) older than {} day(s)", purged, retention);
    Ok(())
}
