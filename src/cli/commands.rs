use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ka", about = concat!("[+] kario v", env!("CARGO_PKG_VERSION"), " - your tasks, kept locally"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different store directory
    #[arg(short = 'C', long = "store-dir", global = true)]
    pub store_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new kario store in the current directory
    Init(InitArgs),
    /// Add a task
    Add(AddArgs),
    /// Add a subtask under an existing task
    Sub(SubArgs),
    /// List tasks for a view
    List(ListArgs),
    /// Show one task with its subtree
    Show(ShowArgs),
    /// Toggle completion (cascades to subtasks)
    Toggle(ToggleArgs),
    /// Edit task fields
    Edit(EditArgs),
    /// Reorder a task among its siblings
    Mv(MvArgs),
    /// Move tasks to the trash
    Delete(DeleteArgs),
    /// Restore a task from the trash
    Restore(RestoreArgs),
    /// List trashed tasks
    Trash,
    /// Section management
    Section(SectionCmd),
    /// Custom label management
    Label(LabelCmd),
    /// Custom priority management
    Priority(PriorityCmd),
    /// View or change filters
    Filter(FilterCmd),
    /// View or change sort switches
    Sort(SortCmd),
    /// Show the kanban board columns
    Board,
    /// Show task statistics
    Stats,
    /// Purge trashed tasks past the retention window
    Clean(CleanArgs),
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Project name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Section to add the task to (default: the default section)
    #[arg(long)]
    pub section: Option<String>,
    /// Due date (DD/MM/YYYY)
    #[arg(long)]
    pub due: Option<String>,
    /// Due time
    #[arg(long)]
    pub time: Option<String>,
    /// Priority (built-in "Priority N" or a custom name)
    #[arg(long)]
    pub priority: Option<String>,
    /// Description text
    #[arg(long)]
    pub description: Option<String>,
    /// Label(s) to attach (repeatable)
    #[arg(long)]
    pub label: Vec<String>,
    /// Reminder text
    #[arg(long)]
    pub reminder: Option<String>,
    /// Repeat rule text
    #[arg(long)]
    pub repeat: Option<String>,
    /// Save as a draft instead of a committed task
    #[arg(long)]
    pub draft: bool,
}

#[derive(Args)]
pub struct SubArgs {
    /// Parent task ID
    pub parent_id: String,
    /// Subtask title
    pub title: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// View to derive: drafts, total, completed, pending, deleted
    #[arg(long, default_value = "total")]
    pub view: String,
    /// Restrict to one section (by id or name)
    #[arg(long)]
    pub section: Option<String>,
    /// Group the result by creation date
    #[arg(long)]
    pub group: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task ID to show
    pub id: String,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID
    pub id: String,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description
    #[arg(long)]
    pub description: Option<String>,
    /// New priority
    #[arg(long)]
    pub priority: Option<String>,
    /// New due date (DD/MM/YYYY)
    #[arg(long)]
    pub due: Option<String>,
    /// New due time
    #[arg(long)]
    pub time: Option<String>,
    /// New reminder text
    #[arg(long)]
    pub reminder: Option<String>,
    /// New repeat rule
    #[arg(long)]
    pub repeat: Option<String>,
    /// Replace the label set (repeatable)
    #[arg(long)]
    pub label: Vec<String>,
    /// Move to drafts
    #[arg(long, conflicts_with = "commit")]
    pub draft: bool,
    /// Move out of drafts
    #[arg(long)]
    pub commit: bool,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task ID to move
    pub id: String,
    /// Sibling whose position the task should take
    pub target: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task IDs to move to the trash
    #[arg(required = true)]
    pub ids: Vec<String>,
}

#[derive(Args)]
pub struct RestoreArgs {
    /// Task ID to restore
    pub id: String,
    /// Restore into drafts instead of the live list
    #[arg(long)]
    pub draft: bool,
}

// ---------------------------------------------------------------------------
// Section management
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct SectionCmd {
    #[command(subcommand)]
    pub action: SectionAction,
}

#[derive(Subcommand)]
pub enum SectionAction {
    /// List sections
    List,
    /// Create a section
    New(SectionNewArgs),
    /// Rename a section
    Rename(SectionRenameArgs),
    /// Delete a section (its tasks move to the trash)
    Delete(SectionIdArg),
    /// Toggle a section's expanded state
    Toggle(SectionIdArg),
    /// Set a section's icon and color
    Icon(SectionIconArgs),
}

#[derive(Args)]
pub struct SectionNewArgs {
    /// Section name
    pub name: String,
}

#[derive(Args)]
pub struct SectionRenameArgs {
    /// Section ID
    pub id: String,
    /// New name
    pub name: String,
}

#[derive(Args)]
pub struct SectionIdArg {
    /// Section ID
    pub id: String,
}

#[derive(Args)]
pub struct SectionIconArgs {
    /// Section ID
    pub id: String,
    /// Icon name
    pub icon: String,
    /// Icon color
    pub color: String,
}

// ---------------------------------------------------------------------------
// Custom labels and priorities
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct LabelCmd {
    #[command(subcommand)]
    pub action: LabelAction,
}

#[derive(Subcommand)]
pub enum LabelAction {
    /// List custom labels (presets included)
    List,
    /// Define a custom label
    Add(NameColorArgs),
    /// Remove a custom label
    Rm(NameArg),
}

#[derive(Args)]
pub struct PriorityCmd {
    #[command(subcommand)]
    pub action: PriorityAction,
}

#[derive(Subcommand)]
pub enum PriorityAction {
    /// List custom priorities
    List,
    /// Define a custom priority
    Add(NameColorArgs),
    /// Remove a custom priority
    Rm(NameArg),
}

#[derive(Args)]
pub struct NameColorArgs {
    pub name: String,
    pub color: String,
}

#[derive(Args)]
pub struct NameArg {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Filters and sorting
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct FilterCmd {
    #[command(subcommand)]
    pub action: Option<FilterAction>,
}

#[derive(Subcommand)]
pub enum FilterAction {
    /// Show the current filter state (default)
    Show,
    /// Set the date filter to a preset, or disable it
    Date(FilterDateArgs),
    /// Set the priority filter values, or disable it
    Priority(FilterValuesArgs),
    /// Set the label filter values, or disable it
    Label(FilterValuesArgs),
    /// Disable all filters and clear their values
    Clear,
}

#[derive(Args)]
pub struct FilterDateArgs {
    /// Preset: "Today", "This week", "Next 7 days", "This month", "Next 30 days"
    pub preset: Option<String>,
    /// Disable the date filter
    #[arg(long)]
    pub off: bool,
}

#[derive(Args)]
pub struct FilterValuesArgs {
    /// Values to match (OR semantics)
    pub values: Vec<String>,
    /// Disable this filter
    #[arg(long)]
    pub off: bool,
}

#[derive(Args)]
pub struct SortCmd {
    #[command(subcommand)]
    pub action: Option<SortAction>,
}

#[derive(Subcommand)]
pub enum SortAction {
    /// Show the current sort switches (default)
    Show,
    /// Toggle completion-status sorting: on | off
    Completion(OnOffArg),
    /// Toggle creation-date sorting: on | off
    Created(OnOffArg),
}

#[derive(Args)]
pub struct OnOffArg {
    /// "on" or "off"
    pub state: String,
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct CleanArgs {
    /// Show what would be purged without making changes
    #[arg(long)]
    pub dry_run: bool,
}
