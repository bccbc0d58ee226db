pub mod board;
pub mod palette;

use chrono::{Local, NaiveDate};
use indexmap::IndexMap;

use crate::model::settings::{FilterSettings, FilterValues, SortSettings, ViewMode};
use crate::model::task::{DeletedTask, Task};
use crate::util::date::{DatePreset, parse_loose_date};

/// A bucket of tasks sharing a raw creation-date string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup {
    pub date: String,
    pub tasks: Vec<Task>,
}

/// Compute the ordered task list a view should render.
///
/// The pipeline order is fixed: view-mode filter, then date, priority and
/// label filters, then the composite sort. The deleted view bypasses the
/// pipeline entirely and sources the trash.
pub fn derive_view(
    tasks: &[Task],
    deleted: &[DeletedTask],
    view: ViewMode,
    filters: &FilterSettings,
    values: &FilterValues,
    sort: &SortSettings,
) -> Vec<Task> {
    derive_view_at(
        tasks,
        deleted,
        view,
        filters,
        values,
        sort,
        Local::now().date_naive(),
    )
}

/// `derive_view` with an injected "today" for deterministic date filtering.
pub fn derive_view_at(
    tasks: &[Task],
    deleted: &[DeletedTask],
    view: ViewMode,
    filters: &FilterSettings,
    values: &FilterValues,
    sort: &SortSettings,
    today: NaiveDate,
) -> Vec<Task> {
    if view == ViewMode::Deleted {
        return deleted.iter().map(|d| d.task.clone()).collect();
    }

    let mut filtered: Vec<Task> = tasks
        .iter()
        .filter(|task| match view {
            ViewMode::Drafts => task.is_draft,
            ViewMode::Total => !task.is_draft,
            ViewMode::Completed => task.completed && !task.is_draft,
            ViewMode::Pending => !task.completed && !task.is_draft,
            ViewMode::Deleted => unreachable!(),
        })
        .cloned()
        .collect();

    if filters.date && !values.date.is_empty() && values.date != "All" {
        // An unrecognized preset name keeps everything, matching the old
        // behavior for stale persisted values.
        if let Some(preset) = DatePreset::from_name(&values.date) {
            filtered.retain(|task| {
                task.due_date
                    .as_deref()
                    .and_then(parse_loose_date)
                    .map(|due| preset.contains(due, today))
                    .unwrap_or(false)
            });
        }
    }

    if filters.priority && !values.priorities.is_empty() {
        filtered.retain(|task| values.priorities.contains(&task.priority));
    }

    if filters.label && !values.labels.is_empty() {
        filtered.retain(|task| task.labels.iter().any(|l| values.labels.contains(l)));
    }

    if sort.completion_status || sort.creation_date {
        // Vec::sort_by is stable, so ties keep their input order.
        filtered.sort_by(|a, b| {
            if sort.completion_status && a.completed != b.completed {
                return a.completed.cmp(&b.completed);
            }
            if sort.creation_date {
                let a_date = parse_loose_date(&a.creation_date);
                let b_date = parse_loose_date(&b.creation_date);
                return b_date.cmp(&a_date);
            }
            std::cmp::Ordering::Equal
        });
    }

    filtered
}

/// Group a filtered+sorted list into buckets keyed by the raw creation-date
/// string, ordered by descending parsed date. A presentation layer on top of
/// `derive_view`, used when creation-date sort is active.
pub fn group_by_creation_date(tasks: &[Task]) -> Vec<DateGroup> {
    let mut buckets: IndexMap<String, Vec<Task>> = IndexMap::new();
    for task in tasks {
        buckets
            .entry(task.creation_date.clone())
            .or_default()
            .push(task.clone());
    }
    let mut groups: Vec<DateGroup> = buckets
        .into_iter()
        .map(|(date, tasks)| DateGroup { date, tasks })
        .collect();
    // Unparseable dates sort last.
    groups.sort_by(|a, b| parse_loose_date(&b.date).cmp(&parse_loose_date(&a.date)));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Task;

    fn task(id: &str, created: &str) -> Task {
        Task::new(id.into(), id.into(), created.into(), "s".into())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 18).unwrap()
    }

    fn derive(
        tasks: &[Task],
        view: ViewMode,
        filters: &FilterSettings,
        values: &FilterValues,
        sort: &SortSettings,
    ) -> Vec<Task> {
        derive_view_at(tasks, &[], view, filters, values, sort, today())
    }

    fn no_sort() -> SortSettings {
        SortSettings {
            completion_status: false,
            creation_date: false,
            pages: false,
            chats: false,
        }
    }

    fn sample() -> Vec<Task> {
        let mut a = task("a", "01/06/2025");
        a.completed = true;
        a.priority = "Priority 1".into();
        a.labels = vec!["#Work".into()];
        a.due_date = Some("18/06/2025".into());

        let mut b = task("b", "02/06/2025");
        b.priority = "Priority 2".into();
        b.labels = vec!["#Home".into()];
        b.due_date = Some("19/06/2025".into());

        let mut c = task("c", "02/06/2025");
        c.is_draft = true;

        vec![a, b, c]
    }

    #[test]
    fn view_modes_partition_drafts_and_completion() {
        let tasks = sample();
        let values = FilterValues::default();
        let filters = FilterSettings::default();
        let sort = no_sort();

        let total = derive(&tasks, ViewMode::Total, &filters, &values, &sort);
        assert_eq!(total.len(), 2);

        let drafts = derive(&tasks, ViewMode::Drafts, &filters, &values, &sort);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].id, "c");

        let completed = derive(&tasks, ViewMode::Completed, &filters, &values, &sort);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, "a");

        let pending = derive(&tasks, ViewMode::Pending, &filters, &values, &sort);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, "b");
    }

    #[test]
    fn deleted_view_sources_the_trash_and_skips_filters() {
        let trash = vec![DeletedTask {
            task: task("gone", "01/06/2025"),
            deleted_at: "2025-06-17T00:00:00Z".into(),
        }];
        // Filters that would exclude everything are ignored for the trash.
        let filters = FilterSettings {
            date: true,
            priority: true,
            label: true,
        };
        let values = FilterValues {
            date: "Today".into(),
            priorities: vec!["none".into()],
            labels: vec!["none".into()],
        };
        let result = derive_view_at(
            &sample(),
            &trash,
            ViewMode::Deleted,
            &filters,
            &values,
            &no_sort(),
            today(),
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "gone");
    }

    #[test]
    fn date_filter_today_includes_only_matching_due_dates() {
        let tasks = sample();
        let filters = FilterSettings {
            date: true,
            ..Default::default()
        };
        let values = FilterValues {
            date: "Today".into(),
            ..Default::default()
        };
        let result = derive(&tasks, ViewMode::Total, &filters, &values, &no_sort());
        // "a" is due today; "b" is due tomorrow.
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "a");
    }

    #[test]
    fn tasks_without_due_dates_never_match_an_active_date_filter() {
        let tasks = vec![task("no-due", "01/06/2025")];
        let filters = FilterSettings {
            date: true,
            ..Default::default()
        };
        let values = FilterValues {
            date: "Next 30 days".into(),
            ..Default::default()
        };
        assert!(derive(&tasks, ViewMode::Total, &filters, &values, &no_sort()).is_empty());
    }

    #[test]
    fn unknown_date_preset_keeps_everything() {
        let tasks = sample();
        let filters = FilterSettings {
            date: true,
            ..Default::default()
        };
        let values = FilterValues {
            date: "Fortnight".into(),
            ..Default::default()
        };
        let result = derive(&tasks, ViewMode::Total, &filters, &values, &no_sort());
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn priority_and_label_filters_use_or_semantics() {
        let tasks = sample();
        let filters = FilterSettings {
            priority: true,
            label: true,
            ..Default::default()
        };
        let values = FilterValues {
            priorities: vec!["Priority 1".into(), "Priority 3".into()],
            labels: vec!["#Work".into(), "#Errands".into()],
            ..Default::default()
        };
        let result = derive(&tasks, ViewMode::Total, &filters, &values, &no_sort());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "a");
    }

    #[test]
    fn inactive_filter_categories_ignore_their_values() {
        let tasks = sample();
        let filters = FilterSettings::default();
        let values = FilterValues {
            priorities: vec!["Priority 1".into()],
            labels: vec!["#Work".into()],
            date: "Today".into(),
        };
        let result = derive(&tasks, ViewMode::Total, &filters, &values, &no_sort());
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn each_added_filter_never_grows_the_result() {
        let tasks = sample();
        let values = FilterValues {
            date: "Today".into(),
            priorities: vec!["Priority 1".into()],
            labels: vec!["#Work".into()],
        };
        let mut sizes = Vec::new();
        for filters in [
            FilterSettings::default(),
            FilterSettings {
                date: true,
                ..Default::default()
            },
            FilterSettings {
                date: true,
                priority: true,
                ..Default::default()
            },
            FilterSettings {
                date: true,
                priority: true,
                label: true,
            },
        ] {
            sizes.push(derive(&tasks, ViewMode::Total, &filters, &values, &no_sort()).len());
        }
        for pair in sizes.windows(2) {
            assert!(pair[1] <= pair[0], "filter grew the result: {:?}", sizes);
        }
    }

    #[test]
    fn no_sort_switches_preserve_input_order() {
        let tasks = sample();
        let result = derive(
            &tasks,
            ViewMode::Total,
            &FilterSettings::default(),
            &FilterValues::default(),
            &no_sort(),
        );
        let ids: Vec<&str> = result.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn completion_sort_puts_pending_first() {
        let tasks = sample();
        let sort = SortSettings {
            completion_status: true,
            creation_date: false,
            pages: false,
            chats: false,
        };
        let result = derive(
            &tasks,
            ViewMode::Total,
            &FilterSettings::default(),
            &FilterValues::default(),
            &sort,
        );
        let ids: Vec<&str> = result.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn creation_date_sort_is_descending_and_secondary() {
        let mut old_done = task("old-done", "01/06/2025");
        old_done.completed = true;
        let mut new_done = task("new-done", "03/06/2025");
        new_done.completed = true;
        let tasks = vec![old_done, task("mid", "02/06/2025"), new_done];

        let sort = SortSettings {
            completion_status: true,
            creation_date: true,
            pages: false,
            chats: false,
        };
        let result = derive(
            &tasks,
            ViewMode::Total,
            &FilterSettings::default(),
            &FilterValues::default(),
            &sort,
        );
        let ids: Vec<&str> = result.iter().map(|t| t.id.as_str()).collect();
        // Pending first, then completed newest-first.
        assert_eq!(ids, ["mid", "new-done", "old-done"]);
    }

    #[test]
    fn grouping_buckets_by_raw_string_in_descending_date_order() {
        let tasks = vec![
            task("a", "01/06/2025"),
            task("b", "03/06/2025"),
            task("c", "01/06/2025"),
        ];
        let groups = group_by_creation_date(&tasks);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, "03/06/2025");
        assert_eq!(groups[1].date, "01/06/2025");
        let ids: Vec<&str> = groups[1].tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }
}
