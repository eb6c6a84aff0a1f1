//! Filter facets for narrowing the visible set of tasks.
//!
//! Each facet is independent and optional; every facet that is set must
//! match for a task to be visible.

use std::collections::BTreeSet;

use crate::fields::Status;
use crate::task::Task;

/// Sentinel accepted wherever a facet value is expected, meaning "no filter".
pub const ALL: &str = "all";

/// Turn a raw facet value into an optional filter, treating `"all"` and
/// blank input as unset.
pub fn facet(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
        .map(str::to_string)
}

/// The current selections of the filter bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Case-insensitive substring of the title or assignee name.
    pub search: Option<String>,
    pub department: Option<String>,
    /// Staff id of the assignee.
    pub assigned_to: Option<String>,
    pub project: Option<String>,
    pub status: Option<Status>,
}

impl TaskFilter {
    /// True when no facet is set.
    pub fn is_empty(&self) -> bool {
        *self == TaskFilter::default()
    }

    /// Whether a single task passes every set facet.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(ref needle) = self.search {
            let needle = needle.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_assignee = task.assigned_to_name.to_lowercase().contains(&needle);
            if !in_title && !in_assignee {
                return false;
            }
        }
        if let Some(ref department) = self.department {
            if task.department.as_deref() != Some(department.as_str()) {
                return false;
            }
        }
        if let Some(ref staff) = self.assigned_to {
            if &task.assigned_to != staff {
                return false;
            }
        }
        if let Some(ref project) = self.project {
            if task.project.as_deref() != Some(project.as_str()) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        true
    }

    /// Visible subset of a collection, in collection order.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }

    /// One-line description of the active facets for status bars.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ref s) = self.search {
            parts.push(format!("search '{s}'"));
        }
        if let Some(ref d) = self.department {
            parts.push(format!("dept {d}"));
        }
        if let Some(ref a) = self.assigned_to {
            parts.push(format!("staff {a}"));
        }
        if let Some(ref p) = self.project {
            parts.push(format!("project {p}"));
        }
        if let Some(s) = self.status {
            parts.push(format!("status {s}"));
        }
        if parts.is_empty() {
            "no filters".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Distinct departments present in the collection, sorted.
pub fn departments(tasks: &[Task]) -> Vec<String> {
    distinct(tasks.iter().filter_map(|t| t.department.clone()))
}

/// Distinct projects present in the collection, sorted.
pub fn projects(tasks: &[Task]) -> Vec<String> {
    distinct(tasks.iter().filter_map(|t| t.project.clone()))
}

/// Distinct assignee ids present in the collection, sorted.
pub fn assignees(tasks: &[Task]) -> Vec<String> {
    distinct(tasks.iter().map(|t| t.assigned_to.clone()))
}

fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    values.collect::<BTreeSet<_>>().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_tasks;

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn test_empty_filter_returns_everything_in_order() {
        let tasks = seed_tasks();
        let filter = TaskFilter::default();
        assert!(filter.is_empty());
        assert_eq!(ids(&filter.apply(&tasks)), vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_facet_treats_all_and_blank_as_unset() {
        assert_eq!(facet(Some("all")), None);
        assert_eq!(facet(Some("ALL")), None);
        assert_eq!(facet(Some("  ")), None);
        assert_eq!(facet(None), None);
        assert_eq!(facet(Some(" Design ")), Some("Design".to_string()));
    }

    #[test]
    fn test_search_matches_title_or_assignee_case_insensitively() {
        let tasks = seed_tasks();
        let by_title = TaskFilter { search: Some("SCHEMA".into()), ..TaskFilter::default() };
        assert_eq!(ids(&by_title.apply(&tasks)), vec!["5"]);

        let by_name = TaskFilter { search: Some("emily".into()), ..TaskFilter::default() };
        assert_eq!(ids(&by_name.apply(&tasks)), vec!["2", "3"]);
    }

    #[test]
    fn test_facets_combine_with_and() {
        let tasks = seed_tasks();
        let filter = TaskFilter {
            department: Some("Engineering".into()),
            status: Some(Status::InProgress),
            ..TaskFilter::default()
        };
        assert_eq!(ids(&filter.apply(&tasks)), vec!["4"]);

        let none = TaskFilter {
            department: Some("Engineering".into()),
            project: Some("Training Program".into()),
            ..TaskFilter::default()
        };
        assert!(none.apply(&tasks).is_empty());
    }

    #[test]
    fn test_every_result_satisfies_every_facet() {
        let tasks = seed_tasks();
        let filter = TaskFilter {
            search: Some("a".into()),
            assigned_to: Some("EMP003".into()),
            project: Some("Q4 Evaluations".into()),
            ..TaskFilter::default()
        };
        let visible = filter.apply(&tasks);
        assert_eq!(ids(&visible), vec!["2"]);
        for task in visible {
            assert_eq!(task.assigned_to, "EMP003");
            assert_eq!(task.project.as_deref(), Some("Q4 Evaluations"));
        }
    }

    #[test]
    fn test_blocked_lane_holds_only_the_migration() {
        let tasks = seed_tasks();
        let filter = TaskFilter { status: Some(Status::Blocked), ..TaskFilter::default() };
        let blocked = filter.apply(&tasks);
        assert_eq!(ids(&blocked), vec!["5"]);
        assert_eq!(blocked[0].title, "Database schema migration");
    }

    #[test]
    fn test_distinct_facet_values() {
        let tasks = seed_tasks();
        assert_eq!(departments(&tasks), vec!["Design", "Engineering", "Human Resources", "Operations"]);
        assert_eq!(assignees(&tasks), vec!["EMP001", "EMP002", "EMP003", "EMP004", "EMP005"]);
        assert_eq!(projects(&tasks).len(), 5);
    }
}
