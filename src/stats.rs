//! Summary figures shown above the board.
//!
//! Everything here is recomputed from the full collection on each render;
//! nothing is cached between mutations.

use chrono::{Datelike, NaiveDate};

use crate::fields::Status;
use crate::task::Task;

/// Counts displayed on the summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardStats {
    /// Tasks neither completed nor blocked.
    pub active: usize,
    /// Tasks still in `todo`.
    pub pending: usize,
    /// Completed tasks created in the current month.
    pub completed_this_month: usize,
    /// Tasks past their due date and not completed.
    pub overdue: usize,
}

impl BoardStats {
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        let mut stats = BoardStats::default();
        for task in tasks {
            if !matches!(task.status, Status::Completed | Status::Blocked) {
                stats.active += 1;
            }
            if task.status == Status::Todo {
                stats.pending += 1;
            }
            if task.status == Status::Completed && same_month(task.created_at, today) {
                stats.completed_this_month += 1;
            }
            if task.is_overdue(today) {
                stats.overdue += 1;
            }
        }
        stats
    }
}

/// Whether two dates share a calendar month and year.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Number of tasks in each lane, in board order. Feeds the lane chart.
pub fn lane_counts(tasks: &[Task]) -> [(Status, usize); 4] {
    Status::ALL.map(|status| (status, tasks.iter().filter(|t| t.status == status).count()))
}

/// Mean progress across the collection, rounded down. Zero when empty.
pub fn average_progress(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let total: usize = tasks.iter().map(|t| t.progress as usize).sum();
    (total / tasks.len()) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_tasks;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_seed_stats_mid_november() {
        let tasks = seed_tasks();
        let stats = BoardStats::compute(&tasks, day(2025, 11, 16));
        assert_eq!(
            stats,
            BoardStats {
                // 1, 2, 4, 6
                active: 4,
                pending: 2,
                // task 3 was created in October
                completed_this_month: 0,
                // task 1 is not yet due; 5 (due 15th) is late; 3 is completed
                overdue: 1,
            }
        );
    }

    #[test]
    fn test_completed_this_month_uses_creation_month() {
        let mut tasks = seed_tasks();
        tasks[1].status = Status::Completed;
        let stats = BoardStats::compute(&tasks, day(2025, 11, 16));
        assert_eq!(stats.completed_this_month, 1);
        let december = BoardStats::compute(&tasks, day(2025, 12, 1));
        assert_eq!(december.completed_this_month, 0);
    }

    #[test]
    fn test_overdue_matches_definition() {
        let tasks = seed_tasks();
        for today in [day(2025, 11, 1), day(2025, 11, 21), day(2025, 12, 31)] {
            let expected = tasks
                .iter()
                .filter(|t| t.due_date < today && t.status != Status::Completed)
                .count();
            assert_eq!(BoardStats::compute(&tasks, today).overdue, expected);
        }
        // Due today is not overdue.
        assert_eq!(BoardStats::compute(&tasks, day(2025, 11, 15)).overdue, 0);
    }

    #[test]
    fn test_lane_counts_and_average() {
        let tasks = seed_tasks();
        let counts = lane_counts(&tasks);
        assert_eq!(
            counts,
            [
                (Status::Todo, 2),
                (Status::InProgress, 2),
                (Status::Blocked, 1),
                (Status::Completed, 1)
            ]
        );
        // (60 + 0 + 100 + 45 + 20 + 0) / 6
        assert_eq!(average_progress(&tasks), 37);
        assert_eq!(average_progress(&[]), 0);
    }
}
