//! Command implementations for the CLI interface.
//!
//! This module contains the handlers behind each subcommand: the board view
//! itself, read-only listings of the task collection, summary statistics and
//! the monthly CSV report.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::board::*;
use crate::config::AppConfig;
use crate::error::Result;
use crate::fields::*;
use crate::filter::{facet, TaskFilter};
use crate::report::{ReportMonth, TaskReport};
use crate::stats::{average_progress, BoardStats};
use crate::task::TaskId;
use crate::tui::run::run_board_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the kanban board interface.
    Board,

    /// List tasks with optional filters.
    List {
        /// Case-insensitive match on title or assignee name.
        #[arg(long)]
        search: Option<String>,
        /// Filter by department ("all" for any).
        #[arg(long)]
        department: Option<String>,
        /// Filter by assignee staff id ("all" for any).
        #[arg(long)]
        staff: Option<String>,
        /// Filter by project ("all" for any).
        #[arg(long)]
        project: Option<String>,
        /// Filter by status: todo | in-progress | blocked | completed.
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Limit number of rows printed.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// View a single task with its subtasks and comments.
    View {
        /// Task ID to view
        id: String,
    },

    /// Show summary cards and per-lane counts.
    Stats,

    /// Export the monthly task report as CSV.
    Export {
        /// Month to report on, YYYY-MM (default: current month).
        #[arg(long)]
        month: Option<ReportMonth>,
        /// Directory to write task-report-YYYY-MM.csv into (default: .).
        #[arg(long, short)]
        output_dir: Option<PathBuf>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface.
pub fn cmd_board(board: Board, config: AppConfig) {
    match run_board_tui(board, config) {
        Ok(board) => println!("Board closed with {} tasks. Changes are not saved.", board.len()),
        Err(e) => {
            eprintln!("UI error: {e}");
            std::process::exit(1);
        }
    }
}

/// Build the list filter from command-line values.
pub fn list_filter(
    search: Option<String>,
    department: Option<String>,
    staff: Option<String>,
    project: Option<String>,
    status: Option<Status>,
) -> TaskFilter {
    TaskFilter {
        search: facet(search.as_deref()),
        department: facet(department.as_deref()),
        assigned_to: facet(staff.as_deref()),
        project: facet(project.as_deref()),
        status,
    }
}

/// List tasks with optional filters.
pub fn cmd_list(board: &Board, filter: TaskFilter, limit: Option<usize>, today: NaiveDate) {
    let mut rows = filter.apply(board.tasks());
    if rows.is_empty() {
        println!("No tasks match ({}).", filter.describe());
        return;
    }
    if let Some(n) = limit {
        rows.truncate(n);
    }
    print_table(&rows, today);
}

/// Print one task in full.
pub fn cmd_view(board: &Board, id: String, today: NaiveDate) {
    let task_id = TaskId::new(id.trim());
    let Some(task) = board.get(&task_id) else {
        eprintln!("Task {task_id} not found.");
        std::process::exit(1);
    };
    let now = Utc::now();
    let (done, total) = task.subtask_progress();

    println!("ID:           {}", task.id);
    println!("Title:        {}", task.title);
    println!("Status:       {}", task.status.lane_title());
    println!("Priority:     {}", task.priority.label());
    println!("Progress:     {}%", task.progress);
    println!("Due:          {} ({})", task.due_date, format_due_relative(task.due_date, today));
    println!("Created:      {}", task.created_at);
    println!("Assigned to:  {} ({})", task.assigned_to_name, task.assigned_to);
    println!("Assigned by:  {} on {}", task.assigned_by_name, task.assigned_timestamp);
    println!("Department:   {}", task.department.clone().unwrap_or_else(|| "-".into()));
    println!("Project:      {}", task.project.clone().unwrap_or_else(|| "-".into()));
    println!("Tags:         {}", if task.tags.is_empty() { "-".into() } else { task.tags.join(",") });
    println!("Description:\n{}\n", task.description.clone().unwrap_or_else(|| "-".into()));

    println!("Subtasks ({done}/{total}):");
    for sub in &task.subtasks {
        println!("  [{}] {}", if sub.completed { "x" } else { " " }, sub.title);
    }
    if !task.attachments.is_empty() {
        println!("Attachments:");
        for attachment in &task.attachments {
            println!("  {} <{}>", attachment.name, attachment.url);
        }
    }
    println!("Comments ({}):", task.comments.len());
    for comment in &task.comments {
        println!(
            "  ({}) {} · {}\n    {}",
            comment.author_avatar,
            comment.author,
            format_comment_age(comment.posted_at, now),
            comment.text
        );
    }
}

/// Print the summary cards and lane counts.
pub fn cmd_stats(board: &Board, today: NaiveDate) {
    let stats = BoardStats::compute(board.tasks(), today);
    println!("Active:                 {}", stats.active);
    println!("Pending:                {}", stats.pending);
    println!("Completed this month:   {}", stats.completed_this_month);
    println!("Overdue:                {}", stats.overdue);
    println!("Average progress:       {}%", average_progress(board.tasks()));
    println!();
    for status in Status::ALL {
        let ids: Vec<String> = board.lane(status).map(|t| format!("#{}", t.id)).collect();
        println!("{:<12} {:>3}  {}", status.lane_title(), ids.len(), ids.join(" "));
    }
}

/// Build the report for `month` and write it into `dir`.
pub fn export_report(board: &Board, month: ReportMonth, dir: &Path) -> Result<(TaskReport, PathBuf)> {
    let report = TaskReport::build(board.tasks(), month);
    let path = report.write_to(dir)?;
    Ok((report, path))
}

/// Export the monthly report to CSV.
pub fn cmd_export(board: &Board, month: ReportMonth, dir: &Path) {
    match export_report(board, month, dir) {
        Ok((report, path)) => println!(
            "Exported {} task(s) for {} to {} ({})",
            report.rows,
            month.label(),
            path.display(),
            report.mime_type()
        ),
        Err(e) => {
            eprintln!("Export failed: {e}");
            std::process::exit(1);
        }
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_board;

    #[test]
    fn test_list_filter_treats_all_as_unset() {
        let filter = list_filter(None, Some("all".into()), Some("  ".into()), None, Some(Status::Blocked));
        assert_eq!(filter.department, None);
        assert_eq!(filter.assigned_to, None);
        let board = seed_board();
        let rows = filter.apply(board.tasks());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id.as_str(), "5");
    }

    #[test]
    fn test_export_report_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let month: ReportMonth = "2025-10".parse().unwrap();
        let (report, path) = export_report(&seed_board(), month, dir.path()).unwrap();
        assert_eq!(report.rows, 1);
        assert_eq!(path, dir.path().join("task-report-2025-10.csv"));
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with("Task Report\nMonth: October 2025\n"));
        assert!(written.contains("Update leave policy document"));
    }

    #[test]
    fn test_export_into_missing_directory_fails() {
        let month: ReportMonth = "2025-11".parse().unwrap();
        let result = export_report(&seed_board(), month, Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(crate::error::BoardError::WriteReport { .. })));
    }
}
