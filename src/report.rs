//! Monthly CSV task reports.
//!
//! A report is a snapshot of every task created in one calendar month,
//! serialized as a short title block followed by a CSV table.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::error::{BoardError, Result};
use crate::task::Task;

/// Media type of a generated report.
pub const CSV_MIME: &str = "text/csv;charset=utf-8";

/// Column header row of the report table.
pub const COLUMNS: [&str; 11] = [
    "Task ID",
    "Title",
    "Assigned To (id)",
    "Assigned By",
    "Department",
    "Project",
    "Priority",
    "Status",
    "Progress",
    "Due Date",
    "Created At",
];

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September", "October",
    "November", "December",
];

/// A `YYYY-MM` report selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportMonth {
    year: i32,
    month: u32,
}

impl ReportMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(BoardError::InvalidMonth(format!("{year:04}-{month:02}")));
        }
        Ok(ReportMonth { year, month })
    }

    /// The month containing a given date.
    pub fn of(date: NaiveDate) -> Self {
        ReportMonth { year: date.year(), month: date.month() }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Human label, e.g. `November 2025`.
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for ReportMonth {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || BoardError::InvalidMonth(s.to_string());
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if y.len() != 4 || m.len() != 2 || !digits(y) || !digits(m) {
            return Err(invalid());
        }
        let year = y.parse::<i32>().map_err(|_| invalid())?;
        let month = m.parse::<u32>().map_err(|_| invalid())?;
        ReportMonth::new(year, month).map_err(|_| invalid())
    }
}

/// A rendered report ready to be saved.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskReport {
    pub month: ReportMonth,
    pub rows: usize,
    pub body: String,
}

impl TaskReport {
    /// Render the report for every task created in `month`, in collection order.
    pub fn build(tasks: &[Task], month: ReportMonth) -> Self {
        let selected: Vec<&Task> = tasks.iter().filter(|t| month.contains(t.created_at)).collect();

        let mut body = String::new();
        body.push_str("Task Report\n");
        body.push_str(&format!("Month: {}\n", month.label()));
        body.push('\n');
        body.push_str(&COLUMNS.join(","));
        body.push('\n');

        for task in &selected {
            let fields = [
                task.id.to_string(),
                task.title.clone(),
                task.assigned_to.clone(),
                task.assigned_by_name.clone(),
                task.department.clone().unwrap_or_default(),
                task.project.clone().unwrap_or_default(),
                task.priority.to_string(),
                task.status.to_string(),
                task.progress.to_string(),
                task.due_date.to_string(),
                task.created_at.to_string(),
            ];
            let row: Vec<String> = fields.iter().map(|f| escape_csv(f)).collect();
            body.push_str(&row.join(","));
            body.push('\n');
        }

        TaskReport { month, rows: selected.len(), body }
    }

    /// `task-report-<YYYY-MM>.csv`
    pub fn file_name(&self) -> String {
        format!("task-report-{}.csv", self.month)
    }

    pub fn mime_type(&self) -> &'static str {
        CSV_MIME
    }

    /// Write the report into `dir`, returning the path written.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        fs::write(&path, self.body.as_bytes()).map_err(|source| BoardError::WriteReport {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), rows = self.rows, mime = CSV_MIME, "wrote task report");
        Ok(path)
    }
}

/// Quote a field per RFC 4180 when it holds a delimiter, quote or line break.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_tasks;

    fn data_rows(body: &str) -> Vec<&str> {
        body.lines().skip(4).collect()
    }

    #[test]
    fn test_parse_month_selector() {
        let m: ReportMonth = "2025-11".parse().unwrap();
        assert_eq!(m.to_string(), "2025-11");
        assert_eq!(m.label(), "November 2025");
        for bad in ["2025-13", "2025-1", "25-11", "2025/11", "november", "", "+025-11", "-025-11", "2025-+1"] {
            assert!(bad.parse::<ReportMonth>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_november_report_matches_creation_month() {
        let tasks = seed_tasks();
        let report = TaskReport::build(&tasks, "2025-11".parse().unwrap());

        assert_eq!(report.file_name(), "task-report-2025-11.csv");
        assert_eq!(report.mime_type(), "text/csv;charset=utf-8");
        assert_eq!(report.rows, 5);

        let lines: Vec<&str> = report.body.lines().collect();
        assert_eq!(lines[0], "Task Report");
        assert_eq!(lines[1], "Month: November 2025");
        assert_eq!(
            lines[3],
            "Task ID,Title,Assigned To (id),Assigned By,Department,Project,Priority,Status,Progress,Due Date,Created At"
        );
        let ids: Vec<&str> = data_rows(&report.body)
            .iter()
            .map(|row| row.split(',').next().unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "2", "4", "5", "6"]);
        assert_eq!(
            data_rows(&report.body)[3],
            "5,Database schema migration,EMP002,Admin User,Engineering,Attendance System,high,blocked,20,2025-11-15,2025-11-04"
        );
    }

    #[test]
    fn test_month_without_tasks_has_header_only() {
        let report = TaskReport::build(&seed_tasks(), "2024-02".parse().unwrap());
        assert_eq!(report.rows, 0);
        assert!(data_rows(&report.body).is_empty());
    }

    #[test]
    fn test_free_text_fields_are_quoted() {
        let mut tasks = seed_tasks();
        tasks[0].title = "Review \"Q4\" goals, part 1".to_string();
        let report = TaskReport::build(&tasks, "2025-11".parse().unwrap());
        assert!(data_rows(&report.body)[0].starts_with("1,\"Review \"\"Q4\"\" goals, part 1\",EMP004"));
    }

    #[test]
    fn test_write_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let report = TaskReport::build(&seed_tasks(), "2025-10".parse().unwrap());
        let path = report.write_to(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "task-report-2025-10.csv");
        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written, report.body);
        assert_eq!(report.rows, 1);
    }
}
