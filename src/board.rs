//! Board state and the operations that mutate it.
//!
//! This module provides the `Board` struct, the in-memory owner of every
//! task, together with the transition functions invoked by the board view
//! (create, edit, drag-and-drop, delete, comments, subtasks) and the small
//! parsing/formatting helpers shared by the CLI and the TUI.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{BoardError, Result};
use crate::fields::*;
use crate::staff::{initials, resolve_name, StaffMember};
use crate::task::{Comment, Subtask, Task, TaskDraft, TaskId, TaskPatch};

/// Receiver of drag-and-drop events.
///
/// A drop carries the dragged card's id and the lane it was released on.
/// Whatever delivers the event (keyboard emulation, mouse, a test) only
/// needs this one method.
pub trait DropTarget {
    fn on_drop(&mut self, dragged: &TaskId, lane: Status) -> Result<()>;
}

/// Serialized shape of a board fixture.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
}

/// In-memory collection of tasks, kept in creation order.
#[derive(Debug, Default, Clone)]
pub struct Board {
    tasks: Vec<Task>,
    staff: Vec<StaffMember>,
}

impl Board {
    /// Build a board from tasks already known to have unique ids.
    pub fn from_parts(tasks: Vec<Task>, staff: Vec<StaffMember>) -> Self {
        Board { tasks, staff }
    }

    /// Build a board from a snapshot, rejecting duplicate task ids.
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Result<Self> {
        let mut seen = HashSet::new();
        for task in &snapshot.tasks {
            if !seen.insert(task.id.clone()) {
                return Err(BoardError::DuplicateId(task.id.clone()));
            }
        }
        let mut tasks = snapshot.tasks;
        for task in tasks.iter_mut() {
            task.progress = clamp_progress(task.progress);
        }
        Ok(Board { tasks, staff: snapshot.staff })
    }

    /// Load a read-only JSON fixture.
    pub fn load(path: &Path) -> Result<Self> {
        let buf = fs::read_to_string(path).map_err(|source| BoardError::ReadSeed {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: BoardSnapshot = serde_json::from_str(&buf)?;
        let board = Board::from_snapshot(snapshot)?;
        info!(path = %path.display(), tasks = board.tasks.len(), "loaded board fixture");
        Ok(board)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn staff(&self) -> &[StaffMember] {
        &self.staff
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Generate the next available task ID.
    ///
    /// Ids are decimal strings one past the largest numeric id present. When
    /// that id is `u64::MAX`, the lowest unused decimal id is taken instead.
    pub fn next_id(&self) -> TaskId {
        let max = self
            .tasks
            .iter()
            .filter_map(|t| t.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        if let Some(next) = max.checked_add(1) {
            return TaskId::new(next.to_string());
        }
        let used: HashSet<&str> = self.tasks.iter().map(|t| t.id.as_str()).collect();
        // At most `len` ids are taken, so one of the first `len + 1` is free.
        let free = (1..=self.tasks.len() as u64 + 1)
            .find(|n| !used.contains(n.to_string().as_str()))
            .unwrap_or(0);
        TaskId::new(free.to_string())
    }

    /// Get a task by ID.
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    fn get_mut(&mut self, id: &TaskId) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| BoardError::NotFound(id.clone()))
    }

    /// Tasks currently in one lane, in collection order.
    pub fn lane(&self, status: Status) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.status == status)
    }

    /// Validate a draft and append it as a new `todo` task.
    pub fn create(&mut self, draft: TaskDraft, creator: &str, now: DateTime<Local>) -> Result<TaskId> {
        let title = draft.title.trim();
        if title.is_empty() {
            warn!("rejected task without title");
            return Err(BoardError::MissingField("title"));
        }
        let assigned_to = draft.assigned_to.trim();
        if assigned_to.is_empty() {
            warn!("rejected task without assignee");
            return Err(BoardError::MissingField("assignee"));
        }
        let Some(due_date) = draft.due_date else {
            warn!("rejected task without due date");
            return Err(BoardError::MissingField("due date"));
        };

        let id = self.next_id();
        let task = Task {
            id: id.clone(),
            title: title.to_string(),
            description: non_empty(draft.description),
            assigned_to: assigned_to.to_string(),
            assigned_to_name: resolve_name(&self.staff, assigned_to),
            assigned_by: creator.to_string(),
            assigned_by_name: resolve_name(&self.staff, creator),
            assigned_timestamp: format_timestamp(now),
            created_at: now.date_naive(),
            priority: draft.priority,
            department: non_empty(draft.department),
            project: non_empty(draft.project),
            tags: split_and_normalise_tags(&draft.tags),
            due_date,
            status: Status::Todo,
            progress: 0,
            subtasks: Vec::new(),
            attachments: Vec::new(),
            comments: Vec::new(),
        };
        self.tasks.push(task);
        info!(task = %id, "created task");
        Ok(id)
    }

    /// Apply an edit-form patch to an existing task.
    pub fn update(&mut self, id: &TaskId, patch: TaskPatch) -> Result<()> {
        if let Some(title) = patch.title.as_deref() {
            if title.trim().is_empty() {
                warn!(task = %id, "rejected edit with empty title");
                return Err(BoardError::MissingField("title"));
            }
        }
        let task = self.get_mut(id)?;
        if let Some(title) = patch.title {
            task.title = title.trim().to_string();
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(due) = patch.due_date {
            task.due_date = due;
        }
        if let Some(progress) = patch.progress {
            task.progress = clamp_progress(progress);
        }
        if let Some(description) = patch.description {
            task.description = non_empty(description);
        }
        debug!(task = %id, "updated task");
        Ok(())
    }

    /// Remove a task permanently, returning it.
    pub fn delete(&mut self, id: &TaskId) -> Result<Task> {
        let Some(pos) = self.tasks.iter().position(|t| &t.id == id) else {
            warn!(task = %id, "delete of unknown task");
            return Err(BoardError::NotFound(id.clone()));
        };
        let removed = self.tasks.remove(pos);
        info!(task = %id, "deleted task");
        Ok(removed)
    }

    /// Move a task to another lane. Entering `completed` forces progress to 100.
    pub fn set_status(&mut self, id: &TaskId, status: Status) -> Result<()> {
        let task = self.get_mut(id)?;
        let from = task.status;
        task.status = status;
        if status == Status::Completed {
            task.progress = 100;
        }
        debug!(task = %id, %from, to = %status, progress = task.progress, "status transition");
        Ok(())
    }

    /// Append a comment to a task's discussion log.
    pub fn add_comment(&mut self, id: &TaskId, author: &str, text: &str, now: DateTime<Local>) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(BoardError::EmptyComment);
        }
        let task = self.get_mut(id)?;
        let comment = Comment {
            id: format!("c{}-{}", task.id, task.comments.len() + 1),
            author: author.to_string(),
            author_avatar: initials(author),
            text: text.to_string(),
            posted_at: now.with_timezone(&Utc),
        };
        task.comments.push(comment);
        debug!(task = %id, "added comment");
        Ok(())
    }

    /// Append an unchecked item to a task's checklist.
    pub fn add_subtask(&mut self, id: &TaskId, title: &str) -> Result<String> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BoardError::EmptySubtask);
        }
        let task = self.get_mut(id)?;
        let next = task
            .subtasks
            .iter()
            .filter_map(|s| s.id.rsplit('-').next()?.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        let subtask_id = format!("{}-{}", task.id, next);
        task.subtasks.push(Subtask {
            id: subtask_id.clone(),
            title: title.to_string(),
            completed: false,
        });
        Ok(subtask_id)
    }

    /// Flip a checklist item, returning its new state.
    pub fn toggle_subtask(&mut self, id: &TaskId, subtask_id: &str) -> Result<bool> {
        let task = self.get_mut(id)?;
        let Some(subtask) = task.subtasks.iter_mut().find(|s| s.id == subtask_id) else {
            return Err(BoardError::SubtaskNotFound {
                task: id.clone(),
                subtask: subtask_id.to_string(),
            });
        };
        subtask.completed = !subtask.completed;
        Ok(subtask.completed)
    }
}

impl DropTarget for Board {
    fn on_drop(&mut self, dragged: &TaskId, lane: Status) -> Result<()> {
        self.set_status(dragged, lane)
    }
}

/// Clamp a progress value to the 0-100 range.
pub fn clamp_progress(progress: u8) -> u8 {
    progress.min(100)
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Normalize a tag string by trimming, lowercasing, and replacing spaces with hyphens.
pub fn normalise_tag(s: &str) -> String {
    s.trim().to_lowercase().replace(' ', "-")
}

/// Split comma-separated tag strings and normalize each tag.
pub fn split_and_normalise_tags(inputs: &[String]) -> Vec<String> {
    let mut tags = Vec::new();
    for raw in inputs {
        for part in raw.split(',') {
            let tag = normalise_tag(part);
            if !tag.is_empty() {
                tags.push(tag);
            }
        }
    }
    tags.sort();
    tags.dedup();
    tags
}

/// Display form of a creation moment, e.g. `Nov 1, 2025 09:30 AM`.
pub fn format_timestamp(now: DateTime<Local>) -> String {
    now.format("%b %-d, %Y %I:%M %p").to_string()
}

/// Parse a human-readable date.
///
/// Supports "today", "tomorrow", "yesterday", "in 3d", "in 2w", and `YYYY-MM-DD`.
pub fn parse_date_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return today.succ_opt(),
        "yesterday" => return today.pred_opt(),
        _ => {}
    }
    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return today.checked_add_signed(Duration::try_days(days)?);
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return today.checked_add_signed(Duration::try_weeks(weeks)?);
            }
        }
    }
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: NaiveDate, today: NaiveDate) -> String {
    let delta = (due - today).num_days();
    if delta == 0 {
        "today".into()
    } else if delta == 1 {
        "tomorrow".into()
    } else if delta > 1 {
        format!("in {delta}d")
    } else {
        format!("{}d late", -delta)
    }
}

/// Relative age of a comment ("just now", "5m ago", "3h ago", "2d ago", or a date).
pub fn format_comment_age(posted_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now - posted_at;
    if age.num_minutes() < 1 {
        "just now".into()
    } else if age.num_hours() < 1 {
        format!("{}m ago", age.num_minutes())
    } else if age.num_days() < 1 {
        format!("{}h ago", age.num_hours())
    } else if age.num_days() < 7 {
        format!("{}d ago", age.num_days())
    } else {
        format!("{} {}, {}", month_abbrev(posted_at.month()), posted_at.day(), posted_at.year())
    }
}

fn month_abbrev(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
    MONTHS.get(month.saturating_sub(1) as usize).copied().unwrap_or("?")
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[&Task], today: NaiveDate) {
    println!(
        "{:<5} {:<12} {:<7} {:>4} {:<10} {:<18} {:<16} {}",
        "ID", "Status", "Pri", "Prog", "Due", "Assignee", "Project", "Title [tags]"
    );
    for t in tasks {
        let tags = if t.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", t.tags.join(","))
        };
        let due = format_due_relative(t.due_date, today);
        let project = t.project.clone().unwrap_or_else(|| "-".into());
        println!(
            "{:<5} {:<12} {:<7} {:>3}% {:<10} {:<18} {:<16} {}{}",
            truncate(t.id.as_str(), 5),
            t.status.as_str(),
            t.priority.label(),
            t.progress,
            due,
            truncate(&t.assigned_to_name, 18),
            truncate(&project, 16),
            t.title,
            tags
        );
    }
}
