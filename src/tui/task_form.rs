//! Task form handling for the terminal user interface.
//!
//! This module provides the `TaskForm` structure used by both the create and
//! the edit dialogs, including field ordering and conversion of the entered
//! values into a `TaskDraft` or `TaskPatch`.

use chrono::NaiveDate;

use crate::{
    board::parse_date_input,
    error::{BoardError, Result},
    fields::Priority,
    task::{Task, TaskDraft, TaskPatch},
    tui::input::InputField,
};

/// Field order of the create form.
pub const TITLE_ORDER: usize = 0;
pub const DESCRIPTION_ORDER: usize = 1;
pub const ASSIGNEE_ORDER: usize = 2;
pub const DUE_ORDER: usize = 3;
pub const PRIORITY_ORDER: usize = 4;
pub const DEPARTMENT_ORDER: usize = 5;
pub const PROJECT_ORDER: usize = 6;
pub const TAGS_ORDER: usize = 7;
/// Only shown when editing.
pub const PROGRESS_ORDER: usize = 8;

/// Which dialog the form backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Create,
    Edit,
}

/// Task form for creating or editing a task.
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub kind: FormKind,
    pub title: InputField,
    pub description: InputField,
    pub due: InputField,
    pub department: InputField,
    pub project: InputField,
    pub tags: InputField,
    pub progress: InputField,
    /// Index into `assignees`.
    pub assignee: usize,
    /// Index into `Priority::ALL`.
    pub priority: usize,
    pub current_field: usize,
    /// (staff id, display name) choices for the assignee selector.
    pub assignees: Vec<(String, String)>,
}

impl TaskForm {
    /// An empty create form offering the given assignees.
    pub fn new(assignees: Vec<(String, String)>) -> Self {
        Self {
            kind: FormKind::Create,
            title: InputField::new(),
            description: InputField::new(),
            due: InputField::new(),
            department: InputField::new(),
            project: InputField::new(),
            tags: InputField::new(),
            progress: InputField::new(),
            assignee: 0,
            priority: Priority::ALL.iter().position(|&p| p == Priority::Medium).unwrap_or(0),
            current_field: TITLE_ORDER,
            assignees,
        }
    }

    /// An edit form populated from an existing task.
    pub fn from_task(task: &Task) -> Self {
        let mut form = Self::new(vec![(task.assigned_to.clone(), task.assigned_to_name.clone())]);
        form.kind = FormKind::Edit;
        form.title = InputField::with_value(&task.title);
        form.description = InputField::with_value(task.description.as_deref().unwrap_or_default());
        form.due = InputField::with_value(&task.due_date.to_string());
        form.progress = InputField::with_value(&task.progress.to_string());
        form.priority = Priority::ALL.iter().position(|&p| p == task.priority).unwrap_or(1);
        form
    }

    /// Field orders visited by Tab, in visual order.
    pub fn field_orders(&self) -> &'static [usize] {
        match self.kind {
            FormKind::Create => &[
                TITLE_ORDER,
                DESCRIPTION_ORDER,
                ASSIGNEE_ORDER,
                DUE_ORDER,
                PRIORITY_ORDER,
                DEPARTMENT_ORDER,
                PROJECT_ORDER,
                TAGS_ORDER,
            ],
            FormKind::Edit => &[TITLE_ORDER, DESCRIPTION_ORDER, DUE_ORDER, PRIORITY_ORDER, PROGRESS_ORDER],
        }
    }

    pub fn next_field(&mut self) {
        let orders = self.field_orders();
        let pos = orders.iter().position(|&o| o == self.current_field).unwrap_or(0);
        self.current_field = orders[(pos + 1) % orders.len()];
    }

    pub fn previous_field(&mut self) {
        let orders = self.field_orders();
        let pos = orders.iter().position(|&o| o == self.current_field).unwrap_or(0);
        self.current_field = orders[(pos + orders.len() - 1) % orders.len()];
    }

    /// Whether the focused field is a selector rather than free text.
    pub fn on_selector(&self) -> bool {
        matches!(self.current_field, ASSIGNEE_ORDER | PRIORITY_ORDER)
    }

    /// Step the focused selector forwards or backwards.
    pub fn cycle_selector(&mut self, forward: bool) {
        let step = |current: usize, len: usize| {
            if len == 0 {
                0
            } else if forward {
                (current + 1) % len
            } else {
                (current + len - 1) % len
            }
        };
        match self.current_field {
            ASSIGNEE_ORDER => self.assignee = step(self.assignee, self.assignees.len()),
            PRIORITY_ORDER => self.priority = step(self.priority, Priority::ALL.len()),
            _ => {}
        }
    }

    /// The focused text field, if the focus is on one.
    pub fn current_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_ORDER => Some(&mut self.title),
            DESCRIPTION_ORDER => Some(&mut self.description),
            DUE_ORDER => Some(&mut self.due),
            DEPARTMENT_ORDER => Some(&mut self.department),
            PROJECT_ORDER => Some(&mut self.project),
            TAGS_ORDER => Some(&mut self.tags),
            PROGRESS_ORDER => Some(&mut self.progress),
            _ => None,
        }
    }

    pub fn selected_priority(&self) -> Priority {
        Priority::ALL.get(self.priority).copied().unwrap_or_default()
    }

    /// Display text of the assignee selector.
    pub fn assignee_label(&self) -> String {
        match self.assignees.get(self.assignee) {
            Some((id, name)) => format!("{name} ({id})"),
            None => "-".to_string(),
        }
    }

    fn optional(field: &InputField) -> Option<String> {
        let v = field.value.trim();
        (!v.is_empty()).then(|| v.to_string())
    }

    fn due_date(&self, today: NaiveDate) -> Result<Option<NaiveDate>> {
        let raw = self.due.value.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        parse_date_input(raw, today)
            .map(Some)
            .ok_or_else(|| BoardError::InvalidDate(raw.to_string()))
    }

    /// Collect the create form into a draft. Required-field checks happen on the board.
    pub fn to_draft(&self, today: NaiveDate) -> Result<TaskDraft> {
        Ok(TaskDraft {
            title: self.title.value.clone(),
            description: Self::optional(&self.description),
            assigned_to: self.assignees.get(self.assignee).map(|(id, _)| id.clone()).unwrap_or_default(),
            due_date: self.due_date(today)?,
            priority: self.selected_priority(),
            department: Self::optional(&self.department),
            project: Self::optional(&self.project),
            tags: vec![self.tags.value.clone()],
        })
    }

    /// Collect the edit form into a patch.
    pub fn to_patch(&self, today: NaiveDate) -> Result<TaskPatch> {
        let due_date = self.due_date(today)?.ok_or(BoardError::MissingField("due date"))?;
        let raw = self.progress.value.trim();
        let progress = if raw.is_empty() {
            None
        } else {
            // Values past 100 are clamped by the board; negatives and text are rejected.
            let parsed = raw
                .trim_end_matches('%')
                .parse::<u32>()
                .map_err(|_| BoardError::InvalidProgress(raw.to_string()))?;
            Some(parsed.min(100) as u8)
        };
        Ok(TaskPatch {
            title: Some(self.title.value.clone()),
            priority: Some(self.selected_priority()),
            due_date: Some(due_date),
            progress,
            description: Some(Self::optional(&self.description)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_tasks;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 10).unwrap()
    }

    #[test]
    fn test_tab_order_wraps() {
        let mut form = TaskForm::new(vec![]);
        for _ in 0..form.field_orders().len() {
            form.next_field();
        }
        assert_eq!(form.current_field, TITLE_ORDER);
        form.previous_field();
        assert_eq!(form.current_field, TAGS_ORDER);
    }

    #[test]
    fn test_draft_from_create_form() {
        let mut form = TaskForm::new(vec![
            ("EMP001".into(), "Sarah Johnson".into()),
            ("EMP002".into(), "Michael Chen".into()),
        ]);
        form.title = InputField::with_value("Plan offsite");
        form.due = InputField::with_value("in 3d");
        form.current_field = ASSIGNEE_ORDER;
        form.cycle_selector(true);
        form.tags = InputField::with_value("Events, team");

        let draft = form.to_draft(today()).unwrap();
        assert_eq!(draft.assigned_to, "EMP002");
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2025, 11, 13));
        assert_eq!(draft.priority, Priority::Medium);
        assert_eq!(draft.department, None);
    }

    #[test]
    fn test_unparseable_due_date_is_reported() {
        let mut form = TaskForm::new(vec![]);
        form.due = InputField::with_value("whenever");
        assert!(matches!(form.to_draft(today()), Err(BoardError::InvalidDate(_))));
    }

    #[test]
    fn test_patch_from_edit_form() {
        let task = &seed_tasks()[4];
        let mut form = TaskForm::from_task(task);
        assert_eq!(form.kind, FormKind::Edit);
        assert_eq!(form.selected_priority(), Priority::High);

        form.progress = InputField::with_value("140");
        let patch = form.to_patch(today()).unwrap();
        assert_eq!(patch.progress, Some(100));
        assert_eq!(patch.due_date, Some(task.due_date));
        assert_eq!(patch.title.as_deref(), Some("Database schema migration"));

        form.progress = InputField::with_value("-3");
        let err = form.to_patch(today()).unwrap_err();
        assert!(matches!(err, BoardError::InvalidProgress(ref v) if v == "-3"));
        assert_eq!(err.to_string(), "invalid progress '-3', expected a whole number from 0 to 100");

        form.progress = InputField::with_value("lots");
        assert!(matches!(form.to_patch(today()), Err(BoardError::InvalidProgress(_))));
    }
}
