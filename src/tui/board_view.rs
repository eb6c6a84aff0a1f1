//! Kanban board interface.
//!
//! This module implements the board view: tasks are organised into one
//! column per status lane, cards are moved between lanes by grabbing and
//! dropping them, and overlays provide the create/edit form, a detail panel
//! with comments and subtasks, the filter bar and report export.

use std::io;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use crate::board::{format_comment_age, format_due_relative, truncate, Board, DropTarget};
use crate::config::AppConfig;
use crate::error::BoardError;
use crate::fields::*;
use crate::filter::{self, facet, TaskFilter};
use crate::report::{ReportMonth, TaskReport};
use crate::staff::resolve_name;
use crate::stats::{average_progress, lane_counts, BoardStats};
use crate::task::{Task, TaskId};
use crate::tui::colors::{lane_color, priority_color, GOLD};
use crate::tui::enums::{FilterFacet, PromptKind, ViewMode};
use crate::tui::input::InputField;
use crate::tui::task_form::{FormKind, TaskForm, ASSIGNEE_ORDER, DESCRIPTION_ORDER, DEPARTMENT_ORDER,
    DUE_ORDER, PRIORITY_ORDER, PROGRESS_ORDER, PROJECT_ORDER, TAGS_ORDER, TITLE_ORDER};

const LANES: usize = 4;
const CARD_HEIGHT: usize = 6;

/// Main board application state
pub struct BoardApp {
    board: Board,
    config: AppConfig,
    mode: ViewMode,
    filter: TaskFilter,
    selected_lane: usize,
    selected_card: usize,
    lane_scroll_offsets: [usize; LANES],
    /// Card currently picked up for a drag.
    grabbed: Option<TaskId>,
    /// Task shown in the detail panel or targeted by edit/delete.
    focused: Option<TaskId>,
    form: Option<TaskForm>,
    prompt: InputField,
    detail_subtask: usize,
    filter_facet: FilterFacet,
    status_message: String,
    should_quit: bool,

    // Visible task ids per lane, after filtering
    columns: [Vec<TaskId>; LANES],
}

impl BoardApp {
    /// Create a new BoardApp over an in-memory board
    pub fn new(board: Board, config: AppConfig) -> Self {
        let mut app = BoardApp {
            board,
            config,
            mode: ViewMode::Board,
            filter: TaskFilter::default(),
            selected_lane: 0,
            selected_card: 0,
            lane_scroll_offsets: [0; LANES],
            grabbed: None,
            focused: None,
            form: None,
            prompt: InputField::new(),
            detail_subtask: 0,
            filter_facet: FilterFacet::Department,
            status_message: String::new(),
            should_quit: false,
            columns: Default::default(),
        };
        app.update_columns();
        app
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Visible task ids of one lane.
    pub fn lane_ids(&self, status: Status) -> &[TaskId] {
        &self.columns[status.index()]
    }

    /// Rebuild the lane columns from the board and the active filter
    fn update_columns(&mut self) {
        for column in self.columns.iter_mut() {
            column.clear();
        }
        for task in self.filter.apply(self.board.tasks()) {
            self.columns[task.status.index()].push(task.id.clone());
        }
        self.clamp_selection();
    }

    /// Ensure selected lane and card indices are valid
    fn clamp_selection(&mut self) {
        if self.selected_lane >= LANES {
            self.selected_lane = 0;
        }
        let len = self.columns[self.selected_lane].len();
        if len == 0 {
            self.selected_card = 0;
            self.lane_scroll_offsets[self.selected_lane] = 0;
        } else if self.selected_card >= len {
            self.selected_card = len - 1;
        }
    }

    /// Point the selection at a task if it is visible
    fn select_task(&mut self, id: &TaskId) {
        for (lane, column) in self.columns.iter().enumerate() {
            if let Some(pos) = column.iter().position(|t| t == id) {
                self.selected_lane = lane;
                self.selected_card = pos;
                return;
            }
        }
        self.clamp_selection();
    }

    fn selected_task_id(&self) -> Option<TaskId> {
        self.columns[self.selected_lane].get(self.selected_card).cloned()
    }

    fn selected_lane_status(&self) -> Status {
        Status::from_index(self.selected_lane).unwrap_or_default()
    }

    fn focused_task(&self) -> Option<&Task> {
        self.focused.as_ref().and_then(|id| self.board.get(id))
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    fn report_error(&mut self, error: BoardError) {
        debug!(%error, "board operation rejected");
        self.set_status_message(format!("Error: {error}"));
    }

    /// Dispatch a key press to the handler of the current mode
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.mode {
            ViewMode::Board if self.grabbed.is_some() => self.handle_drag_key(key),
            ViewMode::Board => self.handle_board_key(key),
            ViewMode::Detail => self.handle_detail_key(key),
            ViewMode::Form => self.handle_form_key(key),
            ViewMode::Prompt(kind) => self.handle_prompt_key(kind, key),
            ViewMode::FilterBar => self.handle_filter_key(key),
            ViewMode::ConfirmDelete => self.handle_confirm_key(key),
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        self.clear_status_message();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,

            // Card movement between lanes (check first, before regular navigation)
            KeyCode::Left if ctrl => self.move_card(false),
            KeyCode::Right if ctrl => self.move_card(true),

            KeyCode::Left => {
                if self.selected_lane > 0 {
                    self.selected_lane -= 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Right => {
                if self.selected_lane < LANES - 1 {
                    self.selected_lane += 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Up => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Down => {
                let len = self.columns[self.selected_lane].len();
                if len > 0 && self.selected_card < len - 1 {
                    self.selected_card += 1;
                }
            }

            // Pick up the card for a drag
            KeyCode::Char(' ') => {
                if let Some(id) = self.selected_task_id() {
                    self.set_status_message(format!(
                        "Dragging #{id}: ←/→ choose lane, Space/Enter drop, Esc cancel"
                    ));
                    self.grabbed = Some(id);
                }
            }

            KeyCode::Enter => {
                if let Some(id) = self.selected_task_id() {
                    self.focused = Some(id);
                    self.detail_subtask = 0;
                    self.mode = ViewMode::Detail;
                }
            }

            KeyCode::Char('n') => self.open_create_form(),
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_task_id() {
                    self.open_edit_form(id);
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(id) = self.selected_task_id() {
                    self.focused = Some(id);
                    self.mode = ViewMode::ConfirmDelete;
                }
            }

            KeyCode::Char('/') => {
                self.prompt = InputField::with_value(self.filter.search.as_deref().unwrap_or_default());
                self.mode = ViewMode::Prompt(PromptKind::Search);
            }
            KeyCode::Char('f') => self.mode = ViewMode::FilterBar,
            KeyCode::Char('F') => {
                self.filter = TaskFilter::default();
                self.update_columns();
                self.set_status_message("Filters cleared");
            }
            KeyCode::Char('r') => {
                let month = ReportMonth::of(self.config.today());
                self.prompt = InputField::with_value(&month.to_string());
                self.mode = ViewMode::Prompt(PromptKind::ExportMonth);
            }

            KeyCode::Char('h') | KeyCode::Char('?') => {
                self.set_status_message(
                    "Help: Space: Drag | Enter: Details | n: New | e: Edit | x: Delete | /: Search | f: Filters | F: Clear | r: Report | q: Quit",
                );
            }
            _ => {}
        }
    }

    /// Keys while a card is picked up: only lane choice, drop and cancel apply
    fn handle_drag_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => {
                self.selected_lane = self.selected_lane.saturating_sub(1);
                self.clamp_selection();
            }
            KeyCode::Right => {
                if self.selected_lane < LANES - 1 {
                    self.selected_lane += 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.drop_grabbed(),
            KeyCode::Esc => {
                self.grabbed = None;
                self.set_status_message("Drag cancelled");
            }
            _ => {}
        }
    }

    /// Release the grabbed card on the selected lane
    fn drop_grabbed(&mut self) {
        let Some(id) = self.grabbed.take() else {
            return;
        };
        let lane = self.selected_lane_status();
        match self.board.on_drop(&id, lane) {
            Ok(()) => {
                self.update_columns();
                self.select_task(&id);
                self.set_status_message(format!("Moved #{id} to {}", lane.lane_title()));
            }
            Err(e) => self.report_error(e),
        }
    }

    /// Move the selected card one lane left or right
    fn move_card(&mut self, forward: bool) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let target = if forward {
            self.selected_lane + 1
        } else {
            match self.selected_lane.checked_sub(1) {
                Some(lane) => lane,
                None => return,
            }
        };
        if Status::from_index(target).is_none() {
            return;
        }
        self.grabbed = Some(id);
        self.selected_lane = target;
        self.drop_grabbed();
    }

    fn open_create_form(&mut self) {
        let staff = self.board.staff();
        let mut assignees: Vec<(String, String)> =
            staff.iter().map(|m| (m.id.clone(), m.name.clone())).collect();
        for id in filter::assignees(self.board.tasks()) {
            if !assignees.iter().any(|(known, _)| *known == id) {
                let name = self
                    .board
                    .tasks()
                    .iter()
                    .find(|t| t.assigned_to == id)
                    .map(|t| t.assigned_to_name.clone())
                    .unwrap_or_else(|| id.clone());
                assignees.push((id, name));
            }
        }
        self.form = Some(TaskForm::new(assignees));
        self.mode = ViewMode::Form;
        self.set_status_message("New task: Tab next field | ←/→ change selection | Enter save | Esc cancel");
    }

    fn open_edit_form(&mut self, id: TaskId) {
        if let Some(task) = self.board.get(&id) {
            self.form = Some(TaskForm::from_task(task));
            self.focused = Some(id);
            self.mode = ViewMode::Form;
            self.set_status_message("Edit task: Tab next field | Enter save | Esc cancel");
        }
    }

    fn close_form(&mut self) {
        self.form = None;
        self.mode = ViewMode::Board;
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            self.mode = ViewMode::Board;
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.close_form();
                self.set_status_message("Cancelled");
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Left if form.on_selector() => form.cycle_selector(false),
            KeyCode::Right if form.on_selector() => form.cycle_selector(true),
            KeyCode::Left => {
                if let Some(input) = form.current_input() {
                    input.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if let Some(input) = form.current_input() {
                    input.move_cursor_right();
                }
            }
            KeyCode::Backspace => {
                if let Some(input) = form.current_input() {
                    input.handle_backspace();
                }
            }
            KeyCode::Delete => {
                if let Some(input) = form.current_input() {
                    input.handle_delete();
                }
            }
            KeyCode::Char(' ') if form.on_selector() => form.cycle_selector(true),
            KeyCode::Char(c) => {
                if let Some(input) = form.current_input() {
                    input.handle_char(c);
                }
            }
            _ => {}
        }
    }

    /// Validate and apply the open form; on failure the form stays open untouched
    fn submit_form(&mut self) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        let kind = form.kind;
        let today = self.config.today();
        let outcome = match kind {
            FormKind::Create => form.to_draft(today).and_then(|draft| {
                self.board
                    .create(draft, &self.config.user, self.config.now())
            }),
            FormKind::Edit => {
                let Some(id) = self.focused.clone() else {
                    return;
                };
                form.to_patch(today)
                    .and_then(|patch| self.board.update(&id, patch))
                    .map(|()| id)
            }
        };
        match outcome {
            Ok(id) => {
                let verb = if kind == FormKind::Create { "Created" } else { "Updated" };
                self.close_form();
                self.update_columns();
                self.select_task(&id);
                self.set_status_message(format!("{verb} task #{id}"));
            }
            Err(e) => self.report_error(e),
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        let Some(task) = self.focused_task() else {
            self.mode = ViewMode::Board;
            return;
        };
        let id = task.id.clone();
        let status = task.status;
        let subtask_count = task.subtasks.len();
        let subtask_id = task.subtasks.get(self.detail_subtask).map(|s| s.id.clone());

        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                self.mode = ViewMode::Board;
                self.clear_status_message();
            }
            // Status select: same semantics as dropping on a lane
            KeyCode::Char('s') | KeyCode::Char('S') => {
                let step = if key.code == KeyCode::Char('s') { 1 } else { LANES - 1 };
                let next = Status::from_index((status.index() + step) % LANES).unwrap_or_default();
                match self.board.set_status(&id, next) {
                    Ok(()) => {
                        self.update_columns();
                        self.select_task(&id);
                        self.set_status_message(format!("Status set to {}", next.lane_title()));
                    }
                    Err(e) => self.report_error(e),
                }
            }
            KeyCode::Up => self.detail_subtask = self.detail_subtask.saturating_sub(1),
            KeyCode::Down => {
                if self.detail_subtask + 1 < subtask_count {
                    self.detail_subtask += 1;
                }
            }
            KeyCode::Char(' ') => {
                if let Some(sub) = subtask_id {
                    if let Err(e) = self.board.toggle_subtask(&id, &sub) {
                        self.report_error(e);
                    }
                }
            }
            KeyCode::Char('c') => {
                self.prompt.clear();
                self.clear_status_message();
                self.mode = ViewMode::Prompt(PromptKind::Comment);
            }
            KeyCode::Char('a') => {
                self.prompt.clear();
                self.clear_status_message();
                self.mode = ViewMode::Prompt(PromptKind::Subtask);
            }
            KeyCode::Char('e') => self.open_edit_form(id),
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, kind: PromptKind, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.prompt.clear();
                match kind {
                    PromptKind::Search => {
                        self.filter.search = None;
                        self.update_columns();
                        self.mode = ViewMode::Board;
                    }
                    PromptKind::Comment | PromptKind::Subtask => self.mode = ViewMode::Detail,
                    PromptKind::ExportMonth => self.mode = ViewMode::Board,
                }
            }
            KeyCode::Enter => self.submit_prompt(kind),
            KeyCode::Backspace => {
                self.prompt.handle_backspace();
                if kind == PromptKind::Search {
                    self.apply_search();
                }
            }
            KeyCode::Left => self.prompt.move_cursor_left(),
            KeyCode::Right => self.prompt.move_cursor_right(),
            KeyCode::Char(c) => {
                self.prompt.handle_char(c);
                if kind == PromptKind::Search {
                    self.apply_search();
                }
            }
            _ => {}
        }
    }

    fn apply_search(&mut self) {
        self.filter.search = facet(Some(&self.prompt.value));
        self.update_columns();
    }

    fn submit_prompt(&mut self, kind: PromptKind) {
        match kind {
            PromptKind::Search => {
                self.mode = ViewMode::Board;
                let shown: usize = self.columns.iter().map(Vec::len).sum();
                self.set_status_message(format!("{} ({shown} tasks shown)", self.filter.describe()));
            }
            PromptKind::Comment => {
                let Some(id) = self.focused.clone() else {
                    self.mode = ViewMode::Board;
                    return;
                };
                let author = resolve_name(self.board.staff(), &self.config.user);
                match self.board.add_comment(&id, &author, &self.prompt.value, self.config.now()) {
                    Ok(()) => {
                        self.prompt.clear();
                        self.mode = ViewMode::Detail;
                        self.set_status_message("Comment added");
                    }
                    Err(e) => self.report_error(e),
                }
            }
            PromptKind::Subtask => {
                let Some(id) = self.focused.clone() else {
                    self.mode = ViewMode::Board;
                    return;
                };
                match self.board.add_subtask(&id, &self.prompt.value) {
                    Ok(_) => {
                        self.prompt.clear();
                        self.mode = ViewMode::Detail;
                        self.set_status_message("Subtask added");
                    }
                    Err(e) => self.report_error(e),
                }
            }
            PromptKind::ExportMonth => {
                let result = self.prompt.value.parse::<ReportMonth>().and_then(|month| {
                    let report = TaskReport::build(self.board.tasks(), month);
                    report.write_to(&self.config.report_dir).map(|path| (report.rows, path))
                });
                match result {
                    Ok((rows, path)) => {
                        self.prompt.clear();
                        self.mode = ViewMode::Board;
                        self.set_status_message(format!("Exported {rows} task(s) to {}", path.display()));
                    }
                    Err(e) => self.report_error(e),
                }
            }
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('f') => {
                self.mode = ViewMode::Board;
                let shown: usize = self.columns.iter().map(Vec::len).sum();
                self.set_status_message(format!("{} ({shown} tasks shown)", self.filter.describe()));
            }
            KeyCode::Tab | KeyCode::Down => self.filter_facet = self.filter_facet.next(),
            KeyCode::BackTab | KeyCode::Up => self.filter_facet = self.filter_facet.previous(),
            KeyCode::Right => self.cycle_facet_value(true),
            KeyCode::Left => self.cycle_facet_value(false),
            KeyCode::Backspace => {
                match self.filter_facet {
                    FilterFacet::Department => self.filter.department = None,
                    FilterFacet::Staff => self.filter.assigned_to = None,
                    FilterFacet::Project => self.filter.project = None,
                    FilterFacet::Status => self.filter.status = None,
                }
                self.update_columns();
            }
            _ => {}
        }
    }

    /// Step the focused facet through "all" followed by every value present
    fn cycle_facet_value(&mut self, forward: bool) {
        fn step<T: PartialEq + Clone>(options: &[T], current: &Option<T>, forward: bool) -> Option<T> {
            // Position 0 is "all"
            let len = options.len() + 1;
            let pos = match current {
                Some(v) => options.iter().position(|o| o == v).map(|p| p + 1).unwrap_or(0),
                None => 0,
            };
            let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
            if next == 0 { None } else { Some(options[next - 1].clone()) }
        }

        let tasks = self.board.tasks();
        match self.filter_facet {
            FilterFacet::Department => {
                self.filter.department = step(&filter::departments(tasks), &self.filter.department, forward)
            }
            FilterFacet::Staff => {
                self.filter.assigned_to = step(&filter::assignees(tasks), &self.filter.assigned_to, forward)
            }
            FilterFacet::Project => {
                self.filter.project = step(&filter::projects(tasks), &self.filter.project, forward)
            }
            FilterFacet::Status => self.filter.status = step(&Status::ALL, &self.filter.status, forward),
        }
        self.update_columns();
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(id) = self.focused.take() {
                    match self.board.delete(&id) {
                        Ok(task) => self.set_status_message(format!("Deleted #{id} {}", task.title)),
                        Err(e) => self.report_error(e),
                    }
                }
                self.update_columns();
                self.mode = ViewMode::Board;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.mode = ViewMode::Board;
                self.set_status_message("Delete cancelled");
            }
            _ => {}
        }
    }

    /// Render the whole board with any open overlay
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Summary cards
                Constraint::Length(3), // Lane chart
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_summary(f, chunks[0]);
        self.render_chart(f, chunks[1]);
        self.render_board(f, chunks[2]);
        self.render_status_bar(f, chunks[3]);

        match self.mode {
            ViewMode::Detail | ViewMode::Prompt(PromptKind::Comment) | ViewMode::Prompt(PromptKind::Subtask) => {
                self.render_task_detail_popup(f)
            }
            ViewMode::Form => self.render_form_popup(f),
            ViewMode::FilterBar => self.render_filter_popup(f),
            ViewMode::ConfirmDelete => self.render_confirm_popup(f),
            _ => {}
        }
    }

    /// Render the summary cards, always computed from the unfiltered board
    fn render_summary(&self, f: &mut Frame, area: Rect) {
        let stats = BoardStats::compute(self.board.tasks(), self.config.today());
        let cards = [
            ("Active", stats.active, Color::Cyan),
            ("Pending", stats.pending, Color::White),
            ("Completed this month", stats.completed_this_month, Color::Green),
            ("Overdue", stats.overdue, Color::Red),
        ];
        let areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);
        for ((label, value, color), card_area) in cards.into_iter().zip(areas.iter()) {
            let text = vec![
                Line::from(Span::styled(
                    value.to_string(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(label),
            ];
            let card = Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center);
            f.render_widget(card, *card_area);
        }
    }

    /// Render one bar per lane
    fn render_chart(&self, f: &mut Frame, area: Rect) {
        let counts = lane_counts(self.board.tasks());
        let max = counts.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1);
        let bar_room = (area.width as usize / LANES).saturating_sub(18).max(1);

        let mut spans = Vec::new();
        for (status, count) in counts {
            let width = count * bar_room / max;
            spans.push(Span::raw(format!(" {:<11} ", status.lane_title())));
            spans.push(Span::styled("█".repeat(width), Style::default().fg(lane_color(status))));
            spans.push(Span::raw(format!(" {count}  ")));
        }
        let title = format!("Tasks by lane (avg progress {}%)", average_progress(self.board.tasks()));
        let chart = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(chart, area);
    }

    /// Render the kanban board
    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let lanes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, LANES as u32); LANES])
            .split(area);

        for (i, &lane_area) in lanes.iter().enumerate() {
            self.render_lane(f, lane_area, i);
        }
    }

    /// Render a single lane
    fn render_lane(&mut self, f: &mut Frame, area: Rect, lane_index: usize) {
        let status = Status::from_index(lane_index).unwrap_or_default();
        let is_selected = lane_index == self.selected_lane;
        let color = lane_color(status);

        let border_style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let mut title = format!("{} ({})", status.lane_title(), self.columns[lane_index].len());
        if is_selected && self.grabbed.is_some() {
            title.push_str(" ⇣ drop here");
        }

        let block = Block::default().borders(Borders::ALL).title(title).border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let cards = &self.columns[lane_index];
        if cards.is_empty() {
            return;
        }

        let available_height = inner.height as usize;
        let visible_cards = available_height / CARD_HEIGHT;

        // Keep the selected card in view
        let scroll_offset = if is_selected && self.grabbed.is_none() {
            let start_visible = self.lane_scroll_offsets[lane_index];
            let end_visible = start_visible + visible_cards;
            if self.selected_card < start_visible {
                self.lane_scroll_offsets[lane_index] = self.selected_card;
                self.selected_card
            } else if self.selected_card >= end_visible && end_visible > 0 {
                let new_offset = self.selected_card + 1 - visible_cards;
                self.lane_scroll_offsets[lane_index] = new_offset;
                new_offset
            } else {
                start_visible
            }
        } else {
            self.lane_scroll_offsets[lane_index].min(cards.len().saturating_sub(1))
        };

        let today = self.config.today();
        let mut current_y = 0;
        let mut rendered_cards = 0;

        for (card_index, task_id) in cards.iter().enumerate().skip(scroll_offset) {
            let Some(task) = self.board.get(task_id) else {
                continue;
            };
            if current_y + CARD_HEIGHT > available_height {
                break;
            }
            let is_this_card_selected = is_selected && card_index == self.selected_card && self.grabbed.is_none();
            let is_grabbed = self.grabbed.as_ref() == Some(task_id);
            let card_area = Rect {
                x: inner.x,
                y: inner.y + current_y as u16,
                width: inner.width,
                height: CARD_HEIGHT as u16,
            };
            render_card(f, card_area, task, today, is_this_card_selected, is_grabbed);
            current_y += CARD_HEIGHT;
            rendered_cards += 1;
        }

        if scroll_offset > 0 {
            let indicator = Paragraph::new(format!("▲ +{scroll_offset} above")).style(Style::default().fg(Color::Cyan));
            f.render_widget(indicator, Rect { x: inner.x, y: inner.y, width: inner.width, height: 1 });
        }
        let remaining = cards.len().saturating_sub(scroll_offset + rendered_cards);
        if remaining > 0 && inner.height > 0 {
            let indicator = Paragraph::new(format!("▼ +{remaining} below")).style(Style::default().fg(Color::Cyan));
            f.render_widget(
                indicator,
                Rect { x: inner.x, y: inner.y + inner.height - 1, width: inner.width, height: 1 },
            );
        }
    }

    /// Render the status bar
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = match self.mode {
            ViewMode::Prompt(kind) if !self.status_message.is_empty() => {
                format!("{}: {}▏ | {}", kind.label(), self.prompt.value, self.status_message)
            }
            ViewMode::Prompt(kind) => format!("{}: {}▏ | Enter confirm, Esc cancel", kind.label(), self.prompt.value),
            _ if !self.status_message.is_empty() => self.status_message.clone(),
            _ => {
                let shown: usize = self.columns.iter().map(Vec::len).sum();
                let filter = if self.filter.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", self.filter.describe())
                };
                format!(
                    "Tasks: {shown}/{}{filter} | Space: Drag | Enter: Details | n: New | /: Search | f: Filters | r: Report | h: Help",
                    self.board.len()
                )
            }
        };
        let color = lane_color(self.selected_lane_status());
        let status = Paragraph::new(text).style(Style::default().bg(color).fg(Color::White));
        f.render_widget(status, area);
    }

    /// Render the detail panel of the focused task
    fn render_task_detail_popup(&self, f: &mut Frame) {
        let Some(task) = self.focused_task() else {
            return;
        };
        let popup_area = centered_rect(f.area(), 80, 80);
        f.render_widget(Clear, popup_area);

        let today = self.config.today();
        let now = Utc::now();
        let (done, total) = task.subtask_progress();
        let mut lines = vec![
            Line::from(Span::styled(
                format!("Task #{}: {}", task.id, task.title),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw("Status:       "),
                Span::styled(task.status.lane_title(), Style::default().fg(lane_color(task.status))),
                Span::raw("   (s/S to change)"),
            ]),
            Line::from(vec![
                Span::raw("Priority:     "),
                Span::styled(task.priority.label(), Style::default().fg(priority_color(task.priority))),
            ]),
            Line::from(format!("Progress:     {}%", task.progress)),
            Line::from(format!("Due:          {} ({})", task.due_date, format_due_relative(task.due_date, today))),
            Line::from(format!("Assigned to:  {} ({})", task.assigned_to_name, task.assigned_to)),
            Line::from(format!("Assigned by:  {} on {}", task.assigned_by_name, task.assigned_timestamp)),
            Line::from(format!("Department:   {}", task.department.as_deref().unwrap_or("-"))),
            Line::from(format!("Project:      {}", task.project.as_deref().unwrap_or("-"))),
            Line::from(format!(
                "Tags:         {}",
                if task.tags.is_empty() { "-".to_string() } else { task.tags.join(", ") }
            )),
            Line::from(""),
            Line::from("Description:"),
            Line::from(task.description.as_deref().unwrap_or("-")),
            Line::from(""),
            Line::from(Span::styled(
                format!("Subtasks ({done}/{total})  [a: add, Space: toggle]"),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        for (i, sub) in task.subtasks.iter().enumerate() {
            let mark = if sub.completed { "[x]" } else { "[ ]" };
            let style = if i == self.detail_subtask {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(format!("  {mark} {}", sub.title), style)));
        }
        if !task.attachments.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Attachments", Style::default().add_modifier(Modifier::BOLD))));
            for attachment in &task.attachments {
                lines.push(Line::from(format!("  {} <{}>", attachment.name, attachment.url)));
            }
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Comments ({})  [c: add]", task.comments.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for comment in &task.comments {
            lines.push(Line::from(vec![
                Span::styled(format!("  ({}) ", comment.author_avatar), Style::default().fg(Color::Cyan)),
                Span::styled(comment.author.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(" · {}", format_comment_age(comment.posted_at, now))),
            ]));
            lines.push(Line::from(format!("    {}", comment.text)));
        }

        let popup = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Task Details (Esc to close, e: edit)")
                    .title_alignment(Alignment::Center)
                    .border_style(Style::default().fg(lane_color(task.status)).add_modifier(Modifier::BOLD)),
            )
            .wrap(Wrap { trim: false })
            .style(Style::default().bg(Color::Black));
        f.render_widget(popup, popup_area);
    }

    /// Render the create/edit form
    fn render_form_popup(&self, f: &mut Frame) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        let popup_area = centered_rect(f.area(), 60, 60);
        f.render_widget(Clear, popup_area);

        let row = |order: usize, label: &str, value: String, selector: bool| {
            let focused = form.current_field == order;
            let value = if selector { format!("◀ {value} ▶") } else { value };
            let style = if focused {
                Style::default().fg(Color::Black).bg(GOLD)
            } else {
                Style::default()
            };
            Line::from(vec![Span::raw(format!("{label:<13}")), Span::styled(value, style)])
        };

        let mut lines = Vec::new();
        for &order in form.field_orders() {
            let line = match order {
                TITLE_ORDER => row(order, "Title*", form.title.value.clone(), false),
                DESCRIPTION_ORDER => row(order, "Description", form.description.value.clone(), false),
                ASSIGNEE_ORDER => row(order, "Assign to*", form.assignee_label(), true),
                DUE_ORDER => row(order, "Due date*", form.due.value.clone(), false),
                PRIORITY_ORDER => row(order, "Priority", form.selected_priority().label().to_string(), true),
                DEPARTMENT_ORDER => row(order, "Department", form.department.value.clone(), false),
                PROJECT_ORDER => row(order, "Project", form.project.value.clone(), false),
                TAGS_ORDER => row(order, "Tags", form.tags.value.clone(), false),
                PROGRESS_ORDER => row(order, "Progress %", form.progress.value.clone(), false),
                _ => continue,
            };
            lines.push(line);
        }
        lines.push(Line::from(""));
        lines.push(Line::from("Due accepts YYYY-MM-DD, today, tomorrow, in 3d, in 2w"));

        let title = match form.kind {
            FormKind::Create => "Create Task",
            FormKind::Edit => "Edit Task",
        };
        let popup = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title).title_alignment(Alignment::Center))
            .style(Style::default().bg(Color::Black));
        f.render_widget(popup, popup_area);
    }

    /// Render the filter bar
    fn render_filter_popup(&self, f: &mut Frame) {
        let popup_area = centered_rect(f.area(), 50, 30);
        f.render_widget(Clear, popup_area);

        let status = self.filter.status.map(|s| s.lane_title().to_string());
        let lines: Vec<Line> = FilterFacet::ALL
            .iter()
            .map(|&facet| {
                let value = match facet {
                    FilterFacet::Department => self.filter.department.clone(),
                    FilterFacet::Staff => self
                        .filter
                        .assigned_to
                        .as_ref()
                        .map(|id| format!("{} ({id})", resolve_name(self.board.staff(), id))),
                    FilterFacet::Project => self.filter.project.clone(),
                    FilterFacet::Status => status.clone(),
                };
                let style = if facet == self.filter_facet {
                    Style::default().fg(Color::Black).bg(GOLD)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::raw(format!("{:<12}", facet.label())),
                    Span::styled(format!("◀ {} ▶", value.unwrap_or_else(|| "All".to_string())), style),
                ])
            })
            .collect();

        let popup = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Filters (↑/↓ facet, ←/→ value, Backspace reset, Enter close)"),
            )
            .style(Style::default().bg(Color::Black));
        f.render_widget(popup, popup_area);
    }

    fn render_confirm_popup(&self, f: &mut Frame) {
        let Some(task) = self.focused_task() else {
            return;
        };
        let popup_area = centered_rect(f.area(), 40, 20);
        f.render_widget(Clear, popup_area);
        let text = vec![
            Line::from(format!("Delete task #{}?", task.id)),
            Line::from(truncate(&task.title, popup_area.width.saturating_sub(4) as usize)),
            Line::from(""),
            Line::from("y: delete   n: cancel"),
        ];
        let popup = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Confirm").border_style(Style::default().fg(Color::Red)))
            .alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black));
        f.render_widget(popup, popup_area);
    }

    /// Main event loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
            if self.should_quit {
                break;
            }
        }
        Ok(())
    }
}

/// Render a single task card
fn render_card(f: &mut Frame, area: Rect, task: &Task, today: chrono::NaiveDate, is_selected: bool, is_grabbed: bool) {
    let style = if is_grabbed {
        Style::default().bg(GOLD).fg(Color::Black).add_modifier(Modifier::BOLD)
    } else if is_selected {
        Style::default().bg(lane_color(task.status)).fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray)
    };

    let width = area.width.saturating_sub(2) as usize;
    let mut header = vec![
        Span::raw(format!("#{} ", task.id)),
        Span::styled(task.priority.label(), Style::default().fg(priority_color(task.priority))),
    ];
    if is_grabbed {
        header.push(Span::raw(" [dragging]"));
    }

    let due = format_due_relative(task.due_date, today);
    let due_span = if task.is_overdue(today) {
        Span::styled(format!("⚠ {due}"), Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else {
        Span::raw(due)
    };

    let card_text = vec![
        Line::from(header),
        Line::from(truncate(&task.title, width)),
        Line::from(truncate(&task.assigned_to_name, width)),
        Line::from(vec![Span::raw(format!("{}% | ", task.progress)), due_span]),
    ];

    let card = Paragraph::new(card_text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(card, area);
}

/// A rectangle centred in `area` taking the given percentages of it
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let scale = |len: u16, percent: u16| (u32::from(len) * u32::from(percent.min(100)) / 100) as u16;
    let width = scale(area.width, percent_x);
    let height = scale(area.height, percent_y);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;

    use crate::seed::seed_board;

    fn app() -> BoardApp {
        let config = AppConfig {
            user: "ADM001".to_string(),
            today: NaiveDate::from_ymd_opt(2025, 11, 16),
            ..AppConfig::default()
        };
        BoardApp::new(seed_board(), config)
    }

    fn press(app: &mut BoardApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut BoardApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(app: &mut BoardApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn ids(app: &BoardApp, status: Status) -> Vec<&str> {
        app.lane_ids(status).iter().map(TaskId::as_str).collect()
    }

    #[test]
    fn test_lanes_follow_status() {
        let app = app();
        assert_eq!(ids(&app, Status::Todo), vec!["2", "6"]);
        assert_eq!(ids(&app, Status::InProgress), vec!["1", "4"]);
        assert_eq!(ids(&app, Status::Blocked), vec!["5"]);
        assert_eq!(ids(&app, Status::Completed), vec!["3"]);
    }

    #[test]
    fn test_drag_blocked_task_to_in_progress() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Char(' '));

        assert!(ids(&app, Status::Blocked).is_empty());
        assert_eq!(ids(&app, Status::InProgress), vec!["1", "4", "5"]);
        let task = app.board().get(&TaskId::from("5")).unwrap();
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.progress, 20);
        assert_eq!(app.status_message(), "Moved #5 to In Progress");
    }

    #[test]
    fn test_drop_on_completed_sets_full_progress() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        for _ in 0..3 {
            press(&mut app, KeyCode::Right);
        }
        press(&mut app, KeyCode::Enter);
        let task = app.board().get(&TaskId::from("2")).unwrap();
        assert_eq!(task.status, Status::Completed);
        assert_eq!(task.progress, 100);
    }

    #[test]
    fn test_cancelled_drag_changes_nothing() {
        let mut app = app();
        let before = app.board().tasks().to_vec();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.board().tasks(), before.as_slice());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_ctrl_arrow_moves_card_one_lane() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::CONTROL));
        assert_eq!(app.board().get(&TaskId::from("2")).unwrap().status, Status::InProgress);
        app.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL));
        assert_eq!(app.board().get(&TaskId::from("2")).unwrap().status, Status::Todo);
    }

    #[test]
    fn test_create_form_adds_todo_task() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode(), ViewMode::Form);
        type_text(&mut app, "Plan team offsite");
        press(&mut app, KeyCode::Tab); // description
        press(&mut app, KeyCode::Tab); // assignee, first staff member
        press(&mut app, KeyCode::Tab); // due
        type_text(&mut app, "2025-12-01");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode(), ViewMode::Board);
        assert_eq!(app.board().len(), 7);
        let task = app.board().get(&TaskId::from("7")).unwrap();
        assert_eq!(task.title, "Plan team offsite");
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.progress, 0);
        assert_eq!(task.assigned_to, "EMP001");
        assert_eq!(task.assigned_by_name, "Admin User");
        assert_eq!(ids(&app, Status::Todo), vec!["2", "6", "7"]);
    }

    #[test]
    fn test_create_form_keeps_draft_on_validation_error() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "No due date");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode(), ViewMode::Form);
        assert_eq!(app.board().len(), 6);
        assert_eq!(app.status_message(), "Error: due date is required");
        assert_eq!(app.form.as_ref().unwrap().title.value, "No due date");
    }

    #[test]
    fn test_edit_form_updates_progress() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        for _ in 0..4 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.form.as_ref().unwrap().current_field, PROGRESS_ORDER);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "35");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.board().get(&TaskId::from("2")).unwrap().progress, 35);
    }

    #[test]
    fn test_detail_panel_comments_and_status_select() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode(), ViewMode::Detail);

        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.status_message(), "Error: comment text cannot be empty");
        assert_eq!(app.board().get(&TaskId::from("1")).unwrap().comments.len(), 1);

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "Wireframes approved");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode(), ViewMode::Detail);
        let comments = &app.board().get(&TaskId::from("1")).unwrap().comments;
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1].text, "Wireframes approved");
        assert_eq!(comments[1].author, "Admin User");

        // in-progress -> blocked -> completed
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('s'));
        let task = app.board().get(&TaskId::from("1")).unwrap();
        assert_eq!(task.status, Status::Completed);
        assert_eq!(task.progress, 100);
    }

    #[test]
    fn test_detail_panel_toggles_subtasks() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.board().get(&TaskId::from("5")).unwrap().subtask_progress(), (2, 3));

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Rollback plan");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.board().get(&TaskId::from("5")).unwrap().subtask_progress(), (2, 4));
    }

    #[test]
    fn test_search_prompt_filters_lanes_live() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "michael");
        assert_eq!(ids(&app, Status::Blocked), vec!["5"]);
        assert!(ids(&app, Status::Todo).is_empty());
        press(&mut app, KeyCode::Esc);
        assert_eq!(ids(&app, Status::Todo), vec!["2", "6"]);
    }

    #[test]
    fn test_filter_bar_cycles_facets() {
        let mut app = app();
        press(&mut app, KeyCode::Char('f'));
        // Department: all -> Design -> Engineering
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.filter.department.as_deref(), Some("Engineering"));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        // Status: all -> todo -> in-progress
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        assert_eq!(ids(&app, Status::InProgress), vec!["4"]);
        assert!(ids(&app, Status::Blocked).is_empty());

        press(&mut app, KeyCode::Char('F'));
        assert_eq!(ids(&app, Status::Blocked), vec!["5"]);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.board().len(), 6);

        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.board().len(), 5);
        assert!(app.board().get(&TaskId::from("2")).is_none());
        assert_eq!(ids(&app, Status::Todo), vec!["6"]);
    }

    #[test]
    fn test_export_prompt_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.config.report_dir = dir.path().to_path_buf();
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.prompt.value, "2025-11");
        press(&mut app, KeyCode::Enter);
        assert!(dir.path().join("task-report-2025-11.csv").exists());
        assert!(app.status_message().starts_with("Exported 5 task(s)"));
    }

    #[test]
    fn test_render_shows_lanes_and_cards() {
        let mut app = app();
        let text = screen(&mut app);
        for expected in ["To Do (2)", "In Progress (2)", "Blocked (1)", "Completed (1)", "#5", "Overdue"] {
            assert!(text.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_prompt_errors_are_drawn_in_status_bar() {
        let mut app = app();
        press(&mut app, KeyCode::Char('r'));
        for _ in 0.."2025-11".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "2025-13");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode(), ViewMode::Prompt(PromptKind::ExportMonth));
        let text = screen(&mut app);
        let status_line = text.lines().last().unwrap();
        assert!(status_line.contains("2025-13"), "{status_line}");
        assert!(status_line.contains("invalid report month"), "{status_line}");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Enter);
        let text = screen(&mut app);
        assert!(text.lines().last().unwrap().contains("comment text cannot be empty"));
    }

    #[test]
    fn test_far_future_due_date_is_a_form_error() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "X");
        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        type_text(&mut app, "in 999999999d");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode(), ViewMode::Form);
        assert_eq!(app.board().len(), 6);
        assert!(app.status_message().starts_with("Error: invalid date 'in 999999999d'"));
    }

    #[test]
    fn test_centered_rect_on_very_wide_area() {
        let area = Rect { x: 0, y: 0, width: 1000, height: 300 };
        let rect = centered_rect(area, 80, 80);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (100, 30, 800, 240));
    }
}
