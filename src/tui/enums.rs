//! Enumerations for TUI state management.

/// Which screen or overlay currently receives key input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ViewMode {
    Board,
    Detail,
    Form,
    Prompt(PromptKind),
    FilterBar,
    ConfirmDelete,
}

/// Single-line prompts shown in the status area.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PromptKind {
    Search,
    Comment,
    Subtask,
    ExportMonth,
}

impl PromptKind {
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::Search => "Search title/assignee",
            PromptKind::Comment => "Comment",
            PromptKind::Subtask => "New subtask",
            PromptKind::ExportMonth => "Export month (YYYY-MM)",
        }
    }
}

/// The facets the filter bar cycles through.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FilterFacet {
    Department,
    Staff,
    Project,
    Status,
}

impl FilterFacet {
    pub const ALL: [FilterFacet; 4] = [
        FilterFacet::Department,
        FilterFacet::Staff,
        FilterFacet::Project,
        FilterFacet::Status,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterFacet::Department => "Department",
            FilterFacet::Staff => "Staff",
            FilterFacet::Project => "Project",
            FilterFacet::Status => "Status",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let i = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
