//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::{Priority, Status};

// Lanes are branded so a card's column reads at a glance.

/// Used for the To Do lane
pub const SLATE: Color = Color::Rgb(100, 116, 139);
/// Used for the In Progress lane
pub const OCEAN: Color = Color::Rgb(37, 99, 235);
/// Used for the Blocked lane
pub const DARK_RED: Color = Color::Rgb(185, 28, 28);
/// Used for the Completed lane
pub const DARK_GREEN: Color = Color::Rgb(21, 128, 61);
/// Used for high priority markers and overdue dates
pub const GOLD: Color = Color::Rgb(255, 215, 0);

pub fn lane_color(status: Status) -> Color {
    match status {
        Status::Todo => SLATE,
        Status::InProgress => OCEAN,
        Status::Blocked => DARK_RED,
        Status::Completed => DARK_GREEN,
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Gray,
        Priority::Medium => Color::Cyan,
        Priority::High => GOLD,
    }
}
