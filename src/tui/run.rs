//! Board TUI entry point and setup.

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::info;

use crate::board::Board;
use crate::config::AppConfig;
use crate::tui::board_view::BoardApp;

/// Initialise and run the board terminal user interface.
/// Returns the board as it was when the user quit.
pub fn run_board_tui(board: Board, config: AppConfig) -> io::Result<Board> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(tasks = board.len(), "starting board view");
    let mut app = BoardApp::new(board, config);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    Ok(app.into_board())
}
