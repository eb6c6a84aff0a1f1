//! # taskboard - Task Kanban Board
//!
//! A terminal kanban board for staff tasks with a companion command-line
//! interface for listings, statistics and monthly CSV reports.
//!
//! ## Key Features
//!
//! - **Four Lanes**: To Do, In Progress, Blocked and Completed; any card may move to any lane
//! - **Drag and Drop**: pick a card up with Space, carry it across lanes, drop it with Enter
//! - **Task Detail**: subtasks with a completion tally, attachments and a comment thread
//! - **Filters**: free-text search plus department, staff, project and status facets
//! - **Summary Cards**: active, pending, completed this month and overdue counts
//! - **Reports**: per-month CSV export of every task created in that month
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the board on the built-in sample data
//! taskboard board
//!
//! # Pin the date so overdue checks are reproducible
//! taskboard --today 2025-11-16 stats
//!
//! # Print blocked engineering tasks
//! taskboard list --department Engineering --status blocked
//!
//! # Write task-report-2025-11.csv into ./reports
//! taskboard export --month 2025-11 --output-dir reports
//! ```
//!
//! The task collection lives in memory only. `--seed` loads a JSON fixture
//! as the starting point; nothing is written back.

use clap::Parser;

pub mod board;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod fields;
pub mod filter;
pub mod logging;
pub mod report;
pub mod seed;
pub mod staff;
pub mod stats;
pub mod task;
pub mod tui {
    pub mod board_view;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
}

use cli::Cli;
use cmd::*;
use config::{default_user, AppConfig};
use logging::{init_tracing, LogTarget};
use report::ReportMonth;

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Board => init_tracing(LogTarget::File(cli.log_file.as_deref())),
        _ => init_tracing(LogTarget::Stderr),
    }

    // Completions need no board
    if let Commands::Completions { shell } = cli.command {
        cmd_completions(shell);
        return;
    }

    let config = AppConfig {
        user: cli.user.unwrap_or_else(default_user),
        today: cli.today,
        seed: cli.seed,
        ..AppConfig::default()
    };

    let board = match config.load_board() {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Failed to load board: {e}");
            std::process::exit(1);
        }
    };
    let today = config.today();

    match cli.command {
        Commands::Board => cmd_board(board, config),

        Commands::List { search, department, staff, project, status, limit } =>
            cmd_list(&board, list_filter(search, department, staff, project, status), limit, today),

        Commands::View { id } => cmd_view(&board, id, today),

        Commands::Stats => cmd_stats(&board, today),

        Commands::Export { month, output_dir } => {
            let month = month.unwrap_or_else(|| ReportMonth::of(today));
            let dir = output_dir.unwrap_or_else(|| config.report_dir.clone());
            cmd_export(&board, month, &dir);
        }

        Commands::Completions { .. } => unreachable!("completions handled above"),
    }
}
