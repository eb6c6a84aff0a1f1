use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::cmd::Commands;

/// Terminal kanban board for staff tasks.
/// Starts from built-in sample data or a JSON fixture passed via --seed; nothing is saved.
#[derive(Parser)]
#[command(name = "taskboard", version, about = "Task kanban board with monthly CSV reports")]
pub struct Cli {
    /// Read-only JSON fixture with `tasks` and optional `staff`.
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today.
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Staff id acting as creator and comment author (default: $USER).
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Append board-view logs to this file; filter with TASKBOARD_LOG.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Status;

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "taskboard", "list", "--status", "blocked", "--today", "2025-11-16", "--user", "EMP001",
        ])
        .unwrap();
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2025, 11, 16));
        assert_eq!(cli.user.as_deref(), Some("EMP001"));
        match cli.command {
            Commands::List { status, .. } => assert_eq!(status, Some(Status::Blocked)),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_rejects_bad_today() {
        assert!(Cli::try_parse_from(["taskboard", "--today", "16/11/2025", "stats"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
