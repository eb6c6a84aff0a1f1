//! Runtime settings resolved from command-line flags and the environment.

use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate, TimeZone};

use crate::board::Board;
use crate::error::Result;
use crate::seed::seed_board;

/// Settings shared by every command and the board view.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Staff id (or name) recorded as creator and comment author.
    pub user: String,
    /// Replaces the system date for overdue checks, stats and new tasks.
    pub today: Option<NaiveDate>,
    /// Read-only JSON fixture to start from instead of the built-in data.
    pub seed: Option<PathBuf>,
    /// Directory that receives exported reports.
    pub report_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            user: default_user(),
            today: None,
            seed: None,
            report_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// The calendar date the board treats as "now".
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Current moment, moved onto the overridden date when one is set.
    pub fn now(&self) -> DateTime<Local> {
        let now = Local::now();
        match self.today {
            Some(day) => Local
                .from_local_datetime(&day.and_time(now.time()))
                .earliest()
                .unwrap_or(now),
            None => now,
        }
    }

    /// Build the starting board: the fixture when given, otherwise the seed data.
    pub fn load_board(&self) -> Result<Board> {
        match self.seed {
            Some(ref path) => Board::load(path),
            None => Ok(seed_board()),
        }
    }
}

/// Acting user from `$USER`, or `admin` when unset.
pub fn default_user() -> String {
    std::env::var("USER")
        .ok()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| "admin".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_today_override() {
        let day = NaiveDate::from_ymd_opt(2025, 11, 16).unwrap();
        let config = AppConfig { today: Some(day), ..AppConfig::default() };
        assert_eq!(config.today(), day);
        assert_eq!(config.now().date_naive(), day);
    }

    #[test]
    fn test_load_board_from_fixture() {
        let snapshot = crate::board::BoardSnapshot {
            tasks: crate::seed::seed_tasks().into_iter().take(2).collect(),
            staff: crate::seed::seed_staff(),
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&snapshot).unwrap().as_bytes()).unwrap();

        let config = AppConfig { seed: Some(file.path().to_path_buf()), ..AppConfig::default() };
        let board = config.load_board().unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board.staff().len(), 6);
    }

    #[test]
    fn test_missing_fixture_is_an_error() {
        let config = AppConfig {
            seed: Some(PathBuf::from("/definitely/not/here.json")),
            ..AppConfig::default()
        };
        assert!(matches!(config.load_board(), Err(crate::error::BoardError::ReadSeed { .. })));
    }
}
