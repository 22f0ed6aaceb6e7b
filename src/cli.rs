//! Command-line interface argument parsing for runlog-tui.
//!
//! - `runlog-tui show --file runs.txt`
//! - `runlog-tui show --no-confirm`
//! - `runlog-tui stats runs.txt --json`

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Environment variable naming the data file opened by `show`
pub const FILE_ENV_VAR: &str = "RUNLOG_FILE";

/// A Terminal User Interface for logging daily running distances.
#[derive(Parser, Debug)]
#[command(name = "runlog-tui")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the TUI to log, browse and chart runs
    Show {
        /// Data file to open at startup (`<day>;<distance>` per line)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Replace the current list on open without asking first
        #[arg(long)]
        no_confirm: bool,

        /// Where to write the log file.
        /// Defaults to <cache dir>/runlog-tui/runlog-tui.log
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Print summary statistics for a data file
    Stats {
        /// Data file to summarize
        file: PathBuf,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// File opened at startup and offered as the default save target
    pub file: Option<PathBuf>,
    /// Ask before an import replaces a non-empty list
    pub confirm_overwrite: bool,
    pub log_path: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from the `show` command's arguments
    pub fn from_show_command(
        file: Option<PathBuf>,
        no_confirm: bool,
        log_file: Option<PathBuf>,
    ) -> Self {
        let file = file.or_else(|| std::env::var_os(FILE_ENV_VAR).map(PathBuf::from));

        AppConfig {
            file,
            confirm_overwrite: !no_confirm,
            log_path: log_file.unwrap_or_else(default_log_path),
        }
    }
}

/// Default log location under the platform cache directory
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("runlog-tui")
        .join("runlog-tui.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_on_by_default() {
        let config = AppConfig::from_show_command(Some(PathBuf::from("runs.txt")), false, None);
        assert!(config.confirm_overwrite);
        assert_eq!(config.file, Some(PathBuf::from("runs.txt")));
        assert!(config.log_path.ends_with("runlog-tui.log"));
    }

    #[test]
    fn test_no_confirm_and_custom_log() {
        let config = AppConfig::from_show_command(
            Some(PathBuf::from("a.txt")),
            true,
            Some(PathBuf::from("/tmp/x.log")),
        );
        assert!(!config.confirm_overwrite);
        assert_eq!(config.log_path, PathBuf::from("/tmp/x.log"));
    }

    #[test]
    fn test_parse_stats_command() {
        let cli = Cli::try_parse_from(["runlog-tui", "stats", "runs.txt", "--json"]).unwrap();
        match cli.command {
            Commands::Stats { file, json } => {
                assert_eq!(file, PathBuf::from("runs.txt"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
