//! runlog-tui: a terminal running log.
//!
//! Log daily distances, browse them in a table, save them to a plain text
//! file and chart them with summary statistics.

mod app;
mod cli;
mod data;
mod logging;
mod selection;
mod ui;

use anyhow::{Context, Result};
use cli::{AppConfig, Cli, Commands};
use data::{compute_stats, Storage};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Show {
            file,
            no_confirm,
            log_file,
        } => {
            let config = AppConfig::from_show_command(file, no_confirm, log_file);
            logging::init_file(&config.log_path)?;

            // Run the TUI application
            app::run(config)?;
        }
        Commands::Stats { file, json } => {
            logging::init_stderr()?;
            print_stats(&file, json)?;
        }
    }

    Ok(())
}

/// Print the summary of a data file without starting the TUI
fn print_stats(path: &std::path::Path, json: bool) -> Result<()> {
    let entries = Storage::load(path)?;
    let distances: Vec<f64> = entries.iter().map(|e| e.distance).collect();
    let stats = compute_stats(&distances);

    if json {
        let out = serde_json::to_string_pretty(&stats).context("Failed to serialize stats")?;
        println!("{out}");
    } else {
        println!("{} entries", entries.len());
        println!("{}", stats.summary_line());
    }
    Ok(())
}
