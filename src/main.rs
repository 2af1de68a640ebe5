//! # tasktrack - Task Tracker
//!
//! A small single-user task tracker with a CSV backing file, a command line
//! for scripting and a terminal dashboard for day-to-day use.
//!
//! ## Key Features
//!
//! - **Flat CSV storage**: one row per task under the header `Task,Status,Priority,Expiry`,
//!   readable and editable in any spreadsheet
//! - **Live dashboard**: task list, a status bar chart and a completion progress gauge
//!   that update after every change
//! - **Scriptable CLI**: add, list, complete and delete from the shell
//! - **Legacy files**: older task files with a `Name` column, no `Priority` column or an
//!   extra `ID` column still load
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the dashboard on ./tasks.csv
//! tasktrack
//!
//! # Add a task from the shell
//! tasktrack add "Pay bills" --priority high --expiry 2024-01-01
//!
//! # List tasks with their positions, then complete the first one
//! tasktrack list
//! tasktrack complete 1
//! ```
//!
//! The task file defaults to `tasks.csv` in the current directory. Use `--file`
//! or `TASKTRACK_FILE` to point elsewhere, and `--log-file` or `TASKTRACK_LOG`
//! to capture logs (filtered by `RUST_LOG`).

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod db;
pub mod error;
pub mod fields;
pub mod logging;
pub mod state;
pub mod task;
pub mod view;
pub mod tui {
    pub mod colors;
    pub mod app;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use logging::LogTarget;

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Ui);

    // The dashboard owns the terminal, so it only logs to a file.
    let target = match (&cli.log_file, &command) {
        (Some(path), _) => LogTarget::File(path),
        (None, Commands::Ui) => LogTarget::Off,
        (None, _) => LogTarget::Stderr,
    };
    let _log_guard = logging::init(target);

    let path = cli.file.as_path();
    match command {
        Commands::Ui => cmd_ui(path),

        Commands::Add { name, priority, expiry } => cmd_add(path, name, priority, expiry),

        Commands::List { status, json } => cmd_list(path, status, json),

        Commands::Complete { position } => cmd_complete(path, position),

        Commands::Delete { position } => cmd_delete(path, position),

        Commands::Stats => cmd_stats(path),

        Commands::Completions { shell } => cmd_completions(shell),
    }
}
