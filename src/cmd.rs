//! Command implementations for the CLI interface.
//!
//! Each subcommand maps onto the same `Action` dispatch the interactive
//! screen uses. Positions on the command line are 1-based, matching the
//! numbers printed by `list`.

use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::db::{CsvStore, TaskStore};
use crate::error::{Error, Result};
use crate::fields::*;
use crate::state::{Action, AppState, Notice, NoticeLevel};
use crate::task::Task;
use crate::tui::run::run_tui;
use crate::view::*;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive dashboard.
    Ui,

    /// Add a new pending task.
    Add {
        /// Task name.
        name: String,
        /// Priority: low | medium | high.
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        /// Expiry date, expected as YYYY-MM-DD.
        #[arg(long)]
        expiry: String,
    },

    /// List tasks with their positions.
    List {
        /// Only show tasks with this status.
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Print the tasks as a JSON array.
        #[arg(long)]
        json: bool,
    },

    /// Mark the task at a position (and every task sharing its name) completed.
    Complete {
        /// 1-based position as shown by `list`.
        position: usize,
    },

    /// Delete the task at a position.
    Delete {
        /// 1-based position as shown by `list`.
        position: usize,
    },

    /// Show per-status counts and overall progress.
    Stats,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Open the store at `path` or exit with an error.
fn open_state(path: &Path) -> AppState<CsvStore> {
    match AppState::new(CsvStore::new(path)) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to load {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

/// Convert a 1-based command line position into a table index.
fn to_index(position: usize) -> Option<usize> {
    position.checked_sub(1)
}

/// Dispatch an action and report the outcome on stdout/stderr.
fn dispatch<S: TaskStore>(state: &mut AppState<S>, action: Action) {
    report(state.update(action));
}

/// Apply a positional action for a 1-based `position`. A position outside the
/// table is reported as typed, not as the 0-based index.
fn apply_at<S: TaskStore>(
    state: &mut AppState<S>,
    position: usize,
    action: fn(Option<usize>) -> Action,
) -> Result<Option<Notice>> {
    let index = to_index(position).ok_or(Error::NoSuchTask(position))?;
    state.update(action(Some(index))).map_err(|e| match e {
        Error::NoSuchTask(_) => Error::NoSuchTask(position),
        other => other,
    })
}

fn report(result: Result<Option<Notice>>) {
    match result {
        Ok(Some(notice)) => println!("{}", notice.message),
        Ok(None) => {}
        Err(e) => {
            let notice = Notice::from_error(&e);
            let prefix = match notice.level {
                NoticeLevel::Error => "Error",
                _ => "Warning",
            };
            eprintln!("{}: {}", prefix, notice.message);
            std::process::exit(1);
        }
    }
}

/// Launch the terminal user interface.
pub fn cmd_ui(path: &Path) {
    if let Err(e) = run_tui(path) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Add a new task to the backing file.
pub fn cmd_add(path: &Path, name: String, priority: Priority, expiry: String) {
    let mut state = open_state(path);
    dispatch(&mut state, Action::Add { name: name.clone(), priority, expiry });
    println!("Added task '{}' ({}) at position {}", name.trim(), priority, state.tasks().len());
}

/// Print the task table or a JSON dump.
pub fn cmd_list(path: &Path, status: Option<Status>, json: bool) {
    let state = open_state(path);
    let tasks: Vec<(usize, &Task)> = state
        .tasks()
        .iter()
        .enumerate()
        .filter(|(_, t)| status.map_or(true, |s| t.status == s))
        .collect();

    if json {
        let only: Vec<&Task> = tasks.iter().map(|(_, t)| *t).collect();
        match serde_json::to_string_pretty(&only) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Failed to encode tasks: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }
    print!("{}", format_table(&tasks, Local::now().date_naive()));
}

/// Render numbered rows for `list`. Positions are 1-based.
pub fn format_table(tasks: &[(usize, &Task)], today: NaiveDate) -> String {
    let mut out = format!(
        "{:<4} {:<10} {:<7} {:<12} {}\n",
        "#", "Status", "Pri", "Expiry", "Task"
    );
    for (idx, t) in tasks {
        out.push_str(&format!(
            "{:<4} {:<10} {:<7} {:<12} {}\n",
            idx + 1,
            format_status(t.status),
            format_priority(t.priority),
            truncate(&format_expiry_relative(&t.expiry, today), 12),
            t.name
        ));
    }
    out
}

/// Mark the task at `position` completed.
pub fn cmd_complete(path: &Path, position: usize) {
    let mut state = open_state(path);
    report(apply_at(&mut state, position, Action::Complete));
}

/// Delete the task at `position`.
pub fn cmd_delete(path: &Path, position: usize) {
    let mut state = open_state(path);
    report(apply_at(&mut state, position, Action::Delete));
}

/// Print status counts and progress.
pub fn cmd_stats(path: &Path) {
    let state = open_state(path);
    print!("{}", format_stats(state.tasks(), Local::now().date_naive()));
}

pub fn format_stats(tasks: &[Task], today: NaiveDate) -> String {
    let mut out = format!("{:<12} {}\n", "Status", "Count");
    for (status, count) in status_counts(tasks) {
        out.push_str(&format!("{:<12} {}\n", format_status(status), count));
    }
    let overdue = overdue_count(tasks, today);
    if overdue > 0 {
        out.push_str(&format!("{:<12} {}\n", "Overdue", overdue));
    }
    out.push_str(&Progress::of(tasks).label());
    out.push('\n');
    out
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn test_to_index_is_one_based() {
        assert_eq!(to_index(1), Some(0));
        assert_eq!(to_index(0), None);
    }

    #[test]
    fn test_out_of_range_position_is_reported_one_based() {
        let store = MemoryStore {
            tasks: vec![Task::new("Only", Priority::Medium, "2024-01-01")],
            saves: 0,
        };
        let mut state = AppState::new(store).unwrap();

        let err = apply_at(&mut state, 5, Action::Complete).unwrap_err();
        assert_eq!(err.to_string(), "No task at position 5.");
        let err = apply_at(&mut state, 2, Action::Delete).unwrap_err();
        assert_eq!(err.to_string(), "No task at position 2.");
        let err = apply_at(&mut state, 0, Action::Delete).unwrap_err();
        assert_eq!(err.to_string(), "No task at position 0.");
        assert_eq!(state.tasks().len(), 1);

        let notice = apply_at(&mut state, 1, Action::Complete).unwrap().unwrap();
        assert_eq!(notice.message, "Task 'Only' has been marked as completed.");
        assert_eq!(state.tasks()[0].status, Status::Completed);
    }

    #[test]
    fn test_format_table_numbers_rows_from_one() {
        let a = Task::new("Pay bills", Priority::High, "2024-01-11");
        let b = Task::new("Someday", Priority::Low, "");
        let out = format_table(&[(0, &a), (4, &b)], today());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1 "));
        assert!(lines[1].contains("tomorrow"));
        assert!(lines[1].ends_with("Pay bills"));
        assert!(lines[2].starts_with("5 "));
        assert!(lines[2].contains(" - "));
    }

    #[test]
    fn test_format_stats() {
        let mut done = Task::new("Done", Priority::Medium, "2024-01-01");
        done.status = Status::Completed;
        let tasks = vec![done, Task::new("Late", Priority::High, "2024-01-01")];
        let out = format_stats(&tasks, today());

        assert!(out.contains("Pending"));
        assert!(out.contains("Completed"));
        assert!(out.contains("Overdue      1"));
        assert!(out.ends_with("Progress: 1/2 tasks completed (50%)\n"));
    }
}
