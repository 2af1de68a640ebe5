//! Backing-file storage for task records.
//!
//! This module provides the `TaskStore` trait, the narrow load/save seam the
//! rest of the program talks to, and `CsvStore`, its implementation over a
//! flat CSV file with the header `Task,Status,Priority,Expiry`.
//!
//! Loading is lenient so that files written by older versions still open:
//! a `Name` header stands in for `Task`, a missing `Priority` column is
//! back-filled with `Medium`, and unknown columns (such as `ID`) are ignored.
//! Status values other than `Pending` and `Completed` load as `Pending` and
//! are written back that way on the next save.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::fields::*;
use crate::task::Task;

/// Column headers written to the backing file, in order.
pub const HEADER: [&str; 4] = ["Task", "Status", "Priority", "Expiry"];

/// Default backing file name, relative to the working directory.
pub const DEFAULT_FILE: &str = "tasks.csv";

/// Load/save access to the persisted task table.
pub trait TaskStore {
    /// Read every task in file order.
    fn load(&self) -> Result<Vec<Task>>;

    /// Replace the persisted table with `tasks`.
    fn save(&mut self, tasks: &[Task]) -> Result<()>;
}

/// Task store over a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a header-only file.
    fn create_empty(&self) -> Result<()> {
        debug!(path = %self.path.display(), "creating empty task file");
        write_tasks(&self.path, &[])
    }
}

impl TaskStore for CsvStore {
    fn load(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            self.create_empty()?;
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            self.create_empty()?;
            return Ok(Vec::new());
        }
        let tasks = parse_tasks(&data)?;
        debug!(path = %self.path.display(), rows = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    fn save(&mut self, tasks: &[Task]) -> Result<()> {
        write_tasks(&self.path, tasks)?;
        debug!(path = %self.path.display(), rows = tasks.len(), "saved tasks");
        Ok(())
    }
}

/// Column positions resolved from a header row.
struct Columns {
    name: usize,
    status: Option<usize>,
    priority: Option<usize>,
    expiry: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |wanted: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(wanted));
        let name = find("Task").or_else(|| find("Name")).ok_or(Error::MissingColumn("Task"))?;
        let priority = find("Priority");
        if priority.is_none() {
            warn!("task file has no Priority column, defaulting to Medium");
        }
        Ok(Columns {
            name,
            status: find("Status"),
            priority,
            expiry: find("Expiry"),
        })
    }
}

/// Parse the full contents of a backing file.
pub fn parse_tasks(data: &str) -> Result<Vec<Task>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_bytes());
    let columns = Columns::from_headers(reader.headers()?)?;

    let mut tasks = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");

        let name = cell(Some(columns.name)).to_string();
        let status_cell = cell(columns.status);
        let status = parse_status(status_cell).unwrap_or_else(|| {
            warn!(row, value = status_cell, "unrecognised status, loading as Pending");
            Status::Pending
        });
        let priority_cell = cell(columns.priority);
        let priority = match parse_priority(priority_cell) {
            Some(p) => p,
            None => {
                if columns.priority.is_some() {
                    warn!(row, value = priority_cell, "unrecognised priority, loading as Medium");
                }
                Priority::Medium
            }
        };
        let expiry = cell(columns.expiry).to_string();

        tasks.push(Task { name, status, priority, expiry });
    }
    Ok(tasks)
}

/// Write `tasks` to `path` via a temporary sibling file and a rename.
fn write_tasks(path: &Path, tasks: &[Task]) -> Result<()> {
    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = WriterBuilder::new().has_headers(false).from_path(&tmp)?;
        writer.write_record(HEADER)?;
        for task in tasks {
            writer.serialize(task)?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

/// In-memory store used by state and UI tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub tasks: Vec<Task>,
    pub saves: usize,
}

#[cfg(test)]
impl TaskStore for MemoryStore {
    fn load(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn save(&mut self, tasks: &[Task]) -> Result<()> {
        self.tasks = tasks.to_vec();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> CsvStore {
        CsvStore::new(dir.path().join("tasks.csv"))
    }

    #[test]
    fn test_missing_file_is_created_with_header() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let tasks = store.load().unwrap();
        assert!(tasks.is_empty());

        let written = fs::read_to_string(store.path()).unwrap();
        assert_eq!(written.trim_end(), "Task,Status,Priority,Expiry");
    }

    #[test]
    fn test_empty_file_is_recreated() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "").unwrap();

        assert!(store.load().unwrap().is_empty());
        assert!(fs::read_to_string(store.path()).unwrap().starts_with("Task,Status"));
    }

    #[test]
    fn test_whitespace_only_file_is_recreated() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "  \n\n").unwrap();

        assert!(store.load().unwrap().is_empty());
        let written = fs::read_to_string(store.path()).unwrap();
        assert_eq!(written.trim_end(), "Task,Status,Priority,Expiry");
    }

    #[test]
    fn test_save_then_load_preserves_order_and_fields() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let mut done = Task::new("Water plants", Priority::Low, "2024-03-02");
        done.status = Status::Completed;
        let tasks = vec![
            Task::new("Pay bills", Priority::High, "2024-01-01"),
            done,
            Task::new("Call \"Mum\", then Dad", Priority::Medium, "2024-02-14"),
        ];

        store.save(&tasks).unwrap();
        assert_eq!(store.load().unwrap(), tasks);
        assert!(!dir.path().join("tasks.csv.tmp").exists());
    }

    #[test]
    fn test_legacy_name_header_without_priority() {
        let data = "Name,Status,Expiry\nPay bills,Pending,2024-01-01\n";
        let tasks = parse_tasks(data).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Pay bills");
        assert_eq!(tasks[0].priority, Priority::Medium);
        assert_eq!(tasks[0].expiry, "2024-01-01");
    }

    #[test]
    fn test_id_column_and_missing_expiry_are_tolerated() {
        let data = "ID,Task,Status\n1,Buy milk,Completed\n2,Walk dog,Pending\n";
        let tasks = parse_tasks(data).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].status, Status::Completed);
        assert_eq!(tasks[1].name, "Walk dog");
        assert_eq!(tasks[1].expiry, "");
    }

    #[test]
    fn test_unknown_cells_fall_back_to_defaults() {
        let data = "Task,Status,Priority,Expiry\nThing,Blocked,Urgent,\n";
        let tasks = parse_tasks(data).unwrap();
        assert_eq!(tasks[0].status, Status::Pending);
        assert_eq!(tasks[0].priority, Priority::Medium);
    }

    #[test]
    fn test_file_without_task_column_is_rejected() {
        let err = parse_tasks("Status,Expiry\nPending,2024-01-01\n").unwrap_err();
        assert!(matches!(err, Error::MissingColumn("Task")));
    }
}
