//! Application state and the actions that change it.
//!
//! Every user operation is an `Action` variant dispatched through
//! `AppState::update`. Each mutating action reloads the table from the store,
//! applies one change, saves the whole table and reloads again, so `tasks()`
//! always mirrors the backing file.
//!
//! Selections are row positions in the freshly loaded table. Completing a row
//! marks every row that shares its name; deleting removes only that row.

use tracing::info;

use crate::db::TaskStore;
use crate::error::{Error, Result};
use crate::fields::*;
use crate::task::Task;

/// A user operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add {
        name: String,
        priority: Priority,
        expiry: String,
    },
    Complete(Option<usize>),
    Delete(Option<usize>),
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A modal message produced by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: &str, message: String) -> Self {
        Notice { level: NoticeLevel::Info, title: title.to_string(), message }
    }

    /// Build the notice shown to the user for a failed action.
    pub fn from_error(err: &Error) -> Self {
        let level = if err.is_input() { NoticeLevel::Warning } else { NoticeLevel::Error };
        Notice { level, title: err.title().to_string(), message: err.to_string() }
    }
}

/// Explicit application state: the store plus the last loaded snapshot.
pub struct AppState<S: TaskStore> {
    store: S,
    tasks: Vec<Task>,
}

impl<S: TaskStore> AppState<S> {
    /// Create the state and load the initial snapshot.
    pub fn new(store: S) -> Result<Self> {
        let tasks = store.load()?;
        Ok(AppState { store, tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Apply an action.
    ///
    /// Successful actions may return an informational notice. Input problems
    /// come back as `Err` with `Error::is_input` set; callers turn them into
    /// warnings with `Notice::from_error`.
    pub fn update(&mut self, action: Action) -> Result<Option<Notice>> {
        let notice = match action {
            Action::Add { name, priority, expiry } => {
                self.add(&name, priority, &expiry)?;
                None
            }
            Action::Complete(selection) => {
                let name = self.complete(selection)?;
                Some(Notice::info(
                    "Task Completed",
                    format!("Task '{}' has been marked as completed.", name),
                ))
            }
            Action::Delete(selection) => {
                let name = self.delete(selection)?;
                Some(Notice::info("Task Deleted", format!("Task '{}' has been deleted.", name)))
            }
            Action::Refresh => None,
        };
        self.tasks = self.store.load()?;
        Ok(notice)
    }

    fn add(&mut self, name: &str, priority: Priority, expiry: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::MissingName);
        }
        let expiry = expiry.trim();
        if expiry.is_empty() {
            return Err(Error::MissingExpiry);
        }

        let mut tasks = self.store.load()?;
        tasks.push(Task::new(name, priority, expiry));
        self.store.save(&tasks)?;
        info!(name, %priority, expiry, "added task");
        Ok(())
    }

    /// Returns the name of the completed task.
    fn complete(&mut self, selection: Option<usize>) -> Result<String> {
        let position = selection.ok_or(Error::NoSelection("mark as complete"))?;
        let mut tasks = self.store.load()?;
        let name = tasks
            .get(position)
            .map(|t| t.name.clone())
            .ok_or(Error::NoSuchTask(position))?;

        let mut marked = 0;
        for task in tasks.iter_mut().filter(|t| t.name == name) {
            task.status = Status::Completed;
            marked += 1;
        }
        self.store.save(&tasks)?;
        info!(name = %name, marked, "completed task");
        Ok(name)
    }

    /// Returns the name of the deleted task.
    fn delete(&mut self, selection: Option<usize>) -> Result<String> {
        let position = selection.ok_or(Error::NoSelection("delete"))?;
        let mut tasks = self.store.load()?;
        if position >= tasks.len() {
            return Err(Error::NoSuchTask(position));
        }
        let removed = tasks.remove(position);
        self.store.save(&tasks)?;
        info!(name = %removed.name, position, "deleted task");
        Ok(removed.name)
    }
}
