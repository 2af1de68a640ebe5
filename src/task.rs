//! Task data structure.
//!
//! This module defines the `Task` record, one row of the backing file.

use serde::{Deserialize, Serialize};

use crate::fields::*;

/// A single to-do item as persisted in the backing file.
///
/// Field names serialize to the column headers of the file, so the writer
/// always produces `Task,Status,Priority,Expiry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "Task")]
    pub name: String,
    #[serde(rename = "Status")]
    pub status: Status,
    #[serde(rename = "Priority")]
    pub priority: Priority,
    /// Expected as `YYYY-MM-DD`, stored as typed.
    #[serde(rename = "Expiry")]
    pub expiry: String,
}

impl Task {
    /// Create a new pending task.
    pub fn new(name: &str, priority: Priority, expiry: &str) -> Self {
        Task {
            name: name.to_string(),
            status: Status::Pending,
            priority,
            expiry: expiry.to_string(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }
}
