//! Error type shared by the store, the state layer and the front ends.

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("backing file has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("Please enter a task name.")]
    MissingName,

    #[error("Please enter an expiry date (YYYY-MM-DD).")]
    MissingExpiry,

    /// Nothing selected; the payload names the action that needed a selection.
    #[error("Please select a task to {0}.")]
    NoSelection(&'static str),

    #[error("No task at position {0}.")]
    NoSuchTask(usize),
}

impl Error {
    /// Whether this error was caused by user input rather than storage.
    pub fn is_input(&self) -> bool {
        !matches!(self, Error::Io(_) | Error::Csv(_) | Error::MissingColumn(_))
    }

    /// Short heading for a notice describing this error.
    pub fn title(&self) -> &'static str {
        match self {
            Error::Io(_) | Error::Csv(_) | Error::MissingColumn(_) => "Storage Error",
            Error::MissingName | Error::MissingExpiry => "Input Error",
            Error::NoSelection(_) | Error::NoSuchTask(_) => "No Selection",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_notices() {
        assert_eq!(Error::MissingName.to_string(), "Please enter a task name.");
        assert_eq!(
            Error::NoSelection("mark as complete").to_string(),
            "Please select a task to mark as complete."
        );
        assert!(Error::NoSuchTask(3).is_input());
        assert!(!Error::Io(io::Error::other("boom")).is_input());
        assert_eq!(Error::MissingExpiry.title(), "Input Error");
    }
}
