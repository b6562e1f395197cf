//! Core error types for family tree processing
//!
//! The layout engine itself never fails; these errors come from the edges of
//! the library: reading snapshots, building databases and loading config.

use thiserror::Error;

/// Core error types for family tree processing
#[derive(Error, Debug)]
pub enum LineageError {
    #[error("Snapshot error: {message} at line {line}, column {column}")]
    SnapshotError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Duplicate person id: {id}")]
    DuplicatePerson { id: String },

    #[error("Config error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl LineageError {
    /// Create a new snapshot error
    pub fn snapshot_error(message: String, line: usize, column: usize) -> Self {
        Self::SnapshotError {
            message,
            line,
            column,
        }
    }

    /// Create a new duplicate person error
    pub fn duplicate_person(id: impl Into<String>) -> Self {
        Self::DuplicatePerson { id: id.into() }
    }

    /// Create a new config error
    pub fn config_error(message: String) -> Self {
        Self::ConfigError { message }
    }
}

impl From<serde_json::Error> for LineageError {
    fn from(err: serde_json::Error) -> Self {
        Self::snapshot_error(err.to_string(), err.line(), err.column())
    }
}
