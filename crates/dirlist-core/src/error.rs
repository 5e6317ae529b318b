//! Error types for expansion operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::NodeId;

/// Errors that abort an expansion.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The node is not a collapsed container.
    #[error("Node {} is not a collapsed directory", id.0)]
    NotCollapsed { id: NodeId },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl ExpandError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of expansion warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Directory is one of its own ancestors and was not expanded.
    RecursiveDirectory,
    /// An entry could not be opened and was skipped.
    OpenFailed,
}

/// Non-fatal warning encountered during expansion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpandWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ExpandWarning {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create an infinite recursion warning.
    pub fn recursive_directory(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Ignoring infinitely recursive directory: {}", path.display()),
            path,
            kind: WarningKind::RecursiveDirectory,
        }
    }

    /// Create an open failure warning.
    pub fn open_failed(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Cannot open: {error}"),
            path,
            kind: WarningKind::OpenFailed,
        }
    }
}
