//! JSON-file-backed collection storage.
//!
//! # Responsibility
//! - Load named collections from a directory and keep them in memory.
//! - Apply validated inserts and persist collections back to disk.
//!
//! # Invariants
//! - Configuration and lookup problems are hard failures (`StoreError`).
//! - Record rejection is a soft failure reported through `CreateResult`.
//! - A rejected create never mutates a collection.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod collection_store;
mod files;

pub use collection_store::CollectionStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Hard-failure error for store construction, lookup and persistence.
#[derive(Debug)]
pub enum StoreError {
    /// Load directory is missing, unreadable, or not a directory.
    DirectoryNotFound(PathBuf),
    /// No loaded collection has this name (or no name was given).
    CollectionNotFound(String),
    /// A collection file holds content that is not a valid record array.
    InvalidData(String),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryNotFound(path) => {
                write!(f, "data directory not found: {}", path.display())
            }
            Self::CollectionNotFound(name) if name.trim().is_empty() => {
                write!(f, "collection name is required")
            }
            Self::CollectionNotFound(name) => write!(f, "collection not found: {name}"),
            Self::InvalidData(message) => write!(f, "invalid collection data: {message}"),
            Self::Io { path, source } => write!(f, "i/o error at `{}`: {source}", path.display()),
            Self::Serialize(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DirectoryNotFound(_) => None,
            Self::CollectionNotFound(_) => None,
            Self::InvalidData(_) => None,
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Outcome code returned by mutating operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Ok,
    Error,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Error => "ERROR",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result envelope for `create`/`add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateResult {
    /// Outcome callers branch on.
    pub status: Status,
    /// Identifier of the appended record; `None` when rejected.
    pub id: Option<String>,
    /// Human-readable diagnostics.
    pub message: String,
}

impl CreateResult {
    pub(crate) fn success(id: String, collection: &str) -> Self {
        Self {
            message: format!("created `{id}` in `{collection}`"),
            status: Status::Ok,
            id: Some(id),
        }
    }

    pub(crate) fn failure(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            id: None,
            message: message.into(),
        }
    }

    /// Returns whether the record was appended.
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}
