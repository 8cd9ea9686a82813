//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use quiz_core::ImportError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Illegal quiz session transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions loaded")]
    NoQuestions,
    #[error("no option selected")]
    NothingSelected,
    #[error("answer already confirmed")]
    AlreadyConfirmed,
    #[error("option {option} is out of range for a question with {len} options")]
    OptionOutOfRange { option: usize, len: usize },
    #[error("question position {position} cannot be used as a result key")]
    IndexOverflow { position: usize },
}

/// Errors emitted while loading a question set.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("question source request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Import(#[from] ImportError),
}

/// Errors emitted by `StatsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatsError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
