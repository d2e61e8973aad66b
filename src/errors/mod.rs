//! Error handling utilities for the mejournal application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur outside the journal engine itself,
//! as well as the convenience type alias `AppResult` for functions that can
//! return these errors.
//!
//! The engine never fails on user input. Rejected actions are reported through
//! [`crate::session::Outcome`], not through this module.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents errors that can occur when attempting to lock the data directory.
///
/// # Examples
///
/// ```
/// use mejournal::errors::LockError;
/// use std::path::PathBuf;
///
/// let error = LockError::FileBusy {
///     path: PathBuf::from("/path/to/.mejournal.lock"),
/// };
///
/// assert!(format!("{}", error).contains("another process"));
/// ```
#[derive(Debug, Error)]
pub enum LockError {
    /// Error when the lock is already held by another process.
    #[error("Journal data is currently being written by another process: {path}. Please wait for the other mejournal process to finish.")]
    FileBusy {
        /// The path to the lock file
        path: PathBuf,
    },

    /// Error when acquiring the lock fails for a technical reason.
    #[error("Failed to acquire lock {path}: {source}. Please check file permissions and ensure the directory is accessible.")]
    AcquisitionFailed {
        /// The path to the lock file that couldn't be locked
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents failures while writing a snapshot to durable storage.
///
/// Reading never produces these: a snapshot that can't be read or parsed is
/// replaced by an empty collection.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The snapshot could not be serialized.
    #[error("Failed to serialize {collection} snapshot: {source}")]
    Serialize {
        /// Which collection was being written
        collection: &'static str,
        /// The underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot file could not be written or moved into place.
    #[error("Failed to write snapshot {path}: {source}. Please check disk space and permissions on the data directory.")]
    Write {
        /// The target snapshot path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents all possible errors that can occur in the mejournal application.
///
/// # Examples
///
/// ```
/// use mejournal::errors::AppError;
///
/// let error = AppError::Config("Missing data directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing data directory");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors in journal logic (e.g., invalid date formats).
    #[error("Journal logic error: {0}")]
    Journal(String),

    /// Errors related to locking the data directory.
    #[error("File locking error: {0}")]
    Lock(#[from] LockError),

    /// Errors related to writing snapshots.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;
