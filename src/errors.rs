//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.
//!
//! Read paths never fail on dirty history: inverted intervals are clamped and
//! unparseable rows are skipped with a log line. Only write paths and a store
//! that cannot be reached surface an error to the caller.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Event log store
    // ---------------------------
    #[error("Event store unavailable: {0}")]
    Store(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ---------------------------
    // Lookup errors (write path)
    // ---------------------------
    #[error("User {0} does not exist")]
    UserNotFound(i64),

    #[error("Activity type {0} does not exist")]
    ActivityNotFound(i64),

    #[error("Department {0} does not exist")]
    DepartmentNotFound(i64),

    #[error("Entry {0} does not exist")]
    EntryNotFound(i64),

    #[error("No user is registered for stamp key '{0}'")]
    UnknownStampKey(String),

    // ---------------------------
    // Administrative conflicts
    // ---------------------------
    #[error("Stamp key '{0}' is already assigned to another user")]
    DuplicateStampKey(String),

    #[error("Activity type {id} is still referenced by {references} punch event(s)")]
    ActivityInUse { id: i64, references: i64 },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
