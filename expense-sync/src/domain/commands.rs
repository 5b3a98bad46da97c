//! Structured results returned by the domain services.
//!
//! Services never raise remote or storage failures to the caller. They
//! return one of these outcomes and let the presentation layer decide how to
//! tell the user (toast, dialog, status line...).

use std::fmt;

use crate::domain::models::expense::Expense;
use crate::io::remote::RemoteError;

/// A recoverable problem encountered while an operation still completed
#[derive(Debug, Clone, PartialEq)]
pub enum SyncWarning {
    /// The service could not be reached; working from local data only
    Offline,
    /// A push failed and the rest of the batch was skipped
    PushFailed {
        expense_id: String,
        error: RemoteError,
        /// Unsynced expenses left after the failure, including the failed one
        remaining: usize,
    },
    /// The local delete stands but the server still holds the record
    RemoteDeleteFailed { expense_id: String, error: RemoteError },
    /// A full reload from the server failed; local data was kept
    ReloadFailed { error: RemoteError },
    /// Local persistence failed; memory is ahead of disk until the next write
    Storage { reason: String },
}

impl SyncWarning {
    pub fn is_connectivity(&self) -> bool {
        match self {
            SyncWarning::Offline => true,
            SyncWarning::PushFailed { error, .. }
            | SyncWarning::RemoteDeleteFailed { error, .. }
            | SyncWarning::ReloadFailed { error } => error.is_connectivity(),
            SyncWarning::Storage { .. } => false,
        }
    }
}

impl fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncWarning::Offline => write!(f, "Offline: changes are saved on this device only"),
            SyncWarning::PushFailed {
                expense_id,
                error,
                remaining,
            } => write!(
                f,
                "Could not sync expense {} ({}); {} expense(s) still pending",
                expense_id, error, remaining
            ),
            SyncWarning::RemoteDeleteFailed { expense_id, error } => write!(
                f,
                "Deleted {} locally but not on the server ({})",
                expense_id, error
            ),
            SyncWarning::ReloadFailed { error } => {
                write!(f, "Could not reload from the server ({})", error)
            }
            SyncWarning::Storage { reason } => {
                write!(f, "Could not save to this device ({})", reason)
            }
        }
    }
}

/// Where the collection came from after `initialize`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    Remote,
    LocalCache,
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitializeOutcome {
    pub source: SnapshotSource,
    pub online: bool,
    pub expense_count: usize,
    /// Cached pending expenses confirmed before the reload
    pub pushed: usize,
    pub warnings: Vec<SyncWarning>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddExpenseOutcome {
    /// The created expense in its latest state (synced or not)
    pub expense: Expense,
    /// Number of expenses confirmed by the server during this call
    pub pushed: usize,
    pub warnings: Vec<SyncWarning>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteExpenseOutcome {
    /// `None` when no expense had that id
    pub removed: Option<Expense>,
    pub remote_deleted: bool,
    pub warnings: Vec<SyncWarning>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RetrySyncOutcome {
    /// The probe still fails; nothing was touched
    Offline { unsynced_count: usize },
    Completed {
        pushed: usize,
        /// Whether the collection was replaced by a fresh server copy
        reloaded: bool,
        unsynced_count: usize,
        warnings: Vec<SyncWarning>,
    },
}
