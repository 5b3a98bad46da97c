//! # Domain Module
//!
//! Business logic for keeping a user's expenses available offline and in step
//! with the ExpenseTracker service.
//!
//! ## Module Organization
//!
//! - **sync_service**: the reconciler owning the expense collection
//! - **auth_service**: login, registration and the persisted session
//! - **expense_form**: input validation shared by the forms
//! - **summary**: totals and per-category breakdowns
//! - **commands**: outcome and warning types returned to the caller
//! - **models**: `Expense` and `SessionContext`
//!
//! ## Business Rules
//!
//! - Titles must be non-blank and amounts strictly positive
//! - New expenses are prepended and persisted locally before any network call
//! - Unsynced expenses are pushed sequentially and the batch halts at the first failure
//! - Expenses never confirmed by the server are never deleted remotely
//! - A successful full reload replaces the collection; a failed one keeps it
//!
//! ## Design Principles
//!
//! - **Storage Agnostic**: works against any `LocalStore`
//! - **Transport Agnostic**: works against any `ExpenseApi` and `ConnectivityProbe`
//! - **Never fatal**: remote and storage failures come back as `SyncWarning`s

pub mod auth_service;
pub mod commands;
pub mod expense_form;
pub mod models;
pub mod summary;
pub mod sync_service;

pub use auth_service::*;
pub use commands::*;
pub use expense_form::*;
pub use models::expense::Expense;
pub use models::session::SessionContext;
pub use summary::*;
pub use sync_service::*;
