//! # Storage Module
//!
//! Handles local persistence for the expense tracker.
//!
//! Everything the app keeps on the device goes through the `LocalStore`
//! trait: a durable key-value store of opaque blobs. The file implementation
//! writes one JSON file per key with atomic replacement; the
//! `SnapshotRepository` layers typed access to the expense snapshot and the
//! logged-in identity on top of any `LocalStore`.
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: the domain never touches files or JSON directly
//! - **Dependency Inversion**: the reconciler depends on `LocalStore`, not on `FileStore`
//! - **No network**: nothing in this module talks to the remote service

pub mod file;
pub mod snapshot_repository;
pub mod traits;

pub use file::{FileConnection, FileStore};
pub use snapshot_repository::SnapshotRepository;
pub use traits::LocalStore;
