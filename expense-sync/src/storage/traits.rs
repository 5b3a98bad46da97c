//! # Storage Traits
//!
//! This module defines the storage abstraction the domain layer persists
//! through, so the reconciler works the same against files on disk, an
//! in-memory map in tests, or any other durable key-value backend.

use anyhow::Result;
use async_trait::async_trait;

/// Durable key-value blob storage
///
/// Writes either fully replace the previous blob or fail; a reader never
/// observes a half-written value.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Read the blob stored under `key`, `None` if nothing was ever written
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`
    async fn write(&self, key: &str, blob: &str) -> Result<()>;

    /// Remove the blob stored under `key`; removing a missing key succeeds
    async fn remove(&self, key: &str) -> Result<()>;
}
