use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::io::ErrorKind;
use tokio::fs;

use super::connection::FileConnection;
use crate::storage::traits::LocalStore;

/// File-backed key-value store, one JSON file per key
#[derive(Clone, Debug)]
pub struct FileStore {
    connection: FileConnection,
}

impl FileStore {
    pub fn new(connection: FileConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl LocalStore for FileStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.connection.path_for_key(key);

        match fs::read_to_string(&file_path).await {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", file_path.display())),
        }
    }

    async fn write(&self, key: &str, blob: &str) -> Result<()> {
        let file_path = self.connection.path_for_key(key);

        // Write to a sibling temp file first so the swap is atomic
        let temp_path = file_path.with_extension("tmp");
        fs::write(&temp_path, blob)
            .await
            .with_context(|| format!("writing {}", temp_path.display()))?;
        fs::rename(&temp_path, &file_path)
            .await
            .with_context(|| format!("replacing {}", file_path.display()))?;

        debug!("💾 Wrote {} bytes to {}", blob.len(), file_path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let file_path = self.connection.path_for_key(key);

        match fs::remove_file(&file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", file_path.display())),
        }
    }
}
