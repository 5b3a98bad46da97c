use anyhow::{anyhow, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the data directory created under the platform data dir
pub const DEFAULT_DIRECTORY_NAME: &str = "ExpenseTracker";

/// FileConnection owns the data directory and maps storage keys to files in it
#[derive(Clone, Debug)]
pub struct FileConnection {
    base_directory: PathBuf,
}

impl FileConnection {
    /// Create a new connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("📁 Created data directory {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a new connection in the platform data directory
    /// (e.g. `~/.local/share/ExpenseTracker` on Linux)
    pub fn new_default() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow!("Could not determine a data directory"))?;

        Self::new(data_dir.join(DEFAULT_DIRECTORY_NAME))
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// File backing a storage key
    ///
    /// Bytes outside `[A-Za-z0-9_-]` are percent-escaped, so user ids can never
    /// escape the data directory and two distinct keys never share a file.
    pub fn path_for_key(&self, key: &str) -> PathBuf {
        self.base_directory
            .join(format!("{}.json", Self::sanitize_key(key)))
    }

    fn sanitize_key(key: &str) -> String {
        let mut encoded = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
                encoded.push(char::from(byte));
            } else {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
        encoded
    }
}
