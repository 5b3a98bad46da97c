//! Domain model for a single expense record and its sync state.
use chrono::Local;
use serde::{Deserialize, Serialize};
use shared::Category;
use uuid::Uuid;

/// Prefix of every locally generated id
pub const TEMP_ID_PREFIX: &str = "temp_";

/// Date format used when none is configured (e.g. `10/16/2026`)
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

/// One expense entry as held by the reconciler and persisted in the local
/// snapshot.
///
/// `synced` defaults to `true` when absent so that snapshots written from a
/// full remote reload (which never carried the flag) load as confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub category: Category,
    pub date: String,
    #[serde(default = "confirmed_by_default")]
    pub synced: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
}

fn confirmed_by_default() -> bool {
    true
}

impl Expense {
    /// Build a new, not yet synced expense with a fresh temporary id
    pub fn new_local(
        title: String,
        amount: f64,
        category: Category,
        date: String,
        epoch_millis: u64,
    ) -> Self {
        Self {
            id: Self::generate_temp_id(epoch_millis),
            title,
            amount,
            category,
            date,
            synced: false,
            remote_id: None,
        }
    }

    /// Generate a temporary id: `temp_<epoch_millis>_<8 hex chars>`
    pub fn generate_temp_id(epoch_millis: u64) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{}{}_{}", TEMP_ID_PREFIX, epoch_millis, &suffix[..8])
    }

    pub fn has_temporary_id(&self) -> bool {
        self.id.starts_with(TEMP_ID_PREFIX)
    }

    /// Identifier the remote store knows this expense by
    pub fn remote_key(&self) -> &str {
        self.remote_id.as_deref().unwrap_or(&self.id)
    }

    /// Record a successful remote create
    pub fn mark_synced(&mut self, remote_id: Option<String>) {
        self.synced = true;
        // Only keep a remote id when the server actually assigned its own
        self.remote_id = remote_id.filter(|rid| *rid != self.id);
    }

    /// Today's date rendered with the given chrono format string
    pub fn today(date_format: &str) -> String {
        Local::now().format(date_format).to_string()
    }
}
