//! Typed access to the two durable keys the app keeps: the per-user expense
//! snapshot and the logged-in identity.

use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::Arc;

use crate::domain::models::expense::Expense;
use crate::domain::models::session::{SessionContext, CURRENT_USER_KEY};
use crate::storage::traits::LocalStore;

#[derive(Clone)]
pub struct SnapshotRepository {
    store: Arc<dyn LocalStore>,
}

impl SnapshotRepository {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    /// Load the cached collection, `None` if this user has no snapshot yet
    pub async fn load_expenses(&self, session: &SessionContext) -> Result<Option<Vec<Expense>>> {
        let key = session.expenses_key();
        let Some(blob) = self.store.read(&key).await? else {
            debug!("No expense snapshot under {}", key);
            return Ok(None);
        };

        let expenses: Vec<Expense> = serde_json::from_str(&blob)
            .with_context(|| format!("corrupt expense snapshot under {}", key))?;
        debug!("📋 Loaded {} expenses from {}", expenses.len(), key);
        Ok(Some(expenses))
    }

    /// Replace the cached collection with `expenses`
    pub async fn save_expenses(&self, session: &SessionContext, expenses: &[Expense]) -> Result<()> {
        let blob = serde_json::to_string(expenses)?;
        self.store.write(&session.expenses_key(), &blob).await
    }

    pub async fn load_current_user(&self) -> Result<Option<SessionContext>> {
        match self.store.read(CURRENT_USER_KEY).await? {
            Some(blob) => Ok(Some(
                serde_json::from_str(&blob).context("corrupt current user record")?,
            )),
            None => Ok(None),
        }
    }

    pub async fn save_current_user(&self, session: &SessionContext) -> Result<()> {
        let blob = serde_json::to_string(session)?;
        self.store.write(CURRENT_USER_KEY, &blob).await?;
        info!("👤 Stored session for user {}", session.user_id);
        Ok(())
    }

    pub async fn clear_current_user(&self) -> Result<()> {
        self.store.remove(CURRENT_USER_KEY).await
    }
}
