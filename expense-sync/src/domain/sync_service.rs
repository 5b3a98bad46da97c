//! Offline-first reconciler for the expense collection.
//!
//! `ExpenseSyncService` owns the in-memory list of expenses for one session
//! and keeps it consistent with the local snapshot and the remote service:
//!
//! - every mutation is written to the local store before the network is touched
//! - unsynced expenses are pushed one at a time, newest first, and the batch
//!   stops at the first failure
//! - deleting an expense the server never saw stays local
//! - a full reload from the server replaces the collection wholesale, which is
//!   how temporary ids get swapped for server ids
//!
//! All mutating operations run under one async mutex, so overlapping calls are
//! serialized instead of interleaving partial updates.

use chrono::Utc;
use log::{debug, error, info, warn};
use shared::{Category, ExpenseDto};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::commands::{
    AddExpenseOutcome, DeleteExpenseOutcome, InitializeOutcome, RetrySyncOutcome,
    SnapshotSource, SyncWarning,
};
use crate::domain::expense_form::{validate_expense_input, ValidationError};
use crate::domain::models::expense::{Expense, DEFAULT_DATE_FORMAT};
use crate::domain::models::session::SessionContext;
use crate::domain::summary::{self, ExpenseSummary};
use crate::io::connectivity::ConnectivityProbe;
use crate::io::mappers::ExpenseMapper;
use crate::io::remote::ExpenseApi;
use crate::storage::{LocalStore, SnapshotRepository};

pub struct ExpenseSyncService {
    session: SessionContext,
    snapshots: SnapshotRepository,
    api: Arc<dyn ExpenseApi>,
    probe: Arc<dyn ConnectivityProbe>,
    date_format: String,
    expenses: Mutex<Vec<Expense>>,
    online: AtomicBool,
    loading: AtomicBool,
}

/// Holds the loading flag up for as long as it lives
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ExpenseSyncService {
    pub fn new(
        session: SessionContext,
        store: Arc<dyn LocalStore>,
        api: Arc<dyn ExpenseApi>,
        probe: Arc<dyn ConnectivityProbe>,
    ) -> Self {
        Self {
            session,
            snapshots: SnapshotRepository::new(store),
            api,
            probe,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            expenses: Mutex::new(Vec::new()),
            online: AtomicBool::new(false),
            loading: AtomicBool::new(false),
        }
    }

    /// Override the chrono format used for new expenses' dates
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    /// Load the collection from the server if reachable, else from the cache.
    ///
    /// Cached expenses that never reached the server are pushed before the
    /// reload so the wholesale replacement cannot discard them. If any of
    /// them fails, the cache stays the source of truth for this session.
    pub async fn initialize(&self) -> InitializeOutcome {
        let mut expenses = self.expenses.lock().await;
        let _loading = LoadingGuard::start(&self.loading);
        let mut warnings = Vec::new();

        let online = self.probe.check_online().await;
        self.online.store(online, Ordering::SeqCst);
        info!(
            "🔄 Initializing expenses for user {} ({})",
            self.session.user_id,
            if online { "online" } else { "offline" }
        );

        let (cached, cache_error) = match self.snapshots.load_expenses(&self.session).await {
            Ok(cached) => (cached, None),
            Err(e) => {
                error!("❌ Could not read expense snapshot: {:#}", e);
                (None, Some(format!("{:#}", e)))
            }
        };
        let has_cache = cached.is_some();
        let mut local = cached.unwrap_or_default();
        let mut pushed = 0;

        if online {
            if summary::unsynced_count(&local) > 0 {
                info!(
                    "📤 {} cached expenses pending, pushing before reload",
                    summary::unsynced_count(&local)
                );
                pushed = self.push_unsynced(&mut local, &mut warnings).await;
            }

            if summary::unsynced_count(&local) == 0 {
                match self.api.list_expenses().await {
                    Ok(dtos) => {
                        *expenses = Self::from_remote(dtos);
                        self.persist(&expenses, &mut warnings).await;
                        info!("✅ Loaded {} expenses from server", expenses.len());
                        return InitializeOutcome {
                            source: SnapshotSource::Remote,
                            online: true,
                            expense_count: expenses.len(),
                            pushed,
                            warnings,
                        };
                    }
                    Err(error) => {
                        warn!("⚠️ Full reload failed, falling back to cache: {}", error);
                        if error.is_connectivity() {
                            self.online.store(false, Ordering::SeqCst);
                        }
                        warnings.push(SyncWarning::ReloadFailed { error });
                    }
                }
            }
        } else {
            warnings.push(SyncWarning::Offline);
        }

        if let Some(reason) = cache_error {
            warnings.push(SyncWarning::Storage { reason });
        }
        *expenses = local;

        let source = if has_cache {
            SnapshotSource::LocalCache
        } else {
            SnapshotSource::Empty
        };
        info!("📋 Using {} cached expenses ({:?})", expenses.len(), source);

        InitializeOutcome {
            source,
            online: self.is_online(),
            expense_count: expenses.len(),
            pushed,
            warnings,
        }
    }

    /// Validate and add a new expense, then try to sync everything pending.
    ///
    /// Succeeds as soon as the expense is in the collection; remote and
    /// storage trouble come back as warnings on the outcome.
    pub async fn add_expense(
        &self,
        title: &str,
        amount_text: &str,
        category: Category,
    ) -> Result<AddExpenseOutcome, ValidationError> {
        let draft = validate_expense_input(title, amount_text, category)?;

        let mut expenses = self.expenses.lock().await;
        let mut warnings = Vec::new();

        let now_millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let mut expense = Expense::new_local(
            draft.title,
            draft.amount,
            draft.category,
            Expense::today(&self.date_format),
            now_millis,
        );
        while expenses.iter().any(|e| e.id == expense.id) {
            expense.id = Expense::generate_temp_id(now_millis);
        }

        info!(
            "➕ Adding expense {} '{}' ({:.2}, {})",
            expense.id, expense.title, expense.amount, expense.category
        );
        expenses.insert(0, expense);
        self.persist(&expenses, &mut warnings).await;

        let pushed = if self.is_online() {
            self.push_unsynced(&mut expenses, &mut warnings).await
        } else {
            debug!("Offline, expense kept local until the next sync");
            0
        };

        // Pushes never reorder, so the new expense is still first
        let expense = expenses[0].clone();

        Ok(AddExpenseOutcome {
            expense,
            pushed,
            warnings,
        })
    }

    /// Remove an expense locally and, if the server has it, remotely.
    ///
    /// An unknown id is a no-op. A failed remote delete never brings the
    /// expense back.
    pub async fn delete_expense(&self, id: &str) -> DeleteExpenseOutcome {
        let mut expenses = self.expenses.lock().await;
        let mut warnings = Vec::new();

        let Some(position) = expenses.iter().position(|e| e.id == id) else {
            debug!("Delete of unknown expense {} ignored", id);
            return DeleteExpenseOutcome {
                removed: None,
                remote_deleted: false,
                warnings,
            };
        };

        let removed = expenses.remove(position);
        info!("🗑️ Deleted expense {} '{}'", removed.id, removed.title);
        self.persist(&expenses, &mut warnings).await;

        let remote_deleted = if removed.synced && self.is_online() {
            match self.api.delete_expense(removed.remote_key()).await {
                Ok(()) => true,
                Err(error) => {
                    warn!(
                        "⚠️ Remote delete of {} failed, server copy remains: {}",
                        removed.remote_key(),
                        error
                    );
                    if error.is_connectivity() {
                        self.online.store(false, Ordering::SeqCst);
                    }
                    warnings.push(SyncWarning::RemoteDeleteFailed {
                        expense_id: removed.id.clone(),
                        error,
                    });
                    false
                }
            }
        } else {
            false
        };

        DeleteExpenseOutcome {
            removed: Some(removed),
            remote_deleted,
            warnings,
        }
    }

    /// Re-probe; when back online push everything pending and reload.
    pub async fn retry_sync(&self) -> RetrySyncOutcome {
        let mut expenses = self.expenses.lock().await;
        let _loading = LoadingGuard::start(&self.loading);

        let online = self.probe.check_online().await;
        self.online.store(online, Ordering::SeqCst);
        if !online {
            info!("📴 Still offline, {} expenses pending", summary::unsynced_count(&expenses));
            return RetrySyncOutcome::Offline {
                unsynced_count: summary::unsynced_count(&expenses),
            };
        }

        let mut warnings = Vec::new();
        let pushed = self.push_unsynced(&mut expenses, &mut warnings).await;

        // A reload now would drop whatever the halted batch left behind
        let mut reloaded = false;
        if summary::unsynced_count(&expenses) == 0 {
            match self.api.list_expenses().await {
                Ok(dtos) => {
                    *expenses = Self::from_remote(dtos);
                    self.persist(&expenses, &mut warnings).await;
                    reloaded = true;
                    info!("✅ Reloaded {} expenses from server", expenses.len());
                }
                Err(error) => {
                    warn!("⚠️ Reload after sync failed: {}", error);
                    if error.is_connectivity() {
                        self.online.store(false, Ordering::SeqCst);
                    }
                    warnings.push(SyncWarning::ReloadFailed { error });
                }
            }
        }

        RetrySyncOutcome::Completed {
            pushed,
            reloaded,
            unsynced_count: summary::unsynced_count(&expenses),
            warnings,
        }
    }

    /// Snapshot of the current collection, newest first
    pub async fn expenses(&self) -> Vec<Expense> {
        self.expenses.lock().await.clone()
    }

    pub async fn total_amount(&self) -> f64 {
        summary::total_amount(&self.expenses.lock().await)
    }

    pub async fn unsynced_count(&self) -> usize {
        summary::unsynced_count(&self.expenses.lock().await)
    }

    pub async fn summary(&self) -> ExpenseSummary {
        ExpenseSummary::from_expenses(&self.expenses.lock().await)
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Push unsynced expenses in collection order, stopping at the first failure.
    ///
    /// Returns how many were confirmed. A failure flips the service offline;
    /// the remaining expenses wait for the next add or retry.
    async fn push_unsynced(
        &self,
        expenses: &mut Vec<Expense>,
        warnings: &mut Vec<SyncWarning>,
    ) -> usize {
        let pending: Vec<usize> = expenses
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.synced)
            .map(|(index, _)| index)
            .collect();
        let total = pending.len();
        let mut pushed = 0;

        for index in pending {
            let request = ExpenseMapper::to_save_request(&expenses[index], &self.session);
            match self.api.create_expense(&request).await {
                Ok(created) => {
                    debug!(
                        "Server confirmed {} as {}",
                        request.id,
                        created.server_id.as_deref().unwrap_or("<same id>")
                    );
                    expenses[index].mark_synced(created.server_id);
                    pushed += 1;
                    self.persist(expenses.as_slice(), warnings).await;
                }
                Err(error) => {
                    let remaining = total - pushed;
                    warn!(
                        "⚠️ Push of {} failed ({}), {} expenses left for later",
                        request.id, error, remaining
                    );
                    self.online.store(false, Ordering::SeqCst);
                    warnings.push(SyncWarning::PushFailed {
                        expense_id: request.id,
                        error,
                        remaining,
                    });
                    break;
                }
            }
        }

        if pushed > 0 {
            info!("📤 Synced {} of {} pending expenses", pushed, total);
        }
        pushed
    }

    /// Write the collection to the local store; failure becomes a warning
    async fn persist(&self, expenses: &[Expense], warnings: &mut Vec<SyncWarning>) {
        if let Err(e) = self.snapshots.save_expenses(&self.session, expenses).await {
            error!("❌ Failed to persist {} expenses: {:#}", expenses.len(), e);
            let warning = SyncWarning::Storage {
                reason: format!("{:#}", e),
            };
            if !warnings.contains(&warning) {
                warnings.push(warning);
            }
        }
    }

    /// Convert a server listing, dropping repeated ids
    fn from_remote(dtos: Vec<ExpenseDto>) -> Vec<Expense> {
        let mut seen = HashSet::new();
        dtos.into_iter()
            .map(ExpenseMapper::to_domain)
            .filter(|expense| {
                let first = seen.insert(expense.id.clone());
                if !first {
                    warn!("⚠️ Server listed expense {} twice, keeping the first", expense.id);
                }
                first
            })
            .collect()
    }
}
