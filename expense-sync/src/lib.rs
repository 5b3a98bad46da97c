//! # Expense Sync
//!
//! Offline-first client library for the ExpenseTracker service.
//!
//! Expenses are always recorded on the device first and mirrored to the
//! server when it can be reached. Anything added while offline is kept with a
//! temporary id and an unsynced flag until a later sync pushes it.
//!
//! ## Architecture
//!
//! ```text
//! Presentation (CLI binary, or any other front end)
//!     ↓
//! Domain Layer (ExpenseSyncService, AuthService, validation, totals)
//!     ↓                                   ↓
//! Storage Layer (LocalStore, snapshots)   IO Layer (ExpenseApi, ConnectivityProbe)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Load configuration and wire the concrete store, client and probe together
//! - Hand out one reconciler per logged-in session

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::config::SyncConfig;
use crate::domain::{AuthService, ExpenseSyncService, SessionContext};
use crate::io::{ConnectivityProbe, ExpenseApi, HttpConnectivityProbe, HttpExpenseApi};
use crate::storage::{FileStore, LocalStore};

/// Main application state that holds the shared collaborators
#[derive(Clone)]
pub struct AppState {
    pub config: SyncConfig,
    pub store: Arc<dyn LocalStore>,
    pub api: Arc<dyn ExpenseApi>,
    pub probe: Arc<dyn ConnectivityProbe>,
    pub auth_service: AuthService,
}

impl AppState {
    /// Reconciler for `session`, sharing this state's store, client and probe
    pub fn sync_service(&self, session: SessionContext) -> ExpenseSyncService {
        ExpenseSyncService::new(
            session,
            self.store.clone(),
            self.api.clone(),
            self.probe.clone(),
        )
        .with_date_format(self.config.date_format.clone())
    }
}

/// Initialize the library with all required services
pub fn initialize_app(config: &SyncConfig) -> Result<AppState> {
    info!("Setting up local store");
    let connection = config.open_connection()?;
    info!("📁 Data directory: {}", connection.base_directory().display());
    let store: Arc<dyn LocalStore> = Arc::new(FileStore::new(connection));

    info!("Setting up remote client for {}", config.api_base_url);
    let http_api = HttpExpenseApi::new(config.api_base_url.clone())?;
    let probe = HttpConnectivityProbe::new(
        http_api.client().clone(),
        http_api.endpoint("LoadExpenses"),
        config.probe_timeout(),
    );
    let api: Arc<dyn ExpenseApi> = Arc::new(http_api);

    let auth_service = AuthService::new(api.clone(), store.clone());

    Ok(AppState {
        config: config.clone(),
        store,
        api,
        probe: Arc::new(probe),
        auth_service,
    })
}
