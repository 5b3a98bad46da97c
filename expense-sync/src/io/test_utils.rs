/// In-memory stand-ins for the remote service and the connectivity probe.
///
/// `FakeExpenseApi` behaves like a tiny ExpenseTracker server (assigning
/// numeric ids on create) unless a result has been scripted for the next call.

use async_trait::async_trait;
use shared::{ExpenseDto, LoggedUser, LoginRequest, RegisterRequest, SaveExpenseRequest};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::connectivity::ConnectivityProbe;
use super::remote::{CreatedExpense, ExpenseApi, RemoteError};
use crate::storage::file::test_utils::MemoryStore;

pub struct FakeExpenseApi {
    remote: Mutex<Vec<ExpenseDto>>,
    next_id: AtomicU64,
    create_script: Mutex<VecDeque<Result<CreatedExpense, RemoteError>>>,
    delete_script: Mutex<VecDeque<Result<(), RemoteError>>>,
    list_error: Mutex<Option<RemoteError>>,
    login_result: Mutex<Result<LoggedUser, RemoteError>>,
    register_result: Mutex<Result<Option<String>, RemoteError>>,
    watched_store: Mutex<Option<(Arc<MemoryStore>, String)>>,
    /// Blob under the watched key at the moment each create arrived
    pub stored_at_create: Mutex<Vec<Option<String>>>,
    pub created: Mutex<Vec<SaveExpenseRequest>>,
    pub deleted: Mutex<Vec<String>>,
    pub list_calls: AtomicU64,
    pub login_calls: AtomicU64,
    pub register_calls: AtomicU64,
}

impl FakeExpenseApi {
    pub fn new() -> Self {
        Self {
            remote: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(100),
            create_script: Mutex::new(VecDeque::new()),
            delete_script: Mutex::new(VecDeque::new()),
            list_error: Mutex::new(None),
            login_result: Mutex::new(Ok(LoggedUser {
                id: "1".to_string(),
                full_name: "Test User".to_string(),
            })),
            register_result: Mutex::new(Ok(Some("Registration successful".to_string()))),
            watched_store: Mutex::new(None),
            stored_at_create: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            list_calls: AtomicU64::new(0),
            login_calls: AtomicU64::new(0),
            register_calls: AtomicU64::new(0),
        }
    }

    /// Seed the server-side collection
    pub fn with_remote(self, expenses: Vec<ExpenseDto>) -> Self {
        *self.remote.lock().unwrap() = expenses;
        self
    }

    pub fn remote_expenses(&self) -> Vec<ExpenseDto> {
        self.remote.lock().unwrap().clone()
    }

    pub fn push_create_result(&self, result: Result<CreatedExpense, RemoteError>) {
        self.create_script.lock().unwrap().push_back(result);
    }

    pub fn push_delete_result(&self, result: Result<(), RemoteError>) {
        self.delete_script.lock().unwrap().push_back(result);
    }

    pub fn set_list_error(&self, error: Option<RemoteError>) {
        *self.list_error.lock().unwrap() = error;
    }

    pub fn set_login_result(&self, result: Result<LoggedUser, RemoteError>) {
        *self.login_result.lock().unwrap() = result;
    }

    pub fn set_register_result(&self, result: Result<Option<String>, RemoteError>) {
        *self.register_result.lock().unwrap() = result;
    }

    /// Capture `key` from `store` whenever a create is received
    pub fn watch_store(&self, store: Arc<MemoryStore>, key: impl Into<String>) {
        *self.watched_store.lock().unwrap() = Some((store, key.into()));
    }

    pub fn created_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

pub fn unreachable_error() -> RemoteError {
    RemoteError::Unreachable("connection refused".to_string())
}

#[async_trait]
impl ExpenseApi for FakeExpenseApi {
    async fn list_expenses(&self) -> Result<Vec<ExpenseDto>, RemoteError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.list_error.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(self.remote_expenses())
    }

    async fn create_expense(&self, request: &SaveExpenseRequest) -> Result<CreatedExpense, RemoteError> {
        self.created.lock().unwrap().push(request.clone());
        if let Some((store, key)) = self.watched_store.lock().unwrap().as_ref() {
            self.stored_at_create.lock().unwrap().push(store.blob(key));
        }

        let scripted = self.create_script.lock().unwrap().pop_front();
        let created = match scripted {
            Some(Err(error)) => return Err(error),
            Some(Ok(created)) => created,
            None => CreatedExpense {
                server_id: Some(self.next_id.fetch_add(1, Ordering::SeqCst).to_string()),
            },
        };

        let stored_id = created.server_id.clone().unwrap_or_else(|| request.id.clone());
        self.remote.lock().unwrap().insert(
            0,
            ExpenseDto {
                id: stored_id,
                title: request.title.clone(),
                amount: request.amount,
                category: request.category,
                date: request.date.clone(),
            },
        );
        Ok(created)
    }

    async fn delete_expense(&self, id: &str) -> Result<(), RemoteError> {
        self.deleted.lock().unwrap().push(id.to_string());

        if let Some(result) = self.delete_script.lock().unwrap().pop_front() {
            result?;
        }
        self.remote.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }

    async fn login(&self, _request: &LoginRequest) -> Result<LoggedUser, RemoteError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.login_result.lock().unwrap().clone()
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<Option<String>, RemoteError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.register_result.lock().unwrap().clone()
    }
}

/// Probe whose answer the test flips by hand
pub struct FixedProbe {
    online: AtomicBool,
}

impl FixedProbe {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

#[async_trait]
impl ConnectivityProbe for FixedProbe {
    async fn check_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}
