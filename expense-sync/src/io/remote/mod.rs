//! # Remote Module
//!
//! The ExpenseTracker service as seen from the app: a trait describing the
//! request/response contract and the reqwest-backed implementation.
//!
//! Every call is a single round trip. Retry, batching and ordering policy
//! belong to the reconciler, not to this layer.

pub mod http_client;

use async_trait::async_trait;
use shared::{ExpenseDto, LoggedUser, LoginRequest, RegisterRequest, SaveExpenseRequest};

pub use http_client::HttpExpenseApi;

/// Why a remote call did not succeed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    /// Transport failure: DNS, refused connection, reset, TLS...
    #[error("server unreachable: {0}")]
    Unreachable(String),

    /// The server answered but reported failure (non-2xx or `status: false`)
    #[error("server error: {message}")]
    Server {
        http_status: Option<u16>,
        message: String,
    },

    /// The server answered with a body we could not decode
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl RemoteError {
    /// `status: false` with an optional server-provided message
    pub fn rejected(message: Option<String>) -> Self {
        RemoteError::Server {
            http_status: None,
            message: message.unwrap_or_else(|| "request rejected".to_string()),
        }
    }

    /// True when the service could not be reached at all
    pub fn is_connectivity(&self) -> bool {
        matches!(self, RemoteError::Unreachable(_))
    }
}

/// Acknowledgement of a successful create
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreatedExpense {
    /// Identity the server assigned, if it returned one
    pub server_id: Option<String>,
}

/// The remote ExpenseTracker contract
#[async_trait]
pub trait ExpenseApi: Send + Sync {
    /// Full remote collection, in server order
    async fn list_expenses(&self) -> Result<Vec<ExpenseDto>, RemoteError>;

    /// Persist one expense remotely
    async fn create_expense(&self, request: &SaveExpenseRequest) -> Result<CreatedExpense, RemoteError>;

    /// Delete the expense the server knows as `id`
    async fn delete_expense(&self, id: &str) -> Result<(), RemoteError>;

    async fn login(&self, request: &LoginRequest) -> Result<LoggedUser, RemoteError>;

    /// Returns the server's confirmation message, if any
    async fn register(&self, request: &RegisterRequest) -> Result<Option<String>, RemoteError>;
}
