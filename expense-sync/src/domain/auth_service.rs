use log::{info, warn};
use shared::{LoginRequest, RegisterRequest};
use std::sync::Arc;

use crate::domain::expense_form::{validate_credentials, validate_registration, ValidationError};
use crate::domain::models::session::SessionContext;
use crate::io::remote::{ExpenseApi, RemoteError};
use crate::storage::{LocalStore, SnapshotRepository};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// Reachable server said no (wrong password, email taken...)
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Remote(RemoteError),
    #[error("could not store session: {0}")]
    Storage(String),
}

impl From<RemoteError> for AuthError {
    fn from(error: RemoteError) -> Self {
        match error {
            RemoteError::Server {
                http_status: None,
                message,
            } => AuthError::Rejected(message),
            other => AuthError::Remote(other),
        }
    }
}

/// Service for logging users in and out and remembering who is logged in
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn ExpenseApi>,
    snapshots: SnapshotRepository,
}

impl AuthService {
    pub fn new(api: Arc<dyn ExpenseApi>, store: Arc<dyn LocalStore>) -> Self {
        Self {
            api,
            snapshots: SnapshotRepository::new(store),
        }
    }

    /// Log in remotely and persist the resulting session
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionContext, AuthError> {
        validate_credentials(email, password)?;

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let user = self.api.login(&request).await?;
        let session = SessionContext::from(user);

        self.snapshots
            .save_current_user(&session)
            .await
            .map_err(|e| AuthError::Storage(format!("{:#}", e)))?;

        info!("🔑 Logged in as {} ({})", session.full_name, session.user_id);
        Ok(session)
    }

    /// Create an account; returns the server's confirmation message
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Option<String>, AuthError> {
        validate_registration(full_name, email, password, confirm_password)?;

        let request = RegisterRequest {
            full_name: full_name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        };
        let message = self.api.register(&request).await?;
        info!("📝 Registered account for {}", request.email);
        Ok(message)
    }

    /// The previously logged-in user, if any. A corrupt record counts as none.
    pub async fn restore_session(&self) -> Option<SessionContext> {
        match self.snapshots.load_current_user().await {
            Ok(session) => session,
            Err(e) => {
                warn!("⚠️ Ignoring stored session: {:#}", e);
                None
            }
        }
    }

    /// Forget the logged-in user. Their expense snapshot stays on disk.
    pub async fn logout(&self) -> anyhow::Result<()> {
        self.snapshots.clear_current_user().await?;
        info!("👋 Logged out");
        Ok(())
    }
}
