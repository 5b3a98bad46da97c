//! The logged-in user the reconciler works on behalf of.
use serde::{Deserialize, Serialize};
use shared::LoggedUser;

/// Durable key holding the currently logged-in identity
pub const CURRENT_USER_KEY: &str = "current_user";

/// Explicit session context handed to the reconciler at construction.
///
/// Decides which storage key the expense snapshot lives under and which
/// `user` is sent along with every saved expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: String,
    pub full_name: String,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            full_name: full_name.into(),
        }
    }

    /// Storage key of this user's expense snapshot
    pub fn expenses_key(&self) -> String {
        format!("expenses_{}", self.user_id)
    }
}

impl From<LoggedUser> for SessionContext {
    fn from(user: LoggedUser) -> Self {
        Self {
            user_id: user.id,
            full_name: user.full_name,
        }
    }
}
