use anyhow::Context;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    DeleteExpenseResponse, ExpenseDto, LoadExpensesResponse, LoggedUser, LoginRequest,
    LoginResponse, RegisterRequest, RegisterResponse, SaveExpenseRequest, SaveExpenseResponse,
};

use super::{CreatedExpense, ExpenseApi, RemoteError};

/// reqwest client for the `/ExpenseTracker/*` endpoints
#[derive(Clone, Debug)]
pub struct HttpExpenseApi {
    client: Client,
    base_url: String,
}

impl HttpExpenseApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, anyhow::Error> {
        let client = ClientBuilder::new()
            .build()
            .context("error building http client")?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Underlying client, shared with the connectivity probe
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn endpoint(&self, name: &str) -> String {
        format!("{base}/ExpenseTracker/{name}", base = self.base_url)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("⚠️ Server answered HTTP {}: {}", status, body);
            return Err(RemoteError::Server {
                http_status: Some(status.as_u16()),
                message: if body.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    format!("HTTP {}: {}", status, body)
                },
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))
    }
}

fn unreachable(e: reqwest::Error) -> RemoteError {
    RemoteError::Unreachable(e.to_string())
}

#[async_trait]
impl ExpenseApi for HttpExpenseApi {
    async fn list_expenses(&self) -> Result<Vec<ExpenseDto>, RemoteError> {
        let response = self
            .client
            .get(self.endpoint("LoadExpenses"))
            .send()
            .await
            .map_err(unreachable)?;

        let res: LoadExpensesResponse = Self::decode(response).await?;
        if !res.status {
            return Err(RemoteError::rejected(None));
        }

        debug!("📥 Loaded {} expenses from server", res.expense_list.len());
        Ok(res.expense_list)
    }

    async fn create_expense(&self, request: &SaveExpenseRequest) -> Result<CreatedExpense, RemoteError> {
        let response = self
            .client
            .post(self.endpoint("SaveExpenses"))
            .json(request)
            .send()
            .await
            .map_err(unreachable)?;

        let res: SaveExpenseResponse = Self::decode(response).await?;
        if !res.status {
            return Err(RemoteError::rejected(res.message));
        }

        Ok(CreatedExpense { server_id: res.id })
    }

    async fn delete_expense(&self, id: &str) -> Result<(), RemoteError> {
        let response = self
            .client
            .delete(self.endpoint("DeleteExpenses"))
            .query(&[("id", id)])
            .send()
            .await
            .map_err(unreachable)?;

        let res: DeleteExpenseResponse = Self::decode(response).await?;
        if !res.status {
            return Err(RemoteError::rejected(res.message));
        }

        Ok(())
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoggedUser, RemoteError> {
        let response = self
            .client
            .post(self.endpoint("Login"))
            .json(request)
            .send()
            .await
            .map_err(unreachable)?;

        let res: LoginResponse = Self::decode(response).await?;
        match (res.status, res.log_user) {
            (true, Some(user)) => Ok(user),
            (true, None) => Err(RemoteError::InvalidResponse(
                "login succeeded without a user".to_string(),
            )),
            (false, _) => Err(RemoteError::rejected(res.message)),
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Option<String>, RemoteError> {
        let response = self
            .client
            .post(self.endpoint("Register"))
            .json(request)
            .send()
            .await
            .map_err(unreachable)?;

        let res: RegisterResponse = Self::decode(response).await?;
        if !res.status {
            return Err(RemoteError::rejected(res.message));
        }

        Ok(res.message)
    }
}
