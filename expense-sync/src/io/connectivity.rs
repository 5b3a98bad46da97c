//! Bounded-time reachability check against the ExpenseTracker service.
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use std::time::Duration;

/// Hard limit on how long a probe may take
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// `true` if the service answered at all before the timeout
    async fn check_online(&self) -> bool;
}

/// Issues a HEAD against the service and races it against a timeout
///
/// Any HTTP response counts as reachable, even an error status; only a
/// transport failure or the timeout firing yields `false`.
#[derive(Clone, Debug)]
pub struct HttpConnectivityProbe {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpConnectivityProbe {
    pub fn new(client: Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ConnectivityProbe for HttpConnectivityProbe {
    async fn check_online(&self) -> bool {
        match tokio::time::timeout(self.timeout, self.client.head(&self.url).send()).await {
            Ok(Ok(response)) => {
                if response.status().is_success() {
                    debug!("🌐 {} reachable", self.url);
                } else {
                    warn!(
                        "⚠️ {} reachable but answered HTTP {}",
                        self.url,
                        response.status()
                    );
                }
                true
            }
            Ok(Err(e)) => {
                info!("📴 {} unreachable: {}", self.url, e);
                false
            }
            Err(_) => {
                info!("📴 {} did not answer within {:?}", self.url, self.timeout);
                false
            }
        }
    }
}
