//! Offline account directory: answers login calls from the accounts listed
//! in the config instead of a remote service.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use circle_auth::{CredentialSubmitter, Credentials, RemoteError, Session, SessionManager};
use circle_core::config::{AccountConfig, AppConfig};

const REJECTED: &str = "Invalid credentials";

pub struct OfflineDirectory {
    accounts: Vec<AccountConfig>,
    latency: Duration,
    fail_refresh: bool,
    /// User whose credentials were accepted and await a session.
    accepted: RwLock<Option<String>>,
    current: RwLock<Option<Session>>,
}

impl OfflineDirectory {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            accounts: config.accounts.clone(),
            latency: Duration::from_millis(config.auth.latency_ms),
            fail_refresh: config.auth.fail_refresh,
            accepted: RwLock::new(None),
            current: RwLock::new(None),
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn find(&self, email: &str) -> Option<&AccountConfig> {
        self.accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
    }
}

#[async_trait]
impl CredentialSubmitter for OfflineDirectory {
    async fn submit(&self, credentials: &Credentials) -> Result<(), RemoteError> {
        self.simulate_latency().await;

        let account = self
            .find(&credentials.email)
            .filter(|a| a.password == credentials.password)
            .ok_or_else(|| RemoteError::Rejected(REJECTED.into()))?;

        tracing::debug!("Offline directory accepted {}", account.email);
        *self.accepted.write().unwrap_or_else(|e| e.into_inner()) =
            Some(account.user_id().to_string());
        Ok(())
    }
}

#[async_trait]
impl SessionManager for OfflineDirectory {
    async fn refresh(&self) -> Result<Session, RemoteError> {
        self.simulate_latency().await;

        if self.fail_refresh {
            return Err(RemoteError::Server {
                status: 503,
                message: Some("Session service unavailable".into()),
            });
        }

        let user_id = self
            .accepted
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .ok_or(RemoteError::Unavailable)?;

        let session = Session::new(user_id);
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(session)
    }

    fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
