use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::credentials::Credentials;
use crate::error::RemoteError;

/// An authenticated context, as produced by a successful refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: String,
    established_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            established_at: Utc::now(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn established_at(&self) -> DateTime<Utc> {
        self.established_at
    }
}

/// Sends credentials to the account service.
///
/// Uses `async-trait` for object safety (`dyn CredentialSubmitter`).
#[async_trait]
pub trait CredentialSubmitter: Send + Sync {
    /// Ok means the service accepted the credentials; nothing else is inspected.
    async fn submit(&self, credentials: &Credentials) -> Result<(), RemoteError>;
}

/// Owner of the "current user" state for the rest of the application.
#[async_trait]
pub trait SessionManager: Send + Sync {
    /// Turn previously accepted credentials into an established session.
    async fn refresh(&self) -> Result<Session, RemoteError>;

    /// The session established by the last successful refresh, if any.
    fn current(&self) -> Option<Session>;
}
