use thiserror::Error;

use crate::credentials::ValidationErrors;

/// Message shown when a failure carries nothing more specific.
pub const GENERIC_FAILURE: &str = "Login failed";

/// Failure reported by an external collaborator (submission or refresh).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The service understood the request and refused it.
    #[error("{0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status})")]
    Server { status: u16, message: Option<String> },

    /// No response and nothing to report.
    #[error("Service unavailable")]
    Unavailable,
}

impl RemoteError {
    /// Human-readable message supplied by the collaborator, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Rejected(msg) | Self::Network(msg) => Some(msg),
            Self::Server { message, .. } => message.as_deref(),
            Self::Unavailable => None,
        }
    }
}

fn or_generic(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or(GENERIC_FAILURE)
}

/// Which stage of an attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Submission,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid input: {0}")]
    Validation(ValidationErrors),

    #[error("Submission failed: {}", or_generic(.message))]
    Submission { message: Option<String> },

    /// Credentials were accepted but no session could be established.
    #[error("Session refresh failed: {}", or_generic(.message))]
    Refresh { message: Option<String> },
}

impl AuthError {
    pub fn submission(err: &RemoteError) -> Self {
        Self::Submission {
            message: err.message().map(str::to_owned),
        }
    }

    pub fn refresh(err: &RemoteError) -> Self {
        Self::Refresh {
            message: err.message().map(str::to_owned),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Submission { .. } => ErrorKind::Submission,
            Self::Refresh { .. } => ErrorKind::Refresh,
        }
    }

    /// The single line a login screen shows for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(errors) => errors.to_string(),
            Self::Submission { message } | Self::Refresh { message } => message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(GENERIC_FAILURE)
                .to_string(),
        }
    }

    /// Errors as the form displays them. Submission and refresh failures
    /// share the `submit` key.
    pub fn to_field_errors(&self) -> ValidationErrors {
        match self {
            Self::Validation(errors) => errors.clone(),
            Self::Submission { .. } | Self::Refresh { .. } => {
                ValidationErrors::submit(self.user_message())
            }
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
