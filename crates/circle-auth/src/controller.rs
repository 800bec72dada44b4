//! Login attempt lifecycle: validate, submit, refresh the session, report.
//!
//! `Idle → Submitting → {Succeeded | Failed}`. Only `Submitting` blocks a new
//! attempt; the two terminal states are for display and any later submit
//! starts a fresh cycle.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;

use crate::credentials::{Credentials, ValidationErrors};
use crate::error::{AuthError, AuthResult, RemoteError};
use crate::events::LoginEvent;
use crate::traits::{CredentialSubmitter, Session, SessionManager};
use crate::validator::validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttemptState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Where the presentation layer should take the user next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The authenticated landing surface.
    Home,
}

/// Result of one call to [`LoginFlowController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Another attempt was already in flight; nothing happened.
    Ignored,
    /// Input failed client-side checks; no collaborator was contacted.
    Invalid(ValidationErrors),
    Authenticated(Session),
    Failed(AuthError),
}

impl LoginOutcome {
    pub fn navigation(&self) -> Option<Destination> {
        match self {
            Self::Authenticated(_) => Some(Destination::Home),
            _ => None,
        }
    }

    /// Field errors to display, if this outcome produced any.
    pub fn errors(&self) -> Option<ValidationErrors> {
        match self {
            Self::Invalid(errors) => Some(errors.clone()),
            Self::Failed(err) => Some(err.to_field_errors()),
            Self::Ignored | Self::Authenticated(_) => None,
        }
    }
}

#[derive(Debug, Default)]
struct Flow {
    attempt: AttemptState,
    errors: ValidationErrors,
}

fn lock(flow: &Mutex<Flow>) -> MutexGuard<'_, Flow> {
    flow.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks an attempt as in flight. Dropping it unsettled (the submit future
/// was cancelled) puts the controller back to `Idle`.
struct InFlight<'a> {
    flow: &'a Mutex<Flow>,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, result: &AuthResult<Session>) {
        let mut flow = lock(self.flow);
        match result {
            Ok(_) => flow.attempt = AttemptState::Succeeded,
            Err(err) => {
                flow.attempt = AttemptState::Failed;
                flow.errors = err.to_field_errors();
            }
        }
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut flow = lock(self.flow);
        if flow.attempt == AttemptState::Submitting {
            flow.attempt = AttemptState::Idle;
        }
        tracing::debug!("Login attempt dropped before it settled");
    }
}

/// Drives login attempts against an injected submitter and session manager.
///
/// Safe to share behind an `Arc`; at most one attempt runs at a time and
/// overlapping submits are ignored.
pub struct LoginFlowController {
    submitter: Arc<dyn CredentialSubmitter>,
    sessions: Arc<dyn SessionManager>,
    flow: Mutex<Flow>,
    events: Option<mpsc::Sender<LoginEvent>>,
}

impl LoginFlowController {
    pub fn new(
        submitter: Arc<dyn CredentialSubmitter>,
        sessions: Arc<dyn SessionManager>,
    ) -> Self {
        Self {
            submitter,
            sessions,
            flow: Mutex::new(Flow::default()),
            events: None,
        }
    }

    /// Report progress to a UI listening on `tx`.
    pub fn with_events(mut self, tx: mpsc::Sender<LoginEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn state(&self) -> AttemptState {
        lock(&self.flow).attempt
    }

    pub fn is_submitting(&self) -> bool {
        self.state() == AttemptState::Submitting
    }

    /// Errors from the most recent attempt.
    pub fn errors(&self) -> ValidationErrors {
        lock(&self.flow).errors.clone()
    }

    /// Clear errors and return to `Idle`. Has no effect while submitting.
    pub fn reset(&self) -> bool {
        let mut flow = lock(&self.flow);
        if flow.attempt == AttemptState::Submitting {
            return false;
        }
        flow.attempt = AttemptState::Idle;
        flow.errors = ValidationErrors::new();
        true
    }

    /// Run one attempt with `credentials`.
    ///
    /// Collaborator failures, including panics, come back as
    /// [`LoginOutcome::Failed`] tagged with the stage that failed; this never
    /// returns with the controller still `Submitting`.
    pub async fn submit(&self, credentials: &Credentials) -> LoginOutcome {
        {
            let mut flow = lock(&self.flow);
            if flow.attempt == AttemptState::Submitting {
                tracing::debug!("Login already in flight, ignoring submit");
                return LoginOutcome::Ignored;
            }

            let errors = validate(credentials);
            if !errors.is_empty() {
                tracing::debug!("Login form rejected: {errors}");
                flow.attempt = AttemptState::Idle;
                flow.errors = errors.clone();
                drop(flow);
                self.emit(LoginEvent::ValidationFailed(errors.clone()));
                return LoginOutcome::Invalid(errors);
            }

            flow.attempt = AttemptState::Submitting;
            flow.errors = ValidationErrors::new();
        }
        self.emit(LoginEvent::Submitting);

        let in_flight = InFlight {
            flow: &self.flow,
            settled: false,
        };
        let result = self.attempt(credentials).await;
        in_flight.settle(&result);

        match result {
            Ok(session) => {
                tracing::info!("Signed in as {}", session.user_id());
                self.emit(LoginEvent::Authenticated {
                    user_id: session.user_id().to_string(),
                });
                LoginOutcome::Authenticated(session)
            }
            Err(err) => {
                self.emit(LoginEvent::Failed {
                    kind: err.kind(),
                    message: err.user_message(),
                });
                LoginOutcome::Failed(err)
            }
        }
    }

    async fn attempt(&self, credentials: &Credentials) -> AuthResult<Session> {
        let submitted = contained("Credential submitter", self.submitter.submit(credentials)).await;
        if let Err(e) = submitted {
            tracing::warn!("Credential submission failed: {e}");
            return Err(AuthError::submission(&e));
        }

        tracing::debug!("Credentials accepted, refreshing session");
        contained("Session manager", self.sessions.refresh())
            .await
            .map_err(|e| {
                tracing::warn!("Session refresh failed after accepted credentials: {e}");
                AuthError::refresh(&e)
            })
    }

    fn emit(&self, event: LoginEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }
}

/// Run one collaborator call, turning a panic into a failure with no message.
async fn contained<T>(
    collaborator: &str,
    call: impl Future<Output = Result<T, RemoteError>>,
) -> Result<T, RemoteError> {
    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!("{collaborator} panicked during login");
            Err(RemoteError::Unavailable)
        }
    }
}
