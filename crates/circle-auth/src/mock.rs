//! In-memory collaborators for testing the login flow.
//!
//! Enabled by the `test-utils` feature for downstream test suites.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::credentials::Credentials;
use crate::error::RemoteError;
use crate::traits::{CredentialSubmitter, Session, SessionManager};

/// One recorded collaborator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Submit { email: String },
    Refresh,
}

/// Call history shared by a submitter and a session manager, so tests can
/// assert ordering across both.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    fn record(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.0.lock().unwrap().iter().filter(|c| *c == call).count()
    }
}

/// Holds a submit call open until the test releases it.
#[derive(Debug, Default)]
pub struct Gate {
    entered: Notify,
    released: Notify,
}

impl Gate {
    /// Resolves once a submit call has reached the gate.
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.released.notify_one();
    }
}

#[derive(Debug, Clone)]
enum SubmitBehavior {
    Accept,
    Reject(RemoteError),
    Panic,
}

pub struct MockSubmitter {
    log: CallLog,
    behavior: SubmitBehavior,
    gate: Option<Arc<Gate>>,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl MockSubmitter {
    pub fn accepting(log: &CallLog) -> Self {
        Self::with_behavior(log, SubmitBehavior::Accept)
    }

    pub fn rejecting(log: &CallLog, error: RemoteError) -> Self {
        Self::with_behavior(log, SubmitBehavior::Reject(error))
    }

    pub fn panicking(log: &CallLog) -> Self {
        Self::with_behavior(log, SubmitBehavior::Panic)
    }

    /// Block every submit call on the returned gate.
    pub fn gated(mut self) -> (Self, Arc<Gate>) {
        let gate = Arc::new(Gate::default());
        self.gate = Some(gate.clone());
        (self, gate)
    }

    /// Most submit calls ever running at the same time.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn with_behavior(log: &CallLog, behavior: SubmitBehavior) -> Self {
        Self {
            log: log.clone(),
            behavior,
            gate: None,
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }
}

/// Counts one running submit call for as long as it lives.
struct Active<'a>(&'a AtomicUsize);

impl Drop for Active<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CredentialSubmitter for MockSubmitter {
    async fn submit(&self, credentials: &Credentials) -> Result<(), RemoteError> {
        let running = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        let _active = Active(&self.active);
        self.peak.fetch_max(running, Ordering::SeqCst);

        self.log.record(Call::Submit {
            email: credentials.email.clone(),
        });
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.released.notified().await;
        }
        tokio::task::yield_now().await;
        match &self.behavior {
            SubmitBehavior::Accept => Ok(()),
            SubmitBehavior::Reject(e) => Err(e.clone()),
            SubmitBehavior::Panic => panic!("mock submitter exploded"),
        }
    }
}

#[derive(Debug, Clone)]
enum RefreshBehavior {
    Succeed(String),
    Fail(RemoteError),
    Panic,
}

pub struct MockSessionManager {
    log: CallLog,
    behavior: RefreshBehavior,
    current: RwLock<Option<Session>>,
}

impl MockSessionManager {
    pub fn succeeding(log: &CallLog, user_id: &str) -> Self {
        Self::with_behavior(log, RefreshBehavior::Succeed(user_id.to_string()))
    }

    pub fn failing(log: &CallLog, error: RemoteError) -> Self {
        Self::with_behavior(log, RefreshBehavior::Fail(error))
    }

    pub fn panicking(log: &CallLog) -> Self {
        Self::with_behavior(log, RefreshBehavior::Panic)
    }

    fn with_behavior(log: &CallLog, behavior: RefreshBehavior) -> Self {
        Self {
            log: log.clone(),
            behavior,
            current: RwLock::new(None),
        }
    }
}

#[async_trait]
impl SessionManager for MockSessionManager {
    async fn refresh(&self) -> Result<Session, RemoteError> {
        self.log.record(Call::Refresh);
        let session = match &self.behavior {
            RefreshBehavior::Succeed(user_id) => Session::new(user_id.as_str()),
            RefreshBehavior::Fail(e) => return Err(e.clone()),
            RefreshBehavior::Panic => panic!("mock session manager exploded"),
        };
        *self.current.write().unwrap() = Some(session.clone());
        Ok(session)
    }

    fn current(&self) -> Option<Session> {
        self.current.read().unwrap().clone()
    }
}
