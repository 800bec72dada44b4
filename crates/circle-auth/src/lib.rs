//! Authentication flow for the Circle client: form validation, a
//! single-flight login controller, and the collaborator seams it calls into.

pub mod controller;
pub mod credentials;
pub mod error;
pub mod events;
pub mod form;
pub mod traits;
pub mod validator;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use controller::{AttemptState, Destination, LoginFlowController, LoginOutcome};
pub use credentials::{Credentials, Field, ValidationErrors};
pub use error::{AuthError, AuthResult, ErrorKind, RemoteError};
pub use events::LoginEvent;
pub use form::LoginForm;
pub use traits::{CredentialSubmitter, Session, SessionManager};
pub use validator::validate;
