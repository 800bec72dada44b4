use crate::controller::LoginOutcome;
use crate::credentials::{Credentials, Field, ValidationErrors};

/// State behind the login screen.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// Collected by the screen but not wired into session persistence.
    pub remember_me: bool,
    pub errors: ValidationErrors,
    /// Drives the spinner; true while an attempt is in flight.
    pub busy: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    /// Mark the form busy for an attempt about to start.
    pub fn begin(&mut self) {
        self.busy = true;
    }

    /// Reflect a finished attempt. Once signed in the password is no longer
    /// held by the form.
    pub fn apply(&mut self, outcome: &LoginOutcome) {
        match outcome {
            LoginOutcome::Ignored => return,
            LoginOutcome::Invalid(errors) => self.errors = errors.clone(),
            LoginOutcome::Authenticated(_) => {
                self.errors = ValidationErrors::new();
                self.password.clear();
            }
            LoginOutcome::Failed(err) => self.errors = err.to_field_errors(),
        }
        self.busy = false;
    }
}
