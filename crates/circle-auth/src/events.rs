use crate::credentials::ValidationErrors;
use crate::error::ErrorKind;

/// Events emitted by the login flow for the UI to handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEvent {
    ValidationFailed(ValidationErrors),
    Submitting,
    Authenticated { user_id: String },
    Failed { kind: ErrorKind, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_event_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<LoginEvent>();
    }

    #[test]
    fn login_event_clone() {
        let event = LoginEvent::Failed {
            kind: ErrorKind::Submission,
            message: "Invalid credentials".into(),
        };
        let cloned = event.clone();
        if let LoginEvent::Failed { kind, message } = cloned {
            assert_eq!(kind, ErrorKind::Submission);
            assert_eq!(message, "Invalid credentials");
        } else {
            panic!("Clone should preserve variant");
        }
    }
}
