//! Client-side checks run before any credentials leave the device.

use std::sync::OnceLock;

use regex::Regex;

use crate::credentials::{Credentials, Field, ValidationErrors};

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email format";
pub const PASSWORD_REQUIRED: &str = "Password is required";

/// Loose shape check: `local@domain.tld`, no whitespace, exactly one `@`.
fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.\S+$").expect("valid email regex"))
}

/// Check every field and collect all violations.
///
/// Pure: the same input always yields the same mapping, and an empty
/// mapping means the credentials may be submitted.
pub fn validate(credentials: &Credentials) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if credentials.email.trim().is_empty() {
        errors.insert(Field::Email, EMAIL_REQUIRED);
    } else if !email_pattern().is_match(&credentials.email) {
        errors.insert(Field::Email, EMAIL_INVALID);
    }

    if credentials.password.trim().is_empty() {
        errors.insert(Field::Password, PASSWORD_REQUIRED);
    }

    errors
}
