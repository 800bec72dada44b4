use std::time::Duration;

use anyhow::{bail, Result};
use circle_auth::{Destination, LoginForm, LoginOutcome, ValidationErrors};
use circle_core::config::AppConfig;

use crate::setup::create_controller;

pub async fn login(
    config: &AppConfig,
    email: String,
    password: String,
    remember_me: bool,
) -> Result<()> {
    let controller = create_controller(config);
    let mut form = LoginForm {
        email,
        password,
        remember_me,
        ..LoginForm::default()
    };
    if form.remember_me {
        tracing::debug!("Remember-me requested; sessions are not persisted");
    }

    form.begin();
    let credentials = form.credentials();
    let attempt = controller.submit(&credentials);
    let outcome = match config.auth.submit_timeout_secs {
        0 => attempt.await,
        secs => match tokio::time::timeout(Duration::from_secs(secs), attempt).await {
            Ok(outcome) => outcome,
            Err(_) => bail!("Login timed out after {secs}s"),
        },
    };
    form.apply(&outcome);

    match (&outcome, outcome.navigation()) {
        (LoginOutcome::Authenticated(session), Some(Destination::Home)) => {
            tracing::debug!("Session established at {}", session.established_at());
            println!("Signed in as {}", session.user_id());
            println!("Destination: home");
            Ok(())
        }
        _ => {
            if let Some(errors) = outcome.errors() {
                print_errors(&errors);
            }
            bail!("Login failed")
        }
    }
}

pub fn validate(email: String, password: String, json: bool) -> Result<()> {
    let form = LoginForm {
        email,
        password,
        ..LoginForm::default()
    };
    let errors = circle_auth::validate(&form.credentials());

    if json {
        println!("{}", serde_json::to_string(&errors)?);
    } else if errors.is_empty() {
        println!("valid");
    } else {
        print_errors(&errors);
    }

    if !errors.is_empty() {
        bail!("Invalid input");
    }
    Ok(())
}

fn print_errors(errors: &ValidationErrors) {
    for (field, message) in errors.iter() {
        println!("{field}: {message}");
    }
}
