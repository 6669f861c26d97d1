//! Login and signup forms.

use std::sync::Arc;

use clause_core::{ClauseError, Result};
use clause_session::SessionService;
use tracing::{info, warn};

use crate::surface::{Screen, Surface};

pub const LOGIN_SUCCESS_NOTICE: &str = "Login successful! Redirecting...";
pub const SIGNUP_SUCCESS_NOTICE: &str = "Signup successful! Redirecting to login...";
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Please enter your email and password.";

/// Submits credentials to the identity provider.
pub struct CredentialForms {
    session: Arc<SessionService>,
    surface: Arc<dyn Surface>,
}

impl CredentialForms {
    pub fn new(session: Arc<SessionService>, surface: Arc<dyn Surface>) -> Self {
        Self { session, surface }
    }

    /// Sign in, then go to the dashboard.
    pub async fn submit_login(&self, email: &str, password: &str) {
        let outcome = match required(email, password) {
            Ok(email) => self.session.sign_in(email, password).await.map(|_| ()),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => {
                self.surface.alert(LOGIN_SUCCESS_NOTICE);
                self.surface.navigate(Screen::Dashboard);
            }
            Err(e) => self.reject("login", e),
        }
    }

    /// Create an account, then go to the login screen.
    pub async fn submit_signup(&self, email: &str, password: &str) {
        let outcome = match required(email, password) {
            Ok(email) => self.session.create_account(email, password).await.map(|_| ()),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => {
                info!("Signup complete");
                self.surface.alert(SIGNUP_SUCCESS_NOTICE);
                self.surface.navigate(Screen::Login);
            }
            Err(e) => self.reject("signup", e),
        }
    }

    fn reject(&self, form: &str, e: ClauseError) {
        warn!(form, kind = ?e.kind(), "{}", e);
        self.surface.show_form_error(e.user_message());
    }
}

fn required<'a>(email: &'a str, password: &str) -> Result<&'a str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ClauseError::Validation(MISSING_CREDENTIALS_MESSAGE.to_string()));
    }
    Ok(email)
}
