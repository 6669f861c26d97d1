//! The identity provider seam.

use async_trait::async_trait;
use clause_core::{Result, Session};

/// Operations offered by an external identity provider.
///
/// Failures are reported as [`clause_core::ClauseError::Provider`] carrying the
/// provider's human-readable message.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account. The new user is signed in on success.
    async fn create_account(&self, email: &str, password: &str) -> Result<Session>;

    /// Sign in with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// End a session.
    async fn sign_out(&self, session: &Session) -> Result<()>;

    /// Exchange the session's refresh token for a fresh bearer token.
    async fn refresh(&self, session: &Session) -> Result<Session>;
}

/// Render a provider error code the way the browser SDK presents it.
///
/// `raw` is the provider's message field, e.g. `EMAIL_EXISTS` or
/// `WEAK_PASSWORD : Password should be at least 6 characters`.
pub fn provider_message(raw: &str) -> String {
    let (code, detail) = match raw.split_once(" : ") {
        Some((code, detail)) => (code.trim(), Some(detail.trim())),
        None => (raw.trim(), None),
    };

    let auth_code = match code {
        "EMAIL_EXISTS" => "email-already-in-use",
        "EMAIL_NOT_FOUND" => "user-not-found",
        "INVALID_PASSWORD" => "wrong-password",
        "INVALID_LOGIN_CREDENTIALS" => "invalid-credential",
        "INVALID_EMAIL" => "invalid-email",
        "MISSING_EMAIL" => "missing-email",
        "MISSING_PASSWORD" => "missing-password",
        "WEAK_PASSWORD" => "weak-password",
        "USER_DISABLED" => "user-disabled",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "too-many-requests",
        "OPERATION_NOT_ALLOWED" => "operation-not-allowed",
        "TOKEN_EXPIRED" => "user-token-expired",
        "INVALID_REFRESH_TOKEN" | "USER_NOT_FOUND" => "invalid-user-token",
        _ => return format!("Firebase: {}.", code),
    };

    match detail {
        Some(detail) => format!("Firebase: {} (auth/{}).", detail.trim_end_matches('.'), auth_code),
        None => format!("Firebase: Error (auth/{}).", auth_code),
    }
}
