//! Authenticated session issued by the identity provider.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::text::email_local_part;

/// Tokens closer than this to expiry are refreshed before use.
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// An authenticated principal and its bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Provider-assigned user id.
    pub uid: String,

    pub email: String,

    /// Display name set on the account, if any.
    pub display_name: Option<String>,

    /// Bearer token attached to outbound requests.
    pub id_token: String,

    /// Long-lived token used to obtain a fresh `id_token`.
    pub refresh_token: Option<String>,

    /// When `id_token` stops being accepted. `None` means it never expires.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Name shown in the dashboard header.
    pub fn display_name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => email_local_part(&self.email),
        }
    }

    /// Whether the bearer token must be refreshed before use at `now`.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at - Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) <= now,
            None => false,
        }
    }
}

// Tokens stay out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("uid", &self.uid)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Sign-in state pushed to observers on every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    SignedIn(Session),
    SignedOut,
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::SignedIn(session) => Some(session),
            SessionState::SignedOut => None,
        }
    }
}

impl From<Option<Session>> for SessionState {
    fn from(session: Option<Session>) -> Self {
        match session {
            Some(session) => SessionState::SignedIn(session),
            None => SessionState::SignedOut,
        }
    }
}
