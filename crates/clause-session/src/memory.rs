//! In-memory identity provider for development and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use clause_core::{ClauseError, Result, Session};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::provider::{provider_message, IdentityProvider};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    password: String,
    display_name: Option<String>,
}

/// Identity provider that keeps accounts in memory.
///
/// Error messages mirror the hosted provider so forms behave the same way.
pub struct InMemoryIdentityProvider {
    /// Accounts keyed by email.
    accounts: Arc<RwLock<HashMap<String, Account>>>,

    /// Live refresh tokens, at most one per account: token -> email.
    refresh_tokens: Arc<RwLock<HashMap<String, String>>>,

    /// Lifetime of issued bearer tokens.
    token_lifetime: Duration,
}

impl InMemoryIdentityProvider {
    /// Create a provider with no accounts and one-hour tokens.
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            refresh_tokens: Arc::new(RwLock::new(HashMap::new())),
            token_lifetime: Duration::hours(1),
        }
    }

    /// Set the lifetime of issued bearer tokens.
    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    /// Register an account up front.
    pub async fn add_account(&self, email: &str, password: &str, display_name: Option<&str>) {
        let mut accounts = self.accounts.write().await;
        accounts.insert(
            email.to_string(),
            Account {
                uid: Uuid::new_v4().to_string(),
                password: password.to_string(),
                display_name: display_name.map(str::to_string),
            },
        );
    }

    /// Delete an account. Sessions issued for it can no longer refresh.
    pub async fn remove_account(&self, email: &str) {
        self.accounts.write().await.remove(email);
    }

    /// Get the number of registered accounts.
    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Issue a session. Earlier refresh tokens for the account stop working.
    async fn issue(&self, email: &str, account: &Account) -> Session {
        let refresh_token = format!("refresh-{}", Uuid::new_v4());
        {
            let mut tokens = self.refresh_tokens.write().await;
            tokens.retain(|_, owner| owner != email);
            tokens.insert(refresh_token.clone(), email.to_string());
        }

        Session {
            uid: account.uid.clone(),
            email: email.to_string(),
            display_name: account.display_name.clone(),
            id_token: format!("token-{}", Uuid::new_v4()),
            refresh_token: Some(refresh_token),
            expires_at: Some(Utc::now() + self.token_lifetime),
        }
    }
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn rejected(code: &str) -> ClauseError {
    ClauseError::Provider(provider_message(code))
}

fn check_credentials(email: &str, password: &str) -> Result<()> {
    if email.is_empty() {
        return Err(rejected("MISSING_EMAIL"));
    }
    if !email.contains('@') {
        return Err(rejected("INVALID_EMAIL"));
    }
    if password.is_empty() {
        return Err(rejected("MISSING_PASSWORD"));
    }
    Ok(())
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<Session> {
        check_credentials(email, password)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(rejected(
                "WEAK_PASSWORD : Password should be at least 6 characters",
            ));
        }

        let account = {
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(email) {
                return Err(rejected("EMAIL_EXISTS"));
            }
            let account = Account {
                uid: Uuid::new_v4().to_string(),
                password: password.to_string(),
                display_name: None,
            };
            accounts.insert(email.to_string(), account.clone());
            account
        };

        Ok(self.issue(email, &account).await)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        check_credentials(email, password)?;

        let account = {
            let accounts = self.accounts.read().await;
            match accounts.get(email) {
                Some(account) if account.password == password => account.clone(),
                _ => return Err(rejected("INVALID_LOGIN_CREDENTIALS")),
            }
        };

        Ok(self.issue(email, &account).await)
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        if let Some(token) = &session.refresh_token {
            self.refresh_tokens.write().await.remove(token);
        }
        Ok(())
    }

    async fn refresh(&self, session: &Session) -> Result<Session> {
        let token = session
            .refresh_token
            .as_deref()
            .ok_or_else(|| rejected("INVALID_REFRESH_TOKEN"))?;

        let email = self
            .refresh_tokens
            .write()
            .await
            .remove(token)
            .ok_or_else(|| rejected("INVALID_REFRESH_TOKEN"))?;

        let account = self
            .accounts
            .read()
            .await
            .get(&email)
            .cloned()
            .ok_or_else(|| rejected("USER_NOT_FOUND"))?;

        Ok(self.issue(&email, &account).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_sign_in() {
        let provider = InMemoryIdentityProvider::new();

        let created = provider.create_account("a@example.com", "hunter22").await.unwrap();
        let signed_in = provider.sign_in("a@example.com", "hunter22").await.unwrap();

        assert_eq!(created.uid, signed_in.uid);
        assert_ne!(created.id_token, signed_in.id_token);
        assert_eq!(provider.account_count().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_account() {
        let provider = InMemoryIdentityProvider::new();
        provider.add_account("a@example.com", "hunter22", None).await;

        let err = provider.create_account("a@example.com", "another1").await.unwrap_err();
        assert_eq!(err.user_message(), "Firebase: Error (auth/email-already-in-use).");
    }

    #[tokio::test]
    async fn test_weak_password() {
        let provider = InMemoryIdentityProvider::new();
        let err = provider.create_account("a@example.com", "123").await.unwrap_err();
        assert!(err.user_message().contains("auth/weak-password"));
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let provider = InMemoryIdentityProvider::new();
        provider.add_account("a@example.com", "hunter22", Some("Ada")).await;

        let err = provider.sign_in("a@example.com", "nope").await.unwrap_err();
        assert_eq!(err.user_message(), "Firebase: Error (auth/invalid-credential).");
    }

    #[tokio::test]
    async fn test_refresh_rotates_token() {
        let provider = InMemoryIdentityProvider::new();
        provider.add_account("a@example.com", "hunter22", Some("Ada")).await;
        let session = provider.sign_in("a@example.com", "hunter22").await.unwrap();

        let refreshed = provider.refresh(&session).await.unwrap();
        assert_ne!(refreshed.id_token, session.id_token);
        assert_eq!(refreshed.display_name.as_deref(), Some("Ada"));

        // The old refresh token was consumed.
        assert!(provider.refresh(&session).await.is_err());
    }

    #[tokio::test]
    async fn test_sign_in_replaces_refresh_token() {
        let provider = InMemoryIdentityProvider::new();
        provider.add_account("a@example.com", "hunter22", None).await;
        provider.add_account("b@example.com", "hunter22", None).await;
        let other = provider.sign_in("b@example.com", "hunter22").await.unwrap();

        let stale = provider.sign_in("a@example.com", "hunter22").await.unwrap();
        for _ in 0..5 {
            provider.sign_in("a@example.com", "hunter22").await.unwrap();
        }
        assert_eq!(provider.refresh_tokens.read().await.len(), 2);

        let latest = provider.sign_in("a@example.com", "hunter22").await.unwrap();
        assert!(provider.refresh(&stale).await.is_err());
        assert!(provider.refresh(&latest).await.is_ok());
        assert!(provider.refresh(&other).await.is_ok());
    }

    #[tokio::test]
    async fn test_refresh_fails_for_removed_account() {
        let provider = InMemoryIdentityProvider::new();
        provider.add_account("a@example.com", "hunter22", None).await;
        let session = provider.sign_in("a@example.com", "hunter22").await.unwrap();

        provider.remove_account("a@example.com").await;
        assert!(provider.refresh(&session).await.is_err());
    }
}
