//! Observable session state.
//!
//! [`SessionService`] is the single source of truth for who is signed in.
//! Components read it without owning it: they either ask for the current
//! session synchronously or subscribe to transitions.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock as StdRwLock};

use chrono::Utc;
use clause_core::{ClauseError, Result, Session, SessionState};
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

use crate::provider::IdentityProvider;

/// Shown when an action needs a session and none exists.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to use this feature.";

/// Shown when the bearer token could not be refreshed.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// A subscription to session transitions.
///
/// The first call to [`SessionSubscription::next`] yields the state at the
/// time of subscribing; later calls yield each transition.
pub struct SessionSubscription {
    /// Unique ID for this subscription.
    pub id: Uuid,

    initial: Option<SessionState>,

    receiver: broadcast::Receiver<SessionState>,
}

impl SessionSubscription {
    /// Wait for the next state. Returns `None` once the service is gone.
    pub async fn next(&mut self) -> Option<SessionState> {
        if let Some(state) = self.initial.take() {
            return Some(state);
        }

        loop {
            match self.receiver.recv().await {
                Ok(state) => return Some(state),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Session subscriber lagged behind");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// Session state shared by every component of the front end.
pub struct SessionService {
    provider: Arc<dyn IdentityProvider>,

    current: StdRwLock<Option<Session>>,

    sender: broadcast::Sender<SessionState>,

    /// Active subscriptions.
    subscriptions: RwLock<HashSet<Uuid>>,
}

impl SessionService {
    /// Create a signed-out service backed by `provider`.
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (sender, _) = broadcast::channel(64);
        Self {
            provider,
            current: StdRwLock::new(None),
            sender,
            subscriptions: RwLock::new(HashSet::new()),
        }
    }

    /// The signed-in session, if any.
    pub fn current_session(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current_session().is_some()
    }

    /// Sign in and notify subscribers.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let session = self.provider.sign_in(email, password).await?;
        info!(email = %session.email, "Signed in");
        self.install(Some(session.clone()));
        Ok(session)
    }

    /// Create an account. The provider signs the new user in.
    pub async fn create_account(&self, email: &str, password: &str) -> Result<Session> {
        let session = self.provider.create_account(email, password).await?;
        info!(email = %session.email, "Account created");
        self.install(Some(session.clone()));
        Ok(session)
    }

    /// Sign out and notify subscribers.
    pub async fn sign_out(&self) -> Result<()> {
        if let Some(session) = self.current_session() {
            self.provider.sign_out(&session).await?;
            info!(email = %session.email, "Signed out");
        }
        self.install(None);
        Ok(())
    }

    /// Bearer token of the current session, refreshed when close to expiry.
    ///
    /// A failed refresh signs the user out.
    pub async fn bearer_token(&self) -> Result<String> {
        let session = self
            .current_session()
            .ok_or_else(|| ClauseError::Auth(LOGIN_REQUIRED_MESSAGE.to_string()))?;

        if !session.needs_refresh(Utc::now()) {
            return Ok(session.id_token);
        }

        match self.provider.refresh(&session).await {
            Ok(refreshed) => {
                let token = refreshed.id_token.clone();
                self.install(Some(refreshed));
                Ok(token)
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed, ending session");
                self.install(None);
                Err(ClauseError::Auth(SESSION_EXPIRED_MESSAGE.to_string()))
            }
        }
    }

    /// Subscribe to session transitions.
    pub async fn subscribe(&self) -> SessionSubscription {
        let id = Uuid::new_v4();
        // Take the receiver before the snapshot so no transition is missed.
        let receiver = self.sender.subscribe();
        let initial = SessionState::from(self.current_session());

        self.subscriptions.write().await.insert(id);

        SessionSubscription {
            id,
            initial: Some(initial),
            receiver,
        }
    }

    /// Unsubscribe from session transitions.
    pub async fn unsubscribe(&self, id: Uuid) {
        self.subscriptions.write().await.remove(&id);
    }

    /// Unsubscribe without waiting. Returns `false` if the registry is busy.
    pub fn try_unsubscribe(&self, id: Uuid) -> bool {
        match self.subscriptions.try_write() {
            Ok(mut subscriptions) => {
                subscriptions.remove(&id);
                true
            }
            Err(_) => false,
        }
    }

    /// Get the number of active subscriptions.
    pub async fn subscription_count(&self) -> usize {
        self.subscriptions.read().await.len()
    }

    fn install(&self, session: Option<Session>) {
        {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *current = session.clone();
        }
        // No receivers is fine.
        let _ = self.sender.send(SessionState::from(session));
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::memory::InMemoryIdentityProvider;

    async fn service_with_account(provider: InMemoryIdentityProvider) -> SessionService {
        provider.add_account("ada@example.com", "hunter22", Some("Ada")).await;
        SessionService::new(Arc::new(provider))
    }

    #[tokio::test]
    async fn test_subscription_sees_initial_state_and_transitions() {
        let service = service_with_account(InMemoryIdentityProvider::new()).await;
        let mut sub = service.subscribe().await;

        assert_eq!(sub.next().await, Some(SessionState::SignedOut));

        service.sign_in("ada@example.com", "hunter22").await.unwrap();
        match sub.next().await {
            Some(SessionState::SignedIn(session)) => assert_eq!(session.display_name(), "Ada"),
            other => panic!("expected signed in, got {:?}", other),
        }

        service.sign_out().await.unwrap();
        assert_eq!(sub.next().await, Some(SessionState::SignedOut));
        assert!(!service.is_signed_in());
    }

    #[tokio::test]
    async fn test_failed_sign_in_leaves_state_untouched() {
        let service = service_with_account(InMemoryIdentityProvider::new()).await;

        let err = service.sign_in("ada@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.kind(), clause_core::ErrorKind::Provider);
        assert!(service.current_session().is_none());
    }

    #[tokio::test]
    async fn test_unsubscribe() {
        let service = SessionService::new(Arc::new(InMemoryIdentityProvider::new()));

        let sub = service.subscribe().await;
        assert_eq!(service.subscription_count().await, 1);

        service.unsubscribe(sub.id).await;
        assert_eq!(service.subscription_count().await, 0);
    }

    #[tokio::test]
    async fn test_try_unsubscribe() {
        let service = SessionService::new(Arc::new(InMemoryIdentityProvider::new()));

        let sub = service.subscribe().await;
        assert!(service.try_unsubscribe(sub.id));
        assert_eq!(service.subscription_count().await, 0);
    }

    #[tokio::test]
    async fn test_bearer_token_requires_session() {
        let service = SessionService::new(Arc::new(InMemoryIdentityProvider::new()));

        let err = service.bearer_token().await.unwrap_err();
        assert_eq!(err, ClauseError::Auth(LOGIN_REQUIRED_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_bearer_token_uses_cached_token() {
        let service = service_with_account(InMemoryIdentityProvider::new()).await;
        let session = service.sign_in("ada@example.com", "hunter22").await.unwrap();

        assert_eq!(service.bearer_token().await.unwrap(), session.id_token);
    }

    #[tokio::test]
    async fn test_bearer_token_refreshes_expiring_token() {
        let provider = InMemoryIdentityProvider::new().with_token_lifetime(Duration::zero());
        let service = service_with_account(provider).await;
        let session = service.sign_in("ada@example.com", "hunter22").await.unwrap();

        let token = service.bearer_token().await.unwrap();

        assert_ne!(token, session.id_token);
        assert_eq!(service.current_session().unwrap().id_token, token);
    }

    #[tokio::test]
    async fn test_refresh_failure_signs_out() {
        let provider = Arc::new(InMemoryIdentityProvider::new().with_token_lifetime(Duration::zero()));
        provider.add_account("ada@example.com", "hunter22", None).await;
        let service = SessionService::new(provider.clone());
        service.sign_in("ada@example.com", "hunter22").await.unwrap();

        let mut sub = service.subscribe().await;
        assert!(matches!(sub.next().await, Some(SessionState::SignedIn(_))));

        provider.remove_account("ada@example.com").await;
        let err = service.bearer_token().await.unwrap_err();

        assert_eq!(err, ClauseError::Auth(SESSION_EXPIRED_MESSAGE.to_string()));
        assert_eq!(sub.next().await, Some(SessionState::SignedOut));
        assert!(!service.is_signed_in());
    }
}
