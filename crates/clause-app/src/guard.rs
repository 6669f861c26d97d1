//! Session gating for the dashboard.

use std::sync::Arc;

use clause_core::SessionState;
use clause_session::SessionService;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::surface::{Screen, Surface};
use crate::view::IdentityView;

/// Reacts to session transitions: shows who is signed in, or sends the user
/// back to the login screen.
pub struct SessionGuard {
    surface: Arc<dyn Surface>,
}

impl SessionGuard {
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self { surface }
    }

    /// Apply one session state to the surface.
    pub fn apply(&self, state: &SessionState) {
        match state {
            SessionState::SignedIn(session) => {
                debug!(email = %session.email, "Session active");
                self.surface.show_identity(&IdentityView::from(session));
            }
            SessionState::SignedOut => {
                info!("No active session, redirecting to login");
                self.surface.navigate(Screen::Login);
            }
        }
    }

    /// Subscribe to `session` and keep applying transitions in the background.
    ///
    /// The state at the time of the call is applied before this returns.
    pub async fn attach(self, session: Arc<SessionService>) -> GuardHandle {
        let mut subscription = session.subscribe().await;
        let id = subscription.id;

        if let Some(state) = subscription.next().await {
            self.apply(&state);
        }

        let task = tokio::spawn(async move {
            while let Some(state) = subscription.next().await {
                self.apply(&state);
            }
        });

        GuardHandle { id, session, task }
    }
}

/// Keeps a [`SessionGuard`] running. Dropping it stops the guard and releases
/// its subscription.
pub struct GuardHandle {
    id: Uuid,
    session: Arc<SessionService>,
    task: JoinHandle<()>,
}

impl GuardHandle {
    /// Stop the guard and release its subscription.
    pub async fn detach(self) {
        self.task.abort();
        self.session.unsubscribe(self.id).await;
    }
}

impl Drop for GuardHandle {
    fn drop(&mut self) {
        self.task.abort();
        if self.session.try_unsubscribe(self.id) {
            return;
        }
        // Registry busy: finish on the runtime if there is one.
        if let Ok(runtime) = Handle::try_current() {
            let session = self.session.clone();
            let id = self.id;
            runtime.spawn(async move { session.unsubscribe(id).await });
        } else {
            warn!(subscription = %self.id, "Guard dropped outside a runtime, subscription kept");
        }
    }
}
