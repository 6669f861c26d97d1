//! Composition root for the front end.

use std::sync::Arc;

use clause_core::PdfUpload;
use clause_sdk::ClauseApi;
use clause_session::SessionService;
use tracing::warn;

use crate::artifacts::ArtifactActions;
use crate::evaluation::EvaluationFlow;
use crate::forms::CredentialForms;
use crate::guard::{GuardHandle, SessionGuard};
use crate::history::HistorySidebar;
use crate::surface::{Screen, Surface};
use crate::view::DownloadAction;

pub const NOTHING_TO_DOWNLOAD_MESSAGE: &str = "Generate a clause before downloading.";

/// A key pressed while the prompt has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }

    /// Ctrl+Enter submits the prompt.
    pub fn is_submit_shortcut(&self) -> bool {
        self.ctrl && self.key == "Enter"
    }
}

/// Wires every component to one session service, API and surface.
pub struct Dashboard {
    session: Arc<SessionService>,
    surface: Arc<dyn Surface>,
    forms: CredentialForms,
    evaluation: EvaluationFlow,
    artifacts: ArtifactActions,
    history: Arc<HistorySidebar>,
}

impl Dashboard {
    pub fn new(session: Arc<SessionService>, api: Arc<dyn ClauseApi>, surface: Arc<dyn Surface>) -> Self {
        let history = Arc::new(HistorySidebar::new(surface.clone()));
        Self {
            forms: CredentialForms::new(session.clone(), surface.clone()),
            evaluation: EvaluationFlow::new(session.clone(), api.clone(), surface.clone(), history.clone()),
            artifacts: ArtifactActions::new(api, surface.clone()),
            history,
            session,
            surface,
        }
    }

    /// Start gating the dashboard on the session.
    pub async fn attach_guard(&self) -> GuardHandle {
        SessionGuard::new(self.surface.clone())
            .attach(self.session.clone())
            .await
    }

    pub async fn login(&self, email: &str, password: &str) {
        self.forms.submit_login(email, password).await;
    }

    pub async fn signup(&self, email: &str, password: &str) {
        self.forms.submit_signup(email, password).await;
    }

    pub async fn logout(&self) {
        match self.session.sign_out().await {
            Ok(()) => self.surface.navigate(Screen::Login),
            Err(e) => {
                warn!(kind = ?e.kind(), "Logout failed: {}", e);
                self.surface.alert(&format!("Logout failed: {}", e.user_message()));
            }
        }
    }

    pub async fn evaluate(&self, prompt: &str) {
        self.evaluation.submit(prompt).await;
    }

    /// Keyboard handler for the prompt field.
    pub async fn on_prompt_key(&self, key: &KeyPress, prompt: &str) {
        if key.is_submit_shortcut() {
            self.evaluation.submit(prompt).await;
        }
    }

    pub async fn regenerate(&self) {
        self.evaluation.regenerate().await;
    }

    /// Run a card's "Download PDF" action.
    pub async fn download(&self, action: &DownloadAction) {
        self.artifacts.download_clause(&action.clause).await;
    }

    /// Download the clause currently on screen.
    pub async fn download_current(&self) {
        match self.evaluation.current_card() {
            Some(card) => self.download(&card.download).await,
            None => self.surface.alert(NOTHING_TO_DOWNLOAD_MESSAGE),
        }
    }

    pub async fn summarize(&self, selection: Option<PdfUpload>) {
        self.artifacts.summarize_pdf(selection).await;
    }

    pub fn history(&self) -> &HistorySidebar {
        &self.history
    }

    pub fn evaluation(&self) -> &EvaluationFlow {
        &self.evaluation
    }

    pub fn session(&self) -> &Arc<SessionService> {
        &self.session
    }
}
