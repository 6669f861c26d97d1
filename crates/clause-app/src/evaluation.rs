//! Prompt submission and result rendering.

use std::sync::{Arc, Mutex, PoisonError};

use clause_core::{ErrorKind, EvaluationRequest, EvaluationResult, Result};
use clause_sdk::ClauseApi;
use clause_session::{SessionService, LOGIN_REQUIRED_MESSAGE};
use tracing::{info, warn};

use crate::history::HistorySidebar;
use crate::surface::{Surface, Trigger, TriggerGuard};
use crate::view::{ClauseCard, ResultsView};

/// Sends prompts to the evaluation service and renders what comes back.
pub struct EvaluationFlow {
    session: Arc<SessionService>,
    api: Arc<dyn ClauseApi>,
    surface: Arc<dyn Surface>,
    history: Arc<HistorySidebar>,

    /// Most recent accepted prompt. Overwritten by each submission.
    last_prompt: Mutex<Option<String>>,

    /// Card currently on screen, if the results area shows one.
    current: Mutex<Option<ClauseCard>>,
}

impl EvaluationFlow {
    pub fn new(
        session: Arc<SessionService>,
        api: Arc<dyn ClauseApi>,
        surface: Arc<dyn Surface>,
        history: Arc<HistorySidebar>,
    ) -> Self {
        Self {
            session,
            api,
            surface,
            history,
            last_prompt: Mutex::new(None),
            current: Mutex::new(None),
        }
    }

    /// Validate and submit a prompt typed by the user.
    pub async fn submit(&self, raw_prompt: &str) {
        let request = match EvaluationRequest::new(raw_prompt) {
            Ok(request) => request,
            Err(e) => {
                self.surface.alert(e.user_message());
                return;
            }
        };

        *self.last_prompt.lock().unwrap_or_else(PoisonError::into_inner) = Some(request.prompt.clone());
        self.run(request).await;
    }

    /// Submit the last accepted prompt again.
    pub async fn regenerate(&self) {
        let last = self
            .last_prompt
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        match last {
            Some(prompt) => self.run(EvaluationRequest { prompt }).await,
            None => self.show(ResultsView::NothingToRegenerate),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The clause card on screen, if any.
    pub fn current_card(&self) -> Option<ClauseCard> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    async fn run(&self, request: EvaluationRequest) {
        self.show(ResultsView::Loading);
        self.surface.set_regenerate_visible(false);
        let _trigger = TriggerGuard::acquire(self.surface.as_ref(), Trigger::Evaluate);

        if !self.session.is_signed_in() {
            info!("Evaluation attempted without a session");
            self.show(ResultsView::LoginRequired {
                message: LOGIN_REQUIRED_MESSAGE.to_string(),
            });
            return;
        }

        match self.evaluate(&request).await {
            Ok(result) => {
                let card = ClauseCard::from_result(&result);
                info!(risk = %card.risk_label, tier = card.tier.as_str(), "Clause rendered");
                self.show(ResultsView::Clause(card));
                self.surface.set_regenerate_visible(true);
                self.history.record_prompt(&request.prompt);
            }
            Err(e) => {
                warn!(kind = ?e.kind(), "Evaluation failed: {}", e);
                let message = e.user_message().to_string();
                let view = match e.kind() {
                    ErrorKind::Auth => ResultsView::LoginRequired { message },
                    _ => ResultsView::Failed { message },
                };
                self.show(view);
            }
        }
    }

    async fn evaluate(&self, request: &EvaluationRequest) -> Result<EvaluationResult> {
        let token = self.session.bearer_token().await?;
        self.api.evaluate(request, &token).await
    }

    /// Replace the results area, keeping the current card in step.
    fn show(&self, view: ResultsView) {
        let card = match &view {
            ResultsView::Clause(card) => Some(card.clone()),
            _ => None,
        };
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = card;
        self.surface.render_results(&view);
    }
}
