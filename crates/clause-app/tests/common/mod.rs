#![allow(dead_code)]

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use clause_app::{
    Dashboard, HistoryItemView, IdentityView, ResultsView, Screen, Surface, SummaryView, Trigger,
};
use clause_core::{ClauseError, EvaluationRequest, EvaluationResult, PdfDownload, PdfUpload, Result};
use clause_sdk::ClauseApi;
use clause_session::{InMemoryIdentityProvider, SessionService};

pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "hunter22";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Navigate(Screen),
    Alert(String),
    FormError(String),
    Identity(IdentityView),
    Results(ResultsView),
    RegenerateVisible(bool),
    TriggerEnabled(Trigger, bool),
    History(HistoryItemView),
    Summary(SummaryView),
    Saved(PdfDownload),
}

/// Surface that records every call.
#[derive(Default)]
pub struct RecordingSurface {
    events: Mutex<Vec<Event>>,
    fail_saves: bool,
}

impl RecordingSurface {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_saves() -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(Vec::new()),
            fail_saves: true,
        })
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn last_results(&self) -> Option<ResultsView> {
        self.events().into_iter().rev().find_map(|e| match e {
            Event::Results(view) => Some(view),
            _ => None,
        })
    }

    pub fn last_summary(&self) -> Option<SummaryView> {
        self.events().into_iter().rev().find_map(|e| match e {
            Event::Summary(view) => Some(view),
            _ => None,
        })
    }

    pub fn last_screen(&self) -> Option<Screen> {
        self.events().into_iter().rev().find_map(|e| match e {
            Event::Navigate(screen) => Some(screen),
            _ => None,
        })
    }

    pub fn trigger_enabled(&self, trigger: Trigger) -> bool {
        self.events()
            .into_iter()
            .rev()
            .find_map(|e| match e {
                Event::TriggerEnabled(t, enabled) if t == trigger => Some(enabled),
                _ => None,
            })
            .unwrap_or(true)
    }

    pub fn regenerate_visible(&self) -> bool {
        self.events()
            .into_iter()
            .rev()
            .find_map(|e| match e {
                Event::RegenerateVisible(visible) => Some(visible),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn history(&self) -> Vec<HistoryItemView> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::History(item) => Some(item),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn navigate(&self, screen: Screen) {
        self.push(Event::Navigate(screen));
    }

    fn alert(&self, message: &str) {
        self.push(Event::Alert(message.to_string()));
    }

    fn show_form_error(&self, message: &str) {
        self.push(Event::FormError(message.to_string()));
    }

    fn show_identity(&self, identity: &IdentityView) {
        self.push(Event::Identity(identity.clone()));
    }

    fn render_results(&self, view: &ResultsView) {
        self.push(Event::Results(view.clone()));
    }

    fn set_regenerate_visible(&self, visible: bool) {
        self.push(Event::RegenerateVisible(visible));
    }

    fn set_trigger_enabled(&self, trigger: Trigger, enabled: bool) {
        self.push(Event::TriggerEnabled(trigger, enabled));
    }

    fn prepend_history(&self, item: &HistoryItemView) {
        self.push(Event::History(item.clone()));
    }

    fn render_summary(&self, view: &SummaryView) {
        self.push(Event::Summary(view.clone()));
    }

    fn save_download(&self, download: PdfDownload) -> io::Result<PathBuf> {
        if self.fail_saves {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        let path = PathBuf::from(&download.file_name);
        self.push(Event::Saved(download));
        Ok(path)
    }
}

/// Scripted evaluation service.
pub struct FakeApi {
    pub evaluate_calls: AtomicUsize,
    pub download_calls: AtomicUsize,
    pub summarize_calls: AtomicUsize,
    pub evaluate_response: Mutex<Result<EvaluationResult>>,
    pub download_response: Mutex<Result<Vec<u8>>>,
    pub summarize_response: Mutex<Result<String>>,
    pub prompts: Mutex<Vec<String>>,
    pub tokens: Mutex<Vec<String>>,
    pub clauses: Mutex<Vec<String>>,
    /// Surface whose trigger state is sampled while a request is in flight.
    pub observer: Mutex<Option<Arc<RecordingSurface>>>,
    pub trigger_during_call: Mutex<Vec<bool>>,
}

pub fn result(clause: &str, risk: &str) -> EvaluationResult {
    EvaluationResult {
        clause: clause.to_string(),
        risk: risk.to_string(),
        classification: "Non-Compete".to_string(),
        source: "CUAD v1".to_string(),
        feedback_options: vec![],
    }
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            evaluate_calls: AtomicUsize::new(0),
            download_calls: AtomicUsize::new(0),
            summarize_calls: AtomicUsize::new(0),
            evaluate_response: Mutex::new(Ok(result("**Term.** Two years.", "High"))),
            download_response: Mutex::new(Ok(b"%PDF-1.4".to_vec())),
            summarize_response: Mutex::new(Ok("A short summary.".to_string())),
            prompts: Mutex::new(Vec::new()),
            tokens: Mutex::new(Vec::new()),
            clauses: Mutex::new(Vec::new()),
            observer: Mutex::new(None),
            trigger_during_call: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.evaluate_calls.load(Ordering::SeqCst)
            + self.download_calls.load(Ordering::SeqCst)
            + self.summarize_calls.load(Ordering::SeqCst)
    }

    pub fn observe(&self, surface: Arc<RecordingSurface>) {
        *self.observer.lock().unwrap() = Some(surface);
    }

    fn sample(&self, trigger: Trigger) {
        if let Some(surface) = self.observer.lock().unwrap().as_ref() {
            self.trigger_during_call
                .lock()
                .unwrap()
                .push(surface.trigger_enabled(trigger));
        }
    }
}

#[async_trait]
impl ClauseApi for FakeApi {
    async fn evaluate(&self, request: &EvaluationRequest, bearer_token: &str) -> Result<EvaluationResult> {
        self.evaluate_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.clone());
        self.tokens.lock().unwrap().push(bearer_token.to_string());
        self.sample(Trigger::Evaluate);
        self.evaluate_response.lock().unwrap().clone()
    }

    async fn download_pdf(&self, clause: &str) -> Result<PdfDownload> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        self.clauses.lock().unwrap().push(clause.to_string());
        let bytes = self.download_response.lock().unwrap().clone()?;
        Ok(PdfDownload {
            file_name: "generated_clause.pdf".to_string(),
            bytes,
        })
    }

    async fn summarize_pdf(&self, _upload: &PdfUpload) -> Result<String> {
        self.summarize_calls.fetch_add(1, Ordering::SeqCst);
        self.sample(Trigger::Summarize);
        self.summarize_response.lock().unwrap().clone()
    }
}

pub struct Harness {
    pub dashboard: Dashboard,
    pub surface: Arc<RecordingSurface>,
    pub api: Arc<FakeApi>,
    pub session: Arc<SessionService>,
    pub provider: Arc<InMemoryIdentityProvider>,
}

pub async fn harness_with(provider: InMemoryIdentityProvider, surface: Arc<RecordingSurface>) -> Harness {
    provider.add_account(EMAIL, PASSWORD, None).await;
    let provider = Arc::new(provider);
    let session = Arc::new(SessionService::new(provider.clone()));
    let api = FakeApi::new();
    let dashboard = Dashboard::new(session.clone(), api.clone(), surface.clone());

    Harness {
        dashboard,
        surface,
        api,
        session,
        provider,
    }
}

pub async fn harness() -> Harness {
    harness_with(InMemoryIdentityProvider::new(), RecordingSurface::new()).await
}

/// A harness whose user is already signed in.
pub async fn signed_in() -> Harness {
    let harness = harness().await;
    harness.session.sign_in(EMAIL, PASSWORD).await.unwrap();
    harness
}

pub fn transport_error(status: u16, message: &str) -> ClauseError {
    ClauseError::status(status, message)
}

/// Poll `condition` until it holds or a second passes.
pub async fn wait_until(condition: impl Fn() -> bool) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
