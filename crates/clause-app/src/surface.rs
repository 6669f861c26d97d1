//! The rendering seam between the flows and whatever displays them.

use std::io;
use std::path::PathBuf;

use clause_core::PdfDownload;

use crate::view::{HistoryItemView, IdentityView, ResultsView, SummaryView};

/// Top-level screens of the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Signup,
    Dashboard,
}

/// Controls that can be disabled while a request is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Evaluate,
    Summarize,
}

/// Everything the flows can do to the display.
///
/// Implementations own presentation only. Calls arrive one user action at a
/// time, but from async tasks, hence `Send + Sync`.
pub trait Surface: Send + Sync {
    /// Leave the current screen.
    fn navigate(&self, screen: Screen);

    /// Modal notice to the user.
    fn alert(&self, message: &str);

    /// Inline error under a credential form.
    fn show_form_error(&self, message: &str);

    /// Name and email in the dashboard header.
    fn show_identity(&self, identity: &IdentityView);

    /// Replace the results area.
    fn render_results(&self, view: &ResultsView);

    fn set_regenerate_visible(&self, visible: bool);

    fn set_trigger_enabled(&self, trigger: Trigger, enabled: bool);

    /// Add an entry at the top of the history sidebar.
    fn prepend_history(&self, item: &HistoryItemView);

    /// Replace the summary area.
    fn render_summary(&self, view: &SummaryView);

    /// Hand a downloaded file to the user. The payload is released on return.
    fn save_download(&self, download: PdfDownload) -> io::Result<PathBuf>;
}

/// Keeps a trigger disabled until dropped, whichever way the action ends.
pub struct TriggerGuard<'a> {
    surface: &'a dyn Surface,
    trigger: Trigger,
}

impl<'a> TriggerGuard<'a> {
    pub fn acquire(surface: &'a dyn Surface, trigger: Trigger) -> Self {
        surface.set_trigger_enabled(trigger, false);
        Self { surface, trigger }
    }
}

impl Drop for TriggerGuard<'_> {
    fn drop(&mut self) {
        self.surface.set_trigger_enabled(self.trigger, true);
    }
}
