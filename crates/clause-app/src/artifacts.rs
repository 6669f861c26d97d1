//! PDF download and summarization.

use std::sync::Arc;

use clause_core::PdfUpload;
use clause_sdk::ClauseApi;
use tracing::{info, warn};

use crate::surface::{Surface, Trigger, TriggerGuard};
use crate::view::SummaryView;

/// One-shot actions that produce or consume a PDF.
pub struct ArtifactActions {
    api: Arc<dyn ClauseApi>,
    surface: Arc<dyn Surface>,
}

impl ArtifactActions {
    pub fn new(api: Arc<dyn ClauseApi>, surface: Arc<dyn Surface>) -> Self {
        Self { api, surface }
    }

    /// Render `clause_text` as a PDF and hand it to the user.
    pub async fn download_clause(&self, clause_text: &str) {
        let download = match self.api.download_pdf(clause_text).await {
            Ok(download) => download,
            Err(e) => {
                warn!(kind = ?e.kind(), "Download PDF failed: {}", e);
                self.surface
                    .alert(&format!("Error downloading PDF: {}", e.user_message()));
                return;
            }
        };

        let size = download.bytes.len();
        match self.surface.save_download(download) {
            Ok(path) => info!(path = %path.display(), size, "PDF saved"),
            Err(e) => {
                warn!(error = %e, "Saving PDF failed");
                self.surface.alert(&format!("Error downloading PDF: {}", e));
            }
        }
    }

    /// Send a selected PDF for summarization.
    ///
    /// The summarize trigger stays disabled until this returns.
    pub async fn summarize_pdf(&self, selection: Option<PdfUpload>) {
        let upload = match PdfUpload::validate(selection) {
            Ok(upload) => upload,
            Err(e) => {
                self.surface.alert(e.user_message());
                return;
            }
        };

        self.surface.render_summary(&SummaryView::Progress);
        let _trigger = TriggerGuard::acquire(self.surface.as_ref(), Trigger::Summarize);

        match self.api.summarize_pdf(&upload).await {
            Ok(summary) => {
                info!(file = %upload.file_name, "PDF summarized");
                self.surface.render_summary(&SummaryView::Summary(summary));
            }
            Err(e) => {
                warn!(kind = ?e.kind(), file = %upload.file_name, "PDF summarization failed: {}", e);
                self.surface
                    .render_summary(&SummaryView::Failed(e.user_message().to_string()));
            }
        }
    }
}
