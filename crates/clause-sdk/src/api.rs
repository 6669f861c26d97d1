//! The evaluation service seam.

use async_trait::async_trait;
use clause_core::{EvaluationRequest, EvaluationResult, PdfDownload, PdfUpload, Result};

/// Operations offered by the evaluation service.
#[async_trait]
pub trait ClauseApi: Send + Sync {
    /// `POST /evaluate` with a bearer token.
    async fn evaluate(&self, request: &EvaluationRequest, bearer_token: &str) -> Result<EvaluationResult>;

    /// `POST /download_pdf`, returning the generated document.
    async fn download_pdf(&self, clause: &str) -> Result<PdfDownload>;

    /// `POST /summarize_pdf` with the file as multipart, returning the summary text.
    async fn summarize_pdf(&self, upload: &PdfUpload) -> Result<String>;
}
