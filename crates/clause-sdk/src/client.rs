//! Clause service client implementation.

use async_trait::async_trait;
use clause_core::artifact::{safe_file_name, DEFAULT_DOWNLOAD_NAME};
use clause_core::{ClauseError, EvaluationRequest, EvaluationResult, PdfDownload, PdfUpload, Result};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::ClauseApi;
use crate::error::{error_from_response, DOWNLOAD_FAILED, EVALUATE_FAILED, SUMMARIZE_FAILED};

/// Client for the clause evaluation service.
#[derive(Clone)]
pub struct ClauseClient {
    /// Base URL of the service.
    base_url: String,

    /// HTTP client.
    http_client: reqwest::Client,
}

/// Request body for `POST /download_pdf`.
#[derive(Debug, Serialize)]
struct DownloadRequest<'a> {
    clause: &'a str,
}

/// Response from `POST /summarize_pdf`.
#[derive(Debug, Deserialize)]
struct SummaryResponse {
    summary: String,
}

impl ClauseClient {
    /// Create a client for the service at `url`.
    pub fn new(url: &str) -> Self {
        Self::with_http_client(url, reqwest::Client::new())
    }

    /// Create a client that reuses an existing HTTP client.
    pub fn with_http_client(url: &str, http_client: reqwest::Client) -> Self {
        Self {
            base_url: url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn send_failed(e: reqwest::Error) -> ClauseError {
    ClauseError::transport(e.to_string())
}

async fn read_body(response: reqwest::Response) -> Result<Vec<u8>> {
    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(send_failed)
}

/// Filename suggested by a `Content-Disposition` header, reduced to its last
/// path component.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    header.split(';').find_map(|param| {
        let (key, value) = param.trim().split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let name = value.trim().trim_matches('"');
        (!name.is_empty()).then(|| safe_file_name(name).to_string())
    })
}

#[async_trait]
impl ClauseApi for ClauseClient {
    async fn evaluate(&self, request: &EvaluationRequest, bearer_token: &str) -> Result<EvaluationResult> {
        let url = self.url("evaluate");
        debug!("Posting evaluation request to {}", url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(bearer_token)
            .json(request)
            .send()
            .await
            .map_err(send_failed)?;

        if !response.status().is_success() {
            return Err(error_from_response(response, EVALUATE_FAILED).await);
        }

        let body = read_body(response).await?;
        let result: EvaluationResult = serde_json::from_slice(&body)?;
        info!(risk = %result.risk, "Evaluation received");
        Ok(result)
    }

    async fn download_pdf(&self, clause: &str) -> Result<PdfDownload> {
        let url = self.url("download_pdf");

        let response = self
            .http_client
            .post(&url)
            .json(&DownloadRequest { clause })
            .send()
            .await
            .map_err(send_failed)?;

        if !response.status().is_success() {
            return Err(error_from_response(response, DOWNLOAD_FAILED).await);
        }

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| DEFAULT_DOWNLOAD_NAME.to_string());

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));
        if is_json {
            return Err(ClauseError::Payload("Expected a PDF document, got JSON".to_string()));
        }

        let bytes = read_body(response).await?;
        if bytes.is_empty() {
            return Err(ClauseError::Payload("Empty PDF payload".to_string()));
        }

        info!(file_name = %file_name, size = bytes.len(), "PDF received");
        Ok(PdfDownload { file_name, bytes })
    }

    async fn summarize_pdf(&self, upload: &PdfUpload) -> Result<String> {
        let url = self.url("summarize_pdf");

        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime_type)
            .map_err(|e| ClauseError::Validation(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(send_failed)?;

        if !response.status().is_success() {
            return Err(error_from_response(response, SUMMARIZE_FAILED).await);
        }

        let body = read_body(response).await?;
        let summary: SummaryResponse = serde_json::from_slice(&body)?;
        Ok(summary.summary)
    }
}
