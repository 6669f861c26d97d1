//! Binary artifacts moved to and from the service.

use crate::error::{ClauseError, Result};

/// MIME type accepted by the summarization endpoint.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Name used when the server does not suggest one.
pub const DEFAULT_DOWNLOAD_NAME: &str = "generated_clause.pdf";

pub const NO_FILE_MESSAGE: &str = "Please select a PDF file to summarize.";
pub const NOT_PDF_MESSAGE: &str = "Only PDF files are supported.";

/// A file selected by the user for summarization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfUpload {
    pub file_name: String,
    /// Declared MIME type of the selection.
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl PdfUpload {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Check a file selection before anything is sent.
    pub fn validate(selection: Option<PdfUpload>) -> Result<PdfUpload> {
        let upload = selection.ok_or_else(|| ClauseError::Validation(NO_FILE_MESSAGE.to_string()))?;
        if upload.mime_type != PDF_MIME_TYPE {
            return Err(ClauseError::Validation(NOT_PDF_MESSAGE.to_string()));
        }
        Ok(upload)
    }
}

/// A generated PDF waiting to be saved. Dropping it releases the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDownload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PdfDownload {
    /// Name to save the payload under, safe to join onto a directory.
    pub fn safe_file_name(&self) -> &str {
        safe_file_name(&self.file_name)
    }
}

/// Last path component of a suggested file name.
///
/// Falls back to [`DEFAULT_DOWNLOAD_NAME`] when nothing usable is left, so the
/// result never names a parent or root directory.
pub fn safe_file_name(name: &str) -> &str {
    let last = name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();
    match last {
        "" | "." | ".." => DEFAULT_DOWNLOAD_NAME,
        _ => last,
    }
}
