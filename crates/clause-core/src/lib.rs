//! # Clause Core
//!
//! Core types for the clause generation front end.
//!
//! This crate provides the building blocks shared by every other crate:
//! - [`Session`] - Authenticated principal issued by the identity provider
//! - [`EvaluationRequest`] / [`EvaluationResult`] - The evaluation exchange
//! - [`RiskTier`] - Severity tier used to classify a generated clause
//! - [`ClauseError`] - Error taxonomy surfaced to the user

pub mod artifact;
pub mod error;
pub mod session;
pub mod text;
pub mod types;

// Re-exports for convenience
pub use artifact::{safe_file_name, PdfDownload, PdfUpload, DEFAULT_DOWNLOAD_NAME, PDF_MIME_TYPE};
pub use error::{ClauseError, ErrorKind, Result};
pub use session::{Session, SessionState};
pub use types::*;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::artifact::{PdfDownload, PdfUpload};
    pub use crate::error::{ClauseError, ErrorKind, Result};
    pub use crate::session::{Session, SessionState};
    pub use crate::types::{EvaluationRequest, EvaluationResult, PromptHistoryEntry, RiskTier};
}
