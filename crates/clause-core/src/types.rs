//! Request and result types exchanged with the evaluation service.

use serde::{Deserialize, Serialize};

use crate::error::{ClauseError, Result};
use crate::text::{strip_emphasis, truncate_preview, HISTORY_PREVIEW_CHARS};

/// Message shown when a prompt is empty after trimming.
pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter your requirements first.";

/// Severity tier used to classify a generated clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskTier {
    Low,
    /// Also used for any label the service returns that is not recognised.
    #[default]
    Medium,
    High,
    VeryHigh,
}

impl RiskTier {
    /// Map a risk label from the service to a tier (case-insensitive).
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "low" => RiskTier::Low,
            "medium" => RiskTier::Medium,
            "high" => RiskTier::High,
            "very high" => RiskTier::VeryHigh,
            _ => RiskTier::Medium,
        }
    }

    /// Stable identifier for styling the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "risk-low",
            RiskTier::Medium => "risk-medium",
            RiskTier::High => "risk-high",
            RiskTier::VeryHigh => "risk-very-high",
        }
    }
}

/// Body of a `POST /evaluate` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationRequest {
    pub prompt: String,
}

impl EvaluationRequest {
    /// Build a request from raw user input, rejecting blank prompts.
    pub fn new(raw: &str) -> Result<Self> {
        let prompt = raw.trim();
        if prompt.is_empty() {
            return Err(ClauseError::Validation(EMPTY_PROMPT_MESSAGE.to_string()));
        }
        Ok(Self {
            prompt: prompt.to_string(),
        })
    }
}

/// Successful response of `POST /evaluate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EvaluationResult {
    pub clause: String,
    pub risk: String,
    pub classification: String,
    pub source: String,
    #[serde(default)]
    pub feedback_options: Vec<String>,
}

impl EvaluationResult {
    pub fn risk_tier(&self) -> RiskTier {
        RiskTier::from_label(&self.risk)
    }

    /// Clause text with emphasis markers removed.
    pub fn display_clause(&self) -> String {
        strip_emphasis(&self.clause)
    }
}

/// A prompt recorded in the history sidebar. Lives only in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptHistoryEntry {
    pub text: String,
    /// Submission order, starting at 1.
    pub sequence: u64,
}

impl PromptHistoryEntry {
    /// Text as shown in the sidebar.
    pub fn preview(&self) -> String {
        truncate_preview(&self.text, HISTORY_PREVIEW_CHARS)
    }
}
