//! View models handed to a [`crate::Surface`].

use clause_core::{EvaluationResult, RiskTier, Session};

pub const LOADING_MESSAGE: &str = "Generating and assessing your clause...";
pub const NOTHING_TO_REGENERATE_MESSAGE: &str = "No previous prompt to regenerate.";
pub const SUMMARY_PROGRESS_MESSAGE: &str = "Summarizing PDF...";

/// History entries carry no clock reading.
pub const JUST_NOW_LABEL: &str = "Just now";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityView {
    pub display_name: String,
    pub email: String,
}

impl From<&Session> for IdentityView {
    fn from(session: &Session) -> Self {
        Self {
            display_name: session.display_name().to_string(),
            email: session.email.clone(),
        }
    }
}

/// Content of the results area. Exactly one is shown at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    Loading,
    LoginRequired { message: String },
    Clause(ClauseCard),
    Failed { message: String },
    NothingToRegenerate,
}

/// A generated clause ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseCard {
    /// Clause text with emphasis markers removed.
    pub clause: String,
    /// Risk label exactly as the service returned it.
    pub risk_label: String,
    pub tier: RiskTier,
    pub classification: String,
    pub source: String,
    pub feedback_options: Vec<String>,
    pub download: DownloadAction,
}

impl ClauseCard {
    pub fn from_result(result: &EvaluationResult) -> Self {
        let clause = result.display_clause();
        Self {
            download: DownloadAction {
                clause: clause.clone(),
            },
            clause,
            risk_label: result.risk.clone(),
            tier: result.risk_tier(),
            classification: result.classification.clone(),
            source: result.source.clone(),
            feedback_options: result.feedback_options.clone(),
        }
    }

    /// Text of the risk badge.
    pub fn badge(&self) -> String {
        format!("{} Risk", self.risk_label)
    }
}

/// The "Download PDF" action of a clause card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadAction {
    /// Text sent to the PDF endpoint.
    pub clause: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItemView {
    pub text: String,
    pub label: &'static str,
}

/// Content of the summary area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryView {
    Progress,
    Summary(String),
    Failed(String),
}
