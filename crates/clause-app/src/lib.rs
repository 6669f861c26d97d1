//! # Clause App
//!
//! The clause generation dashboard.
//!
//! Rendering is delegated to a [`Surface`]; everything here decides *what*
//! to show in response to user actions and session transitions:
//! - [`SessionGuard`] - Gates the dashboard on an active session
//! - [`CredentialForms`] - Login and signup
//! - [`EvaluationFlow`] - Prompt submission, rendering and regeneration
//! - [`ArtifactActions`] - PDF download and summarization
//! - [`HistorySidebar`] - In-memory list of submitted prompts

pub mod artifacts;
pub mod config;
pub mod dashboard;
pub mod evaluation;
pub mod forms;
pub mod guard;
pub mod history;
pub mod surface;
pub mod telemetry;
pub mod terminal;
pub mod view;

pub use artifacts::ArtifactActions;
pub use config::{Config, ConfigError};
pub use dashboard::{Dashboard, KeyPress};
pub use evaluation::EvaluationFlow;
pub use forms::CredentialForms;
pub use guard::{GuardHandle, SessionGuard};
pub use history::HistorySidebar;
pub use surface::{Screen, Surface, Trigger, TriggerGuard};
pub use view::{ClauseCard, DownloadAction, HistoryItemView, IdentityView, ResultsView, SummaryView};
