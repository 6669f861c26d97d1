//! Terminal rendering of the dashboard.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use clap::{Parser, Subcommand};
use clause_core::{PdfDownload, PDF_MIME_TYPE};

use crate::surface::{Screen, Surface, Trigger};
use crate::view::{
    HistoryItemView, IdentityView, ResultsView, SummaryView, LOADING_MESSAGE,
    NOTHING_TO_REGENERATE_MESSAGE, SUMMARY_PROGRESS_MESSAGE,
};

/// A surface that prints to stdout and saves downloads into a directory.
pub struct TerminalSurface {
    download_dir: PathBuf,
    screen: Mutex<Screen>,
}

impl TerminalSurface {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            screen: Mutex::new(Screen::Login),
        }
    }

    /// Screen currently shown.
    pub fn screen(&self) -> Screen {
        *self.screen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn print_help(&self) {
        match self.screen() {
            Screen::Login | Screen::Signup => {
                println!("Commands: login <email> <password> | signup <email> <password> | quit");
            }
            Screen::Dashboard => {
                println!(
                    "Commands: evaluate <prompt> | regenerate | download | summarize <file> | history | logout | quit"
                );
            }
        }
    }
}

impl Surface for TerminalSurface {
    fn navigate(&self, screen: Screen) {
        *self.screen.lock().unwrap_or_else(PoisonError::into_inner) = screen;
        let title = match screen {
            Screen::Login => "Login",
            Screen::Signup => "Sign up",
            Screen::Dashboard => "Clause Dashboard",
        };
        println!("\n=== {} ===", title);
        self.print_help();
    }

    fn alert(&self, message: &str) {
        println!("[!] {}", message);
    }

    fn show_form_error(&self, message: &str) {
        println!("Error: {}", message);
    }

    fn show_identity(&self, identity: &IdentityView) {
        println!("Signed in as {} <{}>", identity.display_name, identity.email);
    }

    fn render_results(&self, view: &ResultsView) {
        match view {
            ResultsView::Loading => println!("{}", LOADING_MESSAGE),
            ResultsView::LoginRequired { message } => println!("{}", message),
            ResultsView::NothingToRegenerate => println!("{}", NOTHING_TO_REGENERATE_MESSAGE),
            ResultsView::Failed { message } => println!("Error occurred\n{}", message),
            ResultsView::Clause(card) => {
                println!("\nGenerated Clause [{}]", card.badge());
                println!("{}\n", card.clause);
                println!("Classification: {}", card.classification);
                println!("Source: {}", card.source);
                if !card.feedback_options.is_empty() {
                    println!("Feedback: {}", card.feedback_options.join(" | "));
                }
                println!("(type `download` to save as PDF)");
            }
        }
    }

    fn set_regenerate_visible(&self, visible: bool) {
        if visible {
            println!("(type `regenerate` for another version)");
        }
    }

    fn set_trigger_enabled(&self, _trigger: Trigger, _enabled: bool) {
        // Commands are read one at a time, so a pending action already blocks input.
    }

    fn prepend_history(&self, item: &HistoryItemView) {
        println!("+ {} ({})", item.text, item.label);
    }

    fn render_summary(&self, view: &SummaryView) {
        match view {
            SummaryView::Progress => println!("{}", SUMMARY_PROGRESS_MESSAGE),
            SummaryView::Summary(text) => println!("Summary:\n{}", text),
            SummaryView::Failed(message) => println!("Error: {}", message),
        }
    }

    fn save_download(&self, download: PdfDownload) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.download_dir)?;
        let path = self.download_dir.join(download.safe_file_name());
        fs::write(&path, &download.bytes)?;
        println!("Saved {}", path.display());
        Ok(path)
    }
}

/// Grammar of one line typed at the prompt.
#[derive(Parser, Debug)]
#[command(
    name = "clause",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
struct PromptLine {
    #[command(subcommand)]
    command: Command,
}

/// A command typed at the prompt.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sign in to an existing account
    Login { email: String, password: String },
    /// Create an account
    Signup { email: String, password: String },
    /// Generate a clause from a description
    Evaluate {
        // Blank prompts are passed through so the flow can reject them.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Generate another version of the last clause
    Regenerate,
    /// Save the current clause as a PDF
    Download,
    /// Summarize a local PDF
    Summarize { file: PathBuf },
    /// List prompts from this session
    History,
    /// Sign out
    Logout,
    /// Show available commands
    #[command(alias = "?")]
    Help,
    /// Leave the dashboard
    #[command(alias = "exit")]
    Quit,
}

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<Self, clap::Error> {
        PromptLine::try_parse_from(line.split_whitespace()).map(|line| line.command)
    }

    /// Whether the command belongs to the authenticated dashboard.
    pub fn needs_dashboard(&self) -> bool {
        !matches!(
            self,
            Command::Login { .. } | Command::Signup { .. } | Command::Help | Command::Quit
        )
    }
}

/// Declared MIME type of a local file, from its extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MIME_TYPE,
        _ => "application/octet-stream",
    }
}
