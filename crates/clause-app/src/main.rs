//! # Clause Dashboard
//!
//! Terminal front end for the clause generation service.

use std::sync::Arc;

use clause_app::terminal::{mime_for_path, Command, TerminalSurface};
use clause_app::{telemetry, Config, Dashboard, Screen, Surface};
use clause_core::PdfUpload;
use clause_sdk::ClauseClient;
use clause_session::{FirebaseIdentityProvider, IdentityProvider, InMemoryIdentityProvider, SessionService};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing()?;

    let config = Config::load()?;
    info!("Clause dashboard starting against {}", config.api_url);

    let provider: Arc<dyn IdentityProvider> = match config.firebase.clone() {
        Some(firebase) => Arc::new(FirebaseIdentityProvider::new(firebase)),
        None => Arc::new(InMemoryIdentityProvider::new()),
    };
    let session = Arc::new(SessionService::new(provider));
    let api = Arc::new(ClauseClient::new(&config.api_url));
    let surface = Arc::new(TerminalSurface::new(config.download_dir.clone()));

    let dashboard = Dashboard::new(session, api, surface.clone());
    let guard = dashboard.attach_guard().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                print!("{}", e);
                surface.alert("Type `help` for a list of commands.");
                continue;
            }
        };

        if command.needs_dashboard() && surface.screen() != Screen::Dashboard {
            surface.alert("Please log in first.");
            continue;
        }

        match command {
            Command::Login { email, password } => dashboard.login(&email, &password).await,
            Command::Signup { email, password } => {
                surface.navigate(Screen::Signup);
                dashboard.signup(&email, &password).await;
            }
            Command::Evaluate { prompt } => dashboard.evaluate(&prompt.join(" ")).await,
            Command::Regenerate => dashboard.regenerate().await,
            Command::Download => dashboard.download_current().await,
            Command::Summarize { file: path } => {
                let selection = match tokio::fs::read(&path).await {
                    Ok(bytes) => {
                        let file_name = path
                            .file_name()
                            .map(|name| name.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        Some(PdfUpload::new(file_name, mime_for_path(&path), bytes))
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Could not read file");
                        None
                    }
                };
                dashboard.summarize(selection).await;
            }
            Command::History => {
                for entry in dashboard.history().entries() {
                    println!("{}. {}", entry.sequence, entry.preview());
                }
            }
            Command::Logout => dashboard.logout().await,
            Command::Help => surface.print_help(),
            Command::Quit => break,
        }
    }

    guard.detach().await;
    info!("Clause dashboard stopped");
    Ok(())
}
