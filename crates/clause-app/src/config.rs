//! Environment configuration.

use std::env;
use std::path::PathBuf;

use clause_session::firebase::{FirebaseConfig, DEFAULT_IDENTITY_URL, DEFAULT_TOKEN_URL};
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the evaluation service.
    pub api_url: String,

    /// Identity provider settings. `None` selects the in-memory provider.
    pub firebase: Option<FirebaseConfig>,

    /// Directory downloaded PDFs are written to.
    pub download_dir: PathBuf,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_url = url_var(&var, "CLAUSE_API_URL", DEFAULT_API_URL)?;

        let firebase = match var("CLAUSE_FIREBASE_API_KEY") {
            Some(api_key) => {
                let identity_url = url_var(&var, "CLAUSE_IDENTITY_URL", DEFAULT_IDENTITY_URL)?;
                let token_url = url_var(&var, "CLAUSE_TOKEN_URL", DEFAULT_TOKEN_URL)?;
                Some(FirebaseConfig::new(api_key.trim()).with_urls(&identity_url, &token_url))
            }
            None => {
                warn!("CLAUSE_FIREBASE_API_KEY not set, using in-memory accounts");
                None
            }
        };

        let download_dir = var("CLAUSE_DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                info!("CLAUSE_DOWNLOAD_DIR not set, saving downloads to the working directory");
                PathBuf::from(".")
            });

        Ok(Self {
            api_url,
            firebase,
            download_dir,
        })
    }
}

fn url_var(
    var: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<String, ConfigError> {
    let value = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    let value = value.trim().trim_end_matches('/').to_string();

    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            key,
            reason: format!("expected an http(s) URL, got {:?}", value),
        });
    }
    Ok(value)
}
