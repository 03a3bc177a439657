use std::path::PathBuf;

use log::info;

use crate::error::ConfigError;

/// Environment variable names
pub mod env_vars {
    /// Origin of the remote notes service, e.g. "https://notes.example.com".
    pub const API_URL: &str = "NOTE_APP_API_URL";
    /// Where the terminal client keeps its session token.
    pub const SESSION_FILE: &str = "NOTE_APP_SESSION_FILE";
}

/// Default values
pub mod defaults {
    pub const API_BASE_URL: &str = "https://devnotes-zlbr.onrender.com";
    pub const APP_DIR: &str = "note-app";
    pub const SESSION_FILE_NAME: &str = "session.json";
    pub const FALLBACK_SESSION_FILE: &str = ".note-app-session.json";
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub session_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: defaults::API_BASE_URL.to_string(),
            session_file: default_session_file(),
        }
    }
}

impl Config {
    pub fn from_overrides(
        api_url: Option<String>,
        session_file: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = api_url {
            config.api_base_url = validate_url(env_vars::API_URL, url)?;
        }
        if let Some(path) = session_file {
            config.session_file = path;
        }
        Ok(config)
    }

    /// Reads `.env` and the process environment.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let api_url = non_empty_var(env_vars::API_URL);
        let session_file = non_empty_var(env_vars::SESSION_FILE).map(PathBuf::from);
        let config = Self::from_overrides(api_url, session_file)?;

        info!(
            "Using API {} (session file {})",
            config.api_base_url,
            config.session_file.display()
        );
        Ok(config)
    }

    /// The browser build has no environment; the origin is baked in at
    /// compile time.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::from_overrides(option_env!("NOTE_APP_API_URL").map(String::from), None)?;
        info!("Using API {}", config.api_base_url);
        Ok(config)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_url(key: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidUrl { key, value })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_session_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(defaults::APP_DIR).join(defaults::SESSION_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(defaults::FALLBACK_SESSION_FILE))
}

#[cfg(target_arch = "wasm32")]
fn default_session_file() -> PathBuf {
    PathBuf::from(defaults::FALLBACK_SESSION_FILE)
}
