//! Configuration management

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Backend origin; requests go to `{api_url}/api`
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Durable session storage (token + cached user)
    #[serde(default)]
    pub session_file: Option<PathBuf>,

    #[serde(default)]
    pub routes: RoutesConfig,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

impl Config {
    pub fn session_path(&self) -> PathBuf {
        self.session_file
            .clone()
            .unwrap_or_else(|| get_config_dir().join(SESSION_FILE))
    }
}

/// Client-side route contract used by the 401 redirect.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_gated_prefix")]
    pub gated_prefix: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            gated_prefix: default_gated_prefix(),
            login_path: default_login_path(),
        }
    }
}

fn default_gated_prefix() -> String {
    "/admin".to_string()
}

fn default_login_path() -> String {
    "/admin/login".to_string()
}

/// Directory holding `config.toml` and the session file.
///
/// `MASJID_CONFIG_DIR` overrides the platform default.
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MASJID_CONFIG_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    directories::ProjectDirs::from("id", "masjid", "masjid-admin")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn load_config() -> Result<Config> {
    let config_dir = get_config_dir();

    let config = ::config::Config::builder()
        // Start with defaults
        .set_default("api_url", default_api_url())?
        // Load from config file if it exists
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy())
                .required(false),
        )
        // Override with environment variables (MASJID_API_URL, MASJID_ROUTES__LOGIN_PATH, etc.)
        .add_source(
            ::config::Environment::with_prefix("MASJID")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
