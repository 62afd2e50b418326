use std::{env, fmt, fs, time::Duration};

use serde::Deserialize;
use url::Url;

// Start-up settings. Precedence: environment, then the optional TOML file,
// then built-in defaults.

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";
// Itinerary generation is slow.
const DEFAULT_HTTP_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub identity_url: Url,
    pub token_url: Url,
    pub identity_api_key: String,
    pub http_timeout: Duration,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_url: Option<String>,
    identity_url: Option<String>,
    token_url: Option<String>,
    identity_api_key: Option<String>,
    http_timeout_ms: Option<u64>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: String, message: String },
    Parse(String),
    InvalidUrl { key: &'static str, value: String },
    MissingApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, message } => write!(f, "cannot read {path}: {message}"),
            ConfigError::Parse(message) => write!(f, "invalid config file: {message}"),
            ConfigError::InvalidUrl { key, value } => {
                write!(f, "{key} must be an http(s) URL, got '{value}'")
            }
            ConfigError::MissingApiKey => write!(f, "IDENTITY_API_KEY must be set"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Reads `PLANNER_CONFIG` (if set) and the process environment.
pub fn load() -> Result<Config, ConfigError> {
    let file = match env::var("PLANNER_CONFIG") {
        Ok(path) => Some(fs::read_to_string(&path).map_err(|err| ConfigError::Read {
            path,
            message: err.to_string(),
        })?),
        Err(_) => None,
    };
    from_sources(file.as_deref(), |key| env::var(key).ok())
}

pub fn from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Config, ConfigError> {
    let file: FileConfig = match file {
        Some(text) => toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?,
        None => FileConfig::default(),
    };
    // Blank variables count as unset.
    let var = |key: &str| env(key).filter(|value| !value.trim().is_empty());

    let api_url = var("PLANNER_API_URL")
        .or(file.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let identity_url = var("IDENTITY_TOOLKIT_URL")
        .or(file.identity_url)
        .unwrap_or_else(|| DEFAULT_IDENTITY_URL.to_string());
    let token_url = var("SECURE_TOKEN_URL")
        .or(file.token_url)
        .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string());
    let identity_api_key = var("IDENTITY_API_KEY")
        .or(file.identity_api_key)
        .ok_or(ConfigError::MissingApiKey)?;

    let timeout_ms = var("HTTP_TIMEOUT_MS")
        .and_then(|value| value.trim().parse::<u64>().ok())
        .or(file.http_timeout_ms)
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_MS);

    Ok(Config {
        api_url: http_url("PLANNER_API_URL", &api_url)?,
        identity_url: http_url("IDENTITY_TOOLKIT_URL", &identity_url)?,
        token_url: http_url("SECURE_TOKEN_URL", &token_url)?,
        identity_api_key,
        http_timeout: Duration::from_millis(timeout_ms),
    })
}

fn http_url(key: &'static str, value: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidUrl {
        key,
        value: value.to_string(),
    };
    let url = Url::parse(value.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid());
    }
    Ok(url)
}
