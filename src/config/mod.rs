//! Configuration module for the landing service.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::locale::Lang;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// A variable that is set but unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
    pub reason: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}={:?}: {}", self.variable, self.value, self.reason)
    }
}

impl std::error::Error for ConfigError {}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for the admin API (unset disables the check)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
    /// Language served when a request names none
    pub default_lang: Lang,
    /// Upper bound on request bodies, in bytes
    pub body_limit: usize,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables (and `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
        let invalid = |variable: &'static str, value: &str, reason: &str| ConfigError {
            variable,
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let api_psk = lookup("LANDING_API_PSK").filter(|k| !k.trim().is_empty());

        let db_path = var("LANDING_DB_PATH", "./data/landing.sqlite").into();

        let raw = var("LANDING_BIND_ADDR", "127.0.0.1:8080");
        let bind_addr = raw
            .parse()
            .map_err(|_| invalid("LANDING_BIND_ADDR", &raw, "expected host:port"))?;

        let log_level = var("LANDING_LOG_LEVEL", "info");

        let raw = var("LANDING_LOG_FORMAT", "text");
        let log_format = match raw.to_ascii_lowercase().as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            _ => return Err(invalid("LANDING_LOG_FORMAT", &raw, "expected text or json")),
        };

        let raw = var("LANDING_DEFAULT_LANG", "ua");
        let default_lang = Lang::parse(&raw)
            .ok_or_else(|| invalid("LANDING_DEFAULT_LANG", &raw, "expected ua or en"))?;

        let raw = var("LANDING_BODY_LIMIT_MB", "25");
        let body_limit = match raw.trim().parse::<usize>() {
            Ok(mb) if mb > 0 => mb * 1024 * 1024,
            _ => return Err(invalid("LANDING_BODY_LIMIT_MB", &raw, "expected a positive integer")),
        };

        let static_dir = var("LANDING_STATIC_DIR", "./static").into();

        Ok(Self {
            api_psk,
            db_path,
            bind_addr,
            log_level,
            log_format,
            default_lang,
            body_limit,
            static_dir,
        })
    }
}
