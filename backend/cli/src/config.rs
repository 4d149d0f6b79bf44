use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use whiteboard_core::DEFAULT_EXPORT_DIR;
use whiteboard_understanding::anthropic::{DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

/// Runtime configuration, read once at startup.
#[derive(Clone)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Anthropic API key
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Output-token budget per analysis
    pub max_tokens: u32,
    pub export_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Enables rolling JSON log files when set
    pub log_dir: Option<PathBuf>,
    /// Filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            bind_address: get("WHITEBOARD_BIND").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or("WHITEBOARD_PORT", get("WHITEBOARD_PORT"), 7860)?,
            api_key: get(API_KEY_VAR).ok_or(ConfigError::MissingVar(API_KEY_VAR))?,
            base_url: get("ANTHROPIC_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: get("WHITEBOARD_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: parse_or("WHITEBOARD_MAX_TOKENS", get("WHITEBOARD_MAX_TOKENS"), DEFAULT_MAX_TOKENS)?,
            export_dir: get("WHITEBOARD_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR)),
            max_upload_bytes: parse_or(
                "WHITEBOARD_MAX_UPLOAD_BYTES",
                get("WHITEBOARD_MAX_UPLOAD_BYTES"),
                32 * 1024 * 1024,
            )?,
            log_dir: get("WHITEBOARD_LOG_DIR").map(PathBuf::from),
            log_level: get("WHITEBOARD_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T: FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("port", &self.port)
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("export_dir", &self.export_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("log_dir", &self.log_dir)
            .field("log_level", &self.log_level)
            .finish()
    }
}
