//! Configuration handling for the generation service.
//!
//! The only runtime configuration the core needs is the generative API
//! credential and endpoint. `Config::from_env` loads them with development
//! defaults so tests and demos run without a populated environment; the
//! explicit `Config::new` constructor is the dependency-injection seam.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable names, public so tests and callers can refer to them.
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_API_URL: &str = "GEMINI_API_URL";
pub const ENV_MODEL: &str = "GEMINI_MODEL";

const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_API_KEY: &str = "dev-key-unset";

/// Generation API configuration. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    api_key: String,
    api_url: String,
    model: String,
}

impl Config {
    pub fn new(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: api_url.into(),
            model: model.into(),
        }
    }

    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(ENV_API_KEY).unwrap_or_else(|_| DEFAULT_API_KEY.to_string());
        let api_url = env::var(ENV_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let model = env::var(ENV_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        if api_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: ENV_API_URL,
                reason: "must not be empty".to_string(),
            });
        }
        Ok(Self {
            api_key,
            api_url,
            model,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Base URL of the generative API, without a trailing slash.
    pub fn api_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Ensure environment-variable manipulating tests run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [ENV_API_KEY, ENV_API_URL, ENV_MODEL] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_when_env_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.api_key(), DEFAULT_API_KEY);
        assert_eq!(cfg.api_url(), DEFAULT_API_URL);
        assert_eq!(cfg.model(), DEFAULT_MODEL);
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_API_KEY, "test-key");
            env::set_var(ENV_API_URL, "http://localhost:9000/v1beta/");
            env::set_var(ENV_MODEL, "gemini-test");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.api_key(), "test-key");
        // Trailing slash is stripped so URL joining stays predictable.
        assert_eq!(cfg.api_url(), "http://localhost:9000/v1beta");
        assert_eq!(cfg.model(), "gemini-test");
        clear_env();
    }
}
