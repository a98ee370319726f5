//! Client configuration.
//!
//! Defaults match the stock deployment: the collaborator listens on
//! `http://localhost:8000` and serves the `todos` resource, and the list
//! reveals three items per page.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_RESOURCE: &str = "todos";
pub const DEFAULT_PAGE_SIZE: usize = 3;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme, host and optional prefix of the collaborator.
    pub api_url: String,
    /// Path of the collection below `api_url`.
    pub resource: String,
    /// Number of items each `reveal` adds to the visible window.
    pub page_size: usize,
    /// `None` disables the request timeout.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            resource: DEFAULT_RESOURCE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl ClientConfig {
    /// Read `TODO_API_URL`, `TODO_API_RESOURCE`, `TODO_PAGE_SIZE` and
    /// `TODO_API_TIMEOUT_SECS`, falling back to the defaults for unset vars.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("TODO_API_URL") {
            if url.trim().is_empty() {
                return Err(ConfigError::Invalid { var: "TODO_API_URL", value: url });
            }
            config.api_url = url;
        }
        if let Some(resource) = lookup("TODO_API_RESOURCE") {
            config.resource = resource;
        }
        if let Some(raw) = lookup("TODO_PAGE_SIZE") {
            config.page_size = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::Invalid { var: "TODO_PAGE_SIZE", value: raw }),
            };
        }
        if let Some(raw) = lookup("TODO_API_TIMEOUT_SECS") {
            // 0 disables the timeout
            config.timeout = match raw.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    return Err(ConfigError::Invalid { var: "TODO_API_TIMEOUT_SECS", value: raw })
                }
            };
        }

        Ok(config)
    }
}
