use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Authenticated session handed to anything that talks to the API
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the listings API, without a trailing slash
    pub api_url: String,
    pub session: Session,
    pub search_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session: Session::anonymous(),
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
        }
    }
}

impl Config {
    /// Load from `ESTATE_API_URL`, `ESTATE_API_TOKEN` and `ESTATE_SEARCH_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup("ESTATE_API_URL").filter(|v| !v.trim().is_empty()) {
            config.api_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(token) = lookup("ESTATE_API_TOKEN").filter(|v| !v.trim().is_empty()) {
            config.session = Session::with_token(token.trim());
        }

        if let Some(secs) = lookup("ESTATE_SEARCH_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid ESTATE_SEARCH_TIMEOUT_SECS: {:?}", secs))?;
            anyhow::ensure!(secs > 0, "ESTATE_SEARCH_TIMEOUT_SECS must be positive");
            config.search_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
