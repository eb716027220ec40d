//! GitHub API client configuration.
//!
//! Defaults target github.com. Override via environment variables or
//! explicit construction for GitHub Enterprise or tests.

use url::Url;
use zeroize::Zeroizing;

/// Default REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Configuration for talking to the GitHub REST API.
///
/// Custom `Debug` implementation redacts the `token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct GithubApiConfig {
    /// Base URL of the REST API.
    /// Default: <https://api.github.com>
    pub api_url: Url,
    /// Repository in `owner/name` form.
    pub repository: String,
    /// Token used as bearer credential. Zeroized on drop.
    pub token: Zeroizing<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header; GitHub rejects requests without one.
    pub user_agent: String,
}

impl std::fmt::Debug for GithubApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubApiConfig")
            .field("api_url", &self.api_url)
            .field("repository", &self.repository)
            .field("token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl GithubApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `GITHUB_TOKEN` (required)
    /// - `GITHUB_REPOSITORY` (required, `owner/name`)
    /// - `GITHUB_API_URL` (default: `https://api.github.com`)
    /// - `GITHUB_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("GITHUB_TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;
        let repository = lookup("GITHUB_REPOSITORY").ok_or(ConfigError::MissingRepository)?;
        validate_repository(&repository)?;

        let raw_url = lookup("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidUrl("GITHUB_API_URL".to_string(), e.to_string()))?;

        Ok(Self {
            api_url,
            repository,
            token: Zeroizing::new(token),
            timeout_secs: lookup("GITHUB_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            user_agent: default_user_agent(),
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base` cannot be parsed.
    pub fn local_mock(base: &str, repository: &str, token: &str) -> Result<Self, ConfigError> {
        validate_repository(repository)?;
        Ok(Self {
            api_url: Url::parse(base)
                .map_err(|e| ConfigError::InvalidUrl(base.to_string(), e.to_string()))?,
            repository: repository.to_string(),
            token: Zeroizing::new(token.to_string()),
            timeout_secs: 5,
            user_agent: default_user_agent(),
        })
    }

    /// Repository owner and name.
    pub fn owner_and_name(&self) -> (&str, &str) {
        self.repository
            .split_once('/')
            .unwrap_or((self.repository.as_str(), ""))
    }
}

fn default_user_agent() -> String {
    format!("ccheck/{}", env!("CARGO_PKG_VERSION"))
}

fn validate_repository(repository: &str) -> Result<(), ConfigError> {
    match repository.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(())
        }
        _ => Err(ConfigError::InvalidRepository(repository.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GITHUB_TOKEN environment variable is required")]
    MissingToken,
    #[error("GITHUB_TOKEN is not a valid HTTP header value")]
    InvalidToken,
    #[error("GITHUB_REPOSITORY environment variable is required")]
    MissingRepository,
    #[error("invalid repository \"{0}\" (expected owner/name)")]
    InvalidRepository(String),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
