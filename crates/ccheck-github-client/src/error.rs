//! GitHub API client error types.

/// Errors from GitHub API calls.
#[derive(Debug, thiserror::Error)]
pub enum GithubApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// GitHub returned a non-2xx status.
    #[error("GitHub API {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The configured base URL cannot carry a request path.
    #[error("cannot build request URL from {0}")]
    InvalidUrl(String),
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}
