//! Error types for ghutils-github.

use chrono::{DateTime, Utc};

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Authentication failed or token missing.
    #[error("GitHub authentication failed - check the token or set GITHUB_TOKEN")]
    AuthenticationFailed,

    /// Token not found.
    #[error("no GitHub token found - pass --token, set GITHUB_TOKEN or run `gh auth login`")]
    NoToken,

    /// The API answered 403 with no requests remaining.
    #[error("GitHub API rate limit exceeded - wait and try again")]
    RateLimited,

    /// No requests remain in the current rate-limit window.
    #[error("No requests available! Resets at {reset_time}")]
    RateLimitExceeded {
        /// When the rate limit window resets.
        reset_time: DateTime<Utc>,
    },

    /// The named user does not exist.
    #[error("No such user {0}")]
    NoSuchUser(String),

    /// The named organization does not exist.
    #[error("No such organization {0}")]
    NoSuchOrganization(String),

    /// PR not found.
    #[error("pull request not found: #{0}")]
    PrNotFound(u64),

    /// The GitHub App private key could not be parsed.
    #[error("invalid GitHub App private key: {0}")]
    InvalidPrivateKey(String),

    /// The repository's Actions public key is malformed.
    #[error("invalid secrets public key: {0}")]
    InvalidPublicKey(String),

    /// Sealing a secret failed.
    #[error("failed to encrypt secret")]
    Encryption,

    /// Signing the app JWT failed.
    #[error("failed to sign app token: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// API error with status code.
    #[error("GitHub API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Network error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response pointed at a host other than the configured API.
    #[error("refusing to send credentials to {0}")]
    ForeignUrl(String),

    /// A request URL could not be built.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("failed to parse GitHub response: {0}")]
    Parse(#[from] serde_json::Error),

    /// IO error (e.g., reading gh CLI token).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
