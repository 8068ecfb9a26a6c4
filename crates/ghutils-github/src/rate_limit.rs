//! Reporting and gating on the API rate limit.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::client::GitHubClient;
use crate::error::{Error, Result};
use crate::traits::GitHubApi;

/// State of the core API rate limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RateLimit {
    /// Requests allowed per window.
    pub limit: u64,

    /// Requests left in the current window.
    pub remaining: u64,

    /// Requests made in the current window.
    #[serde(default)]
    pub used: u64,

    /// When the window resets.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub reset: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RateLimitResponse {
    rate: RateLimit,
}

impl GitHubClient {
    /// Get the core API rate limit. This call does not count against it.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn rate_limit(&self) -> Result<RateLimit> {
        let response: RateLimitResponse = self.get("/rate_limit").await?;
        Ok(response.rate)
    }
}

/// Brackets a series of requests, refusing to start when none are available.
///
/// ```ignore
/// let gate = RateLimitGate::open(&client).await?;
/// println!("{} requests available.", gate.available());
/// // ... make requests ...
/// println!("{}", gate.close(&client).await?);
/// ```
#[derive(Debug)]
#[must_use = "close the gate to find out how many requests were used"]
pub struct RateLimitGate {
    before: RateLimit,
}

impl RateLimitGate {
    /// Read the rate limit before making requests.
    ///
    /// # Errors
    /// Returns [`Error::RateLimitExceeded`] if no requests remain.
    pub async fn open<G: GitHubApi>(api: &G) -> Result<Self> {
        let before = api.rate_limit().await?;

        if before.remaining == 0 {
            return Err(Error::RateLimitExceeded {
                reset_time: before.reset,
            });
        }

        debug!(remaining = before.remaining, reset = %before.reset, "rate limit gate opened");
        Ok(Self { before })
    }

    /// Requests that were available when the gate opened.
    #[must_use]
    pub const fn available(&self) -> u64 {
        self.before.remaining
    }

    /// Read the rate limit again and report how many requests were used.
    ///
    /// # Errors
    /// Returns error if the rate limit cannot be read.
    pub async fn close<G: GitHubApi>(self, api: &G) -> Result<RateLimitUsage> {
        let after = api.rate_limit().await?;

        Ok(RateLimitUsage {
            used: self.before.remaining.saturating_sub(after.remaining),
            remaining: after.remaining,
            reset: after.reset,
        })
    }
}

/// Requests consumed between [`RateLimitGate::open`] and [`RateLimitGate::close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitUsage {
    pub used: u64,
    pub remaining: u64,
    pub reset: DateTime<Utc>,
}

impl fmt::Display for RateLimitUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Used {} requests. {} remaining. Resets at {}",
            self.used, self.remaining, self.reset
        )
    }
}
