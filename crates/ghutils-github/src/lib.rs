//! # ghutils-github
//!
//! Helpers layered over the GitHub REST API: rate-limit gating, branch
//! protection, repository listings, GitHub App authentication, Actions
//! secrets and labelling pull requests by their failing checks.
//!
//! Helpers that only need a handful of endpoints are generic over
//! [`GitHubApi`], which [`GitHubClient`] implements.
//!
//! # Security
//!
//! Authentication tokens are stored using `SecretString` which automatically
//! zeroizes memory when dropped, reducing credential exposure in memory dumps.

pub mod apps;
mod auth;
pub mod branch;
pub mod checks;
mod client;
mod error;
pub mod headers;
pub mod labels;
mod pagination;
pub mod rate_limit;
pub mod repos;
pub mod secrets;
mod traits;
mod types;

#[cfg(test)]
mod test_mocks;

pub use auth::{Auth, DEFAULT_TOKEN_VAR};
pub use client::GitHubClient;
pub use error::{Error, Result};
// Re-export secrecy for constructing Auth::Token and reading tokens back
pub use secrecy::{ExposeSecret, SecretString};
pub use traits::GitHubApi;
pub use types::{
    Account, Branch, BranchProtectionSummary, CheckConclusion, CheckRun, CheckRunStatus,
    Installation, IssueLabel, Organization, PullRequest, Repository,
    RequiredStatusChecks, User,
};
