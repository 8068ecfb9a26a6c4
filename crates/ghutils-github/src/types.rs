//! GitHub API types.

use serde::{Deserialize, Serialize};

/// A pull request, reduced to what locating its check runs needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number.
    pub number: u64,

    /// SHA of the head commit; its check-runs describe the PR's CI state.
    pub head_sha: String,
}

/// A CI check run, reduced to the fields check classification reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRun {
    /// Check name.
    pub name: String,

    /// Lifecycle phase of the run.
    pub status: CheckRunStatus,

    /// Outcome, once the run has completed.
    pub conclusion: Option<CheckConclusion>,
}

impl CheckRun {
    /// Create a check run.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        status: CheckRunStatus,
        conclusion: Option<CheckConclusion>,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            conclusion,
        }
    }

    /// A completed run with the given conclusion.
    #[must_use]
    pub fn completed(name: impl Into<String>, conclusion: CheckConclusion) -> Self {
        Self::new(name, CheckRunStatus::Completed, Some(conclusion))
    }
}

/// Lifecycle phase of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckRunStatus {
    /// Check is queued.
    Queued,
    /// Check is running (legacy status value).
    Running,
    /// Check is in progress.
    InProgress,
    /// Check has finished.
    Completed,
    /// Check is waiting on an environment.
    Waiting,
    /// Check has been requested.
    Requested,
    /// Check is pending.
    Pending,
    /// A status this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl CheckRunStatus {
    /// Check if this status indicates the check is still running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Queued | Self::Running | Self::InProgress)
    }
}

/// Outcome of a completed check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    /// Check passed.
    Success,
    /// Check failed.
    Failure,
    /// Check finished without a verdict.
    Neutral,
    /// Check was cancelled.
    Cancelled,
    /// Check timed out.
    TimedOut,
    /// Check needs manual action.
    ActionRequired,
    /// Check was skipped.
    Skipped,
    /// Check result is stale.
    Stale,
    /// A conclusion this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl CheckConclusion {
    /// Check if this conclusion counts as a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::Failure | Self::Cancelled | Self::TimedOut | Self::ActionRequired
        )
    }
}

/// A label attached to an issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueLabel {
    /// Label name.
    pub name: String,

    /// Background colour, without a leading `#`.
    #[serde(default)]
    pub color: String,

    /// Label description.
    pub description: Option<String>,
}

/// A GitHub user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name.
    pub login: String,

    /// Numeric account ID.
    pub id: u64,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Profile URL.
    #[serde(default)]
    pub html_url: Option<String>,

    /// Account kind, e.g. `User`, `Organization` or `Bot`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// A GitHub organization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Organization {
    /// Login name.
    pub login: String,

    /// Numeric account ID.
    pub id: u64,
}

/// The owner of a repository or installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Login name.
    pub login: String,

    /// Numeric account ID.
    #[serde(default)]
    pub id: u64,
}

/// A repository as returned by list endpoints.
///
/// Listing endpoints return a summary; [`crate::GitHubClient::get_repo`]
/// fills in the fields marked optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name.
    pub name: String,

    /// `owner/name`.
    pub full_name: String,

    /// Owning account.
    pub owner: Account,

    /// Whether the repository is private.
    #[serde(default)]
    pub private: bool,

    /// Whether the repository is a fork.
    #[serde(default)]
    pub fork: bool,

    /// Repository URL.
    pub html_url: String,

    /// Repository description.
    #[serde(default)]
    pub description: Option<String>,

    /// Default branch.
    #[serde(default)]
    pub default_branch: Option<String>,

    /// Stargazer count (full representation only).
    #[serde(default)]
    pub stargazers_count: Option<u64>,

    /// Open issue count (full representation only).
    #[serde(default)]
    pub open_issues_count: Option<u64>,
}

/// A branch and its protection summary.
#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    /// Branch name.
    pub name: String,

    /// Whether the branch is protected.
    #[serde(default)]
    pub protected: bool,

    /// Protection summary, when the token can see it.
    #[serde(default)]
    pub protection: Option<BranchProtectionSummary>,
}

/// Protection summary embedded in a branch response.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchProtectionSummary {
    /// Whether protection is enabled.
    #[serde(default)]
    pub enabled: bool,

    /// Required status checks, if any.
    #[serde(default)]
    pub required_status_checks: Option<RequiredStatusChecks>,
}

/// Status checks that must pass before merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredStatusChecks {
    /// Require branches to be up to date before merging.
    #[serde(default)]
    pub strict: bool,

    /// Names of the required checks.
    #[serde(default)]
    pub contexts: Vec<String>,
}

/// An installation of a GitHub App.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Installation {
    /// Installation ID.
    pub id: u64,

    /// Account the app is installed on.
    pub account: Account,

    /// URL listing the repositories the installation can access.
    #[serde(default)]
    pub repositories_url: Option<String>,
}
