//! Trait abstractions for GitHub API operations.
//!
//! This module defines the `GitHubApi` trait which abstracts the GitHub API
//! calls the helpers in this crate make, so they can run against a mock.

use crate::branch::BranchProtection;
use crate::rate_limit::RateLimit;
use crate::{
    Branch, CheckRun, IssueLabel, Organization, PullRequest, Repository, Result, User,
};

/// Trait for GitHub API operations.
///
/// All repository-scoped methods take `owner` and `repo` as parameters to
/// support operations across different repositories.
pub trait GitHubApi: Send + Sync {
    // === Rate Limit ===

    /// Get the core API rate limit for the current credentials.
    fn rate_limit(&self) -> impl std::future::Future<Output = Result<RateLimit>> + Send;

    // === Users & Repositories ===

    /// Look up a user by login.
    ///
    /// Returns `None` if no such user exists.
    fn find_user(
        &self,
        login: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>>> + Send;

    /// Look up an organization by login.
    ///
    /// Returns `None` if no such organization exists.
    fn find_org(
        &self,
        login: &str,
    ) -> impl std::future::Future<Output = Result<Option<Organization>>> + Send;

    /// List every repository owned by a user or organization, sorted by full name.
    fn list_owned_repos(
        &self,
        login: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Repository>>> + Send;

    /// Get the full representation of a repository (`owner/name`).
    fn get_repo(
        &self,
        full_name: &str,
    ) -> impl std::future::Future<Output = Result<Repository>> + Send;

    // === Branches ===

    /// Get a branch and its protection summary.
    fn get_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> impl std::future::Future<Output = Result<Branch>> + Send;

    /// Replace a branch's protection settings.
    ///
    /// Returns `false` if the branch could not be found.
    fn update_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        protection: &BranchProtection,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    // === PR Operations ===

    /// Get a pull request by number.
    fn get_pr(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> impl std::future::Future<Output = Result<PullRequest>> + Send;

    // === Check Runs ===

    /// Get check runs for a commit.
    fn get_check_runs(
        &self,
        owner: &str,
        repo: &str,
        commit_sha: &str,
    ) -> impl std::future::Future<Output = Result<Vec<CheckRun>>> + Send;

    // === Label Operations ===

    /// List the labels on an issue or pull request.
    fn list_issue_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> impl std::future::Future<Output = Result<Vec<IssueLabel>>> + Send;

    /// Add labels to an issue or pull request. Labels already present are kept.
    fn add_issue_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<IssueLabel>>> + Send;

    /// Remove a label from an issue or pull request. Absent labels are ignored.
    fn remove_issue_label(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        name: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
