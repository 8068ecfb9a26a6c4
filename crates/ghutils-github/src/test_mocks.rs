//! In-memory [`GitHubApi`] for exercising the generic helpers.
#![allow(clippy::unwrap_used)]

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Mutex;

use chrono::{TimeZone, Utc};

use crate::branch::BranchProtection;
use crate::rate_limit::RateLimit;
use crate::traits::GitHubApi;
use crate::types::Account;
use crate::{
    Branch, CheckRun, Error, IssueLabel, Organization, PullRequest, Repository, Result, User,
};

/// A call recorded by [`MockGitHub`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CheckRuns(String),
    GetRepo(String),
    ListRepos(String),
    RemoveLabel(String),
    AddLabels(Vec<String>),
    UpdateProtection(BranchProtection),
}

impl Call {
    const fn is_write(&self) -> bool {
        matches!(
            self,
            Self::RemoveLabel(_) | Self::AddLabels(_) | Self::UpdateProtection(_)
        )
    }
}

pub struct MockGitHub {
    head_sha: String,
    check_runs: Vec<CheckRun>,
    labels: Mutex<BTreeSet<String>>,
    rates: Mutex<VecDeque<RateLimit>>,
    branch: Option<Branch>,
    users: BTreeMap<String, Vec<String>>,
    orgs: BTreeMap<String, Vec<String>>,
    failing_writes: bool,
    calls: Mutex<Vec<Call>>,
}

impl MockGitHub {
    pub fn new() -> Self {
        Self {
            head_sha: "abc123".into(),
            check_runs: Vec::new(),
            labels: Mutex::new(BTreeSet::new()),
            rates: Mutex::new(VecDeque::new()),
            branch: None,
            users: BTreeMap::new(),
            orgs: BTreeMap::new(),
            failing_writes: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_check_runs(mut self, runs: Vec<CheckRun>) -> Self {
        self.check_runs = runs;
        self
    }

    pub fn with_labels(self, labels: &[&str]) -> Self {
        *self.labels.lock().unwrap() = labels.iter().map(|l| (*l).to_string()).collect();
        self
    }

    pub fn with_head_sha(mut self, sha: &str) -> Self {
        self.head_sha = sha.into();
        self
    }

    pub const fn with_failing_writes(mut self) -> Self {
        self.failing_writes = true;
        self
    }

    /// Successive `rate_limit` calls pop these in order.
    pub fn with_rates(self, rates: Vec<RateLimit>) -> Self {
        *self.rates.lock().unwrap() = rates.into();
        self
    }

    /// The branch returned by `get_branch`, as the API would send it.
    pub fn with_branch(mut self, branch: serde_json::Value) -> Self {
        self.branch = Some(serde_json::from_value(branch).unwrap());
        self
    }

    /// A user owning repositories with the given names.
    pub fn with_user(mut self, login: &str, repos: &[&str]) -> Self {
        self.users
            .insert(login.into(), repos.iter().map(|r| (*r).to_string()).collect());
        self
    }

    /// An organization owning repositories with the given names.
    pub fn with_org(mut self, login: &str, repos: &[&str]) -> Self {
        self.orgs
            .insert(login.into(), repos.iter().map(|r| (*r).to_string()).collect());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Mutating calls, in the order they were made.
    pub fn writes(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_write).collect()
    }

    pub fn check_runs_requested_for(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CheckRuns(sha) => Some(sha),
                _ => None,
            })
            .collect()
    }

    pub fn current_labels(&self) -> BTreeSet<String> {
        self.labels.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        let write = call.is_write();
        self.calls.lock().unwrap().push(call);

        if write && self.failing_writes {
            return Err(Error::ApiError {
                status: 500,
                message: "Internal Server Error".into(),
            });
        }
        Ok(())
    }

    fn issue_labels(&self) -> Vec<IssueLabel> {
        self.labels
            .lock()
            .unwrap()
            .iter()
            .map(|name| IssueLabel {
                name: name.clone(),
                color: "ededed".into(),
                description: None,
            })
            .collect()
    }

    fn repository(owner: &str, name: &str) -> Repository {
        Repository {
            name: name.into(),
            full_name: format!("{owner}/{name}"),
            owner: Account {
                login: owner.into(),
                id: 1,
            },
            private: false,
            fork: false,
            html_url: format!("https://github.com/{owner}/{name}"),
            description: None,
            default_branch: None,
            stargazers_count: None,
            open_issues_count: None,
        }
    }
}

impl GitHubApi for MockGitHub {
    async fn rate_limit(&self) -> Result<RateLimit> {
        let next = self.rates.lock().unwrap().pop_front();
        Ok(next.unwrap_or(RateLimit {
            limit: 5000,
            remaining: 5000,
            used: 0,
            reset: Utc.timestamp_opt(0, 0).unwrap(),
        }))
    }

    async fn find_user(&self, login: &str) -> Result<Option<User>> {
        Ok(self.users.contains_key(login).then(|| User {
            login: login.into(),
            id: 1,
            name: None,
            html_url: None,
            kind: Some("User".into()),
        }))
    }

    async fn find_org(&self, login: &str) -> Result<Option<Organization>> {
        Ok(self.orgs.contains_key(login).then(|| Organization {
            login: login.into(),
            id: 2,
        }))
    }

    async fn list_owned_repos(&self, login: &str) -> Result<Vec<Repository>> {
        self.record(Call::ListRepos(login.into()))?;
        let names = self
            .users
            .get(login)
            .or_else(|| self.orgs.get(login))
            .cloned()
            .unwrap_or_default();
        Ok(names.iter().map(|n| Self::repository(login, n)).collect())
    }

    async fn get_repo(&self, full_name: &str) -> Result<Repository> {
        self.record(Call::GetRepo(full_name.into()))?;
        let (owner, name) = full_name.split_once('/').unwrap();
        Ok(Repository {
            default_branch: Some("main".into()),
            stargazers_count: Some(42),
            open_issues_count: Some(0),
            ..Self::repository(owner, name)
        })
    }

    async fn get_branch(&self, _owner: &str, _repo: &str, branch: &str) -> Result<Branch> {
        self.branch.clone().ok_or_else(|| Error::ApiError {
            status: 404,
            message: format!("Branch {branch} not found"),
        })
    }

    async fn update_branch_protection(
        &self,
        _owner: &str,
        _repo: &str,
        _branch: &str,
        protection: &BranchProtection,
    ) -> Result<bool> {
        self.record(Call::UpdateProtection(protection.clone()))?;
        Ok(true)
    }

    async fn get_pr(&self, _owner: &str, _repo: &str, number: u64) -> Result<PullRequest> {
        Ok(PullRequest {
            number,
            head_sha: self.head_sha.clone(),
        })
    }

    async fn get_check_runs(
        &self,
        _owner: &str,
        _repo: &str,
        commit_sha: &str,
    ) -> Result<Vec<CheckRun>> {
        self.record(Call::CheckRuns(commit_sha.into()))?;
        Ok(self.check_runs.clone())
    }

    async fn list_issue_labels(
        &self,
        _owner: &str,
        _repo: &str,
        _number: u64,
    ) -> Result<Vec<IssueLabel>> {
        Ok(self.issue_labels())
    }

    async fn add_issue_labels(
        &self,
        _owner: &str,
        _repo: &str,
        _number: u64,
        labels: &[String],
    ) -> Result<Vec<IssueLabel>> {
        self.record(Call::AddLabels(labels.to_vec()))?;
        self.labels.lock().unwrap().extend(labels.iter().cloned());
        Ok(self.issue_labels())
    }

    async fn remove_issue_label(
        &self,
        _owner: &str,
        _repo: &str,
        _number: u64,
        name: &str,
    ) -> Result<()> {
        self.record(Call::RemoveLabel(name.into()))?;
        self.labels.lock().unwrap().remove(name);
        Ok(())
    }
}
