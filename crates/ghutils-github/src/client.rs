//! GitHub API client.
//!
//! Endpoint groups live next to the helpers that use them (`labels`,
//! `repos`, `apps`, ...) as further `impl GitHubClient` blocks; this module
//! holds the HTTP plumbing shared by all of them.

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::Auth;
use crate::branch::BranchProtection;
use crate::error::{Error, Result};
use crate::headers::GITHUB_JSON;
use crate::pagination::{PER_PAGE, Pagination};
use crate::rate_limit::RateLimit;
use crate::traits::GitHubApi;
use crate::types::{
    Branch, CheckRun, IssueLabel, Organization, PullRequest, Repository, User,
};

// === Internal API response types ===

/// Internal representation of a PR from the GitHub API.
#[derive(serde::Deserialize)]
struct ApiPullRequest {
    number: u64,
    head: ApiCommitRef,
}

/// The commit a PR's head points at.
#[derive(serde::Deserialize)]
struct ApiCommitRef {
    sha: String,
}

impl From<ApiPullRequest> for PullRequest {
    fn from(pr: ApiPullRequest) -> Self {
        Self {
            number: pr.number,
            head_sha: pr.head.sha,
        }
    }
}

/// Page of the check-runs listing.
#[derive(serde::Deserialize)]
struct CheckRunsPage {
    check_runs: Vec<CheckRun>,
}

/// GitHub API client.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    /// Token stored as `SecretString` for automatic zeroization on drop.
    token: SecretString,
}

impl GitHubClient {
    /// Default GitHub API URL.
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";

    /// Create a new GitHub client.
    ///
    /// # Errors
    /// Returns error if authentication fails.
    pub fn new(auth: &Auth) -> Result<Self> {
        Self::with_base_url(auth, Self::DEFAULT_API_URL)
    }

    /// Create a new GitHub client with a custom API URL (for GitHub Enterprise).
    ///
    /// # Errors
    /// Returns error if authentication fails.
    pub fn with_base_url(auth: &Auth, base_url: impl Into<String>) -> Result<Self> {
        let token = auth.resolve()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));
        headers.insert(USER_AGENT, HeaderValue::from_static("ghutils"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// The API root this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the bearer token used for subsequent requests.
    pub fn set_token(&mut self, token: SecretString) {
        self.token = token;
    }

    /// Resolve `path` against the base URL.
    ///
    /// Absolute URLs, such as those from `Link` headers, pass through only
    /// when they share the base URL's origin.
    pub(crate) fn url(&self, path: &str) -> Result<String> {
        if !(path.starts_with("https://") || path.starts_with("http://")) {
            return Ok(format!("{}{}", self.base_url, path));
        }

        let base = Url::parse(&self.base_url)?;
        let target = Url::parse(path)?;
        if target.origin() != base.origin() {
            return Err(Error::ForeignUrl(target.origin().ascii_serialization()));
        }

        Ok(path.to_string())
    }

    /// Start an authenticated request.
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        debug!(%method, %url, "GitHub API request");

        Ok(self.client.request(method, url).header(
            AUTHORIZATION,
            format!("Bearer {}", self.token.expose_secret()),
        ))
    }

    /// Make a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path)?.send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request, returning `None` on 404.
    pub(crate) async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let response = self.request(Method::GET, path)?.send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Self::handle_response(response).await.map(Some)
    }

    /// GET every page of a listing, following `Link: rel="next"`.
    ///
    /// `items` pulls the entries out of one page, for endpoints that wrap
    /// their arrays in an object.
    pub(crate) async fn get_all_pages<P, T>(
        &self,
        path: &str,
        items: impl Fn(P) -> Vec<T> + Send,
    ) -> Result<Vec<T>>
    where
        P: DeserializeOwned,
    {
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut next = Some(self.url(&format!("{path}{separator}per_page={PER_PAGE}"))?);
        let mut all = Vec::new();

        while let Some(url) = next.take() {
            let response = self.request(Method::GET, &url)?.send().await?;
            let pagination = Pagination::from_headers(response.headers());
            let page: P = Self::handle_response(response).await?;

            all.extend(items(page));
            next = pagination.next_url;
        }

        Ok(all)
    }

    /// Make a POST request.
    pub(crate) async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.request(Method::POST, path)?.json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Send a prepared request and decode the response.
    pub(crate) async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Send a request whose body is not needed, returning the status.
    ///
    /// Success codes and any code in `tolerated` are returned as `Ok`.
    pub(crate) async fn send_for_status(
        &self,
        request: RequestBuilder,
        tolerated: &[StatusCode],
    ) -> Result<StatusCode> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() || tolerated.contains(&status) {
            return Ok(status);
        }

        Err(Self::error_from(response).await)
    }

    /// Handle API response.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        if response.status().is_success() {
            let body = response.json().await?;
            return Ok(body);
        }

        Err(Self::error_from(response).await)
    }

    /// Map an unsuccessful response to an [`Error`].
    async fn error_from(response: Response) -> Error {
        let status_code = response.status().as_u16();

        match status_code {
            401 => Error::AuthenticationFailed,
            403 if response
                .headers()
                .get("x-ratelimit-remaining")
                .is_some_and(|v| v == "0") =>
            {
                Error::RateLimited
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Error::ApiError {
                    status: status_code,
                    message: text,
                }
            }
        }
    }

    // === PR Operations ===

    /// Get a pull request by number.
    ///
    /// # Errors
    /// Returns [`Error::PrNotFound`] if the PR does not exist, or an error if
    /// the API call fails.
    pub async fn get_pr(&self, owner: &str, repo: &str, number: u64) -> Result<PullRequest> {
        let api_pr: ApiPullRequest = self
            .get_optional(&format!("/repos/{owner}/{repo}/pulls/{number}"))
            .await?
            .ok_or(Error::PrNotFound(number))?;

        Ok(api_pr.into())
    }

    // === Check Runs ===

    /// Get every check run for a commit.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn get_check_runs(
        &self,
        owner: &str,
        repo: &str,
        commit_sha: &str,
    ) -> Result<Vec<CheckRun>> {
        self.get_all_pages(
            &format!("/repos/{owner}/{repo}/commits/{commit_sha}/check-runs"),
            |page: CheckRunsPage| page.check_runs,
        )
        .await
    }

    // === Users ===

    /// Get the authenticated user.
    ///
    /// # Errors
    /// Returns [`Error::AuthenticationFailed`] without valid credentials.
    pub async fn get_user(&self) -> Result<User> {
        self.get("/user").await
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("token", &"[redacted]")
            .finish_non_exhaustive()
    }
}

// === Trait Implementation ===

impl GitHubApi for GitHubClient {
    async fn rate_limit(&self) -> Result<RateLimit> {
        self.rate_limit().await
    }

    async fn find_user(&self, login: &str) -> Result<Option<User>> {
        self.find_user(login).await
    }

    async fn find_org(&self, login: &str) -> Result<Option<Organization>> {
        self.find_org(login).await
    }

    async fn list_owned_repos(&self, login: &str) -> Result<Vec<Repository>> {
        self.list_owned_repos(login).await
    }

    async fn get_repo(&self, full_name: &str) -> Result<Repository> {
        self.get_repo(full_name).await
    }

    async fn get_branch(&self, owner: &str, repo: &str, branch: &str) -> Result<Branch> {
        self.get_branch(owner, repo, branch).await
    }

    async fn update_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        protection: &BranchProtection,
    ) -> Result<bool> {
        self.update_branch_protection(owner, repo, branch, protection)
            .await
    }

    async fn get_pr(&self, owner: &str, repo: &str, number: u64) -> Result<PullRequest> {
        self.get_pr(owner, repo, number).await
    }

    async fn get_check_runs(
        &self,
        owner: &str,
        repo: &str,
        commit_sha: &str,
    ) -> Result<Vec<CheckRun>> {
        self.get_check_runs(owner, repo, commit_sha).await
    }

    async fn list_issue_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<IssueLabel>> {
        self.list_issue_labels(owner, repo, number).await
    }

    async fn add_issue_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<Vec<IssueLabel>> {
        self.add_issue_labels(owner, repo, number, labels).await
    }

    async fn remove_issue_label(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        name: &str,
    ) -> Result<()> {
        self.remove_issue_label(owner, repo, number, name).await
    }
}
