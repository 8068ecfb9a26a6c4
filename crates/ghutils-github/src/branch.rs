//! Branch protection with sane defaults.

use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use tracing::{info, warn};

use crate::client::GitHubClient;
use crate::error::Result;
use crate::headers::LUKE_CAGE;
use crate::traits::GitHubApi;
use crate::types::{Branch, RequiredStatusChecks};

/// Body of a branch protection update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchProtection {
    pub required_status_checks: Option<RequiredStatusChecks>,
    pub enforce_admins: Option<bool>,
    pub required_pull_request_reviews: Option<RequiredReviews>,
    /// User/team push restrictions; always left unset.
    pub restrictions: Option<serde_json::Value>,
}

impl BranchProtection {
    /// Protection requiring `contexts` to pass (without requiring the branch
    /// to be up to date) and one approving review. Force pushes and deletion
    /// are blocked as a side effect of enabling protection.
    #[must_use]
    pub const fn with_checks(contexts: Vec<String>) -> Self {
        Self {
            required_status_checks: Some(RequiredStatusChecks {
                strict: false,
                contexts,
            }),
            enforce_admins: None,
            required_pull_request_reviews: Some(RequiredReviews {
                dismiss_stale_reviews: false,
                required_approving_review_count: 1,
            }),
            restrictions: None,
        }
    }
}

/// Pull request review requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredReviews {
    pub dismiss_stale_reviews: bool,
    pub required_approving_review_count: u8,
}

impl GitHubClient {
    /// Get a branch and its protection summary.
    ///
    /// # Errors
    /// Returns error if the branch does not exist or the API call fails.
    pub async fn get_branch(&self, owner: &str, repo: &str, branch: &str) -> Result<Branch> {
        self.get(&format!("/repos/{owner}/{repo}/branches/{branch}"))
            .await
    }

    /// Replace a branch's protection settings.
    ///
    /// Returns `false` if GitHub answers 404 (no such branch, or no admin access).
    ///
    /// # Errors
    /// Returns error for any other unsuccessful response.
    pub async fn update_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        protection: &BranchProtection,
    ) -> Result<bool> {
        let request = self
            .request(
                Method::PUT,
                &format!("/repos/{owner}/{repo}/branches/{branch}/protection"),
            )?
            .header(ACCEPT, LUKE_CAGE)
            .json(protection);

        let status = self
            .send_for_status(request, &[StatusCode::NOT_FOUND])
            .await?;

        Ok(status != StatusCode::NOT_FOUND)
    }
}

/// Enable branch protection and configure required status checks.
///
/// With `status_checks` of `None` the branch keeps the checks it already
/// requires. Returns `true` if protection was applied.
///
/// # Errors
/// Returns error if the branch cannot be read or the update fails.
pub async fn protect_branch<G: GitHubApi>(
    api: &G,
    owner: &str,
    repo: &str,
    branch: &str,
    status_checks: Option<Vec<String>>,
) -> Result<bool> {
    let contexts = match status_checks {
        Some(contexts) => contexts,
        None => api
            .get_branch(owner, repo, branch)
            .await?
            .protection
            .and_then(|p| p.required_status_checks)
            .map(|checks| checks.contexts)
            .unwrap_or_default(),
    };

    let protection = BranchProtection::with_checks(contexts);
    let protected = api
        .update_branch_protection(owner, repo, branch, &protection)
        .await?;

    if protected {
        info!(owner, repo, branch, "branch protection enabled");
    } else {
        warn!(owner, repo, branch, "branch not found, protection not applied");
    }

    Ok(protected)
}
