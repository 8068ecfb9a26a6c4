//! Issue and pull request labels.
//!
//! [`CHECK_STATUS_LABELS`] holds the labels used to mark pull requests whose
//! checks are failing; see [`crate::checks`] for how they are applied.

use std::borrow::Cow;
use std::fmt;

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::client::GitHubClient;
use crate::error::Result;
use crate::types::IssueLabel;

/// An issue or pull request label, identified by its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The text of the label.
    pub name: Cow<'static, str>,

    /// The background colour of the label, e.g. `#B60205`.
    pub color: Cow<'static, str>,

    /// A short description of the label.
    pub description: Cow<'static, str>,
}

impl Label {
    /// Create a label.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            color: Cow::Owned(color.into()),
            description: Cow::Owned(description.into()),
        }
    }

    const fn from_static(name: &'static str, color: &'static str, description: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            color: Cow::Borrowed(color),
            description: Cow::Borrowed(description),
        }
    }

    /// The label as a JSON object with `name`, `color` and `description` keys.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "color": self.color,
            "description": self.description,
        })
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Labels corresponding to failing pull request checks.
pub const CHECK_STATUS_LABELS: &[Label] = &[
    Label::from_static("failure: flake8", "#B60205", "The Flake8 check is failing."),
    Label::from_static("failure: mypy", "#DC1C13", "The mypy check is failing."),
    Label::from_static("failure: docs", "#EA4C46", "The docs check is failing."),
    Label::from_static("failure: Windows", "#F07470", "The Windows tests are failing."),
    Label::from_static("failure: Linux", "#F6BDC0", "The Linux tests are failing."),
    // Reserved for three or more failing categories; not applied automatically.
    Label::from_static("failure: Multiple", "#D93F0B", "Multiple checks are failing."),
];

/// Request body for creating a label.
#[derive(Debug, Serialize)]
struct CreateLabel<'a> {
    name: &'a str,
    /// GitHub wants the colour without a leading `#`.
    color: &'a str,
    description: &'a str,
}

impl<'a> From<&'a Label> for CreateLabel<'a> {
    fn from(label: &'a Label) -> Self {
        Self {
            name: &label.name,
            color: label.color.trim_start_matches('#'),
            description: &label.description,
        }
    }
}

/// Request body for adding labels to an issue.
#[derive(Debug, Serialize)]
struct AddLabels<'a> {
    labels: &'a [String],
}

impl GitHubClient {
    /// Create `label` on a repository.
    ///
    /// # Errors
    /// Returns error if the label already exists or the API call fails.
    pub async fn create_label(&self, owner: &str, repo: &str, label: &Label) -> Result<IssueLabel> {
        info!(owner, repo, label = %label, "creating label");
        self.post(
            &format!("/repos/{owner}/{repo}/labels"),
            &CreateLabel::from(label),
        )
        .await
    }

    /// List the labels on an issue or pull request.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn list_issue_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<IssueLabel>> {
        self.get_all_pages(
            &format!("/repos/{owner}/{repo}/issues/{number}/labels"),
            |page: Vec<IssueLabel>| page,
        )
        .await
    }

    /// Add labels to an issue or pull request.
    ///
    /// Returns the full label set after the addition.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn add_issue_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<Vec<IssueLabel>> {
        self.post(
            &format!("/repos/{owner}/{repo}/issues/{number}/labels"),
            &AddLabels { labels },
        )
        .await
    }

    /// Remove a label from an issue or pull request.
    ///
    /// A label that is not on the issue is not an error.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn remove_issue_label(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        name: &str,
    ) -> Result<()> {
        let mut url = Url::parse(&self.url(&format!(
            "/repos/{owner}/{repo}/issues/{number}/labels"
        ))?)?;
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(name);
        }

        let status = self
            .send_for_status(
                self.request(Method::DELETE, url.as_str())?,
                &[StatusCode::NOT_FOUND],
            )
            .await?;

        if status == StatusCode::NOT_FOUND {
            warn!(owner, repo, number, label = name, "label was not on the issue");
        }

        Ok(())
    }
}
