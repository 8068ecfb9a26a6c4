//! `ghutils label-failures` and `ghutils create-labels` commands.

use std::collections::BTreeSet;

use anyhow::Result;
use ghutils_github::checks::{Bucket, CheckBuckets, LabelPlan, get_checks_for_pr, label_pr_failures};
use ghutils_github::labels::CHECK_STATUS_LABELS;
use ghutils_github::{Error as GitHubError, GitHubClient};

use crate::commands::{GlobalArgs, utils};
use crate::output;

/// Buckets in the order they are displayed.
const DISPLAY_ORDER: [Bucket; 5] = [
    Bucket::Failing,
    Bucket::Running,
    Bucket::Successful,
    Bucket::Skipped,
    Bucket::Neutral,
];

/// Run the label-failures command.
pub fn run_label_failures(
    global: &GlobalArgs,
    owner: &str,
    repo: &str,
    pr: u64,
    dry_run: bool,
) -> Result<()> {
    let client = utils::github_client(global)?;
    let rt = utils::runtime()?;

    if dry_run {
        let (buckets, plan) = rt.block_on(utils::gated(&client, plan(&client, owner, repo, pr)))?;
        print_checks(&buckets);
        output::hr();
        print_labels("Would remove", &plan.remove);
        print_labels("Would end with", &plan.desired);
        return Ok(());
    }

    let labels = rt.block_on(utils::gated(&client, async {
        Ok(label_pr_failures(&client, owner, repo, pr).await?)
    }))?;

    output::success(&format!("Labelled {owner}/{repo}#{pr}"));
    for label in &labels {
        output::essential(label);
    }

    Ok(())
}

async fn plan(
    client: &GitHubClient,
    owner: &str,
    repo: &str,
    pr: u64,
) -> Result<(CheckBuckets, LabelPlan)> {
    let buckets = get_checks_for_pr(client, owner, repo, pr).await?;
    let current: BTreeSet<String> = client
        .list_issue_labels(owner, repo, pr)
        .await?
        .into_iter()
        .map(|label| label.name)
        .collect();

    let plan = LabelPlan::compute(&buckets, &current);
    Ok((buckets, plan))
}

fn print_checks(buckets: &CheckBuckets) {
    for bucket in DISPLAY_ORDER {
        for name in buckets.set(bucket) {
            output::detail(&format!("{} {name}", output::check_indicator(bucket)));
        }
    }
}

fn print_labels(heading: &str, labels: &BTreeSet<String>) {
    if labels.is_empty() {
        output::info(&format!("{heading}: (none)"));
        return;
    }

    output::info(&format!("{heading}:"));
    for label in labels {
        output::detail(&format!("  {label}"));
    }
}

/// Run the create-labels command.
pub fn run_create(global: &GlobalArgs, owner: &str, repo: &str) -> Result<()> {
    let client = utils::github_client(global)?;
    let rt = utils::runtime()?;

    rt.block_on(utils::gated(&client, async {
        for label in CHECK_STATUS_LABELS {
            match client.create_label(owner, repo, label).await {
                Ok(_) => output::success(&format!("Created {label}")),
                // 422: a label with this name already exists
                Err(GitHubError::ApiError { status: 422, .. }) => {
                    output::warn(&format!("{label} already exists"));
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }))
}
