//! `ghutils protect-branch` command - Protect a branch.

use anyhow::{Result, bail};
use ghutils_github::branch::protect_branch;

use crate::commands::{GlobalArgs, utils};
use crate::output;

/// Run the protect-branch command.
pub fn run(
    global: &GlobalArgs,
    owner: &str,
    repo: &str,
    branch: &str,
    checks: Vec<String>,
) -> Result<()> {
    let client = utils::github_client(global)?;
    let rt = utils::runtime()?;

    let status_checks = (!checks.is_empty()).then_some(checks);

    let protected = rt.block_on(utils::gated(&client, async {
        Ok(protect_branch(&client, owner, repo, branch, status_checks).await?)
    }))?;

    if !protected {
        bail!("Branch {owner}/{repo}@{branch} not found, or you lack admin access");
    }

    output::success(&format!("Protected {owner}/{repo}@{branch}"));
    Ok(())
}
