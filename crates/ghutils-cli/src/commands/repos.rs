//! `ghutils repos` command - List repositories owned by users and organizations.

use anyhow::{Result, bail};
use ghutils_github::repos::{list_repos, list_repos_full};
use ghutils_github::Repository;

use crate::commands::{GlobalArgs, utils};
use crate::output;

/// Run the repos command.
pub fn run(
    global: &GlobalArgs,
    users: &[String],
    orgs: &[String],
    full: bool,
    json: bool,
) -> Result<()> {
    if users.is_empty() && orgs.is_empty() {
        bail!("Nothing to list - pass --user or --org");
    }

    let client = utils::github_client(global)?;
    let rt = utils::runtime()?;

    let repos = rt.block_on(utils::gated(&client, async {
        let repos = if full {
            list_repos_full(&client, users, orgs).await?
        } else {
            list_repos(&client, users, orgs).await?
        };
        Ok(repos)
    }))?;

    if json {
        output::essential(&serde_json::to_string_pretty(&repos)?);
        return Ok(());
    }

    for repo in &repos {
        output::essential(&describe(repo));
    }
    output::info(&format!("{} repositories", repos.len()));

    Ok(())
}

fn describe(repo: &Repository) -> String {
    let mut line = repo.full_name.clone();
    if repo.private {
        line.push_str(" (private)");
    }
    if repo.fork {
        line.push_str(" (fork)");
    }
    if let Some(stars) = repo.stargazers_count {
        line.push_str(&format!(" ★{stars}"));
    }
    line
}
