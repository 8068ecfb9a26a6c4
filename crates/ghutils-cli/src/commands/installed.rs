//! `ghutils installed` command - List repositories a GitHub App is installed on.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ghutils_github::apps::{AppCredentials, ContextSwitcher, list_installed_repos};
use ghutils_github::Auth;

use crate::commands::{GlobalArgs, utils};
use crate::output;

/// Run the installed command.
pub fn run(global: &GlobalArgs, app_id: u64, private_key: &Path, json: bool) -> Result<()> {
    let pem = fs::read(private_key)
        .with_context(|| format!("Failed to read {}", private_key.display()))?;
    let credentials = AppCredentials::from_pem(app_id, &pem)?;

    let config = utils::load_config(global)?;
    let client = utils::client_for(&config, &Auth::Token(credentials.jwt()?))?;
    let mut switcher = ContextSwitcher::new(client, credentials);

    let rt = utils::runtime()?;
    let repos = rt.block_on(list_installed_repos(&mut switcher))?;

    if json {
        output::essential(&serde_json::to_string_pretty(&repos)?);
        return Ok(());
    }

    for repo in &repos {
        output::essential(&repo.full_name);
    }
    output::info(&format!(
        "App {app_id} is installed on {} repositories",
        repos.len()
    ));

    Ok(())
}
