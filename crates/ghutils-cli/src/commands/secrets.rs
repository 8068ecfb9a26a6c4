//! `ghutils secrets` and `ghutils set-secret` commands.

use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use ghutils_github::secrets::SecretWrite;

use crate::commands::{GlobalArgs, utils};
use crate::output;

/// Run the secrets command.
pub fn run_list(global: &GlobalArgs, owner: &str, repo: &str) -> Result<()> {
    let client = utils::github_client(global)?;
    let rt = utils::runtime()?;

    let names = rt.block_on(utils::gated(&client, async {
        Ok(client.get_secrets(owner, repo).await?)
    }))?;

    if names.is_empty() {
        output::info(&format!("{owner}/{repo} has no secrets"));
    }
    for name in &names {
        output::essential(name);
    }

    Ok(())
}

/// Run the set-secret command.
pub fn run_set(
    global: &GlobalArgs,
    owner: &str,
    repo: &str,
    name: &str,
    value: Option<String>,
) -> Result<()> {
    let value = match value {
        Some(value) => value,
        None => read_stdin()?,
    };

    if value.is_empty() {
        bail!("Refusing to set an empty secret");
    }

    let client = utils::github_client(global)?;
    let rt = utils::runtime()?;

    let write = rt.block_on(utils::gated(&client, async {
        let key = client.get_public_key(owner, repo).await?;
        Ok(client.set_secret(owner, repo, name, &value, &key).await?)
    }))?;

    match write {
        SecretWrite::Created => output::success(&format!("Created secret {name}")),
        SecretWrite::Updated => output::success(&format!("Updated secret {name}")),
    }

    Ok(())
}

/// Read a secret value from stdin, without the trailing newline.
fn read_stdin() -> Result<String> {
    let mut value = String::new();
    io::stdin()
        .read_to_string(&mut value)
        .context("Failed to read secret from stdin")?;

    Ok(value.trim_end_matches(['\r', '\n']).to_string())
}
