//! `ghutils user` command - Show the authenticated user.

use anyhow::Result;

use crate::commands::{GlobalArgs, utils};
use crate::output;

/// Run the user command.
pub fn run(global: &GlobalArgs, json: bool) -> Result<()> {
    let client = utils::github_client(global)?;
    let rt = utils::runtime()?;

    let user = rt.block_on(utils::gated(&client, async {
        Ok(client.get_user().await?)
    }))?;

    if json {
        output::essential(&serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    output::essential(&user.login);
    if let Some(name) = &user.name {
        output::detail(&format!("  {name}"));
    }
    if let Some(url) = &user.html_url {
        output::detail(&format!("  {url}"));
    }

    Ok(())
}
