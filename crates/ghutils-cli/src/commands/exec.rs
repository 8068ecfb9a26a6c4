//! `ghutils exec` command - Run a command that commits as a bot.

use std::process::Command;

use anyhow::{Context, Result, bail};
use ghutils_core::CommitIdentity;

use crate::commands::{GlobalArgs, utils};
use crate::output;

/// Run the exec command.
pub fn run(
    global: &GlobalArgs,
    name: Option<String>,
    user_id: Option<u64>,
    command: &[String],
) -> Result<()> {
    let identity = match (name, user_id) {
        (Some(name), Some(user_id)) => CommitIdentity::bot(name, user_id),
        _ => utils::load_config(global)?
            .committer
            .context("No committer given - pass --as and --user-id, or set [committer] in the config")?,
    };

    let Some((program, args)) = command.split_first() else {
        bail!("No command given");
    };

    output::info(&format!("Committing as {} <{}>", identity.name, identity.email));

    let mut child = Command::new(program);
    child.args(args);
    identity.apply(&mut child);

    let status = child
        .status()
        .with_context(|| format!("Failed to run {program}"))?;

    if !status.success() {
        bail!("{program} exited with {status}");
    }

    Ok(())
}
