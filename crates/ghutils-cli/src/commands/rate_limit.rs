//! `ghutils rate-limit` command - Show the API rate limit.

use anyhow::Result;

use crate::commands::{GlobalArgs, utils};
use crate::output;

/// Run the rate-limit command.
pub fn run(global: &GlobalArgs) -> Result<()> {
    let client = utils::github_client(global)?;
    let rt = utils::runtime()?;

    let rate = rt.block_on(client.rate_limit())?;

    output::essential(&format!(
        "{}/{} requests remaining",
        rate.remaining, rate.limit
    ));
    output::detail(&format!("  Used {}. Resets at {}", rate.used, rate.reset));

    Ok(())
}
