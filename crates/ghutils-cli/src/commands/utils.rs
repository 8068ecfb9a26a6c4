use std::future::Future;

use anyhow::{Context, Result};
use ghutils_core::Config;
use ghutils_github::rate_limit::RateLimitGate;
use ghutils_github::{Auth, GitHubClient, SecretString};
use tokio::runtime::Runtime;
use tracing::warn;

use crate::commands::GlobalArgs;
use crate::output;

/// Load the config named on the command line.
pub fn load_config(global: &GlobalArgs) -> Result<Config> {
    Config::load(&global.config)
        .with_context(|| format!("Failed to load {}", global.config.display()))
}

/// Pick credentials: `--token`, then the configured variable, then gh.
pub fn auth(global: &GlobalArgs, config: &Config) -> Auth {
    global.token.as_ref().map_or_else(
        || Auth::from_env_or_gh(&config.github.token_var),
        |token| Auth::Token(SecretString::from(token.clone())),
    )
}

/// Build an authenticated client for the configured API.
pub fn github_client(global: &GlobalArgs) -> Result<GitHubClient> {
    let config = load_config(global)?;
    client_for(&config, &auth(global, &config))
}

/// Build a client for the configured API with explicit credentials.
pub fn client_for(config: &Config, auth: &Auth) -> Result<GitHubClient> {
    let client = match &config.github.api_url {
        Some(url) => GitHubClient::with_base_url(auth, url.as_str()),
        None => GitHubClient::new(auth),
    };

    client.context("Failed to authenticate with GitHub")
}

pub fn runtime() -> Result<Runtime> {
    Runtime::new().context("Failed to start async runtime")
}

/// Run `work` between two rate limit reads, reporting what it used.
///
/// Refuses to start when no requests remain.
pub async fn gated<T>(
    client: &GitHubClient,
    work: impl Future<Output = Result<T>>,
) -> Result<T> {
    let gate = RateLimitGate::open(client).await?;
    output::info(&format!("{} requests available.", gate.available()));

    let result = work.await;

    match gate.close(client).await {
        Ok(usage) => output::info(&usage.to_string()),
        Err(e) => warn!(error = %e, "could not read rate limit after running"),
    }

    result
}
