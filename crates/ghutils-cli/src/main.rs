//! ghutils CLI - GitHub housekeeping from the terminal.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{Cli, Commands};

/// Variable overriding the log filter, e.g. `GHUTILS_LOG=ghutils_github=trace`.
const LOG_ENV: &str = "GHUTILS_LOG";

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn main() {
    let cli = Cli::parse();
    let global = &cli.global;

    output::set_quiet(global.quiet);
    init_tracing(global.verbose);

    let result = match cli.command {
        Commands::RateLimit => commands::rate_limit::run(global),
        Commands::User { json } => commands::user::run(global, json),
        Commands::ProtectBranch {
            owner,
            repo,
            branch,
            checks,
        } => commands::protect::run(global, &owner, &repo, &branch, checks),
        Commands::Repos {
            users,
            orgs,
            full,
            json,
        } => commands::repos::run(global, &users, &orgs, full, json),
        Commands::LabelFailures {
            owner,
            repo,
            pr,
            dry_run,
        } => commands::labels::run_label_failures(global, &owner, &repo, pr, dry_run),
        Commands::CreateLabels { owner, repo } => commands::labels::run_create(global, &owner, &repo),
        Commands::Secrets { owner, repo } => commands::secrets::run_list(global, &owner, &repo),
        Commands::SetSecret {
            owner,
            repo,
            name,
            value,
        } => commands::secrets::run_set(global, &owner, &repo, &name, value),
        Commands::Installed {
            app_id,
            private_key,
            json,
        } => commands::installed::run(global, app_id, &private_key, json),
        Commands::Footer {
            owner,
            name,
            date,
            kind,
            docs_url,
        } => {
            commands::footer::run(&owner, &name, date, kind, docs_url.as_deref());
            Ok(())
        }
        Commands::Exec {
            name,
            user_id,
            command,
        } => commands::exec::run(global, name, user_id, &command),
    };

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
