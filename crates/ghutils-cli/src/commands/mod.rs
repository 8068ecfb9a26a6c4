//! CLI command definitions and dispatch.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use ghutils_core::{Config, FooterKind};

pub mod exec;
pub mod footer;
pub mod installed;
pub mod labels;
pub mod protect;
pub mod rate_limit;
pub mod repos;
pub mod secrets;
pub mod user;
pub mod utils;

/// ghutils - GitHub housekeeping from the terminal.
#[derive(Debug, Parser)]
#[command(name = "ghutils", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// GitHub token; falls back to the configured variable, then `gh auth token`.
    #[arg(short, long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Path to the config file.
    #[arg(long, global = true, default_value = Config::DEFAULT_FILE)]
    pub config: PathBuf,

    /// Log more; repeat for trace output.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print results and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the API rate limit for the current token.
    RateLimit,

    /// Show the authenticated user.
    User {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Protect a branch and set its required status checks.
    ProtectBranch {
        owner: String,
        repo: String,
        branch: String,

        /// Required check; repeat for several. Keeps the existing checks if omitted.
        #[arg(long = "check", value_name = "NAME")]
        checks: Vec<String>,
    },

    /// List repositories owned by users and organizations.
    Repos {
        /// User whose repositories to list; repeatable.
        #[arg(long = "user", value_name = "LOGIN")]
        users: Vec<String>,

        /// Organization whose repositories to list; repeatable.
        #[arg(long = "org", value_name = "LOGIN")]
        orgs: Vec<String>,

        /// Fetch the full representation of each repository.
        #[arg(long)]
        full: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Label a pull request with its failing checks.
    LabelFailures {
        owner: String,
        repo: String,
        pr: u64,

        /// Show the checks and planned labels without changing anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// Create the check failure labels on a repository.
    CreateLabels { owner: String, repo: String },

    /// List the names of a repository's Actions secrets.
    Secrets { owner: String, repo: String },

    /// Set an Actions secret, reading the value from stdin if not given.
    SetSecret {
        owner: String,
        repo: String,
        name: String,
        value: Option<String>,
    },

    /// List every repository a GitHub App is installed on.
    Installed {
        /// The app's numeric ID.
        #[arg(long, env = "GHUTILS_APP_ID")]
        app_id: u64,

        /// Path to the app's PEM private key.
        #[arg(long, env = "GHUTILS_PRIVATE_KEY")]
        private_key: PathBuf,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print markdown footer links for an app's comments.
    Footer {
        owner: String,
        name: String,

        /// Date deciding the emoji (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// `marketplace` or `app`.
        #[arg(long, default_value = "marketplace")]
        kind: FooterKind,

        /// Link to the app's documentation.
        #[arg(long)]
        docs_url: Option<String>,
    },

    /// Run a command that commits as a bot.
    Exec {
        /// Committer name; defaults to the configured committer.
        #[arg(long = "as", value_name = "NAME", requires = "user_id")]
        name: Option<String>,

        /// Numeric user ID of the bot account, for its noreply email.
        #[arg(long, requires = "name")]
        user_id: Option<u64>,

        #[arg(last = true, required = true, value_name = "COMMAND")]
        command: Vec<String>,
    },
}
