//! Configuration management for ghutils.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::identity::CommitIdentity;

/// ghutils configuration loaded from `ghutils.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// GitHub-specific settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// Identity to commit as when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committer: Option<CommitIdentity>,
}

impl Config {
    /// File name looked for in the working directory.
    pub const DEFAULT_FILE: &'static str = "ghutils.toml";

    /// Load config from a TOML file. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            file: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Save config to a TOML file.
    ///
    /// # Errors
    /// Returns error if serialization or write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// GitHub-specific settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Custom API URL for GitHub Enterprise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Environment variable holding the token.
    #[serde(default = "default_token_var")]
    pub token_var: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            token_var: default_token_var(),
        }
    }
}

fn default_token_var() -> String {
    "GITHUB_TOKEN".into()
}
