//! Git author and committer identity for commits made on a bot's behalf.
//!
//! The identity is applied to child processes only. The current process's
//! environment is never modified.

use std::process::Command;

use serde::{Deserialize, Serialize};

/// Name and email recorded as both author and committer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

impl CommitIdentity {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Identity of a GitHub bot account, using its noreply address
    /// `{user_id}+{name}@users.noreply.github.com`.
    #[must_use]
    pub fn bot(name: impl Into<String>, user_id: u64) -> Self {
        let name = name.into();
        let email = format!("{user_id}+{name}@users.noreply.github.com");
        Self { name, email }
    }

    /// The git environment variables carrying this identity.
    #[must_use]
    pub fn env_vars(&self) -> [(&'static str, &str); 4] {
        [
            ("GIT_COMMITTER_NAME", &self.name),
            ("GIT_COMMITTER_EMAIL", &self.email),
            ("GIT_AUTHOR_NAME", &self.name),
            ("GIT_AUTHOR_EMAIL", &self.email),
        ]
    }

    /// Make git commands run by `command` commit as this identity.
    pub fn apply<'a>(&self, command: &'a mut Command) -> &'a mut Command {
        command.envs(self.env_vars())
    }
}
